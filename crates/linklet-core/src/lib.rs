//! Core types and traits for the linklet URL shortener.
//!
//! This crate provides the shared vocabulary used by the storage,
//! shortener and redirector crates: the validated [`ShortCode`], the
//! [`Link`] and [`Click`] records, the [`LinkStore`] trait family, and
//! the pure validation and formatting helpers.

pub mod error;
pub mod format;
pub mod link;
pub mod shortcode;
pub mod store;
pub mod validate;

pub use error::{CoreError, StorageError};
pub use link::{Click, GeoInfo, Link, DIRECT_SOURCE};
pub use shortcode::ShortCode;
pub use store::{LinkStore, ReadLinkStore};
pub use validate::{Field, FieldError, FormInput};
