//! Short link resolution and click recording for linklet.
//!
//! This crate provides the redirect path: [`RedirectorService`] resolves
//! a code to a terminal [`Resolution`], and on the redirect arm detaches
//! click recording (geo lookup + click append) onto the runtime so the
//! caller can navigate immediately. Recording failures never surface.

pub mod geo;
pub mod recorder;
pub mod resolution;
pub mod service;

pub use geo::{GeoLookup, IpApiClient, NullGeoLookup};
pub use recorder::ClickRecorder;
pub use resolution::Resolution;
pub use service::RedirectorService;
