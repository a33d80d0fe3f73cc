use crate::error::StorageError;
use crate::link::{Click, Link};
use async_trait::async_trait;

type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of the link collection.
///
/// Lookups are linear scans over the stored sequence; no secondary index
/// is maintained at the expected scale of at most a few hundred links.
#[async_trait]
pub trait ReadLinkStore: Send + Sync + 'static {
    /// Returns the link with this code, or `None` if no link matches.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>>;

    /// True iff no existing link carries this code.
    ///
    /// Callers must check this before committing a custom code, and use it
    /// in the generate-check-retry loop for generated codes.
    async fn is_code_unique(&self, code: &str) -> Result<bool>;

    /// A snapshot of the whole collection in creation order.
    async fn all(&self) -> Result<Vec<Link>>;
}

/// Full access to the link collection.
///
/// Every write persists the entire collection; there is no partial-write
/// visibility. Implementations favor availability over strict
/// consistency: a persistence failure leaves the in-memory state ahead of
/// the durable state rather than failing the caller.
#[async_trait]
pub trait LinkStore: ReadLinkStore {
    /// Appends a validated, uniqueness-checked link and persists the
    /// collection. Uniqueness is the caller's responsibility.
    async fn add(&self, link: Link) -> Result<()>;

    /// Replaces the entire collection and persists it.
    async fn replace_all(&self, links: Vec<Link>) -> Result<()>;

    /// Appends a click to the link with this code and persists the
    /// collection. Returns `false` if no link matches.
    async fn append_click(&self, code: &str, click: Click) -> Result<bool>;
}
