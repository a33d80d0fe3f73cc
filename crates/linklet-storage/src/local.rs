use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use linklet_core::{Click, Link, LinkStore, ReadLinkStore, StorageError};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

type Result<T> = std::result::Result<T, StorageError>;

/// Default file name for the persisted collection, mirroring the
/// well-known storage key consumers expect.
pub const DEFAULT_STORE_FILE: &str = "url_shortener_data.json";

/// Outcome of the load-on-open step.
///
/// A malformed or unreadable payload degrades to an empty collection
/// instead of failing the caller; this report makes that degradation
/// observable so consumers and tests can assert on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    /// The payload parsed; `links` entries were loaded.
    Loaded { links: usize },
    /// No file existed yet; started empty.
    Missing,
    /// The file existed but could not be read or parsed; started empty.
    Corrupt,
}

/// The canonical link collection, held in memory and mirrored to one
/// JSON file.
///
/// The collection is an ordered `Vec` in creation order; lookups are
/// linear scans. Every write serializes the full collection, so persisted
/// state is always a complete snapshot, never a partial mutation. Write
/// failures are logged and absorbed: the in-memory state runs ahead of
/// the durable state until the next successful persist.
#[derive(Debug)]
pub struct LocalStore {
    links: RwLock<Vec<Link>>,
    path: Option<PathBuf>,
    load_report: LoadReport,
}

impl LocalStore {
    /// Opens the store backed by the given file, loading the existing
    /// collection or starting empty when the file is absent or corrupt.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (links, load_report) = Self::load(&path);
        Self {
            links: RwLock::new(links),
            path: Some(path),
            load_report,
        }
    }

    /// A store with no backing file; persistence is a no-op.
    pub fn in_memory() -> Self {
        Self {
            links: RwLock::new(Vec::new()),
            path: None,
            load_report: LoadReport::Missing,
        }
    }

    /// How the load-on-open step went.
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    fn load(path: &Path) -> (Vec<Link>, LoadReport) {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no stored collection, starting empty");
                return (Vec::new(), LoadReport::Missing);
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read stored collection, starting empty");
                return (Vec::new(), LoadReport::Corrupt);
            }
        };

        match serde_json::from_str::<Vec<Link>>(&text) {
            Ok(links) => {
                info!(path = %path.display(), links = links.len(), "loaded stored collection");
                let count = links.len();
                (links, LoadReport::Loaded { links: count })
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to parse stored collection, starting empty");
                (Vec::new(), LoadReport::Corrupt)
            }
        }
    }

    /// Serializes the full collection to the backing file.
    ///
    /// Called with the write lock held so persisted snapshots never
    /// interleave. Failures are logged and absorbed.
    fn persist(&self, links: &[Link]) {
        let Some(path) = &self.path else {
            return;
        };

        let payload = match serde_json::to_string_pretty(links) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to serialize collection");
                return;
            }
        };

        if let Err(err) = write_atomic(path, &payload) {
            warn!(path = %path.display(), error = %err, "failed to persist collection");
        }
    }
}

/// Writes via a sibling temp file and rename, so a crash mid-write never
/// leaves a truncated payload at the store path.
fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}

#[async_trait]
impl ReadLinkStore for LocalStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>> {
        let links = self.links.read().await;
        Ok(links.iter().find(|link| link.code.as_str() == code).cloned())
    }

    async fn is_code_unique(&self, code: &str) -> Result<bool> {
        let links = self.links.read().await;
        Ok(!links.iter().any(|link| link.code.as_str() == code))
    }

    async fn all(&self) -> Result<Vec<Link>> {
        let links = self.links.read().await;
        Ok(links.clone())
    }
}

#[async_trait]
impl LinkStore for LocalStore {
    async fn add(&self, link: Link) -> Result<()> {
        let mut links = self.links.write().await;
        links.push(link);
        self.persist(&links);
        Ok(())
    }

    async fn replace_all(&self, new_links: Vec<Link>) -> Result<()> {
        let mut links = self.links.write().await;
        *links = new_links;
        self.persist(&links);
        Ok(())
    }

    async fn append_click(&self, code: &str, click: Click) -> Result<bool> {
        let mut links = self.links.write().await;
        let Some(link) = links.iter_mut().find(|link| link.code.as_str() == code) else {
            return Ok(false);
        };

        link.clicks.push(click);
        self.persist(&links);
        Ok(true)
    }
}
