use std::sync::Arc;

use jiff::Timestamp;
use linklet_core::LinkStore;
use tracing::{debug, info, trace, warn};

use crate::geo::GeoLookup;
use crate::recorder::ClickRecorder;
use crate::resolution::Resolution;

/// Service resolving short codes for the redirect path.
///
/// Resolution is a three-way terminal outcome: unknown code, expired
/// link, or a redirect target. On the redirect arm, click recording is
/// detached onto the runtime so navigation is never gated on it.
#[derive(Debug)]
pub struct RedirectorService<S, G> {
    store: Arc<S>,
    recorder: ClickRecorder<S, G>,
}

impl<S, G> Clone for RedirectorService<S, G> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            recorder: self.recorder.clone(),
        }
    }
}

impl<S: LinkStore, G: GeoLookup> RedirectorService<S, G> {
    pub fn new(store: Arc<S>, geo: G) -> Self {
        let recorder = ClickRecorder::new(Arc::clone(&store), Arc::new(geo));
        Self { store, recorder }
    }

    /// Resolves a short code without recording a click.
    ///
    /// A store failure is absorbed into `NotFound`: nothing on the
    /// redirect path throws to the caller.
    pub async fn resolve(&self, code: &str) -> Resolution {
        trace!(code, "redirect attempted");

        let link = match self.store.find_by_code(code).await {
            Ok(link) => link,
            Err(err) => {
                warn!(code, error = %err, "store lookup failed during redirect");
                return Resolution::NotFound;
            }
        };

        match link {
            None => {
                debug!(code, "short code not found");
                Resolution::NotFound
            }
            Some(link) if link.is_expired(Timestamp::now()) => {
                debug!(code, "short link has expired");
                Resolution::Expired
            }
            Some(link) => {
                info!(code, target = %link.long_url, "resolved short code");
                Resolution::Redirect {
                    target: link.long_url,
                }
            }
        }
    }

    /// Resolves a short code and, on the redirect arm, detaches a click
    /// recording before returning.
    ///
    /// The caller navigates as soon as this returns; the recording runs
    /// on its own with no completion guarantee. NotFound and Expired
    /// record nothing.
    pub async fn resolve_and_record(&self, code: &str, referrer: Option<&str>) -> Resolution {
        let resolution = self.resolve(code).await;

        if resolution.is_redirect() {
            self.recorder.spawn_record(code, referrer);
        }

        resolution
    }
}
