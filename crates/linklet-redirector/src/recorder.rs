use std::sync::Arc;

use jiff::Timestamp;
use linklet_core::{Click, LinkStore};
use tracing::{debug, info};

use crate::geo::GeoLookup;

/// Appends click records to links, best-effort.
///
/// Every failure inside the recorder (geo lookup, store append,
/// persistence) is absorbed and logged; recording must never surface an
/// error to the navigation path that triggered it.
#[derive(Debug)]
pub struct ClickRecorder<S, G> {
    store: Arc<S>,
    geo: Arc<G>,
}

impl<S, G> Clone for ClickRecorder<S, G> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            geo: Arc::clone(&self.geo),
        }
    }
}

impl<S: LinkStore, G: GeoLookup> ClickRecorder<S, G> {
    pub fn new(store: Arc<S>, geo: Arc<G>) -> Self {
        Self { store, geo }
    }

    /// Records one click against the link with this code: geo lookup,
    /// click construction, store append. Infallible by contract.
    pub async fn record(&self, code: &str, referrer: Option<&str>) {
        let geo = self.geo.lookup().await;
        let click = Click::new(Timestamp::now(), referrer, geo);

        match self.store.append_click(code, click).await {
            Ok(true) => info!(code, "click recorded"),
            Ok(false) => debug!(code, "click dropped, no link with this code"),
            Err(err) => debug!(code, error = %err, "click recording failed"),
        }
    }

    /// Detaches a recording onto the runtime and returns immediately.
    ///
    /// The task is fire-and-forget: no handle is kept, no completion is
    /// guaranteed (process exit may abort it mid-flight).
    pub fn spawn_record(&self, code: &str, referrer: Option<&str>) {
        let recorder = self.clone();
        let code = code.to_owned();
        let referrer = referrer.map(str::to_owned);

        tokio::spawn(async move {
            recorder.record(&code, referrer.as_deref()).await;
        });
    }
}
