use std::time::Duration;

use async_trait::async_trait;
use linklet_core::GeoInfo;
use serde::Deserialize;
use tracing::debug;

/// Default IP-geolocation endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://ipapi.co/json/";

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Best-effort location lookup for click records.
///
/// Infallible by contract: implementations collapse every failure into
/// [`GeoInfo::unknown`] so recording never blocks on the network.
#[async_trait]
pub trait GeoLookup: Send + Sync + 'static {
    async fn lookup(&self) -> GeoInfo;
}

/// Wire shape of an ipapi.co-compatible JSON response; only the fields
/// a click record keeps.
#[derive(Debug, Deserialize)]
struct IpApiPayload {
    country_name: Option<String>,
    region: Option<String>,
    city: Option<String>,
}

impl From<IpApiPayload> for GeoInfo {
    fn from(payload: IpApiPayload) -> Self {
        GeoInfo {
            country: payload.country_name,
            region: payload.region,
            city: payload.city,
        }
    }
}

/// Geo lookup against an ipapi.co-compatible HTTP endpoint.
///
/// One GET, one attempt, bounded by a request timeout. Any failure
/// (connect error, non-2xx status, malformed JSON) degrades silently to
/// [`GeoInfo::unknown`].
#[derive(Debug, Clone)]
pub struct IpApiClient {
    http: reqwest::Client,
    endpoint: String,
}

impl IpApiClient {
    /// Client against [`DEFAULT_ENDPOINT`].
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Client against a custom endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(LOOKUP_TIMEOUT)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    async fn fetch(&self) -> Result<GeoInfo, reqwest::Error> {
        let payload: IpApiPayload = self
            .http
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(payload.into())
    }
}

impl Default for IpApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GeoLookup for IpApiClient {
    async fn lookup(&self) -> GeoInfo {
        match self.fetch().await {
            Ok(geo) => geo,
            Err(err) => {
                debug!(error = %err, "geo lookup failed, recording unknown location");
                GeoInfo::unknown()
            }
        }
    }
}

/// Geo lookup that never touches the network and always reports an
/// unknown location.
#[derive(Debug, Clone, Default)]
pub struct NullGeoLookup;

#[async_trait]
impl GeoLookup for NullGeoLookup {
    async fn lookup(&self) -> GeoInfo {
        GeoInfo::unknown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn null_lookup_reports_unknown() {
        let geo = NullGeoLookup.lookup().await;
        assert!(geo.is_unknown());
    }
}
