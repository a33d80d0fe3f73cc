use crate::shortcode::ShortCode;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

/// Sentinel click source recorded when no referrer is present.
pub const DIRECT_SOURCE: &str = "direct";

/// Best-effort location attached to a click.
///
/// All fields are optional; a failed lookup yields [`GeoInfo::unknown`]
/// with nothing populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl GeoInfo {
    /// A geo record with no fields populated.
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_unknown(&self) -> bool {
        self.country.is_none() && self.region.is_none() && self.city.is_none()
    }
}

/// One recorded visit to a short link.
///
/// Owned exclusively by its parent [`Link`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Click {
    #[serde(with = "timestamp_millis")]
    pub timestamp: Timestamp,
    pub source: String,
    pub geo: GeoInfo,
}

impl Click {
    /// Builds a click record for the given referrer, falling back to the
    /// [`DIRECT_SOURCE`] sentinel when none is present.
    pub fn new(timestamp: Timestamp, referrer: Option<&str>, geo: GeoInfo) -> Self {
        let source = match referrer {
            Some(referrer) if !referrer.trim().is_empty() => referrer.to_owned(),
            _ => DIRECT_SOURCE.to_owned(),
        };
        Self {
            timestamp,
            source,
            geo,
        }
    }
}

/// One shortened URL with its click history.
///
/// Created once, mutated only by click appending, never deleted. The
/// persisted wire format uses camelCase keys and integer millisecond
/// timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub code: ShortCode,
    pub long_url: String,
    #[serde(with = "timestamp_millis")]
    pub created_at: Timestamp,
    #[serde(with = "timestamp_millis")]
    pub expires_at: Timestamp,
    pub clicks: Vec<Click>,
}

impl Link {
    /// Creates a link with an empty click history.
    pub fn new(
        code: ShortCode,
        long_url: impl Into<String>,
        created_at: Timestamp,
        expires_at: Timestamp,
    ) -> Self {
        Self {
            code,
            long_url: long_url.into(),
            created_at,
            expires_at,
            clicks: Vec::new(),
        }
    }

    /// True once `now` is strictly past the expiry instant.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }

    /// Time left until expiry; non-positive once expired.
    pub fn remaining(&self, now: Timestamp) -> SignedDuration {
        self.expires_at.duration_since(now)
    }

    pub fn click_count(&self) -> usize {
        self.clicks.len()
    }

    /// Clicks in display order, most recent first.
    pub fn clicks_recent_first(&self) -> Vec<&Click> {
        let mut clicks: Vec<&Click> = self.clicks.iter().collect();
        clicks.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        clicks
    }
}

/// Serde adapter persisting [`Timestamp`]s as integer milliseconds since
/// the epoch, the wire format the stored payload uses.
pub mod timestamp_millis {
    use jiff::Timestamp;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        ts.as_millisecond().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let millis = i64::deserialize(deserializer)?;
        Timestamp::from_millisecond(millis).map_err(serde::de::Error::custom)
    }
}
