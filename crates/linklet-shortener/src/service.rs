use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use linklet_core::validate::{is_valid_url, validate_form};
use linklet_core::{Field, FormInput, Link, LinkStore, ShortCode};
use thiserror::Error;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

use crate::error::ShortenError;
use crate::generator::Generator;

/// Validity applied when a request does not specify one.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// Bound on the generate-check-retry loop. Exhausting it is surfaced as
/// [`ShortenError::GenerationExhausted`] instead of spinning forever on a
/// saturated code space.
pub const MAX_GENERATE_ATTEMPTS: usize = 100;

/// Most populated rows accepted in one batch submission.
pub const MAX_BATCH_ROWS: usize = 5;

/// Parameters for creating one shortened link.
#[derive(Debug, Clone, TypedBuilder)]
pub struct ShortenRequest {
    /// The original URL to be shortened.
    #[builder(setter(into))]
    pub long_url: String,
    /// Minutes until expiry; `None` applies [`DEFAULT_VALIDITY_MINUTES`].
    #[builder(default, setter(strip_option))]
    pub validity_minutes: Option<i64>,
    /// Optional custom code for the shortened URL.
    #[builder(default, setter(strip_option, into))]
    pub custom_code: Option<String>,
}

/// A batch submission rejected before any link was created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchRejection {
    #[error("Please enter at least one URL to shorten")]
    Empty,
    #[error("a batch may contain at most {limit} populated rows")]
    TooManyRows { limit: usize },
    #[error("validation failed for {} field(s)", .0.len())]
    Fields(Vec<RowError>),
}

/// A field-tagged validation error attributed to its batch row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub row: usize,
    pub field: Field,
    pub message: String,
}

/// Per-row result of a batch creation, in submission order.
#[derive(Debug, Clone)]
pub struct RowOutcome {
    pub row: usize,
    pub long_url: String,
    pub result: Result<Link, ShortenError>,
}

/// The link creation service.
///
/// Wraps a [`LinkStore`] and a [`Generator`] to handle URL validation,
/// code resolution (custom with uniqueness check, or generated with
/// bounded retry), expiry computation and the store commit. The creation
/// path completes fully before returning, so batch rows are serialized
/// in array order, never interleaved.
#[derive(Debug)]
pub struct ShortenerService<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
}

impl<S, G> Clone for ShortenerService<S, G> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<S: LinkStore, G: Generator> ShortenerService<S, G> {
    pub fn new(store: Arc<S>, generator: G) -> Self {
        Self {
            store,
            generator: Arc::new(generator),
        }
    }

    /// Creates one link: validate, resolve a unique code, compute expiry,
    /// commit. Every failure comes back as a [`ShortenError`] value.
    pub async fn shorten(&self, request: ShortenRequest) -> Result<Link, ShortenError> {
        let long_url = request.long_url.trim().to_owned();
        if long_url.is_empty() {
            return Err(ShortenError::InvalidUrl("URL is required".to_owned()));
        }
        if !is_valid_url(&long_url) {
            return Err(ShortenError::InvalidUrl(long_url));
        }

        let minutes = request.validity_minutes.unwrap_or(DEFAULT_VALIDITY_MINUTES);
        if minutes <= 0 {
            return Err(ShortenError::InvalidValidity(format!(
                "validity must be a positive number of minutes, got {}",
                minutes
            )));
        }

        let code = match request.custom_code.as_deref() {
            Some(custom) => self.claim_custom_code(custom.trim()).await?,
            None => self.generate_unique_code().await?,
        };

        let created_at = Timestamp::now();
        let expires_at = created_at + SignedDuration::from_mins(minutes);
        let link = Link::new(code, long_url, created_at, expires_at);

        self.store.add(link.clone()).await?;
        info!(code = %link.code, expires_at = %expires_at, "link created");
        Ok(link)
    }

    /// Creates up to [`MAX_BATCH_ROWS`] links from raw form rows.
    ///
    /// Blank rows are skipped. Validation runs over every populated row
    /// first and rejects the whole batch without creating anything when
    /// any field fails; after that, rows are processed strictly in array
    /// order and a failing row becomes its own outcome without aborting
    /// the rest.
    pub async fn shorten_batch(
        &self,
        rows: &[FormInput],
    ) -> Result<Vec<RowOutcome>, BatchRejection> {
        let populated: Vec<(usize, &FormInput)> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.is_blank())
            .collect();

        if populated.is_empty() {
            return Err(BatchRejection::Empty);
        }
        if populated.len() > MAX_BATCH_ROWS {
            return Err(BatchRejection::TooManyRows {
                limit: MAX_BATCH_ROWS,
            });
        }

        let row_errors = self.validate_rows(&populated).await;
        if !row_errors.is_empty() {
            warn!(errors = row_errors.len(), "batch validation failed");
            return Err(BatchRejection::Fields(row_errors));
        }

        let mut outcomes = Vec::with_capacity(populated.len());
        for (row, input) in populated {
            let long_url = input.long_url.trim().to_owned();
            let request = ShortenRequest {
                long_url: long_url.clone(),
                validity_minutes: parse_validity(&input.validity),
                custom_code: non_blank(&input.custom_code),
            };

            let result = self.shorten(request).await;
            outcomes.push(RowOutcome {
                row,
                long_url,
                result,
            });
        }

        Ok(outcomes)
    }

    /// Field validation for populated rows, including the store-level
    /// uniqueness pre-check on custom codes. Duplicates within the batch
    /// itself are not caught here; the commit-time check in [`shorten`]
    /// rejects the later row.
    ///
    /// [`shorten`]: ShortenerService::shorten
    async fn validate_rows(&self, populated: &[(usize, &FormInput)]) -> Vec<RowError> {
        let mut row_errors = Vec::new();

        for &(row, input) in populated {
            for error in validate_form(input) {
                row_errors.push(RowError {
                    row,
                    field: error.field,
                    message: error.message,
                });
            }

            let custom = input.custom_code.trim();
            if !custom.is_empty() && ShortCode::is_valid(custom) {
                match self.store.is_code_unique(custom).await {
                    Ok(true) => {}
                    Ok(false) => row_errors.push(RowError {
                        row,
                        field: Field::CustomCode,
                        message: "This custom code is already in use".to_owned(),
                    }),
                    Err(err) => warn!(code = custom, error = %err, "uniqueness pre-check failed"),
                }
            }
        }

        row_errors
    }

    async fn claim_custom_code(&self, custom: &str) -> Result<ShortCode, ShortenError> {
        let code = ShortCode::new(custom)?;
        if !self.store.is_code_unique(code.as_str()).await? {
            return Err(ShortenError::CodeTaken(code.to_string()));
        }
        Ok(code)
    }

    async fn generate_unique_code(&self) -> Result<ShortCode, ShortenError> {
        for attempt in 1..=MAX_GENERATE_ATTEMPTS {
            let code = self.generator.generate();
            if self.store.is_code_unique(code.as_str()).await? {
                debug!(code = %code, attempt, "generated shortcode");
                return Ok(code);
            }
        }

        warn!(
            attempts = MAX_GENERATE_ATTEMPTS,
            "shortcode generation exhausted"
        );
        Err(ShortenError::GenerationExhausted {
            attempts: MAX_GENERATE_ATTEMPTS,
        })
    }
}

fn parse_validity(validity: &str) -> Option<i64> {
    let validity = validity.trim();
    if validity.is_empty() {
        return None;
    }
    validity.parse().ok()
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::RandomGenerator;
    use linklet_core::ReadLinkStore;
    use linklet_storage::LocalStore;

    fn service() -> ShortenerService<LocalStore, RandomGenerator> {
        ShortenerService::new(Arc::new(LocalStore::in_memory()), RandomGenerator::new())
    }

    /// Generator that always produces the same code, for saturating the
    /// retry loop.
    struct FixedGenerator(&'static str);

    impl Generator for FixedGenerator {
        fn generate(&self) -> ShortCode {
            ShortCode::generated(self.0)
        }
    }

    fn request(url: &str) -> ShortenRequest {
        ShortenRequest::builder().long_url(url).build()
    }

    #[tokio::test]
    async fn default_validity_is_thirty_minutes() {
        let service = service();

        let link = service.shorten(request("https://example.com")).await.unwrap();

        assert_eq!(link.code.as_str().len(), 6);
        assert_eq!(
            link.expires_at.duration_since(link.created_at),
            SignedDuration::from_mins(30)
        );
        assert!(link.clicks.is_empty());
    }

    #[tokio::test]
    async fn explicit_validity_sets_the_expiry() {
        let service = service();

        let link = service
            .shorten(
                ShortenRequest::builder()
                    .long_url("https://example.com")
                    .validity_minutes(90)
                    .build(),
            )
            .await
            .unwrap();

        assert_eq!(
            link.expires_at.duration_since(link.created_at),
            SignedDuration::from_mins(90)
        );
    }

    #[tokio::test]
    async fn custom_code_is_honored() {
        let service = service();

        let link = service
            .shorten(
                ShortenRequest::builder()
                    .long_url("https://example.com")
                    .custom_code("myLink1")
                    .build(),
            )
            .await
            .unwrap();

        assert_eq!(link.code.as_str(), "myLink1");
    }

    #[tokio::test]
    async fn duplicate_custom_code_is_rejected() {
        let service = service();
        let builder = || {
            ShortenRequest::builder()
                .long_url("https://example.com")
                .custom_code("myLink1")
                .build()
        };

        service.shorten(builder()).await.unwrap();
        let err = service.shorten(builder()).await.unwrap_err();

        assert!(matches!(err, ShortenError::CodeTaken(_)));
        assert_eq!(service.store.all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_url_creates_nothing() {
        let service = service();

        let err = service.shorten(request("not-a-url")).await.unwrap_err();

        assert!(matches!(err, ShortenError::InvalidUrl(_)));
        assert!(service.store.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_positive_validity_is_rejected() {
        let service = service();

        let err = service
            .shorten(
                ShortenRequest::builder()
                    .long_url("https://example.com")
                    .validity_minutes(0)
                    .build(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ShortenError::InvalidValidity(_)));
    }

    #[tokio::test]
    async fn invalid_custom_code_syntax_is_rejected() {
        let service = service();

        let err = service
            .shorten(
                ShortenRequest::builder()
                    .long_url("https://example.com")
                    .custom_code("a!")
                    .build(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ShortenError::InvalidShortCode(_)));
    }

    #[tokio::test]
    async fn generation_exhaustion_is_a_distinct_failure() {
        let store = Arc::new(LocalStore::in_memory());
        let service = ShortenerService::new(Arc::clone(&store), FixedGenerator("stuck1"));

        service
            .shorten(
                ShortenRequest::builder()
                    .long_url("https://example.com")
                    .custom_code("stuck1")
                    .build(),
            )
            .await
            .unwrap();

        let err = service.shorten(request("https://example.org")).await.unwrap_err();
        assert!(matches!(
            err,
            ShortenError::GenerationExhausted {
                attempts: MAX_GENERATE_ATTEMPTS
            }
        ));
        assert_eq!(store.all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn batch_skips_blank_rows_and_keeps_indices() {
        let service = service();
        let rows = vec![
            FormInput::new("https://example.com", "", ""),
            FormInput::new("", "", ""),
            FormInput::new("https://example.org", "60", ""),
        ];

        let outcomes = service.shorten_batch(&rows).await.unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].row, 0);
        assert_eq!(outcomes[1].row, 2);
        assert!(outcomes.iter().all(|o| o.result.is_ok()));
    }

    #[tokio::test]
    async fn batch_with_no_populated_rows_is_rejected() {
        let service = service();
        let rows = vec![FormInput::default(), FormInput::default()];

        let rejection = service.shorten_batch(&rows).await.unwrap_err();
        assert_eq!(rejection, BatchRejection::Empty);
    }

    #[tokio::test]
    async fn batch_over_the_row_limit_is_rejected() {
        let service = service();
        let rows: Vec<FormInput> = (0..6)
            .map(|i| FormInput::new(format!("https://example.com/{}", i), "", ""))
            .collect();

        let rejection = service.shorten_batch(&rows).await.unwrap_err();
        assert_eq!(
            rejection,
            BatchRejection::TooManyRows {
                limit: MAX_BATCH_ROWS
            }
        );
    }

    #[tokio::test]
    async fn batch_field_errors_carry_their_row_index() {
        let service = service();
        let rows = vec![
            FormInput::new("https://example.com", "", ""),
            FormInput::new("not-a-url", "", ""),
        ];

        let rejection = service.shorten_batch(&rows).await.unwrap_err();
        let BatchRejection::Fields(errors) = rejection else {
            panic!("expected field errors");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].row, 1);
        assert_eq!(errors[0].field, Field::LongUrl);
    }

    #[tokio::test]
    async fn stored_code_collision_is_a_field_error() {
        let service = service();
        service
            .shorten(
                ShortenRequest::builder()
                    .long_url("https://example.com")
                    .custom_code("taken1")
                    .build(),
            )
            .await
            .unwrap();

        let rows = vec![FormInput::new("https://example.org", "", "taken1")];
        let rejection = service.shorten_batch(&rows).await.unwrap_err();

        let BatchRejection::Fields(errors) = rejection else {
            panic!("expected field errors");
        };
        assert_eq!(errors[0].field, Field::CustomCode);
        assert_eq!(errors[0].message, "This custom code is already in use");
    }

    #[tokio::test]
    async fn duplicate_custom_code_within_a_batch_fails_the_later_row() {
        let service = service();
        let rows = vec![
            FormInput::new("https://example.com", "", "shared1"),
            FormInput::new("https://example.org", "", "shared1"),
        ];

        let outcomes = service.shorten_batch(&rows).await.unwrap();

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].result.is_ok());
        assert!(matches!(
            outcomes[1].result,
            Err(ShortenError::CodeTaken(_))
        ));
        assert_eq!(service.store.all().await.unwrap().len(), 1);
    }
}
