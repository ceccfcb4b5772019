use crate::adapters::outbound::payload::decode_records;
use crate::application::dto::{DataSource, SourceLocation};
use crate::catalog::domain::PackageRecord;
use crate::ports::outbound::RecordSource;
use crate::shared::error::CatalogError;
use crate::shared::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Request timeout used unless configured otherwise
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// HttpRecordSource adapter for fetching package data over HTTP
///
/// Issues a single GET per attempt. Connection errors and 5xx answers are
/// retried with a short backoff; timeouts, 4xx answers and malformed bodies
/// fail immediately.
pub struct HttpRecordSource {
    client: reqwest::Client,
    timeout_secs: u64,
    max_retries: u32,
}

impl HttpRecordSource {
    /// Creates a new HTTP record source with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new HTTP record source with a request timeout in seconds
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("ossatrisk/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            timeout_secs,
            max_retries: 3,
        })
    }

    /// Sets the number of attempts per load (at least one)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Fetches the payload, retrying transient failures (async)
    async fn fetch_with_retry(&self, url: &str) -> Result<String> {
        let mut attempt = 1;
        loop {
            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < self.max_retries && is_transient(&e) => {
                    tracing::debug!(url, attempt, error = %e, "retrying data source");
                    tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        response
            .text()
            .await
            .map_err(|e| self.transport_error(url, e))
    }

    fn transport_error(&self, url: &str, error: reqwest::Error) -> anyhow::Error {
        if error.is_timeout() {
            CatalogError::Timeout {
                url: url.to_string(),
                seconds: self.timeout_secs,
            }
            .into()
        } else {
            CatalogError::LoadFailed {
                source_label: url.to_string(),
                details: error.to_string(),
            }
            .into()
        }
    }
}

fn is_transient(error: &anyhow::Error) -> bool {
    match error.downcast_ref::<CatalogError>() {
        Some(CatalogError::LoadFailed { .. }) => true,
        Some(CatalogError::HttpStatus { status, .. }) => *status >= 500,
        _ => false,
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn load(&self, source: &DataSource) -> Result<Vec<PackageRecord>> {
        let SourceLocation::Url(url) = &source.location else {
            return Err(CatalogError::LoadFailed {
                source_label: source.label.clone(),
                details: format!("{} is not an HTTP URL", source.location),
            }
            .into());
        };
        tracing::debug!(url = url.as_str(), "fetching package data");
        let body = self.fetch_with_retry(url).await?;
        decode_records(&body, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_timeout() {
        let source = HttpRecordSource::new().unwrap();
        assert_eq!(source.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(source.max_retries, 3);
    }

    #[test]
    fn test_max_retries_is_at_least_one() {
        let source = HttpRecordSource::new().unwrap().with_max_retries(0);
        assert_eq!(source.max_retries, 1);
    }

    #[test]
    fn test_transient_classification() {
        let server_error: anyhow::Error = CatalogError::HttpStatus {
            url: "u".to_string(),
            status: 503,
        }
        .into();
        let not_found: anyhow::Error = CatalogError::HttpStatus {
            url: "u".to_string(),
            status: 404,
        }
        .into();
        let timeout: anyhow::Error = CatalogError::Timeout {
            url: "u".to_string(),
            seconds: 1,
        }
        .into();
        assert!(is_transient(&server_error));
        assert!(!is_transient(&not_found));
        assert!(!is_transient(&timeout));
    }

    #[tokio::test]
    async fn test_file_location_is_not_handled() {
        let source = DataSource::from_argument("data/php.json");
        let result = HttpRecordSource::new().unwrap().load(&source).await;
        assert!(result.unwrap_err().to_string().contains("not an HTTP URL"));
    }
}
