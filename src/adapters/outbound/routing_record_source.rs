use crate::adapters::outbound::filesystem::FileRecordSource;
use crate::adapters::outbound::network::HttpRecordSource;
use crate::application::dto::{DataSource, SourceLocation};
use crate::catalog::domain::PackageRecord;
use crate::ports::outbound::RecordSource;
use crate::shared::Result;
use async_trait::async_trait;

/// RoutingRecordSource dispatches on the data source location:
/// URLs go over HTTP, paths are read from disk.
pub struct RoutingRecordSource {
    http: HttpRecordSource,
    file: FileRecordSource,
}

impl RoutingRecordSource {
    pub fn new(http: HttpRecordSource, file: FileRecordSource) -> Self {
        Self { http, file }
    }

    /// HTTP with the given timeout, files with default limits
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        Ok(Self::new(
            HttpRecordSource::with_timeout(timeout_secs)?,
            FileRecordSource::new(),
        ))
    }
}

#[async_trait]
impl RecordSource for RoutingRecordSource {
    async fn load(&self, source: &DataSource) -> Result<Vec<PackageRecord>> {
        match source.location {
            SourceLocation::Url(_) => self.http.load(source).await,
            SourceLocation::File(_) => self.file.load(source).await,
        }
    }
}
