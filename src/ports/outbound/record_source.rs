use crate::application::dto::DataSource;
use crate::catalog::domain::PackageRecord;
use crate::shared::Result;
use async_trait::async_trait;

/// RecordSource port for retrieving a package record set
///
/// Implementations fetch the JSON array behind a data source and decode it
/// into records. One call yields the whole set; there is no pagination.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Loads every record of the data source
    ///
    /// # Arguments
    /// * `source` - The data source to read
    ///
    /// # Returns
    /// The decoded records, in payload order
    ///
    /// # Errors
    /// Returns an error if:
    /// - The location cannot be reached or read
    /// - The server answers with a non-success status
    /// - The payload is not a JSON array
    async fn load(&self, source: &DataSource) -> Result<Vec<PackageRecord>>;

    /// Drops anything remembered about `source`, so the next load refetches it
    fn invalidate(&self, _source: &DataSource) {}
}
