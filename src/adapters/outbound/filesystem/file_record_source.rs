use crate::adapters::outbound::payload::decode_records;
use crate::application::dto::{DataSource, SourceLocation};
use crate::catalog::domain::PackageRecord;
use crate::ports::outbound::RecordSource;
use crate::shared::error::CatalogError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_DATA_FILE_SIZE};
use crate::shared::Result;
use async_trait::async_trait;
use std::fs;
use std::path::Path;

/// FileRecordSource adapter for reading package data from local JSON files
///
/// Symbolic links and files above the size limit are rejected before
/// anything is read.
pub struct FileRecordSource {
    max_file_size: u64,
}

impl FileRecordSource {
    pub fn new() -> Self {
        Self {
            max_file_size: MAX_DATA_FILE_SIZE,
        }
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Validates and reads the file; blocking, run off the async workers
    fn read(path: &Path, max_file_size: u64) -> Result<String> {
        let size = validate_regular_file(path, "package data file")?;
        validate_file_size(size, path, max_file_size)?;
        fs::read_to_string(path).map_err(|e| {
            CatalogError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl Default for FileRecordSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordSource for FileRecordSource {
    async fn load(&self, source: &DataSource) -> Result<Vec<PackageRecord>> {
        let SourceLocation::File(path) = &source.location else {
            return Err(CatalogError::LoadFailed {
                source_label: source.label.clone(),
                details: format!("{} is not a local file", source.location),
            }
            .into());
        };
        let owned_path = path.clone();
        let max_file_size = self.max_file_size;
        let payload = tokio::task::spawn_blocking(move || Self::read(&owned_path, max_file_size))
            .await
            .map_err(|e| CatalogError::FileReadError {
                path: path.clone(),
                details: e.to_string(),
            })??;
        decode_records(&payload, &path.display().to_string())
    }
}
