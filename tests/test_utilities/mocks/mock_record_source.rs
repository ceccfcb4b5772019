use async_trait::async_trait;
use ossatrisk::prelude::*;
use ossatrisk::shared::error::CatalogError;
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock RecordSource serving canned records per ecosystem name
#[derive(Default)]
pub struct MockRecordSource {
    records: HashMap<String, Vec<PackageRecord>>,
    failures: HashMap<String, u16>,
    pub requested: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockRecordSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, ecosystem: &str, records: Vec<PackageRecord>) -> Self {
        self.records.insert(ecosystem.to_string(), records);
        self
    }

    pub fn with_failure(mut self, ecosystem: &str, status: u16) -> Self {
        self.failures.insert(ecosystem.to_string(), status);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordSource for MockRecordSource {
    async fn load(&self, source: &DataSource) -> Result<Vec<PackageRecord>> {
        self.requested.lock().unwrap().push(source.name.clone());
        if let Some(status) = self.failures.get(&source.name) {
            return Err(CatalogError::HttpStatus {
                url: source.location.to_string(),
                status: *status,
            }
            .into());
        }
        Ok(self.records.get(&source.name).cloned().unwrap_or_default())
    }
}
