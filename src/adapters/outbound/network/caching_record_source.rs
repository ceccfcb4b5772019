use crate::application::dto::{DataSource, SourceLocation};
use crate::catalog::domain::PackageRecord;
use crate::ports::outbound::RecordSource;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingRecordSource wraps a RecordSource and keeps successful loads in memory.
///
/// Switching back to a tab that was already loaded is served from the cache;
/// `invalidate` forgets an entry so a reload goes to the inner source.
/// Failures are never cached, and neither are results of fetches that were
/// already in flight when their entry was invalidated.
pub struct CachingRecordSource<S: RecordSource> {
    inner: S,
    cache: Arc<DashMap<SourceLocation, Arc<[PackageRecord]>>>,
    /// Bumped on every invalidation of a location
    epochs: DashMap<SourceLocation, u64>,
}

impl<S: RecordSource> CachingRecordSource<S> {
    /// Creates a new caching source wrapping the given inner source
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
            epochs: DashMap::new(),
        }
    }

    /// Number of cached data sets
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    fn epoch(&self, location: &SourceLocation) -> u64 {
        self.epochs.get(location).map(|epoch| *epoch).unwrap_or(0)
    }
}

#[async_trait]
impl<S: RecordSource> RecordSource for CachingRecordSource<S> {
    async fn load(&self, source: &DataSource) -> Result<Vec<PackageRecord>> {
        if let Some(cached) = self.cache.get(&source.location) {
            tracing::debug!(source = %source.location, "serving package data from cache");
            return Ok(cached.to_vec());
        }

        let epoch = self.epoch(&source.location);
        let records = self.inner.load(source).await?;
        if self.epoch(&source.location) == epoch {
            self.cache
                .insert(source.location.clone(), Arc::from(records.as_slice()));
        } else {
            tracing::debug!(
                source = %source.location,
                "not caching data fetched before invalidation"
            );
        }
        Ok(records)
    }

    fn invalidate(&self, source: &DataSource) {
        *self.epochs.entry(source.location.clone()).or_insert(0) += 1;
        self.cache.remove(&source.location);
        self.inner.invalidate(source);
    }
}
