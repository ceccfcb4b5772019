/// Network adapters for fetching package data
mod caching_record_source;
mod http_record_source;

pub use caching_record_source::CachingRecordSource;
pub use http_record_source::{HttpRecordSource, DEFAULT_TIMEOUT_SECS};
