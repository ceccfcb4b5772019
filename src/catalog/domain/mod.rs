pub mod package_record;
pub mod sort;
pub mod stats;

pub use package_record::PackageRecord;
pub use sort::{SortDirection, SortKey, SortKind, SortPreset, SortSpec, SORT_PRESETS};
pub use stats::CatalogStats;
