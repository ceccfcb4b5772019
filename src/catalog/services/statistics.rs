use crate::catalog::domain::{CatalogStats, PackageRecord};

/// CatalogStatistics - Summary counters over the full record set
///
/// Always computed from the unfiltered set: the totals describe the data
/// set, not the current search.
pub struct CatalogStatistics;

impl CatalogStatistics {
    pub fn compute(records: &[PackageRecord]) -> CatalogStats {
        records.iter().fold(
            CatalogStats {
                total: records.len(),
                ..CatalogStats::default()
            },
            |mut stats, record| {
                stats.total_downloads = stats
                    .total_downloads
                    .saturating_add(record.downloads_total());
                stats.total_favers = stats.total_favers.saturating_add(record.favers());
                stats
            },
        )
    }
}
