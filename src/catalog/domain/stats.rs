/// Summary counters over a full, unfiltered record set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    /// Number of records
    pub total: usize,
    /// Sum of `downloads_total`, missing values counted as zero
    pub total_downloads: u64,
    /// Sum of `favers`, missing values counted as zero
    pub total_favers: u64,
}
