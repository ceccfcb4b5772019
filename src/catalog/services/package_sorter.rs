use crate::catalog::domain::{PackageRecord, SortDirection, SortKey, SortKind, SortSpec};
use std::cmp::Ordering;

/// PackageSorter - Orders records by a sort key and direction
///
/// Text keys use a case-folding collation, numeric keys compare values with
/// missing fields read as zero. The sort is stable: records with equal keys
/// keep their input order in both directions.
pub struct PackageSorter;

impl PackageSorter {
    /// Sorts a sequence of borrowed records into a new order
    ///
    /// The records themselves, and the slice they were borrowed from, are untouched.
    pub fn sort<'a>(
        mut records: Vec<&'a PackageRecord>,
        spec: SortSpec,
    ) -> Vec<&'a PackageRecord> {
        records.sort_by(|a, b| Self::compare(a, b, spec));
        records
    }

    /// Comparator for two records under `spec`
    pub fn compare(a: &PackageRecord, b: &PackageRecord, spec: SortSpec) -> Ordering {
        let ordering = match spec.key.kind() {
            SortKind::Text => collate(text_value(a, spec.key), text_value(b, spec.key)),
            SortKind::Numeric => numeric_value(a, spec.key).total_cmp(&numeric_value(b, spec.key)),
        };
        match spec.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

fn text_value(record: &PackageRecord, key: SortKey) -> &str {
    match key {
        SortKey::Name => record.name(),
        SortKey::LatestRelease => record.latest_release().unwrap_or(""),
        _ => "",
    }
}

fn numeric_value(record: &PackageRecord, key: SortKey) -> f64 {
    match key {
        SortKey::DownloadsTotal => record.downloads_total() as f64,
        SortKey::DownloadsMonthly => record.downloads_monthly() as f64,
        SortKey::Favers => record.favers() as f64,
        SortKey::GithubStars => record.github_stars() as f64,
        SortKey::OpenIssues => record.github_open_issues() as f64,
        SortKey::Cves => record.cves_count() as f64,
        SortKey::Score => record.score(),
        SortKey::Name | SortKey::LatestRelease => 0.0,
    }
}

/// Locale-style ordering: letters compare without regard to case first,
/// the raw text breaks ties so the order stays total.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
