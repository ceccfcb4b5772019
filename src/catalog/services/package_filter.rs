use crate::catalog::domain::PackageRecord;

/// PackageFilter - Keeps records whose name contains the search query
///
/// Matching is a case-insensitive substring test against `name` only.
/// The query is trimmed; an empty query keeps every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFilter {
    needle: Option<String>,
}

impl PackageFilter {
    /// Creates a filter for a raw search query
    pub fn new(query: &str) -> Self {
        let trimmed = query.trim();
        let needle = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        };
        Self { needle }
    }

    /// True when the filter keeps every record
    pub fn is_identity(&self) -> bool {
        self.needle.is_none()
    }

    /// Checks a single record against the query
    pub fn matches(&self, record: &PackageRecord) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => record.name().to_lowercase().contains(needle.as_str()),
        }
    }

    /// Returns the matching records as a new sequence, in input order
    ///
    /// # Arguments
    /// * `records` - The full record set; it is not modified
    pub fn apply<'a>(&self, records: &'a [PackageRecord]) -> Vec<&'a PackageRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}
