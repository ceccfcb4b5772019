use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A package record as published in an ecosystem data file.
///
/// Every field is optional in the payload. Numeric fields tolerate `null`,
/// floats, negative numbers and numeric strings; anything unusable reads as
/// zero through the accessors. Empty strings read as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    package_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    repository: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    abandoned: Option<bool>,
    #[serde(default, deserialize_with = "lenient::count")]
    maintainers_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    downloads_total: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    downloads_monthly: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    downloads_daily: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    favers: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    github_stars: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    github_forks: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    github_open_issues: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    dependents: Option<u64>,
    #[serde(default, deserialize_with = "lenient::text")]
    latest_release: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    cves_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::text")]
    suggested_package: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    suggested_package_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    raw_score: Option<f64>,
}

impl PackageRecord {
    /// Creates a record with only a name set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: non_empty(name.into()),
            ..Self::default()
        }
    }

    pub fn with_package_url(mut self, url: impl Into<String>) -> Self {
        self.package_url = non_empty(url.into());
        self
    }

    pub fn with_repository(mut self, url: impl Into<String>) -> Self {
        self.repository = non_empty(url.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_empty(description.into());
        self
    }

    pub fn with_downloads_total(mut self, downloads: u64) -> Self {
        self.downloads_total = Some(downloads);
        self
    }

    pub fn with_downloads_monthly(mut self, downloads: u64) -> Self {
        self.downloads_monthly = Some(downloads);
        self
    }

    pub fn with_favers(mut self, favers: u64) -> Self {
        self.favers = Some(favers);
        self
    }

    pub fn with_github_stars(mut self, stars: u64) -> Self {
        self.github_stars = Some(stars);
        self
    }

    pub fn with_open_issues(mut self, issues: u64) -> Self {
        self.github_open_issues = Some(issues);
        self
    }

    pub fn with_cves_count(mut self, cves: u64) -> Self {
        self.cves_count = Some(cves);
        self
    }

    pub fn with_latest_release(mut self, release: impl Into<String>) -> Self {
        self.latest_release = non_empty(release.into());
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score).filter(|s| s.is_finite());
        self
    }

    pub fn with_raw_score(mut self, raw_score: f64) -> Self {
        self.raw_score = Some(raw_score).filter(|s| s.is_finite());
        self
    }

    pub fn with_maintainers_count(mut self, maintainers: u64) -> Self {
        self.maintainers_count = Some(maintainers);
        self
    }

    pub fn with_suggestion(mut self, package: impl Into<String>, url: impl Into<String>) -> Self {
        self.suggested_package = non_empty(package.into());
        self.suggested_package_url = non_empty(url.into());
        self
    }

    /// Package name, empty when the payload had none
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn has_name(&self) -> bool {
        self.name.is_some()
    }

    pub fn package_url(&self) -> Option<&str> {
        self.package_url.as_deref()
    }

    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_abandoned(&self) -> bool {
        self.abandoned.unwrap_or(false)
    }

    pub fn maintainers_count(&self) -> u64 {
        self.maintainers_count.unwrap_or(0)
    }

    pub fn downloads_total(&self) -> u64 {
        self.downloads_total.unwrap_or(0)
    }

    pub fn downloads_monthly(&self) -> u64 {
        self.downloads_monthly.unwrap_or(0)
    }

    pub fn downloads_daily(&self) -> u64 {
        self.downloads_daily.unwrap_or(0)
    }

    pub fn favers(&self) -> u64 {
        self.favers.unwrap_or(0)
    }

    pub fn github_stars(&self) -> u64 {
        self.github_stars.unwrap_or(0)
    }

    pub fn github_forks(&self) -> u64 {
        self.github_forks.unwrap_or(0)
    }

    pub fn github_open_issues(&self) -> u64 {
        self.github_open_issues.unwrap_or(0)
    }

    pub fn dependents(&self) -> u64 {
        self.dependents.unwrap_or(0)
    }

    pub fn cves_count(&self) -> u64 {
        self.cves_count.unwrap_or(0)
    }

    /// Raw `latest_release` text, `None` when absent or empty
    pub fn latest_release(&self) -> Option<&str> {
        self.latest_release.as_deref()
    }

    /// Normalized score, 0 when absent
    pub fn score(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }

    /// Whether the payload carried a usable score
    pub fn has_score(&self) -> bool {
        self.score.is_some()
    }

    pub fn raw_score(&self) -> Option<f64> {
        self.raw_score
    }

    pub fn suggested_package(&self) -> Option<&str> {
        self.suggested_package.as_deref()
    }

    pub fn suggested_package_url(&self) -> Option<&str> {
        self.suggested_package_url.as_deref()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Defensive field decoders: they never fail, they degrade to `None`.
mod lenient {
    use super::*;

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(match value {
            Value::String(s) => non_empty(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(number_of(&value).map(|n| if n <= 0.0 { 0 } else { n as u64 }))
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(number_of(&value))
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(match value {
            Value::Bool(b) => Some(b),
            // Packagist marks abandoned packages with the replacement name
            Value::String(s) => Some(!s.is_empty()),
            _ => None,
        })
    }

    fn number_of(value: &Value) -> Option<f64> {
        let n = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        n.is_finite().then_some(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> PackageRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_record_deserializes() {
        let record = decode(json!({
            "name": "monolog/monolog",
            "package_url": "https://packagist.org/packages/monolog/monolog",
            "repository": "https://github.com/Seldaek/monolog",
            "downloads_total": 900_000_000u64,
            "favers": 21000,
            "github_open_issues": 40,
            "cves_count": 1,
            "latest_release": "2023-02-06T13:44:46+00:00",
            "score": 87.5,
            "suggested_package": "psr/log",
            "suggested_package_url": "https://packagist.org/packages/psr/log"
        }));

        assert_eq!(record.name(), "monolog/monolog");
        assert_eq!(record.downloads_total(), 900_000_000);
        assert_eq!(record.favers(), 21000);
        assert_eq!(record.github_open_issues(), 40);
        assert_eq!(record.cves_count(), 1);
        assert_eq!(record.latest_release(), Some("2023-02-06T13:44:46+00:00"));
        assert_eq!(record.score(), 87.5);
        assert_eq!(record.suggested_package(), Some("psr/log"));
    }

    #[test]
    fn test_empty_object_defaults_to_zero() {
        let record = decode(json!({}));
        assert_eq!(record.name(), "");
        assert!(!record.has_name());
        assert_eq!(record.downloads_total(), 0);
        assert_eq!(record.favers(), 0);
        assert_eq!(record.score(), 0.0);
        assert!(record.latest_release().is_none());
        assert!(record.package_url().is_none());
    }

    #[test]
    fn test_null_and_malformed_numbers_coerce_to_zero() {
        let record = decode(json!({
            "downloads_total": null,
            "favers": "not a number",
            "github_open_issues": [1, 2],
            "cves_count": -3,
            "score": {"value": 10}
        }));
        assert_eq!(record.downloads_total(), 0);
        assert_eq!(record.favers(), 0);
        assert_eq!(record.github_open_issues(), 0);
        assert_eq!(record.cves_count(), 0);
        assert_eq!(record.score(), 0.0);
    }

    #[test]
    fn test_numeric_strings_and_floats_are_accepted() {
        let record = decode(json!({
            "downloads_total": "1200",
            "favers": 12.9,
            "score": "42.5"
        }));
        assert_eq!(record.downloads_total(), 1200);
        assert_eq!(record.favers(), 12);
        assert_eq!(record.score(), 42.5);
    }

    #[test]
    fn test_empty_strings_read_as_absent() {
        let record = decode(json!({
            "latest_release": "",
            "suggested_package": "",
            "repository": ""
        }));
        assert!(record.latest_release().is_none());
        assert!(record.suggested_package().is_none());
        assert!(record.repository().is_none());
    }

    #[test]
    fn test_abandoned_accepts_replacement_name() {
        let record = decode(json!({ "abandoned": "vendor/replacement" }));
        assert!(record.is_abandoned());
        let record = decode(json!({ "abandoned": false }));
        assert!(!record.is_abandoned());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let record = decode(json!({ "name": "a/b", "author_email": "x@example.com" }));
        assert_eq!(record.name(), "a/b");
    }

    #[test]
    fn test_builder_methods() {
        let record = PackageRecord::new("a/b")
            .with_downloads_total(5)
            .with_score(f64::NAN)
            .with_latest_release("");
        assert_eq!(record.downloads_total(), 5);
        assert_eq!(record.score(), 0.0);
        assert!(record.latest_release().is_none());
    }
}
