use crate::catalog::domain::PackageRecord;
use crate::catalog::policies::parse_release_date;
use chrono::{DateTime, Utc};

/// Risk score for data sets published without one.
///
/// Higher means riskier. The raw score multiplies five factors:
/// - release age, growing exponentially per year since the last release
/// - known CVEs
/// - maintainer count, a single maintainer being the worst case
/// - downloads, since a widely used package has a bigger impact
/// - open issues
///
/// Raw scores are then min-max normalized over the set to `1..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskScorePolicy;

impl RiskScorePolicy {
    pub const MIN_SCORE: f64 = 1.0;
    pub const MAX_SCORE: f64 = 100.0;

    /// Release date present but unreadable
    const UNKNOWN_RELEASE_RISK: f64 = 2.0;
    const FEW_ISSUES: u64 = 5;
    const MANY_ISSUES: u64 = 20;

    /// Unnormalized risk of one record as of `now`
    pub fn raw_score(&self, record: &PackageRecord, now: DateTime<Utc>) -> f64 {
        let open_issues = record.github_open_issues();

        let mut recency = 1.0;
        if let Some(raw) = record.latest_release() {
            recency += match parse_release_date(raw) {
                Some(released) => ((now - released).num_days() as f64 / 365.0).exp(),
                None => Self::UNKNOWN_RELEASE_RISK,
            };
        }
        if open_issues <= Self::FEW_ISSUES {
            recency *= 0.5;
        } else if open_issues > Self::MANY_ISSUES {
            recency *= 1.2;
        }

        let cves = 1.0 + 2.0 * record.cves_count() as f64;
        let maintainers = match record.maintainers_count() {
            0 | 1 => 3.0,
            n => 1.0 + 1.0 / ((n + 1) as f64).ln(),
        };
        let downloads = (record
            .downloads_monthly()
            .saturating_add(record.downloads_total()) as f64)
            .ln_1p();
        let issues = 1.0 + 0.5 * open_issues as f64;

        recency * cves * maintainers * downloads * issues
    }

    /// Maps a raw score into `1..=100` given the set's range
    ///
    /// A set whose scores are all equal, or not finite, maps to the minimum.
    pub fn normalize(&self, raw: f64, min: f64, max: f64) -> f64 {
        let range = max - min;
        if !range.is_finite() || range <= 0.0 || !raw.is_finite() {
            return Self::MIN_SCORE;
        }
        ((raw - min) / range * Self::MAX_SCORE)
            .round()
            .clamp(Self::MIN_SCORE, Self::MAX_SCORE)
    }

    /// Scores a set in which no record carries a published score
    ///
    /// Each record gets its `raw_score` and the normalized `score`. A set
    /// with at least one published score is returned untouched, so scores
    /// from different scales are never mixed.
    pub fn score_unscored(
        &self,
        records: Vec<PackageRecord>,
        now: DateTime<Utc>,
    ) -> Vec<PackageRecord> {
        if records.is_empty() || records.iter().any(PackageRecord::has_score) {
            return records;
        }

        let raw: Vec<f64> = records.iter().map(|r| self.raw_score(r, now)).collect();
        let (min, max) = raw
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &score| {
                (lo.min(score), hi.max(score))
            });
        tracing::debug!(count = records.len(), min, max, "computing risk scores");

        records
            .into_iter()
            .zip(raw)
            .map(|(record, raw)| {
                let score = self.normalize(raw, min, max);
                record.with_raw_score(raw).with_score(score)
            })
            .collect()
    }
}
