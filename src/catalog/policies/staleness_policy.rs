use crate::shared::error::CatalogError;
use crate::shared::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Placeholder shown when a package has no release date
pub const NO_RELEASE_LABEL: &str = "—";

/// Display bucket for how long ago a package was last released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    /// No usable release date
    Unknown,
    Recent,
    Aging,
    Stale,
}

impl Staleness {
    pub fn css_class(self) -> &'static str {
        match self {
            Staleness::Unknown => "date-cell",
            Staleness::Recent => "success-cell",
            Staleness::Aging => "warning-cell",
            Staleness::Stale => "error-cell",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Staleness::Unknown => "unknown",
            Staleness::Recent => "recent",
            Staleness::Aging => "aging",
            Staleness::Stale => "stale",
        }
    }
}

/// Release date as displayed in one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAssessment {
    pub staleness: Staleness,
    /// `YYYY-MM-DD`, the raw text if it could not be parsed, or the placeholder
    pub label: String,
    pub age_days: Option<i64>,
}

/// Day thresholds splitting release ages into buckets.
///
/// An age below `aging_after_days` is recent, below `stale_after_days`
/// aging, anything older stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessPolicy {
    aging_after_days: i64,
    stale_after_days: i64,
}

impl StalenessPolicy {
    pub const DEFAULT_AGING_AFTER_DAYS: i64 = 180;
    pub const DEFAULT_STALE_AFTER_DAYS: i64 = 730;

    pub fn new(aging_after_days: i64, stale_after_days: i64) -> Result<Self> {
        if aging_after_days < 0 || aging_after_days >= stale_after_days {
            return Err(CatalogError::InvalidConfig {
                message: format!(
                    "staleness thresholds must satisfy 0 <= aging_after_days < stale_after_days (got {} and {})",
                    aging_after_days, stale_after_days
                ),
            }
            .into());
        }
        Ok(Self {
            aging_after_days,
            stale_after_days,
        })
    }

    pub fn aging_after_days(&self) -> i64 {
        self.aging_after_days
    }

    pub fn stale_after_days(&self) -> i64 {
        self.stale_after_days
    }

    pub fn classify_age(&self, age_days: i64) -> Staleness {
        if age_days < self.aging_after_days {
            Staleness::Recent
        } else if age_days < self.stale_after_days {
            Staleness::Aging
        } else {
            Staleness::Stale
        }
    }

    pub fn assess(&self, latest_release: Option<&str>, now: DateTime<Utc>) -> ReleaseAssessment {
        let Some(raw) = latest_release else {
            return ReleaseAssessment {
                staleness: Staleness::Unknown,
                label: NO_RELEASE_LABEL.to_string(),
                age_days: None,
            };
        };

        match parse_release_date(raw) {
            Some(released) => {
                let age_days = (now - released).num_days();
                ReleaseAssessment {
                    staleness: self.classify_age(age_days),
                    label: released.format("%Y-%m-%d").to_string(),
                    age_days: Some(age_days),
                }
            }
            None => ReleaseAssessment {
                staleness: Staleness::Unknown,
                label: raw.to_string(),
                age_days: None,
            },
        }
    }
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self {
            aging_after_days: Self::DEFAULT_AGING_AFTER_DAYS,
            stale_after_days: Self::DEFAULT_STALE_AFTER_DAYS,
        }
    }
}

/// Parses the ISO-8601 shapes found in registry data.
///
/// Timestamps without an offset are taken as UTC.
pub fn parse_release_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn days_ago(days: i64) -> String {
        (now() - Duration::days(days)).to_rfc3339()
    }

    #[test]
    fn test_absent_release_is_unknown_placeholder() {
        let assessment = StalenessPolicy::default().assess(None, now());
        assert_eq!(assessment.staleness, Staleness::Unknown);
        assert_eq!(assessment.label, "—");
        assert_eq!(assessment.age_days, None);
        assert_eq!(assessment.staleness.css_class(), "date-cell");
    }

    #[test]
    fn test_bucket_boundaries() {
        let policy = StalenessPolicy::default();
        assert_eq!(policy.classify_age(0), Staleness::Recent);
        assert_eq!(policy.classify_age(179), Staleness::Recent);
        assert_eq!(policy.classify_age(180), Staleness::Aging);
        assert_eq!(policy.classify_age(729), Staleness::Aging);
        assert_eq!(policy.classify_age(730), Staleness::Stale);
        assert_eq!(policy.classify_age(-5), Staleness::Recent);
    }

    #[test]
    fn test_assess_stale_release() {
        let release = days_ago(900);
        let assessment = StalenessPolicy::default().assess(Some(&release), now());
        assert_eq!(assessment.staleness, Staleness::Stale);
        assert_eq!(assessment.age_days, Some(900));
        assert_eq!(assessment.label, "2024-04-29");
        assert_eq!(assessment.staleness.css_class(), "error-cell");
    }

    #[test]
    fn test_assess_aging_release() {
        let release = days_ago(400);
        let assessment = StalenessPolicy::default().assess(Some(&release), now());
        assert_eq!(assessment.staleness, Staleness::Aging);
        assert_eq!(assessment.staleness.css_class(), "warning-cell");
    }

    #[test]
    fn test_unparseable_release_keeps_raw_text() {
        let assessment = StalenessPolicy::default().assess(Some("someday"), now());
        assert_eq!(assessment.staleness, Staleness::Unknown);
        assert_eq!(assessment.label, "someday");
    }

    #[test]
    fn test_parse_release_date_shapes() {
        assert!(parse_release_date("2023-02-06T13:44:46+00:00").is_some());
        assert!(parse_release_date("2023-02-06T13:44:46Z").is_some());
        assert!(parse_release_date("2023-02-06T13:44:46.123+0200").is_some());
        assert!(parse_release_date("2023-02-06T13:44:46").is_some());
        assert_eq!(
            parse_release_date("2023-02-06"),
            Some(Utc.with_ymd_and_hms(2023, 2, 6, 0, 0, 0).unwrap())
        );
        assert!(parse_release_date("06/02/2023").is_none());
    }

    #[test]
    fn test_custom_thresholds() {
        let policy = StalenessPolicy::new(30, 365).unwrap();
        assert_eq!(policy.classify_age(31), Staleness::Aging);
        assert_eq!(policy.classify_age(365), Staleness::Stale);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        assert!(StalenessPolicy::new(730, 180).is_err());
        assert!(StalenessPolicy::new(180, 180).is_err());
        assert!(StalenessPolicy::new(-1, 10).is_err());
    }
}
