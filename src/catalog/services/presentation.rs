//! Per-record display values.
//!
//! Everything here is a pure function of a record, the display policies and
//! the instant the table is rendered at.

use crate::catalog::domain::PackageRecord;
use crate::catalog::policies::{ReleaseAssessment, ScoreCategory, ScorePolicy, StalenessPolicy};
use crate::catalog::services::number_format::{format_score, group_thousands};
use chrono::{DateTime, Utc};

/// Thresholds used when presenting records
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PresentationPolicy {
    pub staleness: StalenessPolicy,
    pub score: ScorePolicy,
}

/// A `vendor/package` name split for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSegments {
    pub vendor: Option<String>,
    pub package: String,
}

impl NameSegments {
    /// Splits on the first `/`; a name without one (or with nothing after it)
    /// stays a single segment.
    pub fn split(name: &str) -> Self {
        match name.split_once('/') {
            Some((vendor, package)) if !package.is_empty() => Self {
                vendor: Some(vendor.to_string()),
                package: package.to_string(),
            },
            _ => Self {
                vendor: None,
                package: name.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowActionKind {
    Contribute,
    CheckIssues,
    Fork,
}

impl RowActionKind {
    pub fn label(self) -> &'static str {
        match self {
            RowActionKind::Contribute => "Contribute",
            RowActionKind::CheckIssues => "Check issues",
            RowActionKind::Fork => "Fork",
        }
    }
}

/// Outbound link offered next to a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    pub kind: RowActionKind,
    pub url: String,
}

/// True for absolute `http` and `https` URLs, the only ones rendered as links
pub fn is_web_url(url: &str) -> bool {
    let Some((scheme, rest)) = url.trim().split_once("://") else {
        return false;
    };
    !rest.is_empty()
        && (scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https"))
}

/// Builds the repository actions; no usable repository, no actions
pub fn row_actions(repository: Option<&str>) -> Vec<RowAction> {
    let Some(repository) = repository.map(|r| r.trim_end_matches('/')) else {
        return Vec::new();
    };
    if !is_web_url(repository) {
        return Vec::new();
    }
    vec![
        RowAction {
            kind: RowActionKind::Contribute,
            url: repository.to_string(),
        },
        RowAction {
            kind: RowActionKind::CheckIssues,
            url: format!("{}/issues", repository),
        },
        RowAction {
            kind: RowActionKind::Fork,
            url: format!("{}/fork", repository),
        },
    ]
}

/// Package URL from the record, or built from the ecosystem's template
///
/// The template's `{name}` placeholder receives the URL-encoded name, one
/// path segment per `/`-separated part. A record URL that is not `http(s)`
/// counts as absent.
pub fn resolve_package_url(record: &PackageRecord, template: Option<&str>) -> Option<String> {
    if let Some(url) = record.package_url().filter(|url| is_web_url(url)) {
        return Some(url.to_string());
    }
    let template = template.filter(|t| is_web_url(t))?;
    if !record.has_name() {
        return None;
    }
    let encoded = record
        .name()
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    Some(template.replace("{name}", &encoded))
}

/// Recommended replacement for a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub package: String,
    pub url: Option<String>,
}

/// Display values derived from one record
#[derive(Debug, Clone, PartialEq)]
pub struct PackagePresentation {
    pub name: NameSegments,
    pub package_url: Option<String>,
    pub suggestion: Option<Suggestion>,
    pub description: Option<String>,
    pub abandoned: bool,
    pub downloads: String,
    pub favers: String,
    pub open_issues: String,
    pub cves: String,
    pub has_cves: bool,
    pub release: ReleaseAssessment,
    pub score_label: String,
    pub score: ScoreCategory,
    pub actions: Vec<RowAction>,
}

/// PackagePresenter - Derives display values at a fixed instant
pub struct PackagePresenter<'a> {
    policy: &'a PresentationPolicy,
    package_url_template: Option<&'a str>,
    now: DateTime<Utc>,
}

impl<'a> PackagePresenter<'a> {
    pub fn new(policy: &'a PresentationPolicy, now: DateTime<Utc>) -> Self {
        Self {
            policy,
            package_url_template: None,
            now,
        }
    }

    pub fn with_package_url_template(mut self, template: Option<&'a str>) -> Self {
        self.package_url_template = template;
        self
    }

    pub fn present(&self, record: &PackageRecord) -> PackagePresentation {
        let suggestion = record.suggested_package().map(|package| Suggestion {
            package: package.to_string(),
            url: record
                .suggested_package_url()
                .filter(|url| is_web_url(url))
                .map(String::from),
        });

        PackagePresentation {
            name: NameSegments::split(record.name()),
            package_url: resolve_package_url(record, self.package_url_template),
            suggestion,
            description: record.description().map(String::from),
            abandoned: record.is_abandoned(),
            downloads: group_thousands(record.downloads_total()),
            favers: group_thousands(record.favers()),
            open_issues: group_thousands(record.github_open_issues()),
            cves: group_thousands(record.cves_count()),
            has_cves: record.cves_count() > 0,
            release: self.policy.staleness.assess(record.latest_release(), self.now),
            score_label: format_score(record.score()),
            score: self.policy.score.classify(record.score()),
            actions: row_actions(record.repository()),
        }
    }
}
