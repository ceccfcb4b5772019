use crate::shared::error::CatalogError;
use std::fmt;
use std::str::FromStr;

/// How values of a sort key are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    /// Collated text comparison; a missing value is the empty string
    Text,
    /// Numeric comparison; a missing value is zero
    Numeric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    /// Arrow shown next to the active column header
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(format!(
                "Invalid sort order: {}. Please specify 'asc' or 'desc'",
                s
            )),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Columns a table can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Name,
    LatestRelease,
    DownloadsTotal,
    DownloadsMonthly,
    Favers,
    GithubStars,
    OpenIssues,
    Cves,
    Score,
}

struct SortKeyInfo {
    key: SortKey,
    column_id: &'static str,
    label: &'static str,
    kind: SortKind,
}

/// Lookup table; indexed by `SortKey as usize`
static SORT_KEYS: [SortKeyInfo; 9] = [
    SortKeyInfo {
        key: SortKey::Name,
        column_id: "name",
        label: "Package",
        kind: SortKind::Text,
    },
    SortKeyInfo {
        key: SortKey::LatestRelease,
        column_id: "latest_release",
        label: "Latest release",
        kind: SortKind::Text,
    },
    SortKeyInfo {
        key: SortKey::DownloadsTotal,
        column_id: "downloads_total",
        label: "Downloads",
        kind: SortKind::Numeric,
    },
    SortKeyInfo {
        key: SortKey::DownloadsMonthly,
        column_id: "downloads_monthly",
        label: "Monthly downloads",
        kind: SortKind::Numeric,
    },
    SortKeyInfo {
        key: SortKey::Favers,
        column_id: "favers",
        label: "Favers",
        kind: SortKind::Numeric,
    },
    SortKeyInfo {
        key: SortKey::GithubStars,
        column_id: "github_stars",
        label: "Stars",
        kind: SortKind::Numeric,
    },
    SortKeyInfo {
        key: SortKey::OpenIssues,
        column_id: "github_open_issues",
        label: "Open issues",
        kind: SortKind::Numeric,
    },
    SortKeyInfo {
        key: SortKey::Cves,
        column_id: "cves_count",
        label: "CVEs",
        kind: SortKind::Numeric,
    },
    SortKeyInfo {
        key: SortKey::Score,
        column_id: "score",
        label: "Score",
        kind: SortKind::Numeric,
    },
];

impl SortKey {
    pub const ALL: [SortKey; 9] = [
        SortKey::Name,
        SortKey::LatestRelease,
        SortKey::DownloadsTotal,
        SortKey::DownloadsMonthly,
        SortKey::Favers,
        SortKey::GithubStars,
        SortKey::OpenIssues,
        SortKey::Cves,
        SortKey::Score,
    ];

    fn info(self) -> &'static SortKeyInfo {
        &SORT_KEYS[self as usize]
    }

    /// Identifier used by data files, headers and the CLI
    pub fn column_id(self) -> &'static str {
        self.info().column_id
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn kind(self) -> SortKind {
        self.info().kind
    }

    /// A-to-Z for text columns, highest-first for metrics
    pub fn default_direction(self) -> SortDirection {
        match self.kind() {
            SortKind::Text => SortDirection::Ascending,
            SortKind::Numeric => SortDirection::Descending,
        }
    }

    pub fn from_column_id(column_id: &str) -> Option<SortKey> {
        SORT_KEYS
            .iter()
            .find(|info| info.column_id == column_id)
            .map(|info| info.key)
    }

    fn available() -> String {
        SORT_KEYS
            .iter()
            .map(|info| info.column_id)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::from_column_id(s.trim().to_lowercase().as_str()).ok_or_else(|| {
            CatalogError::UnknownSortKey {
                column: s.to_string(),
                available: SortKey::available(),
            }
        })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_id())
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Sorts by `key` in its default direction
    pub fn by(key: SortKey) -> Self {
        Self::new(key, key.default_direction())
    }

    /// Header-click policy: the active column flips direction, any other
    /// column becomes active with its default direction.
    pub fn toggle_or_select(self, key: SortKey) -> Self {
        if self.key == key {
            Self::new(key, self.direction.reversed())
        } else {
            Self::by(key)
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(SortKey::Score, SortDirection::Descending)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.key, self.direction)
    }
}

/// A named key+direction combination offered by the sort selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortPreset {
    pub token: &'static str,
    pub label: &'static str,
    pub spec: SortSpec,
}

const fn preset(
    token: &'static str,
    label: &'static str,
    key: SortKey,
    direction: SortDirection,
) -> SortPreset {
    SortPreset {
        token,
        label,
        spec: SortSpec::new(key, direction),
    }
}

pub const SORT_PRESETS: &[SortPreset] = &[
    preset("score_desc", "Highest risk first", SortKey::Score, SortDirection::Descending),
    preset("score_asc", "Lowest risk first", SortKey::Score, SortDirection::Ascending),
    preset(
        "downloads_total_desc",
        "Most downloaded",
        SortKey::DownloadsTotal,
        SortDirection::Descending,
    ),
    preset(
        "downloads_total_asc",
        "Least downloaded",
        SortKey::DownloadsTotal,
        SortDirection::Ascending,
    ),
    preset(
        "downloads_monthly_desc",
        "Most downloaded this month",
        SortKey::DownloadsMonthly,
        SortDirection::Descending,
    ),
    preset("favers_desc", "Most favorited", SortKey::Favers, SortDirection::Descending),
    preset(
        "github_stars_desc",
        "Most starred",
        SortKey::GithubStars,
        SortDirection::Descending,
    ),
    preset(
        "latest_release_asc",
        "Oldest release first",
        SortKey::LatestRelease,
        SortDirection::Ascending,
    ),
    preset(
        "latest_release_desc",
        "Newest release first",
        SortKey::LatestRelease,
        SortDirection::Descending,
    ),
    preset(
        "github_open_issues_desc",
        "Most open issues",
        SortKey::OpenIssues,
        SortDirection::Descending,
    ),
    preset("cves_count_desc", "Most CVEs", SortKey::Cves, SortDirection::Descending),
    preset("name_asc", "Name A-Z", SortKey::Name, SortDirection::Ascending),
    preset("name_desc", "Name Z-A", SortKey::Name, SortDirection::Descending),
];

impl SortPreset {
    pub fn all() -> &'static [SortPreset] {
        SORT_PRESETS
    }

    pub fn find(token: &str) -> Option<&'static SortPreset> {
        let token = token.trim().to_lowercase();
        SORT_PRESETS.iter().find(|p| p.token == token)
    }

    /// Resolves a token or reports the available ones
    pub fn parse(token: &str) -> Result<&'static SortPreset, CatalogError> {
        Self::find(token).ok_or_else(|| CatalogError::UnknownPreset {
            token: token.to_string(),
            available: SORT_PRESETS
                .iter()
                .map(|p| p.token)
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// The preset equal to `spec`, if the selector offers one
    pub fn matching(spec: SortSpec) -> Option<&'static SortPreset> {
        SORT_PRESETS.iter().find(|p| p.spec == spec)
    }
}
