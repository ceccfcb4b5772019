use crate::catalog::domain::SortKey;
use crate::catalog::policies::{ScoreCategory, Staleness};
use std::fmt;

/// What the table body shows instead of, or as, rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// No load requested yet
    Idle,
    Loading,
    Failed { message: String },
    /// Loaded, but nothing passes the filter
    Empty,
    Populated,
}

impl DisplayState {
    /// Status line shown in place of rows; `None` when rows are shown
    pub fn status_message(&self) -> Option<String> {
        match self {
            DisplayState::Idle => Some("no data loaded".to_string()),
            DisplayState::Loading => Some("loading…".to_string()),
            DisplayState::Failed { message } => {
                Some(format!("failed to load data — {}", message))
            }
            DisplayState::Empty => Some("no packages match your filter".to_string()),
            DisplayState::Populated => None,
        }
    }

    /// CSS class of the status row
    pub fn css_class(&self) -> &'static str {
        match self {
            DisplayState::Failed { .. } => "error-cell",
            _ => "status-cell",
        }
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayState::Idle => f.write_str("idle"),
            DisplayState::Loading => f.write_str("loading"),
            DisplayState::Failed { .. } => f.write_str("failed"),
            DisplayState::Empty => f.write_str("empty"),
            DisplayState::Populated => f.write_str("populated"),
        }
    }
}

/// Aggregate counters over the full set, already formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub ecosystem: Option<String>,
    pub total: String,
    pub total_downloads: String,
    pub total_favers: String,
}

/// One column header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub id: &'static str,
    pub label: &'static str,
    /// `None` for columns that cannot be sorted
    pub sort_key: Option<SortKey>,
    pub sorted: bool,
    /// `↑`/`↓` on the active column, `↕` on other sortable ones, empty otherwise
    pub indicator: &'static str,
}

impl HeaderView {
    pub fn sortable(&self) -> bool {
        self.sort_key.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub label: String,
    pub url: String,
}

/// One entry of the sort selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetOption {
    pub token: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// One package row
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub vendor: Option<String>,
    pub package: String,
    /// Full `vendor/package` name
    pub name: String,
    pub package_url: Option<String>,
    pub description: Option<String>,
    pub abandoned: bool,
    pub suggestion: Option<LinkView>,
    pub downloads: String,
    pub favers: String,
    pub open_issues: String,
    pub cves: String,
    /// `error-cell` when the package has known CVEs
    pub cves_class: Option<&'static str>,
    pub release_label: String,
    pub staleness: Staleness,
    pub score_label: String,
    pub score: ScoreCategory,
    pub actions: Vec<LinkView>,
}

impl RowView {
    pub fn release_class(&self) -> &'static str {
        self.staleness.css_class()
    }

    pub fn score_class(&self) -> &'static str {
        self.score.css_class()
    }
}

/// TableView - Display-ready table
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub state: DisplayState,
    pub summary: SummaryView,
    /// `"{shown} / {total} packages"`
    pub count_label: String,
    pub query: String,
    pub headers: Vec<HeaderView>,
    pub presets: Vec<PresetOption>,
    pub rows: Vec<RowView>,
}

impl TableView {
    /// Token of the preset matching the active sort, if any
    pub fn selected_preset(&self) -> Option<&'static str> {
        self.presets.iter().find(|p| p.selected).map(|p| p.token)
    }
}
