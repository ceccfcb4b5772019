//! Builder for constructing TableView from the view state
//!
//! Runs the filter and sort stages, formats every visible record and picks
//! the display state.

use super::table_view::{
    DisplayState, HeaderView, LinkView, PresetOption, RowView, SummaryView, TableView,
};
use crate::application::state::{LoadStatus, ViewState};
use crate::catalog::domain::{SortKey, SortSpec, SORT_PRESETS};
use crate::catalog::services::{
    compact_number, group_thousands, PackagePresentation, PackagePresenter, PresentationPolicy,
};
use chrono::{DateTime, Utc};

/// A table column and the sort key behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub id: &'static str,
    pub label: &'static str,
    pub sort_key: Option<SortKey>,
}

const fn sortable(id: &'static str, key: SortKey, label: &'static str) -> Column {
    Column {
        id,
        label,
        sort_key: Some(key),
    }
}

/// Columns in display order
pub const COLUMNS: &[Column] = &[
    sortable("name", SortKey::Name, "Package"),
    sortable("downloads_total", SortKey::DownloadsTotal, "Downloads"),
    sortable("favers", SortKey::Favers, "Favers"),
    sortable("latest_release", SortKey::LatestRelease, "Latest release"),
    sortable("github_open_issues", SortKey::OpenIssues, "Open issues"),
    sortable("cves_count", SortKey::Cves, "CVEs"),
    sortable("score", SortKey::Score, "Score"),
    Column {
        id: "actions",
        label: "Actions",
        sort_key: None,
    },
];

/// TableViewBuilder - Turns a view state into a TableView
pub struct TableViewBuilder<'a> {
    policy: &'a PresentationPolicy,
    package_url_template: Option<&'a str>,
}

impl<'a> TableViewBuilder<'a> {
    pub fn new(policy: &'a PresentationPolicy) -> Self {
        Self {
            policy,
            package_url_template: None,
        }
    }

    /// Template used for records without a `package_url`
    pub fn with_package_url_template(mut self, template: Option<&'a str>) -> Self {
        self.package_url_template = template;
        self
    }

    /// Builds the view
    ///
    /// # Arguments
    /// * `state` - Current view state
    /// * `now` - Instant used for every release age in this table
    pub fn build(&self, state: &ViewState, now: DateTime<Utc>) -> TableView {
        let rows = match state.load_status() {
            LoadStatus::Loaded => self.build_rows(state, now),
            _ => Vec::new(),
        };

        let display_state = match state.load_status() {
            LoadStatus::Idle => DisplayState::Idle,
            LoadStatus::Loading => DisplayState::Loading,
            LoadStatus::Failed { message } => DisplayState::Failed {
                message: message.clone(),
            },
            LoadStatus::Loaded if rows.is_empty() => DisplayState::Empty,
            LoadStatus::Loaded => DisplayState::Populated,
        };

        TableView {
            state: display_state,
            summary: Self::build_summary(state),
            count_label: format!(
                "{} / {} packages",
                group_thousands(rows.len() as u64),
                group_thousands(state.full_set().len() as u64)
            ),
            query: state.query().to_string(),
            headers: Self::build_headers(state.sort()),
            presets: Self::build_presets(state.sort()),
            rows,
        }
    }

    fn build_rows(&self, state: &ViewState, now: DateTime<Utc>) -> Vec<RowView> {
        let presenter = PackagePresenter::new(self.policy, now)
            .with_package_url_template(self.package_url_template);
        state
            .visible()
            .into_iter()
            .map(|record| Self::build_row(record.name(), presenter.present(record)))
            .collect()
    }

    fn build_row(name: &str, presented: PackagePresentation) -> RowView {
        RowView {
            vendor: presented.name.vendor,
            package: presented.name.package,
            name: name.to_string(),
            package_url: presented.package_url,
            description: presented.description,
            abandoned: presented.abandoned,
            suggestion: presented.suggestion.and_then(|s| {
                s.url.map(|url| LinkView {
                    label: s.package,
                    url,
                })
            }),
            downloads: presented.downloads,
            favers: presented.favers,
            open_issues: presented.open_issues,
            cves: presented.cves,
            cves_class: presented.has_cves.then_some("error-cell"),
            release_label: presented.release.label,
            staleness: presented.release.staleness,
            score_label: presented.score_label,
            score: presented.score,
            actions: presented
                .actions
                .into_iter()
                .map(|action| LinkView {
                    label: action.kind.label().to_string(),
                    url: action.url,
                })
                .collect(),
        }
    }

    fn build_summary(state: &ViewState) -> SummaryView {
        let stats = state.stats();
        SummaryView {
            ecosystem: state.ecosystem().map(String::from),
            total: group_thousands(stats.total as u64),
            total_downloads: compact_number(stats.total_downloads),
            total_favers: compact_number(stats.total_favers),
        }
    }

    fn build_headers(sort: SortSpec) -> Vec<HeaderView> {
        COLUMNS
            .iter()
            .map(|column| {
                let sorted = column.sort_key == Some(sort.key);
                let indicator = match column.sort_key {
                    None => "",
                    Some(_) if sorted => sort.direction.arrow(),
                    Some(_) => "↕",
                };
                HeaderView {
                    id: column.id,
                    label: column.label,
                    sort_key: column.sort_key,
                    sorted,
                    indicator,
                }
            })
            .collect()
    }

    fn build_presets(sort: SortSpec) -> Vec<PresetOption> {
        SORT_PRESETS
            .iter()
            .map(|preset| PresetOption {
                token: preset.token,
                label: preset.label,
                selected: preset.spec == sort,
            })
            .collect()
    }
}
