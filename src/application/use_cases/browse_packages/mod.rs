use crate::application::dto::DataSource;
use crate::application::read_models::{TableView, TableViewBuilder};
use crate::application::state::{LoadStatus, ViewEvent, ViewState};
use crate::catalog::domain::{PackageRecord, SortKey, SortPreset, SortSpec};
use crate::catalog::policies::RiskScorePolicy;
use crate::catalog::services::PresentationPolicy;
use crate::ports::outbound::{ProgressReporter, RecordSource};
use crate::shared::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;


/// Identifies one load request
///
/// A ticket is handed out by [`BrowseSession::begin_load`] and must be
/// returned with the fetch result. Only the ticket of the most recent
/// request is honoured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub source: DataSource,
}

/// What happened to a completed load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The records replaced the full set
    Applied { count: usize },
    /// The load failed; the table shows the failure
    Failed { message: String },
    /// A newer load was started meanwhile; the result was dropped
    Superseded,
}

/// BrowseSession - Controller for one package table
///
/// Owns the view state and is the only place it changes. Loads are split
/// into `begin_load` and `finish_load` so the fetch itself can run on
/// another task.
///
/// # Type Parameters
/// * `S` - RecordSource implementation
/// * `P` - ProgressReporter implementation
pub struct BrowseSession<S, P> {
    record_source: Arc<S>,
    progress_reporter: P,
    policy: PresentationPolicy,
    state: ViewState,
    active_source: Option<DataSource>,
}

impl<S, P> BrowseSession<S, P>
where
    S: RecordSource + 'static,
    P: ProgressReporter,
{
    /// Creates a new BrowseSession with injected dependencies
    pub fn new(record_source: S, progress_reporter: P, policy: PresentationPolicy) -> Self {
        Self {
            record_source: Arc::new(record_source),
            progress_reporter,
            policy,
            state: ViewState::new(),
            active_source: None,
        }
    }

    /// Sets the initial sort
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.state = self.state.with_sort(sort);
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn active_source(&self) -> Option<&DataSource> {
        self.active_source.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state.load_status(), LoadStatus::Loading)
    }

    /// Shared handle to the record source, for fetches on other tasks
    pub fn record_source(&self) -> Arc<S> {
        Arc::clone(&self.record_source)
    }

    /// Marks a load of `source` as started and returns its ticket
    ///
    /// Any load still in flight is superseded.
    pub fn begin_load(&mut self, source: DataSource) -> LoadTicket {
        self.dispatch(ViewEvent::LoadStarted {
            ecosystem: source.name.clone(),
        });
        tracing::debug!(
            generation = self.state.generation(),
            source = %source.location,
            "load started"
        );
        self.progress_reporter
            .start_activity(&format!("📥 Loading {} packages...", source.label));
        self.active_source = Some(source.clone());
        LoadTicket {
            generation: self.state.generation(),
            source,
        }
    }

    /// Applies the result of the load identified by `ticket`
    pub fn finish_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Vec<PackageRecord>>,
    ) -> LoadOutcome {
        if !self.state.is_current(ticket.generation) {
            tracing::debug!(
                generation = ticket.generation,
                current = self.state.generation(),
                "discarding superseded load"
            );
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(records) => {
                let records = RiskScorePolicy.score_unscored(records, Utc::now());
                let count = records.len();
                self.dispatch(ViewEvent::LoadSucceeded {
                    generation: ticket.generation,
                    records,
                });
                tracing::info!(count, source = %ticket.source.location, "records loaded");
                self.progress_reporter.report_completion(&format!(
                    "✅ Loaded {} packages from {}",
                    count, ticket.source.label
                ));
                LoadOutcome::Applied { count }
            }
            Err(error) => {
                let message = summary_line(&error);
                tracing::warn!(
                    source = %ticket.source.location,
                    error = %format!("{:#}", error),
                    "load failed"
                );
                self.progress_reporter
                    .report_error(&format!("❌ {}", message));
                self.dispatch(ViewEvent::LoadFailed {
                    generation: ticket.generation,
                    message: message.clone(),
                });
                LoadOutcome::Failed { message }
            }
        }
    }

    /// Loads `source` and waits for the result
    pub async fn load(&mut self, source: DataSource) -> LoadOutcome {
        let ticket = self.begin_load(source);
        let result = self.record_source.load(&ticket.source).await;
        self.finish_load(&ticket, result)
    }

    /// Starts a fresh load of the active source, bypassing any cache
    ///
    /// Returns `None` when nothing was loaded yet.
    pub fn begin_reload(&mut self) -> Option<LoadTicket> {
        let source = self.active_source.clone()?;
        self.record_source.invalidate(&source);
        self.progress_reporter
            .report(&format!("🔄 Reloading {} packages", source.label));
        Some(self.begin_load(source))
    }

    /// Replaces the search query
    pub fn search(&mut self, query: impl Into<String>) {
        self.dispatch(ViewEvent::QueryChanged(query.into()));
    }

    pub fn clear_search(&mut self) {
        self.search(String::new());
    }

    /// Column header activation: toggles the active column, selects others
    pub fn click_header(&mut self, key: SortKey) -> SortSpec {
        self.dispatch(ViewEvent::HeaderClicked(key));
        self.state.sort()
    }

    /// Applies a named sort preset
    ///
    /// # Errors
    /// Returns `UnknownPreset` when `token` is not in the preset table
    pub fn select_preset(&mut self, token: &str) -> Result<SortSpec> {
        let preset = SortPreset::parse(token)?;
        self.set_sort(preset.spec);
        Ok(preset.spec)
    }

    pub fn set_sort(&mut self, spec: SortSpec) {
        self.dispatch(ViewEvent::SortSelected(spec));
    }

    /// Builds the table as of `now`
    pub fn view(&self, now: DateTime<Utc>) -> TableView {
        let template = self
            .active_source
            .as_ref()
            .and_then(|s| s.package_url_template.as_deref());
        TableViewBuilder::new(&self.policy)
            .with_package_url_template(template)
            .build(&self.state, now)
    }

    fn dispatch(&mut self, event: ViewEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(event);
    }
}

/// First line of an error's message, without the hint block
fn summary_line(error: &anyhow::Error) -> String {
    let display = error.to_string();
    display
        .lines()
        .next()
        .filter(|line| !line.trim().is_empty())
        .unwrap_or("unknown error")
        .to_string()
}
