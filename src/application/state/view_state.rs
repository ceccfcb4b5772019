use crate::catalog::domain::{CatalogStats, PackageRecord, SortKey, SortSpec};
use crate::catalog::services::{CatalogStatistics, PackageFilter, PackageSorter};
use std::sync::Arc;

/// Where the current record set is in its load lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed { message: String },
}

/// Inputs to the reducer
#[derive(Debug, Clone)]
pub enum ViewEvent {
    /// A load for `ecosystem` was requested
    LoadStarted { ecosystem: String },
    LoadSucceeded {
        generation: u64,
        records: Vec<PackageRecord>,
    },
    LoadFailed { generation: u64, message: String },
    QueryChanged(String),
    HeaderClicked(SortKey),
    SortSelected(SortSpec),
}

/// ViewState - Everything the table is derived from
///
/// `full_set` is shared and never mutated in place; a successful load
/// replaces it wholesale together with its statistics.
#[derive(Debug, Clone)]
pub struct ViewState {
    full_set: Arc<[PackageRecord]>,
    stats: CatalogStats,
    sort: SortSpec,
    query: String,
    ecosystem: Option<String>,
    load: LoadStatus,
    generation: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            full_set: Arc::from(Vec::new()),
            stats: CatalogStats::default(),
            sort: SortSpec::default(),
            query: String::new(),
            ecosystem: None,
            load: LoadStatus::Idle,
            generation: 0,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a given sort instead of the default
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    pub fn full_set(&self) -> &[PackageRecord] {
        &self.full_set
    }

    pub fn stats(&self) -> CatalogStats {
        self.stats
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn ecosystem(&self) -> Option<&str> {
        self.ecosystem.as_deref()
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when `generation` belongs to the most recent load request
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Filtered then sorted view over the full set
    pub fn visible(&self) -> Vec<&PackageRecord> {
        let filtered = PackageFilter::new(&self.query).apply(&self.full_set);
        PackageSorter::sort(filtered, self.sort)
    }

    /// Applies one event and returns the next state
    ///
    /// Completions carrying an outdated generation leave the state unchanged.
    pub fn apply(mut self, event: ViewEvent) -> Self {
        match event {
            ViewEvent::LoadStarted { ecosystem } => {
                self.generation += 1;
                if self.ecosystem.as_deref() != Some(ecosystem.as_str()) {
                    self.full_set = Arc::from(Vec::new());
                    self.stats = CatalogStats::default();
                }
                self.ecosystem = Some(ecosystem);
                self.load = LoadStatus::Loading;
            }
            ViewEvent::LoadSucceeded {
                generation,
                records,
            } => {
                if !self.is_current(generation) {
                    return self;
                }
                self.stats = CatalogStatistics::compute(&records);
                self.full_set = Arc::from(records);
                self.load = LoadStatus::Loaded;
            }
            ViewEvent::LoadFailed {
                generation,
                message,
            } => {
                if !self.is_current(generation) {
                    return self;
                }
                self.load = LoadStatus::Failed { message };
            }
            ViewEvent::QueryChanged(query) => self.query = query,
            ViewEvent::HeaderClicked(key) => self.sort = self.sort.toggle_or_select(key),
            ViewEvent::SortSelected(spec) => self.sort = spec,
        }
        self
    }
}
