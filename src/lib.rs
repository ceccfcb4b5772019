//! ossatrisk - Browse open-source packages at risk of abandonment
//!
//! This library loads per-ecosystem package risk data (a JSON array of
//! package records), filters it by name, sorts it by any column and renders
//! it as a text, Markdown or HTML table. It follows hexagonal architecture
//! and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`catalog`): Package records, filter, sort, statistics and display policies
//! - **Application Layer** (`application`): View state, the browse session and table read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): HTTP and file record sources, renderers, the interactive shell
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use ossatrisk::prelude::*;
//! use chrono::Utc;
//!
//! # async fn example() -> Result<()> {
//! let record_source = CachingRecordSource::new(RoutingRecordSource::with_timeout(15)?);
//! let mut session = BrowseSession::new(
//!     record_source,
//!     StderrProgressReporter::new(),
//!     PresentationPolicy::default(),
//! );
//!
//! let php = Ecosystems::builtin().resolve("php")?;
//! session.load(php).await;
//! session.search("symfony/");
//! session.click_header(SortKey::DownloadsTotal);
//!
//! let renderer = TextTableRenderer::new();
//! println!("{}", renderer.render(&session.view(Utc::now()))?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::inbound::{InteractiveShell, ShellCommand};
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileRecordSource, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        HtmlTableRenderer, MarkdownTableRenderer, TextTableRenderer,
    };
    pub use crate::adapters::outbound::network::{CachingRecordSource, HttpRecordSource};
    pub use crate::adapters::outbound::RoutingRecordSource;
    pub use crate::application::dto::{DataSource, OutputFormat, SourceLocation};
    pub use crate::application::read_models::{DisplayState, TableView, TableViewBuilder};
    pub use crate::application::state::{LoadStatus, ViewEvent, ViewState};
    pub use crate::application::use_cases::{BrowseSession, LoadOutcome, LoadTicket};
    pub use crate::catalog::domain::{
        CatalogStats, PackageRecord, SortDirection, SortKey, SortPreset, SortSpec,
    };
    pub use crate::catalog::policies::{RiskScorePolicy, ScorePolicy, StalenessPolicy};
    pub use crate::catalog::services::{
        CatalogStatistics, PackageFilter, PackageSorter, PresentationPolicy,
    };
    pub use crate::config::Ecosystems;
    pub use crate::ports::outbound::{
        OutputPresenter, ProgressReporter, RecordSource, TableRenderer,
    };
    pub use crate::shared::Result;
}
