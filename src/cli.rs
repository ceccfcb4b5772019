use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::application::dto::OutputFormat;
use crate::catalog::domain::SortDirection;

/// Browse open-source packages at risk of abandonment
#[derive(Parser, Debug)]
#[command(name = "ossatrisk")]
#[command(version)]
#[command(
    about = "Browse open-source packages at risk of abandonment",
    long_about = None
)]
pub struct Args {
    /// Ecosystem to load (e.g. php); see the config file for custom ones
    #[arg(short, long)]
    pub ecosystem: Option<String>,

    /// Load packages from a JSON file or URL instead of an ecosystem
    #[arg(short, long, value_name = "PATH_OR_URL", conflicts_with = "ecosystem")]
    pub source: Option<String>,

    /// Only show packages whose name contains this text
    #[arg(short, long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Column to sort by (e.g. score, downloads_total, latest_release)
    #[arg(long, value_name = "COLUMN", conflicts_with = "preset")]
    pub sort: Option<String>,

    /// Sort direction: asc or desc (defaults to the column's natural order)
    #[arg(long, value_name = "ORDER")]
    pub order: Option<SortDirection>,

    /// Named sort preset (e.g. score_desc, name_asc)
    #[arg(long, value_name = "TOKEN")]
    pub preset: Option<String>,

    /// Output format: text, markdown or html
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to a config file (defaults to ./ossatrisk.config.yml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Start an interactive session reading commands from stdin
    #[arg(short, long, conflicts_with = "output")]
    pub interactive: bool,

    /// Disable colored text output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only print errors on stderr
    #[arg(long)]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
