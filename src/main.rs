use chrono::Utc;
use ossatrisk::adapters::inbound::InteractiveShell;
use ossatrisk::adapters::outbound::console::StderrProgressReporter;
use ossatrisk::adapters::outbound::network::{CachingRecordSource, DEFAULT_TIMEOUT_SECS};
use ossatrisk::adapters::outbound::RoutingRecordSource;
use ossatrisk::application::dto::{DataSource, OutputFormat};
use ossatrisk::application::factories::{
    PresenterFactory, PresenterType, RenderOptions, RendererFactory,
};
use ossatrisk::application::use_cases::{BrowseSession, LoadOutcome};
use ossatrisk::catalog::domain::{SortDirection, SortKey, SortPreset, SortSpec};
use ossatrisk::catalog::services::PresentationPolicy;
use ossatrisk::cli::Args;
use ossatrisk::config::{self, ConfigFile, Ecosystems, DEFAULT_ECOSYSTEM};
use ossatrisk::shared::error::ExitCode;
use ossatrisk::shared::Result;
use std::io::IsTerminal;
use std::process;
use std::str::FromStr;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Everything a run needs, after merging CLI flags over the config file
#[derive(Debug)]
struct Settings {
    source: DataSource,
    ecosystems: Ecosystems,
    format: OutputFormat,
    sort: SortSpec,
    query: String,
    timeout_secs: u64,
    policy: PresentationPolicy,
}

impl Settings {
    /// CLI flags win over the config file, which wins over the built-in defaults
    fn resolve(args: &Args, config: Option<&ConfigFile>) -> Result<Self> {
        let ecosystems = Ecosystems::from_config(config);

        let source = match &args.source {
            Some(argument) => DataSource::from_argument(argument),
            None => {
                let name = args
                    .ecosystem
                    .as_deref()
                    .or_else(|| config.and_then(|c| c.default_ecosystem.as_deref()))
                    .unwrap_or(DEFAULT_ECOSYSTEM);
                ecosystems.resolve(name)?
            }
        };

        let format = match (args.format, config.and_then(|c| c.format.as_deref())) {
            (Some(format), _) => format,
            (None, Some(format)) => OutputFormat::from_str(format).map_err(anyhow::Error::msg)?,
            (None, None) => OutputFormat::default(),
        };

        let policy = match config {
            Some(config) => config.presentation_policy()?,
            None => PresentationPolicy::default(),
        };

        Ok(Self {
            source,
            ecosystems,
            format,
            sort: Self::resolve_sort(args, config)?,
            query: args.query.clone().unwrap_or_default(),
            timeout_secs: config
                .and_then(|c| c.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            policy,
        })
    }

    /// A column or preset on the command line replaces the config's choice.
    ///
    /// The direction comes from `--order`, then the config's `order`, then the
    /// column's default. A preset carries its own direction.
    fn resolve_sort(args: &Args, config: Option<&ConfigFile>) -> Result<SortSpec> {
        let cli_chooses = args.sort.is_some() || args.preset.is_some();
        let (column, preset) = if cli_chooses {
            (args.sort.as_deref(), args.preset.as_deref())
        } else {
            (
                config.and_then(|c| c.sort.as_deref()),
                config.and_then(|c| c.preset.as_deref()),
            )
        };
        let config_order = match config.and_then(|c| c.order.as_deref()) {
            Some(order) => Some(SortDirection::from_str(order).map_err(anyhow::Error::msg)?),
            None => None,
        };

        if let Some(token) = preset {
            return Ok(SortPreset::parse(token)?.spec);
        }
        let key = match column {
            Some(column) => SortKey::from_str(column)?,
            None => SortSpec::default().key,
        };
        let direction = args
            .order
            .or(config_order)
            .unwrap_or_else(|| key.default_direction());
        Ok(SortSpec::new(key, direction))
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose, args.quiet);

    let exit_code = match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };
    process::exit(exit_code.as_i32());
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ossatrisk={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn load_config(args: &Args) -> Result<Option<ConfigFile>> {
    match &args.config {
        Some(path) => config::load_config_from_path(path).map(Some),
        None => config::discover_config(&std::env::current_dir()?),
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(&args)?;
    let settings = Settings::resolve(&args, config.as_ref())?;
    tracing::debug!(?settings, "resolved settings");

    // Create adapters (Dependency Injection)
    let record_source =
        CachingRecordSource::new(RoutingRecordSource::with_timeout(settings.timeout_secs)?);
    let progress_reporter = if args.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };

    let mut session = BrowseSession::new(record_source, progress_reporter, settings.policy)
        .with_sort(settings.sort);
    session.search(settings.query.clone());

    let color = !args.no_color
        && args.output.is_none()
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal();
    let renderer = RendererFactory::create(settings.format, RenderOptions { color });

    if args.interactive {
        let mut shell = InteractiveShell::new(session, settings.ecosystems, renderer);
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        shell.run(Some(settings.source), stdin, &mut stdout).await?;
        return Ok(ExitCode::Success);
    }

    let outcome = session.load(settings.source).await;

    if !args.quiet {
        eprintln!("{}", RendererFactory::progress_message(settings.format));
    }
    let rendered = renderer.render(&session.view(Utc::now()))?;

    let presenter = PresenterFactory::create(PresenterType::from_output(args.output));
    presenter.present(&rendered)?;

    Ok(match outcome {
        LoadOutcome::Failed { .. } => ExitCode::LoadFailed,
        _ => ExitCode::Success,
    })
}
