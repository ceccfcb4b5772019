use std::str::FromStr;

use chrono::Utc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::application::dto::DataSource;
use crate::application::use_cases::{BrowseSession, LoadOutcome, LoadTicket};
use crate::catalog::domain::{PackageRecord, SortKey};
use crate::config::Ecosystems;
use crate::ports::outbound::{ProgressReporter, RecordSource, TableRenderer};
use crate::shared::Result;

const HELP: &str = "\
commands:
  search <text>    show packages whose name contains <text>
  clear            clear the search
  sort <column>    sort by a column; repeat to flip the direction
  preset <token>   apply a sort preset (e.g. score_desc, name_asc)
  tab <ecosystem>  switch to another ecosystem
  reload           fetch the current ecosystem again
  show             print the table
  help             print this help
  quit             leave the session
";

type Completion = (LoadTicket, Result<Vec<PackageRecord>>);

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Search(String),
    Clear,
    Sort(SortKey),
    Preset(String),
    Tab(String),
    Reload,
    Show,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parses a line; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<ShellCommand>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_lowercase().as_str() {
            "search" | "/" => ShellCommand::Search(rest.to_string()),
            "clear" => ShellCommand::Clear,
            "sort" => ShellCommand::Sort(SortKey::from_str(Self::required(verb, rest)?)?),
            "preset" => ShellCommand::Preset(Self::required(verb, rest)?.to_string()),
            "tab" => ShellCommand::Tab(Self::required(verb, rest)?.to_string()),
            "reload" => ShellCommand::Reload,
            "show" => ShellCommand::Show,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => anyhow::bail!("unknown command: {} (type `help`)", other),
        };
        Ok(Some(command))
    }

    fn required<'a>(verb: &str, argument: &'a str) -> Result<&'a str> {
        if argument.is_empty() {
            anyhow::bail!("`{}` needs an argument (type `help`)", verb);
        }
        Ok(argument)
    }
}

enum Flow {
    Continue,
    Quit,
}

/// InteractiveShell - Line-oriented front end for a [`BrowseSession`]
///
/// Reads commands from `input` and prints the table after every change.
/// Fetches run on spawned tasks; their results come back over a channel
/// and go through the session's ticket check, so a slow load that was
/// superseded by a newer `tab` never reaches the screen.
pub struct InteractiveShell<S, P> {
    session: BrowseSession<S, P>,
    ecosystems: Ecosystems,
    renderer: Box<dyn TableRenderer>,
}

impl<S, P> InteractiveShell<S, P>
where
    S: RecordSource + 'static,
    P: ProgressReporter,
{
    pub fn new(
        session: BrowseSession<S, P>,
        ecosystems: Ecosystems,
        renderer: Box<dyn TableRenderer>,
    ) -> Self {
        Self {
            session,
            ecosystems,
            renderer,
        }
    }

    pub fn session(&self) -> &BrowseSession<S, P> {
        &self.session
    }

    /// Runs until `quit` or end of input
    ///
    /// At end of input, loads still in flight are awaited and shown.
    pub async fn run<R, W>(
        &mut self,
        initial: Option<DataSource>,
        input: R,
        output: &mut W,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
        let mut lines = input.lines();
        let mut input_open = true;

        if let Some(source) = initial {
            let ticket = self.session.begin_load(source);
            self.spawn_load(ticket, &tx);
        }
        self.show(output).await?;

        loop {
            tokio::select! {
                line = lines.next_line(), if input_open => {
                    match line? {
                        Some(line) => {
                            if let Flow::Quit = self.handle_line(&line, &tx, output).await? {
                                break;
                            }
                        }
                        None => {
                            input_open = false;
                            if !self.session.is_loading() {
                                break;
                            }
                        }
                    }
                }
                Some((ticket, result)) = rx.recv() => {
                    let outcome = self.session.finish_load(&ticket, result);
                    if outcome != LoadOutcome::Superseded {
                        self.show(output).await?;
                    }
                    if !input_open && !self.session.is_loading() {
                        break;
                    }
                }
            }
        }
        output.flush().await?;
        Ok(())
    }

    async fn handle_line<W>(
        &mut self,
        line: &str,
        tx: &mpsc::UnboundedSender<Completion>,
        output: &mut W,
    ) -> Result<Flow>
    where
        W: AsyncWrite + Unpin,
    {
        let command = match ShellCommand::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                Self::write_error(&e, output).await?;
                return Ok(Flow::Continue);
            }
        };
        tracing::debug!(?command, "shell command");

        match command {
            ShellCommand::Search(query) => self.session.search(query),
            ShellCommand::Clear => self.session.clear_search(),
            ShellCommand::Sort(key) => {
                self.session.click_header(key);
            }
            ShellCommand::Preset(token) => {
                if let Err(e) = self.session.select_preset(&token) {
                    Self::write_error(&e, output).await?;
                    return Ok(Flow::Continue);
                }
            }
            ShellCommand::Tab(name) => match self.ecosystems.resolve(&name) {
                Ok(source) => {
                    let ticket = self.session.begin_load(source);
                    self.spawn_load(ticket, tx);
                }
                Err(e) => {
                    Self::write_error(&e, output).await?;
                    return Ok(Flow::Continue);
                }
            },
            ShellCommand::Reload => match self.session.begin_reload() {
                Some(ticket) => self.spawn_load(ticket, tx),
                None => {
                    output.write_all(b"nothing to reload yet\n").await?;
                    return Ok(Flow::Continue);
                }
            },
            ShellCommand::Show => {}
            ShellCommand::Help => {
                output.write_all(HELP.as_bytes()).await?;
                return Ok(Flow::Continue);
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        self.show(output).await?;
        Ok(Flow::Continue)
    }

    fn spawn_load(&self, ticket: LoadTicket, tx: &mpsc::UnboundedSender<Completion>) {
        let record_source = self.session.record_source();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = record_source.load(&ticket.source).await;
            // the receiver is gone once the shell has exited
            let _ = tx.send((ticket, result));
        });
    }

    async fn show<W>(&self, output: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let rendered = self.renderer.render(&self.session.view(Utc::now()))?;
        output.write_all(rendered.as_bytes()).await?;
        if !rendered.ends_with('\n') {
            output.write_all(b"\n").await?;
        }
        output.flush().await?;
        Ok(())
    }

    async fn write_error<W>(error: &anyhow::Error, output: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        output
            .write_all(format!("❌ {}\n", error).as_bytes())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::formatters::TextTableRenderer;
    use crate::application::dto::SourceLocation;
    use crate::catalog::domain::SortDirection;
    use crate::catalog::services::PresentationPolicy;
    use crate::config::ConfigFile;
    use crate::config::EcosystemConfig;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use tokio::io::BufReader;

    struct NamedSource;

    #[async_trait]
    impl RecordSource for NamedSource {
        async fn load(&self, source: &DataSource) -> Result<Vec<PackageRecord>> {
            match source.name.as_str() {
                "php" => Ok(vec![
                    PackageRecord::new("a/b").with_score(80.0),
                    PackageRecord::new("a/c").with_score(40.0),
                    PackageRecord::new("b/d").with_score(10.0),
                ]),
                "npm" => Ok(vec![PackageRecord::new("left-pad").with_score(99.0)]),
                _ => anyhow::bail!("no data for {}", source.name),
            }
        }
    }

    struct SilentReporter;

    impl ProgressReporter for SilentReporter {
        fn report(&self, _message: &str) {}
        fn start_activity(&self, _message: &str) {}
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    fn ecosystems() -> Ecosystems {
        let mut entries = BTreeMap::new();
        entries.insert(
            "npm".to_string(),
            EcosystemConfig {
                label: Some("npm".to_string()),
                url: "https://example.com/npm.json".to_string(),
                package_url_template: None,
            },
        );
        let config = ConfigFile {
            ecosystems: Some(entries),
            ..ConfigFile::default()
        };
        Ecosystems::from_config(Some(&config))
    }

    fn shell() -> InteractiveShell<NamedSource, SilentReporter> {
        let session =
            BrowseSession::new(NamedSource, SilentReporter, PresentationPolicy::default());
        InteractiveShell::new(
            session,
            ecosystems(),
            Box::new(TextTableRenderer::new().with_color(false)),
        )
    }

    fn php() -> DataSource {
        DataSource::new(
            "php",
            "PHP",
            SourceLocation::Url("https://example.com/php.json".to_string()),
        )
    }

    async fn run_script(script: &str) -> (InteractiveShell<NamedSource, SilentReporter>, String) {
        let mut shell = shell();
        let mut output = Vec::new();
        shell
            .run(Some(php()), BufReader::new(script.as_bytes()), &mut output)
            .await
            .unwrap();
        (shell, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            ShellCommand::parse("search symfony/").unwrap(),
            Some(ShellCommand::Search("symfony/".to_string()))
        );
        assert_eq!(
            ShellCommand::parse("search").unwrap(),
            Some(ShellCommand::Search(String::new()))
        );
        assert_eq!(
            ShellCommand::parse("SORT downloads_total").unwrap(),
            Some(ShellCommand::Sort(SortKey::DownloadsTotal))
        );
        assert_eq!(
            ShellCommand::parse("tab npm").unwrap(),
            Some(ShellCommand::Tab("npm".to_string()))
        );
        assert_eq!(ShellCommand::parse("exit").unwrap(), Some(ShellCommand::Quit));
        assert_eq!(ShellCommand::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        let err = ShellCommand::parse("sort popularity").unwrap_err();
        assert!(err.to_string().contains("Unknown sort column: popularity"));
        assert!(ShellCommand::parse("tab").is_err());
        let err = ShellCommand::parse("dance").unwrap_err();
        assert!(err.to_string().contains("unknown command: dance"));
    }

    #[tokio::test]
    async fn test_end_of_input_waits_for_initial_load() {
        let (shell, output) = run_script("").await;
        assert!(output.contains("loading…"));
        assert!(output.contains("3 / 3 packages"));
        assert_eq!(shell.session().state().full_set().len(), 3);
    }

    #[tokio::test]
    async fn test_search_applies_to_loaded_rows() {
        let (shell, output) = run_script("search a/\n").await;
        assert_eq!(shell.session().state().query(), "a/");
        assert!(output.contains("2 / 3 packages"));
    }

    #[tokio::test]
    async fn test_tab_switch_loads_other_ecosystem() {
        let (shell, output) = run_script("tab npm\n").await;
        assert_eq!(shell.session().state().ecosystem(), Some("npm"));
        assert!(output.contains("left-pad"));
        assert!(output.contains("1 / 1 packages"));
    }

    #[tokio::test]
    async fn test_unknown_ecosystem_is_reported() {
        let (shell, output) = run_script("tab cobol\n").await;
        assert!(output.contains("❌ Unknown ecosystem: cobol"));
        assert_eq!(shell.session().state().ecosystem(), Some("php"));
    }

    #[tokio::test]
    async fn test_sort_twice_flips_direction() {
        let (shell, _) = run_script("sort favers\nsort favers\n").await;
        let sort = shell.session().state().sort();
        assert_eq!(sort.key, SortKey::Favers);
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let mut shell = shell();
        let mut output = Vec::new();
        shell
            .run(None, BufReader::new("quit\nsearch a/\n".as_bytes()), &mut output)
            .await
            .unwrap();
        assert_eq!(shell.session().state().query(), "");
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("no data loaded"));
    }

    #[tokio::test]
    async fn test_help_and_bad_preset() {
        let (_, output) = run_script("help\npreset best\n").await;
        assert!(output.contains("commands:"));
        assert!(output.contains("❌ Unknown sort preset: best"));
    }
}
