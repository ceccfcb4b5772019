use crate::application::read_models::{DisplayState, HeaderView, RowView, TableView};
use crate::catalog::domain::SortKind;
use crate::catalog::policies::{ScoreCategory, Staleness};
use crate::ports::outbound::TableRenderer;
use crate::shared::Result;
use owo_colors::OwoColorize;
use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellStyle {
    Plain,
    Good,
    Warn,
    Bad,
    Dim,
}

struct Cell {
    text: String,
    style: CellStyle,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, CellStyle::Plain)
    }

    fn styled(text: impl Into<String>, style: CellStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Terminal columns taken by the text
    fn width(&self) -> usize {
        UnicodeWidthStr::width(self.text.as_str())
    }
}

/// TextTableRenderer adapter for aligned terminal tables
///
/// Cells are padded before they are colored so escape codes never affect
/// the alignment. Numeric columns are right-aligned.
pub struct TextTableRenderer {
    color: bool,
}

impl TextTableRenderer {
    pub fn new() -> Self {
        Self { color: true }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn paint(&self, text: &str, style: CellStyle) -> String {
        if !self.color {
            return text.to_string();
        }
        match style {
            CellStyle::Plain => text.to_string(),
            CellStyle::Good => text.green().to_string(),
            CellStyle::Warn => text.yellow().to_string(),
            CellStyle::Bad => text.red().to_string(),
            CellStyle::Dim => text.dimmed().to_string(),
        }
    }

    fn render_summary(&self, view: &TableView, output: &mut String) {
        let ecosystem = view.summary.ecosystem.as_deref().unwrap_or("no ecosystem");
        let title = format!("📦 {} packages", ecosystem);
        output.push_str(&if self.color {
            title.bold().to_string()
        } else {
            title
        });
        output.push_str(&format!(
            "  {} total · {} downloads · {} favers\n",
            view.summary.total, view.summary.total_downloads, view.summary.total_favers
        ));

        let mut status = Vec::new();
        if let Some(sorted) = view.headers.iter().find(|h| h.sorted) {
            status.push(format!("sorted by {} {}", sorted.label, sorted.indicator));
        }
        status.push(view.count_label.clone());
        if !view.query.trim().is_empty() {
            status.push(format!("search: \"{}\"", view.query.trim()));
        }
        output.push_str(&status.join(" · "));
        output.push_str("\n\n");
    }

    fn header_cell(header: &HeaderView) -> Cell {
        let text = if header.indicator.is_empty() {
            header.label.to_string()
        } else {
            format!("{} {}", header.label, header.indicator)
        };
        Cell::plain(text)
    }

    fn row_cells(headers: &[HeaderView], row: &RowView) -> Vec<Cell> {
        headers
            .iter()
            .map(|header| match header.id {
                "name" => Cell::plain(Self::name_text(row)),
                "downloads_total" => Cell::plain(row.downloads.as_str()),
                "favers" => Cell::plain(row.favers.as_str()),
                "latest_release" => Cell::styled(
                    row.release_label.as_str(),
                    match row.staleness {
                        Staleness::Unknown => CellStyle::Dim,
                        Staleness::Recent => CellStyle::Good,
                        Staleness::Aging => CellStyle::Warn,
                        Staleness::Stale => CellStyle::Bad,
                    },
                ),
                "github_open_issues" => Cell::plain(row.open_issues.as_str()),
                "cves_count" if row.cves_class.is_some() => {
                    Cell::styled(row.cves.as_str(), CellStyle::Bad)
                }
                "cves_count" => Cell::plain(row.cves.as_str()),
                "score" => Cell::styled(
                    row.score_label.as_str(),
                    match row.score {
                        ScoreCategory::High => CellStyle::Bad,
                        ScoreCategory::Mid => CellStyle::Plain,
                    },
                ),
                "actions" => Cell::styled(
                    row.actions
                        .first()
                        .map(|action| action.url.as_str())
                        .unwrap_or(""),
                    CellStyle::Dim,
                ),
                _ => Cell::plain(""),
            })
            .collect()
    }

    fn name_text(row: &RowView) -> String {
        let mut text = row.name.clone();
        if row.abandoned {
            text.push_str(" (abandoned)");
        }
        if let Some(suggestion) = &row.suggestion {
            text.push_str(&format!(" → {}", suggestion.label));
        }
        text
    }

    fn render_line(
        &self,
        cells: &[Cell],
        widths: &[usize],
        right_aligned: &[bool],
        output: &mut String,
    ) {
        let last = cells.len().saturating_sub(1);
        let rendered: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let padding = " ".repeat(widths[i].saturating_sub(cell.width()));
                let padded = if right_aligned[i] {
                    format!("{}{}", padding, cell.text)
                } else if i == last {
                    cell.text.clone()
                } else {
                    format!("{}{}", cell.text, padding)
                };
                self.paint(&padded, cell.style)
            })
            .collect();
        output.push_str(rendered.join(COLUMN_GAP).trim_end());
        output.push('\n');
    }
}

impl Default for TextTableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer for TextTableRenderer {
    fn render(&self, view: &TableView) -> Result<String> {
        let mut output = String::new();
        self.render_summary(view, &mut output);

        let header_cells: Vec<Cell> = view.headers.iter().map(Self::header_cell).collect();
        let body: Vec<Vec<Cell>> = view
            .rows
            .iter()
            .map(|row| Self::row_cells(&view.headers, row))
            .collect();

        let mut widths: Vec<usize> = header_cells.iter().map(Cell::width).collect();
        for cells in &body {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.width());
            }
        }
        let right_aligned: Vec<bool> = view
            .headers
            .iter()
            .map(|h| h.sort_key.map(|k| k.kind()) == Some(SortKind::Numeric))
            .collect();

        let header_line: Vec<Cell> = header_cells;
        let mut header_output = String::new();
        self.render_line(&header_line, &widths, &right_aligned, &mut header_output);
        output.push_str(&if self.color {
            header_output.trim_end().bold().to_string() + "\n"
        } else {
            header_output
        });

        let gaps = UnicodeWidthStr::width(COLUMN_GAP) * widths.len().saturating_sub(1);
        let rule_width = widths.iter().sum::<usize>() + gaps;
        output.push_str(&"─".repeat(rule_width));
        output.push('\n');

        if let Some(message) = view.state.status_message() {
            let style = match view.state {
                DisplayState::Failed { .. } => CellStyle::Bad,
                _ => CellStyle::Dim,
            };
            output.push_str(&self.paint(&message, style));
            output.push('\n');
            return Ok(output);
        }

        for cells in &body {
            self.render_line(cells, &widths, &right_aligned, &mut output);
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::TableViewBuilder;
    use crate::application::state::{ViewEvent, ViewState};
    use crate::catalog::domain::PackageRecord;
    use crate::catalog::services::PresentationPolicy;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn view_of(records: Vec<PackageRecord>, query: &str) -> TableView {
        let state = ViewState::new().apply(ViewEvent::LoadStarted {
            ecosystem: "php".to_string(),
        });
        let generation = state.generation();
        let state = state
            .apply(ViewEvent::LoadSucceeded {
                generation,
                records,
            })
            .apply(ViewEvent::QueryChanged(query.to_string()));
        TableViewBuilder::new(&PresentationPolicy::default()).build(&state, now())
    }

    fn records() -> Vec<PackageRecord> {
        vec![
            PackageRecord::new("a/b")
                .with_downloads_total(5)
                .with_score(80.0)
                .with_latest_release((now() - Duration::days(900)).to_rfc3339())
                .with_repository("https://github.com/a/b"),
            PackageRecord::new("a/c")
                .with_downloads_total(1_234_567)
                .with_score(40.0),
        ]
    }

    #[test]
    fn test_plain_table_layout() {
        let output = TextTableRenderer::new()
            .with_color(false)
            .render(&view_of(records(), ""))
            .unwrap();

        assert!(output.starts_with("📦 php packages  2 total · 1.2M downloads · 0 favers\n"));
        assert!(output.contains("sorted by Score ↓ · 2 / 2 packages"));
        assert!(output.contains("Package"));
        assert!(output.contains("Latest release ↕"));

        let lines: Vec<&str> = output.lines().collect();
        let first_row = lines.iter().position(|l| l.starts_with("a/b")).unwrap();
        let second_row = lines.iter().position(|l| l.starts_with("a/c")).unwrap();
        assert!(first_row < second_row);
        assert!(lines[first_row].contains("2024-04-29"));
        assert!(lines[first_row].ends_with("https://github.com/a/b"));
        assert!(lines[second_row].contains("1,234,567"));
        assert!(lines[second_row].contains("—"));
    }

    #[test]
    fn test_numeric_columns_right_aligned() {
        let output = TextTableRenderer::new()
            .with_color(false)
            .render(&view_of(records(), ""))
            .unwrap();
        let lines: Vec<&str> = output.lines().collect();
        let big = lines.iter().find(|l| l.starts_with("a/c")).unwrap();
        let small = lines.iter().find(|l| l.starts_with("a/b")).unwrap();
        let big_end = big.find("1,234,567").unwrap() + "1,234,567".len();
        let small_end = small.find(" 5 ").unwrap() + 2;
        assert_eq!(big_end, small_end);
    }

    #[test]
    fn test_wide_characters_keep_columns_aligned() {
        let records = vec![
            PackageRecord::new("a/包包包包").with_downloads_total(5),
            PackageRecord::new("a/bbbbbbbb").with_downloads_total(5),
        ];
        let output = TextTableRenderer::new()
            .with_color(false)
            .render(&view_of(records, ""))
            .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        let column_of_downloads = |prefix: &str| {
            let line = lines.iter().find(|l| l.starts_with(prefix)).unwrap();
            let end = line.find(" 5 ").unwrap() + 2;
            UnicodeWidthStr::width(&line[..end])
        };
        assert_eq!(column_of_downloads("a/包"), column_of_downloads("a/bbbb"));

        let header = lines.iter().find(|l| l.starts_with("Package")).unwrap();
        let rule = lines.iter().find(|l| l.starts_with('─')).unwrap();
        assert!(UnicodeWidthStr::width(*rule) >= UnicodeWidthStr::width(*header));
    }

    #[test]
    fn test_empty_state_message() {
        let output = TextTableRenderer::new()
            .with_color(false)
            .render(&view_of(records(), "zzz-no-match"))
            .unwrap();
        assert!(output.contains("no packages match your filter"));
        assert!(output.contains("0 / 2 packages"));
        assert!(output.contains("search: \"zzz-no-match\""));
    }

    #[test]
    fn test_color_output_contains_escape_codes() {
        let output = TextTableRenderer::new()
            .render(&view_of(records(), ""))
            .unwrap();
        assert!(output.contains("\u{1b}["));
    }

    #[test]
    fn test_render_is_idempotent() {
        let view = view_of(records(), "a/");
        let renderer = TextTableRenderer::new().with_color(false);
        assert_eq!(renderer.render(&view).unwrap(), renderer.render(&view).unwrap());
    }
}
