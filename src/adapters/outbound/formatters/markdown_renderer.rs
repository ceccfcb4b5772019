use crate::application::read_models::{HeaderView, RowView, TableView};
use crate::catalog::policies::{ScoreCategory, Staleness};
use crate::ports::outbound::TableRenderer;
use crate::shared::Result;

/// MarkdownTableRenderer adapter for Markdown tables
///
/// Package names link to their package page, release dates carry a colored
/// marker for their staleness and high scores are bold.
pub struct MarkdownTableRenderer;

impl MarkdownTableRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn link(label: &str, url: &str) -> String {
        format!("[{}]({})", Self::escape_cell(label), url.replace(' ', "%20"))
    }

    fn staleness_marker(staleness: Staleness) -> &'static str {
        match staleness {
            Staleness::Unknown => "",
            Staleness::Recent => "🟢 ",
            Staleness::Aging => "🟡 ",
            Staleness::Stale => "🔴 ",
        }
    }

    fn render_summary(&self, view: &TableView, output: &mut String) {
        let ecosystem = view.summary.ecosystem.as_deref().unwrap_or("no ecosystem");
        output.push_str(&format!("# 📦 {} packages\n\n", Self::escape_cell(ecosystem)));
        output.push_str(&format!(
            "**{}** packages · **{}** downloads · **{}** favers\n\n",
            view.summary.total, view.summary.total_downloads, view.summary.total_favers
        ));

        let mut status = vec![view.count_label.clone()];
        if let Some(sorted) = view.headers.iter().find(|h| h.sorted) {
            status.push(format!("sorted by {} {}", sorted.label, sorted.indicator));
        }
        if !view.query.trim().is_empty() {
            status.push(format!("search: `{}`", view.query.trim().replace('`', "'")));
        }
        output.push_str(&status.join(" · "));
        output.push_str("\n\n");
    }

    fn render_header(headers: &[HeaderView], output: &mut String) {
        let labels: Vec<&str> = headers.iter().map(|h| h.label).collect();
        output.push_str(&format!("| {} |\n", labels.join(" | ")));
        let rules: Vec<&str> = headers
            .iter()
            .map(|h| match h.id {
                "name" | "latest_release" | "actions" => "---",
                _ => "---:",
            })
            .collect();
        output.push_str(&format!("|{}|\n", rules.join("|")));
    }

    fn render_cell(header: &HeaderView, row: &RowView) -> String {
        match header.id {
            "name" => Self::name_cell(row),
            "downloads_total" => row.downloads.clone(),
            "favers" => row.favers.clone(),
            "latest_release" => format!(
                "{}{}",
                Self::staleness_marker(row.staleness),
                row.release_label
            ),
            "github_open_issues" => row.open_issues.clone(),
            "cves_count" if row.cves_class.is_some() => format!("⚠️ {}", row.cves),
            "cves_count" => row.cves.clone(),
            "score" => match row.score {
                ScoreCategory::High => format!("**{}**", row.score_label),
                ScoreCategory::Mid => row.score_label.clone(),
            },
            "actions" => row
                .actions
                .iter()
                .map(|action| Self::link(&action.label, &action.url))
                .collect::<Vec<_>>()
                .join(" · "),
            _ => String::new(),
        }
    }

    fn name_cell(row: &RowView) -> String {
        let mut cell = match &row.package_url {
            Some(url) => Self::link(&row.name, url),
            None => Self::escape_cell(&row.name),
        };
        if row.abandoned {
            cell.push_str(" _(abandoned)_");
        }
        if let Some(suggestion) = &row.suggestion {
            cell.push_str(&format!(
                "<br>↳ {}",
                Self::link(&suggestion.label, &suggestion.url)
            ));
        }
        cell
    }
}

impl Default for MarkdownTableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer for MarkdownTableRenderer {
    fn render(&self, view: &TableView) -> Result<String> {
        let mut output = String::new();
        self.render_summary(view, &mut output);

        if let Some(message) = view.state.status_message() {
            output.push_str(&format!("_{}_\n", Self::escape_cell(&message)));
            return Ok(output);
        }

        Self::render_header(&view.headers, &mut output);
        for row in &view.rows {
            let cells: Vec<String> = view
                .headers
                .iter()
                .map(|header| Self::render_cell(header, row))
                .collect();
            output.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        Ok(output)
    }
}
