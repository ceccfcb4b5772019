use crate::application::read_models::{DisplayState, LinkView, RowView, TableView};
use crate::ports::outbound::TableRenderer;
use crate::shared::Result;

/// Rows after this index share the same entrance delay
const MAX_STAGGERED_ROWS: usize = 30;
const ROW_DELAY_MS: usize = 12;

/// Icon and button class per row action label
const ACTION_STYLES: &[(&str, &str, &str)] = &[
    ("Contribute", "btn-action btn-green", "assets/img/heart.svg"),
    ("Check issues", "btn-action btn-blue", "assets/img/list.svg"),
    ("Fork", "btn-action", "assets/img/git-fork.svg"),
];

/// HtmlTableRenderer adapter for the web page markup
///
/// Emits the stats block, the sort selector and the package table with the
/// ids and CSS classes the site stylesheet expects. Every text value and
/// URL is escaped; links open in a new tab.
pub struct HtmlTableRenderer;

impl HtmlTableRenderer {
    pub fn new() -> Self {
        Self
    }

    fn escape(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for ch in text.chars() {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    fn render_stats(view: &TableView, output: &mut String) {
        let ecosystem = view.summary.ecosystem.as_deref().unwrap_or("");
        output.push_str("<div class=\"stats\">\n");
        output.push_str(&format!(
            "  <span id=\"eco-label\">{}</span>\n",
            Self::escape(ecosystem)
        ));
        output.push_str(&format!(
            "  <span id=\"stat-total\">{}</span>\n",
            Self::escape(&view.summary.total)
        ));
        output.push_str(&format!(
            "  <span id=\"stat-installs\">{}</span>\n",
            Self::escape(&view.summary.total_downloads)
        ));
        output.push_str(&format!(
            "  <span id=\"stat-favers\">{}</span>\n",
            Self::escape(&view.summary.total_favers)
        ));
        output.push_str("</div>\n");
    }

    fn render_controls(view: &TableView, output: &mut String) {
        output.push_str(&format!(
            "<input id=\"search\" type=\"search\" value=\"{}\">\n",
            Self::escape(&view.query)
        ));
        output.push_str("<select id=\"sort-by\">\n");
        for preset in &view.presets {
            output.push_str(&format!(
                "  <option value=\"{}\"{}>{}</option>\n",
                preset.token,
                if preset.selected { " selected" } else { "" },
                Self::escape(preset.label)
            ));
        }
        output.push_str("</select>\n");
        output.push_str(&format!(
            "<span id=\"result-count\">{}</span>\n",
            Self::escape(&view.count_label)
        ));
    }

    fn render_head(view: &TableView, output: &mut String) {
        output.push_str("<thead>\n<tr>\n");
        for header in &view.headers {
            let class = if header.sorted { " class=\"sorted\"" } else { "" };
            if header.sortable() {
                output.push_str(&format!(
                    "  <th data-col=\"{}\"{}>{} <span class=\"sort-arrow\">{}</span></th>\n",
                    header.id,
                    class,
                    Self::escape(header.label),
                    header.indicator
                ));
            } else {
                output.push_str(&format!(
                    "  <th data-col=\"{}\">{}</th>\n",
                    header.id,
                    Self::escape(header.label)
                ));
            }
        }
        output.push_str("</tr>\n</thead>\n");
    }

    fn render_status(view: &TableView, message: &str, output: &mut String) {
        let content = match view.state {
            DisplayState::Loading => {
                "<span class=\"loading-dots\">loading</span>".to_string()
            }
            DisplayState::Failed { .. } => {
                format!("⚠ {}", Self::escape(message))
            }
            _ => Self::escape(message),
        };
        output.push_str(&format!(
            "<tr class=\"status-row\"><td colspan=\"{}\">{}</td></tr>\n",
            view.headers.len(),
            content
        ));
    }

    fn name_html(row: &RowView) -> String {
        let title = row
            .description
            .as_deref()
            .map(|d| format!(" title=\"{}\"", Self::escape(d)))
            .unwrap_or_default();
        let mut html = match (&row.package_url, &row.vendor) {
            (Some(url), Some(vendor)) => {
                let url = Self::escape(url);
                format!(
                    "<a href=\"{url}\" target=\"_blank\" rel=\"noopener\" class=\"pkg-vendor\">{}/</a><a href=\"{url}\" target=\"_blank\" rel=\"noopener\" class=\"pkg-name\"{title}>{}</a>",
                    Self::escape(vendor),
                    Self::escape(&row.package),
                )
            }
            (Some(url), None) => format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener\" class=\"pkg-name\"{title}>{}</a>",
                Self::escape(url),
                Self::escape(&row.package)
            ),
            (None, Some(vendor)) => format!(
                "<span class=\"pkg-vendor\">{}/</span><span class=\"pkg-name\"{title}>{}</span>",
                Self::escape(vendor),
                Self::escape(&row.package)
            ),
            (None, None) => format!(
                "<span class=\"pkg-name\"{title}>{}</span>",
                Self::escape(&row.package)
            ),
        };
        if row.abandoned {
            html.push_str(" <span class=\"badge-abandoned\">abandoned</span>");
        }
        if let Some(suggestion) = &row.suggestion {
            html.push_str(&format!(
                "<br>↳ <div class=\"suggestion\"><a href=\"{}\" target=\"_blank\" title=\"Suggested replacement\" rel=\"noopener\">{}</a></div>",
                Self::escape(&suggestion.url),
                Self::escape(&suggestion.label)
            ));
        }
        html
    }

    fn action_html(action: &LinkView) -> String {
        let (class, icon) = ACTION_STYLES
            .iter()
            .find(|(label, _, _)| *label == action.label)
            .map(|(_, class, icon)| (*class, *icon))
            .unwrap_or(("btn-action", "assets/img/list.svg"));
        let label = Self::escape(&action.label);
        format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\" class=\"{}\"><img src=\"{}\" class=\"icon\" alt=\"{label}\"> {label}</a>",
            Self::escape(&action.url),
            class,
            icon,
        )
    }

    fn render_row(index: usize, row: &RowView, output: &mut String) {
        let delay = index.min(MAX_STAGGERED_ROWS) * ROW_DELAY_MS;
        let cves_class = match row.cves_class {
            Some(class) => format!("num-cell {}", class),
            None => "num-cell".to_string(),
        };
        let actions: String = row.actions.iter().map(Self::action_html).collect();

        output.push_str(&format!("<tr style=\"animation-delay:{}ms\">\n", delay));
        output.push_str(&format!("  <td>{}</td>\n", Self::name_html(row)));
        output.push_str(&format!(
            "  <td class=\"num-cell\">{}</td>\n",
            Self::escape(&row.downloads)
        ));
        output.push_str(&format!(
            "  <td class=\"num-cell\">{}</td>\n",
            Self::escape(&row.favers)
        ));
        output.push_str(&format!(
            "  <td class=\"{}\">{}</td>\n",
            row.release_class(),
            Self::escape(&row.release_label)
        ));
        output.push_str(&format!(
            "  <td class=\"num-cell\">{}</td>\n",
            Self::escape(&row.open_issues)
        ));
        output.push_str(&format!(
            "  <td class=\"{}\">{}</td>\n",
            cves_class,
            Self::escape(&row.cves)
        ));
        output.push_str(&format!(
            "  <td><span class=\"score-badge {}\">{}</span></td>\n",
            row.score_class(),
            Self::escape(&row.score_label)
        ));
        output.push_str(&format!("  <td>{}</td>\n", actions));
        output.push_str("</tr>\n");
    }
}

impl Default for HtmlTableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer for HtmlTableRenderer {
    fn render(&self, view: &TableView) -> Result<String> {
        let mut output = String::new();
        Self::render_stats(view, &mut output);
        Self::render_controls(view, &mut output);

        output.push_str("<table>\n");
        Self::render_head(view, &mut output);
        output.push_str("<tbody id=\"package-table\">\n");
        match view.state.status_message() {
            Some(message) => Self::render_status(view, &message, &mut output),
            None => {
                for (index, row) in view.rows.iter().enumerate() {
                    Self::render_row(index, row, &mut output);
                }
            }
        }
        output.push_str("</tbody>\n</table>\n");
        Ok(output)
    }
}
