use crate::adapters::outbound::formatters::{
    HtmlTableRenderer, MarkdownTableRenderer, TextTableRenderer,
};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::TableRenderer;

/// Rendering switches that are not part of the output format itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// ANSI colors in text output
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Factory for creating table renderers
///
/// This factory encapsulates the creation logic for the renderer implementations,
/// following the Factory Pattern. It belongs in the application layer as it orchestrates
/// the selection of infrastructure adapters based on application needs.
pub struct RendererFactory;

impl RendererFactory {
    /// Creates a renderer instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use ossatrisk::application::dto::OutputFormat;
    /// use ossatrisk::application::factories::{RenderOptions, RendererFactory};
    ///
    /// let renderer = RendererFactory::create(OutputFormat::Markdown, RenderOptions::default());
    /// ```
    pub fn create(format: OutputFormat, options: RenderOptions) -> Box<dyn TableRenderer> {
        match format {
            OutputFormat::Text => Box::new(TextTableRenderer::new().with_color(options.color)),
            OutputFormat::Markdown => Box::new(MarkdownTableRenderer::new()),
            OutputFormat::Html => Box::new(HtmlTableRenderer::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use ossatrisk::application::dto::OutputFormat;
    /// use ossatrisk::application::factories::RendererFactory;
    ///
    /// let message = RendererFactory::progress_message(OutputFormat::Html);
    /// assert_eq!(message, "📝 Rendering HTML table...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Text => "📝 Rendering text table...",
            OutputFormat::Markdown => "📝 Rendering Markdown table...",
            OutputFormat::Html => "📝 Rendering HTML table...",
        }
    }
}
