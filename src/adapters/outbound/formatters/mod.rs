/// Renderer adapters for the supported output formats
mod html_renderer;
mod markdown_renderer;
mod text_renderer;

pub use html_renderer::HtmlTableRenderer;
pub use markdown_renderer::MarkdownTableRenderer;
pub use text_renderer::TextTableRenderer;
