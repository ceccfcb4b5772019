use crate::application::read_models::TableView;
use crate::shared::Result;

/// TableRenderer port for turning a table view into output text
///
/// Implementations only read the view; filtering, sorting and formatting
/// have already happened when it is built.
pub trait TableRenderer {
    /// Renders the view
    ///
    /// # Arguments
    /// * `view` - The display-ready table
    ///
    /// # Returns
    /// Rendered content as a string
    fn render(&self, view: &TableView) -> Result<String>;
}
