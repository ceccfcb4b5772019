/// Data Transfer Objects for the application layer
///
/// DTOs carry values between the CLI, the use cases and the adapters,
/// keeping the catalog domain free of I/O concerns.
mod data_source;
mod output_format;

pub use data_source::{DataSource, SourceLocation};
pub use output_format::OutputFormat;
