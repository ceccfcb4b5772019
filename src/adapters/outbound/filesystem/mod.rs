/// Filesystem adapters for file I/O operations
mod file_record_source;
mod file_writer;

pub use file_record_source::FileRecordSource;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
