//! Inbound adapters: drive the browse session from user input.
mod interactive_shell;

pub use interactive_shell::{InteractiveShell, ShellCommand};
