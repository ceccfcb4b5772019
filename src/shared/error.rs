use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to tell a failed data load apart from
/// bad arguments and other application errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the table was rendered from loaded data
    Success = 0,
    /// The package data could not be loaded; the failure state was still rendered
    LoadFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (configuration, file I/O, unknown ecosystem, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::LoadFailed => write!(f, "Load Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for loading and browsing package catalogs.
///
/// Uses thiserror to derive Display and Error traits; every message carries
/// a hint the user can act on.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to load package data from {source_label}\nDetails: {details}\n\n💡 Hint: Check your network connection and the data source URL")]
    LoadFailed {
        source_label: String,
        details: String,
    },

    #[error("Data source {url} returned HTTP status {status}\n\n💡 Hint: Verify that the URL points to a published JSON file")]
    HttpStatus { url: String, status: u16 },

    #[error("Timed out after {seconds}s while loading {url}\n\n💡 Hint: Retry later or raise timeout_secs in the config file")]
    Timeout { url: String, seconds: u64 },

    #[error("Malformed package data from {source_label}\nDetails: {details}\n\n💡 Hint: The data source must return a JSON array of package objects")]
    MalformedPayload {
        source_label: String,
        details: String,
    },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Unknown ecosystem: {name}\n\n💡 Hint: Available ecosystems: {available}")]
    UnknownEcosystem { name: String, available: String },

    #[error("Unknown sort column: {column}\n\n💡 Hint: Sortable columns: {available}")]
    UnknownSortKey { column: String, available: String },

    #[error("Unknown sort preset: {token}\n\n💡 Hint: Available presets: {available}")]
    UnknownPreset { token: String, available: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::LoadFailed.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(format!("{}", ExitCode::LoadFailed), "Load Failed (1)");
        assert_eq!(
            format!("{}", ExitCode::InvalidArguments),
            "Invalid Arguments (2)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_load_failed_display() {
        let error = CatalogError::LoadFailed {
            source_label: "php".to_string(),
            details: "connection refused".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to load package data from php"));
        assert!(display.contains("connection refused"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_http_status_display() {
        let error = CatalogError::HttpStatus {
            url: "https://example.com/data.json".to_string(),
            status: 404,
        };
        let display = format!("{}", error);
        assert!(display.contains("https://example.com/data.json"));
        assert!(display.contains("404"));
    }

    #[test]
    fn test_timeout_display() {
        let error = CatalogError::Timeout {
            url: "https://example.com/data.json".to_string(),
            seconds: 15,
        };
        let display = format!("{}", error);
        assert!(display.contains("Timed out after 15s"));
        assert!(display.contains("timeout_secs"));
    }

    #[test]
    fn test_malformed_payload_display() {
        let error = CatalogError::MalformedPayload {
            source_label: "data.json".to_string(),
            details: "expected an array".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Malformed package data from data.json"));
        assert!(display.contains("JSON array"));
    }

    #[test]
    fn test_file_write_error_display() {
        let error = CatalogError::FileWriteError {
            path: PathBuf::from("/test/output.html"),
            details: "Permission denied".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to write to file"));
        assert!(display.contains("/test/output.html"));
        assert!(display.contains("Permission denied"));
    }

    #[test]
    fn test_unknown_ecosystem_display() {
        let error = CatalogError::UnknownEcosystem {
            name: "cobol".to_string(),
            available: "php".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Unknown ecosystem: cobol"));
        assert!(display.contains("Available ecosystems: php"));
    }

    #[test]
    fn test_security_error_display() {
        let error = CatalogError::SecurityError {
            path: PathBuf::from("/test/symlink"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Use a regular file instead".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("/test/symlink"));
        assert!(display.contains("Use a regular file instead"));
    }
}
