use std::fmt;
use std::path::PathBuf;

/// Where a record set is read from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceLocation {
    Url(String),
    File(PathBuf),
}

impl SourceLocation {
    /// `http://` and `https://` arguments are URLs, anything else a file path
    pub fn parse(argument: &str) -> Self {
        let trimmed = argument.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            SourceLocation::Url(trimmed.to_string())
        } else {
            SourceLocation::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Url(url) => f.write_str(url),
            SourceLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// DataSource - One selectable data set (an ecosystem tab)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataSource {
    /// Short identifier, e.g. `php`
    pub name: String,
    /// Human-readable label, e.g. `PHP`
    pub label: String,
    pub location: SourceLocation,
    /// Fallback package page, `{name}` is replaced by the package name
    pub package_url_template: Option<String>,
}

impl DataSource {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            location,
            package_url_template: None,
        }
    }

    pub fn with_package_url_template(mut self, template: Option<String>) -> Self {
        self.package_url_template = template;
        self
    }

    /// Ad hoc source from a `--source` argument
    pub fn from_argument(argument: &str) -> Self {
        let location = SourceLocation::parse(argument);
        let label = location.to_string();
        Self::new("custom", label, location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url() {
        assert_eq!(
            SourceLocation::parse("https://example.com/php.json"),
            SourceLocation::Url("https://example.com/php.json".to_string())
        );
        assert_eq!(
            SourceLocation::parse(" HTTP://example.com/a.json "),
            SourceLocation::Url("HTTP://example.com/a.json".to_string())
        );
    }

    #[test]
    fn test_parse_file() {
        assert_eq!(
            SourceLocation::parse("data/php-packages.json"),
            SourceLocation::File(PathBuf::from("data/php-packages.json"))
        );
    }

    #[test]
    fn test_from_argument_uses_location_as_label() {
        let source = DataSource::from_argument("data/php.json");
        assert_eq!(source.name, "custom");
        assert_eq!(source.label, "data/php.json");
        assert!(source.package_url_template.is_none());
    }
}
