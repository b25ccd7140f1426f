//! Error message formatting with actionable suggestions.
//!
//! Decode errors that carry a position also get a `--> file:line:column`
//! pointer.

use std::error::Error;

use dotconf_core::error::ConfigError;

use super::colors::ColorSupport;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    pub fn new() -> Self {
        Self::with_colors(ColorSupport::detect())
    }

    pub fn with_colors(colors: ColorSupport) -> Self {
        Self { colors }
    }

    /// Format an error with its location, suggestion and causes
    pub fn format_error(&self, error: &ConfigError) -> String {
        let message = error.to_string();
        let mut output = format!("{}: {}", self.colors.red("error"), message);

        if let ConfigError::Decode { path, source, .. } = error {
            if let Some(location) = source.location {
                output.push('\n');
                output.push_str(&self.format_location(path.as_str(), location.line, location.column));
            }
        }

        if let Some(suggestion) = error.suggestion() {
            output.push_str(&format!("\n{}: {}", self.colors.dim("help"), suggestion));
        }
        if let Some(flag) = flag_hint(error) {
            output.push_str(&format!("\n{}: {}", self.colors.dim("help"), flag));
        }

        // Causes already rendered into the message are not repeated
        let mut source = error.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                output.push_str(&format!("\n{}: {}", self.colors.dim("caused by"), text));
            }
            source = cause.source();
        }

        output
    }

    fn format_location(&self, file: &str, line: usize, column: usize) -> String {
        format!("  {} {}:{}:{}", self.colors.cyan("-->"), file, line, column)
    }
}

/// Command-line flags that address the error
fn flag_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::FileNotFound { .. } => Some("pass --env-prefix PREFIX to read values from the environment"),
        ConfigError::Decode { .. } => Some("pass --format json|yaml|toml to choose the parser"),
        _ => None,
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}
