//! Logging configuration from TOML (`[logging]` section)

use super::validation::{ConfigIssue, Severity};
use serde::{Deserialize, Serialize};

const FORMATS: [&str; 2] = ["pretty", "json"];

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Default filter directive ("info", "debug", "answerer=trace", ...)
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl FileLoggingConfig {
    /// Parse the format, falling back to pretty output with a warning.
    pub fn parse_format(&self) -> (LogFormat, Vec<ConfigIssue>) {
        match self.format.parse::<LogFormat>() {
            Ok(format) => (format, vec![]),
            Err(_) => {
                let issue = ConfigIssue::invalid_enum(
                    Severity::Warning,
                    "logging.format",
                    &self.format,
                    &FORMATS,
                    Some("pretty"),
                );
                (LogFormat::default(), vec![issue])
            }
        }
    }
}
