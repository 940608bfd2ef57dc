//! Structured configuration issues reported by `FileConfig::validate`.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the service cannot start with this configuration.
    Error,
    /// Non-fatal: the service starts but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A required string field is empty.
    EmptyValue { field: String },
    /// A duration or size field is zero.
    ZeroValue { field: String },
    /// A string field does not name a known variant.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A field is required by another setting but is not set.
    MissingValue { field: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub(crate) fn empty(field: &str) -> Self {
        Self {
            severity: Severity::Error,
            code: ConfigIssueCode::EmptyValue {
                field: field.to_string(),
            },
            message: format!("{}: value cannot be empty", field),
        }
    }

    pub(crate) fn zero(field: &str) -> Self {
        Self {
            severity: Severity::Error,
            code: ConfigIssueCode::ZeroValue {
                field: field.to_string(),
            },
            message: format!("{}: value cannot be 0", field),
        }
    }

    pub(crate) fn invalid_enum(
        severity: Severity,
        field: &str,
        value: &str,
        valid_values: &[&str],
        fallback: Option<&str>,
    ) -> Self {
        let message = match fallback {
            Some(fallback) => format!(
                "{}: unknown value '{}', falling back to '{}'",
                field, value, fallback
            ),
            None => format!(
                "{}: unknown value '{}' (expected one of: {})",
                field,
                value,
                valid_values.join(", ")
            ),
        };
        Self {
            severity,
            code: ConfigIssueCode::InvalidEnumValue {
                field: field.to_string(),
                value: value.to_string(),
                valid_values: valid_values.iter().map(|v| v.to_string()).collect(),
            },
            message,
        }
    }

    pub(crate) fn missing(field: &str, required_by: &str) -> Self {
        Self {
            severity: Severity::Error,
            code: ConfigIssueCode::MissingValue {
                field: field.to_string(),
            },
            message: format!("{}: required when {}", field, required_by),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "[{}] {}", level, self.message)
    }
}
