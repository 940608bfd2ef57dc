//! Health/metrics server configuration from TOML (`[http]` section)

use super::validation::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHttpConfig {
    /// Serve `/health` and `/metrics`
    pub enabled: bool,
    /// Listen address
    pub bind: String,
}

impl Default for FileHttpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind: "0.0.0.0:8000".to_string(),
        }
    }
}

impl FileHttpConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind.trim().parse()
    }

    pub(crate) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.enabled && self.bind_addr().is_err() {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::InvalidEnumValue {
                    field: "http.bind".to_string(),
                    value: self.bind.clone(),
                    valid_values: vec!["<ip>:<port>".to_string()],
                },
                message: format!("http.bind: '{}' is not a socket address", self.bind),
            });
        }
        issues
    }
}
