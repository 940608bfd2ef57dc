//! Persona attributes attached to a question.

use crate::core::error::DomainError;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Ordered `key → scalar` attributes describing who is asking (Value Object).
///
/// Insertion order is preserved from the wire so that the rendered
/// `"key: value"` clause is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Persona(IndexMap<String, Value>);

impl Persona {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and fixtures.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Reject non-scalar attribute values (arrays and objects).
    pub fn validate(&self) -> Result<(), DomainError> {
        match self
            .0
            .iter()
            .find(|(_, v)| matches!(v, Value::Array(_) | Value::Object(_)))
        {
            Some((key, _)) => Err(DomainError::InvalidEvent(format!(
                "persona attribute '{}' must be a scalar",
                key
            ))),
            None => Ok(()),
        }
    }

    /// Render as `"key: value"` pairs joined by a single space.
    ///
    /// Falsy values (null, `false`, zero, blank strings) are skipped. Returns `None` when no
    /// attribute survives, so callers can omit the persona clause entirely.
    pub fn render(&self) -> Option<String> {
        let parts: Vec<String> = self
            .0
            .iter()
            .filter_map(|(key, value)| render_scalar(value).map(|v| format!("{}: {}", key, v)))
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Bool(b) => b.then(|| "true".to_string()),
        Value::Number(n) => (n.as_f64() != Some(0.0)).then(|| n.to_string()),
        // Rejected by validate(); never rendered.
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Deserialize a persona that may be `null` on the wire.
pub(crate) fn deserialize_nullable<'de, D>(deserializer: D) -> Result<Persona, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Persona>::deserialize(deserializer)?.unwrap_or_default())
}
