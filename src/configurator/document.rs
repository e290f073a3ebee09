//! Document, parameter and result types.
//!
//! Leaves that come from caller input stay as [`serde_yaml::Value`] so a
//! mistyped port or endpoint survives generation and is reported by the
//! validator instead of being rejected by serde.

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

/// Parameters accepted by the generator.
///
/// Every field is optional; [`crate::configurator::generate`] fills the gaps.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerateParams {
    /// Document version string (default: "1.0"). An explicit `null` is kept.
    #[serde(deserialize_with = "present")]
    pub version: Option<Value>,

    /// Listener port (default: 8888). An explicit `null` is kept.
    #[serde(deserialize_with = "present")]
    pub port: Option<Value>,

    /// Endpoint entries, passed through verbatim.
    pub endpoints: Option<Vec<Value>>,

    /// Plugin entries attached to every generated decision.
    pub plugins: Option<Vec<Value>>,
}

/// A key that is present yields `Some`, even when its value is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A generated router configuration document.
///
/// Field order is the serialization order: `version`, `listeners`, `decisions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigDocument {
    pub version: Value,
    pub listeners: Vec<Listener>,
    pub decisions: Vec<Decision>,
}

impl ConfigDocument {
    /// Serialize as block-style YAML with keys in declaration order.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// A network entry point hosting one or more endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listener {
    pub port: Value,
    pub endpoints: Vec<Value>,
}

/// A routing rule bound to one endpoint and an ordered plugin chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<Value>>,
}

/// Outcome of validating one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Build a result from collected defects; valid iff there are none.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Render a value for use inside a defect message or a derived name.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(_) => "<sequence>".to_string(),
        Value::Mapping(_) => "<mapping>".to_string(),
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, display_value(&tagged.value)),
    }
}

/// Returns true for values that can stand in for a name.
pub(crate) fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_))
}
