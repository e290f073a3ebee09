//! Validation of a single plugin entry.
//!
//! # Check Order
//! ```text
//! type present?           ─ no → stop
//! type registered?        ─ no → stop
//! configuration present?  ─ no → stop
//! configuration a mapping? ─ no → stop
//! required fields, enabled, threshold, ttl_seconds, max_records, mode
//! ```
//!
//! The value rules after the blocking checks apply to any plugin carrying the
//! field name, whatever its type.

use serde_yaml::{Mapping, Value};

use crate::configurator::document::display_value;
use crate::configurator::registry;

const MODES: &[&str] = &["replace", "insert"];

/// Validate one plugin entry, returning its defects in check order.
pub fn validate_plugin(plugin: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(type_value) = plugin.get("type") else {
        errors.push("Plugin missing 'type' field".to_string());
        return errors;
    };

    let plugin_type = match type_value.as_str() {
        Some(t) if registry::is_supported(t) => t,
        _ => {
            errors.push(format!(
                "Unsupported plugin type: {}",
                display_value(type_value)
            ));
            return errors;
        }
    };

    let Some(configuration) = plugin.get("configuration") else {
        errors.push(format!(
            "Plugin '{}' missing 'configuration' field",
            plugin_type
        ));
        return errors;
    };

    let Some(config) = configuration.as_mapping() else {
        errors.push(format!(
            "Plugin '{}': 'configuration' must be a mapping",
            plugin_type
        ));
        return errors;
    };

    for field in registry::schema_for(plugin_type).required {
        if !config.contains_key(*field) {
            errors.push(format!(
                "Plugin '{}' missing required field: {}",
                plugin_type, field
            ));
        }
    }

    check_values(plugin_type, config, &mut errors);
    errors
}

fn check_values(plugin_type: &str, config: &Mapping, errors: &mut Vec<String>) {
    if let Some(enabled) = config.get("enabled") {
        if !enabled.is_bool() {
            errors.push(format!("Plugin '{}': 'enabled' must be a boolean", plugin_type));
        }
    }

    // `threshold` wins over `similarity_threshold` when both keys are present.
    if let Some(threshold) = config
        .get("threshold")
        .or_else(|| config.get("similarity_threshold"))
    {
        if !is_unit_interval(threshold) {
            errors.push(format!(
                "Plugin '{}': threshold must be between 0.0 and 1.0",
                plugin_type
            ));
        }
    }

    if let Some(ttl) = config.get("ttl_seconds") {
        if !integer(ttl).is_some_and(|n| n >= 0) {
            errors.push(format!(
                "Plugin '{}': ttl_seconds must be a non-negative integer",
                plugin_type
            ));
        }
    }

    if let Some(max_records) = config.get("max_records") {
        if !integer(max_records).is_some_and(|n| n > 0) {
            errors.push(format!(
                "Plugin '{}': max_records must be a positive integer",
                plugin_type
            ));
        }
    }

    if let Some(mode) = config.get("mode") {
        if !mode.as_str().is_some_and(|m| MODES.contains(&m)) {
            errors.push(format!(
                "Plugin '{}': mode must be 'replace' or 'insert'",
                plugin_type
            ));
        }
    }
}

/// Numeric value within the closed interval [0.0, 1.0]. NaN fails.
fn is_unit_interval(value: &Value) -> bool {
    value
        .as_f64()
        .is_some_and(|t| (0.0..=1.0).contains(&t))
}

/// Integer value widened to i128 so u64 values above i64::MAX still compare.
pub(crate) fn integer(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) if n.is_i64() => n.as_i64().map(i128::from),
        Value::Number(n) if n.is_u64() => n.as_u64().map(i128::from),
        _ => None,
    }
}
