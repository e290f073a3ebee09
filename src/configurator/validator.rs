//! Whole-document validation.
//!
//! # Responsibilities
//! - Parse YAML source text, turning parser failures into a single defect
//! - Check top-level shape: version, listeners, decisions
//! - Check each listener's port and endpoints
//! - Delegate plugin entries to `plugin.rs`, prefixing their defects with the
//!   decision index
//!
//! # Design Decisions
//! - Indices in messages are zero-based positions in the document
//! - A missing or mistyped container skips its nested checks only
//! - No cross-reference or uniqueness checks between decisions and endpoints

use serde_yaml::Value;

use crate::configurator::document::ValidationResult;
use crate::configurator::plugin::{integer, validate_plugin};

/// Parse `source` as YAML and validate the resulting document.
///
/// `<<` merge keys are resolved before validation.
pub fn validate_yaml(source: &str) -> ValidationResult {
    match parse(source) {
        Ok(document) => validate_document(&document),
        Err(e) => {
            tracing::debug!(error = %e, "Configuration is not valid YAML");
            ValidationResult::from_errors(vec![format!("Invalid YAML: {}", e)])
        }
    }
}

fn parse(source: &str) -> Result<Value, serde_yaml::Error> {
    let mut document: Value = serde_yaml::from_str(source)?;
    document.apply_merge()?;
    Ok(document)
}

/// Validate a parsed document.
///
/// A root that is not a mapping is treated as a mapping with no keys.
pub fn validate_document(document: &Value) -> ValidationResult {
    let mut errors = Vec::new();

    if document.get("version").is_none() {
        errors.push("Configuration missing 'version' field".to_string());
    }

    match document.get("listeners") {
        None => errors.push("Configuration missing 'listeners' field".to_string()),
        Some(listeners) => match listeners.as_sequence() {
            Some(listeners) => {
                for (i, listener) in listeners.iter().enumerate() {
                    check_listener(i, listener, &mut errors);
                }
            }
            None => errors.push("'listeners' must be a list".to_string()),
        },
    }

    if let Some(decisions) = document.get("decisions") {
        match decisions.as_sequence() {
            Some(decisions) => {
                for (i, decision) in decisions.iter().enumerate() {
                    check_decision(i, decision, &mut errors);
                }
            }
            None => errors.push("'decisions' must be a list".to_string()),
        }
    }

    ValidationResult::from_errors(errors)
}

fn check_listener(i: usize, listener: &Value, errors: &mut Vec<String>) {
    match listener.get("port") {
        None => errors.push(format!("Listener {} missing 'port' field", i)),
        Some(port) => {
            if !integer(port).is_some_and(|p| p > 0) {
                errors.push(format!("Listener {}: port must be a positive integer", i));
            }
        }
    }

    let Some(endpoints) = listener.get("endpoints") else {
        return;
    };
    let Some(endpoints) = endpoints.as_sequence() else {
        errors.push(format!("Listener {}: 'endpoints' must be a list", i));
        return;
    };

    for (j, endpoint) in endpoints.iter().enumerate() {
        if endpoint.get("name").is_none() {
            errors.push(format!("Listener {}, endpoint {} missing 'name' field", i, j));
        }
        if endpoint.get("url").is_none() {
            errors.push(format!("Listener {}, endpoint {} missing 'url' field", i, j));
        }
    }
}

fn check_decision(i: usize, decision: &Value, errors: &mut Vec<String>) {
    if decision.get("name").is_none() {
        errors.push(format!("Decision {} missing 'name' field", i));
    }
    if decision.get("endpoint").is_none() {
        errors.push(format!("Decision {} missing 'endpoint' field", i));
    }

    let Some(plugins) = decision.get("plugins") else {
        return;
    };
    let Some(plugins) = plugins.as_sequence() else {
        errors.push(format!("Decision {}: 'plugins' must be a list", i));
        return;
    };

    for plugin in plugins {
        errors.extend(
            validate_plugin(plugin)
                .into_iter()
                .map(|e| format!("Decision {}: {}", i, e)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
version: "1.0"
listeners:
  - port: 8888
    endpoints:
      - name: default
        url: http://localhost:8000/v1/chat/completions
decisions:
  - name: default_route
    endpoint: default
    plugins:
      - type: semantic-cache
        configuration:
          enabled: true
          similarity_threshold: 0.92
          ttl_seconds: 3600
"#;

    #[test]
    fn test_valid_document() {
        let result = validate_yaml(VALID);
        assert_eq!(result, ValidationResult::from_errors(vec![]));
        assert!(result.valid);
    }

    #[test]
    fn test_invalid_yaml() {
        let result = validate_yaml("version: [1.0\nlisteners: {");
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Invalid YAML: "));
    }

    #[test]
    fn test_null_document_reports_missing_sections() {
        let result = validate_yaml("~\n");
        assert_eq!(
            result.errors,
            vec![
                "Configuration missing 'version' field",
                "Configuration missing 'listeners' field",
            ]
        );
    }

    #[test]
    fn test_scalar_root_treated_as_empty() {
        let result = validate_yaml("just a string");
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_missing_listeners_skips_endpoint_checks() {
        let result = validate_yaml("version: '1.0'\ndecisions: []\n");
        assert_eq!(result.errors, vec!["Configuration missing 'listeners' field"]);
    }

    #[test]
    fn test_listener_defects() {
        let source = r#"
version: "1.0"
listeners:
  - endpoints:
      - url: http://a
      - name: b
  - port: -1
  - port: "8080"
  - port: 0
    endpoints: nope
"#;
        let result = validate_yaml(source);
        assert_eq!(
            result.errors,
            vec![
                "Listener 0 missing 'port' field",
                "Listener 0, endpoint 0 missing 'name' field",
                "Listener 0, endpoint 1 missing 'url' field",
                "Listener 1: port must be a positive integer",
                "Listener 2: port must be a positive integer",
                "Listener 3: port must be a positive integer",
                "Listener 3: 'endpoints' must be a list",
            ]
        );
    }

    #[test]
    fn test_listeners_must_be_list() {
        let result = validate_yaml("version: '1.0'\nlisteners: {port: 80}\n");
        assert_eq!(result.errors, vec!["'listeners' must be a list"]);
    }

    #[test]
    fn test_decision_defects_are_prefixed() {
        let source = r#"
version: "1.0"
listeners:
  - port: 8888
decisions:
  - endpoint: default
  - name: second
    plugins:
      - configuration: {enabled: true}
      - type: jailbreak
        configuration: {enabled: true, threshold: 1.5}
  - name: third
    endpoint: default
    plugins: jailbreak
"#;
        let result = validate_yaml(source);
        assert_eq!(
            result.errors,
            vec![
                "Decision 0 missing 'name' field",
                "Decision 1 missing 'endpoint' field",
                "Decision 1: Plugin missing 'type' field",
                "Decision 1: Plugin 'jailbreak': threshold must be between 0.0 and 1.0",
                "Decision 2: 'plugins' must be a list",
            ]
        );
    }

    #[test]
    fn test_dangling_endpoint_reference_allowed() {
        let source = r#"
version: "1.0"
listeners:
  - port: 8888
    endpoints: [{name: a, url: u}, {name: a, url: v}]
decisions:
  - name: r
    endpoint: does-not-exist
"#;
        assert!(validate_yaml(source).valid);
    }

    #[test]
    fn test_sections_accumulate_independently() {
        let source = "listeners:\n  - {}\ndecisions:\n  - {}\n";
        let result = validate_yaml(source);
        assert_eq!(
            result.errors,
            vec![
                "Configuration missing 'version' field",
                "Listener 0 missing 'port' field",
                "Decision 0 missing 'name' field",
                "Decision 0 missing 'endpoint' field",
            ]
        );
    }

    #[test]
    fn test_merge_keys_are_resolved() {
        let source = r#"
version: "1.0"
base: &base
  port: 8888
listeners:
  - <<: *base
    endpoints:
      - name: default
        url: http://localhost:8000/v1/chat/completions
"#;
        let result = validate_yaml(source);
        assert!(result.valid, "{:?}", result.errors);
    }

    #[test]
    fn test_bad_merge_value_is_invalid_yaml() {
        let result = validate_yaml("version: '1.0'\nlisteners:\n  - <<: 5\n");
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Invalid YAML: "));
    }

    #[test]
    fn test_yes_is_a_string_not_a_boolean() {
        let source = r#"
version: "1.0"
listeners:
  - port: 8888
decisions:
  - name: r
    endpoint: default
    plugins:
      - type: jailbreak
        configuration: {enabled: yes}
"#;
        assert_eq!(
            validate_yaml(source).errors,
            vec!["Decision 0: Plugin 'jailbreak': 'enabled' must be a boolean"]
        );
    }

    #[test]
    fn test_duplicate_key_is_invalid_yaml() {
        let result = validate_yaml("version: '1.0'\nversion: '2.0'\nlisteners: []\n");
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Invalid YAML: "));
        assert!(result.errors[0].contains("duplicate"));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let source = "version: 1\nlisteners: [{port: x}]\n";
        assert_eq!(validate_yaml(source), validate_yaml(source));
    }
}
