//! Configuration generation.
//!
//! # Responsibilities
//! - Fill defaults for version, port and endpoints
//! - Build exactly one listener carrying every endpoint
//! - Derive one `{name}_route` decision per endpoint, in order
//! - Attach the supplied plugin list to every decision
//! - Self-check the serialized output before handing it to a caller
//!
//! # Design Decisions
//! - `generate` performs no validation; `generate_checked` is the only
//!   path callers should surface
//! - Plugins are fanned out to all decisions, never partitioned

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::configurator::document::{
    display_value, is_scalar, ConfigDocument, Decision, GenerateParams, Listener,
};
use crate::configurator::validator::validate_yaml;

pub const DEFAULT_VERSION: &str = "1.0";
pub const DEFAULT_PORT: u16 = 8888;
pub const DEFAULT_ENDPOINT_NAME: &str = "default";
pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:8000/v1/chat/completions";

/// Errors produced while generating a configuration.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Invalid generation parameters: {0}")]
    Params(#[from] serde_json::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Generated configuration is invalid: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Expand `params` into a full document. Deterministic for equal input.
pub fn generate(params: &GenerateParams) -> ConfigDocument {
    let version = params
        .version
        .clone()
        .unwrap_or_else(|| Value::from(DEFAULT_VERSION));
    let port = params
        .port
        .clone()
        .unwrap_or_else(|| Value::from(DEFAULT_PORT));

    let endpoints = match &params.endpoints {
        Some(endpoints) if !endpoints.is_empty() => endpoints.clone(),
        _ => vec![default_endpoint()],
    };

    let plugins = params.plugins.as_ref().filter(|p| !p.is_empty());

    let decisions = endpoints
        .iter()
        .map(|endpoint| {
            let name = endpoint.get("name").filter(|n| is_scalar(n));
            Decision {
                name: name.map(|n| format!("{}_route", display_value(n))),
                endpoint: name.cloned(),
                plugins: plugins.cloned(),
            }
        })
        .collect();

    ConfigDocument {
        version,
        listeners: vec![Listener { port, endpoints }],
        decisions,
    }
}

/// Generate, serialize and validate the result.
///
/// Returns the YAML text only when the document passes validation;
/// otherwise the defect list is returned in [`GenerateError::Invalid`].
pub fn generate_checked(params: &GenerateParams) -> Result<String, GenerateError> {
    let document = generate(params);
    let yaml = document.to_yaml()?;

    let result = validate_yaml(&yaml);
    if !result.valid {
        tracing::warn!(
            errors = result.errors.len(),
            "Generated configuration failed validation"
        );
        return Err(GenerateError::Invalid(result.errors));
    }

    tracing::debug!(
        decisions = document.decisions.len(),
        bytes = yaml.len(),
        "Configuration generated"
    );
    Ok(yaml)
}

/// Deserialize a JSON parameter bag and run [`generate_checked`].
pub fn generate_from_json(params: serde_json::Value) -> Result<String, GenerateError> {
    let params: GenerateParams = serde_json::from_value(params)?;
    generate_checked(&params)
}

fn default_endpoint() -> Value {
    let mut endpoint = Mapping::new();
    endpoint.insert("name".into(), DEFAULT_ENDPOINT_NAME.into());
    endpoint.insert("url".into(), DEFAULT_ENDPOINT_URL.into());
    Value::Mapping(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: serde_json::Value) -> GenerateParams {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_params_use_defaults() {
        let document = generate(&GenerateParams::default());

        assert_eq!(document.version, Value::from("1.0"));
        assert_eq!(document.listeners.len(), 1);
        assert_eq!(document.listeners[0].port, Value::from(8888));
        assert_eq!(document.listeners[0].endpoints, vec![default_endpoint()]);
        assert_eq!(
            document.decisions,
            vec![Decision {
                name: Some("default_route".into()),
                endpoint: Some(Value::from("default")),
                plugins: None,
            }]
        );
    }

    #[test]
    fn test_empty_params_round_trip_valid() {
        let yaml = generate_checked(&GenerateParams::default()).unwrap();
        let result = validate_yaml(&yaml);
        assert!(result.valid, "{:?}", result.errors);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_yaml_key_order_is_stable() {
        let yaml = generate(&GenerateParams::default()).to_yaml().unwrap();
        let expected = "\
version: '1.0'
listeners:
- port: 8888
  endpoints:
  - name: default
    url: http://localhost:8000/v1/chat/completions
decisions:
- name: default_route
  endpoint: default
";
        assert_eq!(yaml, expected);
    }

    #[test]
    fn test_empty_endpoint_list_falls_back_to_default() {
        let document = generate(&params(json!({"endpoints": [], "port": 9000})));
        assert_eq!(document.listeners[0].port, Value::from(9000));
        assert_eq!(document.decisions[0].name.as_deref(), Some("default_route"));
    }

    #[test]
    fn test_plugins_fan_out_to_every_decision() {
        let document = generate(&params(json!({
            "endpoints": [{"name": "a", "url": "u1"}, {"name": "b", "url": "u2"}],
            "plugins": [{"type": "semantic-cache", "configuration": {"enabled": true}}]
        })));

        assert_eq!(document.decisions.len(), 2);
        assert_eq!(document.decisions[0].name.as_deref(), Some("a_route"));
        assert_eq!(document.decisions[1].name.as_deref(), Some("b_route"));
        assert_eq!(document.decisions[1].endpoint, Some(Value::from("b")));
        assert!(document.decisions[0].plugins.is_some());
        assert_eq!(document.decisions[0].plugins, document.decisions[1].plugins);
    }

    #[test]
    fn test_empty_plugin_list_omitted() {
        let document = generate(&params(json!({"plugins": []})));
        assert!(document.decisions[0].plugins.is_none());
        assert!(!document.to_yaml().unwrap().contains("plugins"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let p = params(json!({
            "version": "2.0",
            "endpoints": [{"name": "gpt4", "url": "http://x"}],
            "plugins": [{"type": "pii", "configuration": {"enabled": true, "threshold": 0.7}}]
        }));
        assert_eq!(
            generate(&p).to_yaml().unwrap(),
            generate(&p).to_yaml().unwrap()
        );
    }

    #[test]
    fn test_invalid_plugin_fails_self_check() {
        let err = generate_checked(&params(json!({
            "plugins": [{"type": "jailbreak", "configuration": {"enabled": true, "threshold": 1.5}}]
        })))
        .unwrap_err();

        match err {
            GenerateError::Invalid(errors) => assert_eq!(
                errors,
                vec!["Decision 0: Plugin 'jailbreak': threshold must be between 0.0 and 1.0"]
            ),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_nameless_endpoint_fails_self_check() {
        let err = generate_checked(&params(json!({"endpoints": [{"url": "http://x"}]})))
            .unwrap_err();

        match err {
            GenerateError::Invalid(errors) => assert_eq!(
                errors,
                vec![
                    "Listener 0, endpoint 0 missing 'name' field",
                    "Decision 0 missing 'name' field",
                    "Decision 0 missing 'endpoint' field",
                ]
            ),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_bad_port_fails_self_check() {
        let err = generate_checked(&params(json!({"port": "eighty"}))).unwrap_err();
        assert!(matches!(err, GenerateError::Invalid(ref e) if e == &vec![
            "Listener 0: port must be a positive integer".to_string()
        ]));
    }

    #[test]
    fn test_null_port_fails_self_check() {
        let err = generate_from_json(json!({"port": null})).unwrap_err();
        assert!(matches!(err, GenerateError::Invalid(ref e) if e == &vec![
            "Listener 0: port must be a positive integer".to_string()
        ]));
    }

    #[test]
    fn test_null_version_passes_through() {
        let yaml = generate_from_json(json!({"version": null})).unwrap();
        assert!(yaml.starts_with("version: null\n"));
    }

    #[test]
    fn test_malformed_params_rejected() {
        let err = generate_from_json(json!({"endpoints": "not-a-list"})).unwrap_err();
        assert!(matches!(err, GenerateError::Params(_)));
    }
}
