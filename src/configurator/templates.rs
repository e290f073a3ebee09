//! Built-in starter templates.
//!
//! Each template is a parameter bag for the generator. The catalog is built
//! once on first use and never mutated.

use once_cell::sync::Lazy;
use serde_json::json;
use thiserror::Error;

use crate::configurator::generator::{generate_from_json, GenerateError};

/// A named starter parameter bag.
#[derive(Debug, Clone)]
pub struct Template {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub config: serde_json::Value,
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template \"{0}\" not found")]
    NotFound(String),

    #[error(transparent)]
    Generate(#[from] GenerateError),
}

static CATALOG: Lazy<Vec<Template>> = Lazy::new(|| {
    vec![
        Template {
            key: "basic",
            name: "Basic Configuration",
            description: "Simple single-endpoint configuration",
            config: json!({
                "version": "1.0",
                "port": 8888,
                "endpoints": [
                    {"name": "default", "url": "http://localhost:8000/v1/chat/completions"}
                ]
            }),
        },
        Template {
            key: "cached",
            name: "Cached Configuration",
            description: "Configuration with semantic caching enabled",
            config: json!({
                "version": "1.0",
                "port": 8888,
                "endpoints": [
                    {"name": "default", "url": "http://localhost:8000/v1/chat/completions"}
                ],
                "plugins": [
                    {
                        "type": "semantic-cache",
                        "configuration": {
                            "enabled": true,
                            "similarity_threshold": 0.92,
                            "ttl_seconds": 3600
                        }
                    }
                ]
            }),
        },
        Template {
            key: "secure",
            name: "Secure Configuration",
            description: "Configuration with security plugins enabled",
            config: json!({
                "version": "1.0",
                "port": 8888,
                "endpoints": [
                    {"name": "default", "url": "http://localhost:8000/v1/chat/completions"}
                ],
                "plugins": [
                    {"type": "jailbreak", "configuration": {"enabled": true, "threshold": 0.8}},
                    {"type": "pii", "configuration": {"enabled": true, "threshold": 0.7}}
                ]
            }),
        },
        Template {
            key: "multi-model",
            name: "Multi-Model Configuration",
            description: "Configuration with multiple model endpoints",
            config: json!({
                "version": "1.0",
                "port": 8888,
                "endpoints": [
                    {"name": "gpt4", "url": "http://localhost:8001/v1/chat/completions"},
                    {"name": "gpt3", "url": "http://localhost:8002/v1/chat/completions"}
                ],
                "plugins": [
                    {
                        "type": "semantic-cache",
                        "configuration": {"enabled": true, "similarity_threshold": 0.92}
                    }
                ]
            }),
        },
    ]
});

/// All templates in catalog order.
pub fn all() -> &'static [Template] {
    &CATALOG
}

/// Look up a template by key.
pub fn get(key: &str) -> Option<&'static Template> {
    CATALOG.iter().find(|t| t.key == key)
}

/// The catalog as a JSON object keyed by template key, in catalog order.
pub fn catalog_json() -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = CATALOG
        .iter()
        .map(|t| {
            let entry = json!({
                "name": t.name,
                "description": t.description,
                "config": t.config,
            });
            (t.key.to_string(), entry)
        })
        .collect();
    serde_json::Value::Object(map)
}

/// Generate the YAML document for a template.
pub fn render(key: &str) -> Result<String, TemplateError> {
    let template = get(key).ok_or_else(|| TemplateError::NotFound(key.to_string()))?;
    Ok(generate_from_json(template.config.clone())?)
}
