//! Route handlers.
//!
//! Thin adapters between HTTP and the configurator engine: decode the body,
//! call the engine, encode the result. No handler holds state.

use axum::{body::Bytes, extract::Path, response::Response, Json};
use serde_json::{json, Value};

use crate::configurator::{self, templates, ValidationResult};
use crate::http::response::{yaml, ApiError};
use crate::observability::metrics;

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// `POST /generate` with a JSON parameter object; responds with YAML.
pub async fn generate(body: Bytes) -> Result<Response, ApiError> {
    let params = match parse_json(&body)? {
        Some(params) if !is_empty_json(&params) => params,
        _ => {
            metrics::record_generation("bad_params");
            return Err(ApiError::BadRequest("Request body is required".into()));
        }
    };

    match configurator::generator::generate_from_json(params) {
        Ok(document) => {
            metrics::record_generation("ok");
            Ok(yaml(document))
        }
        Err(e) => {
            let outcome = match &e {
                configurator::GenerateError::Params(_) => "bad_params",
                configurator::GenerateError::Invalid(_) => "invalid",
                configurator::GenerateError::Serialize(_) => "error",
            };
            metrics::record_generation(outcome);
            tracing::info!(error = %e, "Generation rejected");
            Err(e.into())
        }
    }
}

/// `POST /validate` with `{"config": "<yaml text>"}`.
///
/// YAML that fails to parse is a validation failure, answered with 200.
pub async fn validate(body: Bytes) -> Result<Json<ValidationResult>, ApiError> {
    let source = parse_json(&body)?
        .as_ref()
        .and_then(|v| v.get("config"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| ApiError::BadRequest("Request must include \"config\" field".into()))?;

    let result = configurator::validate_yaml(&source);
    metrics::record_validation(result.valid);
    tracing::debug!(
        valid = result.valid,
        errors = result.errors.len(),
        "Configuration validated"
    );
    Ok(Json(result))
}

/// `GET /templates`
pub async fn list_templates() -> Json<Value> {
    Json(templates::catalog_json())
}

/// `GET /templates/{name}`; responds with the generated YAML document.
pub async fn get_template(Path(name): Path<String>) -> Result<Response, ApiError> {
    match templates::render(&name) {
        Ok(document) => {
            metrics::record_template_render("ok");
            Ok(yaml(document))
        }
        Err(e) => {
            let outcome = match &e {
                templates::TemplateError::NotFound(_) => "not_found",
                templates::TemplateError::Generate(_) => "error",
            };
            metrics::record_template_render(outcome);
            Err(e.into())
        }
    }
}

/// Parse a JSON body; an empty body yields `None`.
fn parse_json(body: &Bytes) -> Result<Option<Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))
}

fn is_empty_json(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Number(_) => false,
    }
}
