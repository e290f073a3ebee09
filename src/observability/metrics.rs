//! Metrics collection and exposition.
//!
//! # Metrics
//! - `configurator_requests_total` (counter): requests by method, path, status
//! - `configurator_request_duration_seconds` (histogram): latency distribution
//! - `configurator_validations_total` (counter): validations by outcome
//! - `configurator_generations_total` (counter): generations by outcome
//! - `configurator_template_renders_total` (counter): template renders by outcome
//!
//! Recording is a no-op until a recorder is installed by [`init_metrics`].

use std::net::SocketAddr;
use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished HTTP request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    counter!("configurator_requests_total", &labels).increment(1);
    histogram!("configurator_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of one document validation.
pub fn record_validation(valid: bool) {
    let outcome = if valid { "valid" } else { "invalid" };
    counter!("configurator_validations_total", "outcome" => outcome).increment(1);
}

/// Record the outcome of one generation ("ok", "invalid", "bad_params", "error").
pub fn record_generation(outcome: &'static str) {
    counter!("configurator_generations_total", "outcome" => outcome).increment(1);
}

/// Record the outcome of one template render ("ok", "not_found", "error").
pub fn record_template_render(outcome: &'static str) {
    counter!("configurator_template_renders_total", "outcome" => outcome).increment(1);
}

/// Middleware recording request count and latency, labelled by route pattern.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(&method, &path, response.status().as_u16(), start);
    response
}
