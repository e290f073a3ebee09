//! Semantic router configuration validator and generator.

pub mod config;
pub mod configurator;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use configurator::{generate, generate_checked, validate_document, validate_yaml, ValidationResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
