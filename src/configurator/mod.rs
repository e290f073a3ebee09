//! Configuration validation and generation engine.
//!
//! # Data Flow
//! ```text
//! Generate:
//!     GenerateParams (JSON)
//!     → generator.rs (expand into listeners + decisions)
//!     → ConfigDocument::to_yaml()
//!     → validator.rs (self-check of the emitted YAML)
//!     → YAML text or defect list
//!
//! Validate:
//!     YAML source text
//!     → validator.rs (parse, walk listeners/endpoints/decisions)
//!     → plugin.rs (per-plugin checks against registry.rs)
//!     → ValidationResult
//! ```
//!
//! # Design Decisions
//! - Documents are walked as `serde_yaml::Value`, never deserialized into
//!   strict structs, so malformed input becomes defect strings instead of errors
//! - All defects are collected; siblings are checked even after a failure
//! - Registry and template catalog are immutable statics shared by all handlers
//! - Unknown plugin configuration fields are accepted

pub mod document;
pub mod generator;
pub mod plugin;
pub mod registry;
pub mod templates;
pub mod validator;

pub use document::{ConfigDocument, Decision, GenerateParams, Listener, ValidationResult};
pub use generator::{generate, generate_checked, GenerateError};
pub use plugin::validate_plugin;
pub use templates::{Template, TemplateError};
pub use validator::{validate_document, validate_yaml};
