//! Plugin schema registry.
//!
//! Static table of every plugin type the router understands, with the
//! configuration fields each one requires or may carry. Optional fields are
//! informational; only the shared value rules in `plugin.rs` check them.

/// Required and optional configuration fields of one plugin type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginSchema {
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

impl PluginSchema {
    /// Schema with no fields, returned for unknown plugin types.
    pub const EMPTY: PluginSchema = PluginSchema {
        required: &[],
        optional: &[],
    };
}

const REGISTRY: &[(&str, PluginSchema)] = &[
    (
        "semantic-cache",
        PluginSchema {
            required: &["enabled"],
            optional: &["similarity_threshold", "ttl_seconds"],
        },
    ),
    (
        "jailbreak",
        PluginSchema {
            required: &["enabled"],
            optional: &["threshold"],
        },
    ),
    (
        "pii",
        PluginSchema {
            required: &["enabled"],
            optional: &["threshold", "pii_types_allowed"],
        },
    ),
    (
        "system_prompt",
        PluginSchema {
            required: &["enabled"],
            optional: &["system_prompt", "mode"],
        },
    ),
    (
        "header_mutation",
        PluginSchema {
            required: &[],
            optional: &["add", "update", "delete"],
        },
    ),
    (
        "hallucination",
        PluginSchema {
            required: &["enabled"],
            optional: &["use_nli", "hallucination_action"],
        },
    ),
    (
        "router_replay",
        PluginSchema {
            required: &["enabled"],
            optional: &[
                "max_records",
                "capture_request_body",
                "capture_response_body",
                "max_body_bytes",
            ],
        },
    ),
];

/// Supported plugin type names, in declaration order.
pub fn supported_types() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(name, _)| *name)
}

/// Returns true if `plugin_type` names a registered plugin.
pub fn is_supported(plugin_type: &str) -> bool {
    REGISTRY.iter().any(|(name, _)| *name == plugin_type)
}

/// Look up the schema for a plugin type.
///
/// Unknown types get [`PluginSchema::EMPTY`]; callers reject them before
/// reaching this point.
pub fn schema_for(plugin_type: &str) -> PluginSchema {
    REGISTRY
        .iter()
        .find(|(name, _)| *name == plugin_type)
        .map(|(_, schema)| *schema)
        .unwrap_or(PluginSchema::EMPTY)
}
