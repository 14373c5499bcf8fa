use serde::Deserialize;

/// One named intent: trigger phrases plus candidate reply templates.
///
/// Immutable after load. Registration order matters - it is the
/// classifier's tie-break order.
#[derive(Debug, Clone, Deserialize)]
pub struct IntentDefinition {
    /// Unique tag, e.g. `track_order`
    pub tag: String,
    /// Example trigger phrases
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Reply templates; empty for intents handled by an action or retrieval
    #[serde(default)]
    pub responses: Vec<String>,
}
