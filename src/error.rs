//! Error types for nodebake

use thiserror::Error;

/// Main error type for nodebake operations
///
/// Parameter derivation and outbound command synthesis never fail; these
/// variants cover the surfaces around them (loading inputs, rendering and
/// cluster reconciliation).
#[derive(Error, Debug)]
pub enum NodeBakeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Script catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Failed to parse manifest for '{name}': {message}")]
    Manifest { name: String, message: String },

    #[error("Unable to {operation} '{name}': {message}")]
    Reconcile {
        operation: String,
        name: String,
        message: String,
    },
}

impl NodeBakeError {
    /// Create a manifest parse error
    pub fn manifest(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Manifest {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a reconcile error for a cluster operation
    pub fn reconcile(
        operation: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Reconcile {
            operation: operation.into(),
            name: name.into(),
            message: message.into(),
        }
    }
}
