//! Runtime class reconciliation
//!
//! Ensures the cluster-level runtime classes that node pools depend on
//! exist. Objects are identified by name; every reconcile pass overwrites
//! the stored spec with the desired one, whether or not it drifted.

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::NodeBakeError;

/// Wasm shim backing the spin runtime class
pub const WASM_SPIN_RUNTIME: &str = "spin";

/// Errors reported by a cluster API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClusterError {
    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("API error: {0}")]
    Api(String),
}

/// Object metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// Node scheduling constraints of a runtime class
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Scheduling {
    pub node_selector: BTreeMap<String, String>,
}

/// `node.k8s.io/v1` RuntimeClass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeClass {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub handler: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduling: Option<Scheduling>,
}

impl RuntimeClass {
    /// Parse a runtime class manifest
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Replace everything but server-assigned identity with `desired`
    fn overwrite_with(&mut self, desired: &RuntimeClass) {
        let uid = self.metadata.uid.take();
        *self = desired.clone();
        self.metadata.uid = uid;
    }
}

/// Outcome of a create-or-update pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationResult {
    Created,
    Updated,
}

/// Minimal cluster API used for runtime class reconciliation
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Runtime classes whose `metadata.name` equals `name`
    async fn list_runtime_classes(&self, name: &str) -> Result<Vec<RuntimeClass>, ClusterError>;

    async fn create_runtime_class(&self, class: &RuntimeClass) -> Result<RuntimeClass, ClusterError>;

    async fn update_runtime_class(&self, class: &RuntimeClass) -> Result<RuntimeClass, ClusterError>;
}

/// Runtime class name for a wasm shim
pub fn wasm_runtime_class_name(shim: &str) -> String {
    format!("wasmtime-{shim}")
}

/// Manifest of the runtime class for a wasm shim
pub fn wasm_runtime_class_template(shim: &str) -> String {
    format!(
        r#"apiVersion: node.k8s.io/v1
kind: RuntimeClass
metadata:
  name: "wasmtime-{shim}"
handler: "{shim}"
scheduling:
  nodeSelector:
    "kubernetes.azure.com/wasmtime-{shim}": "true"
"#
    )
}

/// Make sure the wasm spin runtime class exists
pub async fn ensure_wasm_runtime_classes(client: &dyn ClusterClient) -> Result<(), NodeBakeError> {
    let class_name = wasm_runtime_class_name(WASM_SPIN_RUNTIME);

    let existing = client
        .list_runtime_classes(&class_name)
        .await
        .map_err(|e| NodeBakeError::reconcile("list runtime classes", &class_name, e.to_string()))?;

    if existing.is_empty() {
        let manifest = wasm_runtime_class_template(WASM_SPIN_RUNTIME);
        apply_runtime_class_manifest(client, &class_name, &manifest).await?;
    } else {
        debug!("Runtime class {} already present", class_name);
    }

    Ok(())
}

/// Parse `manifest` and create or update the runtime class it describes
pub async fn apply_runtime_class_manifest(
    client: &dyn ClusterClient,
    name: &str,
    manifest: &str,
) -> Result<OperationResult, NodeBakeError> {
    let desired =
        RuntimeClass::from_yaml(manifest).map_err(|e| NodeBakeError::manifest(name, e.to_string()))?;

    create_or_update(client, &desired).await
}

/// Create the runtime class, or overwrite the existing one's spec
pub async fn create_or_update(
    client: &dyn ClusterClient,
    desired: &RuntimeClass,
) -> Result<OperationResult, NodeBakeError> {
    let name = desired.name();

    let existing = client
        .list_runtime_classes(name)
        .await
        .map_err(|e| NodeBakeError::reconcile("list runtime classes", name, e.to_string()))?;

    if let Some(mut current) = existing.into_iter().next() {
        current.overwrite_with(desired);
        update(client, &current).await?;
        return Ok(OperationResult::Updated);
    }

    match client.create_runtime_class(desired).await {
        Ok(_) => {
            info!("Created runtime class {}", name);
            Ok(OperationResult::Created)
        }
        // Another caller created it between our list and create
        Err(ClusterError::AlreadyExists(_)) => {
            let current = client
                .list_runtime_classes(name)
                .await
                .map_err(|e| NodeBakeError::reconcile("list runtime classes", name, e.to_string()))?
                .into_iter()
                .next();
            let mut current = current.ok_or_else(|| {
                NodeBakeError::reconcile("create runtime class", name, "vanished after conflict")
            })?;
            current.overwrite_with(desired);
            update(client, &current).await?;
            Ok(OperationResult::Updated)
        }
        Err(e) => Err(NodeBakeError::reconcile(
            "create runtime class",
            name,
            e.to_string(),
        )),
    }
}

async fn update(client: &dyn ClusterClient, class: &RuntimeClass) -> Result<(), NodeBakeError> {
    client
        .update_runtime_class(class)
        .await
        .map_err(|e| NodeBakeError::reconcile("update runtime class", class.name(), e.to_string()))?;
    info!("Updated runtime class {}", class.name());
    Ok(())
}
