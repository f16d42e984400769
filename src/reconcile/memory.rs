//! In-memory cluster for testing and dry runs
//!
//! Behaves like the API server for the calls reconciliation makes: names are
//! unique, create assigns a uid, update requires the object to exist.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{ClusterClient, ClusterError, RuntimeClass};

/// In-memory runtime class store
#[derive(Debug, Default)]
pub struct InMemoryCluster {
    classes: Mutex<BTreeMap<String, RuntimeClass>>,
    creates: AtomicUsize,
    updates: AtomicUsize,
    list_error: Option<String>,
}

impl InMemoryCluster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing object
    pub fn with_runtime_class(mut self, mut class: RuntimeClass) -> Self {
        class
            .metadata
            .uid
            .get_or_insert_with(|| Uuid::new_v4().to_string());
        self.classes
            .get_mut()
            .insert(class.metadata.name.clone(), class);
        self
    }

    /// Configure list calls to fail
    pub fn with_list_error(mut self, error: &str) -> Self {
        self.list_error = Some(error.to_string());
        self
    }

    pub async fn get(&self, name: &str) -> Option<RuntimeClass> {
        self.classes.lock().await.get(name).cloned()
    }

    pub async fn len(&self) -> usize {
        self.classes.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.classes.lock().await.is_empty()
    }

    /// Number of successful create calls
    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    /// Number of successful update calls
    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClusterClient for InMemoryCluster {
    async fn list_runtime_classes(&self, name: &str) -> Result<Vec<RuntimeClass>, ClusterError> {
        if let Some(error) = &self.list_error {
            return Err(ClusterError::Api(error.clone()));
        }
        Ok(self.classes.lock().await.get(name).cloned().into_iter().collect())
    }

    async fn create_runtime_class(&self, class: &RuntimeClass) -> Result<RuntimeClass, ClusterError> {
        let mut classes = self.classes.lock().await;
        if classes.contains_key(class.name()) {
            return Err(ClusterError::AlreadyExists(class.name().to_string()));
        }

        let mut created = class.clone();
        created.metadata.uid = Some(Uuid::new_v4().to_string());
        classes.insert(created.name().to_string(), created.clone());
        self.creates.fetch_add(1, Ordering::SeqCst);
        Ok(created)
    }

    async fn update_runtime_class(&self, class: &RuntimeClass) -> Result<RuntimeClass, ClusterError> {
        let mut classes = self.classes.lock().await;
        let stored = classes
            .get_mut(class.name())
            .ok_or_else(|| ClusterError::NotFound(class.name().to_string()))?;

        let uid = stored.metadata.uid.clone();
        *stored = class.clone();
        stored.metadata.uid = uid;
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(stored.clone())
    }
}
