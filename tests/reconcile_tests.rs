//! Tests for runtime class reconciliation against the in-memory cluster

use std::sync::Arc;

use nodebake::NodeBakeError;
use nodebake::reconcile::memory::InMemoryCluster;
use nodebake::reconcile::{
    OperationResult, RuntimeClass, apply_runtime_class_manifest, create_or_update,
    ensure_wasm_runtime_classes, wasm_runtime_class_template,
};

fn spin_class() -> RuntimeClass {
    RuntimeClass::from_yaml(&wasm_runtime_class_template("spin")).unwrap()
}

#[tokio::test]
async fn test_ensure_creates_missing_class() {
    let cluster = InMemoryCluster::new();

    ensure_wasm_runtime_classes(&cluster).await.unwrap();

    let class = cluster.get("wasmtime-spin").await.unwrap();
    assert_eq!(class.handler, "spin");
    assert!(class.metadata.uid.is_some());
    assert_eq!(cluster.create_count(), 1);
    assert_eq!(cluster.update_count(), 0);
}

#[tokio::test]
async fn test_ensure_leaves_existing_class() {
    let mut existing = spin_class();
    existing.handler = "custom".to_string();
    let cluster = InMemoryCluster::new().with_runtime_class(existing);

    ensure_wasm_runtime_classes(&cluster).await.unwrap();

    assert_eq!(cluster.get("wasmtime-spin").await.unwrap().handler, "custom");
    assert_eq!(cluster.create_count(), 0);
    assert_eq!(cluster.update_count(), 0);
}

#[tokio::test]
async fn test_apply_always_overwrites_spec() {
    let mut drifted = spin_class();
    drifted.handler = "drifted".to_string();
    let cluster = InMemoryCluster::new().with_runtime_class(drifted);
    let uid = cluster.get("wasmtime-spin").await.unwrap().metadata.uid;

    let result = create_or_update(&cluster, &spin_class()).await.unwrap();
    assert_eq!(result, OperationResult::Updated);

    let stored = cluster.get("wasmtime-spin").await.unwrap();
    assert_eq!(stored.handler, "spin");
    assert_eq!(stored.metadata.uid, uid);

    // No drift, still written
    create_or_update(&cluster, &spin_class()).await.unwrap();
    assert_eq!(cluster.update_count(), 2);
}

#[tokio::test]
async fn test_apply_invalid_manifest() {
    let cluster = InMemoryCluster::new();

    let err = apply_runtime_class_manifest(&cluster, "wasmtime-spin", "handler: [")
        .await
        .unwrap_err();
    match err {
        NodeBakeError::Manifest { name, .. } => assert_eq!(name, "wasmtime-spin"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(cluster.is_empty().await);
}

#[tokio::test]
async fn test_list_failure_is_wrapped() {
    let cluster = InMemoryCluster::new().with_list_error("connection refused");

    let err = ensure_wasm_runtime_classes(&cluster).await.unwrap_err();
    match &err {
        NodeBakeError::Reconcile {
            operation, name, ..
        } => {
            assert_eq!(operation, "list runtime classes");
            assert_eq!(name, "wasmtime-spin");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("connection refused"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_convergence_creates_one_object() {
    let cluster = Arc::new(InMemoryCluster::new());

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let cluster = Arc::clone(&cluster);
            tokio::spawn(async move {
                let manifest = wasm_runtime_class_template("spin");
                apply_runtime_class_manifest(cluster.as_ref(), "wasmtime-spin", &manifest).await
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(cluster.len().await, 1);
    assert_eq!(cluster.create_count(), 1);
    assert_eq!(cluster.update_count(), 7);
}
