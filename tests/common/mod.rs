//! Common test utilities for Pact integration tests
//!
//! Provides shared initialization code for all Pact tests (rustls crypto
//! provider setup, a `NexusClient` pointed at the mock server) plus an
//! in-memory record store for the end-to-end reconcile scenarios.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use async_trait::async_trait;
use kube_runtime::reflector::ObjectRef;
use nexus_operator::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::{Mutex, Once};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

static RUSTLS_INIT: Once = Once::new();

/// `Authorization` header for `admin` / `admin123`
pub const BASIC_AUTH: &str = "Basic YWRtaW46YWRtaW4xMjM=";

/// Initialize rustls crypto provider for tests
///
/// This must be called before any async operations that use rustls.
/// Uses a `Once` to ensure it's only called once across all tests. The Pact
/// mock server installs its own provider when it starts, so a provider that
/// is already in place is kept.
pub fn init_rustls() {
    RUSTLS_INIT.call_once(|| {
        if rustls::crypto::CryptoProvider::get_default().is_none() {
            let _ = rustls::crypto::ring::default_provider().install_default();
        }
    });
}

/// Mock server base URL without the trailing slash
pub fn base_url(mock_server_url: impl std::fmt::Display) -> String {
    let mut base_url = mock_server_url.to_string();
    if base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}

/// Real Nexus client talking to the Pact mock server
pub fn nexus_client(base_url: &str) -> NexusClient {
    init_rustls();
    let config = NexusConfig::new(base_url, "admin", "admin123").expect("valid mock server URL");
    NexusClient::new(&config, Duration::from_secs(5), CancellationToken::new())
        .expect("Failed to build Nexus client")
}

/// Record store holding a single record, enforcing `resourceVersion` the way
/// the API server does and dropping a deleting record once it has no
/// finalizers left
#[derive(Debug)]
pub struct InMemoryStore<K> {
    record: Mutex<Option<K>>,
}

impl<K: NexusResource> InMemoryStore<K> {
    pub fn new(record: K) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }

    pub fn identity(&self) -> ObjectRef<K> {
        ObjectRef::from_obj(&self.current().expect("record exists"))
    }

    pub fn current(&self) -> Option<K> {
        self.record.lock().unwrap().clone()
    }

    fn write(&self, record: &K, change: impl FnOnce(&mut K)) -> Result<K, StoreError> {
        let mut stored = self.record.lock().unwrap();
        let current = stored.as_mut().ok_or(StoreError::NotFound)?;
        if current.meta().resource_version != record.meta().resource_version {
            return Err(StoreError::Conflict);
        }
        change(current);
        let version: u64 = current
            .meta()
            .resource_version
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        current.meta_mut().resource_version = Some((version + 1).to_string());

        let updated = current.clone();
        let meta = updated.meta();
        if meta.deletion_timestamp.is_some() && meta.finalizers.as_ref().is_none_or(Vec::is_empty) {
            *stored = None;
        }
        Ok(updated)
    }
}

#[async_trait]
impl<K: NexusResource> RecordStore<K> for InMemoryStore<K> {
    async fn get(&self, identity: &ObjectRef<K>) -> Result<Option<K>, StoreError> {
        Ok(self
            .current()
            .filter(|record| ObjectRef::from_obj(record) == *identity))
    }

    async fn replace_finalizers(&self, record: &K, finalizers: Vec<String>) -> Result<K, StoreError> {
        self.write(record, |current| {
            current.meta_mut().finalizers = Some(finalizers);
        })
    }

    async fn replace_status(&self, record: &K, status: &NexusResourceStatus) -> Result<K, StoreError> {
        self.write(record, |current| {
            let mut value = serde_json::to_value(&*current).unwrap();
            value["status"] = serde_json::to_value(status).unwrap();
            *current = serde_json::from_value(value).unwrap();
        })
    }
}

/// Deserialize a record of `kind` in namespace `default` at generation 1
pub fn record<K: DeserializeOwned>(kind: &str, name: &str, spec: Value) -> K {
    serde_json::from_value(json!({
        "apiVersion": "nexus.operator.dev/v1alpha1",
        "kind": kind,
        "metadata": {
            "name": name,
            "namespace": "default",
            "generation": 1,
            "resourceVersion": "1",
        },
        "spec": spec,
    }))
    .expect("valid record")
}

/// The same record, marked as deleting and holding the operator finalizer
pub fn deleting<K: NexusResource>(record: &K) -> K {
    let mut value = serde_json::to_value(record).unwrap();
    value["metadata"]["deletionTimestamp"] = json!("2024-01-01T00:00:00Z");
    value["metadata"]["finalizers"] = json!([nexus_operator::constants::FINALIZER]);
    serde_json::from_value(value).unwrap()
}
