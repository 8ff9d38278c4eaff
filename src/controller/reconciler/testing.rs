//! In-memory Nexus API and record store for reconciler tests.

use super::NexusResource;
use crate::constants::FINALIZER;
use crate::controller::store::{RecordStore, StoreError};
use crate::crd::{ContentSelector, NexusResourceStatus, Privilege, Repository, Role};
use crate::nexus::{NexusApi, NexusError};
use crate::translate::{
    ContentSelectorPayload, PrivilegePayload, RepositoryFormat, RepositoryPayload, RolePayload,
};
use async_trait::async_trait;
use kube_runtime::reflector::ObjectRef;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Nexus stand-in that keeps objects in a map keyed by `"{kind} {name}"`
#[derive(Debug, Default)]
pub(crate) struct FakeNexus {
    remote: Mutex<HashMap<String, Value>>,
    failures: Mutex<HashMap<String, NexusError>>,
    calls: Mutex<Vec<String>>,
}

impl FakeNexus {
    pub(crate) fn put_remote(&self, key: &str, value: Value) {
        self.remote.lock().unwrap().insert(key.to_string(), value);
    }

    /// Make the next call named `call` (e.g. `"create role admins"`) fail
    pub(crate) fn fail_next(&self, call: &str, error: NexusError) {
        self.failures.lock().unwrap().insert(call.to_string(), error);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn mutating_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| !call.starts_with("get ") && !call.starts_with("exists "))
            .collect()
    }

    fn call(&self, operation: &str, key: &str) -> Result<(), NexusError> {
        let call = format!("{operation} {key}");
        self.calls.lock().unwrap().push(call.clone());
        match self.failures.lock().unwrap().remove(&call) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn get(&self, key: &str) -> Result<Option<Value>, NexusError> {
        self.call("get", key)?;
        Ok(self.remote.lock().unwrap().get(key).cloned())
    }

    fn write(&self, operation: &str, key: &str, payload: &impl Serialize, echoed: Value) -> Result<(), NexusError> {
        self.call(operation, key)?;
        let mut value = serde_json::to_value(payload)?;
        if let (Value::Object(map), Value::Object(extra)) = (&mut value, echoed) {
            map.extend(extra);
        }
        self.remote.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), NexusError> {
        self.call("delete", key)?;
        self.remote
            .lock()
            .unwrap()
            .remove(key)
            .map(|_| ())
            .ok_or(NexusError::NotFound)
    }
}

fn repository_echo(payload: &RepositoryPayload) -> Value {
    let format = match payload.repository_type.format {
        RepositoryFormat::Maven => "maven2",
        other => other.as_str(),
    };
    json!({
        "format": format,
        "type": payload.repository_type.flavor.as_str(),
        "url": format!("http://nexus.local/repository/{}", payload.name),
    })
}

#[async_trait]
impl NexusApi for FakeNexus {
    async fn get_repository(&self, name: &str) -> Result<Option<Value>, NexusError> {
        self.get(&format!("repository {name}"))
    }

    async fn create_repository(&self, payload: &RepositoryPayload) -> Result<(), NexusError> {
        let key = format!("repository {}", payload.name);
        self.write("create", &key, payload, repository_echo(payload))
    }

    async fn update_repository(&self, payload: &RepositoryPayload) -> Result<(), NexusError> {
        let key = format!("repository {}", payload.name);
        self.write("update", &key, payload, repository_echo(payload))
    }

    async fn delete_repository(&self, name: &str) -> Result<(), NexusError> {
        self.delete(&format!("repository {name}"))
    }

    async fn get_privilege(&self, name: &str) -> Result<Option<Value>, NexusError> {
        self.get(&format!("privilege {name}"))
    }

    async fn create_privilege(&self, payload: &PrivilegePayload) -> Result<(), NexusError> {
        let key = format!("privilege {}", payload.name);
        self.write("create", &key, payload, json!({"readOnly": false, "id": payload.name}))
    }

    async fn update_privilege(&self, payload: &PrivilegePayload) -> Result<(), NexusError> {
        let key = format!("privilege {}", payload.name);
        self.write("update", &key, payload, json!({"readOnly": false, "id": payload.name}))
    }

    async fn delete_privilege(&self, name: &str) -> Result<(), NexusError> {
        self.delete(&format!("privilege {name}"))
    }

    async fn get_role(&self, id: &str) -> Result<Option<Value>, NexusError> {
        self.get(&format!("role {id}"))
    }

    async fn create_role(&self, payload: &RolePayload) -> Result<(), NexusError> {
        let key = format!("role {}", payload.id);
        self.write("create", &key, payload, json!({"source": "default", "readOnly": false}))
    }

    async fn update_role(&self, payload: &RolePayload) -> Result<(), NexusError> {
        let key = format!("role {}", payload.id);
        self.write("update", &key, payload, json!({"source": "default", "readOnly": false}))
    }

    async fn delete_role(&self, id: &str) -> Result<(), NexusError> {
        self.delete(&format!("role {id}"))
    }

    async fn content_selector_exists(&self, name: &str) -> Result<bool, NexusError> {
        let key = format!("content-selector {name}");
        self.call("exists", &key)?;
        Ok(self.remote.lock().unwrap().contains_key(&key))
    }

    async fn get_content_selector(&self, name: &str) -> Result<Option<Value>, NexusError> {
        self.get(&format!("content-selector {name}"))
    }

    async fn create_content_selector(&self, payload: &ContentSelectorPayload) -> Result<(), NexusError> {
        let key = format!("content-selector {}", payload.name);
        self.write("create", &key, payload, json!({"type": "csel"}))
    }

    async fn update_content_selector(&self, payload: &ContentSelectorPayload) -> Result<(), NexusError> {
        let key = format!("content-selector {}", payload.name);
        self.write("update", &key, payload, json!({"type": "csel"}))
    }

    async fn delete_content_selector(&self, name: &str) -> Result<(), NexusError> {
        self.delete(&format!("content-selector {name}"))
    }
}

/// Single-record store that enforces `resourceVersion` and drops the record
/// once a deleting record loses its last finalizer
#[derive(Debug)]
pub(crate) struct MemoryStore<K> {
    record: Mutex<Option<K>>,
    conflict_next: AtomicBool,
    status_writes: AtomicUsize,
    finalizer_writes: AtomicUsize,
}

impl<K> Default for MemoryStore<K> {
    fn default() -> Self {
        Self {
            record: Mutex::new(None),
            conflict_next: AtomicBool::new(false),
            status_writes: AtomicUsize::new(0),
            finalizer_writes: AtomicUsize::new(0),
        }
    }
}

impl<K: NexusResource> MemoryStore<K> {
    pub(crate) fn with(record: K) -> Self {
        let store = Self::default();
        *store.record.lock().unwrap() = Some(record);
        store
    }

    pub(crate) fn identity(&self) -> ObjectRef<K> {
        ObjectRef::from_obj(&self.current().unwrap())
    }

    pub(crate) fn current(&self) -> Option<K> {
        self.record.lock().unwrap().clone()
    }

    pub(crate) fn conflict_next_write(&self) {
        self.conflict_next.store(true, Ordering::SeqCst);
    }

    pub(crate) fn status_writes(&self) -> usize {
        self.status_writes.load(Ordering::SeqCst)
    }

    pub(crate) fn finalizer_writes(&self) -> usize {
        self.finalizer_writes.load(Ordering::SeqCst)
    }

    /// Apply `change` to the stored record after the optimistic-concurrency check
    fn write(&self, record: &K, change: impl FnOnce(&mut K)) -> Result<K, StoreError> {
        if self.conflict_next.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Conflict);
        }
        let mut stored = self.record.lock().unwrap();
        let current = stored.as_mut().ok_or(StoreError::NotFound)?;
        if current.meta().resource_version != record.meta().resource_version {
            return Err(StoreError::Conflict);
        }

        change(current);
        let version = current
            .meta()
            .resource_version
            .as_deref()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);
        current.meta_mut().resource_version = Some((version + 1).to_string());

        let updated = current.clone();
        let released = updated.meta().deletion_timestamp.is_some()
            && updated.meta().finalizers.as_ref().is_none_or(Vec::is_empty);
        if released {
            *stored = None;
        }
        Ok(updated)
    }
}

#[async_trait]
impl<K: NexusResource> RecordStore<K> for MemoryStore<K> {
    async fn get(&self, identity: &ObjectRef<K>) -> Result<Option<K>, StoreError> {
        Ok(self
            .current()
            .filter(|record| ObjectRef::from_obj(record) == *identity))
    }

    async fn replace_finalizers(&self, record: &K, finalizers: Vec<String>) -> Result<K, StoreError> {
        let updated = self.write(record, |current| {
            current.meta_mut().finalizers = Some(finalizers);
        })?;
        self.finalizer_writes.fetch_add(1, Ordering::SeqCst);
        Ok(updated)
    }

    async fn replace_status(&self, record: &K, status: &NexusResourceStatus) -> Result<K, StoreError> {
        let updated = self.write(record, |current| {
            *current = with_status(current, status);
        })?;
        self.status_writes.fetch_add(1, Ordering::SeqCst);
        Ok(updated)
    }
}

fn with_status<K: NexusResource>(record: &K, status: &NexusResourceStatus) -> K {
    let mut value = serde_json::to_value(record).unwrap();
    value["status"] = serde_json::to_value(status).unwrap();
    serde_json::from_value(value).unwrap()
}

fn record<K: DeserializeOwned>(api_version: &str, kind: &str, name: &str, spec: Value) -> K {
    serde_json::from_value(json!({
        "apiVersion": api_version,
        "kind": kind,
        "metadata": {
            "name": name,
            "namespace": "default",
            "generation": 1,
            "resourceVersion": "1",
        },
        "spec": spec,
    }))
    .unwrap()
}

/// `maven-hosted` repository on the `default` blob store
pub(crate) fn repository(name: &str) -> Repository {
    record(
        "nexus.operator.dev/v1alpha1",
        "Repository",
        name,
        json!({
            "name": name,
            "type": "maven-hosted",
            "storage": {"blobStoreName": "default", "writePolicy": "ALLOW"},
        }),
    )
}

/// Privilege of `privilege_type` with a matching block for `wildcard`
pub(crate) fn privilege(name: &str, privilege_type: &str) -> Privilege {
    record(
        "nexus.operator.dev/v1alpha1",
        "Privilege",
        name,
        json!({
            "name": name,
            "type": privilege_type,
            "description": "test privilege",
            "wildcard": {"pattern": "nexus:*"},
        }),
    )
}

pub(crate) fn role(id: &str) -> Role {
    record(
        "nexus.operator.dev/v1alpha1",
        "Role",
        id,
        json!({
            "roleId": id,
            "name": id,
            "privileges": ["nx-all"],
        }),
    )
}

pub(crate) fn content_selector(name: &str) -> ContentSelector {
    record(
        "nexus.operator.dev/v1alpha1",
        "ContentSelector",
        name,
        json!({
            "name": name,
            "description": "maven releases",
            "expression": "format == \"maven2\"",
        }),
    )
}

/// Mark the record as deleting, holding the operator finalizer
pub(crate) fn deleted<K: NexusResource>(record: K) -> K {
    let mut value = serde_json::to_value(&record).unwrap();
    value["metadata"]["deletionTimestamp"] = json!("2024-01-01T00:00:00Z");
    value["metadata"]["finalizers"] = json!([FINALIZER]);
    serde_json::from_value(value).unwrap()
}
