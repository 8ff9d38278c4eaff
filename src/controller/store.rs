//! # Record Store
//!
//! Access to the records the reconciler owns: load by identity, replace the
//! finalizer list and replace the status subresource.
//!
//! Writes carry the record's `resourceVersion`, so a concurrent modification
//! surfaces as [`StoreError::Conflict`] instead of silently overwriting it.

use crate::constants::FIELD_MANAGER;
use crate::crd::NexusResourceStatus;
use async_trait::async_trait;
use kube::api::{Api, Patch, PatchParams};
use kube::core::NamespaceResourceScope;
use kube::{Client, Resource};
use kube_runtime::reflector::ObjectRef;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::fmt::Debug;
use std::marker::PhantomData;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The record changed since it was read (HTTP 409)
    #[error("record was modified concurrently")]
    Conflict,
    /// The record disappeared before the write landed (HTTP 404)
    #[error("record no longer exists")]
    NotFound,
    #[error("record has no {0}")]
    MissingMetadata(&'static str),
    #[error(transparent)]
    Kube(#[from] kube::Error),
}

impl StoreError {
    fn from_kube(error: kube::Error) -> Self {
        match error {
            kube::Error::Api(ref response) if response.code == 409 => Self::Conflict,
            kube::Error::Api(ref response) if response.code == 404 => Self::NotFound,
            other => Self::Kube(other),
        }
    }
}

#[async_trait]
pub trait RecordStore<K: Resource<DynamicType = ()> + Send + Sync + 'static>: Send + Sync {
    /// Current record, or `None` once it is gone
    async fn get(&self, identity: &ObjectRef<K>) -> Result<Option<K>, StoreError>;

    /// Persist `finalizers` as the record's complete finalizer list
    async fn replace_finalizers(&self, record: &K, finalizers: Vec<String>) -> Result<K, StoreError>;

    /// Persist `status` as the record's status subresource
    async fn replace_status(&self, record: &K, status: &NexusResourceStatus) -> Result<K, StoreError>;
}

/// [`RecordStore`] backed by the Kubernetes API server
pub struct KubeRecordStore<K> {
    client: Client,
    kind: PhantomData<fn() -> K>,
}

impl<K> Debug for KubeRecordStore<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeRecordStore")
            .field("kind", &std::any::type_name::<K>())
            .finish_non_exhaustive()
    }
}

impl<K> KubeRecordStore<K> {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            kind: PhantomData,
        }
    }
}

impl<K> KubeRecordStore<K>
where
    K: Resource<DynamicType = (), Scope = NamespaceResourceScope>,
{
    fn api(&self, namespace: Option<&str>) -> Result<Api<K>, StoreError> {
        let namespace = namespace.ok_or(StoreError::MissingMetadata("namespace"))?;
        Ok(Api::namespaced(self.client.clone(), namespace))
    }

    fn api_for(&self, record: &K) -> Result<(Api<K>, String), StoreError> {
        let meta = record.meta();
        let name = meta
            .name
            .clone()
            .ok_or(StoreError::MissingMetadata("name"))?;
        Ok((self.api(meta.namespace.as_deref())?, name))
    }
}

#[async_trait]
impl<K> RecordStore<K> for KubeRecordStore<K>
where
    K: Resource<DynamicType = (), Scope = NamespaceResourceScope>
        + Clone
        + Debug
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static,
{
    async fn get(&self, identity: &ObjectRef<K>) -> Result<Option<K>, StoreError> {
        self.api(identity.namespace.as_deref())?
            .get_opt(&identity.name)
            .await
            .map_err(StoreError::from_kube)
    }

    async fn replace_finalizers(&self, record: &K, finalizers: Vec<String>) -> Result<K, StoreError> {
        let (api, name) = self.api_for(record)?;
        let patch = json!({
            "metadata": {
                "finalizers": finalizers,
                "resourceVersion": record.meta().resource_version,
            }
        });
        api.patch(&name, &PatchParams::apply(FIELD_MANAGER), &Patch::Merge(&patch))
            .await
            .map_err(StoreError::from_kube)
    }

    async fn replace_status(&self, record: &K, status: &NexusResourceStatus) -> Result<K, StoreError> {
        let (api, name) = self.api_for(record)?;
        let patch = json!({
            "metadata": {
                "resourceVersion": record.meta().resource_version,
            },
            "status": status,
        });
        api.patch_status(&name, &PatchParams::apply(FIELD_MANAGER), &Patch::Merge(&patch))
            .await
            .map_err(StoreError::from_kube)
    }
}
