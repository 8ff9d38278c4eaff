//! # Managed Kinds
//!
//! [`NexusResource`] is everything the generic reconciler needs to know about
//! one kind: how to name and translate it, how to compare it with the remote
//! copy, which Nexus calls manage it and whether deletion reaches Nexus.

use crate::config::ControllerConfig;
use crate::controller::diff::DiffRule;
use crate::crd::{ContentSelector, NexusResourceStatus, Privilege, Repository, Role};
use crate::nexus::{NexusApi, NexusError};
use crate::translate::{
    translate_content_selector, translate_privilege, translate_repository, translate_role,
    ContentSelectorPayload, PrivilegePayload, RepositoryPayload, RolePayload, TranslationError,
};
use async_trait::async_trait;
use kube::core::NamespaceResourceScope;
use kube::Resource;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

#[async_trait]
pub trait NexusResource:
    Resource<DynamicType = (), Scope = NamespaceResourceScope>
    + Clone
    + Debug
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Kind name used in logs, metrics and error messages
    const KIND: &'static str;
    /// Condition message after a successful sync
    const SUCCESS_MESSAGE: &'static str;
    const DIFF_RULE: DiffRule;

    type Payload: Serialize + Send + Sync;

    /// Name of the object in Nexus
    fn remote_name(&self) -> &str;

    /// # Errors
    /// The spec can never produce a valid payload.
    fn translate(&self) -> Result<Self::Payload, TranslationError>;

    fn status(&self) -> Option<&NexusResourceStatus>;

    /// Whether deleting the record deletes the Nexus object
    fn remote_deletion_enabled(_config: &ControllerConfig) -> bool {
        true
    }

    async fn fetch_remote(nexus: &dyn NexusApi, name: &str) -> Result<Option<Value>, NexusError>;
    async fn create_remote(nexus: &dyn NexusApi, payload: &Self::Payload) -> Result<(), NexusError>;
    async fn update_remote(nexus: &dyn NexusApi, payload: &Self::Payload) -> Result<(), NexusError>;
    async fn delete_remote(nexus: &dyn NexusApi, name: &str) -> Result<(), NexusError>;
}

#[async_trait]
impl NexusResource for Repository {
    const KIND: &'static str = "Repository";
    const SUCCESS_MESSAGE: &'static str = "Repository synchronized with Nexus";
    const DIFF_RULE: DiffRule = DiffRule::new(&["format", "type"]);

    type Payload = RepositoryPayload;

    fn remote_name(&self) -> &str {
        &self.spec.name
    }

    fn translate(&self) -> Result<RepositoryPayload, TranslationError> {
        translate_repository(&self.spec)
    }

    fn status(&self) -> Option<&NexusResourceStatus> {
        self.status.as_ref()
    }

    /// Repositories hold artifacts, so removing one from Nexus is opt-in
    fn remote_deletion_enabled(config: &ControllerConfig) -> bool {
        config.enable_repository_deletion
    }

    async fn fetch_remote(nexus: &dyn NexusApi, name: &str) -> Result<Option<Value>, NexusError> {
        nexus.get_repository(name).await
    }

    async fn create_remote(nexus: &dyn NexusApi, payload: &RepositoryPayload) -> Result<(), NexusError> {
        nexus.create_repository(payload).await
    }

    async fn update_remote(nexus: &dyn NexusApi, payload: &RepositoryPayload) -> Result<(), NexusError> {
        nexus.update_repository(payload).await
    }

    async fn delete_remote(nexus: &dyn NexusApi, name: &str) -> Result<(), NexusError> {
        nexus.delete_repository(name).await
    }
}

#[async_trait]
impl NexusResource for Privilege {
    const KIND: &'static str = "Privilege";
    const SUCCESS_MESSAGE: &'static str = "Privilege synchronized with Nexus";
    const DIFF_RULE: DiffRule = DiffRule::new(&["readOnly", "type", "id"]);

    type Payload = PrivilegePayload;

    fn remote_name(&self) -> &str {
        &self.spec.name
    }

    fn translate(&self) -> Result<PrivilegePayload, TranslationError> {
        translate_privilege(&self.spec)
    }

    fn status(&self) -> Option<&NexusResourceStatus> {
        self.status.as_ref()
    }

    async fn fetch_remote(nexus: &dyn NexusApi, name: &str) -> Result<Option<Value>, NexusError> {
        nexus.get_privilege(name).await
    }

    async fn create_remote(nexus: &dyn NexusApi, payload: &PrivilegePayload) -> Result<(), NexusError> {
        nexus.create_privilege(payload).await
    }

    async fn update_remote(nexus: &dyn NexusApi, payload: &PrivilegePayload) -> Result<(), NexusError> {
        nexus.update_privilege(payload).await
    }

    async fn delete_remote(nexus: &dyn NexusApi, name: &str) -> Result<(), NexusError> {
        nexus.delete_privilege(name).await
    }
}

#[async_trait]
impl NexusResource for Role {
    const KIND: &'static str = "Role";
    const SUCCESS_MESSAGE: &'static str = "Role synchronized with Nexus";
    const DIFF_RULE: DiffRule = DiffRule::new(&["readOnly", "source"]);

    type Payload = RolePayload;

    fn remote_name(&self) -> &str {
        &self.spec.role_id
    }

    fn translate(&self) -> Result<RolePayload, TranslationError> {
        Ok(translate_role(&self.spec))
    }

    fn status(&self) -> Option<&NexusResourceStatus> {
        self.status.as_ref()
    }

    async fn fetch_remote(nexus: &dyn NexusApi, id: &str) -> Result<Option<Value>, NexusError> {
        nexus.get_role(id).await
    }

    async fn create_remote(nexus: &dyn NexusApi, payload: &RolePayload) -> Result<(), NexusError> {
        nexus.create_role(payload).await
    }

    async fn update_remote(nexus: &dyn NexusApi, payload: &RolePayload) -> Result<(), NexusError> {
        nexus.update_role(payload).await
    }

    async fn delete_remote(nexus: &dyn NexusApi, id: &str) -> Result<(), NexusError> {
        nexus.delete_role(id).await
    }
}

#[async_trait]
impl NexusResource for ContentSelector {
    const KIND: &'static str = "ContentSelector";
    const SUCCESS_MESSAGE: &'static str = "Content selector synchronized with Nexus";
    const DIFF_RULE: DiffRule = DiffRule::new(&["type"]);

    type Payload = ContentSelectorPayload;

    fn remote_name(&self) -> &str {
        &self.spec.name
    }

    fn translate(&self) -> Result<ContentSelectorPayload, TranslationError> {
        Ok(translate_content_selector(&self.spec))
    }

    fn status(&self) -> Option<&NexusResourceStatus> {
        self.status.as_ref()
    }

    /// Existence is checked with `HEAD` before the body is read
    async fn fetch_remote(nexus: &dyn NexusApi, name: &str) -> Result<Option<Value>, NexusError> {
        if !nexus.content_selector_exists(name).await? {
            return Ok(None);
        }
        nexus.get_content_selector(name).await
    }

    async fn create_remote(
        nexus: &dyn NexusApi,
        payload: &ContentSelectorPayload,
    ) -> Result<(), NexusError> {
        nexus.create_content_selector(payload).await
    }

    async fn update_remote(
        nexus: &dyn NexusApi,
        payload: &ContentSelectorPayload,
    ) -> Result<(), NexusError> {
        nexus.update_content_selector(payload).await
    }

    async fn delete_remote(nexus: &dyn NexusApi, name: &str) -> Result<(), NexusError> {
        nexus.delete_content_selector(name).await
    }
}
