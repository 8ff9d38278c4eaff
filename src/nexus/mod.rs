//! # Nexus API
//!
//! Authenticated client for the Nexus configuration API (`/service/rest/v1`).
//!
//! `NexusApi` is the seam the reconciler talks to. `NexusClient` implements it
//! over HTTP; tests substitute in-memory fakes or point the client at a Pact
//! mock server.
//!
//! Reads return `Ok(None)` for a missing object. Deletes return
//! `Err(NexusError::NotFound)` so callers decide whether absence is success.

mod client;
mod error;

pub use client::NexusClient;
pub use error::NexusError;

use crate::translate::{ContentSelectorPayload, PrivilegePayload, RepositoryPayload, RolePayload};
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait NexusApi: Send + Sync + std::fmt::Debug {
    async fn get_repository(&self, name: &str) -> Result<Option<Value>, NexusError>;
    async fn create_repository(&self, payload: &RepositoryPayload) -> Result<(), NexusError>;
    async fn update_repository(&self, payload: &RepositoryPayload) -> Result<(), NexusError>;
    async fn delete_repository(&self, name: &str) -> Result<(), NexusError>;

    async fn get_privilege(&self, name: &str) -> Result<Option<Value>, NexusError>;
    async fn create_privilege(&self, payload: &PrivilegePayload) -> Result<(), NexusError>;
    async fn update_privilege(&self, payload: &PrivilegePayload) -> Result<(), NexusError>;
    async fn delete_privilege(&self, name: &str) -> Result<(), NexusError>;

    async fn get_role(&self, id: &str) -> Result<Option<Value>, NexusError>;
    async fn create_role(&self, payload: &RolePayload) -> Result<(), NexusError>;
    async fn update_role(&self, payload: &RolePayload) -> Result<(), NexusError>;
    async fn delete_role(&self, id: &str) -> Result<(), NexusError>;

    /// Existence check via `HEAD`
    async fn content_selector_exists(&self, name: &str) -> Result<bool, NexusError>;
    async fn get_content_selector(&self, name: &str) -> Result<Option<Value>, NexusError>;
    async fn create_content_selector(&self, payload: &ContentSelectorPayload) -> Result<(), NexusError>;
    async fn update_content_selector(&self, payload: &ContentSelectorPayload) -> Result<(), NexusError>;
    async fn delete_content_selector(&self, name: &str) -> Result<(), NexusError>;
}
