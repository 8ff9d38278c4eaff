//! # Privilege
//!
//! Desired configuration of a Nexus privilege. `type` selects which one of
//! the optional blocks must be present.

use super::condition::NexusResourceStatus;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Privilege Custom Resource Definition
///
/// # Example
///
/// ```yaml
/// apiVersion: nexus.operator.dev/v1alpha1
/// kind: Privilege
/// metadata:
///   name: maven-releases-read
/// spec:
///   name: maven-releases-read
///   type: repository-view
///   description: Read access to maven-releases
///   repositoryView:
///     repository: maven-releases
///     actions: [READ, BROWSE]
/// ```
#[derive(CustomResource, Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[kube(
    kind = "Privilege",
    group = "nexus.operator.dev",
    version = "v1alpha1",
    namespaced,
    status = "NexusResourceStatus",
    shortname = "nxpriv",
    printcolumn = r#"{"name":"Privilege", "type":"string", "jsonPath":".spec.name"}"#,
    printcolumn = r#"{"name":"Type", "type":"string", "jsonPath":".spec.type"}"#,
    printcolumn = r#"{"name":"Ready", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct PrivilegeSpec {
    /// Privilege name in Nexus. Immutable once created.
    pub name: String,
    /// `wildcard`, `application`, `repository-view`, `repository-admin`,
    /// `repository-content-selector` or `script`
    pub r#type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wildcard: Option<WildcardPrivilegeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<ApplicationPrivilegeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_view: Option<RepositoryViewPrivilegeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_admin: Option<RepositoryAdminPrivilegeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_content_selector: Option<RepositoryContentSelectorPrivilegeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<ScriptPrivilegeSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WildcardPrivilegeSpec {
    /// Permission pattern, e.g. `nexus:repository-view:*:*:read`
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPrivilegeSpec {
    pub domain: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryViewPrivilegeSpec {
    pub repository: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryAdminPrivilegeSpec {
    pub repository: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryContentSelectorPrivilegeSpec {
    pub repository: String,
    pub content_selector: String,
    pub format: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScriptPrivilegeSpec {
    pub script_name: String,
}
