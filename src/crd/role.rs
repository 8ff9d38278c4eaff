//! # Role

use super::condition::NexusResourceStatus;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Role Custom Resource Definition
///
/// # Example
///
/// ```yaml
/// apiVersion: nexus.operator.dev/v1alpha1
/// kind: Role
/// metadata:
///   name: developers
/// spec:
///   roleId: developers
///   name: Developers
///   privileges: [maven-releases-read]
///   roles: [nx-anonymous]
/// ```
#[derive(CustomResource, Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[kube(
    kind = "Role",
    group = "nexus.operator.dev",
    version = "v1alpha1",
    namespaced,
    status = "NexusResourceStatus",
    shortname = "nxrole",
    printcolumn = r#"{"name":"Role", "type":"string", "jsonPath":".spec.roleId"}"#,
    printcolumn = r#"{"name":"Ready", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct RoleSpec {
    /// Role id in Nexus. Immutable once created.
    pub role_id: String,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Privilege names granted by the role
    #[serde(default)]
    pub privileges: Vec<String>,
    /// Nested role ids
    #[serde(default)]
    pub roles: Vec<String>,
}
