//! # Content Selector

use super::condition::NexusResourceStatus;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// ContentSelector Custom Resource Definition
///
/// # Example
///
/// ```yaml
/// apiVersion: nexus.operator.dev/v1alpha1
/// kind: ContentSelector
/// metadata:
///   name: team-a-artifacts
/// spec:
///   name: team-a-artifacts
///   description: Artifacts published by team A
///   expression: format == "maven2" and path =^ "/com/example/team-a/"
/// ```
#[derive(CustomResource, Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[kube(
    kind = "ContentSelector",
    group = "nexus.operator.dev",
    version = "v1alpha1",
    namespaced,
    status = "NexusResourceStatus",
    shortname = "nxcsel",
    printcolumn = r#"{"name":"Selector", "type":"string", "jsonPath":".spec.name"}"#,
    printcolumn = r#"{"name":"Ready", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ContentSelectorSpec {
    /// Selector name in Nexus. Immutable once created.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// CSEL expression
    pub expression: String,
}
