//! # Repository
//!
//! Desired configuration of a Nexus repository. The `type` field selects
//! format and flavor; the optional blocks carry format- and flavor-specific
//! settings and are validated during translation.

use super::condition::NexusResourceStatus;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Repository Custom Resource Definition
///
/// # Example
///
/// ```yaml
/// apiVersion: nexus.operator.dev/v1alpha1
/// kind: Repository
/// metadata:
///   name: maven-releases
/// spec:
///   name: maven-releases
///   type: maven-hosted
///   storage:
///     blobStoreName: default
///     writePolicy: ALLOW_ONCE
/// ```
#[derive(CustomResource, Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[kube(
    kind = "Repository",
    group = "nexus.operator.dev",
    version = "v1alpha1",
    namespaced,
    status = "NexusResourceStatus",
    shortname = "nxrepo",
    printcolumn = r#"{"name":"Repository", "type":"string", "jsonPath":".spec.name"}"#,
    printcolumn = r#"{"name":"Type", "type":"string", "jsonPath":".spec.type"}"#,
    printcolumn = r#"{"name":"Ready", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySpec {
    /// Repository name in Nexus. Immutable once created.
    pub name: String,
    /// `{maven,npm,docker,raw}-{hosted,proxy,group}`
    pub r#type: String,
    /// Whether the repository accepts incoming requests
    #[serde(default = "default_true")]
    pub online: bool,
    pub storage: StorageSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maven: Option<MavenSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npm: Option<NpmSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker: Option<DockerSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawSpec>,
    /// Required for proxy repositories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxySpec>,
    /// Required for group repositories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleanup: Option<CleanupSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_client: Option<HttpClientSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_cache: Option<NegativeCacheSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageSpec {
    pub blob_store_name: String,
    #[serde(default = "default_true")]
    pub strict_content_type_validation: bool,
    /// Only meaningful for hosted repositories
    #[serde(default)]
    pub write_policy: WritePolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WritePolicy {
    AllowOnce,
    #[default]
    Allow,
    Deny,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MavenSpec {
    #[serde(default)]
    pub version_policy: VersionPolicy,
    #[serde(default)]
    pub layout_policy: LayoutPolicy,
    #[serde(default)]
    pub content_disposition: ContentDisposition,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VersionPolicy {
    #[default]
    Release,
    Snapshot,
    Mixed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutPolicy {
    #[default]
    Strict,
    Permissive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentDisposition {
    #[default]
    Inline,
    Attachment,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NpmSpec {
    #[serde(default)]
    pub remove_non_cataloged: bool,
    #[serde(default)]
    pub remove_quarantined: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DockerSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https_port: Option<u16>,
    #[serde(default)]
    pub force_basic_auth: bool,
    #[serde(default)]
    pub v1_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawSpec {
    #[serde(default)]
    pub content_disposition: ContentDisposition,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProxySpec {
    pub remote_url: String,
    /// Minutes to cache artifacts, -1 caches forever
    #[serde(default = "default_max_age")]
    pub content_max_age: i32,
    /// Minutes to cache metadata, -1 caches forever
    #[serde(default = "default_max_age")]
    pub metadata_max_age: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupSpec {
    /// Member repositories in lookup order
    #[serde(default)]
    pub member_names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CleanupSpec {
    #[serde(default)]
    pub policy_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HttpClientSpec {
    #[serde(default)]
    pub blocked: bool,
    #[serde(default = "default_true")]
    pub auto_block: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<HttpClientAuthenticationSpec>,
}

impl Default for HttpClientSpec {
    fn default() -> Self {
        Self {
            blocked: false,
            auto_block: true,
            authentication: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HttpClientAuthenticationSpec {
    #[serde(default)]
    pub r#type: AuthenticationType,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AuthenticationType {
    #[default]
    Username,
    Ntlm,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NegativeCacheSpec {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Minutes
    #[serde(default = "default_negative_cache_ttl")]
    pub time_to_live: i32,
}

impl Default for NegativeCacheSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            time_to_live: default_negative_cache_ttl(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_age() -> i32 {
    1440
}

fn default_negative_cache_ttl() -> i32 {
    300
}
