//! Repository spec to Nexus repository payload.
//!
//! The common shape (name, online, storage, cleanup) is always present.
//! The flavor adds proxy or group settings and the format adds its own block.

use super::TranslationError;
use crate::crd::{
    AuthenticationType, ContentDisposition, LayoutPolicy, MavenSpec, NegativeCacheSpec,
    HttpClientSpec, RepositorySpec, VersionPolicy, WritePolicy,
};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const KIND: &str = "repository";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryFormat {
    Maven,
    Npm,
    Docker,
    Raw,
}

impl RepositoryFormat {
    /// Path segment used by the repository management endpoints
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Maven => "maven",
            Self::Npm => "npm",
            Self::Docker => "docker",
            Self::Raw => "raw",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryFlavor {
    Hosted,
    Proxy,
    Group,
}

impl RepositoryFlavor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hosted => "hosted",
            Self::Proxy => "proxy",
            Self::Group => "group",
        }
    }
}

/// Parsed `spec.type`, e.g. `docker-proxy`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryType {
    pub format: RepositoryFormat,
    pub flavor: RepositoryFlavor,
}

impl RepositoryType {
    pub const fn new(format: RepositoryFormat, flavor: RepositoryFlavor) -> Self {
        Self { format, flavor }
    }
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.format.as_str(), self.flavor.as_str())
    }
}

impl FromStr for RepositoryType {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsupported = || TranslationError::UnsupportedType {
            kind: KIND,
            value: s.to_string(),
        };
        let (format, flavor) = s.split_once('-').ok_or_else(unsupported)?;
        let format = match format {
            "maven" => RepositoryFormat::Maven,
            "npm" => RepositoryFormat::Npm,
            "docker" => RepositoryFormat::Docker,
            "raw" => RepositoryFormat::Raw,
            _ => return Err(unsupported()),
        };
        let flavor = match flavor {
            "hosted" => RepositoryFlavor::Hosted,
            "proxy" => RepositoryFlavor::Proxy,
            "group" => RepositoryFlavor::Group,
            _ => return Err(unsupported()),
        };
        Ok(Self { format, flavor })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryPayload {
    /// Selects the create/update endpoint; not part of the body
    #[serde(skip)]
    pub repository_type: RepositoryType,
    pub name: String,
    pub online: bool,
    pub storage: StoragePayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup: Option<CleanupPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_cache: Option<NegativeCachePayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_client: Option<HttpClientPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maven: Option<MavenPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub npm: Option<NpmPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker: Option<DockerPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_proxy: Option<DockerProxyPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoragePayload {
    pub blob_store_name: String,
    pub strict_content_type_validation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_policy: Option<WritePolicy>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupPayload {
    pub policy_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyPayload {
    pub remote_url: String,
    pub content_max_age: i32,
    pub metadata_max_age: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NegativeCachePayload {
    pub enabled: bool,
    pub time_to_live: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpClientPayload {
    pub blocked: bool,
    pub auto_block: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<AuthenticationPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationPayload {
    pub r#type: AuthenticationType,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPayload {
    pub member_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MavenPayload {
    pub version_policy: VersionPolicy,
    pub layout_policy: LayoutPolicy,
    pub content_disposition: ContentDisposition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NpmPayload {
    pub remove_non_cataloged: bool,
    pub remove_quarantined: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerPayload {
    pub v1_enabled: bool,
    pub force_basic_auth: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerProxyPayload {
    pub index_type: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPayload {
    pub content_disposition: ContentDisposition,
}

/// Build the repository payload for `spec`.
///
/// # Errors
/// Unknown `type`, or a block the type requires is missing.
pub fn translate_repository(spec: &RepositorySpec) -> Result<RepositoryPayload, TranslationError> {
    let repository_type: RepositoryType = spec.r#type.parse()?;
    let missing = |block: &'static str| TranslationError::MissingBlock {
        kind: KIND,
        discriminator: spec.r#type.clone(),
        block,
    };

    let mut payload = RepositoryPayload {
        repository_type,
        name: spec.name.clone(),
        online: spec.online,
        storage: StoragePayload {
            blob_store_name: spec.storage.blob_store_name.clone(),
            strict_content_type_validation: spec.storage.strict_content_type_validation,
            write_policy: (repository_type.flavor == RepositoryFlavor::Hosted)
                .then_some(spec.storage.write_policy),
        },
        cleanup: spec.cleanup.as_ref().map(|c| CleanupPayload {
            policy_names: c.policy_names.clone(),
        }),
        proxy: None,
        negative_cache: None,
        http_client: None,
        group: None,
        maven: None,
        npm: None,
        docker: None,
        docker_proxy: None,
        raw: None,
    };

    match repository_type.flavor {
        RepositoryFlavor::Hosted => {}
        RepositoryFlavor::Proxy => {
            let proxy = spec.proxy.as_ref().ok_or_else(|| missing("proxy"))?;
            payload.proxy = Some(ProxyPayload {
                remote_url: proxy.remote_url.clone(),
                content_max_age: proxy.content_max_age,
                metadata_max_age: proxy.metadata_max_age,
            });
            let negative_cache = spec.negative_cache.clone().unwrap_or_default();
            payload.negative_cache = Some(negative_cache_payload(&negative_cache));
            let http_client = spec.http_client.clone().unwrap_or_default();
            payload.http_client = Some(http_client_payload(&http_client));
        }
        RepositoryFlavor::Group => {
            let group = spec.group.as_ref().ok_or_else(|| missing("group"))?;
            payload.group = Some(GroupPayload {
                member_names: group.member_names.clone(),
            });
        }
    }

    match repository_type.format {
        RepositoryFormat::Maven => {
            payload.maven = match (repository_type.flavor, &spec.maven) {
                (_, Some(maven)) => Some(maven_payload(maven)),
                (RepositoryFlavor::Group, None) => None,
                (_, None) => Some(maven_payload(&MavenSpec::default())),
            };
        }
        RepositoryFormat::Npm => {
            payload.npm = spec.npm.as_ref().map(|npm| NpmPayload {
                remove_non_cataloged: npm.remove_non_cataloged,
                remove_quarantined: npm.remove_quarantined,
            });
        }
        RepositoryFormat::Docker => {
            let docker = spec.docker.as_ref().ok_or_else(|| missing("docker"))?;
            payload.docker = Some(DockerPayload {
                v1_enabled: docker.v1_enabled,
                force_basic_auth: docker.force_basic_auth,
                http_port: docker.http_port,
                https_port: docker.https_port,
                subdomain: docker.subdomain.clone().filter(|s| !s.is_empty()),
            });
            if repository_type.flavor == RepositoryFlavor::Proxy {
                payload.docker_proxy = Some(DockerProxyPayload {
                    index_type: "REGISTRY",
                });
            }
        }
        RepositoryFormat::Raw => {
            payload.raw = spec.raw.as_ref().map(|raw| RawPayload {
                content_disposition: raw.content_disposition,
            });
        }
    }

    Ok(payload)
}

fn maven_payload(maven: &MavenSpec) -> MavenPayload {
    MavenPayload {
        version_policy: maven.version_policy,
        layout_policy: maven.layout_policy,
        content_disposition: maven.content_disposition,
    }
}

fn negative_cache_payload(cache: &NegativeCacheSpec) -> NegativeCachePayload {
    NegativeCachePayload {
        enabled: cache.enabled,
        time_to_live: cache.time_to_live,
    }
}

fn http_client_payload(client: &HttpClientSpec) -> HttpClientPayload {
    HttpClientPayload {
        blocked: client.blocked,
        auto_block: client.auto_block,
        authentication: client
            .authentication
            .as_ref()
            .map(|auth| AuthenticationPayload {
                r#type: auth.r#type,
                username: auth.username.clone(),
                password: auth.password.clone(),
            }),
    }
}
