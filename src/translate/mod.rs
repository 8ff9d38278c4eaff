//! # Translation
//!
//! Pure conversion of a record's spec into the typed payload the Nexus API
//! expects. Nothing here performs I/O; payloads only become JSON at the HTTP
//! edge and inside the diff.

mod content_selector;
mod privilege;
mod repository;
mod role;

pub use content_selector::{translate_content_selector, ContentSelectorPayload, ContentSelectorUpdate};
pub use privilege::{translate_privilege, PrivilegePayload, PrivilegeTarget, PrivilegeType};
pub use repository::{
    translate_repository, AuthenticationPayload, CleanupPayload, DockerPayload, DockerProxyPayload,
    GroupPayload, HttpClientPayload, MavenPayload, NegativeCachePayload, NpmPayload, ProxyPayload,
    RawPayload, RepositoryFlavor, RepositoryFormat, RepositoryPayload, RepositoryType,
    StoragePayload,
};
pub use role::{translate_role, RolePayload};

use thiserror::Error;

/// A spec that can never produce a valid payload. Retrying without a spec
/// change yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    #[error("unsupported {kind} type '{value}'")]
    UnsupportedType { kind: &'static str, value: String },
    #[error("{kind} type '{discriminator}' requires the '{block}' block")]
    MissingBlock {
        kind: &'static str,
        discriminator: String,
        block: &'static str,
    },
    #[error("{kind} type '{discriminator}' does not accept the '{block}' block")]
    UnexpectedBlock {
        kind: &'static str,
        discriminator: String,
        block: &'static str,
    },
}
