//! # Custom Resource Definitions
//!
//! CRD types for the Nexus operator.
//!
//! ## Module Structure
//!
//! - `repository.rs` - Repository spec and its format/flavor blocks
//! - `privilege.rs` - Privilege spec and one block per privilege type
//! - `role.rs` - Role spec
//! - `content_selector.rs` - Content selector spec
//! - `condition.rs` - Conditions and the status shared by all kinds

mod condition;
mod content_selector;
mod privilege;
mod repository;
mod role;

pub use condition::{
    find_condition, set_condition, Condition, ConditionStatus, NexusResourceStatus,
};
pub use content_selector::{ContentSelector, ContentSelectorSpec};
pub use privilege::{
    ApplicationPrivilegeSpec, Privilege, PrivilegeSpec, RepositoryAdminPrivilegeSpec,
    RepositoryContentSelectorPrivilegeSpec, RepositoryViewPrivilegeSpec, ScriptPrivilegeSpec,
    WildcardPrivilegeSpec,
};
pub use repository::{
    AuthenticationType, CleanupSpec, ContentDisposition, DockerSpec, GroupSpec,
    HttpClientAuthenticationSpec, HttpClientSpec, LayoutPolicy, MavenSpec, NegativeCacheSpec,
    NpmSpec, ProxySpec, RawSpec, Repository, RepositorySpec, StorageSpec, VersionPolicy,
    WritePolicy,
};
pub use role::{Role, RoleSpec};
