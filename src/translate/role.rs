//! Role spec to Nexus role payload. A direct copy; roles have no discriminator.

use crate::crd::RoleSpec;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolePayload {
    pub id: String,
    pub name: String,
    pub description: String,
    pub privileges: Vec<String>,
    pub roles: Vec<String>,
}

pub fn translate_role(spec: &RoleSpec) -> RolePayload {
    RolePayload {
        id: spec.role_id.clone(),
        name: spec.name.clone(),
        description: spec.description.clone(),
        privileges: spec.privileges.clone(),
        roles: spec.roles.clone(),
    }
}
