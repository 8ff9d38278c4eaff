//! Privilege spec to Nexus privilege payload.
//!
//! The privilege type and its type-specific fields form one tagged union, so a
//! payload can only ever carry the fields of its own type.

use super::TranslationError;
use crate::crd::PrivilegeSpec;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const KIND: &str = "privilege";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivilegeType {
    Wildcard,
    Application,
    RepositoryView,
    RepositoryAdmin,
    RepositoryContentSelector,
    Script,
}

impl PrivilegeType {
    pub const ALL: [Self; 6] = [
        Self::Wildcard,
        Self::Application,
        Self::RepositoryView,
        Self::RepositoryAdmin,
        Self::RepositoryContentSelector,
        Self::Script,
    ];

    /// Wire name, also the path segment of the create/update endpoints
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wildcard => "wildcard",
            Self::Application => "application",
            Self::RepositoryView => "repository-view",
            Self::RepositoryAdmin => "repository-admin",
            Self::RepositoryContentSelector => "repository-content-selector",
            Self::Script => "script",
        }
    }

    /// Name of the spec block this type reads from
    pub fn block(self) -> &'static str {
        match self {
            Self::Wildcard => "wildcard",
            Self::Application => "application",
            Self::RepositoryView => "repositoryView",
            Self::RepositoryAdmin => "repositoryAdmin",
            Self::RepositoryContentSelector => "repositoryContentSelector",
            Self::Script => "script",
        }
    }
}

impl fmt::Display for PrivilegeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrivilegeType {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TranslationError::UnsupportedType {
                kind: KIND,
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrivilegePayload {
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub target: PrivilegeTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PrivilegeTarget {
    Wildcard {
        pattern: String,
    },
    Application {
        domain: String,
        actions: Vec<String>,
    },
    RepositoryView {
        repository: String,
        actions: Vec<String>,
    },
    RepositoryAdmin {
        repository: String,
    },
    RepositoryContentSelector {
        repository: String,
        #[serde(rename = "contentSelector")]
        content_selector: String,
        format: String,
        actions: Vec<String>,
    },
    Script {
        #[serde(rename = "scriptName")]
        script_name: String,
    },
}

impl PrivilegeTarget {
    pub fn privilege_type(&self) -> PrivilegeType {
        match self {
            Self::Wildcard { .. } => PrivilegeType::Wildcard,
            Self::Application { .. } => PrivilegeType::Application,
            Self::RepositoryView { .. } => PrivilegeType::RepositoryView,
            Self::RepositoryAdmin { .. } => PrivilegeType::RepositoryAdmin,
            Self::RepositoryContentSelector { .. } => PrivilegeType::RepositoryContentSelector,
            Self::Script { .. } => PrivilegeType::Script,
        }
    }
}

impl PrivilegePayload {
    pub fn privilege_type(&self) -> PrivilegeType {
        self.target.privilege_type()
    }
}

/// Blocks present on the spec, by block name
fn present_blocks(spec: &PrivilegeSpec) -> Vec<&'static str> {
    [
        (spec.wildcard.is_some(), PrivilegeType::Wildcard),
        (spec.application.is_some(), PrivilegeType::Application),
        (spec.repository_view.is_some(), PrivilegeType::RepositoryView),
        (spec.repository_admin.is_some(), PrivilegeType::RepositoryAdmin),
        (
            spec.repository_content_selector.is_some(),
            PrivilegeType::RepositoryContentSelector,
        ),
        (spec.script.is_some(), PrivilegeType::Script),
    ]
    .into_iter()
    .filter_map(|(present, t)| present.then(|| t.block()))
    .collect()
}

/// Build the privilege payload for `spec`.
///
/// # Errors
/// Unknown `type`, the block for the type is missing, or another type's
/// block is present.
pub fn translate_privilege(spec: &PrivilegeSpec) -> Result<PrivilegePayload, TranslationError> {
    let privilege_type: PrivilegeType = spec.r#type.parse()?;
    let missing = || TranslationError::MissingBlock {
        kind: KIND,
        discriminator: spec.r#type.clone(),
        block: privilege_type.block(),
    };

    let target = match privilege_type {
        PrivilegeType::Wildcard => {
            let block = spec.wildcard.as_ref().ok_or_else(missing)?;
            PrivilegeTarget::Wildcard {
                pattern: block.pattern.clone(),
            }
        }
        PrivilegeType::Application => {
            let block = spec.application.as_ref().ok_or_else(missing)?;
            PrivilegeTarget::Application {
                domain: block.domain.clone(),
                actions: block.actions.clone(),
            }
        }
        PrivilegeType::RepositoryView => {
            let block = spec.repository_view.as_ref().ok_or_else(missing)?;
            PrivilegeTarget::RepositoryView {
                repository: block.repository.clone(),
                actions: block.actions.clone(),
            }
        }
        PrivilegeType::RepositoryAdmin => {
            let block = spec.repository_admin.as_ref().ok_or_else(missing)?;
            PrivilegeTarget::RepositoryAdmin {
                repository: block.repository.clone(),
            }
        }
        PrivilegeType::RepositoryContentSelector => {
            let block = spec
                .repository_content_selector
                .as_ref()
                .ok_or_else(missing)?;
            PrivilegeTarget::RepositoryContentSelector {
                repository: block.repository.clone(),
                content_selector: block.content_selector.clone(),
                format: block.format.clone(),
                actions: block.actions.clone(),
            }
        }
        PrivilegeType::Script => {
            let block = spec.script.as_ref().ok_or_else(missing)?;
            PrivilegeTarget::Script {
                script_name: block.script_name.clone(),
            }
        }
    };

    if let Some(extra) = present_blocks(spec)
        .into_iter()
        .find(|block| *block != privilege_type.block())
    {
        return Err(TranslationError::UnexpectedBlock {
            kind: KIND,
            discriminator: spec.r#type.clone(),
            block: extra,
        });
    }

    Ok(PrivilegePayload {
        name: spec.name.clone(),
        description: spec.description.clone(),
        target,
    })
}
