//! # Types
//!
//! Outcome and error types of a reconcile pass.

use crate::controller::store::StoreError;
use crate::nexus::NexusError;
use crate::translate::TranslationError;
use kube_runtime::controller::Action;
use std::time::Duration;
use thiserror::Error;

/// When the watch loop should run the record again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requeue {
    /// Settled until the record changes
    None,
    /// Retry after a fixed delay
    After(Duration),
    /// Retry right away (write conflict)
    Immediate,
}

impl From<Requeue> for Action {
    fn from(requeue: Requeue) -> Self {
        match requeue {
            Requeue::None => Action::await_change(),
            Requeue::After(delay) => Action::requeue(delay),
            Requeue::Immediate => Action::requeue(Duration::ZERO),
        }
    }
}

/// Failure handed back to the watch loop's error policy
#[derive(Debug, Error)]
pub enum ReconcilerError {
    #[error("failed to {operation}: {source}")]
    Store {
        operation: &'static str,
        source: StoreError,
    },
    #[error("failed to delete {kind} '{name}': {source}")]
    RemoteDelete {
        kind: &'static str,
        name: String,
        source: NexusError,
    },
}

/// Failure of the sync path. Its message becomes the `Ready` condition message.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Validation(#[from] TranslationError),
    #[error("failed to {operation} {kind} '{name}': {source}")]
    Remote {
        operation: &'static str,
        kind: &'static str,
        name: String,
        source: NexusError,
    },
    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SyncError {
    pub(crate) fn remote(
        operation: &'static str,
        kind: &'static str,
        name: &str,
    ) -> impl FnOnce(NexusError) -> Self {
        let name = name.to_string();
        move |source| Self::Remote {
            operation,
            kind,
            name,
            source,
        }
    }

    /// Metric label for the failure class
    pub fn class(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Remote { .. } => "remote",
            Self::Encode(_) => "encode",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
