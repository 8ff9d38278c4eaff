//! # Reconciler
//!
//! One reconcile algorithm shared by every managed kind.
//!
//! ## Reconciliation Flow
//!
//! 1. Load the record by identity (gone means settled)
//! 2. Deletion requested: release the Nexus object, then drop the finalizer
//! 3. Ensure the finalizer is present
//! 4. Translate the spec, read the Nexus object, then create it or update it
//!    when the diff says it drifted
//! 5. Report the outcome on the `Ready` condition and pick the requeue

mod finalize;
mod reconcile;
mod resource;
mod status;
mod types;

pub use resource::NexusResource;
pub use types::{ReconcilerError, Requeue, SyncError};

use crate::config::ControllerConfig;
use crate::controller::store::RecordStore;
use crate::nexus::NexusApi;
use std::sync::Arc;

/// Reconcile context for kind `K`
pub struct Reconciler<K: NexusResource> {
    pub nexus: Arc<dyn NexusApi>,
    pub store: Arc<dyn RecordStore<K>>,
    pub config: Arc<ControllerConfig>,
}

impl<K: NexusResource> Reconciler<K> {
    pub fn new(
        nexus: Arc<dyn NexusApi>,
        store: Arc<dyn RecordStore<K>>,
        config: Arc<ControllerConfig>,
    ) -> Self {
        Self {
            nexus,
            store,
            config,
        }
    }
}

impl<K: NexusResource> std::fmt::Debug for Reconciler<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("kind", &K::KIND)
            .field("nexus", &self.nexus)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod testing;
