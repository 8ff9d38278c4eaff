//! # Deletion
//!
//! Releases the Nexus object of a record that is being deleted. The finalizer
//! only comes off after Nexus confirmed the delete (or never had the object),
//! unless remote deletion is disabled for the kind.

use super::types::{ReconcilerError, Requeue};
use super::{NexusResource, Reconciler};
use crate::controller::finalizer::{has_finalizer, without_finalizer};
use crate::controller::store::StoreError;
use crate::observability::metrics;
use tracing::{debug, info, warn};

impl<K: NexusResource> Reconciler<K> {
    pub(super) async fn finalize(&self, record: &K) -> Result<Requeue, ReconcilerError> {
        if !has_finalizer(record) {
            debug!("Finalizer already removed, nothing to release");
            return Ok(Requeue::None);
        }

        let name = record.remote_name();
        if K::remote_deletion_enabled(&self.config) {
            match K::delete_remote(self.nexus.as_ref(), name).await {
                Ok(()) => info!(remote.name = name, "Deleted {} from Nexus", K::KIND),
                Err(e) if e.is_not_found() => {
                    debug!(remote.name = name, "{} already absent from Nexus", K::KIND);
                }
                Err(source) => {
                    warn!(remote.name = name, error = %source, "Failed to delete {} from Nexus", K::KIND);
                    return Err(ReconcilerError::RemoteDelete {
                        kind: K::KIND,
                        name: name.to_string(),
                        source,
                    });
                }
            }
        } else {
            info!(
                remote.name = name,
                "Remote deletion disabled, leaving {} in Nexus", K::KIND
            );
        }

        match self
            .store
            .replace_finalizers(record, without_finalizer(record))
            .await
        {
            Ok(_) | Err(StoreError::NotFound) => {
                debug!("Removed finalizer");
                Ok(Requeue::None)
            }
            Err(StoreError::Conflict) => {
                debug!("Conflict while removing finalizer, retrying");
                metrics::increment_requeues_total("conflict");
                Ok(Requeue::Immediate)
            }
            Err(source) => Err(ReconcilerError::Store {
                operation: "remove finalizer",
                source,
            }),
        }
    }
}
