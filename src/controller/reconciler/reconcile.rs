//! # Reconciliation Logic
//!
//! Entry point of a reconcile pass and the sync path.

use super::types::{ReconcilerError, Requeue, SyncError};
use super::{NexusResource, Reconciler};
use crate::controller::finalizer::{has_finalizer, with_finalizer};
use crate::controller::store::StoreError;
use crate::observability::metrics;
use kube_runtime::reflector::ObjectRef;
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};

impl<K: NexusResource> Reconciler<K> {
    /// Run one reconcile pass for the record at `identity`.
    ///
    /// # Errors
    /// The record store failed outside status reporting, or the Nexus object
    /// of a deleted record could not be removed.
    pub async fn reconcile(&self, identity: &ObjectRef<K>) -> Result<Requeue, ReconcilerError> {
        let start = Instant::now();
        metrics::increment_reconciliations(K::KIND);

        let span = info_span!(
            "reconcile",
            resource.kind = K::KIND,
            resource.name = identity.name.as_str(),
            resource.namespace = identity.namespace.as_deref().unwrap_or_default()
        );
        let result = self.reconcile_record(identity).instrument(span).await;

        metrics::observe_reconciliation_duration(K::KIND, start.elapsed().as_secs_f64());
        result
    }

    async fn reconcile_record(&self, identity: &ObjectRef<K>) -> Result<Requeue, ReconcilerError> {
        let Some(record) = self
            .store
            .get(identity)
            .await
            .map_err(|source| ReconcilerError::Store {
                operation: "load record",
                source,
            })?
        else {
            debug!("Record no longer exists, nothing to do");
            return Ok(Requeue::None);
        };

        if record.meta().deletion_timestamp.is_some() {
            return self.finalize(&record).await;
        }

        let record = if has_finalizer(&record) {
            record
        } else {
            match self
                .store
                .replace_finalizers(&record, with_finalizer(&record))
                .await
            {
                Ok(updated) => {
                    debug!("Added finalizer");
                    updated
                }
                Err(StoreError::Conflict) => {
                    debug!("Conflict while adding finalizer, retrying");
                    metrics::increment_requeues_total("conflict");
                    return Ok(Requeue::Immediate);
                }
                Err(StoreError::NotFound) => return Ok(Requeue::None),
                Err(source) => {
                    return Err(ReconcilerError::Store {
                        operation: "add finalizer",
                        source,
                    })
                }
            }
        };

        let outcome = self.sync(&record).await;
        match &outcome {
            Ok(()) => info!(remote.name = record.remote_name(), "{} is in sync", K::KIND),
            Err(e) => {
                warn!(remote.name = record.remote_name(), error = %e, "Sync failed");
                metrics::increment_sync_failures(K::KIND, e.class());
            }
        }

        self.report_status(&record, &outcome).await
    }

    /// Converge the Nexus object towards the record's spec.
    async fn sync(&self, record: &K) -> Result<(), SyncError> {
        let payload = record.translate()?;
        let name = record.remote_name();
        let nexus = self.nexus.as_ref();

        let current = K::fetch_remote(nexus, name)
            .await
            .map_err(SyncError::remote("get", K::KIND, name))?;

        let Some(current) = current else {
            K::create_remote(nexus, &payload)
                .await
                .map_err(SyncError::remote("create", K::KIND, name))?;
            info!(remote.name = name, "Created {} in Nexus", K::KIND);
            return Ok(());
        };

        let desired = serde_json::to_value(&payload)?;
        if !K::DIFF_RULE.needs_update(&desired, &current) {
            debug!(remote.name = name, "Nexus object is up to date");
            return Ok(());
        }

        K::update_remote(nexus, &payload)
            .await
            .map_err(SyncError::remote("update", K::KIND, name))?;
        info!(remote.name = name, "Updated {} in Nexus", K::KIND);
        Ok(())
    }
}
