//! # Status
//!
//! Writes the sync outcome to the `Ready` condition and decides the requeue.
//!
//! The status is only written when the condition changed. A failed sync always
//! re-arms the retry delay, whether or not anything was written.

use super::types::{ReconcilerError, Requeue, SyncError};
use super::{NexusResource, Reconciler};
use crate::controller::store::StoreError;
use crate::crd::{set_condition, Condition};
use crate::observability::metrics;
use tracing::debug;

impl<K: NexusResource> Reconciler<K> {
    pub(super) async fn report_status(
        &self,
        record: &K,
        outcome: &Result<(), SyncError>,
    ) -> Result<Requeue, ReconcilerError> {
        let generation = record.meta().generation;
        let condition = match outcome {
            Ok(()) => Condition::ready(true, K::SUCCESS_MESSAGE, generation),
            Err(e) => Condition::ready(false, e.to_string(), generation),
        };

        let existing = record.status().cloned().unwrap_or_default();
        let condition_unchanged = existing
            .ready_condition()
            .is_some_and(|current| current.is_equivalent(&condition));
        let generation_recorded = outcome.is_err() || existing.observed_generation == generation;

        if condition_unchanged && generation_recorded {
            debug!("Ready condition unchanged, skipping status write");
        } else {
            let mut status = existing;
            set_condition(&mut status.conditions, condition);
            if outcome.is_ok() {
                status.observed_generation = generation;
            }
            match self.store.replace_status(record, &status).await {
                Ok(_) => debug!("Updated status"),
                Err(StoreError::Conflict) => {
                    debug!("Conflict while updating status, retrying");
                    metrics::increment_requeues_total("conflict");
                    return Ok(Requeue::Immediate);
                }
                Err(StoreError::NotFound) => return Ok(Requeue::None),
                Err(source) => {
                    return Err(ReconcilerError::Store {
                        operation: "update status",
                        source,
                    })
                }
            }
        }

        Ok(self.requeue_for(outcome))
    }

    fn requeue_for(&self, outcome: &Result<(), SyncError>) -> Requeue {
        match outcome {
            Ok(()) => Requeue::None,
            Err(e) if e.is_validation() && !self.config.requeue_on_validation_error => {
                debug!("Invalid spec, waiting for the next change");
                Requeue::None
            }
            Err(e) => {
                metrics::increment_requeues_total(e.class());
                Requeue::After(self.config.requeue_delay())
            }
        }
    }
}
