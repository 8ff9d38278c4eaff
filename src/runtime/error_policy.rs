//! # Error Policy
//!
//! Handling of reconcile errors and controller stream errors for the watch loop.

use crate::controller::reconciler::{NexusResource, Reconciler, ReconcilerError};
use crate::observability::metrics;
use kube_runtime::controller::{self, Action};
use kube_runtime::reflector::ObjectRef;
use kube_runtime::watcher;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Retry a failed reconcile after the fixed requeue delay.
///
/// A failed remote delete keeps the finalizer, so the retry repeats the delete.
pub fn handle_reconciliation_error<K: NexusResource>(
    obj: Arc<K>,
    error: &ReconcilerError,
    ctx: Arc<Reconciler<K>>,
) -> Action {
    let meta = obj.meta();
    let name = meta.name.as_deref().unwrap_or("unknown");
    let namespace = meta.namespace.as_deref().unwrap_or("default");

    let error_span = tracing::span!(
        tracing::Level::ERROR,
        "controller.watch.reconciliation_error",
        resource.kind = K::KIND,
        resource.name = name,
        resource.namespace = namespace,
        error = %error
    );
    let _error_guard = error_span.enter();

    error!("Reconciliation error for {} {}/{}: {}", K::KIND, namespace, name, error);
    metrics::increment_reconciliation_errors(K::KIND);
    metrics::increment_requeues_total("error-policy");

    let delay = ctx.config.requeue_delay();
    debug!("Retrying in {}s", delay.as_secs());
    Action::requeue(delay)
}

/// Log one item of a controller's output stream.
pub fn log_controller_result<K: NexusResource>(
    result: Result<(ObjectRef<K>, Action), controller::Error<ReconcilerError, watcher::Error>>,
) {
    match result {
        Ok((obj, action)) => {
            debug!(resource.kind = K::KIND, resource = %obj, ?action, "Reconciled");
        }
        // Already reported by the error policy
        Err(controller::Error::ReconcilerFailed(..)) => {}
        Err(controller::Error::ObjectNotFound(obj)) => {
            debug!(resource.kind = K::KIND, resource = %obj, "Object left the cache before its reconcile ran");
        }
        Err(e) => {
            warn!(resource.kind = K::KIND, error = %e, "Controller stream error");
        }
    }
}
