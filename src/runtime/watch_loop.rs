//! # Watch Loop
//!
//! Runs one `kube-runtime` controller per managed kind, side by side, until a
//! shutdown signal arrives.

use crate::controller::finalizer::has_finalizer;
use crate::controller::reconciler::{NexusResource, Reconciler, ReconcilerError};
use crate::crd::{ContentSelector, Privilege, Repository, Role};
use crate::runtime::error_policy::{handle_reconciliation_error, log_controller_result};
use crate::server::ServerState;
use futures::StreamExt;
use kube::api::Api;
use kube::Client;
use kube_runtime::controller::{self, Action};
use kube_runtime::reflector::ObjectRef;
use kube_runtime::{watcher, Controller};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, Instrument};

/// Reconcile contexts for every managed kind
#[derive(Debug)]
pub struct Reconcilers {
    pub repositories: Arc<Reconciler<Repository>>,
    pub privileges: Arc<Reconciler<Privilege>>,
    pub roles: Arc<Reconciler<Role>>,
    pub content_selectors: Arc<Reconciler<ContentSelector>>,
}

/// Run the four controllers until shutdown.
///
/// On SIGINT/SIGTERM the server is marked not ready and `cancellation` fires,
/// failing in-flight Nexus calls fast while the controllers drain.
pub async fn run_watch_loop(
    client: Client,
    reconcilers: Reconcilers,
    server_state: Arc<ServerState>,
    cancellation: CancellationToken,
    concurrency: u16,
) {
    let shutdown_token = cancellation.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Received shutdown signal (SIGINT/SIGTERM), initiating graceful shutdown...");
        server_state.is_ready.store(false, Ordering::Relaxed);
        shutdown_token.cancel();
    });

    let watch_span = tracing::span!(
        tracing::Level::INFO,
        "controller.watch",
        operation = "watch_loop"
    );
    async {
        info!(
            "Starting controllers (concurrency {} per kind)...",
            concurrency
        );
        tokio::join!(
            run_controller(&client, reconcilers.repositories, concurrency),
            run_controller(&client, reconcilers.privileges, concurrency),
            run_controller(&client, reconcilers.roles, concurrency),
            run_controller(&client, reconcilers.content_selectors, concurrency),
        );
    }
    .instrument(watch_span)
    .await;

    info!("Controller stopped gracefully");
}

async fn run_controller<K: NexusResource>(
    client: &Client,
    reconciler: Arc<Reconciler<K>>,
    concurrency: u16,
) {
    let api: Api<K> = Api::all(client.clone());
    Controller::new(api, watcher::Config::default())
        .with_config(controller::Config::default().concurrency(concurrency))
        .shutdown_on_signal()
        .run(reconcile::<K>, handle_reconciliation_error::<K>, reconciler)
        .for_each(|result| {
            log_controller_result(result);
            futures::future::ready(())
        })
        .await;
    info!(resource.kind = K::KIND, "Controller stream ended");
}

async fn reconcile<K: NexusResource>(
    obj: Arc<K>,
    ctx: Arc<Reconciler<K>>,
) -> Result<Action, ReconcilerError> {
    let meta = obj.meta();
    let reconcile_span = tracing::span!(
        tracing::Level::INFO,
        "controller.watch.reconcile",
        resource.kind = K::KIND,
        resource.name = meta.name.as_deref().unwrap_or("unknown"),
        resource.namespace = meta.namespace.as_deref().unwrap_or("default"),
        resource.version = meta.resource_version.as_deref().unwrap_or("unknown"),
        resource.generation = meta.generation.unwrap_or(0),
        event.r#type = "watch_triggered"
    );

    async {
        if is_settled(obj.as_ref()) {
            debug!("Skipping reconciliation - ready at current generation");
            return Ok(Action::await_change());
        }

        ctx.reconcile(&ObjectRef::from_obj(obj.as_ref()))
            .await
            .map(Action::from)
    }
    .instrument(reconcile_span)
    .await
}

/// Ready at the current generation with nothing left to do: only the status
/// (or other non-spec metadata) changed since the last successful sync.
fn is_settled<K: NexusResource>(obj: &K) -> bool {
    let meta = obj.meta();
    meta.deletion_timestamp.is_none()
        && has_finalizer(obj)
        && obj.status().is_some_and(|status| {
            status.is_ready()
                && status.observed_generation.is_some()
                && status.observed_generation == meta.generation
        })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
