//! # Initialization
//!
//! Operator startup: rustls setup, tracing, metrics, server startup, the
//! Kubernetes client, the Nexus client and one reconciler per kind.

use crate::config::{ControllerConfig, LogFormat, NexusConfig};
use crate::constants::{DEFAULT_SERVER_POLL_INTERVAL_MS, DEFAULT_SERVER_STARTUP_TIMEOUT_SECS};
use crate::controller::reconciler::{NexusResource, Reconciler};
use crate::controller::store::KubeRecordStore;
use crate::nexus::{NexusApi, NexusClient};
use crate::observability;
use crate::runtime::watch_loop::Reconcilers;
use crate::server::{start_server, ServerState};
use anyhow::{Context, Result};
use kube::Client;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Everything the watch loop needs
pub struct InitializationResult {
    /// Kubernetes client
    pub client: Client,
    /// Reconcile contexts, one per kind
    pub reconcilers: Reconcilers,
    /// Server state for health checks
    pub server_state: Arc<ServerState>,
    /// Fires on shutdown; aborts in-flight Nexus calls
    pub cancellation: CancellationToken,
    pub controller_config: Arc<ControllerConfig>,
}

impl std::fmt::Debug for InitializationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitializationResult")
            .field(
                "server_ready",
                &self.server_state.is_ready.load(Ordering::Relaxed),
            )
            .field("controller_config", &self.controller_config)
            .finish_non_exhaustive()
    }
}

/// Initialize the operator runtime
///
/// This function handles:
/// - rustls crypto provider setup
/// - Tracing subscriber setup
/// - Metrics registration
/// - HTTP server startup
/// - Kubernetes client creation
/// - Nexus client creation from `NEXUS_URL`, `NEXUS_USER` and `NEXUS_PASSWORD`
/// - Reconciler setup
///
/// # Errors
/// Any of the steps above fails. Missing Nexus settings are fatal.
pub async fn initialize(controller_config: ControllerConfig) -> Result<InitializationResult> {
    // Must happen before anything opens a TLS connection
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        anyhow::bail!("Failed to install rustls crypto provider");
    }

    init_tracing(controller_config.log_format);

    info!("Starting Nexus Operator");
    info!(
        "Build info: timestamp={}, datetime={}, git_hash={}",
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_DATETIME"),
        env!("BUILD_GIT_HASH")
    );
    info!(?controller_config, "Loaded controller configuration");

    observability::metrics::register_metrics()?;

    let server_state = Arc::new(ServerState::new());
    let server_state_clone = Arc::clone(&server_state);
    let server_port = controller_config.metrics_port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(server_port, server_state_clone).await {
            error!("HTTP server error: {}", e);
        }
    });
    wait_for_server_listening(&server_state, &server_handle).await?;

    let client = Client::try_default()
        .await
        .context("Failed to create Kubernetes client")?;

    let nexus_config =
        NexusConfig::from_env().context("Invalid Nexus connection settings")?;
    info!(nexus.url = %nexus_config.url, nexus.user = %nexus_config.username, "Using Nexus instance");

    let cancellation = CancellationToken::new();
    let nexus: Arc<dyn NexusApi> = Arc::new(
        NexusClient::new(
            &nexus_config,
            controller_config.nexus_request_timeout(),
            cancellation.clone(),
        )
        .context("Failed to create Nexus client")?,
    );

    let controller_config = Arc::new(controller_config);
    let reconcilers = Reconcilers {
        repositories: reconciler(&client, &nexus, &controller_config),
        privileges: reconciler(&client, &nexus, &controller_config),
        roles: reconciler(&client, &nexus, &controller_config),
        content_selectors: reconciler(&client, &nexus, &controller_config),
    };

    server_state.is_ready.store(true, Ordering::Relaxed);
    info!("Operator initialized, starting watch loop...");

    Ok(InitializationResult {
        client,
        reconcilers,
        server_state,
        cancellation,
        controller_config,
    })
}

fn init_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt().with_env_filter(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "nexus_operator=info".into()),
    );
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn reconciler<K: NexusResource>(
    client: &Client,
    nexus: &Arc<dyn NexusApi>,
    config: &Arc<ControllerConfig>,
) -> Arc<Reconciler<K>> {
    Arc::new(Reconciler::new(
        Arc::clone(nexus),
        Arc::new(KubeRecordStore::<K>::new(client.clone())),
        Arc::clone(config),
    ))
}

/// Wait for the HTTP server to bind its port
async fn wait_for_server_listening(
    server_state: &Arc<ServerState>,
    server_handle: &tokio::task::JoinHandle<()>,
) -> Result<()> {
    let startup_timeout = Duration::from_secs(DEFAULT_SERVER_STARTUP_TIMEOUT_SECS);
    let poll_interval = Duration::from_millis(DEFAULT_SERVER_POLL_INTERVAL_MS);
    let start_time = Instant::now();

    loop {
        if server_handle.is_finished() {
            return Err(anyhow::anyhow!("HTTP server failed to start"));
        }

        if server_state.is_listening.load(Ordering::Relaxed) {
            info!("HTTP server is accepting connections");
            return Ok(());
        }

        if start_time.elapsed() > startup_timeout {
            return Err(anyhow::anyhow!(
                "HTTP server failed to bind within {} seconds",
                startup_timeout.as_secs()
            ));
        }

        tokio::time::sleep(poll_interval).await;
    }
}
