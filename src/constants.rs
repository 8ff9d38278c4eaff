//! # Constants
//!
//! Shared constants used throughout the operator.
//!
//! These values represent reasonable defaults and can be overridden via
//! configuration or environment variables where applicable.

/// API group of every custom resource managed by the operator
pub const API_GROUP: &str = "nexus.operator.dev";

/// Finalizer that gates remote deletion of a managed record
pub const FINALIZER: &str = "nexus.operator.dev/finalizer";

/// Field manager name used for status and metadata patches
pub const FIELD_MANAGER: &str = "nexus-operator";

/// Name of the single condition maintained on every record
pub const READY_CONDITION: &str = "Ready";

/// Condition reason after a successful sync
pub const REASON_SUCCESS: &str = "Success";

/// Condition reason after a failed sync
pub const REASON_ERROR: &str = "Error";

/// Path prefix of the Nexus configuration API
pub const NEXUS_API_PREFIX: &str = "/service/rest/v1";

/// Default HTTP server port for metrics and health probes
pub const DEFAULT_METRICS_PORT: u16 = 8080;

/// Default HTTP server startup timeout (how long to wait for server to be ready)
pub const DEFAULT_SERVER_STARTUP_TIMEOUT_SECS: u64 = 10;

/// Default HTTP server readiness poll interval
pub const DEFAULT_SERVER_POLL_INTERVAL_MS: u64 = 50;

/// Fixed delay before a failed sync is retried (seconds)
pub const DEFAULT_REQUEUE_DELAY_SECS: u64 = 30;

/// Per-request timeout for Nexus API calls (seconds)
pub const DEFAULT_NEXUS_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default bound on concurrent reconciles per kind
pub const DEFAULT_MAX_CONCURRENT_RECONCILIATIONS: u16 = 10;
