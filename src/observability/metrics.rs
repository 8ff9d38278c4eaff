//! # Metrics
//!
//! Prometheus metrics for monitoring the operator.
//!
//! ## Metrics Exposed
//!
//! - `nexus_operator_reconciliations_total{kind}` - Total number of reconciliations
//! - `nexus_operator_reconciliation_errors_total{kind}` - Reconciliations that returned an error
//! - `nexus_operator_reconciliation_duration_seconds{kind}` - Duration of reconciliations
//! - `nexus_operator_sync_failures_total{kind,class}` - Failed syncs by class (validation, remote, encode)
//! - `nexus_operator_remote_operations_total{kind,operation}` - Nexus API calls
//! - `nexus_operator_remote_operation_errors_total{kind,operation}` - Failed Nexus API calls
//! - `nexus_operator_remote_operation_duration_seconds{kind}` - Duration of Nexus API calls
//! - `nexus_operator_requeues_total{reason}` - Scheduled retries by reason

use anyhow::Result;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};
use std::sync::LazyLock;

pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static RECONCILIATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "nexus_operator_reconciliations_total",
            "Total number of reconciliations",
        ),
        &["kind"],
    )
    .expect("Failed to create RECONCILIATIONS_TOTAL metric - this should never happen")
});

static RECONCILIATION_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "nexus_operator_reconciliation_errors_total",
            "Total number of reconciliations that returned an error",
        ),
        &["kind"],
    )
    .expect("Failed to create RECONCILIATION_ERRORS_TOTAL metric - this should never happen")
});

static RECONCILIATION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "nexus_operator_reconciliation_duration_seconds",
            "Duration of reconciliation in seconds",
        )
        .buckets(vec![0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]),
        &["kind"],
    )
    .expect("Failed to create RECONCILIATION_DURATION metric - this should never happen")
});

static SYNC_FAILURES_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "nexus_operator_sync_failures_total",
            "Total number of failed syncs by failure class",
        ),
        &["kind", "class"],
    )
    .expect("Failed to create SYNC_FAILURES_TOTAL metric - this should never happen")
});

static REMOTE_OPERATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "nexus_operator_remote_operations_total",
            "Total number of Nexus API operations",
        ),
        &["kind", "operation"],
    )
    .expect("Failed to create REMOTE_OPERATIONS_TOTAL metric - this should never happen")
});

static REMOTE_OPERATION_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "nexus_operator_remote_operation_errors_total",
            "Total number of failed Nexus API operations",
        ),
        &["kind", "operation"],
    )
    .expect("Failed to create REMOTE_OPERATION_ERRORS_TOTAL metric - this should never happen")
});

static REMOTE_OPERATION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "nexus_operator_remote_operation_duration_seconds",
            "Duration of Nexus API operations in seconds",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 30.0]),
        &["kind"],
    )
    .expect("Failed to create REMOTE_OPERATION_DURATION metric - this should never happen")
});

static REQUEUES_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "nexus_operator_requeues_total",
            "Total number of scheduled retries by reason",
        ),
        &["reason"],
    )
    .expect("Failed to create REQUEUES_TOTAL metric - this should never happen")
});

pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(RECONCILIATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(RECONCILIATION_ERRORS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(RECONCILIATION_DURATION.clone()))?;
    REGISTRY.register(Box::new(SYNC_FAILURES_TOTAL.clone()))?;
    REGISTRY.register(Box::new(REMOTE_OPERATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(REMOTE_OPERATION_ERRORS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(REMOTE_OPERATION_DURATION.clone()))?;
    REGISTRY.register(Box::new(REQUEUES_TOTAL.clone()))?;
    Ok(())
}

pub fn increment_reconciliations(kind: &str) {
    RECONCILIATIONS_TOTAL.with_label_values(&[kind]).inc();
}

pub fn increment_reconciliation_errors(kind: &str) {
    RECONCILIATION_ERRORS_TOTAL.with_label_values(&[kind]).inc();
}

pub fn observe_reconciliation_duration(kind: &str, duration: f64) {
    RECONCILIATION_DURATION
        .with_label_values(&[kind])
        .observe(duration);
}

pub fn increment_sync_failures(kind: &str, class: &str) {
    SYNC_FAILURES_TOTAL.with_label_values(&[kind, class]).inc();
}

pub fn record_remote_operation(kind: &str, operation: &str, duration: f64) {
    REMOTE_OPERATIONS_TOTAL
        .with_label_values(&[kind, operation])
        .inc();
    REMOTE_OPERATION_DURATION
        .with_label_values(&[kind])
        .observe(duration);
}

pub fn increment_remote_operation_errors(kind: &str, operation: &str) {
    REMOTE_OPERATION_ERRORS_TOTAL
        .with_label_values(&[kind, operation])
        .inc();
}

pub fn increment_requeues_total(reason: &str) {
    REQUEUES_TOTAL.with_label_values(&[reason]).inc();
}
