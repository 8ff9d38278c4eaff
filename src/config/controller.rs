//! # Controller Configuration
//!
//! Controller-level settings loaded from environment variables.

use crate::constants::{
    DEFAULT_MAX_CONCURRENT_RECONCILIATIONS, DEFAULT_METRICS_PORT,
    DEFAULT_NEXUS_REQUEST_TIMEOUT_SECS, DEFAULT_REQUEUE_DELAY_SECS,
};
use std::time::Duration;

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "pretty" => Ok(Self::Text),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Controller-level configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Delete repositories in Nexus when their record is deleted.
    /// When false, repositories are only released (soft delete).
    pub enable_repository_deletion: bool,
    /// Fixed delay before a failed sync is retried (seconds)
    pub requeue_delay_secs: u64,
    /// Retry records whose spec failed validation on the same fixed delay.
    /// When false, such records wait for the next spec change.
    pub requeue_on_validation_error: bool,
    /// Per-request timeout for Nexus API calls (seconds)
    pub nexus_request_timeout_secs: u64,
    /// Maximum concurrent reconciliations per kind
    pub max_concurrent_reconciliations: u16,
    /// Log format (json, text)
    pub log_format: LogFormat,
    /// Port of the metrics and probe server
    pub metrics_port: u16,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            enable_repository_deletion: false,
            requeue_delay_secs: DEFAULT_REQUEUE_DELAY_SECS,
            requeue_on_validation_error: true,
            nexus_request_timeout_secs: DEFAULT_NEXUS_REQUEST_TIMEOUT_SECS,
            max_concurrent_reconciliations: DEFAULT_MAX_CONCURRENT_RECONCILIATIONS,
            log_format: LogFormat::Json,
            metrics_port: DEFAULT_METRICS_PORT,
        }
    }
}

impl ControllerConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            enable_repository_deletion: parse_bool(
                lookup("ENABLE_REPOSITORY_DELETION"),
                defaults.enable_repository_deletion,
            ),
            requeue_delay_secs: parse_or(lookup("REQUEUE_DELAY_SECS"), defaults.requeue_delay_secs),
            requeue_on_validation_error: parse_bool(
                lookup("REQUEUE_ON_VALIDATION_ERROR"),
                defaults.requeue_on_validation_error,
            ),
            nexus_request_timeout_secs: parse_or(
                lookup("NEXUS_REQUEST_TIMEOUT_SECS"),
                defaults.nexus_request_timeout_secs,
            ),
            max_concurrent_reconciliations: parse_or(
                lookup("MAX_CONCURRENT_RECONCILIATIONS"),
                defaults.max_concurrent_reconciliations,
            ),
            log_format: parse_or(lookup("LOG_FORMAT"), defaults.log_format),
            metrics_port: parse_or(lookup("METRICS_PORT"), defaults.metrics_port),
        }
    }

    /// Get the retry delay after a failed sync
    pub fn requeue_delay(&self) -> Duration {
        Duration::from_secs(self.requeue_delay_secs)
    }

    /// Get the per-request Nexus timeout
    pub fn nexus_request_timeout(&self) -> Duration {
        Duration::from_secs(self.nexus_request_timeout_secs)
    }
}

/// Parse a value or fall back to the default
fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// Parse a boolean flag or fall back to the default
fn parse_bool(value: Option<String>, default: bool) -> bool {
    value
        .map(|v| {
            let v_lower = v.trim().to_lowercase();
            v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
        })
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = ControllerConfig::from_lookup(lookup_from(&[]));
        assert!(!config.enable_repository_deletion);
        assert!(config.requeue_on_validation_error);
        assert_eq!(config.requeue_delay(), Duration::from_secs(30));
        assert_eq!(config.nexus_request_timeout(), Duration::from_secs(30));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.metrics_port, DEFAULT_METRICS_PORT);
    }

    #[test]
    fn test_repository_deletion_flag() {
        let config =
            ControllerConfig::from_lookup(lookup_from(&[("ENABLE_REPOSITORY_DELETION", "true")]));
        assert!(config.enable_repository_deletion);

        let config =
            ControllerConfig::from_lookup(lookup_from(&[("ENABLE_REPOSITORY_DELETION", "nope")]));
        assert!(!config.enable_repository_deletion);
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let config = ControllerConfig::from_lookup(lookup_from(&[
            ("REQUEUE_DELAY_SECS", "soon"),
            ("METRICS_PORT", "9090"),
            ("LOG_FORMAT", "TEXT"),
        ]));
        assert_eq!(config.requeue_delay_secs, DEFAULT_REQUEUE_DELAY_SECS);
        assert_eq!(config.metrics_port, 9090);
        assert_eq!(config.log_format, LogFormat::Text);
    }
}
