//! # Configuration
//!
//! - `controller`: reconcile and runtime tuning, all optional
//! - `nexus`: connection settings for the Nexus API, all required

mod controller;
mod nexus;

pub use controller::{ControllerConfig, LogFormat};
pub use nexus::{ConfigError, NexusConfig, NEXUS_PASSWORD_ENV, NEXUS_URL_ENV, NEXUS_USER_ENV};
