//! # Prelude
//!
//! Re-exports commonly used types and traits for convenience.
//!
//! ```rust
//! use nexus_operator::prelude::*;
//! ```

// CRD types - most commonly used
pub use crate::crd::*;

// Nexus API seam and its HTTP implementation
pub use crate::nexus::{NexusApi, NexusClient, NexusError};

// Reconciler types - core controller functionality
pub use crate::controller::reconciler::{
    NexusResource, Reconciler, ReconcilerError, Requeue, SyncError,
};
pub use crate::controller::store::{KubeRecordStore, RecordStore, StoreError};

// Config types - for configuration management
pub use crate::config::{ConfigError, ControllerConfig, LogFormat, NexusConfig};

// Translation results
pub use crate::translate::TranslationError;
