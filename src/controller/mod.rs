//! # Controller
//!
//! Core controller modules for the Nexus operator.
//!
//! - `diff`: Drift detection between the translated payload and the Nexus object
//! - `finalizer`: Finalizer list helpers
//! - `reconciler`: The reconcile algorithm shared by all kinds
//! - `store`: Record loading and status/finalizer persistence

pub mod diff;
pub mod finalizer;
pub mod reconciler;
pub mod store;
