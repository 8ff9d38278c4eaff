//! Nexus Operator Library
//!
//! Kubernetes operator that converges Nexus Repository Manager configuration
//! (repositories, privileges, roles and content selectors) from custom
//! resources onto the Nexus `/service/rest/v1` API.
//!
//! ## Quick Start
//!
//! ```rust
//! use nexus_operator::prelude::*;
//! ```
//!
//! This brings commonly used types and traits into scope. For more specific imports,
//! use the individual modules.

pub mod config;
pub mod constants;
pub mod controller;
pub mod crd;
pub mod nexus;
pub mod observability;
pub mod prelude;
pub mod runtime;
pub mod server;
pub mod translate;
