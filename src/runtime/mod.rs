//! # Runtime
//!
//! - `initialization`: startup of every long-lived component
//! - `watch_loop`: the per-kind controllers
//! - `error_policy`: retry of failed reconciles and stream error logging

pub mod error_policy;
pub mod initialization;
pub mod watch_loop;
