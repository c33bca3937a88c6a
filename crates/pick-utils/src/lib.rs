//! Shared utilities for daily-pick
//!
//! Tracing setup and the required-environment lookups every binary in the
//! workspace starts with.

pub mod env;
pub mod logging;

pub use env::{EnvError, lookup_required};
pub use logging::init_tracing;
