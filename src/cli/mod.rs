//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.

mod combine;

pub use combine::{run_combine, STDIN_INPUT};

// Re-export config types used by handlers
pub use crate::config::CombineConfig;
