//! # Pentama Library
//!
//! This library exposes the Pentama CLI commands for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod cli;

// Re-export pentama_core for convenience
pub use pentama_core;
