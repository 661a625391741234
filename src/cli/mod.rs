//! CLI module for the `reviewxai` binary
//!
//! This module contains all CLI-related functionality including:
//! - Command line argument parsing
//! - Command handlers (one file per command in handlers/)
//! - Output formatting and the terminal dashboard view

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::*;
pub use handlers::*;
pub use output::*;
