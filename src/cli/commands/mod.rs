//! CLI command handlers for `examprep`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod charts;
pub mod config;
pub mod reading_list;
