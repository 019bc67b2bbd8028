//! Core functionality shared by the CLI commands

pub mod charts;
pub mod exercises;
pub mod reading_list;

/// Returns the current version of the `examprep` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
