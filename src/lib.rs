//! Library for `examprep`
//!
//! Two independent tools share this crate: the reading list builder, which
//! turns a topic-to-textbook index into a Markdown reading list, and the
//! exercise visualizer, which charts topic and source statistics from a
//! directory of exercise JSON files.

pub mod config;
pub mod core;
pub mod error;

pub use error::{ExamPrepError, Result};
