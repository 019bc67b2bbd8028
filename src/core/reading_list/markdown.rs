//! Markdown rendering of the reading list
//!
//! Books appear in lexicographic order, each followed by its topics sorted by
//! name, then the topics without a textbook. The output has no timestamps, so
//! the same input always yields the same bytes.

use super::ReadingList;
use crate::error::{ExamPrepError, Result};
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded reading list template
const READING_LIST_TEMPLATE: &str = include_str!("templates/reading_list.md");

/// Render `list` as a Markdown document
#[must_use]
pub fn render_markdown(list: &ReadingList) -> String {
    READING_LIST_TEMPLATE
        .replace("{{book_sections}}", &book_sections(list))
        .replace("{{uncovered_topics}}", &uncovered_topics(list))
}

/// One `## Book` section per book with a bullet per topic
fn book_sections(list: &ReadingList) -> String {
    let mut out = String::new();
    for (book, chapters) in list.sorted_books() {
        let _ = writeln!(out, "## {book}\n");
        for chapter in chapters {
            let _ = writeln!(out, "- **{}**: {}", chapter.topic, chapter.detail);
        }
        out.push('\n');
    }
    out
}

fn uncovered_topics(list: &ReadingList) -> String {
    let mut out = String::new();
    for topic in list.sorted_uncovered() {
        let _ = writeln!(out, "- {topic}");
    }
    out
}

/// Render `list` and write it to `output_path`, replacing any existing file
///
/// Missing parent directories are created.
///
/// # Errors
/// Returns [`ExamPrepError::Io`] naming the path that could not be created or written.
pub fn write_reading_list(list: &ReadingList, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExamPrepError::io(parent, e))?;
    }
    fs::write(output_path, render_markdown(list)).map_err(|e| ExamPrepError::io(output_path, e))
}
