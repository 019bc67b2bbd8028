//! Parser for the `Topic<TAB>Mapping` topic index

use super::catalog::{BookCatalog, BookMatch};
use super::ReadingList;
use crate::error::{ExamPrepError, Result};
use logger::debug;
use regex::Regex;
use std::sync::LazyLock;

/// Subject headers that separate the index into blocks; they carry no mapping
pub const SECTION_HEADERS: &[&str] = &["PHYSICS", "MATHEMATICS", "STATISTICS & PROBABILITY"];

/// Phrases that mark a topic as not covered by any textbook
pub const NOT_COVERED_MARKERS: &[&str] = &["Not explicitly covered", "not listed"];

/// Separates the per-book sections of a topic covered by several books
static BOOK_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*<br>\s*").expect("separator pattern is valid"));

/// Parsing behavior switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail on a section that names no known book instead of dropping it
    pub strict: bool,
}

impl ParseOptions {
    /// Options with strict book matching
    #[must_use]
    pub const fn strict() -> Self {
        Self { strict: true }
    }
}

/// Where a topic ended up after parsing its mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicStatus {
    /// Chapter details per canonical book, in section order
    Covered(Vec<(&'static str, String)>),
    /// No textbook addresses the topic
    Uncovered,
}

/// One parsed `Topic<TAB>Mapping` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Topic name
    pub topic: String,
    /// Resolved coverage
    pub status: TopicStatus,
    /// Sections that named no known book
    pub dropped: Vec<String>,
}

/// Parse a single line of the index.
///
/// Returns `Ok(None)` for blank lines and section headers. A topic whose every
/// section was dropped is reported as [`TopicStatus::Uncovered`], so each topic
/// lands in exactly one category.
///
/// # Errors
/// - [`ExamPrepError::MalformedLine`] when the line has no tab.
/// - [`ExamPrepError::UnknownBook`] in strict mode when a section names no known book.
pub fn parse_line(
    catalog: &BookCatalog,
    line: &str,
    line_number: usize,
    options: ParseOptions,
) -> Result<Option<ParsedLine>> {
    let line = line.trim();
    if line.is_empty() || SECTION_HEADERS.contains(&line) {
        return Ok(None);
    }

    let (topic, mapping) = line
        .split_once('\t')
        .ok_or_else(|| ExamPrepError::MalformedLine {
            line_number,
            content: line.to_string(),
        })?;
    let topic = topic.trim().to_string();
    let mapping = mapping.trim();

    if NOT_COVERED_MARKERS
        .iter()
        .any(|marker| mapping.contains(marker))
    {
        return Ok(Some(ParsedLine {
            topic,
            status: TopicStatus::Uncovered,
            dropped: Vec::new(),
        }));
    }

    let mut refs = Vec::new();
    let mut dropped = Vec::new();
    for section in BOOK_SEPARATOR.split(mapping).filter(|s| !s.is_empty()) {
        if let Some(found) = catalog.find(section) {
            refs.push((found.canonical, chapter_detail(section, &found)));
        } else if options.strict {
            return Err(ExamPrepError::UnknownBook {
                line_number,
                topic,
                section: section.to_string(),
            });
        } else {
            debug!("Line {line_number}: dropping section without a known book: '{section}'");
            dropped.push(section.to_string());
        }
    }

    let status = if refs.is_empty() {
        TopicStatus::Uncovered
    } else {
        TopicStatus::Covered(refs)
    };
    Ok(Some(ParsedLine {
        topic,
        status,
        dropped,
    }))
}

/// Text of `section` without the matched book name and its trailing colon
fn chapter_detail(section: &str, found: &BookMatch) -> String {
    let before = &section[..found.start];
    let after = &section[found.end..];
    let after = after.strip_prefix(':').unwrap_or(after);
    format!("{before}{after}").trim().to_string()
}

/// Parse a whole topic index with the standard book catalog
///
/// # Errors
/// Fails on the first malformed line (or unknown book in strict mode); no
/// partial result is returned.
pub fn parse_reading_list(text: &str, options: ParseOptions) -> Result<ReadingList> {
    parse_reading_list_with(BookCatalog::standard(), text, options)
}

/// Parse a whole topic index with a custom catalog
///
/// # Errors
/// See [`parse_reading_list`].
pub fn parse_reading_list_with(
    catalog: &BookCatalog,
    text: &str,
    options: ParseOptions,
) -> Result<ReadingList> {
    let mut list = ReadingList::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(parsed) = parse_line(catalog, line, idx + 1, options)? {
            list.record(parsed);
        }
    }
    Ok(list)
}
