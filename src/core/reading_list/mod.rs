//! Reading list builder
//!
//! Turns a tab-separated topic index (`Topic<TAB>Mapping`) into a Markdown
//! reading list grouped by textbook, plus a list of topics no textbook covers.

pub mod catalog;
pub mod markdown;
pub mod parser;
pub mod source;

use std::collections::BTreeMap;

pub use catalog::{BookAlias, BookCatalog, BookMatch, STANDARD_ALIASES};
pub use markdown::{render_markdown, write_reading_list};
pub use parser::{
    parse_line, parse_reading_list, parse_reading_list_with, ParseOptions, ParsedLine,
    TopicStatus,
};
pub use source::EMBEDDED_TOPIC_INDEX;

/// A topic and the chapters of one book that address it
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChapterRef {
    /// Topic name
    pub topic: String,
    /// Free-text chapter description
    pub detail: String,
}

/// Topics grouped by canonical book name, plus the topics no book covers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingList {
    books: BTreeMap<String, Vec<ChapterRef>>,
    uncovered: Vec<String>,
}

impl ReadingList {
    /// Create an empty reading list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chapter reference for `topic` under `book`.
    ///
    /// A topic filed under any book is no longer listed as uncovered.
    pub fn add_chapter(&mut self, book: &str, topic: &str, detail: String) {
        self.uncovered.retain(|t| t != topic);
        self.books
            .entry(book.to_string())
            .or_default()
            .push(ChapterRef {
                topic: topic.to_string(),
                detail,
            });
    }

    /// Record `topic` as not covered by any book, unless a book already covers it
    pub fn add_uncovered(&mut self, topic: &str) {
        if !self.is_covered(topic) {
            self.uncovered.push(topic.to_string());
        }
    }

    /// True when some book has an entry for `topic`
    #[must_use]
    pub fn is_covered(&self, topic: &str) -> bool {
        self.books
            .values()
            .any(|refs| refs.iter().any(|r| r.topic == topic))
    }

    /// Fold one parsed line into the list
    pub fn record(&mut self, parsed: ParsedLine) {
        match parsed.status {
            TopicStatus::Covered(refs) => {
                for (book, detail) in refs {
                    self.add_chapter(book, &parsed.topic, detail);
                }
            }
            TopicStatus::Uncovered => self.add_uncovered(&parsed.topic),
        }
    }

    /// Books in lexicographic order, each with its entries sorted by topic then detail
    #[must_use]
    pub fn sorted_books(&self) -> Vec<(&str, Vec<&ChapterRef>)> {
        self.books
            .iter()
            .map(|(book, refs)| {
                let mut sorted: Vec<&ChapterRef> = refs.iter().collect();
                sorted.sort();
                (book.as_str(), sorted)
            })
            .collect()
    }

    /// Uncovered topics in lexicographic order
    #[must_use]
    pub fn sorted_uncovered(&self) -> Vec<&str> {
        let mut topics: Vec<&str> = self.uncovered.iter().map(String::as_str).collect();
        topics.sort_unstable();
        topics
    }

    /// Entries filed under `book`, in insertion order
    #[must_use]
    pub fn chapters_for(&self, book: &str) -> &[ChapterRef] {
        self.books
            .get(book)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Canonical names of the books that cover at least one topic
    pub fn book_names(&self) -> impl Iterator<Item = &str> {
        self.books.keys().map(String::as_str)
    }

    /// Uncovered topics in insertion order
    #[must_use]
    pub fn uncovered(&self) -> &[String] {
        &self.uncovered
    }

    /// Number of chapter references across all books
    #[must_use]
    pub fn chapter_count(&self) -> usize {
        self.books.values().map(Vec::len).sum()
    }

    /// True when nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.uncovered.is_empty()
    }
}
