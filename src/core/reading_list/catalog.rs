//! Textbook alias table and the finder that locates book names in free text

use regex::Regex;
use std::sync::LazyLock;

/// One raw spelling of a book and the canonical name it resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookAlias {
    /// Text as it appears in the topic index
    pub pattern: &'static str,
    /// Display name used as the reading list section heading
    pub canonical: &'static str,
}

impl BookAlias {
    /// Create an alias entry
    #[must_use]
    pub const fn new(pattern: &'static str, canonical: &'static str) -> Self {
        Self { pattern, canonical }
    }
}

/// Known book spellings, in match precedence order.
///
/// When two patterns match at the same position the earlier entry wins, so a
/// longer spelling must come before any pattern that is a prefix of it.
pub const STANDARD_ALIASES: &[BookAlias] = &[
    BookAlias::new("E&M (Purcell & Morin)", "E&M (Purcell & Morin)"),
    BookAlias::new(
        "Mechanics (Kleppner & Kolenkow)",
        "Mechanics (Kleppner & Kolenkow)",
    ),
    BookAlias::new("Calculus (Stewart)", "Calculus (Stewart)"),
    BookAlias::new("Statistics (Devore, in Spanish)", "Statistics (Devore)"),
    BookAlias::new("Statistics (Devore)", "Statistics (Devore)"),
];

static STANDARD: LazyLock<BookCatalog> = LazyLock::new(|| {
    BookCatalog::new(STANDARD_ALIASES).expect("built-in book aliases form a valid pattern")
});

/// A book name found inside a mapping section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookMatch<'t> {
    /// Canonical book name
    pub canonical: &'static str,
    /// The raw text that matched
    pub raw: &'t str,
    /// Byte offset where the match starts
    pub start: usize,
    /// Byte offset just past the match
    pub end: usize,
}

/// Ordered alias table compiled into a single alternation pattern
#[derive(Debug, Clone)]
pub struct BookCatalog {
    aliases: &'static [BookAlias],
    /// `None` for an empty table, which matches nothing
    finder: Option<Regex>,
}

impl BookCatalog {
    /// Compile a catalog from an ordered alias table
    ///
    /// # Errors
    /// Returns an error if the combined pattern exceeds the regex size limits.
    pub fn new(aliases: &'static [BookAlias]) -> Result<Self, regex::Error> {
        let finder = if aliases.is_empty() {
            None
        } else {
            let alternation = aliases
                .iter()
                .map(|alias| regex::escape(alias.pattern))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&alternation)?)
        };
        Ok(Self { aliases, finder })
    }

    /// The catalog of textbooks the topic index refers to
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Find the leftmost known book name in `text`
    #[must_use]
    pub fn find<'t>(&self, text: &'t str) -> Option<BookMatch<'t>> {
        let found = self.finder.as_ref()?.find(text)?;
        let canonical = self.canonical_for(found.as_str())?;
        Some(BookMatch {
            canonical,
            raw: found.as_str(),
            start: found.start(),
            end: found.end(),
        })
    }

    /// Resolve a raw spelling to its canonical name
    #[must_use]
    pub fn canonical_for(&self, raw: &str) -> Option<&'static str> {
        self.aliases
            .iter()
            .find(|alias| alias.pattern == raw)
            .map(|alias| alias.canonical)
    }
}
