//! Built-in topic index
//!
//! Physics, mathematics and statistics topics mapped to chapters of the course
//! textbooks, one `Topic<TAB>Mapping` line per topic under subject headers.

/// The embedded topic index used when no input file is given
pub const EMBEDDED_TOPIC_INDEX: &str = include_str!("data/topic_index.tsv");
