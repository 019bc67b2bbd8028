//! Counting transforms over the exercise table

use crate::core::exercises::ExerciseTable;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Number of occurrences of one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frequency {
    /// The counted value
    pub label: String,
    /// How many times it occurred
    pub count: usize,
}

impl Frequency {
    /// Create a frequency entry
    #[must_use]
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Count values, most frequent first; ties are broken by label
#[must_use]
pub fn count_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<Frequency> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut frequencies: Vec<Frequency> = counts
        .into_iter()
        .map(|(label, count)| Frequency::new(label, count))
        .collect();
    frequencies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    frequencies
}

/// Exercises per topic, with one count per topic entry of each exercise
#[must_use]
pub fn topic_frequencies(table: &ExerciseTable) -> Vec<Frequency> {
    count_values(table.topics_exploded())
}

/// Exercises per source PDF
#[must_use]
pub fn source_frequencies(table: &ExerciseTable) -> Vec<Frequency> {
    count_values(table.sources())
}

/// Unordered pair of distinct topics, stored with the smaller name first
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TopicPair {
    first: String,
    second: String,
}

impl TopicPair {
    /// Build the canonical pair for two topics in either order
    #[must_use]
    pub fn new(a: &str, b: &str) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    /// Lexicographically smaller topic
    #[must_use]
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Lexicographically larger topic
    #[must_use]
    pub fn second(&self) -> &str {
        &self.second
    }
}

/// Co-occurrence weight per topic pair
pub type CoOccurrence = BTreeMap<TopicPair, usize>;

/// Count, for every pair of distinct topics, the exercises listing both.
///
/// A topic repeated within one exercise counts once for that exercise.
#[must_use]
pub fn co_occurrence(table: &ExerciseTable) -> CoOccurrence {
    let mut pairs = CoOccurrence::new();
    for topics in table.topic_lists() {
        let distinct: Vec<&str> = topics
            .iter()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if distinct.len() < 2 {
            continue;
        }
        for (i, first) in distinct.iter().enumerate() {
            for second in &distinct[i + 1..] {
                *pairs.entry(TopicPair::new(first, second)).or_default() += 1;
            }
        }
    }
    pairs
}
