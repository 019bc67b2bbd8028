//! Exercise model

use serde::{Deserialize, Serialize};

/// One exercise record. Fields other than `topics` and `source_pdf` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Topics the exercise practices
    pub topics: Vec<String>,
    /// PDF the exercise was taken from
    pub source_pdf: String,
}

impl Exercise {
    /// Create an exercise
    #[must_use]
    pub fn new(topics: Vec<String>, source_pdf: String) -> Self {
        Self { topics, source_pdf }
    }
}

/// All loaded exercises, one row per record, in load order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseTable {
    rows: Vec<Exercise>,
}

impl ExerciseTable {
    /// Build a table from rows
    #[must_use]
    pub const fn new(rows: Vec<Exercise>) -> Self {
        Self { rows }
    }

    /// Append the rows of one file
    pub fn extend(&mut self, rows: impl IntoIterator<Item = Exercise>) {
        self.rows.extend(rows);
    }

    /// All rows
    #[must_use]
    pub fn rows(&self) -> &[Exercise] {
        &self.rows
    }

    /// Number of exercises
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no exercise was loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `topics` column flattened to one entry per (exercise, topic)
    pub fn topics_exploded(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .flat_map(|row| row.topics.iter().map(String::as_str))
    }

    /// The `source_pdf` column
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.source_pdf.as_str())
    }

    /// The `topics` column, one list per exercise
    pub fn topic_lists(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(|row| row.topics.as_slice())
    }
}

impl FromIterator<Exercise> for ExerciseTable {
    fn from_iter<I: IntoIterator<Item = Exercise>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(topics: &[&str], source: &str) -> Exercise {
        Exercise::new(
            topics.iter().map(ToString::to_string).collect(),
            source.to_string(),
        )
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let json = r#"{"id": 7, "statement": "Compute...", "topics": ["Gauss's Law"], "source_pdf": "exam_2019.pdf", "difficulty": 3}"#;
        let parsed: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, exercise(&["Gauss's Law"], "exam_2019.pdf"));
    }

    #[test]
    fn test_missing_source_is_rejected() {
        let json = r#"{"topics": ["A"]}"#;
        assert!(serde_json::from_str::<Exercise>(json).is_err());
    }

    #[test]
    fn test_columns() {
        let table: ExerciseTable = vec![exercise(&["A", "B"], "x"), exercise(&["A"], "y")]
            .into_iter()
            .collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table.topics_exploded().collect::<Vec<_>>(), vec!["A", "B", "A"]);
        assert_eq!(table.sources().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(table.topic_lists().map(<[String]>::len).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn test_empty_table() {
        let table = ExerciseTable::default();
        assert!(table.is_empty());
        assert_eq!(table.topics_exploded().count(), 0);
    }
}
