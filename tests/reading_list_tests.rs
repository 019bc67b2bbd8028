//! Integration tests for the reading list builder

use examprep::core::reading_list::{
    parse_reading_list, render_markdown, write_reading_list, ParseOptions, EMBEDDED_TOPIC_INDEX,
};
use examprep::ExamPrepError;
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

/// Topic names of every non-header line in the embedded index
fn indexed_topics() -> BTreeSet<String> {
    EMBEDDED_TOPIC_INDEX
        .lines()
        .filter_map(|line| line.split_once('\t'))
        .map(|(topic, _)| topic.trim().to_string())
        .collect()
}

#[test]
fn test_embedded_index_books() {
    let list = parse_reading_list(EMBEDDED_TOPIC_INDEX, ParseOptions::default()).unwrap();
    let books: Vec<&str> = list.book_names().collect();
    assert_eq!(
        books,
        vec![
            "Calculus (Stewart)",
            "E&M (Purcell & Morin)",
            "Mechanics (Kleppner & Kolenkow)",
            "Statistics (Devore)",
        ]
    );
    assert_eq!(list.chapters_for("Statistics (Devore)").len(), 3);
}

#[test]
fn test_embedded_index_expected_entries() {
    let list = parse_reading_list(EMBEDDED_TOPIC_INDEX, ParseOptions::default()).unwrap();
    let md = render_markdown(&list);

    assert!(md.contains(
        "## E&M (Purcell & Morin)\n\n- **AC Circuits**: Chapter 8 (Alternating-Current Circuits)\n"
    ));
    assert!(md.contains("- **Vectors, Lines, & Planes**: Chapter 12 (Vectors and the Geometry of Space)\n"));
    assert!(md.contains("- **Vectors, Lines, & Planes**: Chapter 1 (Vectors and Kinematics)\n"));
    assert!(md.contains("- **Probability & Bayes' Theorem**: Chapter 2 (Probabilidad)\n"));
    assert!(md.contains("\n- Fluid Mechanics\n"));
    assert!(md.contains("\n- Determinants\n"));
}

#[test]
fn test_every_topic_lands_in_exactly_one_category() {
    let list = parse_reading_list(EMBEDDED_TOPIC_INDEX, ParseOptions::default()).unwrap();

    let covered: BTreeSet<String> = list
        .book_names()
        .flat_map(|book| list.chapters_for(book))
        .map(|chapter| chapter.topic.clone())
        .collect();
    let uncovered: BTreeSet<String> = list.uncovered().iter().cloned().collect();

    assert!(covered.is_disjoint(&uncovered));
    let all: BTreeSet<String> = covered.union(&uncovered).cloned().collect();
    assert_eq!(all, indexed_topics());
    assert_eq!(uncovered.len(), 11);
}

#[test]
fn test_multi_book_topic_is_listed_under_each_book() {
    let list = parse_reading_list(EMBEDDED_TOPIC_INDEX, ParseOptions::default()).unwrap();
    let in_book = |book: &str| {
        list.chapters_for(book)
            .iter()
            .any(|c| c.topic == "Green's, Stokes', & Divergence Theorems")
    };
    assert!(in_book("Calculus (Stewart)"));
    assert!(in_book("E&M (Purcell & Morin)"));
    assert!(!in_book("Mechanics (Kleppner & Kolenkow)"));
}

#[test]
fn test_output_is_byte_identical_across_runs() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("first.md");
    let second = temp.path().join("nested").join("second.md");

    let list = parse_reading_list(EMBEDDED_TOPIC_INDEX, ParseOptions::default()).unwrap();
    write_reading_list(&list, &first).unwrap();
    let again = parse_reading_list(EMBEDDED_TOPIC_INDEX, ParseOptions::default()).unwrap();
    write_reading_list(&again, &second).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("reading_list.md");
    fs::write(&path, "stale content that is much longer than nothing").unwrap();

    let list = parse_reading_list("A\tCalculus (Stewart): Chapter 1", ParseOptions::default())
        .unwrap();
    write_reading_list(&list, &path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# Textbook Reading List"));
    assert!(!written.contains("stale"));
}

#[test]
fn test_malformed_line_aborts_without_output() {
    let text = "PHYSICS\nOptics\tNot explicitly covered\nno tab here\n";
    let err = parse_reading_list(text, ParseOptions::default()).unwrap_err();
    match err {
        ExamPrepError::MalformedLine {
            line_number,
            content,
        } => {
            assert_eq!(line_number, 3);
            assert_eq!(content, "no tab here");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_strict_mode_rejects_unknown_books() {
    let text = "Topology\tMunkres (Topology): Chapter 2";
    assert!(parse_reading_list(text, ParseOptions::default()).is_ok());
    assert!(matches!(
        parse_reading_list(text, ParseOptions::strict()),
        Err(ExamPrepError::UnknownBook { line_number: 1, .. })
    ));
}

#[test]
fn test_embedded_index_parses_in_strict_mode() {
    assert!(parse_reading_list(EMBEDDED_TOPIC_INDEX, ParseOptions::strict()).is_ok());
}

#[test]
fn test_topic_mapped_twice_is_only_covered() {
    for text in [
        "Optics\tNot explicitly covered in these tables.\nOptics\tCalculus (Stewart): Chapter 1\n",
        "Optics\tCalculus (Stewart): Chapter 1\nOptics\tNot explicitly covered in these tables.\n",
    ] {
        let list = parse_reading_list(text, ParseOptions::default()).unwrap();
        assert!(list.uncovered().is_empty());
        assert_eq!(list.chapters_for("Calculus (Stewart)").len(), 1);

        let md = render_markdown(&list);
        assert!(md.contains("- **Optics**: Chapter 1\n"));
        assert!(!md.contains("\n- Optics\n"));
    }
}
