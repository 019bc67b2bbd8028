//! Reading list command handler

use examprep::config::Config;
use examprep::core::reading_list::{
    parse_reading_list, write_reading_list, ParseOptions, ReadingList, EMBEDDED_TOPIC_INDEX,
};
use examprep::{ExamPrepError, Result};
use logger::{error, info, verbose};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// Build the reading list and write it to the configured path.
///
/// Exits with status 1 if the index cannot be read or parsed, or the output
/// cannot be written. Nothing is written when parsing fails.
pub fn run(input: Option<&Path>, config: &Config) {
    match build(input, config) {
        Ok((list, output)) => {
            info!(
                "Reading list: {} chapter references, {} uncovered topics",
                list.chapter_count(),
                list.uncovered().len()
            );
            verbose!(
                "Books: {}",
                list.book_names().collect::<Vec<_>>().join(", ")
            );
            println!("✓ Reading list written to '{}'", output.display());
        }
        Err(e) => {
            error!("Reading list failed: {e}");
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}

fn build(input: Option<&Path>, config: &Config) -> Result<(ReadingList, PathBuf)> {
    let text: Cow<'static, str> = match input {
        Some(path) => {
            info!("Reading topic index from '{}'", path.display());
            Cow::Owned(fs::read_to_string(path).map_err(|e| ExamPrepError::io(path, e))?)
        }
        None => Cow::Borrowed(EMBEDDED_TOPIC_INDEX),
    };

    let options = ParseOptions {
        strict: config.reading_list.strict,
    };
    let list = parse_reading_list(&text, options)?;

    let output = PathBuf::from(&config.paths.reading_list);
    write_reading_list(&list, &output)?;
    Ok((list, output))
}
