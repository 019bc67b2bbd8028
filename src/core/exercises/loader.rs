//! Loader for directories of exercise JSON files

use super::model::{Exercise, ExerciseTable};
use crate::error::{ExamPrepError, Result};
use logger::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name suffix of exercise files (case-sensitive)
const EXERCISE_EXTENSION: &str = ".json";

/// Result of scanning an exercise directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The directory does not exist; nothing was loaded
    MissingDirectory,
    /// Exercises from every `.json` file, concatenated in file name order
    Loaded {
        /// Combined exercises
        table: ExerciseTable,
        /// Files that contributed, in load order
        files: Vec<PathBuf>,
    },
}

impl LoadOutcome {
    /// The loaded table, if the directory existed
    #[must_use]
    pub const fn table(&self) -> Option<&ExerciseTable> {
        match self {
            Self::MissingDirectory => None,
            Self::Loaded { table, .. } => Some(table),
        }
    }
}

/// Load every `*.json` file directly inside `dir`.
///
/// Files are visited in file name order so the combined table does not depend
/// on the platform's directory enumeration order. Subdirectories and files
/// with other extensions (including `.JSON`) are ignored.
///
/// # Errors
/// - [`ExamPrepError::Io`] if `dir` exists but is not a readable directory, or a file cannot be read.
/// - [`ExamPrepError::Json`] if any file is not a JSON array of exercises. Nothing is returned
///   for the other files in that case.
pub fn load_exercises(dir: &Path) -> Result<LoadOutcome> {
    if !dir.exists() {
        return Ok(LoadOutcome::MissingDirectory);
    }
    if !dir.is_dir() {
        return Err(ExamPrepError::io(
            dir,
            io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        ));
    }

    info!("Loading exercises from '{}'", dir.display());
    let mut table = ExerciseTable::default();
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            ExamPrepError::io(path, io::Error::from(e))
        })?;
        let path = entry.path();
        let is_exercise_file = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(EXERCISE_EXTENSION));
        if !is_exercise_file || !path.is_file() {
            debug!("Skipping '{}'", path.display());
            continue;
        }

        let rows = load_exercise_file(path)?;
        debug!("Loaded {} exercises from '{}'", rows.len(), path.display());
        table.extend(rows);
        files.push(path.to_path_buf());
    }

    info!(
        "Loaded {} exercises from {} files",
        table.len(),
        files.len()
    );
    Ok(LoadOutcome::Loaded { table, files })
}

/// Parse one file holding a JSON array of exercises
///
/// # Errors
/// [`ExamPrepError::Io`] if the file cannot be read, [`ExamPrepError::Json`] if it does not parse.
pub fn load_exercise_file(path: &Path) -> Result<Vec<Exercise>> {
    let content = fs::read_to_string(path).map_err(|e| ExamPrepError::io(path, e))?;
    serde_json::from_str(&content).map_err(|source| ExamPrepError::Json {
        path: path.to_path_buf(),
        source,
    })
}
