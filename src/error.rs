//! Error types shared by the reading list builder and the exercise visualizer.

use std::path::PathBuf;

/// Errors raised by `examprep` operations.
#[derive(Debug, thiserror::Error)]
pub enum ExamPrepError {
    /// A mapping line has no tab between the topic and its description.
    #[error("malformed line {line_number}: expected 'Topic<TAB>Mapping', got '{content}'")]
    MalformedLine {
        /// 1-based line number in the input text
        line_number: usize,
        /// The offending line, trimmed
        content: String,
    },

    /// A mapping section names no known book (strict mode only).
    #[error("line {line_number}: no known book in section '{section}' of topic '{topic}'")]
    UnknownBook {
        /// 1-based line number in the input text
        line_number: usize,
        /// Topic the section belongs to
        topic: String,
        /// The unmatched section text
        section: String,
    },

    /// Filesystem I/O failure.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// An exercise file is not a valid JSON array of exercise records.
    #[error("invalid exercise data in {path:?}: {source}")]
    Json {
        /// The offending file
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// A chart could not be rasterized or encoded.
    #[error("failed to render {path:?}: {message}")]
    Render {
        /// Target image path
        path: PathBuf,
        /// What went wrong
        message: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ExamPrepError>;

impl ExamPrepError {
    /// Wrap a `std::io::Error` with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a render error for `path`.
    pub fn render(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Render {
            path: path.into(),
            message: message.into(),
        }
    }
}
