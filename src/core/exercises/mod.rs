//! Exercise records and their loading from a directory of JSON files

pub mod loader;
pub mod model;

pub use loader::{load_exercise_file, load_exercises, LoadOutcome};
pub use model::{Exercise, ExerciseTable};
