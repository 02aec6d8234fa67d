//! Course tree model and navigation for learnme.
//!
//! A course is a tree of `learnme.toml` modules. [`CourseDataProvider`]
//! materializes it one level at a time, the [`traversal`] functions walk it in
//! pre-order, and [`TestRunner`] runs a lesson's tests and reads back the TAP
//! they produce.

mod error;
pub mod exercise;
mod item;
mod locate;
mod provider;
mod results;
mod runner;
pub mod traversal;

pub use error::{Error, Result};
pub use exercise::{ExerciseNode, ExerciseTree, build_tree, exercise_tree};
pub use item::{
    CourseItem, DEFAULT_TEST_OUTPUT_DIRECTORY, ItemKey, ItemKind, Lesson, RESULTS_FILENAME,
    Submodule,
};
pub use learnme_tap::{LessonStatus, TestAssertion};
pub use locate::locate;
pub use provider::{CourseDataProvider, CourseTree};
pub use results::{read_results, refresh_status};
pub use runner::{DEFAULT_TEST_TIMEOUT, TestRun, TestRunner};
pub use traversal::{last_descendant, next, previous, resume, walk};
