//! TAP (Test Anything Protocol) ingestion.
//!
//! The test command of a lesson writes a TAP stream to `results.tap`. This
//! crate turns that stream into typed [`TapEvent`] records, flattens nested
//! subtests into a single list of [`TestAssertion`]s, and classifies the
//! result into a [`LessonStatus`].
//!
//! # Example
//!
//! ```
//! use learnme_tap::{LessonStatus, flatten, parse};
//!
//! let events = parse("TAP version 13\nok 1 - adds\nnot ok 2 - subtracts\n1..2\n").unwrap();
//! let results = flatten(&events);
//!
//! assert_eq!(results.len(), 2);
//! assert_eq!(LessonStatus::classify(&results), LessonStatus::Error);
//! ```

mod event;
mod parser;
mod results;

pub use event::{Assert, Directive, Plan, TapEvent};
pub use parser::{TapError, parse};
pub use results::{LessonStatus, TestAssertion, flatten};
