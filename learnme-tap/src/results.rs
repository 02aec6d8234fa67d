use std::fmt;

use crate::TapEvent;

/// One pass/fail row of a parsed TAP stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestAssertion {
    pub name: String,
    /// Hierarchical name including enclosing subtests
    pub path: String,
    pub succeeded: bool,
}

/// Flatten a TAP stream into its assertions.
///
/// Subtest streams are inlined depth-first, in document order. Records other
/// than test points are ignored.
pub fn flatten(events: &[TapEvent]) -> Vec<TestAssertion> {
    let mut assertions = Vec::new();
    collect(events, &mut assertions);
    assertions
}

fn collect(events: &[TapEvent], out: &mut Vec<TestAssertion>) {
    for event in events {
        match event {
            TapEvent::Child(child) => collect(child, out),
            TapEvent::Assert(assert) => out.push(TestAssertion {
                name: assert.name.clone(),
                path: assert.fullname.clone(),
                succeeded: assert.ok,
            }),
            _ => {}
        }
    }
}

/// Test status of a lesson.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LessonStatus {
    /// No assertions: never run, or the run produced nothing
    #[default]
    Empty,
    /// At least one assertion failed
    Error,
    /// Every assertion succeeded
    Passed,
}

impl LessonStatus {
    /// Classify a set of assertions.
    pub fn classify(results: &[TestAssertion]) -> Self {
        if results.is_empty() {
            LessonStatus::Empty
        } else if results.iter().all(|r| r.succeeded) {
            LessonStatus::Passed
        } else {
            LessonStatus::Error
        }
    }

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonStatus::Empty => "empty",
            LessonStatus::Error => "error",
            LessonStatus::Passed => "passed",
        }
    }
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
