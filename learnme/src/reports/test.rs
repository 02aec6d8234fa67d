//! Test command report data structures.

use learnme_course::{LessonStatus, TestAssertion};

use super::{
    item::status_mark,
    output::{Output, Report},
};

/// Report data from running a lesson's tests.
#[derive(Debug)]
pub struct TestReport {
    pub lesson: String,
    pub command: String,
    pub exit_code: Option<i32>,
    pub results: Vec<TestAssertion>,
    pub status: LessonStatus,
}

impl TestReport {
    pub fn passed(&self) -> bool {
        self.status == LessonStatus::Passed
    }
}

impl Report for TestReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("$ {}", self.command));
        out.newline();

        if self.results.is_empty() {
            out.warning("the test run reported no assertions");
        }
        for result in &self.results {
            let mark = if result.succeeded { "✓" } else { "✗" };
            out.preformatted(&format!("{mark} {}", result.path));
        }

        let failed = self.results.iter().filter(|r| !r.succeeded).count();
        out.newline();
        out.preformatted(&format!(
            "{} {}: {} ({} passed, {} failed)",
            status_mark(self.status),
            self.lesson,
            self.status,
            self.results.len() - failed,
            failed
        ));
        match self.exit_code {
            Some(0) => {}
            Some(code) => out.key_value("exit code", &code.to_string()),
            None => out.key_value("exit code", "terminated by signal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::capture;

    fn assertion(path: &str, succeeded: bool) -> TestAssertion {
        TestAssertion {
            name: path.rsplit(' ').next().unwrap_or(path).to_string(),
            path: path.to_string(),
            succeeded,
        }
    }

    #[test]
    fn test_failing_run() {
        let report = TestReport {
            lesson: "Loops".into(),
            command: "mocha --reporter=tap test.js > out/results.tap".into(),
            exit_code: Some(1),
            results: vec![
                assertion("loops counts", true),
                assertion("loops stops", false),
            ],
            status: LessonStatus::Error,
        };

        assert!(!report.passed());
        insta::assert_snapshot!(capture(&report), @r"
        $ mocha --reporter=tap test.js > out/results.tap

        ✓ loops counts
        ✗ loops stops

        ✗ Loops: error (1 passed, 1 failed)
        exit code: 1
        ");
    }

    #[test]
    fn test_passing_run() {
        let report = TestReport {
            lesson: "Loops".into(),
            command: "true".into(),
            exit_code: Some(0),
            results: vec![assertion("counts", true)],
            status: LessonStatus::Passed,
        };

        assert!(report.passed());
        insta::assert_snapshot!(capture(&report), @r"
        $ true

        ✓ counts

        ✓ Loops: passed (1 passed, 0 failed)
        ");
    }

    #[test]
    fn test_empty_run_warns() {
        let report = TestReport {
            lesson: "Loops".into(),
            command: "true".into(),
            exit_code: Some(0),
            results: Vec::new(),
            status: LessonStatus::Empty,
        };

        insta::assert_snapshot!(capture(&report), @r"
        $ true

        warning: the test run reported no assertions

        · Loops: empty (0 passed, 0 failed)
        ");
    }
}
