//! Reading a lesson's TAP artifact.

use std::io::ErrorKind;

use learnme_tap::{TestAssertion, flatten, parse};

use crate::{Error, Lesson, Result};

/// Read the flattened assertions of a lesson's last test run.
///
/// A missing artifact means the tests never ran and yields no assertions.
/// An artifact that cannot be decoded or parsed is an error.
pub async fn read_results(lesson: &Lesson) -> Result<Vec<TestAssertion>> {
    let path = lesson.test_output_path();
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::trace!(path = %path.display(), "no test output");
            return Ok(Vec::new());
        }
        Err(e) => return Err(Error::io(path, e)),
    };

    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(source) => return Err(Error::TestArtifactEncoding { path, source }),
    };
    let events = match parse(&content) {
        Ok(events) => events,
        Err(source) => return Err(Error::TestArtifactMalformed { path, source }),
    };

    let results = flatten(&events);
    tracing::debug!(
        path = %path.display(),
        assertions = results.len(),
        "read test output"
    );
    Ok(results)
}

/// Re-read a lesson's artifact, returning an updated copy.
pub async fn refresh_status(lesson: &Lesson) -> Result<Lesson> {
    let results = read_results(lesson).await?;
    Ok(lesson.clone().with_results(results))
}
