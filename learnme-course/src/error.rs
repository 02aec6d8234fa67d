use std::{path::PathBuf, process::ExitStatus, string::FromUtf8Error, time::Duration};

use learnme_core::TemplateError;
use learnme_tap::TapError;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A learnme.toml is missing or malformed
    #[error(transparent)]
    Config(#[from] Box<learnme_manifest::Error>),

    #[error("failed to access '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("test output '{path}' is not valid UTF-8")]
    TestArtifactEncoding {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    #[error("test output '{path}' is not valid TAP")]
    TestArtifactMalformed {
        path: PathBuf,
        #[source]
        source: TapError,
    },

    #[error("'{item}' is a module; only lessons have tests")]
    NotALesson { item: String },

    #[error("lesson '{lesson}' has no test files")]
    NoTests { lesson: String },

    #[error("no testCommand configured for lesson '{lesson}' or its modules")]
    NoTestCommand { lesson: String },

    #[error("invalid testCommand template")]
    Template(#[from] TemplateError),

    #[error("failed to start test command `{command}`")]
    TestSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("test command `{command}` timed out after {}s", .timeout.as_secs())]
    TestTimeout { command: String, timeout: Duration },

    #[error("test command `{command}` failed ({status}) without writing results: {stderr}")]
    TestExecution {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("no course item matches '{selector}'")]
    NotFound { selector: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether a test output file exists but could not be read as TAP.
    pub fn is_malformed_artifact(&self) -> bool {
        matches!(
            self,
            Error::TestArtifactEncoding { .. } | Error::TestArtifactMalformed { .. }
        )
    }
}
