//! Running a lesson's tests.

use std::{
    io::ErrorKind,
    path::Path,
    process::{ExitStatus, Stdio},
    time::Duration,
};

use learnme_core::{TemplateContext, render_test_command};
use learnme_tap::{LessonStatus, TestAssertion};
use tokio::process::Command;

use crate::{Error, Lesson, Result, results::read_results};

pub const DEFAULT_TEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Outcome of a test run that produced a TAP artifact.
#[derive(Debug, Clone)]
pub struct TestRun {
    /// The rendered shell command.
    pub command: String,
    pub exit_status: ExitStatus,
    pub results: Vec<TestAssertion>,
    pub status: LessonStatus,
}

impl TestRun {
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_status.code()
    }
}

/// Runs a lesson's `testCommand` through the platform shell.
#[derive(Debug, Clone, Copy)]
pub struct TestRunner {
    timeout: Duration,
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRunner {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Render the command that would run `lesson`'s tests.
    pub fn command_for(&self, lesson: &Lesson) -> Result<String> {
        let test_files = lesson.test_files();
        if test_files.is_empty() {
            return Err(Error::NoTests {
                lesson: lesson.title().to_string(),
            });
        }
        let Some(template) = lesson.test_command() else {
            return Err(Error::NoTestCommand {
                lesson: lesson.title().to_string(),
            });
        };

        let file_paths: Vec<String> = test_files
            .iter()
            .map(|path| quote(&path.display().to_string()))
            .collect();
        let output_path = quote(&lesson.test_output_path().display().to_string());

        Ok(render_test_command(
            template,
            &TemplateContext {
                file_paths: &file_paths,
                output_path: &output_path,
            },
        )?)
    }

    /// Run `lesson`'s tests and read back the artifact they wrote.
    ///
    /// The command runs in the course root directory. A non-zero exit is
    /// only an error when no artifact was produced.
    pub async fn run(&self, lesson: &Lesson) -> Result<TestRun> {
        let command = self.command_for(lesson)?;
        let artifact = lesson.test_output_path();

        if let Some(directory) = artifact.parent() {
            tokio::fs::create_dir_all(directory)
                .await
                .map_err(|e| Error::io(directory, e))?;
        }
        match tokio::fs::remove_file(&artifact).await {
            Ok(()) => tracing::debug!(path = %artifact.display(), "removed stale test output"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(Error::io(&artifact, e)),
        }

        let root = lesson.root_directory();
        tracing::info!(lesson = lesson.title(), %command, cwd = %root.display(), "running tests");

        let child = shell(&command, &root)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| Error::TestSpawn {
                command: command.clone(),
                source,
            })?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => return Err(Error::TestSpawn { command, source }),
            Err(_) => {
                tracing::warn!(%command, timeout = ?self.timeout, "test command timed out");
                return Err(Error::TestTimeout {
                    command,
                    timeout: self.timeout,
                });
            }
        };

        let produced = match tokio::fs::metadata(&artifact).await {
            Ok(metadata) => metadata.is_file(),
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => return Err(Error::io(&artifact, e)),
        };
        if !produced {
            if output.status.success() {
                tracing::warn!(path = %artifact.display(), "test command wrote no output");
            } else {
                return Err(Error::TestExecution {
                    command,
                    status: output.status,
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }
        }

        let results = read_results(lesson).await?;
        let status = LessonStatus::classify(&results);
        tracing::debug!(
            lesson = lesson.title(),
            exit = ?output.status.code(),
            assertions = results.len(),
            %status,
            "tests finished"
        );

        Ok(TestRun {
            command,
            exit_status: output.status,
            results,
            status,
        })
    }
}

/// Quote a substituted path so the shell reads it as a single word.
#[cfg(unix)]
fn quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"/._-+=:,@%".contains(&b));
    if plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

#[cfg(windows)]
fn quote(value: &str) -> String {
    if value.contains([' ', '&', '|', '<', '>', '^', '(', ')']) {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}

#[cfg(unix)]
fn shell(command: &str, cwd: &Path) -> Command {
    let mut shell = Command::new("sh");
    shell.arg("-c").arg(command).current_dir(cwd);
    shell
}

#[cfg(windows)]
fn shell(command: &str, cwd: &Path) -> Command {
    let mut shell = Command::new("cmd");
    shell.arg("/C").arg(command).current_dir(cwd);
    shell
}
