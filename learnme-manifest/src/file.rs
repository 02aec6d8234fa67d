use std::path::{Path, PathBuf};

use crate::{CourseModule, Error, Result};

/// Represents a learnme.toml file with both raw content and parsed module.
#[derive(Debug, Clone)]
pub struct LearnmeToml {
    path: PathBuf,
    content: String,
    module: CourseModule,
}

impl LearnmeToml {
    /// Open and parse a learnme.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        Self::from_content(path, content)
    }

    /// Read and parse a learnme.toml file without blocking the runtime.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        tracing::debug!(path = %path.display(), "loading course config");
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::io(&path, e))?;
        Self::from_content(path, content)
    }

    fn from_content(path: PathBuf, content: String) -> Result<Self> {
        let filename = path.display().to_string();
        let module = CourseModule::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            module,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed module.
    pub fn module(&self) -> &CourseModule {
        &self.module
    }

    /// Split into the path and parsed module.
    pub fn into_parts(self) -> (PathBuf, CourseModule) {
        (self.path, self.module)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::config_location;

    #[test]
    fn test_open_reads_and_parses() {
        let temp = TempDir::new().unwrap();
        let path = config_location(temp.path());
        fs::write(&path, "title = \"Course\"\n").unwrap();

        let file = LearnmeToml::open(&path).unwrap();

        assert_eq!(file.path(), path);
        assert_eq!(file.content(), "title = \"Course\"\n");
        assert_eq!(file.module().title, "Course");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = LearnmeToml::load(config_location(temp.path()))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("failed to read"));
    }

    #[tokio::test]
    async fn test_load_malformed_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = config_location(temp.path());
        fs::write(&path, "title = [").unwrap();

        let err = LearnmeToml::load(&path).await.unwrap_err();

        assert!(matches!(*err, Error::Parse { .. }));
    }
}
