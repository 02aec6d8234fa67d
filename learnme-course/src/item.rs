//! Course tree nodes.
//!
//! Nodes are rebuilt on every expansion. A node points at its parent through
//! a shared `Arc`, while parents never hold their children: children are
//! fetched from the provider on demand. Siblings are compared through
//! [`ItemKey`], which is derived from the declaring config and the entry's
//! position rather than from node identity.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use learnme_core::{config_dir, resolve};
use learnme_manifest::{CourseModule, LessonConfig};
use learnme_tap::{LessonStatus, TestAssertion};

/// Output directory used when a lesson does not set `testOutputDirectory`.
pub const DEFAULT_TEST_OUTPUT_DIRECTORY: &str = "./__test_output__/";

/// TAP artifact written by the test command.
pub const RESULTS_FILENAME: &str = "results.tap";

/// A node in the course tree.
#[derive(Debug, Clone)]
pub enum CourseItem {
    Lesson(Arc<Lesson>),
    Submodule(Arc<Submodule>),
}

/// Kind of a course node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Lesson,
    Submodule,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Lesson => "lesson",
            ItemKind::Submodule => "submodule",
        }
    }
}

/// Stable comparison key for a node across fetches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub kind: ItemKind,
    pub config_location: PathBuf,
    pub position: usize,
}

impl CourseItem {
    pub fn kind(&self) -> ItemKind {
        match self {
            CourseItem::Lesson(_) => ItemKind::Lesson,
            CourseItem::Submodule(_) => ItemKind::Submodule,
        }
    }

    /// Display title.
    pub fn label(&self) -> &str {
        match self {
            CourseItem::Lesson(lesson) => lesson.title(),
            CourseItem::Submodule(submodule) => submodule.title(),
        }
    }

    /// The config file that defines this node.
    pub fn config_location(&self) -> &Path {
        match self {
            CourseItem::Lesson(lesson) => lesson.config_location(),
            CourseItem::Submodule(submodule) => submodule.config_location(),
        }
    }

    /// Ordinal among the parent's entries (or among the workspace roots).
    pub fn position(&self) -> usize {
        match self {
            CourseItem::Lesson(lesson) => lesson.position(),
            CourseItem::Submodule(submodule) => submodule.position(),
        }
    }

    /// The owning submodule, absent for roots.
    pub fn parent(&self) -> Option<CourseItem> {
        match self {
            CourseItem::Lesson(lesson) => Some(CourseItem::Submodule(lesson.parent().clone())),
            CourseItem::Submodule(submodule) => {
                submodule.parent().cloned().map(CourseItem::Submodule)
            }
        }
    }

    pub fn key(&self) -> ItemKey {
        ItemKey {
            kind: self.kind(),
            config_location: self.config_location().to_path_buf(),
            position: self.position(),
        }
    }

    /// Number of ancestors.
    pub fn depth(&self) -> usize {
        match self {
            CourseItem::Lesson(lesson) => lesson.parent().depth() + 1,
            CourseItem::Submodule(submodule) => submodule.depth(),
        }
    }

    /// Labels from the root down to this node.
    pub fn breadcrumbs(&self) -> Vec<String> {
        let mut labels = vec![self.label().to_string()];
        let mut current = self.parent();
        while let Some(item) = current {
            labels.push(item.label().to_string());
            current = item.parent();
        }
        labels.reverse();
        labels
    }

    /// Directory of the root module this node belongs to.
    pub fn root_directory(&self) -> PathBuf {
        match self {
            CourseItem::Lesson(lesson) => lesson.root_directory(),
            CourseItem::Submodule(submodule) => submodule.root().directory(),
        }
    }

    pub fn as_lesson(&self) -> Option<&Arc<Lesson>> {
        match self {
            CourseItem::Lesson(lesson) => Some(lesson),
            CourseItem::Submodule(_) => None,
        }
    }

    pub fn as_submodule(&self) -> Option<&Arc<Submodule>> {
        match self {
            CourseItem::Lesson(_) => None,
            CourseItem::Submodule(submodule) => Some(submodule),
        }
    }

    pub fn is_submodule(&self) -> bool {
        matches!(self, CourseItem::Submodule(_))
    }
}

impl PartialEq for CourseItem {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for CourseItem {}

impl fmt::Display for CourseItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Lesson> for CourseItem {
    fn from(lesson: Lesson) -> Self {
        CourseItem::Lesson(Arc::new(lesson))
    }
}

impl From<Submodule> for CourseItem {
    fn from(submodule: Submodule) -> Self {
        CourseItem::Submodule(Arc::new(submodule))
    }
}

/// A composite node backed by its own learnme.toml.
#[derive(Debug)]
pub struct Submodule {
    config_location: PathBuf,
    position: usize,
    module: CourseModule,
    parent: Option<Arc<Submodule>>,
}

impl Submodule {
    pub fn new(
        config_location: impl Into<PathBuf>,
        position: usize,
        module: CourseModule,
        parent: Option<Arc<Submodule>>,
    ) -> Self {
        Self {
            config_location: config_location.into(),
            position,
            module,
            parent,
        }
    }

    pub fn title(&self) -> &str {
        &self.module.title
    }

    pub fn module(&self) -> &CourseModule {
        &self.module
    }

    pub fn config_location(&self) -> &Path {
        &self.config_location
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn parent(&self) -> Option<&Arc<Submodule>> {
        self.parent.as_ref()
    }

    /// Directory containing this module's config.
    pub fn directory(&self) -> PathBuf {
        config_dir(&self.config_location)
    }

    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// The top-level module of this subtree.
    pub fn root(&self) -> &Submodule {
        self.ancestors().last().unwrap_or(self)
    }

    /// The closest `testCommand`, starting at this module and walking up.
    pub fn test_command(&self) -> Option<&str> {
        self.ancestors()
            .find_map(|module| module.module.test_command.as_deref())
    }

    /// This module followed by each of its ancestors.
    fn ancestors(&self) -> impl Iterator<Item = &Submodule> {
        std::iter::successors(Some(self), |module| module.parent.as_deref())
    }
}

/// A leaf node.
#[derive(Debug, Clone)]
pub struct Lesson {
    config_location: PathBuf,
    position: usize,
    config: LessonConfig,
    parent: Arc<Submodule>,
    test_results: Vec<TestAssertion>,
    status: LessonStatus,
}

impl Lesson {
    /// Create a lesson declared at `position` in `parent`. Its status stays
    /// [`LessonStatus::Empty`] until results are attached.
    pub fn new(position: usize, config: LessonConfig, parent: Arc<Submodule>) -> Self {
        Self {
            config_location: parent.config_location().to_path_buf(),
            position,
            config,
            parent,
            test_results: Vec::new(),
            status: LessonStatus::Empty,
        }
    }

    /// Attach parsed test results and classify them.
    pub fn with_results(mut self, test_results: Vec<TestAssertion>) -> Self {
        self.status = LessonStatus::classify(&test_results);
        self.test_results = test_results;
        self
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn config(&self) -> &LessonConfig {
        &self.config
    }

    pub fn config_location(&self) -> &Path {
        &self.config_location
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn parent(&self) -> &Arc<Submodule> {
        &self.parent
    }

    pub fn status(&self) -> LessonStatus {
        self.status
    }

    pub fn test_results(&self) -> &[TestAssertion] {
        &self.test_results
    }

    /// Resolve paths relative to this lesson (config directory + `pathPrefix`).
    pub fn resolve<S: AsRef<str>>(&self, segments: &[S]) -> PathBuf {
        resolve(
            &self.config_location,
            self.config.path_prefix.as_deref(),
            segments,
        )
    }

    /// Base directory of the lesson.
    pub fn directory(&self) -> PathBuf {
        self.resolve::<&str>(&[])
    }

    pub fn content_path(&self) -> PathBuf {
        self.resolve(&[&self.config.content_path])
    }

    pub fn exercise_files(&self) -> Vec<PathBuf> {
        self.resolve_each(&self.config.exercise_file_paths)
    }

    pub fn test_files(&self) -> Vec<PathBuf> {
        self.resolve_each(&self.config.test_file_paths)
    }

    /// Where the test command writes its TAP output.
    pub fn test_output_path(&self) -> PathBuf {
        let directory = self
            .config
            .test_output_directory
            .as_deref()
            .unwrap_or(DEFAULT_TEST_OUTPUT_DIRECTORY);
        self.resolve(&[directory, RESULTS_FILENAME])
    }

    /// The closest `testCommand` among the enclosing modules.
    pub fn test_command(&self) -> Option<&str> {
        self.parent.test_command()
    }

    /// Directory of the root module; test commands run from here.
    pub fn root_directory(&self) -> PathBuf {
        self.parent.root().directory()
    }

    fn resolve_each(&self, paths: &[String]) -> Vec<PathBuf> {
        paths.iter().map(|path| self.resolve(&[path])).collect()
    }
}
