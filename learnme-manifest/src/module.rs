use serde::Deserialize;

/// Root of a `learnme.toml`: one course module or submodule.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseModule {
    /// Display title
    pub title: String,

    /// Ordered lesson and submodule entries. Declaration order is the
    /// navigation order.
    #[serde(default)]
    pub modules: Vec<ElementConfig>,

    /// Test command template inherited by descendant lessons
    pub test_command: Option<String>,
}

impl CourseModule {
    /// Returns true if this module declares no entries
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// One entry of a module's `modules` array, tagged by `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementConfig {
    Lesson(LessonConfig),
    Submodule(SubmoduleConfig),
}

impl ElementConfig {
    /// Title of the entry, whichever kind it is
    pub fn title(&self) -> &str {
        match self {
            ElementConfig::Lesson(lesson) => &lesson.title,
            ElementConfig::Submodule(submodule) => &submodule.title,
        }
    }
}

/// A lesson entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonConfig {
    pub title: String,

    /// Content format, e.g. "markdown"
    pub content_type: String,

    /// Lesson body, relative to the owning config
    pub content_path: String,

    /// Files opened alongside the lesson
    #[serde(default)]
    pub exercise_file_paths: Vec<String>,

    /// Files passed to the test command
    #[serde(default)]
    pub test_file_paths: Vec<String>,

    /// Where the test command writes `results.tap`
    pub test_output_directory: Option<String>,

    /// Inserted between the config directory and every relative path
    pub path_prefix: Option<String>,

    /// Extra stylesheets for rendered content
    #[serde(default)]
    pub content_styles: Vec<String>,
}

impl LessonConfig {
    /// Returns true if the lesson content is markdown
    pub fn is_markdown(&self) -> bool {
        self.content_type.eq_ignore_ascii_case("markdown")
    }

    /// Returns true if the lesson declares test files
    pub fn has_tests(&self) -> bool {
        !self.test_file_paths.is_empty()
    }
}

/// A reference to a nested module directory
#[derive(Debug, Clone, Deserialize)]
pub struct SubmoduleConfig {
    pub title: String,

    /// Directory of the nested `learnme.toml`, relative to the owning config
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> CourseModule {
        toml::from_str(content).expect("Failed to parse TOML")
    }

    #[test]
    fn test_modules_keep_declaration_order() {
        let module = parse(
            r#"
            title = "Course"

            [[modules]]
            type = "submodule"
            title = "Unit 1"
            path = "unit1"

            [[modules]]
            type = "lesson"
            title = "Wrap up"
            contentType = "markdown"
            contentPath = "wrap-up.md"
            "#,
        );

        let titles: Vec<_> = module.modules.iter().map(ElementConfig::title).collect();
        assert_eq!(titles, ["Unit 1", "Wrap up"]);
        assert!(matches!(module.modules[0], ElementConfig::Submodule(_)));
        assert!(matches!(module.modules[1], ElementConfig::Lesson(_)));
    }

    #[test]
    fn test_lesson_optional_fields() {
        let module = parse(
            r#"
            title = "Unit"
            testCommand = "mocha {{join filePaths ' '}}"

            [[modules]]
            type = "lesson"
            title = "Loops"
            contentType = "markdown"
            contentPath = "loops.md"
            exerciseFilePaths = ["src/loops.js"]
            testFilePaths = ["test/loops.test.js"]
            testOutputDirectory = "out"
            pathPrefix = "loops"
            "#,
        );

        assert_eq!(
            module.test_command.as_deref(),
            Some("mocha {{join filePaths ' '}}")
        );
        let ElementConfig::Lesson(lesson) = &module.modules[0] else {
            panic!("expected a lesson");
        };
        assert!(lesson.is_markdown());
        assert!(lesson.has_tests());
        assert_eq!(lesson.exercise_file_paths, ["src/loops.js"]);
        assert_eq!(lesson.test_output_directory.as_deref(), Some("out"));
        assert_eq!(lesson.path_prefix.as_deref(), Some("loops"));
        assert!(lesson.content_styles.is_empty());
    }

    #[test]
    fn test_missing_modules_is_empty() {
        let module = parse(r#"title = "Leaf""#);
        assert!(module.is_empty());
        assert!(module.test_command.is_none());
    }

    #[test]
    fn test_unknown_entry_type_is_rejected() {
        let result: Result<CourseModule, _> = toml::from_str(
            r#"
            title = "Course"

            [[modules]]
            type = "quiz"
            title = "Nope"
            "#,
        );
        assert!(result.is_err());
    }
}
