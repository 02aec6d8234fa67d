//! Show operation - a lesson's content or a module's overview.

use learnme_course::{CourseItem, CourseTree, Result, exercise_tree, locate};

use super::summarize;
use crate::reports::{LessonView, ShowReport, SubmoduleView};

/// Execute the show operation.
///
/// Lesson content is read as-is; a missing content file is reported rather
/// than failing the command.
pub async fn show<P: CourseTree>(provider: &P, selector: &str) -> Result<ShowReport> {
    let item = locate(provider, selector).await?;
    let summary = summarize(&item);

    let report = match &item {
        CourseItem::Submodule(submodule) => ShowReport::Submodule(SubmoduleView {
            summary,
            modules: submodule
                .module()
                .modules
                .iter()
                .map(|entry| entry.title().to_string())
                .collect(),
        }),
        CourseItem::Lesson(lesson) => {
            let content_path = lesson.content_path();
            let content = match tokio::fs::read_to_string(&content_path).await {
                Ok(content) => Some(content),
                Err(e) => {
                    tracing::debug!(path = %content_path.display(), error = %e, "lesson content unavailable");
                    None
                }
            };

            ShowReport::Lesson(LessonView {
                summary,
                content_path,
                content,
                exercises: exercise_tree(lesson),
                test_files: lesson.test_files(),
                test_command: lesson.test_command().map(String::from),
                results: lesson.test_results().to_vec(),
            })
        }
    };

    Ok(report)
}
