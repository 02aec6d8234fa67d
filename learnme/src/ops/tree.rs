//! Tree operation - the whole course outline.

use learnme_course::{CourseTree, Result, walk};

use crate::reports::{TreeEntry, TreeReport};

/// Execute the tree operation.
///
/// Expands every module in pre-order.
pub async fn tree<P: CourseTree>(provider: &P) -> Result<TreeReport> {
    let entries = walk(provider)
        .await?
        .into_iter()
        .map(|(depth, item)| TreeEntry {
            depth,
            title: item.label().to_string(),
            status: item.as_lesson().map(|lesson| lesson.status()),
        })
        .collect();

    Ok(TreeReport { entries })
}

#[cfg(test)]
mod tests {
    use learnme_course::CourseDataProvider;

    use super::*;
    use crate::ops::fixture;

    #[tokio::test]
    async fn test_tree_outline() {
        let temp = fixture::course();
        let provider = CourseDataProvider::new([temp.path()]);

        let report = tree(&provider).await.unwrap();

        let outline: Vec<(usize, &str)> = report
            .entries
            .iter()
            .map(|entry| (entry.depth, entry.title.as_str()))
            .collect();
        assert_eq!(
            outline,
            [(0, "Course"), (1, "Basics"), (2, "Hello"), (2, "Loops"), (1, "Wrap up")]
        );
        assert_eq!(report.progress(), (0, 3));
    }

    #[tokio::test]
    async fn test_tree_propagates_config_errors() {
        let temp = tempfile::TempDir::new().unwrap();
        let provider = CourseDataProvider::new([temp.path()]);

        let err = tree(&provider).await.unwrap_err();
        assert!(matches!(err, learnme_course::Error::Config(_)));
    }
}
