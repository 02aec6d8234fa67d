//! Pre-order navigation over a lazily loaded course tree.
//!
//! Every function here is stateless: it takes the provider, the current node
//! and optionally the child it is ascending from, and asks the provider for
//! the sibling sets it needs. Siblings are matched by [`ItemKey`] so a node
//! fetched earlier still finds its place in a fresh sibling list.
//!
//! [`ItemKey`]: crate::ItemKey

use std::sync::Arc;

use learnme_tap::LessonStatus;

use crate::{CourseItem, CourseTree, Lesson, Result};

/// The item after `current` in a pre-order walk of the tree.
///
/// With no `current`, returns the first root. `came_from` names the child
/// being ascended from; the walk then continues with the sibling after it.
/// Returns `None` past the last item of the course.
pub async fn next<P: CourseTree>(
    provider: &P,
    current: Option<&CourseItem>,
    came_from: Option<&CourseItem>,
) -> Result<Option<CourseItem>> {
    let mut current = current.cloned();
    let mut came_from = came_from.cloned();

    loop {
        let Some(item) = current else {
            let roots = provider.children(None).await?;
            return Ok(match &came_from {
                Some(child) => sibling_after(&roots, child),
                None => roots.first().cloned(),
            });
        };

        let candidate = if item.is_submodule() {
            let children = provider.children(Some(&item)).await?;
            match &came_from {
                Some(child) => sibling_after(&children, child),
                None => children.first().cloned(),
            }
        } else {
            let parent = provider.parent(&item);
            let siblings = provider.children(parent.as_ref()).await?;
            sibling_after(&siblings, &item)
        };

        if candidate.is_some() {
            return Ok(candidate);
        }

        current = provider.parent(&item);
        came_from = Some(item);
    }
}

/// The item before `current` in a pre-order walk of the tree.
///
/// Stepping back onto an earlier sibling lands on that sibling's last
/// descendant. A first child steps back onto its parent. Returns `None`
/// before the first root.
pub async fn previous<P: CourseTree>(
    provider: &P,
    current: Option<&CourseItem>,
    came_from: Option<&CourseItem>,
) -> Result<Option<CourseItem>> {
    let mut current = current.cloned();
    let mut came_from = came_from.cloned();

    loop {
        let Some(item) = current else {
            return Ok(None);
        };

        if item.is_submodule() {
            if let Some(child) = came_from.take() {
                let children = provider.children(Some(&item)).await?;
                if let Some(earlier) = sibling_before(&children, &child) {
                    return last_descendant(provider, earlier).await.map(Some);
                }
                current = provider.parent(&item);
                came_from = Some(item);
                continue;
            }
        }

        let parent = provider.parent(&item);
        let siblings = provider.children(parent.as_ref()).await?;
        return match sibling_before(&siblings, &item) {
            Some(earlier) => last_descendant(provider, earlier).await.map(Some),
            None => Ok(parent),
        };
    }
}

/// Follow last children down from `item` until a lesson or a childless
/// submodule.
pub async fn last_descendant<P: CourseTree>(provider: &P, item: CourseItem) -> Result<CourseItem> {
    let mut current = item;
    while current.is_submodule() {
        let children = provider.children(Some(&current)).await?;
        match children.into_iter().last() {
            Some(last) => current = last,
            None => break,
        }
    }
    Ok(current)
}

/// The next lesson worth opening after `current`.
///
/// Submodules and passed lessons are skipped. `None` means everything after
/// `current` is complete.
pub async fn resume<P: CourseTree>(
    provider: &P,
    current: Option<&CourseItem>,
) -> Result<Option<Arc<Lesson>>> {
    let mut candidate = next(provider, current, None).await?;

    while let Some(item) = candidate {
        match &item {
            CourseItem::Lesson(lesson) if lesson.status() != LessonStatus::Passed => {
                return Ok(Some(lesson.clone()));
            }
            _ => candidate = next(provider, Some(&item), None).await?,
        }
    }

    Ok(None)
}

/// Every item of the course in pre-order, paired with its depth.
pub async fn walk<P: CourseTree>(provider: &P) -> Result<Vec<(usize, CourseItem)>> {
    let mut items = Vec::new();
    let mut stack: Vec<(usize, CourseItem)> = provider
        .children(None)
        .await?
        .into_iter()
        .rev()
        .map(|root| (0, root))
        .collect();

    while let Some((depth, item)) = stack.pop() {
        if item.is_submodule() {
            let children = provider.children(Some(&item)).await?;
            stack.extend(children.into_iter().rev().map(|child| (depth + 1, child)));
        }
        items.push((depth, item));
    }

    Ok(items)
}

fn sibling_after(siblings: &[CourseItem], item: &CourseItem) -> Option<CourseItem> {
    let index = siblings.iter().position(|sibling| sibling == item)?;
    siblings.get(index + 1).cloned()
}

fn sibling_before(siblings: &[CourseItem], item: &CourseItem) -> Option<CourseItem> {
    let index = siblings.iter().position(|sibling| sibling == item)?;
    index
        .checked_sub(1)
        .and_then(|index| siblings.get(index))
        .cloned()
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, str::FromStr};

    use learnme_manifest::{CourseModule, ElementConfig, LessonConfig};

    use super::*;
    use crate::{Error, Submodule};

    /// In-memory course keyed by config location; lesson statuses by title.
    struct MemoryTree {
        roots: Vec<String>,
        modules: HashMap<String, CourseModule>,
        passed: Vec<&'static str>,
    }

    impl MemoryTree {
        fn new(roots: &[&str], modules: &[(&str, &str)]) -> Self {
            Self {
                roots: roots.iter().map(|s| s.to_string()).collect(),
                modules: modules
                    .iter()
                    .map(|(path, content)| {
                        (path.to_string(), CourseModule::from_str(content).unwrap())
                    })
                    .collect(),
                passed: Vec::new(),
            }
        }

        fn module(&self, location: &str) -> Result<CourseModule> {
            self.modules
                .get(location)
                .cloned()
                .ok_or_else(|| Error::NotFound {
                    selector: location.to_string(),
                })
        }

        fn lesson(&self, position: usize, config: &LessonConfig, parent: &Arc<Submodule>) -> Lesson {
            let lesson = Lesson::new(position, config.clone(), parent.clone());
            if self.passed.iter().any(|title| *title == config.title) {
                lesson.with_results(vec![learnme_tap::TestAssertion {
                    name: "ok".to_string(),
                    path: "ok".to_string(),
                    succeeded: true,
                }])
            } else {
                lesson
            }
        }
    }

    impl CourseTree for MemoryTree {
        async fn children(&self, item: Option<&CourseItem>) -> Result<Vec<CourseItem>> {
            let mut items = Vec::new();
            match item {
                None => {
                    for (position, root) in self.roots.iter().enumerate() {
                        let module = self.module(root)?;
                        items.push(CourseItem::from(Submodule::new(root, position, module, None)));
                    }
                }
                Some(CourseItem::Lesson(_)) => {}
                Some(CourseItem::Submodule(parent)) => {
                    for (position, entry) in parent.module().modules.iter().enumerate() {
                        let item = match entry {
                            ElementConfig::Lesson(config) => {
                                CourseItem::from(self.lesson(position, config, parent))
                            }
                            ElementConfig::Submodule(reference) => {
                                let location = format!("{}/learnme.toml", reference.path);
                                let module = self.module(&location)?;
                                CourseItem::from(Submodule::new(
                                    location,
                                    position,
                                    module,
                                    Some(parent.clone()),
                                ))
                            }
                        };
                        items.push(item);
                    }
                }
            }
            Ok(items)
        }
    }

    fn lesson(title: &str) -> String {
        format!(
            "\n[[modules]]\ntype = \"lesson\"\ntitle = \"{title}\"\ncontentType = \"markdown\"\ncontentPath = \"x.md\"\n"
        )
    }

    fn submodule(title: &str, path: &str) -> String {
        format!("\n[[modules]]\ntype = \"submodule\"\ntitle = \"{title}\"\npath = \"{path}\"\n")
    }

    /// Course [Unit1 [L1, L2], L3]
    fn course() -> MemoryTree {
        let root = format!(
            "title = \"Course\"\n{}{}",
            submodule("Unit1", "unit1"),
            lesson("L3")
        );
        let unit1 = format!("title = \"Unit1\"\n{}{}", lesson("L1"), lesson("L2"));
        MemoryTree::new(
            &["course/learnme.toml"],
            &[("course/learnme.toml", &root), ("unit1/learnme.toml", &unit1)],
        )
    }

    async fn find(tree: &MemoryTree, label: &str) -> CourseItem {
        walk(tree)
            .await
            .unwrap()
            .into_iter()
            .map(|(_, item)| item)
            .find(|item| item.label() == label)
            .unwrap_or_else(|| panic!("no item labelled {label}"))
    }

    async fn labels_forward(tree: &MemoryTree) -> Vec<String> {
        let mut labels = Vec::new();
        let mut item = next(tree, None, None).await.unwrap();
        while let Some(current) = item {
            labels.push(current.label().to_string());
            item = next(tree, Some(&current), None).await.unwrap();
        }
        labels
    }

    #[tokio::test]
    async fn test_next_sequence() {
        let tree = course();
        assert_eq!(
            labels_forward(&tree).await,
            ["Course", "Unit1", "L1", "L2", "L3"]
        );
    }

    #[tokio::test]
    async fn test_previous_examples() {
        let tree = course();

        let l3 = find(&tree, "L3").await;
        let prev = previous(&tree, Some(&l3), None).await.unwrap().unwrap();
        assert_eq!(prev.label(), "L2");

        let l1 = find(&tree, "L1").await;
        let prev = previous(&tree, Some(&l1), None).await.unwrap().unwrap();
        assert_eq!(prev.label(), "Unit1");

        let unit1 = find(&tree, "Unit1").await;
        let prev = previous(&tree, Some(&unit1), None).await.unwrap().unwrap();
        assert_eq!(prev.label(), "Course");

        let root = find(&tree, "Course").await;
        assert!(previous(&tree, Some(&root), None).await.unwrap().is_none());
        assert!(previous(&tree, None, None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_previous_ascending_from_child() {
        let tree = course();
        let root = find(&tree, "Course").await;
        let l3 = find(&tree, "L3").await;
        let unit1 = find(&tree, "Unit1").await;

        let prev = previous(&tree, Some(&root), Some(&l3)).await.unwrap().unwrap();
        assert_eq!(prev.label(), "L2");

        // No sibling before Unit1, so the walk keeps ascending past the root.
        assert!(
            previous(&tree, Some(&root), Some(&unit1))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_next_from_roots_with_came_from() {
        let tree = MemoryTree::new(
            &["a/learnme.toml", "b/learnme.toml"],
            &[
                ("a/learnme.toml", "title = \"A\""),
                ("b/learnme.toml", "title = \"B\""),
            ],
        );
        let a = find(&tree, "A").await;
        let b = find(&tree, "B").await;

        assert_eq!(next(&tree, None, Some(&a)).await.unwrap(), Some(b.clone()));
        assert!(next(&tree, None, Some(&b)).await.unwrap().is_none());
        // A has no children, so next falls through to the following root.
        assert_eq!(next(&tree, Some(&a), None).await.unwrap(), Some(b));
    }

    /// Course [L0, Unit1 [Deep [D1, Empty []], L1], Unit2 [], L2]
    fn mixed() -> MemoryTree {
        let root = format!(
            "title = \"Course\"\n{}{}{}{}",
            lesson("L0"),
            submodule("Unit1", "unit1"),
            submodule("Unit2", "unit2"),
            lesson("L2")
        );
        let unit1 = format!(
            "title = \"Unit1\"\n{}{}",
            submodule("Deep", "deep"),
            lesson("L1")
        );
        let deep = format!(
            "title = \"Deep\"\n{}{}",
            lesson("D1"),
            submodule("Empty", "empty")
        );
        MemoryTree::new(
            &["course/learnme.toml"],
            &[
                ("course/learnme.toml", &root),
                ("unit1/learnme.toml", &unit1),
                ("deep/learnme.toml", &deep),
                ("empty/learnme.toml", "title = \"Empty\""),
                ("unit2/learnme.toml", "title = \"Unit2\""),
            ],
        )
    }

    #[tokio::test]
    async fn test_next_visits_every_item_once_in_pre_order() {
        let tree = mixed();
        let walked: Vec<String> = walk(&tree)
            .await
            .unwrap()
            .into_iter()
            .map(|(_, item)| item.label().to_string())
            .collect();

        assert_eq!(
            walked,
            ["Course", "L0", "Unit1", "Deep", "D1", "Empty", "L1", "Unit2", "L2"]
        );
        assert_eq!(labels_forward(&tree).await, walked);
    }

    #[tokio::test]
    async fn test_previous_inverts_next() {
        let tree = mixed();
        let items: Vec<CourseItem> = walk(&tree)
            .await
            .unwrap()
            .into_iter()
            .map(|(_, item)| item)
            .collect();

        for pair in items.windows(2) {
            let back = previous(&tree, Some(&pair[1]), None).await.unwrap();
            assert_eq!(back.as_ref(), Some(&pair[0]), "previous of {}", pair[1]);
        }
    }

    #[tokio::test]
    async fn test_previous_lands_on_childless_submodule() {
        let tree = mixed();
        let l2 = find(&tree, "L2").await;
        let prev = previous(&tree, Some(&l2), None).await.unwrap().unwrap();
        assert_eq!(prev.label(), "Unit2");

        let unit2 = find(&tree, "Unit2").await;
        let prev = previous(&tree, Some(&unit2), None).await.unwrap().unwrap();
        assert_eq!(prev.label(), "L1");
    }

    #[tokio::test]
    async fn test_last_descendant() {
        let tree = mixed();
        let unit1 = find(&tree, "Unit1").await;
        let deep = find(&tree, "Deep").await;

        assert_eq!(last_descendant(&tree, unit1).await.unwrap().label(), "L1");
        assert_eq!(last_descendant(&tree, deep).await.unwrap().label(), "Empty");
    }

    #[tokio::test]
    async fn test_duplicate_titles_are_told_apart() {
        let root = format!("title = \"Course\"\n{}{}{}", lesson("Same"), lesson("Same"), lesson("End"));
        let tree = MemoryTree::new(&["c/learnme.toml"], &[("c/learnme.toml", &root)]);

        let items: Vec<CourseItem> = walk(&tree)
            .await
            .unwrap()
            .into_iter()
            .map(|(_, item)| item)
            .collect();
        let after_second = next(&tree, Some(&items[2]), None).await.unwrap().unwrap();
        assert_eq!(after_second.label(), "End");
        assert_eq!(labels_forward(&tree).await, ["Course", "Same", "Same", "End"]);
    }

    #[tokio::test]
    async fn test_resume_skips_submodules_and_passed_lessons() {
        let mut tree = course();
        tree.passed = vec!["L1"];
        let unit1 = find(&tree, "Unit1").await;

        let lesson = resume(&tree, Some(&unit1)).await.unwrap().unwrap();
        assert_eq!(lesson.title(), "L2");

        let lesson = resume(&tree, None).await.unwrap().unwrap();
        assert_eq!(lesson.title(), "L2");
    }

    #[tokio::test]
    async fn test_resume_reports_completion() {
        let mut tree = course();
        tree.passed = vec!["L1", "L2", "L3"];
        assert!(resume(&tree, None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_errors_propagate() {
        let root = format!("title = \"Course\"\n{}", submodule("Gone", "gone"));
        let tree = MemoryTree::new(&["c/learnme.toml"], &[("c/learnme.toml", &root)]);
        let course = next(&tree, None, None).await.unwrap().unwrap();

        let err = next(&tree, Some(&course), None).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
