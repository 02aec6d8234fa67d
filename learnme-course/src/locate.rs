//! Addressing course items by path.
//!
//! A selector is a `/`-separated list of segments, each either an exact title
//! or a 1-based position among the siblings: `"Basics/2"` is the second entry
//! of the module titled `Basics`. With a single workspace root the root's own
//! segment may be omitted.

use crate::{CourseItem, CourseTree, Error, Result};

/// Resolve `selector` to a course item, expanding only the modules on its path.
pub async fn locate<P: CourseTree>(provider: &P, selector: &str) -> Result<CourseItem> {
    let not_found = || Error::NotFound {
        selector: selector.to_string(),
    };

    let segments: Vec<&str> = selector
        .split('/')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect();
    let (first, rest) = segments.split_first().ok_or_else(not_found)?;

    let roots = provider.children(None).await?;
    let (mut current, rest) = match find(&roots, first) {
        Some(root) => (root, rest),
        None => match roots.as_slice() {
            [root] => (root.clone(), segments.as_slice()),
            _ => return Err(not_found()),
        },
    };

    for segment in rest {
        let children = provider.children(Some(&current)).await?;
        current = find(&children, segment).ok_or_else(not_found)?;
    }

    tracing::debug!(selector, item = %current, "located course item");
    Ok(current)
}

/// Title match first, then 1-based position.
fn find(items: &[CourseItem], segment: &str) -> Option<CourseItem> {
    items
        .iter()
        .find(|item| item.label() == segment)
        .or_else(|| {
            let position = segment.parse::<usize>().ok()?;
            items.get(position.checked_sub(1)?)
        })
        .cloned()
}
