//! Core operations.
//!
//! This module contains the business logic for learnme commands,
//! separated from CLI argument parsing and output rendering.

pub mod navigate;
pub mod show;
pub mod tree;

use learnme_course::CourseItem;
pub use navigate::navigate;
pub use show::show;
pub use test::test;
pub use tree::tree;

use crate::reports::ItemSummary;

/// Summarize `item` for display.
pub fn summarize(item: &CourseItem) -> ItemSummary {
    ItemSummary {
        kind: item.kind(),
        breadcrumbs: item.breadcrumbs(),
        selector: selector(item),
        status: item.as_lesson().map(|lesson| lesson.status()),
    }
}

/// 1-based positions from the root down to `item`.
fn selector(item: &CourseItem) -> String {
    let mut positions = vec![item.position() + 1];
    let mut current = item.parent();
    while let Some(parent) = current {
        positions.push(parent.position() + 1);
        current = parent.parent();
    }

    positions
        .iter()
        .rev()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join("/")
}
