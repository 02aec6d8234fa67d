//! Navigate operation - next, previous and resume.

use learnme_course::{CourseItem, CourseTree, Result, locate, next, previous, resume};

use super::summarize;
use crate::reports::{NavigateReport, Navigation};

/// Execute a navigation step from the item at `selector`, or from before the
/// first item when no selector is given.
pub async fn navigate<P: CourseTree>(
    provider: &P,
    navigation: Navigation,
    selector: Option<&str>,
) -> Result<NavigateReport> {
    let current = match selector {
        Some(selector) => Some(locate(provider, selector).await?),
        None => None,
    };

    let target = match navigation {
        Navigation::Next => next(provider, current.as_ref(), None).await?,
        Navigation::Previous => previous(provider, current.as_ref(), None).await?,
        Navigation::Resume => resume(provider, current.as_ref())
            .await?
            .map(CourseItem::Lesson),
    };

    Ok(NavigateReport {
        navigation,
        target: target.as_ref().map(summarize),
    })
}
