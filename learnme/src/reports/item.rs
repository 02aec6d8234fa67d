//! Item summary and navigation report data structures.

use learnme_course::{ItemKind, LessonStatus};

use super::output::{Output, Report};

/// Marker shown next to a lesson for its test status.
pub fn status_mark(status: LessonStatus) -> &'static str {
    match status {
        LessonStatus::Empty => "·",
        LessonStatus::Error => "✗",
        LessonStatus::Passed => "✓",
    }
}

/// Everything needed to show and re-address a course item.
#[derive(Debug, Clone)]
pub struct ItemSummary {
    pub kind: ItemKind,
    /// Titles from the root down to the item.
    pub breadcrumbs: Vec<String>,
    /// Position-based selector that locates the item again.
    pub selector: String,
    /// Test status, for lessons.
    pub status: Option<LessonStatus>,
}

impl Report for ItemSummary {
    fn render(&self, out: &mut dyn Output) {
        out.title(&self.breadcrumbs.join(" / "));
        out.key_value("kind", self.kind.as_str());
        if let Some(status) = self.status {
            out.key_value("status", &format!("{} {}", status_mark(status), status));
        }
        out.key_value("selector", &self.selector);
    }
}

/// Which way a navigation command moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
    Resume,
}

/// Report data from `next`, `prev` and `resume`.
#[derive(Debug)]
pub struct NavigateReport {
    pub navigation: Navigation,
    /// The item landed on; `None` past either end of the course.
    pub target: Option<ItemSummary>,
}

impl Report for NavigateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.target {
            Some(target) => target.render(out),
            None => out.preformatted(match self.navigation {
                Navigation::Next => "End of course",
                Navigation::Previous => "Start of course",
                Navigation::Resume => "✓ Course complete",
            }),
        }
    }
}
