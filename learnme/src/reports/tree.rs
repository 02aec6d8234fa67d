//! Tree command report data structures.

use learnme_course::LessonStatus;

use super::{
    item::status_mark,
    output::{Output, Report},
};

/// One line of the course outline.
#[derive(Debug, Clone)]
pub struct TreeEntry {
    pub depth: usize,
    pub title: String,
    /// Test status, for lessons.
    pub status: Option<LessonStatus>,
}

/// Report data from the whole-course outline.
#[derive(Debug, Default)]
pub struct TreeReport {
    pub entries: Vec<TreeEntry>,
}

impl TreeReport {
    /// Lessons whose tests all passed, out of all lessons.
    pub fn progress(&self) -> (usize, usize) {
        let lessons = self.entries.iter().filter_map(|entry| entry.status);
        lessons.fold((0, 0), |(passed, total), status| {
            (passed + usize::from(status == LessonStatus::Passed), total + 1)
        })
    }
}

impl Report for TreeReport {
    fn render(&self, out: &mut dyn Output) {
        for entry in &self.entries {
            match entry.status {
                Some(status) => {
                    out.nested_item(entry.depth, &format!("{} {}", status_mark(status), entry.title))
                }
                None => out.nested_item(entry.depth, &entry.title),
            }
        }

        let (passed, total) = self.progress();
        if total > 0 {
            out.newline();
            out.preformatted(&format!("{passed}/{total} lessons passed"));
        }
    }
}
