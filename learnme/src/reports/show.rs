//! Show command report data structures.

use std::path::PathBuf;

use learnme_course::{ExerciseNode, ExerciseTree, TestAssertion};

use super::{
    item::ItemSummary,
    output::{Output, Report},
};

/// Report data for a single course item.
#[derive(Debug)]
pub enum ShowReport {
    Lesson(LessonView),
    Submodule(SubmoduleView),
}

/// A lesson with its content and exercise layout.
#[derive(Debug)]
pub struct LessonView {
    pub summary: ItemSummary,
    pub content_path: PathBuf,
    /// Raw content, `None` when the file could not be read.
    pub content: Option<String>,
    pub exercises: ExerciseTree,
    pub test_files: Vec<PathBuf>,
    pub test_command: Option<String>,
    /// Assertions from the last run.
    pub results: Vec<TestAssertion>,
}

/// A module overview listing its entries.
#[derive(Debug)]
pub struct SubmoduleView {
    pub summary: ItemSummary,
    pub modules: Vec<String>,
}

impl Report for ShowReport {
    fn render(&self, out: &mut dyn Output) {
        match self {
            ShowReport::Lesson(lesson) => lesson.render(out),
            ShowReport::Submodule(submodule) => submodule.render(out),
        }
    }
}

impl Report for LessonView {
    fn render(&self, out: &mut dyn Output) {
        self.summary.render(out);
        out.newline();

        match &self.content {
            Some(content) => out.preformatted(content.trim_end()),
            None => out.warning(&format!(
                "lesson content not found at {}",
                self.content_path.display()
            )),
        }

        if !self.exercises.is_empty() {
            out.newline();
            out.section(&format!("Exercise files ({})", self.exercises.root.display()));
            render_exercises(&self.exercises.nodes, 1, out);
        }

        if !self.test_files.is_empty() {
            out.newline();
            out.section("Tests");
            for file in &self.test_files {
                out.list_item(&file.display().to_string());
            }
            match &self.test_command {
                Some(command) => out.key_value("command", command),
                None => out.warning("no testCommand configured"),
            }
        }

        if !self.results.is_empty() {
            out.newline();
            out.section("Last run");
            for result in &self.results {
                let mark = if result.succeeded { "✓" } else { "✗" };
                out.list_item(&format!("{mark} {}", result.path));
            }
        }
    }
}

fn render_exercises(nodes: &[ExerciseNode], depth: usize, out: &mut dyn Output) {
    for node in nodes {
        match node {
            ExerciseNode::Directory { name, children, .. } => {
                out.nested_item(depth, &format!("{name}/"));
                render_exercises(children, depth + 1, out);
            }
            ExerciseNode::File { name, .. } => out.nested_item(depth, name),
        }
    }
}

impl Report for SubmoduleView {
    fn render(&self, out: &mut dyn Output) {
        self.summary.render(out);
        out.newline();

        if self.modules.is_empty() {
            out.preformatted("This module has no entries.");
            return;
        }
        out.section("Modules");
        for (index, title) in self.modules.iter().enumerate() {
            out.numbered_item(index + 1, title);
        }
    }
}
