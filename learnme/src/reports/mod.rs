//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod item;
mod output;
mod show;
mod test;
mod tree;

pub use item::{ItemSummary, NavigateReport, Navigation};
pub use output::{Report, TerminalOutput};
pub use show::{LessonView, ShowReport, SubmoduleView};
pub use test::TestReport;
pub use tree::{TreeEntry, TreeReport};
