use clap::Args;
use eyre::Result;

use super::{CourseArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Navigation, Report, TerminalOutput},
};

async fn run(course: &CourseArgs, navigation: Navigation, item: Option<&str>) -> Result<()> {
    let provider = course.provider();
    let report = ops::navigate(&provider, navigation, item)
        .await
        .unwrap_or_exit()?;
    report.render(&mut TerminalOutput::new());

    Ok(())
}

#[derive(Args)]
pub struct NextCommand {
    /// Item to start from, as titles or 1-based positions ("Basics/2")
    pub item: Option<String>,

    #[command(flatten)]
    pub course: CourseArgs,
}

impl NextCommand {
    pub async fn run(&self) -> Result<()> {
        run(&self.course, Navigation::Next, self.item.as_deref()).await
    }
}

#[derive(Args)]
pub struct PrevCommand {
    /// Item to start from, as titles or 1-based positions ("Basics/2")
    pub item: Option<String>,

    #[command(flatten)]
    pub course: CourseArgs,
}

impl PrevCommand {
    pub async fn run(&self) -> Result<()> {
        run(&self.course, Navigation::Previous, self.item.as_deref()).await
    }
}

#[derive(Args)]
pub struct ResumeCommand {
    /// Resume after this item instead of from the start
    pub item: Option<String>,

    #[command(flatten)]
    pub course: CourseArgs,
}

impl ResumeCommand {
    pub async fn run(&self) -> Result<()> {
        run(&self.course, Navigation::Resume, self.item.as_deref()).await
    }
}
