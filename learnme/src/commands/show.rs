use clap::Args;
use eyre::Result;

use super::{CourseArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ShowCommand {
    /// Item to show, as titles or 1-based positions ("Basics/2")
    pub item: String,

    #[command(flatten)]
    pub course: CourseArgs,
}

impl ShowCommand {
    pub async fn run(&self) -> Result<()> {
        let provider = self.course.provider();
        let report = ops::show(&provider, &self.item).await.unwrap_or_exit()?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
