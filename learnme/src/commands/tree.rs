use clap::Args;
use eyre::Result;

use super::{CourseArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct TreeCommand {
    #[command(flatten)]
    pub course: CourseArgs,
}

impl TreeCommand {
    pub async fn run(&self) -> Result<()> {
        let provider = self.course.provider();
        let report = ops::tree(&provider).await.unwrap_or_exit()?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
