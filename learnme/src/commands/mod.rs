mod completions;
mod navigate;
mod show;
mod tree;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use learnme_course::CourseDataProvider;
use navigate::{NextCommand, PrevCommand, ResumeCommand};
use show::ShowCommand;
use test::TestCommand;
use tree::TreeCommand;

/// Extension trait for exiting on course config errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> Result<T>;
}

impl<T> UnwrapOrExit<T> for learnme_course::Result<T> {
    fn unwrap_or_exit(self) -> Result<T> {
        match self {
            Ok(v) => Ok(v),
            Err(learnme_course::Error::Config(e)) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Where the course lives.
#[derive(Args, Debug, Clone)]
pub struct CourseArgs {
    /// Workspace root holding a learnme.toml; repeat for several courses
    #[arg(short, long = "root", env = "LEARNME_ROOT", default_value = ".")]
    pub roots: Vec<PathBuf>,
}

impl CourseArgs {
    pub fn provider(&self) -> CourseDataProvider {
        CourseDataProvider::new(self.roots.iter().cloned())
    }
}

#[derive(Parser)]
#[command(name = "learnme")]
#[command(version)]
#[command(about = "Navigate learnme courses and run lesson tests")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Tree(cmd) => cmd.run().await,
            Commands::Next(cmd) => cmd.run().await,
            Commands::Prev(cmd) => cmd.run().await,
            Commands::Resume(cmd) => cmd.run().await,
            Commands::Show(cmd) => cmd.run().await,
            Commands::Test(cmd) => cmd.run().await,
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the course outline with lesson status
    Tree(TreeCommand),

    /// Show the item after ITEM (or the first item)
    Next(NextCommand),

    /// Show the item before ITEM
    Prev(PrevCommand),

    /// Show the next lesson whose tests have not passed
    Resume(ResumeCommand),

    /// Show a lesson's content or a module's overview
    Show(ShowCommand),

    /// Run a lesson's tests
    Test(TestCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
