// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Course config types and parsing for `learnme.toml` files.

mod error;
mod file;
mod module;
mod parse;

use std::path::{Path, PathBuf};

pub use error::{Error, Result, SourceContext};
pub use file::LearnmeToml;
pub use module::{CourseModule, ElementConfig, LessonConfig, SubmoduleConfig};
pub use parse::parse_module;

/// Name of the config file that describes a module directory.
pub const CONFIG_FILENAME: &str = "learnme.toml";

/// Get the config file location for a module directory.
pub fn config_location(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join(CONFIG_FILENAME)
}
