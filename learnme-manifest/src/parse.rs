//! Module parsing from strings.

use std::str::FromStr;

use crate::{CONFIG_FILENAME, CourseModule, Error, Result, SourceContext};

impl FromStr for CourseModule {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_module(s, CONFIG_FILENAME)
    }
}

impl CourseModule {
    /// Parse a learnme.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_module(content, filename)
    }
}

/// Parse a module from content with the given filename for error reporting.
pub fn parse_module(content: &str, filename: &str) -> Result<CourseModule> {
    let source_ctx = SourceContext::new(content, filename);
    toml::from_str(content).map_err(|e| source_ctx.parse_error(e))
}
