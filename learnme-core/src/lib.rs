//! Core utilities for the learnme course navigator.
//!
//! This crate provides the pure helpers shared across the learnme crates:
//! config-relative path resolution and the test-command formatter.

mod paths;
mod template;

// Path resolution
pub use paths::{config_dir, resolve};
// Test command formatting
pub use template::{TemplateContext, TemplateError, render_test_command};
