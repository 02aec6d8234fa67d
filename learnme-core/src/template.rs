//! Test command formatting.
//!
//! Test commands are declared in `learnme.toml` as templates with two
//! substitution points:
//!
//! ```text
//! npx mocha --reporter=tap {{join filePaths ' '}} > {{outputPath}}
//! ```
//!
//! - `{{outputPath}}` expands to the TAP artifact path.
//! - `{{join filePaths '<sep>'}}` expands to the test files joined by `<sep>`.
//!
//! Anything else between braces is rejected.

use thiserror::Error;

/// Values substituted into a test command template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    /// Resolved test file paths, in declaration order.
    pub file_paths: &'a [String],
    /// Resolved TAP artifact path.
    pub output_path: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unterminated '{{{{' at byte {offset}")]
    Unterminated { offset: usize },

    #[error("unsupported template expression '{expression}'")]
    UnsupportedExpression { expression: String },
}

/// Render a test command template.
pub fn render_test_command(
    template: &str,
    ctx: &TemplateContext<'_>,
) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    let mut consumed = 0;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            return Err(TemplateError::Unterminated {
                offset: consumed + start,
            });
        };

        let expression = after_open[..end].trim();
        output.push_str(&expand(expression, ctx)?);

        let advance = start + 2 + end + 2;
        consumed += advance;
        rest = &rest[advance..];
    }

    output.push_str(rest);
    Ok(output)
}

fn expand(expression: &str, ctx: &TemplateContext<'_>) -> Result<String, TemplateError> {
    if expression == "outputPath" {
        return Ok(ctx.output_path.to_string());
    }

    if let Some(args) = expression
        .strip_prefix("join")
        .filter(|args| args.starts_with(char::is_whitespace))
    {
        let args = args.trim_start();
        if let Some(separator) = args.strip_prefix("filePaths") {
            if let Some(separator) = unquote(separator.trim()) {
                return Ok(ctx.file_paths.join(separator));
            }
        }
    }

    Err(TemplateError::UnsupportedExpression {
        expression: expression.to_string(),
    })
}

/// Strip matching single or double quotes.
fn unquote(s: &str) -> Option<&str> {
    ['\'', '"'].into_iter().find_map(|quote| {
        s.strip_prefix(quote)
            .and_then(|inner| inner.strip_suffix(quote))
    })
}
