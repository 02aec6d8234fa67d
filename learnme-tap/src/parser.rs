//! Line-oriented TAP parser.
//!
//! Subtests are nested streams indented by four spaces, optionally
//! introduced by a `# Subtest: name` line either at the parent level or as
//! the first line of the indented block. YAML diagnostic blocks following a
//! test point are skipped.

use thiserror::Error;

use crate::{Assert, Directive, Plan, TapEvent};

/// Indentation of a nested subtest stream.
const CHILD_INDENT: usize = 4;

/// A stream that cannot be read as TAP.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TapError {
    #[error("line {line}: invalid TAP version '{value}'")]
    InvalidVersion { line: usize, value: String },

    #[error("line {line}: invalid plan '{value}'")]
    InvalidPlan { line: usize, value: String },

    #[error("line {line}: YAML diagnostic block is never closed with '...'")]
    UnterminatedYaml { line: usize },
}

/// Parse a TAP stream into events, in document order.
pub fn parse(input: &str) -> Result<Vec<TapEvent>, TapError> {
    let lines: Vec<&str> = input.lines().collect();
    let mut parser = Parser {
        lines: &lines,
        pos: 0,
    };
    parser.stream(0, "")
}

struct Parser<'a> {
    lines: &'a [&'a str],
    pos: usize,
}

impl Parser<'_> {
    /// Parse lines at `indent` until a shallower line or the end of input.
    fn stream(&mut self, indent: usize, prefix: &str) -> Result<Vec<TapEvent>, TapError> {
        let mut events = Vec::new();
        let mut subtest_name: Option<String> = None;

        while let Some(line) = self.lines.get(self.pos).copied() {
            if line.trim().is_empty() {
                self.pos += 1;
                continue;
            }

            let depth = indentation(line);
            if depth < indent {
                break;
            }

            if depth >= indent + CHILD_INDENT {
                let child_indent = indent + CHILD_INDENT;
                let name = match subtest_name.take() {
                    Some(name) => Some(name),
                    None => self.child_header(child_indent),
                };
                let child_prefix = join_name(prefix, name.as_deref());
                let child = self.stream(child_indent, &child_prefix)?;
                events.push(TapEvent::Child(child));
                continue;
            }

            let line_number = self.pos + 1;
            let body = line.trim();
            self.pos += 1;

            if let Some(name) = subtest_header(body) {
                subtest_name = Some(name.to_string());
                continue;
            }
            subtest_name = None;

            if let Some(value) = body.strip_prefix("TAP version") {
                let version = value
                    .trim()
                    .parse()
                    .map_err(|_| TapError::InvalidVersion {
                        line: line_number,
                        value: value.trim().to_string(),
                    })?;
                events.push(TapEvent::Version(version));
            } else if let Some(plan) = parse_plan(body, line_number)? {
                events.push(TapEvent::Plan(plan));
            } else if let Some(assert) = parse_assert(body, prefix) {
                events.push(TapEvent::Assert(assert));
                self.skip_yaml(indent)?;
            } else if let Some(reason) = body.strip_prefix("Bail out!") {
                let reason = reason.trim();
                events.push(TapEvent::BailOut(
                    (!reason.is_empty()).then(|| reason.to_string()),
                ));
            } else if let Some(pragma) = parse_pragma(body) {
                events.push(pragma);
            } else if let Some(comment) = body.strip_prefix('#') {
                events.push(TapEvent::Comment(comment.trim().to_string()));
            } else {
                events.push(TapEvent::Extra(line.to_string()));
            }
        }

        Ok(events)
    }

    /// Consume a `# Subtest:` line opening an indented block, if present.
    fn child_header(&mut self, child_indent: usize) -> Option<String> {
        let line = self.lines.get(self.pos)?;
        if indentation(line) != child_indent {
            return None;
        }
        let name = subtest_header(line.trim())?;
        self.pos += 1;
        Some(name.to_string())
    }

    /// Skip a YAML diagnostic block directly after a test point.
    fn skip_yaml(&mut self, indent: usize) -> Result<(), TapError> {
        let Some(line) = self.lines.get(self.pos) else {
            return Ok(());
        };
        if line.trim() != "---" || indentation(line) <= indent {
            return Ok(());
        }

        let opened_at = self.pos + 1;
        self.pos += 1;
        loop {
            let Some(line) = self.lines.get(self.pos) else {
                return Err(TapError::UnterminatedYaml { line: opened_at });
            };
            self.pos += 1;
            if line.trim() == "..." {
                return Ok(());
            }
        }
    }
}

/// Column of the first non-blank character. Tabs advance to the next stop
/// of a nested stream, so a tab-indented block reads as one level deeper.
fn indentation(line: &str) -> usize {
    let mut width = 0;
    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width = (width / CHILD_INDENT + 1) * CHILD_INDENT,
            _ => break,
        }
    }
    width
}

/// Name of a `# Subtest: name` line (empty when unnamed).
fn subtest_header(body: &str) -> Option<&str> {
    let rest = body.strip_prefix('#')?.trim_start().strip_prefix("Subtest")?;
    let rest = rest.strip_prefix(':').unwrap_or(rest);
    Some(rest.trim())
}

fn join_name(prefix: &str, name: Option<&str>) -> String {
    match name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) if !prefix.is_empty() => format!("{prefix} {name}"),
        Some(name) => name.to_string(),
        None => prefix.to_string(),
    }
}

fn parse_plan(body: &str, line: usize) -> Result<Option<Plan>, TapError> {
    let (range, comment) = match body.split_once('#') {
        Some((range, comment)) => (range.trim(), Some(comment.trim())),
        None => (body, None),
    };
    let Some((start, end)) = range.split_once("..") else {
        return Ok(None);
    };
    // Anything other than `<digits>..<digits>` is stray output, not a plan.
    let end = end.trim_end();
    if !is_number(start) || !is_number(end) {
        return Ok(None);
    }

    let invalid = || TapError::InvalidPlan {
        line,
        value: body.to_string(),
    };
    let start = start.parse().map_err(|_| invalid())?;
    let end = end.parse().map_err(|_| invalid())?;

    Ok(Some(Plan {
        start,
        end,
        comment: comment.filter(|c| !c.is_empty()).map(String::from),
    }))
}

fn is_number(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn parse_assert(body: &str, prefix: &str) -> Option<Assert> {
    let (ok, rest) = if let Some(rest) = body.strip_prefix("not ok") {
        (false, rest)
    } else if let Some(rest) = body.strip_prefix("ok") {
        (true, rest)
    } else {
        return None;
    };
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let rest = rest.trim_start();
    let digits = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let id = rest[..digits].parse().ok();
    let rest = rest[digits..].trim_start();
    let rest = rest.strip_prefix('-').map_or(rest, str::trim_start);

    let (description, directive) = split_directive(rest);
    let name = description.trim().to_string();
    let fullname = join_name(prefix, Some(&name));

    Some(Assert {
        id,
        ok,
        name,
        fullname,
        directive,
    })
}

/// Split `description # SKIP reason` into its parts.
fn split_directive(rest: &str) -> (&str, Option<Directive>) {
    for (idx, _) in rest.match_indices('#') {
        let before = &rest[..idx];
        if !before.is_empty() && !before.ends_with(char::is_whitespace) {
            continue;
        }

        let after = rest[idx + 1..].trim_start();
        let word_end = after.find(char::is_whitespace).unwrap_or(after.len());
        let word = after[..word_end].to_ascii_lowercase();
        let reason = after[word_end..].trim().to_string();

        if word.starts_with("skip") {
            return (before, Some(Directive::Skip(reason)));
        }
        if word.starts_with("todo") {
            return (before, Some(Directive::Todo(reason)));
        }
    }
    (rest, None)
}

fn parse_pragma(body: &str) -> Option<TapEvent> {
    let rest = body.strip_prefix("pragma ")?.trim();
    let (enabled, name) = if let Some(name) = rest.strip_prefix('+') {
        (true, name)
    } else {
        (false, rest.strip_prefix('-')?)
    };
    Some(TapEvent::Pragma {
        enabled,
        name: name.to_string(),
    })
}
