use log::trace;

use super::tokenize::tokenize;
use super::types::{Operator, ParsedLine, Pipeline, QuoteState, Stage};
use crate::error::ShellError;

/// Split a line at shell operators (`;`, `|`), respecting single quotes,
/// double quotes and backtick regions.
///
/// Returns the raw segments (untrimmed of inner whitespace, possibly empty)
/// and the operators between them: `segments.len() == operators.len() + 1`.
fn split_compound_command(line: &str) -> Result<(Vec<String>, Vec<Operator>), ShellError> {
    let mut parts = Vec::new();
    let mut operators = Vec::new();
    let mut buf = String::new();
    let mut state = QuoteState::Unquoted;

    for c in line.chars() {
        if !state.is_quoted() {
            let op = match c {
                ';' => Some(Operator::Semi),
                '|' => Some(Operator::Pipe),
                _ => None,
            };
            if let Some(op) = op {
                parts.push(buf.trim().to_string());
                operators.push(op);
                buf.clear();
                continue;
            }
        }
        state = state.step(c);
        buf.push(c);
    }

    if state.is_quoted() {
        return Err(ShellError::Syntax(format!(
            "unterminated {}",
            state.describe()
        )));
    }
    parts.push(buf.trim().to_string());

    Ok((parts, operators))
}

/// Parse a full line into pipelines of tokenized stages.
///
/// `;` binds looser than `|`. Empty sequence elements are dropped, so a
/// trailing `;` is legal; an empty stage inside a pipeline is a syntax error.
pub fn parse_line(line: &str) -> Result<ParsedLine, ShellError> {
    let (parts, operators) = split_compound_command(line)?;

    let mut pipelines = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut parts = parts.into_iter();
    if let Some(first) = parts.next() {
        current.push(first);
    }
    for (op, part) in operators.iter().zip(parts) {
        match op {
            Operator::Pipe => current.push(part),
            Operator::Semi => {
                if let Some(pipeline) = finish_pipeline(std::mem::take(&mut current))? {
                    pipelines.push(pipeline);
                }
                current.push(part);
            }
        }
    }
    if let Some(pipeline) = finish_pipeline(current)? {
        pipelines.push(pipeline);
    }

    trace!("parsed {line:?} into {} pipeline(s)", pipelines.len());
    Ok(ParsedLine { pipelines })
}

fn finish_pipeline(segments: Vec<String>) -> Result<Option<Pipeline>, ShellError> {
    if segments.len() == 1 && segments[0].is_empty() {
        return Ok(None);
    }
    let mut stages = Vec::with_capacity(segments.len());
    for segment in segments {
        if segment.is_empty() {
            return Err(ShellError::Syntax(format!(
                "missing command around '{}'",
                Operator::Pipe.as_str()
            )));
        }
        stages.push(Stage {
            tokens: tokenize(&segment)?,
        });
    }
    Ok(Some(Pipeline { stages }))
}
