//! Argument resolution: quote removal, backtick substitution and globbing.
//!
//! A raw token is scanned once. Quoted text and substitution output go into
//! a [`RegexArgument`] as literals; an unquoted `*` goes in as a wildcard.
//! Unquoted substitution output is split on whitespace, so one token can
//! resolve to several arguments even before globbing.

pub mod glob;
pub mod pattern;

use std::path::Path;
use std::str::Chars;

use log::trace;

use crate::error::ShellError;
pub use pattern::RegexArgument;

/// The hook the resolver uses to run backtick substitutions.
///
/// Implemented by [`Shell`](crate::shell::Shell); tests substitute a stub.
pub trait CommandRunner {
    /// Directory globs are expanded against.
    fn cwd(&self) -> &Path;

    /// Evaluate `line` as a full command line and return everything it wrote.
    fn substitute(&mut self, line: &str) -> Result<String, ShellError>;
}

/// Resolve every token and concatenate the results.
pub fn parse_arguments(
    runner: &mut dyn CommandRunner,
    tokens: &[String],
) -> Result<Vec<String>, ShellError> {
    let mut args = Vec::with_capacity(tokens.len());
    for token in tokens {
        args.extend(resolve_one_argument(runner, token)?);
    }
    Ok(args)
}

/// Resolve a single raw token into zero or more final arguments.
pub fn resolve_one_argument(
    runner: &mut dyn CommandRunner,
    token: &str,
) -> Result<Vec<String>, ShellError> {
    let mut words = vec![RegexArgument::new()];
    let mut chars = token.chars();

    while let Some(c) = chars.next() {
        let current = last_word(&mut words);
        match c {
            '\'' => {
                current.mark_quoted();
                let text = take_until(&mut chars, '\'', token, "single quote")?;
                current.push_literal_str(&text);
            }
            '"' => {
                current.mark_quoted();
                resolve_double_quoted(runner, &mut chars, current, token)?;
            }
            '`' => {
                let line = take_until(&mut chars, '`', token, "backquote")?;
                let output = run_substitution(runner, &line)?;
                splice_unquoted(&mut words, &output);
            }
            '*' => current.push_wildcard(),
            other => current.push_literal(other),
        }
    }

    let cwd = runner.cwd().to_path_buf();
    let mut resolved = Vec::new();
    for word in words {
        if word.is_glob() {
            resolved.extend(glob::expand(&word, &cwd));
        } else if !word.plaintext().is_empty() || word.is_quoted() {
            resolved.push(word.into_plaintext());
        }
    }
    trace!("resolved {token:?} -> {resolved:?}");
    Ok(resolved)
}

fn last_word(words: &mut Vec<RegexArgument>) -> &mut RegexArgument {
    if words.is_empty() {
        words.push(RegexArgument::new());
    }
    let last = words.len() - 1;
    &mut words[last]
}

/// Consume a double-quoted region (opening quote already consumed).
/// Everything is literal except a backtick, whose output is spliced in whole.
fn resolve_double_quoted(
    runner: &mut dyn CommandRunner,
    chars: &mut Chars<'_>,
    current: &mut RegexArgument,
    token: &str,
) -> Result<(), ShellError> {
    loop {
        match chars.next() {
            None => return Err(unterminated("double quote", token)),
            Some('"') => return Ok(()),
            Some('`') => {
                let line = take_until(chars, '`', token, "backquote")?;
                let output = run_substitution(runner, &line)?;
                current.push_literal_str(&output);
            }
            Some(c) => current.push_literal(c),
        }
    }
}

/// Collect characters up to (not including) `close`, consuming the delimiter.
fn take_until(
    chars: &mut Chars<'_>,
    close: char,
    token: &str,
    what: &str,
) -> Result<String, ShellError> {
    let mut text = String::new();
    for c in chars.by_ref() {
        if c == close {
            return Ok(text);
        }
        text.push(c);
    }
    Err(unterminated(what, token))
}

fn unterminated(what: &str, token: &str) -> ShellError {
    ShellError::Resolution(format!("unterminated {what} in {token}"))
}

/// Run a substitution and trim a single trailing newline from its output.
fn run_substitution(runner: &mut dyn CommandRunner, line: &str) -> Result<String, ShellError> {
    let mut output = runner.substitute(line).map_err(|err| match err {
        ShellError::SubstitutionDepth(_) | ShellError::Resolution(_) => err,
        other => ShellError::Resolution(format!("`{}`: {other}", line.trim())),
    })?;
    if output.ends_with('\n') {
        output.pop();
    }
    Ok(output)
}

/// Word-split unquoted substitution output into the argument list.
/// The first piece continues the current word; each later piece starts a new one.
fn splice_unquoted(words: &mut Vec<RegexArgument>, output: &str) {
    let mut pieces = output.split(char::is_whitespace);
    if let Some(first) = pieces.next() {
        last_word(words).push_literal_str(first);
    }
    for piece in pieces {
        let mut word = RegexArgument::new();
        word.push_literal_str(piece);
        words.push(word);
    }
}
