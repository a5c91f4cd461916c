//! `<` / `>` handling for a single call.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use log::debug;

use crate::error::{ShellError, io_reason};
use crate::parse::{REDIRECT_IN, REDIRECT_OUT, is_redirect_operator};
use crate::resolve::{CommandRunner, resolve_one_argument};

/// Input bound by `<`.
#[derive(Debug)]
pub enum RedirectedInput {
    File(File),
    /// `<` named a directory: reads as empty instead of failing.
    Empty,
}

impl Read for RedirectedInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            RedirectedInput::File(file) => file.read(buf),
            RedirectedInput::Empty => Ok(0),
        }
    }
}

/// Outcome of scanning a call's tokens for redirections.
///
/// Owns any files it opened; they close when the state is dropped at the end
/// of the call. `None` means the inherited stream stays in effect.
#[derive(Debug, Default)]
pub struct RedirectionState {
    /// Tokens with every operator and its target removed, still unresolved.
    pub args: Vec<String>,
    pub input: Option<RedirectedInput>,
    pub output: Option<File>,
}

/// Strip `<`/`>` operators from `tokens`, opening their targets.
///
/// Targets go through the argument resolver and must resolve to exactly one
/// argument. A later redirection in the same direction replaces (and closes)
/// an earlier one.
pub fn extract_redirections(
    runner: &mut dyn CommandRunner,
    tokens: &[String],
) -> Result<RedirectionState, ShellError> {
    if tokens.is_empty() {
        return Err(ShellError::Redirection("no command to redirect".into()));
    }

    let mut state = RedirectionState::default();
    let mut iter = tokens.iter();
    while let Some(token) = iter.next() {
        if !is_redirect_operator(token) {
            state.args.push(token.clone());
            continue;
        }
        let target = match iter.next() {
            Some(next) if !is_redirect_operator(next) => next,
            _ => {
                return Err(ShellError::Redirection(format!(
                    "missing file name after '{token}'"
                )));
            }
        };
        let name = resolve_target(runner, target)?;
        let path = crate::environment::resolve_path(runner.cwd(), &name);
        // The superseded stream is closed before the new target is opened.
        if token == REDIRECT_IN {
            debug!("redirecting input from {}", path.display());
            drop(state.input.take());
            state.input = Some(open_input(&path, &name)?);
        } else {
            debug_assert_eq!(token, REDIRECT_OUT);
            debug!("redirecting output to {}", path.display());
            drop(state.output.take());
            state.output = Some(open_output(&path, &name)?);
        }
    }
    Ok(state)
}

fn resolve_target(runner: &mut dyn CommandRunner, target: &str) -> Result<String, ShellError> {
    let mut resolved = resolve_one_argument(runner, target)?;
    if resolved.len() != 1 {
        return Err(ShellError::Redirection(format!("{target}: ambiguous redirect")));
    }
    let name = resolved.remove(0);
    if name.is_empty() {
        return Err(ShellError::Redirection(": No such file or directory".into()));
    }
    Ok(name)
}

fn open_input(path: &Path, name: &str) -> Result<RedirectedInput, ShellError> {
    if path.is_dir() {
        return Ok(RedirectedInput::Empty);
    }
    File::open(path)
        .map(RedirectedInput::File)
        .map_err(|e| ShellError::Redirection(format!("{name}: {}", io_reason(&e))))
}

fn open_output(path: &Path, name: &str) -> Result<File, ShellError> {
    if path.is_dir() {
        return Err(ShellError::Redirection(format!("{name}: Is a directory")));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        return Err(ShellError::Redirection(format!(
            "{name}: No such file or directory"
        )));
    }
    File::create(path).map_err(|e| ShellError::Redirection(format!("{name}: {}", io_reason(&e))))
}
