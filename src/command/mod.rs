//! Executable command tree: calls, pipes and sequences.

use std::io::{Read, Write};

use log::{debug, warn};

use crate::error::ShellError;
use crate::parse::{ParsedLine, Pipeline};
use crate::redirect::extract_redirections;
use crate::resolve::parse_arguments;
use crate::shell::Shell;

/// A node of the command tree. Children are owned exclusively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A single application invocation.
    Call(Call),
    /// `left | right`: left's output becomes right's input.
    Pipe {
        left: Box<Command>,
        right: Box<Command>,
    },
    /// `a; b; c`: run in order, reporting failures inline.
    Sequence(Vec<Command>),
}

/// Raw tokens of one simple command. Redirections and arguments are
/// resolved only when the call is evaluated, so substitutions see the
/// effects of earlier commands in the same line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    tokens: Vec<String>,
}

impl Call {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    fn evaluate(
        &self,
        shell: &mut Shell,
        stdin: &mut dyn Read,
        stdout: &mut dyn Write,
    ) -> Result<(), ShellError> {
        if self.tokens.is_empty() {
            return Err(ShellError::Syntax("empty command".into()));
        }
        let redirections = extract_redirections(shell, &self.tokens)?;
        let args = parse_arguments(shell, &redirections.args)?;
        let Some((name, rest)) = args.split_first() else {
            return Err(ShellError::Syntax("missing command".into()));
        };

        let mut input: Box<dyn Read + '_> = match redirections.input {
            Some(file) => Box::new(file),
            None => Box::new(stdin),
        };
        let mut output: Box<dyn Write + '_> = match redirections.output {
            Some(file) => Box::new(file),
            None => Box::new(stdout),
        };
        shell.run_application(name, rest, &mut *input, &mut *output)?;
        output.flush()?;
        Ok(())
    }
}

impl Command {
    /// Assemble the tree for a parsed line.
    ///
    /// A line with one pipeline becomes that pipeline; several become a
    /// `Sequence`. Pipes associate to the left: `a | b | c` is `(a | b) | c`.
    pub fn build(parsed: ParsedLine) -> Command {
        let mut pipelines: Vec<Command> = parsed.pipelines.into_iter().map(Self::pipeline).collect();
        if pipelines.len() == 1 {
            pipelines.remove(0)
        } else {
            Command::Sequence(pipelines)
        }
    }

    fn pipeline(pipeline: Pipeline) -> Command {
        pipeline
            .stages
            .into_iter()
            .map(|stage| Command::Call(Call::new(stage.tokens)))
            .reduce(|left, right| Command::Pipe {
                left: Box::new(left),
                right: Box::new(right),
            })
            .unwrap_or(Command::Sequence(Vec::new()))
    }

    /// Run the command reading from `stdin` and writing to `stdout`.
    pub fn evaluate(
        &self,
        shell: &mut Shell,
        stdin: &mut dyn Read,
        stdout: &mut dyn Write,
    ) -> Result<(), ShellError> {
        match self {
            Command::Call(call) => call.evaluate(shell, stdin, stdout),
            Command::Pipe { left, right } => {
                // Left runs to completion before right starts; its output is
                // held in memory and nothing is forwarded if it fails.
                let mut buffer = Vec::new();
                left.evaluate(shell, stdin, &mut buffer)?;
                debug!("pipe carrying {} bytes", buffer.len());
                right.evaluate(shell, &mut buffer.as_slice(), stdout)
            }
            Command::Sequence(children) => {
                for child in children {
                    match child.evaluate(shell, stdin, stdout) {
                        Ok(()) => {}
                        Err(err) if err.is_recoverable() => {
                            warn!("sequence child failed: {err}");
                            writeln!(stdout, "shell: {err}")?;
                        }
                        Err(err) => return Err(err),
                    }
                }
                Ok(())
            }
        }
    }
}
