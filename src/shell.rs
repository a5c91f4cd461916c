//! The shell engine: parses lines, owns the environment and application
//! registry, and re-enters itself for backtick substitution.

use std::io::{self, Read, Write};
use std::path::Path;

use log::debug;

use crate::apps::ApplicationRegistry;
use crate::command::Command;
use crate::config::Config;
use crate::environment::Environment;
use crate::error::ShellError;
use crate::parse;
use crate::resolve::CommandRunner;

pub struct Shell {
    env: Environment,
    registry: ApplicationRegistry,
    max_depth: usize,
    depth: usize,
}

impl Shell {
    /// Build a shell starting in the process's working directory.
    pub fn new(config: &Config) -> Self {
        Self::with_env(config, Environment::from_process())
    }

    pub fn with_env(config: &Config, env: Environment) -> Self {
        Self {
            env,
            registry: ApplicationRegistry::from_config(config),
            max_depth: config.settings.max_substitution_depth,
            depth: 0,
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Parse a line into its command tree without running anything.
    pub fn parse(line: &str) -> Result<Command, ShellError> {
        Ok(Command::build(parse::parse_line(line)?))
    }

    /// Parse and evaluate one line.
    pub fn eval(
        &mut self,
        line: &str,
        stdin: &mut dyn Read,
        stdout: &mut dyn Write,
    ) -> Result<(), ShellError> {
        let command = Self::parse(line)?;
        command.evaluate(self, stdin, stdout)
    }

    /// Evaluate a line with empty input and return its output as text.
    pub fn eval_to_string(&mut self, line: &str) -> Result<String, ShellError> {
        let mut out = Vec::new();
        self.eval(line, &mut io::empty(), &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    pub(crate) fn run_application(
        &mut self,
        name: &str,
        args: &[String],
        stdin: &mut dyn Read,
        stdout: &mut dyn Write,
    ) -> Result<(), ShellError> {
        self.registry.run(name, args, &mut self.env, stdin, stdout)
    }
}

impl CommandRunner for Shell {
    fn cwd(&self) -> &Path {
        self.env.cwd()
    }

    /// Run a substituted line with empty input.
    ///
    /// `exit` inside a substitution ends only the substitution; whatever it
    /// wrote so far is still returned.
    fn substitute(&mut self, line: &str) -> Result<String, ShellError> {
        if self.depth >= self.max_depth {
            return Err(ShellError::SubstitutionDepth(self.max_depth));
        }
        self.depth += 1;
        debug!("substituting {line:?} at depth {}", self.depth);
        let mut out = Vec::new();
        let result = self.eval(line, &mut io::empty(), &mut out);
        self.depth -= 1;
        match result {
            Ok(()) | Err(ShellError::Exit(_)) => Ok(String::from_utf8_lossy(&out).into_owned()),
            Err(err) => Err(err),
        }
    }
}
