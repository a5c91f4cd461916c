//! Built-in applications and the name → application dispatch table.
//!
//! Every application shares one contract: resolved arguments, the shell
//! environment, an input stream and an output stream. Business-rule failures
//! are [`AppError`](crate::error::AppError)s; anything else is a
//! [`ShellError`].

/// Concatenate files and standard input.
pub mod cat;
/// Change the shell's working directory.
pub mod cd;
/// Select byte ranges from each line.
pub mod cut;
/// Print arguments.
pub mod echo;
/// Leave the shell.
pub mod exit;
/// Recursive search by name.
pub mod find;
/// Print lines matching a regular expression.
pub mod grep;
/// First lines of input.
pub mod head;
/// Stream and file helpers shared by the applications.
pub mod io;
/// List directory contents.
pub mod ls;
/// Create directories.
pub mod mkdir;
/// Move or rename files.
pub mod mv;
/// Merge lines of several inputs.
pub mod paste;
/// Print the working directory.
pub mod pwd;
/// Remove files and directories.
pub mod rm;
/// Sort lines.
pub mod sort;
/// Last lines of input.
pub mod tail;
/// Copy input to output and files.
pub mod tee;
/// Collapse adjacent duplicate lines.
pub mod uniq;
/// Count lines, words and characters.
pub mod wc;

use std::collections::HashMap;
use std::io::{Read, Write};

use log::{debug, warn};

use crate::config::Config;
use crate::environment::Environment;
use crate::error::ShellError;

/// Prefix selecting the variant of an application that reports its errors
/// on stdout instead of failing.
pub const UNSAFE_PREFIX: char = '_';

/// Every built-in application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum App {
    Cat,
    Cd,
    Cut,
    Echo,
    Exit,
    Find,
    Grep,
    Head,
    Ls,
    Mkdir,
    Mv,
    Paste,
    Pwd,
    Rm,
    Sort,
    Tail,
    Tee,
    Uniq,
    Wc,
}

impl App {
    pub const ALL: &'static [App] = &[
        App::Cat,
        App::Cd,
        App::Cut,
        App::Echo,
        App::Exit,
        App::Find,
        App::Grep,
        App::Head,
        App::Ls,
        App::Mkdir,
        App::Mv,
        App::Paste,
        App::Pwd,
        App::Rm,
        App::Sort,
        App::Tail,
        App::Tee,
        App::Uniq,
        App::Wc,
    ];

    /// The name the application is invoked by.
    pub fn name(self) -> &'static str {
        match self {
            App::Cat => "cat",
            App::Cd => "cd",
            App::Cut => "cut",
            App::Echo => "echo",
            App::Exit => "exit",
            App::Find => "find",
            App::Grep => "grep",
            App::Head => "head",
            App::Ls => "ls",
            App::Mkdir => "mkdir",
            App::Mv => "mv",
            App::Paste => "paste",
            App::Pwd => "pwd",
            App::Rm => "rm",
            App::Sort => "sort",
            App::Tail => "tail",
            App::Tee => "tee",
            App::Uniq => "uniq",
            App::Wc => "wc",
        }
    }

    pub fn from_name(name: &str) -> Option<App> {
        App::ALL.iter().copied().find(|app| app.name() == name)
    }

    pub fn run(
        self,
        args: &[String],
        env: &mut Environment,
        stdin: &mut dyn Read,
        stdout: &mut dyn Write,
    ) -> Result<(), ShellError> {
        match self {
            App::Cat => cat::run(args, env, stdin, stdout),
            App::Cd => cd::run(args, env),
            App::Cut => cut::run(args, env, stdin, stdout),
            App::Echo => echo::run(args, stdout),
            App::Exit => Err(ShellError::Exit(exit::run(args)?)),
            App::Find => find::run(args, env, stdout),
            App::Grep => grep::run(args, env, stdin, stdout),
            App::Head => head::run(args, env, stdin, stdout),
            App::Ls => ls::run(args, env, stdout),
            App::Mkdir => mkdir::run(args, env),
            App::Mv => mv::run(args, env),
            App::Paste => paste::run(args, env, stdin, stdout),
            App::Pwd => pwd::run(args, env, stdout),
            App::Rm => rm::run(args, env),
            App::Sort => sort::run(args, env, stdin, stdout),
            App::Tail => tail::run(args, env, stdin, stdout),
            App::Tee => tee::run(args, env, stdin, stdout),
            App::Uniq => uniq::run(args, env, stdin, stdout),
            App::Wc => wc::run(args, env, stdin, stdout),
        }
    }
}

/// Applications reachable by name, built from configuration.
pub struct ApplicationRegistry {
    apps: HashMap<String, App>,
    allow_unsafe: bool,
}

impl ApplicationRegistry {
    pub fn from_config(config: &Config) -> Self {
        let mut apps = HashMap::new();
        for name in &config.applications.enabled {
            match App::from_name(name) {
                Some(app) => {
                    apps.insert(name.clone(), app);
                }
                None => warn!("ignoring unknown application in config: {name}"),
            }
        }
        Self {
            apps,
            allow_unsafe: config.settings.unsafe_applications,
        }
    }

    /// Find the application for `name`, and whether it is the unsafe variant.
    pub fn lookup(&self, name: &str) -> Option<(App, bool)> {
        if let Some(&app) = self.apps.get(name) {
            return Some((app, false));
        }
        if self.allow_unsafe
            && let Some(base) = name.strip_prefix(UNSAFE_PREFIX)
            && let Some(&app) = self.apps.get(base)
        {
            return Some((app, true));
        }
        None
    }

    /// Run `name` with `args`.
    ///
    /// An unsafe variant writes an application's own error to `stdout` as a
    /// line and succeeds; every other failure propagates unchanged.
    pub fn run(
        &self,
        name: &str,
        args: &[String],
        env: &mut Environment,
        stdin: &mut dyn Read,
        stdout: &mut dyn Write,
    ) -> Result<(), ShellError> {
        let Some((app, is_unsafe)) = self.lookup(name) else {
            return Err(ShellError::UnknownApplication(name.to_string()));
        };
        debug!(
            "running {name} {}",
            shlex::try_join(args.iter().map(String::as_str)).unwrap_or_else(|_| args.join(" "))
        );
        match app.run(args, env, stdin, stdout) {
            Err(ShellError::Application(err)) if is_unsafe => {
                writeln!(stdout, "{err}")?;
                Ok(())
            }
            other => other,
        }
    }
}
