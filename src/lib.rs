//! minish: a small interactive shell with built-in Unix-style applications.
//!
//! A command line is split into a sequence of pipelines, each stage is
//! tokenized, redirections are bound, arguments are resolved (quotes,
//! backtick substitution, `*` globs) and the first argument selects a
//! built-in application. Nothing is delegated to the host system's programs.
//!
//! # Architecture
//!
//! - **[`parse`]**: `;`/`|` splitting and stage tokenizing, quote-aware.
//! - **[`resolve`]**: argument resolution, the pattern accumulator and glob expansion.
//! - **[`redirect`]**: `<`/`>` extraction and file binding.
//! - **[`command`]**: the `Call` / `Pipe` / `Sequence` command tree and its evaluation.
//! - **[`apps`]**: the built-in applications and the name → application registry.
//! - **[`shell`]**: the engine tying it together; re-entered for substitution.
//! - **[`config`]**: embedded defaults + user overlay merge.
//! - **[`logging`]**: file logging to `~/.local/share/minish/minish.log`.

/// Built-in applications and dispatch.
pub mod apps;
/// Command tree and evaluation.
pub mod command;
/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Tracked working directory and path resolution.
pub mod environment;
/// Error taxonomy.
pub mod error;
/// File-based logging.
pub mod logging;
/// Command-line splitting and tokenizing.
pub mod parse;
/// Input/output redirection.
pub mod redirect;
/// Argument resolution and glob expansion.
pub mod resolve;
/// The shell engine.
pub mod shell;

pub use error::{AppError, ShellError};
pub use shell::Shell;

/// Evaluate one line in a fresh shell rooted at `cwd`, using the default
/// configuration, and return everything it wrote.
///
/// This is the main entry point for tests and simple usage.
pub fn run_line(line: &str, cwd: &std::path::Path) -> Result<String, ShellError> {
    let config = config::Config::default_config();
    let mut shell = Shell::with_env(&config, environment::Environment::new(cwd));
    shell.eval_to_string(line)
}
