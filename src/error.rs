//! Error taxonomy shared by the parser, resolver, redirection handler and
//! applications.

use std::io;

use thiserror::Error;

/// Failure raised while parsing or evaluating a command line.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Malformed command line: empty stage, unterminated quote, missing command.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// An argument could not be resolved (bad quoting, failed substitution).
    #[error("{0}")]
    Resolution(String),

    /// A `<` or `>` operator could not be honoured.
    #[error("{0}")]
    Redirection(String),

    /// The first argument does not name an enabled application.
    #[error("{0}: invalid command")]
    UnknownApplication(String),

    /// Backtick substitution nested deeper than the configured limit.
    #[error("command substitution nested deeper than {0} levels")]
    SubstitutionDepth(usize),

    /// Reading from or writing to one of the command's streams failed.
    #[error("{0}")]
    Io(#[from] io::Error),

    /// Business-rule failure raised inside a built-in application.
    #[error(transparent)]
    Application(#[from] AppError),

    /// Raised by `exit`. Carries the requested process status.
    #[error("exit")]
    Exit(i32),
}

impl ShellError {
    /// Whether a `Sequence` may report this failure and move on to its next child.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ShellError::Exit(_))
    }
}

/// Failure raised by a built-in application, displayed as `<app>: <message>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{app}: {message}")]
pub struct AppError {
    pub app: &'static str,
    pub message: String,
}

impl AppError {
    pub fn new(app: &'static str, message: impl Into<String>) -> Self {
        Self {
            app,
            message: message.into(),
        }
    }

    /// Describe an I/O failure on `subject` (usually a file name) in the
    /// conventional `subject: reason` form.
    pub fn io(app: &'static str, subject: &str, err: &io::Error) -> Self {
        Self::new(app, format!("{subject}: {}", io_reason(err)))
    }
}

/// Human-readable reason for an I/O error, without the OS error code suffix.
pub fn io_reason(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => "No such file or directory".into(),
        io::ErrorKind::PermissionDenied => "Permission denied".into(),
        io::ErrorKind::IsADirectory => "Is a directory".into(),
        io::ErrorKind::NotADirectory => "Not a directory".into(),
        io::ErrorKind::AlreadyExists => "File exists".into(),
        io::ErrorKind::DirectoryNotEmpty => "Directory not empty".into(),
        _ => err.to_string(),
    }
}
