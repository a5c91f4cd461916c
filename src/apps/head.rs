use std::io::{Read, Write};

use super::io::{read_source, split_lines, write_lines};
use crate::environment::Environment;
use crate::error::{AppError, ShellError};

const NAME: &str = "head";

/// Number of lines printed when `-n` is absent.
pub const DEFAULT_LINES: usize = 10;

/// Parse `[-n N] [FILE]` shared by `head` and `tail`.
pub(super) fn parse_count_args<'a>(
    app: &'static str,
    args: &'a [String],
) -> Result<(usize, Option<&'a str>), AppError> {
    match args {
        [] => Ok((DEFAULT_LINES, None)),
        [file] if file != "-n" => Ok((DEFAULT_LINES, Some(file.as_str()))),
        [flag, count] if flag == "-n" => Ok((parse_count(app, count)?, None)),
        [flag, count, file] if flag == "-n" => Ok((parse_count(app, count)?, Some(file.as_str()))),
        _ => Err(AppError::new(app, "usage: [-n N] [FILE]")),
    }
}

fn parse_count(app: &'static str, count: &str) -> Result<usize, AppError> {
    count
        .parse()
        .map_err(|_| AppError::new(app, format!("invalid number of lines: {count}")))
}

pub fn run(
    args: &[String],
    env: &Environment,
    stdin: &mut dyn Read,
    stdout: &mut dyn Write,
) -> Result<(), ShellError> {
    let (count, file) = parse_count_args(NAME, args)?;
    let data = read_source(NAME, env, file, stdin)?;
    write_lines(stdout, split_lines(&data).into_iter().take(count))?;
    Ok(())
}
