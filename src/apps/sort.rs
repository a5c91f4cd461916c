use std::io::{Read, Write};

use super::io::{parse_flags, read_source, split_lines, write_lines};
use crate::environment::Environment;
use crate::error::{AppError, ShellError};

const NAME: &str = "sort";

/// `sort [-r] [FILE]`: lines in byte order, or reversed with `-r`.
pub fn run(
    args: &[String],
    env: &Environment,
    stdin: &mut dyn Read,
    stdout: &mut dyn Write,
) -> Result<(), ShellError> {
    let (flags, files) = parse_flags(NAME, args, "r")?;
    let file = match files {
        [] => None,
        [file] => Some(file.as_str()),
        _ => return Err(AppError::new(NAME, "too many arguments").into()),
    };
    let mut lines = split_lines(&read_source(NAME, env, file, stdin)?);
    lines.sort();
    if flags.has('r') {
        lines.reverse();
    }
    write_lines(stdout, lines)?;
    Ok(())
}
