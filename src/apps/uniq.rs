use std::io::{Read, Write};

use super::io::{parse_flags, read_source, split_lines, write_lines};
use crate::environment::Environment;
use crate::error::{AppError, ShellError};

const NAME: &str = "uniq";

/// `uniq [-i] [FILE]`: drop lines equal to the line before them.
/// Only adjacent duplicates collapse; `-i` compares case-insensitively and
/// keeps the first spelling.
pub fn run(
    args: &[String],
    env: &Environment,
    stdin: &mut dyn Read,
    stdout: &mut dyn Write,
) -> Result<(), ShellError> {
    let (flags, files) = parse_flags(NAME, args, "i")?;
    let file = match files {
        [] => None,
        [file] => Some(file.as_str()),
        _ => return Err(AppError::new(NAME, "too many arguments").into()),
    };
    let ignore_case = flags.has('i');
    let mut lines = split_lines(&read_source(NAME, env, file, stdin)?);
    lines.dedup_by(|next, prev| {
        if ignore_case {
            next.to_lowercase() == prev.to_lowercase()
        } else {
            next == prev
        }
    });
    write_lines(stdout, lines)?;
    Ok(())
}
