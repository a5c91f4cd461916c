use std::io::{Read, Write};

use regex::Regex;

use super::io::{read_path, read_stdin, split_lines};
use crate::environment::Environment;
use crate::error::{AppError, ShellError};

const NAME: &str = "grep";

/// `grep PATTERN [FILE]...`: print lines matching a regular expression.
/// With several files each line is prefixed by `file:`.
pub fn run(
    args: &[String],
    env: &Environment,
    stdin: &mut dyn Read,
    stdout: &mut dyn Write,
) -> Result<(), ShellError> {
    let Some((pattern, files)) = args.split_first() else {
        return Err(AppError::new(NAME, "missing pattern").into());
    };
    let re = Regex::new(pattern)
        .map_err(|_| AppError::new(NAME, format!("invalid pattern: {pattern}")))?;

    if files.is_empty() {
        let data = read_stdin(NAME, stdin)?;
        return write_matches(&re, &data, None, stdout);
    }
    let prefix = files.len() > 1;
    for file in files {
        let data = read_path(NAME, env, file)?;
        write_matches(&re, &data, prefix.then_some(file.as_str()), stdout)?;
    }
    Ok(())
}

fn write_matches(
    re: &Regex,
    data: &[u8],
    prefix: Option<&str>,
    stdout: &mut dyn Write,
) -> Result<(), ShellError> {
    for line in split_lines(data).iter().filter(|line| re.is_match(line)) {
        match prefix {
            Some(file) => writeln!(stdout, "{file}:{line}")?,
            None => writeln!(stdout, "{line}")?,
        }
    }
    Ok(())
}
