use std::io::{Read, Write};

use super::head::parse_count_args;
use super::io::{read_source, split_lines, write_lines};
use crate::environment::Environment;
use crate::error::ShellError;

const NAME: &str = "tail";

pub fn run(
    args: &[String],
    env: &Environment,
    stdin: &mut dyn Read,
    stdout: &mut dyn Write,
) -> Result<(), ShellError> {
    let (count, file) = parse_count_args(NAME, args)?;
    let data = read_source(NAME, env, file, stdin)?;
    let lines = split_lines(&data);
    let skip = lines.len().saturating_sub(count);
    write_lines(stdout, &lines[skip..])?;
    Ok(())
}
