use std::fs::{File, OpenOptions};
use std::io::{Read, Write};

use super::io::{parse_flags, read_stdin};
use crate::environment::Environment;
use crate::error::{AppError, ShellError};

const NAME: &str = "tee";

/// `tee [-a] FILE...`: copy stdin to stdout and to every file.
/// Files are truncated, or appended to with `-a`. All files are opened
/// before anything is written.
pub fn run(
    args: &[String],
    env: &Environment,
    stdin: &mut dyn Read,
    stdout: &mut dyn Write,
) -> Result<(), ShellError> {
    let (flags, files) = parse_flags(NAME, args, "a")?;
    let append = flags.has('a');

    let mut outputs = files
        .iter()
        .map(|name| open(env, name, append))
        .collect::<Result<Vec<File>, AppError>>()?;

    let data = read_stdin(NAME, stdin)?;
    stdout.write_all(&data)?;
    for (file, name) in outputs.iter_mut().zip(files) {
        file.write_all(&data)
            .map_err(|e| AppError::io(NAME, name, &e))?;
    }
    Ok(())
}

fn open(env: &Environment, name: &str, append: bool) -> Result<File, AppError> {
    let path = env.resolve(name);
    if path.is_dir() {
        return Err(AppError::new(NAME, format!("{name}: Is a directory")));
    }
    let mut options = OpenOptions::new();
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    options
        .create(true)
        .open(&path)
        .map_err(|e| AppError::io(NAME, name, &e))
}
