use std::fs;
use std::io::{self, Read, Write};

use crate::environment::Environment;
use crate::error::AppError;

/// Name that stands for standard input in file-list arguments.
pub const STDIN_ARG: &str = "-";

/// Read a whole file relative to the working directory.
pub fn read_path(app: &'static str, env: &Environment, name: &str) -> Result<Vec<u8>, AppError> {
    let path = env.resolve(name);
    if path.is_dir() {
        return Err(AppError::new(app, format!("{name}: Is a directory")));
    }
    fs::read(&path).map_err(|e| AppError::io(app, name, &e))
}

pub fn read_stdin(app: &'static str, stdin: &mut dyn Read) -> Result<Vec<u8>, AppError> {
    let mut buf = Vec::new();
    stdin
        .read_to_end(&mut buf)
        .map_err(|e| AppError::io(app, "stdin", &e))?;
    Ok(buf)
}

/// Read the named file, or stdin when no name (or `-`) is given.
pub fn read_source(
    app: &'static str,
    env: &Environment,
    name: Option<&str>,
    stdin: &mut dyn Read,
) -> Result<Vec<u8>, AppError> {
    match name {
        None | Some(STDIN_ARG) => read_stdin(app, stdin),
        Some(name) => read_path(app, env, name),
    }
}

/// Single-letter options collected from leading `-xyz` arguments.
#[derive(Debug, Default)]
pub struct Flags(Vec<char>);

impl Flags {
    pub fn has(&self, flag: char) -> bool {
        self.0.contains(&flag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Consume leading option arguments. Letters may be combined (`-lw`); `-`
/// alone is an operand and `--` ends option parsing. Letters outside
/// `allowed` are rejected.
pub fn parse_flags<'a>(
    app: &'static str,
    args: &'a [String],
    allowed: &str,
) -> Result<(Flags, &'a [String]), AppError> {
    let mut flags = Flags::default();
    let mut rest = args;
    while let Some((arg, tail)) = rest.split_first() {
        if arg == "--" {
            rest = tail;
            break;
        }
        let Some(letters) = arg.strip_prefix('-').filter(|l| !l.is_empty()) else {
            break;
        };
        for c in letters.chars() {
            if !allowed.contains(c) {
                return Err(AppError::new(app, format!("invalid option -- '{c}'")));
            }
            flags.0.push(c);
        }
        rest = tail;
    }
    Ok((flags, rest))
}

/// Split text into lines, dropping terminators. A final line without a
/// newline still counts as a line.
pub fn split_lines(data: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(data)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Byte-level counterpart of [`split_lines`].
pub fn split_byte_lines(data: &[u8]) -> Vec<&[u8]> {
    if data.is_empty() {
        return Vec::new();
    }
    let data = data.strip_suffix(b"\n").unwrap_or(data);
    data.split(|&b| b == b'\n').collect()
}

/// Write each line followed by a newline.
pub fn write_lines<I, S>(out: &mut dyn Write, lines: I) -> io::Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        out.write_all(line.as_ref().as_bytes())?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
