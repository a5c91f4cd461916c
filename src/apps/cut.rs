use std::io::{Read, Write};

use super::io::{read_source, split_byte_lines};
use crate::environment::Environment;
use crate::error::{AppError, ShellError};

const NAME: &str = "cut";

/// An inclusive, 1-based byte range. `end` of `None` runs to end of line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ByteRange {
    start: usize,
    end: Option<usize>,
}

impl ByteRange {
    fn contains(&self, position: usize) -> bool {
        position >= self.start && self.end.is_none_or(|end| position <= end)
    }
}

/// `cut -b LIST [FILE]`: print the selected bytes of every line.
///
/// Selected bytes keep their order in the line regardless of the order or
/// overlap of ranges in `LIST`; ranges past the end of a line are clamped.
pub fn run(
    args: &[String],
    env: &Environment,
    stdin: &mut dyn Read,
    stdout: &mut dyn Write,
) -> Result<(), ShellError> {
    let (list, file) = match args {
        [flag, list] if flag == "-b" => (list, None),
        [flag, list, file] if flag == "-b" => (list, Some(file.as_str())),
        _ => return Err(AppError::new(NAME, "usage: cut -b LIST [FILE]").into()),
    };
    let ranges = parse_list(list)?;
    let data = read_source(NAME, env, file, stdin)?;
    for line in split_byte_lines(&data) {
        let selected: Vec<u8> = line
            .iter()
            .enumerate()
            .filter(|(i, _)| ranges.iter().any(|r| r.contains(i + 1)))
            .map(|(_, &b)| b)
            .collect();
        stdout.write_all(&selected)?;
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

fn parse_list(list: &str) -> Result<Vec<ByteRange>, AppError> {
    let invalid = || AppError::new(NAME, format!("invalid byte list: {list}"));
    let position = |s: &str| -> Result<usize, AppError> {
        match s.parse::<usize>() {
            Ok(0) => Err(AppError::new(NAME, "byte positions are numbered from 1")),
            Ok(n) => Ok(n),
            Err(_) => Err(invalid()),
        }
    };

    let mut ranges = Vec::new();
    for part in list.split(',') {
        let range = match part.split_once('-') {
            None => {
                let n = position(part)?;
                ByteRange { start: n, end: Some(n) }
            }
            Some(("", "")) => return Err(invalid()),
            Some(("", end)) => ByteRange { start: 1, end: Some(position(end)?) },
            Some((start, "")) => ByteRange { start: position(start)?, end: None },
            Some((start, end)) => {
                let range = ByteRange { start: position(start)?, end: Some(position(end)?) };
                if range.end < Some(range.start) {
                    return Err(AppError::new(NAME, format!("invalid decreasing range: {part}")));
                }
                range
            }
        };
        ranges.push(range);
    }
    Ok(ranges)
}
