use std::collections::VecDeque;
use std::io::{Read, Write};

use super::io::{STDIN_ARG, read_path, read_stdin, split_lines};
use crate::environment::Environment;
use crate::error::{AppError, ShellError};

const NAME: &str = "paste";

/// `paste [-d DELIMS] [FILE|-]...`: join corresponding lines of each input.
///
/// Delimiters are used in turn and wrap around; the default is a tab. Every
/// `-` operand draws the next line from one shared standard input, so
/// `paste - -` joins stdin lines in pairs.
pub fn run(
    args: &[String],
    env: &Environment,
    stdin: &mut dyn Read,
    stdout: &mut dyn Write,
) -> Result<(), ShellError> {
    let (delimiters, operands) = parse_args(args)?;
    let default_operand = [STDIN_ARG.to_string()];
    let operands = if operands.is_empty() {
        &default_operand[..]
    } else {
        operands
    };

    let mut shared_stdin: Option<VecDeque<String>> = None;
    let mut sources = Vec::with_capacity(operands.len());
    for operand in operands {
        if operand == STDIN_ARG {
            if shared_stdin.is_none() {
                shared_stdin = Some(split_lines(&read_stdin(NAME, stdin)?).into());
            }
            sources.push(Source::Stdin);
        } else {
            let lines = split_lines(&read_path(NAME, env, operand)?);
            sources.push(Source::File(lines.into()));
        }
    }
    let mut stdin_lines = shared_stdin.unwrap_or_default();

    loop {
        let mut row = String::new();
        let mut any = false;
        for (i, source) in sources.iter_mut().enumerate() {
            if i > 0 && !delimiters.is_empty() {
                row.push(delimiters[(i - 1) % delimiters.len()]);
            }
            let next = match source {
                Source::Stdin => stdin_lines.pop_front(),
                Source::File(lines) => lines.pop_front(),
            };
            if let Some(line) = next {
                row.push_str(&line);
                any = true;
            }
        }
        if !any {
            break;
        }
        writeln!(stdout, "{row}")?;
    }
    Ok(())
}

enum Source {
    Stdin,
    File(VecDeque<String>),
}

fn parse_args(args: &[String]) -> Result<(Vec<char>, &[String]), AppError> {
    match args {
        [flag, list, rest @ ..] if flag == "-d" => Ok((parse_delimiters(list), rest)),
        [flag, ..] if flag == "-d" => Err(AppError::new(NAME, "option requires an argument -- 'd'")),
        [flag, rest @ ..] if flag.starts_with("-d") => Ok((parse_delimiters(&flag[2..]), rest)),
        _ => Ok((vec!['\t'], args)),
    }
}

/// Expand the escapes `\t`, `\n`, `\\` and `\0` (no delimiter).
fn parse_delimiters(list: &str) -> Vec<char> {
    let mut out = Vec::new();
    let mut chars = list.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('0') => {}
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
