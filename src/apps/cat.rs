use std::io::{Read, Write};

use super::io::{STDIN_ARG, read_path, read_stdin, split_byte_lines};
use crate::environment::Environment;
use crate::error::ShellError;

const NAME: &str = "cat";

/// Concatenate files in order. Standard input (read when there are no
/// arguments, or at each `-`) is copied line by line, so every stdin line is
/// newline-terminated; file contents are copied byte for byte. Line bytes are
/// never decoded, so `\r` and non-UTF-8 input pass through unchanged.
pub fn run(
    args: &[String],
    env: &Environment,
    stdin: &mut dyn Read,
    stdout: &mut dyn Write,
) -> Result<(), ShellError> {
    if args.is_empty() {
        return copy_stdin(stdin, stdout);
    }
    for arg in args {
        if arg == STDIN_ARG {
            copy_stdin(stdin, stdout)?;
        } else {
            stdout.write_all(&read_path(NAME, env, arg)?)?;
        }
    }
    Ok(())
}

fn copy_stdin(stdin: &mut dyn Read, stdout: &mut dyn Write) -> Result<(), ShellError> {
    let data = read_stdin(NAME, stdin)?;
    for line in split_byte_lines(&data) {
        stdout.write_all(line)?;
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn run_cat(args: &[&str], dir: &std::path::Path, input: &str) -> Result<String, ShellError> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let env = Environment::new(dir);
        let mut out = Vec::new();
        run(&args, &env, &mut input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn stdin_between_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b\n").unwrap();
        let out = run_cat(&["a.txt", "-", "b.txt"], dir.path(), "hello world\nhello mars").unwrap();
        assert_eq!(out, "ahello world\nhello mars\nb\n");
    }

    #[test]
    fn no_args_reads_stdin() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(run_cat(&[], dir.path(), "x\ny\n").unwrap(), "x\ny\n");
    }

    #[test]
    fn stdin_bytes_pass_through() {
        let env = Environment::new("/");
        let mut out = Vec::new();
        run(&[], &env, &mut &b"caf\xe9\r\nline2"[..], &mut out).unwrap();
        assert_eq!(out, b"caf\xe9\r\nline2\n");
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_cat(&["nope.txt"], dir.path(), "").unwrap_err();
        assert_eq!(err.to_string(), "cat: nope.txt: No such file or directory");
    }
}
