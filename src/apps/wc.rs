use std::io::{Read, Write};

use super::io::{STDIN_ARG, parse_flags, read_path, read_stdin};
use crate::environment::Environment;
use crate::error::ShellError;

const NAME: &str = "wc";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Counts {
    lines: usize,
    words: usize,
    chars: usize,
    bytes: usize,
}

impl Counts {
    fn of(data: &[u8]) -> Self {
        let text = String::from_utf8_lossy(data);
        Self {
            lines: data.iter().filter(|&&b| b == b'\n').count(),
            words: text.split_whitespace().count(),
            chars: text.chars().count(),
            bytes: data.len(),
        }
    }

    fn add(&mut self, other: Counts) {
        self.lines += other.lines;
        self.words += other.words;
        self.chars += other.chars;
        self.bytes += other.bytes;
    }
}

/// Which columns to print, in line/word/char/byte order.
struct Columns {
    lines: bool,
    words: bool,
    chars: bool,
    bytes: bool,
}

impl Columns {
    fn render(&self, counts: Counts, label: Option<&str>) -> String {
        let mut fields = Vec::with_capacity(5);
        if self.lines {
            fields.push(counts.lines.to_string());
        }
        if self.words {
            fields.push(counts.words.to_string());
        }
        if self.chars {
            fields.push(counts.chars.to_string());
        }
        if self.bytes {
            fields.push(counts.bytes.to_string());
        }
        if let Some(label) = label {
            fields.push(label.to_string());
        }
        fields.join("\t")
    }
}

/// `wc [-l] [-w] [-m] [-c] [FILE|-]...`: count lines, words, characters and
/// bytes. Without options lines, words and characters are printed.
pub fn run(
    args: &[String],
    env: &Environment,
    stdin: &mut dyn Read,
    stdout: &mut dyn Write,
) -> Result<(), ShellError> {
    let (flags, files) = parse_flags(NAME, args, "lwmc")?;
    let columns = if flags.is_empty() {
        Columns { lines: true, words: true, chars: true, bytes: false }
    } else {
        Columns {
            lines: flags.has('l'),
            words: flags.has('w'),
            chars: flags.has('m'),
            bytes: flags.has('c'),
        }
    };

    if files.is_empty() {
        let counts = Counts::of(&read_stdin(NAME, stdin)?);
        writeln!(stdout, "{}", columns.render(counts, None))?;
        return Ok(());
    }

    let mut total = Counts::default();
    for file in files {
        let data = if file == STDIN_ARG {
            read_stdin(NAME, stdin)?
        } else {
            read_path(NAME, env, file)?
        };
        let counts = Counts::of(&data);
        total.add(counts);
        writeln!(stdout, "{}", columns.render(counts, Some(file.as_str())))?;
    }
    if files.len() > 1 {
        writeln!(stdout, "{}", columns.render(total, Some("total")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn wc(args: &[&str], dir: &std::path::Path, input: &str) -> Result<String, ShellError> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        run(&args, &Environment::new(dir), &mut input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn default_columns_from_stdin() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(wc(&[], dir.path(), "hello world\nbye\n").unwrap(), "2\t3\t16\n");
    }

    #[test]
    fn characters_are_not_bytes() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(wc(&["-m", "-c"], dir.path(), "héllo").unwrap(), "5\t6\n");
    }

    #[test]
    fn selected_columns_with_total() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a"), "1\n2\n").unwrap();
        fs::write(dir.path().join("b"), "x y\n").unwrap();
        assert_eq!(
            wc(&["-lw", "a", "b"], dir.path(), "").unwrap(),
            "2\t2\ta\n1\t2\tb\n3\t4\ttotal\n"
        );
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = wc(&["nope"], dir.path(), "").unwrap_err();
        assert_eq!(err.to_string(), "wc: nope: No such file or directory");
    }
}
