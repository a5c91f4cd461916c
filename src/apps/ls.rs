use std::fs;
use std::io::Write;
use std::path::Path;

use crate::environment::Environment;
use crate::error::{AppError, ShellError};

const NAME: &str = "ls";

/// List non-hidden entries, sorted, tab-separated on one line.
///
/// Without arguments the working directory is listed. With arguments each
/// directory is introduced by an `<arg>:` header (its listing follows on the
/// next line when non-empty) and each file argument prints its own name.
pub fn run(args: &[String], env: &Environment, stdout: &mut dyn Write) -> Result<(), ShellError> {
    if args.is_empty() {
        let entries = list(env.cwd(), ".")?;
        write_listing(stdout, &entries)?;
        return Ok(());
    }
    for arg in args {
        let path = env.resolve(arg);
        if path.is_dir() {
            let entries = list(&path, arg)?;
            writeln!(stdout, "{arg}:")?;
            write_listing(stdout, &entries)?;
        } else if path.exists() {
            writeln!(stdout, "{arg}")?;
        } else {
            return Err(AppError::new(NAME, format!("{arg}: No such file or directory")).into());
        }
    }
    Ok(())
}

fn list(dir: &Path, label: &str) -> Result<Vec<String>, AppError> {
    let entries = fs::read_dir(dir).map_err(|e| AppError::io(NAME, label, &e))?;
    let mut names: Vec<String> = entries
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.starts_with('.'))
        .collect();
    names.sort();
    Ok(names)
}

fn write_listing(stdout: &mut dyn Write, entries: &[String]) -> std::io::Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    writeln!(stdout, "{}", entries.join("\t"))
}
