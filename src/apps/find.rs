use std::fs;
use std::io::Write;
use std::path::Path;

use regex::Regex;

use crate::environment::Environment;
use crate::error::{AppError, ShellError};
use crate::resolve::glob::glob_regex;

const NAME: &str = "find";

/// `find [PATH] [-name PATTERN]`: print every path below `PATH` (default
/// `.`) whose name matches the `*` pattern, in sorted depth-first order.
/// Paths are printed with `PATH` as written by the user as their prefix.
pub fn run(args: &[String], env: &Environment, stdout: &mut dyn Write) -> Result<(), ShellError> {
    let (root, pattern) = match args {
        [] => (".", None),
        [flag, pattern] if flag == "-name" => (".", Some(pattern)),
        [root] => (root.as_str(), None),
        [root, flag, pattern] if flag == "-name" => (root.as_str(), Some(pattern)),
        _ => return Err(AppError::new(NAME, "usage: find [PATH] [-name PATTERN]").into()),
    };
    let matcher = pattern
        .map(|p| glob_regex(p).map_err(|_| AppError::new(NAME, format!("invalid pattern: {p}"))))
        .transpose()?;

    let start = env.resolve(root);
    if !start.is_dir() {
        return Err(AppError::new(NAME, format!("{root}: No such directory")).into());
    }
    let mut found = Vec::new();
    walk(&start, root.trim_end_matches('/'), matcher.as_ref(), &mut found)?;
    for path in found {
        writeln!(stdout, "{path}")?;
    }
    Ok(())
}

fn walk(
    dir: &Path,
    display: &str,
    matcher: Option<&Regex>,
    found: &mut Vec<String>,
) -> Result<(), AppError> {
    let entries = fs::read_dir(dir).map_err(|e| AppError::io(NAME, display, &e))?;
    let mut entries: Vec<_> = entries.flatten().collect();
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        let shown = format!("{display}/{name}");
        if matcher.is_none_or(|re| re.is_match(&name)) {
            found.push(shown.clone());
        }
        // file_type does not follow symlinks, so links to directories are not entered.
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            walk(&entry.path(), &shown, matcher, found)?;
        }
    }
    Ok(())
}
