//! Filesystem expansion of `*` patterns.

use std::fs;
use std::path::Path;

use log::debug;
use regex::Regex;

use super::pattern::{GlobPattern, RegexArgument};
use crate::environment::resolve_path;

/// Expand a resolved argument against the filesystem.
///
/// Never fails: an argument without wildcards, an unreadable directory or a
/// pattern with no matches all yield the plaintext as a single argument.
/// Matches are sorted by path and never include hidden entries.
pub fn expand(arg: &RegexArgument, cwd: &Path) -> Vec<String> {
    let Some(pattern) = arg.glob_pattern() else {
        return vec![arg.plaintext().to_string()];
    };
    let matches = match_entries(&pattern, cwd);
    if matches.is_empty() {
        debug!("glob {:?} matched nothing, keeping literal", arg.plaintext());
        return vec![arg.plaintext().to_string()];
    }
    debug!("glob {:?} matched {} entries", arg.plaintext(), matches.len());
    matches
}

fn match_entries(pattern: &GlobPattern<'_>, cwd: &Path) -> Vec<String> {
    let Ok(re) = compile_anchored(pattern.segment_regex) else {
        return Vec::new();
    };
    let dir = if pattern.prefix.is_empty() {
        cwd.to_path_buf()
    } else {
        resolve_path(cwd, pattern.prefix)
    };
    let Ok(entries) = fs::read_dir(&dir) else {
        return Vec::new();
    };

    let mut matches: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            if name.starts_with('.') || !re.is_match(&name) {
                return None;
            }
            if pattern.dirs_only && !entry.path().is_dir() {
                return None;
            }
            Some(format!("{}{}", pattern.prefix, name))
        })
        .collect();
    matches.sort();
    matches
}

/// Compile a regex fragment so it must match a whole name.
pub fn compile_anchored(fragment: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{fragment})$"))
}

/// Compile a plain glob such as `*.txt` into an anchored regex.
/// Every character other than `*` is literal.
pub fn glob_regex(glob: &str) -> Result<Regex, regex::Error> {
    let mut arg = RegexArgument::new();
    for c in glob.chars() {
        if c == '*' {
            arg.push_wildcard();
        } else {
            arg.push_literal(c);
        }
    }
    compile_anchored(arg.regex())
}
