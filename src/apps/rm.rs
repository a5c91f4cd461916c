use std::fs;

use super::io::parse_flags;
use crate::environment::Environment;
use crate::error::{AppError, ShellError};

const NAME: &str = "rm";

/// `rm [-r] PATH...`. Directories are only removed with `-r`, recursively.
/// Operands are processed in order; the first failure stops the command.
pub fn run(args: &[String], env: &Environment) -> Result<(), ShellError> {
    let (flags, paths) = parse_flags(NAME, args, "r")?;
    if paths.is_empty() {
        return Err(AppError::new(NAME, "missing operand").into());
    }
    for name in paths {
        let path = env.resolve(name);
        let meta = fs::symlink_metadata(&path).map_err(|e| AppError::io(NAME, name, &e))?;
        let removed = if meta.is_dir() {
            if !flags.has('r') {
                return Err(AppError::new(NAME, format!("{name}: Is a directory")).into());
            }
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(|e| AppError::io(NAME, name, &e))?;
    }
    Ok(())
}
