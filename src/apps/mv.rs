use std::fs;
use std::path::Path;

use crate::environment::Environment;
use crate::error::{AppError, ShellError};

const NAME: &str = "mv";

/// `mv SRC DEST` renames; `mv SRC... DIR` moves every source into an
/// existing directory, keeping its file name. An existing file at the
/// destination is replaced.
pub fn run(args: &[String], env: &Environment) -> Result<(), ShellError> {
    let Some((target, sources)) = args.split_last() else {
        return Err(AppError::new(NAME, "missing operand").into());
    };
    if sources.is_empty() {
        return Err(AppError::new(NAME, format!("missing destination after '{target}'")).into());
    }

    let target_path = env.resolve(target);
    if target_path.is_dir() {
        for source in sources {
            let from = existing(env, source)?;
            let Some(file_name) = Path::new(source.as_str()).file_name() else {
                return Err(AppError::new(NAME, format!("{source}: invalid source")).into());
            };
            fs::rename(&from, target_path.join(file_name))
                .map_err(|e| AppError::io(NAME, source, &e))?;
        }
        return Ok(());
    }

    match sources {
        [source] => {
            let from = existing(env, source)?;
            fs::rename(&from, &target_path).map_err(|e| AppError::io(NAME, target, &e))?;
            Ok(())
        }
        _ => Err(AppError::new(NAME, format!("{target}: Not a directory")).into()),
    }
}

fn existing(env: &Environment, source: &str) -> Result<std::path::PathBuf, AppError> {
    let path = env.resolve(source);
    if fs::symlink_metadata(&path).is_err() {
        return Err(AppError::new(NAME, format!("{source}: No such file or directory")));
    }
    Ok(path)
}
