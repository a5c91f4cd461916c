use crate::environment::Environment;
use crate::error::{AppError, ShellError};

const NAME: &str = "cd";

/// Change the tracked working directory to an existing directory.
/// The new directory is stored canonicalized, so `..` never accumulates.
pub fn run(args: &[String], env: &mut Environment) -> Result<(), ShellError> {
    let target = match args {
        [] => return Err(AppError::new(NAME, "missing argument").into()),
        [target] => target,
        _ => return Err(AppError::new(NAME, "too many arguments").into()),
    };
    let path = env.resolve(target);
    if !path.is_dir() {
        let reason = if path.exists() {
            "Not a directory"
        } else {
            "No such file or directory"
        };
        return Err(AppError::new(NAME, format!("{target}: {reason}")).into());
    }
    let canonical = path
        .canonicalize()
        .map_err(|e| AppError::io(NAME, target, &e))?;
    env.set_cwd(canonical);
    Ok(())
}
