use std::io::Write;

use crate::environment::Environment;
use crate::error::{AppError, ShellError};

const NAME: &str = "pwd";

pub fn run(args: &[String], env: &Environment, stdout: &mut dyn Write) -> Result<(), ShellError> {
    if !args.is_empty() {
        return Err(AppError::new(NAME, "too many arguments").into());
    }
    writeln!(stdout, "{}", env.cwd().display())?;
    Ok(())
}
