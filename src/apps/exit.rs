use crate::error::AppError;

const NAME: &str = "exit";

/// Validate the arguments and return the status the shell should exit with.
pub fn run(args: &[String]) -> Result<i32, AppError> {
    if !args.is_empty() {
        return Err(AppError::new(NAME, "too many arguments"));
    }
    Ok(0)
}
