use std::io::Write;

use crate::error::ShellError;

/// Print the arguments separated by single spaces, then a newline.
pub fn run(args: &[String], stdout: &mut dyn Write) -> Result<(), ShellError> {
    writeln!(stdout, "{}", args.join(" "))?;
    Ok(())
}
