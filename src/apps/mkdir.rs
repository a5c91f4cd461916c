use std::fs;

use super::io::parse_flags;
use crate::environment::Environment;
use crate::error::{AppError, ShellError};

const NAME: &str = "mkdir";

/// `mkdir [-p] DIR...`. With `-p` missing parents are created and existing
/// directories are not an error.
pub fn run(args: &[String], env: &Environment) -> Result<(), ShellError> {
    let (flags, dirs) = parse_flags(NAME, args, "p")?;
    if dirs.is_empty() {
        return Err(AppError::new(NAME, "missing operand").into());
    }
    for dir in dirs {
        let path = env.resolve(dir);
        let created = if flags.has('p') {
            fs::create_dir_all(&path)
        } else {
            fs::create_dir(&path)
        };
        created.map_err(|e| AppError::io(NAME, dir, &e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let env = Environment::new(dir.path());
        run(&strings(&["a", "b"]), &env).unwrap();
        assert!(dir.path().join("a").is_dir());
        assert!(dir.path().join("b").is_dir());
    }

    #[test]
    fn parents_need_flag() {
        let dir = tempfile::tempdir().unwrap();
        let env = Environment::new(dir.path());
        let err = run(&strings(&["x/y"]), &env).unwrap_err();
        assert_eq!(err.to_string(), "mkdir: x/y: No such file or directory");
        run(&strings(&["-p", "x/y"]), &env).unwrap();
        assert!(dir.path().join("x/y").is_dir());
        run(&strings(&["-p", "x/y"]), &env).unwrap();
    }

    #[test]
    fn existing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let env = Environment::new(dir.path());
        run(&strings(&["a"]), &env).unwrap();
        let err = run(&strings(&["a"]), &env).unwrap_err();
        assert_eq!(err.to_string(), "mkdir: a: File exists");
    }

    #[test]
    fn no_operand() {
        let env = Environment::new("/");
        assert!(run(&[], &env).is_err());
    }
}
