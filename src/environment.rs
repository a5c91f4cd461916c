use std::path::{Path, PathBuf};

/// Working-directory state of one shell. Only `cd` changes it.
#[derive(Debug, Clone)]
pub struct Environment {
    cwd: PathBuf,
}

impl Environment {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    /// Start in the process's current directory (`/` if it is unavailable).
    pub fn from_process() -> Self {
        Self::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/")))
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn set_cwd(&mut self, cwd: PathBuf) {
        self.cwd = cwd;
    }

    /// Resolve a user-supplied path against the working directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        resolve_path(&self.cwd, path)
    }
}

/// Resolve `path` relative to `cwd`, expanding a leading `~`.
pub fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    let expanded = shellexpand::tilde(path);
    let path = Path::new(expanded.as_ref());
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
