//! Applying generated text: `git commit` and `git checkout -b`.
//!
//! Operations shell out to the system `git` binary so hooks, signing and the
//! user's identity come from their existing git config.

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::Branch;
use tracing::debug;

use crate::error::ApplyError;

/// Check that `git` is available on PATH.
pub fn check_git_installed() -> Result<(), ApplyError> {
    which::which("git")
        .map(|_| ())
        .map_err(|_| ApplyError::GitNotInstalled)
}

/// Runs git commands inside a working directory.
#[derive(Debug, Clone)]
pub struct GitExecutor {
    workdir: PathBuf,
}

impl GitExecutor {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Commit the staged changes with `message`.
    ///
    /// The message is passed as a single argument, so quotes and shell
    /// metacharacters need no escaping.
    pub fn commit(&self, message: &str) -> Result<(), ApplyError> {
        self.run_git(&["commit", "-m", message], "commit")
    }

    /// Create `name` from the current HEAD and switch to it.
    pub fn create_branch(&self, name: &str) -> Result<(), ApplyError> {
        if !Branch::name_is_valid(name).unwrap_or(false) {
            return Err(ApplyError::InvalidBranchName(name.to_string()));
        }
        self.run_git(&["checkout", "-b", name], "create branch")
    }

    /// Run a git command and return success or a descriptive error.
    fn run_git(&self, args: &[&str], operation: &str) -> Result<(), ApplyError> {
        debug!("Running git {:?} in {}", args, self.workdir.display());

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| ApplyError::GitFailed(format!("Failed to run git {}: {}", operation, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            // `git commit` reports "nothing to commit" on stdout
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(ApplyError::GitFailed(format!(
                "git {} failed: {}",
                operation, detail
            )));
        }

        Ok(())
    }
}
