//! Working copy inspection and branch checkout using git CLI

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

use super::{RepositoryRef, VersionControl};
use crate::error::WorkflowError;

/// Remote whose HEAD and URL identify the repository
pub const REMOTE_NAME: &str = "origin";

/// Wrapper around a git working copy (uses git CLI)
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    /// Point at a directory that may or may not be a working copy
    pub fn at(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Run git and return trimmed stdout, or a `Vcs` error carrying stderr
    fn git(&self, args: &[&str]) -> Result<String, WorkflowError> {
        debug!("git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| WorkflowError::Vcs(format!("Failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("git {} failed: {}", args.join(" "), stderr.trim());
            return Err(WorkflowError::Vcs(format!(
                "`git {}` exited with {}: {}",
                args.join(" "),
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl VersionControl for Repository {
    fn is_repository(&self) -> bool {
        Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(&self.path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn repository_ref(&self) -> Result<RepositoryRef, WorkflowError> {
        let url = self.git(&["remote", "get-url", REMOTE_NAME])?;

        RepositoryRef::parse(&url).ok_or_else(|| {
            WorkflowError::Vcs(format!(
                "Remote '{}' does not point at a hosted repository: {}",
                REMOTE_NAME, url
            ))
        })
    }

    fn default_branch_name(&self) -> Result<String, WorkflowError> {
        let head = format!("{}/HEAD", REMOTE_NAME);
        let abbrev = self.git(&["rev-parse", "--abbrev-ref", &head])?;

        // origin/main -> main
        let prefix = format!("{}/", REMOTE_NAME);
        let branch = abbrev.strip_prefix(&prefix).unwrap_or(&abbrev).trim();

        // An unset origin/HEAD can come back as the literal ref name
        if branch.is_empty() || branch == "HEAD" || abbrev == head {
            return Err(WorkflowError::Vcs(format!(
                "Remote '{}' has no default branch. Try: git remote set-head {} --auto",
                REMOTE_NAME, REMOTE_NAME
            )));
        }

        debug!("Default branch: {}", branch);
        Ok(branch.to_string())
    }

    fn checkout(&self, branch: &str) -> Result<(), WorkflowError> {
        self.git(&["checkout", branch])?;
        debug!("Checked out {}", branch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
            .args(args)
            .current_dir(dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .unwrap();
        assert!(status.success(), "git {:?} failed", args);
    }

    /// A bare-bones "remote" with one commit on `trunk`, plus a clone of it
    fn cloned_repo() -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let origin = tmp.path().join("origin");
        std::fs::create_dir(&origin).unwrap();
        run(&origin, &["init", "-b", "trunk"]);
        run(&origin, &["commit", "--allow-empty", "-m", "init"]);

        run(tmp.path(), &["clone", "origin", "work"]);
        let work = tmp.path().join("work");
        (tmp, work)
    }

    #[test]
    fn test_is_repository_false_outside_git() {
        let tmp = TempDir::new().unwrap();
        assert!(!Repository::at(tmp.path()).is_repository());
    }

    #[test]
    fn test_is_repository_false_for_missing_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(!Repository::at(&tmp.path().join("gone")).is_repository());
    }

    #[test]
    fn test_is_repository_true_after_init() {
        let tmp = TempDir::new().unwrap();
        run(tmp.path(), &["init"]);
        assert!(Repository::at(tmp.path()).is_repository());
    }

    #[test]
    fn test_default_branch_from_clone() {
        let (_tmp, work) = cloned_repo();
        let repo = Repository::at(&work);
        assert_eq!(repo.default_branch_name().unwrap(), "trunk");
    }

    #[test]
    fn test_default_branch_without_remote_is_vcs_error() {
        let tmp = TempDir::new().unwrap();
        run(tmp.path(), &["init", "-b", "main"]);
        run(tmp.path(), &["commit", "--allow-empty", "-m", "init"]);

        let err = Repository::at(tmp.path()).default_branch_name().unwrap_err();
        assert!(matches!(err, WorkflowError::Vcs(_)));
    }

    #[test]
    fn test_checkout_switches_branch() {
        let (_tmp, work) = cloned_repo();
        run(&work, &["branch", "feature-x"]);

        let repo = Repository::at(&work);
        repo.checkout("feature-x").unwrap();

        assert_eq!(repo.git(&["branch", "--show-current"]).unwrap(), "feature-x");
    }

    #[test]
    fn test_checkout_unknown_branch_is_vcs_error() {
        let (_tmp, work) = cloned_repo();
        let err = Repository::at(&work).checkout("does-not-exist").unwrap_err();
        assert!(matches!(err, WorkflowError::Vcs(msg) if msg.contains("does-not-exist")));
    }

    #[test]
    fn test_repository_ref_from_origin_url() {
        let (_tmp, work) = cloned_repo();
        run(&work, &["remote", "set-url", "origin", "git@github.com:octo/hello.git"]);

        let r = Repository::at(&work).repository_ref().unwrap();
        assert_eq!(r.full_name(), "octo/hello");
    }

    #[test]
    fn test_repository_ref_rejects_local_remote() {
        let (_tmp, work) = cloned_repo();
        // The clone's origin is a filesystem path
        let err = Repository::at(&work).repository_ref().unwrap_err();
        assert!(matches!(err, WorkflowError::Vcs(_)));
    }
}
