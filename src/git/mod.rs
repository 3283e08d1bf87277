//! Git operations module using the git CLI
//!
//! Provides functionality for:
//! - Detecting a working copy
//! - Resolving the remote's default branch and repository reference
//! - Checking out a branch

mod remote;
mod repository;

pub use remote::*;
pub use repository::*;

use crate::error::WorkflowError;

/// The version-control operations the workflow depends on
pub trait VersionControl: Send + Sync {
    /// Whether the directory is inside a working copy. Never fails.
    fn is_repository(&self) -> bool;

    /// The forge repository the `origin` remote points at
    fn repository_ref(&self) -> Result<RepositoryRef, WorkflowError>;

    /// The branch `origin/HEAD` points at, without the remote prefix
    fn default_branch_name(&self) -> Result<String, WorkflowError>;

    /// Switch the working copy to `branch`
    fn checkout(&self, branch: &str) -> Result<(), WorkflowError>;
}
