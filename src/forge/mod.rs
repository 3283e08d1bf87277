//! Forge (GitHub) API access
//!
//! Two read operations: the authenticated user, and every open pull request
//! of a repository (page by page, most recently updated first).

mod client;
mod pagination;
mod types;

pub use client::{DEFAULT_API_URL, GitHubClient, GitHubConfig};
pub use types::{PullRequest, User};

use async_trait::async_trait;

use crate::error::WorkflowError;
use crate::git::RepositoryRef;

/// The remote calls the workflow depends on
#[async_trait]
pub trait Forge: Send + Sync {
    /// Fetch the user the credential belongs to
    async fn fetch_current_user(&self, credential: &str) -> Result<User, WorkflowError>;

    /// Fetch all open pull requests of `repository`, following pagination to the end
    async fn fetch_pull_requests(
        &self,
        credential: &str,
        repository: &RepositoryRef,
    ) -> Result<Vec<PullRequest>, WorkflowError>;
}
