//! GitHub API payloads

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// The authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub login: String,
}

/// An open pull request, flattened from the API shape
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "PullRequestPayload")]
pub struct PullRequest {
    pub id: u64,
    pub title: String,
    /// Login of the pull request author
    pub author_login: String,
    /// Name of the branch the pull request merges from
    pub head_ref: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct PullRequestPayload {
    id: u64,
    title: String,
    user: User,
    head: HeadPayload,
    updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct HeadPayload {
    #[serde(rename = "ref")]
    ref_name: String,
}

impl From<PullRequestPayload> for PullRequest {
    fn from(payload: PullRequestPayload) -> Self {
        Self {
            id: payload.id,
            title: payload.title,
            author_login: payload.user.login,
            head_ref: payload.head.ref_name,
            updated_at: payload.updated_at,
        }
    }
}
