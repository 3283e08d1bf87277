//! GitHub REST client for the current user and their repository's pull requests

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, LINK, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use tracing::{debug, info};

use super::pagination::next_page;
use super::{Forge, PullRequest, User};
use crate::error::WorkflowError;
use crate::git::RepositoryRef;

/// Public GitHub API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Pull requests requested per page (the API maximum)
pub const PAGE_SIZE: u32 = 100;

const API_ACCEPT: &str = "application/vnd.github.v3+json";

/// Configuration for the GitHub client
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Base URL of the REST API, always ending in `/`
    pub base_url: Url,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl GitHubConfig {
    /// Creates a config for the given API root with no timeout
    pub fn new(mut base_url: Url) -> Self {
        // Url::join would otherwise drop the last path segment (e.g., `/api/v3`)
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            base_url,
            timeout: None,
        }
    }

    /// Sets a per-request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Forge client backed by the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    /// Build a client from the given configuration
    pub fn new(config: GitHubConfig) -> Result<Self, WorkflowError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| WorkflowError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, WorkflowError> {
        self.base_url
            .join(path)
            .map_err(|e| WorkflowError::Transport(format!("Invalid API URL for {}: {}", path, e)))
    }

    fn get(&self, url: Url, credential: &str) -> RequestBuilder {
        self.client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", credential))
            .header(ACCEPT, API_ACCEPT)
            .header(USER_AGENT, concat!("switch-branch/", env!("CARGO_PKG_VERSION")))
    }

    /// Send a request, classifying 401 as `Auth` and every other failure as `Transport`
    async fn send(&self, request: RequestBuilder) -> Result<Response, WorkflowError> {
        let response = request
            .send()
            .await
            .map_err(|e| WorkflowError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(WorkflowError::Auth),
            status if status.is_success() => Ok(response),
            status => {
                let text = response.text().await.unwrap_or_default();
                Err(WorkflowError::Transport(format!("HTTP {}: {}", status, text.trim())))
            }
        }
    }
}

#[async_trait]
impl Forge for GitHubClient {
    async fn fetch_current_user(&self, credential: &str) -> Result<User, WorkflowError> {
        let url = self.endpoint("user")?;
        let response = self.send(self.get(url, credential)).await?;

        let user: User = response
            .json()
            .await
            .map_err(|e| WorkflowError::Transport(format!("Malformed user response: {}", e)))?;

        debug!("Authenticated as {}", user.login);
        Ok(user)
    }

    async fn fetch_pull_requests(
        &self,
        credential: &str,
        repository: &RepositoryRef,
    ) -> Result<Vec<PullRequest>, WorkflowError> {
        let listing = self.endpoint(&format!("repos/{}/pulls", repository.full_name()))?;
        let mut pull_requests = Vec::new();
        let mut page: u32 = 1;

        loop {
            let mut url = listing.clone();
            url.query_pairs_mut()
                .append_pair("state", "open")
                .append_pair("sort", "updated")
                .append_pair("direction", "desc")
                .append_pair("per_page", &PAGE_SIZE.to_string())
                .append_pair("page", &page.to_string());

            let response = self.send(self.get(url, credential)).await?;

            let next = response
                .headers()
                .get(LINK)
                .and_then(|value| value.to_str().ok())
                .and_then(next_page);

            let batch: Vec<PullRequest> = response.json().await.map_err(|e| {
                WorkflowError::Transport(format!("Malformed pull request page {}: {}", page, e))
            })?;

            debug!("Page {} of {}: {} pull requests", page, repository, batch.len());
            pull_requests.extend(batch);

            match next {
                Some(next) => page = next,
                None => break,
            }
        }

        info!("Fetched {} open pull requests for {}", pull_requests.len(), repository);
        Ok(pull_requests)
    }
}
