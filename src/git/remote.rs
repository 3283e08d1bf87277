//! Repository reference parsing from remote URLs

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Matches https, ssh and scp-style remote URLs:
/// `https://github.com/owner/name.git`, `ssh://git@github.com:22/owner/name`,
/// `git@github.com:owner/name.git`
static REMOTE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:https?|ssh|git)://)?(?:[^@/]+@)?(?P<host>[^/:]+)(?::\d+)?[:/](?P<owner>[^/]+)/(?P<name>[^/]+?)(?:\.git)?/?$",
    )
    .expect("remote URL pattern is valid")
});

/// The forge repository a working copy points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    /// Host of the remote (e.g., "github.com")
    pub host: String,
    /// Owning user or organization
    pub owner: String,
    /// Repository name without the `.git` suffix
    pub name: String,
}

impl RepositoryRef {
    /// Parse a remote URL, returning `None` for anything that isn't `host/owner/name` shaped
    pub fn parse(url: &str) -> Option<Self> {
        let caps = REMOTE_URL.captures(url.trim())?;

        Some(Self {
            host: caps["host"].to_string(),
            owner: caps["owner"].to_string(),
            name: caps["name"].to_string(),
        })
    }

    /// `owner/name`, the form used in API paths
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.owner, self.name)
    }
}
