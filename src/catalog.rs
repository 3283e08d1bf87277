//! The list of branches offered for checkout

use chrono::{DateTime, Utc};

use crate::forge::{PullRequest, User};

/// A branch the user can pick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchEntry {
    /// Text shown in the list
    pub label: String,
    /// Branch name passed to `git checkout`
    pub value: String,
    /// Last update of the pull request; `None` only for the default branch
    pub updated_at: Option<DateTime<Utc>>,
}

impl BranchEntry {
    /// Whether this is the default branch entry
    pub fn is_default(&self) -> bool {
        self.updated_at.is_none()
    }
}

/// Build the catalog: the default branch first, then the user's own pull
/// requests in the order given (most recently updated first from the API).
/// Pull requests authored by anyone else are left out.
pub fn build(user: &User, default_branch: &str, pull_requests: &[PullRequest]) -> Vec<BranchEntry> {
    let default = BranchEntry {
        label: format!("Default ({})", default_branch),
        value: default_branch.to_string(),
        updated_at: None,
    };

    std::iter::once(default)
        .chain(
            pull_requests
                .iter()
                .filter(|pr| pr.author_login == user.login)
                .map(|pr| BranchEntry {
                    label: format!("{} ({})", pr.title, pr.head_ref),
                    value: pr.head_ref.clone(),
                    updated_at: Some(pr.updated_at),
                }),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user(login: &str) -> User {
        User {
            login: login.to_string(),
        }
    }

    fn pr(id: u64, author: &str, title: &str, head: &str) -> PullRequest {
        PullRequest {
            id,
            title: title.to_string(),
            author_login: author.to_string(),
            head_ref: head.to_string(),
            updated_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, id as u32).unwrap(),
        }
    }

    #[test]
    fn test_default_only_when_no_pull_requests() {
        let entries = build(&user("octocat"), "main", &[]);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, "Default (main)");
        assert_eq!(entries[0].value, "main");
        assert!(entries[0].is_default());
    }

    #[test]
    fn test_own_pull_requests_follow_default_in_order() {
        let prs = vec![
            pr(1, "octocat", "Add X", "feature-x"),
            pr(2, "octocat", "Add Y", "feature-y"),
        ];

        let entries = build(&user("octocat"), "main", &prs);
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();

        assert_eq!(labels, ["Default (main)", "Add X (feature-x)", "Add Y (feature-y)"]);
        assert_eq!(entries[1].value, "feature-x");
        assert_eq!(entries[1].updated_at, Some(prs[0].updated_at));
        assert_eq!(entries[2].value, "feature-y");
    }

    #[test]
    fn test_other_authors_are_filtered_out() {
        let prs = vec![
            pr(1, "hubot", "Bot work", "bot"),
            pr(2, "octocat", "Mine", "mine"),
            pr(3, "OctoCat", "Not mine (case differs)", "other"),
        ];

        let entries = build(&user("octocat"), "trunk", &prs);
        let values: Vec<&str> = entries.iter().map(|e| e.value.as_str()).collect();

        assert_eq!(values, ["trunk", "mine"]);
    }

    #[test]
    fn test_no_own_pull_requests_keeps_default_first() {
        let prs = vec![pr(1, "hubot", "Bot work", "bot")];
        let entries = build(&user("octocat"), "main", &prs);

        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_default());
    }

    #[test]
    fn test_build_is_idempotent() {
        let prs = vec![
            pr(3, "octocat", "Newest", "c"),
            pr(1, "octocat", "Oldest", "a"),
            pr(2, "hubot", "Other", "b"),
        ];

        let first = build(&user("octocat"), "main", &prs);
        let second = build(&user("octocat"), "main", &prs);

        assert_eq!(first, second);
        // Incoming order is kept, no re-sorting by date
        assert_eq!(first[1].value, "c");
        assert_eq!(first[2].value, "a");
    }

    #[test]
    fn test_only_default_entry_lacks_timestamp() {
        let prs = vec![pr(1, "octocat", "A", "a"), pr(2, "octocat", "B", "b")];
        let entries = build(&user("octocat"), "main", &prs);

        assert_eq!(entries.iter().filter(|e| e.is_default()).count(), 1);
    }
}
