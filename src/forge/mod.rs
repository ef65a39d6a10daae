//! Source forge access.
//!
//! [ForgeApi] is the narrow surface the changelog needs from the forge:
//! searching merged pull requests by commit, listing reviews and resolving a
//! handle to a display name. [GitHubClient] implements it over the REST API,
//! [MockForge] serves canned answers for tests.

pub mod correlator;
pub mod github;
pub mod mock;

pub use correlator::{Correlation, PullRequestCorrelator};
pub use github::{GitHubClient, GitHubClientConfig};
pub use mock::MockForge;

use crate::error::Result;
use serde::Deserialize;

/// Review state that counts as an approval
pub const APPROVED: &str = "APPROVED";

/// Account on the forge
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForgeUser {
    pub login: String,
}

/// Pull request as returned by the issue search
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestSummary {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub user: ForgeUser,
}

/// One review left on a pull request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Review {
    /// Absent for reviews by deleted accounts
    pub user: Option<ForgeUser>,
    pub state: String,
}

impl Review {
    pub fn is_approval(&self) -> bool {
        self.state == APPROVED
    }
}

/// Search for the merged pull request that brought a commit into a branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery<'a> {
    pub commit: &'a str,
    pub base: &'a str,
    /// `owner/name`
    pub repository: &'a str,
}

impl SearchQuery<'_> {
    /// Render in the forge's search syntax
    pub fn to_query_string(&self) -> String {
        format!(
            "{} type:pr is:merged base:{} repo:{}",
            self.commit, self.base, self.repository
        )
    }
}

/// Read-only forge operations used to attribute commits to pull requests.
pub trait ForgeApi {
    /// Merged pull requests matching the query
    fn search_merged_pull_requests(&self, query: &SearchQuery<'_>) -> Result<Vec<PullRequestSummary>>;

    /// Reviews left on pull request `number`
    fn list_reviews(&self, number: u64) -> Result<Vec<Review>>;

    /// Public display name of `login`, `None` if the user has not set one
    fn display_name(&self, login: &str) -> Result<Option<String>>;
}
