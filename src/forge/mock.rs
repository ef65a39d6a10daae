use crate::error::{ReleaseBotError, Result};
use crate::forge::{ForgeApi, ForgeUser, PullRequestSummary, Review, SearchQuery};
use std::cell::RefCell;
use std::collections::HashMap;

/// Forge with canned answers, keyed by commit hash, PR number and login.
///
/// Commits without a registered answer yield no search results. Every search
/// query string is recorded.
#[derive(Default)]
pub struct MockForge {
    searches: HashMap<String, Vec<PullRequestSummary>>,
    failing_commits: Vec<String>,
    reviews: HashMap<u64, Vec<Review>>,
    failing_reviews: Vec<u64>,
    names: HashMap<String, String>,
    queries: RefCell<Vec<String>>,
}

impl MockForge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a merged pull request containing `commit`
    pub fn add_pull_request(&mut self, commit: &str, number: u64, title: &str, author: &str) {
        self.searches
            .entry(commit.to_string())
            .or_default()
            .push(PullRequestSummary {
                number,
                title: title.to_string(),
                html_url: format!("https://github.com/example/repo/pull/{}", number),
                user: ForgeUser {
                    login: author.to_string(),
                },
            });
    }

    /// Make the search for `commit` fail
    pub fn fail_search(&mut self, commit: &str) {
        self.failing_commits.push(commit.to_string());
    }

    pub fn add_review(&mut self, number: u64, login: Option<&str>, state: &str) {
        self.reviews.entry(number).or_default().push(Review {
            user: login.map(|l| ForgeUser {
                login: l.to_string(),
            }),
            state: state.to_string(),
        });
    }

    /// Make listing the reviews of `number` fail
    pub fn fail_reviews(&mut self, number: u64) {
        self.failing_reviews.push(number);
    }

    pub fn set_display_name(&mut self, login: &str, name: &str) {
        self.names.insert(login.to_string(), name.to_string());
    }

    /// Query strings of every search performed so far
    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }
}

impl ForgeApi for MockForge {
    fn search_merged_pull_requests(&self, query: &SearchQuery<'_>) -> Result<Vec<PullRequestSummary>> {
        self.queries.borrow_mut().push(query.to_query_string());
        if self.failing_commits.iter().any(|c| c == query.commit) {
            return Err(ReleaseBotError::forge("/search/issues (502): Bad Gateway"));
        }
        Ok(self.searches.get(query.commit).cloned().unwrap_or_default())
    }

    fn list_reviews(&self, number: u64) -> Result<Vec<Review>> {
        if self.failing_reviews.contains(&number) {
            return Err(ReleaseBotError::forge("reviews (500): Server Error"));
        }
        Ok(self.reviews.get(&number).cloned().unwrap_or_default())
    }

    fn display_name(&self, login: &str) -> Result<Option<String>> {
        if login.starts_with("ghost") {
            return Err(ReleaseBotError::forge("Resource not found"));
        }
        Ok(self.names.get(login).cloned())
    }
}
