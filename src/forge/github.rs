//! GitHub REST API client.

use crate::error::{ReleaseBotError, Result};
use crate::forge::{ForgeApi, PullRequestSummary, Review, SearchQuery};
use reqwest::blocking::{Client, Response};
use reqwest::{header, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Maximum page size accepted by the search and reviews endpoints
const SEARCH_PAGE_SIZE: &str = "20";
const REVIEWS_PAGE_SIZE: &str = "100";

/// GitHub API client configuration.
#[derive(Debug, Clone)]
pub struct GitHubClientConfig {
    /// API root (e.g., `https://api.github.com`).
    pub api_url: String,

    /// Repository owner.
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Optional token; anonymous requests get a much lower rate limit.
    pub token: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// GitHub API client scoped to one repository.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    config: GitHubClientConfig,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<PullRequestSummary>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    name: Option<String>,
}

impl GitHubClient {
    /// Create a new GitHub client.
    pub fn new(config: GitHubClientConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );

        if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ReleaseBotError::config("Invalid GitHub token format"))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("release-bot/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url.trim_end_matches('/'), path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = self.api_url(path);
        log::debug!("GET {} {:?}", url, query);
        let response = self.client.get(&url).query(query).send()?;
        Self::handle_response(response, path)
    }

    fn handle_response<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>()?);
        }

        let body = response.text().unwrap_or_default();
        let body_message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string));

        let message = match (status, body_message) {
            (StatusCode::UNAUTHORIZED, _) => "Bad credentials".to_string(),
            (StatusCode::NOT_FOUND, _) => "Resource not found".to_string(),
            (StatusCode::TOO_MANY_REQUESTS, _) => "Rate limit exceeded".to_string(),
            (_, Some(msg)) => msg,
            _ => body,
        };

        Err(ReleaseBotError::forge(format!(
            "{} ({}): {}",
            endpoint,
            status.as_u16(),
            message
        )))
    }
}

impl ForgeApi for GitHubClient {
    fn search_merged_pull_requests(&self, query: &SearchQuery<'_>) -> Result<Vec<PullRequestSummary>> {
        let q = query.to_query_string();
        let response: SearchResponse =
            self.get("/search/issues", &[("q", q.as_str()), ("per_page", SEARCH_PAGE_SIZE)])?;
        Ok(response.items)
    }

    fn list_reviews(&self, number: u64) -> Result<Vec<Review>> {
        let path = format!(
            "/repos/{}/{}/pulls/{}/reviews",
            self.config.owner, self.config.repo, number
        );
        self.get(&path, &[("per_page", REVIEWS_PAGE_SIZE)])
    }

    fn display_name(&self, login: &str) -> Result<Option<String>> {
        let user: UserResponse = self.get(&format!("/users/{}", login), &[])?;
        Ok(user.name.filter(|n| !n.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: Option<&str>) -> GitHubClientConfig {
        GitHubClientConfig {
            api_url: "https://api.github.com/".to_string(),
            owner: "osbuild".to_string(),
            repo: "osbuild-composer".to_string(),
            token: token.map(str::to_string),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_api_url_trims_trailing_slash() {
        let client = GitHubClient::new(config(None)).unwrap();
        assert_eq!(
            client.api_url("/search/issues"),
            "https://api.github.com/search/issues"
        );
    }

    #[test]
    fn test_invalid_token_rejected() {
        assert!(GitHubClient::new(config(Some("bad\ntoken"))).is_err());
    }

    #[test]
    fn test_search_response_shape() {
        let body = r#"{
            "total_count": 1,
            "items": [{
                "number": 4021,
                "title": "Add support for RHEL 10",
                "html_url": "https://github.com/osbuild/osbuild-composer/pull/4021",
                "user": {"login": "ada", "id": 1},
                "state": "closed"
            }]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].number, 4021);
        assert_eq!(parsed.items[0].user.login, "ada");
    }

    #[test]
    fn test_user_response_without_name() {
        let parsed: UserResponse = serde_json::from_str(r#"{"login": "ada", "name": null}"#).unwrap();
        assert!(parsed.name.is_none());
    }
}
