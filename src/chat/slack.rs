//! Slack Web API client.

use crate::chat::{ChatApi, PostedMessage};
use crate::error::{ReleaseBotError, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Slack client configuration.
#[derive(Debug, Clone)]
pub struct SlackClientConfig {
    /// API root (e.g., `https://slack.com/api`).
    pub api_url: String,

    /// Bot OAuth token.
    pub bot_token: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// Slack client posting as a bot user.
#[derive(Debug, Clone)]
pub struct SlackClient {
    client: Client,
    config: SlackClientConfig,
}

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_ts: Option<&'a str>,
}

/// Slack answers HTTP 200 with `ok: false` for API-level errors
#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    channel: Option<String>,
    ts: Option<String>,
    error: Option<String>,
}

impl PostMessageResponse {
    fn into_posted(self) -> Result<PostedMessage> {
        if !self.ok {
            return Err(ReleaseBotError::chat(
                self.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }
        match (self.channel, self.ts) {
            (Some(channel), Some(ts)) => Ok(PostedMessage { channel, ts }),
            _ => Err(ReleaseBotError::chat("response is missing channel or ts")),
        }
    }
}

impl SlackClient {
    pub fn new(config: SlackClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("release-bot/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), method)
    }
}

impl ChatApi for SlackClient {
    fn is_authenticated(&self) -> bool {
        !self.config.bot_token.trim().is_empty()
    }

    fn post_message(&self, channel: &str, text: &str, thread_ts: Option<&str>) -> Result<PostedMessage> {
        let url = self.api_url("chat.postMessage");
        log::debug!("POST {} (channel {}, thread {:?})", url, channel, thread_ts);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.bot_token)
            .json(&PostMessageRequest {
                channel,
                text,
                thread_ts,
            })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReleaseBotError::chat(format!(
                "chat.postMessage returned HTTP {}",
                status.as_u16()
            )));
        }

        response.json::<PostMessageResponse>()?.into_posted()
    }
}
