use crate::chat::{ChatApi, PostedMessage};
use crate::error::{ReleaseBotError, Result};
use std::cell::RefCell;

/// A message as received by [MockChat]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPost {
    pub channel: String,
    pub text: String,
    pub thread_ts: Option<String>,
}

/// Chat backend that records posts instead of sending them.
#[derive(Default)]
pub struct MockChat {
    unauthenticated: bool,
    api_error: Option<String>,
    posts: RefCell<Vec<RecordedPost>>,
}

impl MockChat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Behave as if no bot token was configured
    pub fn without_token() -> Self {
        MockChat {
            unauthenticated: true,
            ..Self::default()
        }
    }

    /// Answer every post with the given Slack error code
    pub fn failing(error: &str) -> Self {
        MockChat {
            api_error: Some(error.to_string()),
            ..Self::default()
        }
    }

    pub fn posts(&self) -> Vec<RecordedPost> {
        self.posts.borrow().clone()
    }
}

impl ChatApi for MockChat {
    fn is_authenticated(&self) -> bool {
        !self.unauthenticated
    }

    fn post_message(&self, channel: &str, text: &str, thread_ts: Option<&str>) -> Result<PostedMessage> {
        if let Some(error) = &self.api_error {
            return Err(ReleaseBotError::chat(error.clone()));
        }

        let mut posts = self.posts.borrow_mut();
        posts.push(RecordedPost {
            channel: channel.to_string(),
            text: text.to_string(),
            thread_ts: thread_ts.map(str::to_string),
        });

        Ok(PostedMessage {
            channel: channel.to_string(),
            ts: format!("1700000000.{:06}", posts.len()),
        })
    }
}
