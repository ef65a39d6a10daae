//! Release announcements in a chat channel.

pub mod mock;
pub mod mrkdwn;
pub mod notifier;
pub mod slack;

pub use mock::MockChat;
pub use mrkdwn::format_changelog_for_slack;
pub use notifier::{NotificationReceipt, ReleaseNotifier};
pub use slack::{SlackClient, SlackClientConfig};

use crate::error::Result;

/// Identifies a message once it has been posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub channel: String,
    pub ts: String,
}

/// Chat operations used to announce a release.
pub trait ChatApi {
    /// Whether credentials are configured for posting
    fn is_authenticated(&self) -> bool;

    /// Post `text` to `channel`, as a reply under `thread_ts` when given
    fn post_message(&self, channel: &str, text: &str, thread_ts: Option<&str>) -> Result<PostedMessage>;
}
