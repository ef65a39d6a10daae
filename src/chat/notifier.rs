use crate::chat::{format_changelog_for_slack, ChatApi};
use crate::error::{ReleaseBotError, Result};
use crate::ui;

/// Channel reported for a dry run, where nothing is posted
pub const DRY_RUN_CHANNEL: &str = "dry-run-channel";
/// Timestamp reported for a dry run
pub const DRY_RUN_TS: &str = "dry-run-ts";

/// Where an announcement ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationReceipt {
    pub channel: String,
    /// Timestamp of the main message
    pub ts: String,
    /// Timestamp of the release notes reply, if one was posted
    pub thread_ts: Option<String>,
}

impl NotificationReceipt {
    fn dry_run() -> Self {
        NotificationReceipt {
            channel: DRY_RUN_CHANNEL.to_string(),
            ts: DRY_RUN_TS.to_string(),
            thread_ts: None,
        }
    }
}

/// Main announcement text linking to the release page
pub fn release_announcement(release_url: &str, component: &str, version: &str) -> String {
    format!(
        "🚀 *<{}|{} {}>* just got released upstream! 🚀",
        release_url, component, version
    )
}

/// Posts a release announcement with its notes as a threaded reply.
pub struct ReleaseNotifier<'a> {
    chat: &'a dyn ChatApi,
    channel_id: String,
    dry_run: bool,
}

impl<'a> ReleaseNotifier<'a> {
    pub fn new(chat: &'a dyn ChatApi, channel_id: impl Into<String>, dry_run: bool) -> Self {
        ReleaseNotifier {
            chat,
            channel_id: channel_id.into(),
            dry_run,
        }
    }

    /// Announce a release.
    ///
    /// `notes` are converted to mrkdwn and posted under the main message;
    /// empty notes are skipped. A dry run only prints what would be posted.
    pub fn notify(&self, message: &str, notes: Option<&str>) -> Result<NotificationReceipt> {
        let notes = notes.map(str::trim).filter(|n| !n.is_empty());
        ui::print_framed("MAIN MESSAGE:", message);

        if self.dry_run {
            ui::msg_info("DRY RUN MODE - Not actually sending to Slack");
            if let Some(notes) = notes {
                ui::print_framed(
                    "THREADED RESPONSE (formatted for Slack):",
                    &format_changelog_for_slack(notes),
                );
            }
            return Ok(NotificationReceipt::dry_run());
        }

        if !self.chat.is_authenticated() {
            return Err(ReleaseBotError::config("No Slack bot token supplied."));
        }
        if self.channel_id.trim().is_empty() {
            return Err(ReleaseBotError::config("No Slack channel ID supplied."));
        }

        let posted = self.chat.post_message(&self.channel_id, message, None)?;
        ui::msg_ok(&format!("Posted message: {}", posted.ts));

        let thread_ts = match notes {
            Some(notes) => {
                let reply = self.chat.post_message(
                    &posted.channel,
                    &format_changelog_for_slack(notes),
                    Some(&posted.ts),
                )?;
                ui::msg_ok(&format!("Posted threaded message: {}", reply.ts));
                Some(reply.ts)
            }
            None => None,
        };

        Ok(NotificationReceipt {
            channel: posted.channel,
            ts: posted.ts,
            thread_ts,
        })
    }
}
