//! The notify pipeline: read release notes, announce, reply with the notes.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::chat::notifier::release_announcement;
use crate::chat::{ChatApi, NotificationReceipt, ReleaseNotifier};
use crate::config::Config;
use crate::error::{ReleaseBotError, Result};

/// Arguments for the notify workflow, decoupled from clap
#[derive(Debug, Clone, PartialEq)]
pub struct NotifyArgs {
    pub component: String,
    pub version: String,
    pub release_notes_file: PathBuf,
    pub slack_channel_id: String,
    pub dry_run: bool,
}

/// Read the release notes, trimmed of surrounding whitespace
pub fn read_release_notes(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content.trim().to_string()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(ReleaseBotError::config(format!(
            "Release notes file '{}' not found.",
            path.display()
        ))),
        Err(e) => Err(ReleaseBotError::config(format!(
            "Error reading release notes file '{}': {}",
            path.display(),
            e
        ))),
    }
}

/// Browser URL of the release page for `version`
pub fn release_url(config: &Config, component: &str, version: &str) -> String {
    format!(
        "{}/{}/{}/releases/tag/v{}",
        config.forge.web_url.trim_end_matches('/'),
        config.forge.owner,
        component,
        version
    )
}

/// Announce a release. The notes file is read before any chat call is made.
pub fn run_notify_workflow(
    args: &NotifyArgs,
    config: &Config,
    chat: &dyn ChatApi,
) -> Result<NotificationReceipt> {
    let notes = read_release_notes(&args.release_notes_file)?;

    let url = release_url(config, &args.component, &args.version);
    let message = release_announcement(&url, &args.component, &args.version);

    ReleaseNotifier::new(chat, &args.slack_channel_id, args.dry_run).notify(&message, Some(&notes))
}
