//! Markdown to Slack mrkdwn conversion for release notes.
//!
//! This is a one-way transform meant to run exactly once over a notes body;
//! feeding already converted text back in is not supported.

use regex::Regex;
use std::sync::OnceLock;

fn link_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"))
}

fn heading_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^#{1,6}[ \t]+(.+)$").expect("valid heading regex"))
}

fn bullet_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*\*[ \t]+").expect("valid bullet regex"))
}

/// Convert markdown release notes to Slack's mrkdwn.
///
/// * `[text](url)` becomes `<url|text>`
/// * `#`..`######` headings at the start of a line become `*bold*`
/// * `*` bullets at the start of a line (any indentation) become `  - `
///
/// Indentation is matched within the line only, so blank lines between
/// sections survive the conversion.
pub fn format_changelog_for_slack(changelog: &str) -> String {
    let linked = link_pattern().replace_all(changelog, "<$2|$1>");
    let headed = heading_pattern().replace_all(&linked, "*$1*");
    bullet_pattern().replace_all(&headed, "  - ").into_owned()
}
