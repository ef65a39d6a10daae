//! Categorised terminal output.
//!
//! Every user-facing line is prefixed with its category (`Info:`, `OK:`,
//! `Error:`). Diagnostics meant for debugging go through `log` instead.

use crate::boundary::BoundaryWarning;
use console::style;

const FRAME_WIDTH: usize = 60;

/// Print an error message. Callers exit right after.
pub fn msg_error(body: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), body);
}

/// Print an informational message
pub fn msg_info(body: &str) {
    println!("{} {}", style("Info:").yellow().bold(), body);
}

/// Print a success message
pub fn msg_ok(body: &str) {
    println!("{} {}", style("OK:").green().bold(), body);
}

/// Report a non-fatal condition
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    msg_info(&warning.to_string());
}

/// Release settings shown before anything is tagged.
pub struct ReleaseBanner<'a> {
    pub component: &'a str,
    pub version: &'a str,
    pub base: &'a str,
    pub semver_bump: Option<&'a str>,
}

/// Render the release settings block
pub fn format_release_banner(banner: &ReleaseBanner<'_>) -> String {
    let mut out = format!(
        "\n--------------------------------\n\
         {}\n  \
         Component:        {}\n  \
         Version:          {}\n  \
         Base branch:      {}\n  \
         Semantic ver.:    {}\n",
        style("Release:").bold(),
        banner.component,
        banner.version,
        banner.base,
        banner.semver_bump.is_some()
    );
    if let Some(bump) = banner.semver_bump {
        out.push_str(&format!("  Semver bump type: {}\n", bump));
    }
    out.push_str("--------------------------------\n");
    out
}

pub fn print_release_banner(banner: &ReleaseBanner<'_>) {
    println!("{}", format_release_banner(banner));
}

/// Print a titled block between two rules
pub fn print_framed(title: &str, body: &str) {
    let rule = "=".repeat(FRAME_WIDTH);
    println!("\n{}\n{}\n{}\n{}\n{}\n", rule, title, rule, body, rule);
}
