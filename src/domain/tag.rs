use crate::domain::changelog::Changelog;
use crate::domain::version::Version;
use chrono::NaiveDate;

/// The annotated tag that records a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    pub name: String,
    pub message: String,
}

impl ReleaseTag {
    /// Prepare the tag for `version`, rendering its release message.
    pub fn prepare(
        version: &Version,
        changelog: &Changelog,
        contributors: &[String],
        date: NaiveDate,
    ) -> Self {
        ReleaseTag {
            name: version.tag_name(),
            message: tag_message(&version.to_string(), changelog, contributors, date),
        }
    }
}

/// Render the release message stored in the annotated tag.
pub fn tag_message(
    version: &str,
    changelog: &Changelog,
    contributors: &[String],
    date: NaiveDate,
) -> String {
    format!(
        "Changes with {}\n\n----------------\n{}\n\nContributions from: {}\n\n— Somewhere on the Internet, {}",
        version,
        changelog.body(),
        contributors.join(", "),
        date.format("%Y-%m-%d")
    )
}
