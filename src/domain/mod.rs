//! Domain logic - pure release rules independent of git, forge or chat access

pub mod changelog;
pub mod commit;
pub mod tag;
pub mod version;

pub use changelog::{Changelog, ChangelogStyle, PullRequestMatch};
pub use commit::{contributors, has_releasable_changes, POST_RELEASE_MARKER};
pub use tag::ReleaseTag;
pub use version::{latest_version_tag, next_version, Version, VersionBump, VersionPolicy, VersionTag};
