//! Git operations abstraction layer
//!
//! The release pipeline only needs four things from version control: the tags
//! reachable from HEAD, the commits made since a tag, creating an annotated
//! tag and pushing it. The [Repository] trait captures exactly that surface so
//! the pipeline can run against a real repository ([Git2Repository]) or an
//! in-memory one ([MockRepository]) in tests.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// A commit in the release range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Full 40-character commit hash
    pub hash: String,
    /// First line of the commit message
    pub subject: String,
    /// Author name
    pub author: String,
}

/// Version control operations used by the tag pipeline.
///
/// Implementations map their native errors to
/// [crate::error::ReleaseBotError] variants.
pub trait Repository {
    /// Names of all tags whose target commit is an ancestor of (or equal to) HEAD.
    fn tags_reachable_from_head(&self) -> Result<Vec<String>>;

    /// Commits reachable from HEAD but not from `since_tag`, newest first.
    ///
    /// With `None` the whole history of HEAD is returned.
    fn commits_since(&self, since_tag: Option<&str>) -> Result<Vec<CommitInfo>>;

    /// Create an annotated tag on HEAD.
    ///
    /// Fails if a tag with the same name already exists.
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push `refs/tags/<tag_name>` to `remote`.
    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()>;
}
