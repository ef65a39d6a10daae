use crate::git::CommitInfo;
use std::collections::BTreeSet;

/// Subject of the automated commit pushed right after every release
pub const POST_RELEASE_MARKER: &str = "Post release version bump";

/// Whether the commits since the last release warrant a new one.
///
/// Nothing to release when there are no commits at all, or when the only
/// commit is the automated post-release version bump.
pub fn has_releasable_changes(commits: &[CommitInfo], marker: &str) -> bool {
    match commits {
        [] => false,
        [only] => only.subject != marker,
        _ => true,
    }
}

/// Sorted, de-duplicated author names, leaving out the version bump commits.
pub fn contributors(commits: &[CommitInfo], marker: &str) -> Vec<String> {
    commits
        .iter()
        .filter(|c| c.subject != marker)
        .map(|c| c.author.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(hash: &str, subject: &str, author: &str) -> CommitInfo {
        CommitInfo {
            hash: hash.to_string(),
            subject: subject.to_string(),
            author: author.to_string(),
        }
    }

    #[test]
    fn test_no_commits_is_not_releasable() {
        assert!(!has_releasable_changes(&[], POST_RELEASE_MARKER));
    }

    #[test]
    fn test_only_version_bump_is_not_releasable() {
        let commits = vec![commit("a1", POST_RELEASE_MARKER, "Release Bot")];
        assert!(!has_releasable_changes(&commits, POST_RELEASE_MARKER));
    }

    #[test]
    fn test_single_real_commit_is_releasable() {
        let commits = vec![commit("a1", "Fix the image builder", "Ada")];
        assert!(has_releasable_changes(&commits, POST_RELEASE_MARKER));
    }

    #[test]
    fn test_bump_plus_change_is_releasable() {
        let commits = vec![
            commit("b2", "Add blueprint import", "Ada"),
            commit("a1", POST_RELEASE_MARKER, "Release Bot"),
        ];
        assert!(has_releasable_changes(&commits, POST_RELEASE_MARKER));
    }

    #[test]
    fn test_contributors_sorted_unique_without_bump_author() {
        let commits = vec![
            commit("c3", "Tweak docs", "Grace"),
            commit("b2", "Add blueprint import", "Ada"),
            commit("b1", "Fix import", "Grace"),
            commit("a1", POST_RELEASE_MARKER, "Release Bot"),
        ];
        assert_eq!(contributors(&commits, POST_RELEASE_MARKER), vec!["Ada", "Grace"]);
    }
}
