use crate::error::{ReleaseBotError, Result};
use crate::git::{CommitInfo, Repository};
use std::cell::RefCell;

/// In-memory repository for exercising the release pipeline without git.
///
/// History is a linear list of commits (newest first); tags point at an index
/// into that list. Every mutating call is recorded so tests can assert on it.
#[derive(Default)]
pub struct MockRepository {
    commits: Vec<CommitInfo>,
    tags: Vec<(String, usize)>,
    created_tags: RefCell<Vec<(String, String)>>,
    pushed_tags: RefCell<Vec<(String, String)>>,
    reject_push: bool,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit on top of the current history
    pub fn add_commit(&mut self, hash: &str, subject: &str, author: &str) {
        self.commits.insert(
            0,
            CommitInfo {
                hash: hash.to_string(),
                subject: subject.to_string(),
                author: author.to_string(),
            },
        );
        for (_, index) in self.tags.iter_mut() {
            *index += 1;
        }
    }

    /// Tag the current tip of the history
    pub fn tag_head(&mut self, name: impl Into<String>) {
        self.tags.push((name.into(), 0));
    }

    /// Make every push fail as if the remote rejected it
    pub fn reject_pushes(&mut self) {
        self.reject_push = true;
    }

    /// Tags created through [Repository::create_annotated_tag], with their messages
    pub fn created_tags(&self) -> Vec<(String, String)> {
        self.created_tags.borrow().clone()
    }

    /// (remote, tag) pairs pushed through [Repository::push_tag]
    pub fn pushed_tags(&self) -> Vec<(String, String)> {
        self.pushed_tags.borrow().clone()
    }

    fn tag_exists(&self, name: &str) -> bool {
        self.tags.iter().any(|(t, _)| t == name)
            || self.created_tags.borrow().iter().any(|(t, _)| t == name)
    }
}

impl Repository for MockRepository {
    fn tags_reachable_from_head(&self) -> Result<Vec<String>> {
        Ok(self.tags.iter().map(|(name, _)| name.clone()).collect())
    }

    fn commits_since(&self, since_tag: Option<&str>) -> Result<Vec<CommitInfo>> {
        let end = match since_tag {
            Some(tag) => self
                .tags
                .iter()
                .find(|(name, _)| name == tag)
                .map(|(_, index)| *index)
                .ok_or_else(|| ReleaseBotError::tag(format!("Cannot find tag '{}'", tag)))?,
            None => self.commits.len(),
        };
        Ok(self.commits[..end].to_vec())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        if self.tag_exists(name) {
            return Err(ReleaseBotError::tag(format!("Tag '{}' already exists", name)));
        }
        self.created_tags
            .borrow_mut()
            .push((name.to_string(), message.to_string()));
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()> {
        if self.reject_push {
            return Err(ReleaseBotError::remote(format!(
                "remote rejected refs/tags/{}",
                tag_name
            )));
        }
        self.pushed_tags
            .borrow_mut()
            .push((remote.to_string(), tag_name.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_commits_since_tag() {
        let mut repo = MockRepository::new();
        repo.add_commit("a1", "Initial commit", "Ada");
        repo.tag_head("v1");
        repo.add_commit("b2", "Add feature", "Ada");
        repo.add_commit("c3", "Fix feature", "Grace");

        let commits = repo.commits_since(Some("v1")).unwrap();
        let hashes: Vec<&str> = commits.iter().map(|c| c.hash.as_str()).collect();
        assert_eq!(hashes, vec!["c3", "b2"]);
        assert_eq!(repo.commits_since(None).unwrap().len(), 3);
    }

    #[test]
    fn test_mock_unknown_tag() {
        let repo = MockRepository::new();
        assert!(repo.commits_since(Some("v1")).is_err());
    }

    #[test]
    fn test_mock_records_mutations() {
        let repo = MockRepository::new();
        repo.create_annotated_tag("v2", "Changes with 2").unwrap();
        repo.push_tag("origin", "v2").unwrap();

        assert_eq!(
            repo.created_tags(),
            vec![("v2".to_string(), "Changes with 2".to_string())]
        );
        assert_eq!(repo.pushed_tags(), vec![("origin".to_string(), "v2".to_string())]);
        assert!(repo.create_annotated_tag("v2", "again").is_err());
    }
}
