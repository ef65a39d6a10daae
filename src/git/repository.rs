use crate::error::{ReleaseBotError, Result};
use crate::git::CommitInfo;
use git2::{Oid, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)
            .map_err(|e| ReleaseBotError::config(format!("Not in a git repository: {}", e)))?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn head_commit_oid(&self) -> Result<Oid> {
        Ok(self.repo.head()?.peel_to_commit()?.id())
    }

    /// Resolve a tag (lightweight or annotated) to the commit it points at
    fn tag_commit_oid(&self, tag_name: &str) -> Result<Oid> {
        let reference = self
            .repo
            .find_reference(&format!("refs/tags/{}", tag_name))
            .map_err(|e| ReleaseBotError::tag(format!("Cannot find tag '{}': {}", tag_name, e)))?;
        let commit = reference
            .peel_to_commit()
            .map_err(|e| ReleaseBotError::tag(format!("Cannot peel tag '{}': {}", tag_name, e)))?;
        Ok(commit.id())
    }
}

impl super::Repository for Git2Repository {
    fn tags_reachable_from_head(&self) -> Result<Vec<String>> {
        let head = self.head_commit_oid()?;
        let mut reachable = Vec::new();

        for name in self.repo.tag_names(None)?.iter().flatten() {
            // Tags on trees or blobs can't be release points
            let target = match self.tag_commit_oid(name) {
                Ok(oid) => oid,
                Err(e) => {
                    log::debug!("Skipping tag {}: {}", name, e);
                    continue;
                }
            };

            if target == head || self.repo.graph_descendant_of(head, target)? {
                reachable.push(name.to_string());
            }
        }

        Ok(reachable)
    }

    fn commits_since(&self, since_tag: Option<&str>) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        revwalk.push_head()?;

        if let Some(tag) = since_tag {
            revwalk.hide(self.tag_commit_oid(tag)?)?;
        }

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;

            commits.push(CommitInfo {
                hash: oid.to_string(),
                subject: commit.summary().unwrap_or("").to_string(),
                author: commit.author().name().unwrap_or("unknown").to_string(),
            });
        }

        Ok(commits)
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        if self.repo.find_reference(&format!("refs/tags/{}", name)).is_ok() {
            return Err(ReleaseBotError::tag(format!("Tag '{}' already exists", name)));
        }

        let head = self.repo.head()?.peel_to_commit()?;
        let tagger = self
            .repo
            .signature()
            .map_err(|e| ReleaseBotError::tag(format!("Cannot determine tagger identity: {}", e)))?;

        self.repo
            .tag(name, head.as_object(), &tagger, message, false)
            .map_err(|e| ReleaseBotError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }

    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()> {
        let mut remote_handle = self
            .repo
            .find_remote(remote)
            .map_err(|_| ReleaseBotError::remote(format!("No remote named '{}' found", remote)))?;
        let git_config = self.repo.config()?;

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");

            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }

                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }
            }

            if allowed_types.contains(git2::CredentialType::USER_PASS_PLAINTEXT) {
                return git2::Cred::credential_helper(&git_config, url, username_from_url);
            }

            git2::Cred::default()
        });

        // The remote reports per-ref rejections here rather than failing the push
        callbacks.push_update_reference(|refname, status| match status {
            Some(reason) => Err(git2::Error::from_str(&format!(
                "remote rejected {}: {}",
                refname, reason
            ))),
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{}:refs/tags/{}", tag_name, tag_name);
        remote_handle
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| {
                if e.class() == git2::ErrorClass::Net {
                    ReleaseBotError::remote(format!("Network error during push: {}", e))
                } else {
                    ReleaseBotError::remote(format!("Failed to push tag '{}': {}", tag_name, e))
                }
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use std::fs;
    use tempfile::TempDir;

    fn commit_file(repo: &Git2Repo, dir: &Path, content: &str, message: &str) -> Oid {
        fs::write(dir.join("README.md"), content).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("README.md")).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = git2::Signature::now("Test User", "test@example.com").unwrap();
        let parents = match repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => vec![],
        };
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    fn setup() -> (TempDir, Git2Repo) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }
        (dir, repo)
    }

    #[test]
    fn test_commits_since_tag_newest_first() {
        let (dir, repo) = setup();
        let first = commit_file(&repo, dir.path(), "1", "Initial commit");
        repo.tag_lightweight("v1", &repo.find_object(first, None).unwrap(), false)
            .unwrap();
        commit_file(&repo, dir.path(), "2", "Add feature");
        commit_file(&repo, dir.path(), "3", "Fix feature");

        let git = Git2Repository::from_git2(repo);
        let commits = git.commits_since(Some("v1")).unwrap();
        let subjects: Vec<&str> = commits.iter().map(|c| c.subject.as_str()).collect();
        assert_eq!(subjects, vec!["Fix feature", "Add feature"]);
        assert_eq!(commits[0].hash.len(), 40);
        assert_eq!(commits[0].author, "Test User");
    }

    #[test]
    fn test_commits_since_without_tag_returns_all() {
        let (dir, repo) = setup();
        commit_file(&repo, dir.path(), "1", "Initial commit");
        commit_file(&repo, dir.path(), "2", "Second commit");

        let git = Git2Repository::from_git2(repo);
        assert_eq!(git.commits_since(None).unwrap().len(), 2);
    }

    #[test]
    fn test_tags_reachable_from_head() {
        let (dir, repo) = setup();
        let first = commit_file(&repo, dir.path(), "1", "Initial commit");
        repo.tag_lightweight("v1", &repo.find_object(first, None).unwrap(), false)
            .unwrap();
        let second = commit_file(&repo, dir.path(), "2", "Second commit");

        {
            // A tag on a side branch that HEAD does not contain
            let sig = git2::Signature::now("Test User", "test@example.com").unwrap();
            let parent = repo.find_commit(first).unwrap();
            let tree = parent.tree().unwrap();
            let side = repo
                .commit(None, &sig, &sig, "Side commit", &tree, &[&parent])
                .unwrap();
            repo.tag_lightweight("v9", &repo.find_object(side, None).unwrap(), false)
                .unwrap();
            repo.tag(
                "v2",
                &repo.find_object(second, None).unwrap(),
                &sig,
                "Changes with 2",
                false,
            )
            .unwrap();
        }

        let git = Git2Repository::from_git2(repo);
        let mut tags = git.tags_reachable_from_head().unwrap();
        tags.sort();
        assert_eq!(tags, vec!["v1", "v2"]);
    }

    #[test]
    fn test_create_annotated_tag_twice_fails() {
        let (dir, repo) = setup();
        commit_file(&repo, dir.path(), "1", "Initial commit");

        let git = Git2Repository::from_git2(repo);
        git.create_annotated_tag("v1", "Changes with 1").unwrap();
        let err = git.create_annotated_tag("v1", "Changes with 1").unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_create_annotated_tag_stores_message() {
        let (dir, repo) = setup();
        commit_file(&repo, dir.path(), "1", "Initial commit");

        let git = Git2Repository::from_git2(repo);
        git.create_annotated_tag("v1", "Changes with 1").unwrap();

        let tag = git
            .repo
            .find_reference("refs/tags/v1")
            .unwrap()
            .peel_to_tag()
            .unwrap();
        assert_eq!(tag.message(), Some("Changes with 1"));
    }

    #[test]
    fn test_push_tag_to_local_remote() {
        let (dir, repo) = setup();
        commit_file(&repo, dir.path(), "1", "Initial commit");
        let remote_dir = TempDir::new().unwrap();
        let bare = Git2Repo::init_bare(remote_dir.path()).unwrap();
        repo.remote("origin", remote_dir.path().to_str().unwrap())
            .unwrap();

        let git = Git2Repository::from_git2(repo);
        git.create_annotated_tag("v1", "Changes with 1").unwrap();
        git.push_tag("origin", "v1").unwrap();

        assert!(bare.find_reference("refs/tags/v1").is_ok());
    }

    #[test]
    fn test_push_tag_unknown_remote() {
        let (dir, repo) = setup();
        commit_file(&repo, dir.path(), "1", "Initial commit");

        let git = Git2Repository::from_git2(repo);
        let err = git.push_tag("upstream", "v1").unwrap_err();
        assert!(err.to_string().contains("No remote named 'upstream'"));
    }
}
