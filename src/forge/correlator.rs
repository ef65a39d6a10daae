use crate::boundary::BoundaryWarning;
use crate::domain::PullRequestMatch;
use crate::forge::{ForgeApi, PullRequestSummary, SearchQuery};
use crate::git::CommitInfo;
use crate::ui;
use std::collections::BTreeSet;
use std::thread;
use std::time::Duration;

/// What the forge search said about a single commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correlation {
    /// Exactly one merged pull request contains the commit
    Resolved(PullRequestMatch),
    /// Several pull requests matched; none is picked
    Ambiguous(Vec<PullRequestSummary>),
    /// No pull request matched, or the forge could not be asked
    NotFound,
}

impl Correlation {
    pub fn as_match(&self) -> Option<&PullRequestMatch> {
        match self {
            Correlation::Resolved(pr) => Some(pr),
            _ => None,
        }
    }
}

/// Maps commits to the merged pull requests that introduced them.
///
/// Lookups run one at a time with a fixed pause in between to stay under the
/// forge's secondary rate limits. Failures for one commit never stop the
/// others from being looked up.
pub struct PullRequestCorrelator<'a> {
    forge: &'a dyn ForgeApi,
    repository: String,
    base: String,
    pacing: Duration,
}

impl<'a> PullRequestCorrelator<'a> {
    pub fn new(
        forge: &'a dyn ForgeApi,
        repository: impl Into<String>,
        base: impl Into<String>,
        pacing: Duration,
    ) -> Self {
        PullRequestCorrelator {
            forge,
            repository: repository.into(),
            base: base.into(),
            pacing,
        }
    }

    /// Correlate every commit, preserving input order.
    pub fn correlate_all(&self, commits: &[CommitInfo]) -> Vec<Correlation> {
        let total = commits.len();
        commits
            .iter()
            .enumerate()
            .map(|(i, commit)| {
                if i > 0 && !self.pacing.is_zero() {
                    thread::sleep(self.pacing);
                }
                println!("Fetching PR for commit {}/{} ({})", i + 1, total, commit.hash);
                self.correlate(&commit.hash)
            })
            .collect()
    }

    /// Look up the pull request for one commit.
    pub fn correlate(&self, commit: &str) -> Correlation {
        let query = SearchQuery {
            commit,
            base: &self.base,
            repository: &self.repository,
        };
        log::debug!("Searching: {}", query.to_query_string());

        let mut candidates = match self.forge.search_merged_pull_requests(&query) {
            Ok(items) => items,
            Err(e) => {
                ui::display_boundary_warning(&BoundaryWarning::PullRequestLookupFailed {
                    commit: commit.to_string(),
                    reason: e.to_string(),
                });
                return Correlation::NotFound;
            }
        };

        match candidates.len() {
            0 => {
                ui::display_boundary_warning(&BoundaryWarning::NoPullRequest {
                    commit: commit.to_string(),
                });
                Correlation::NotFound
            }
            1 => {
                let summary = candidates.remove(0);
                Correlation::Resolved(self.resolve(summary))
            }
            count => {
                ui::display_boundary_warning(&BoundaryWarning::AmbiguousPullRequests {
                    commit: commit.to_string(),
                    count,
                });
                for candidate in &candidates {
                    ui::msg_info(&candidate.html_url);
                }
                Correlation::Ambiguous(candidates)
            }
        }
    }

    fn resolve(&self, summary: PullRequestSummary) -> PullRequestMatch {
        let author = self.display_name(&summary.user.login);
        let reviewers = self.approving_reviewers(summary.number);

        PullRequestMatch {
            number: summary.number,
            title: summary.title,
            author,
            reviewers,
        }
    }

    /// Display names of everyone who approved, sorted and unique
    fn approving_reviewers(&self, number: u64) -> Vec<String> {
        let reviews = match self.forge.list_reviews(number) {
            Ok(reviews) => reviews,
            Err(e) => {
                ui::display_boundary_warning(&BoundaryWarning::ReviewLookupFailed {
                    number,
                    reason: e.to_string(),
                });
                return Vec::new();
            }
        };

        let logins: BTreeSet<String> = reviews
            .into_iter()
            .filter(|r| r.is_approval())
            .filter_map(|r| r.user.map(|u| u.login))
            .collect();

        logins
            .iter()
            .map(|login| self.display_name(login))
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }

    /// The user's public name, or the handle itself when there is none
    fn display_name(&self, login: &str) -> String {
        match self.forge.display_name(login) {
            Ok(Some(name)) => name,
            Ok(None) => login.to_string(),
            Err(e) => {
                log::debug!("Cannot resolve display name of {}: {}", login, e);
                login.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::MockForge;

    fn commit(hash: &str) -> CommitInfo {
        CommitInfo {
            hash: hash.to_string(),
            subject: format!("subject of {}", hash),
            author: "Ada".to_string(),
        }
    }

    fn correlator(forge: &MockForge) -> PullRequestCorrelator<'_> {
        PullRequestCorrelator::new(forge, "osbuild/images", "main", Duration::ZERO)
    }

    #[test]
    fn test_single_match_resolves_attribution() {
        let mut forge = MockForge::new();
        forge.add_pull_request("c1", 11, "Add RHEL 10", "ada");
        forge.set_display_name("ada", "Ada Lovelace");
        forge.set_display_name("grace", "Grace Hopper");
        forge.set_display_name("linus", "Linus");
        forge.add_review(11, Some("linus"), "APPROVED");
        forge.add_review(11, Some("grace"), "CHANGES_REQUESTED");
        forge.add_review(11, Some("grace"), "APPROVED");
        forge.add_review(11, Some("linus"), "APPROVED");
        forge.add_review(11, Some("bob"), "COMMENTED");
        forge.add_review(11, None, "APPROVED");

        let correlation = correlator(&forge).correlate("c1");
        assert_eq!(
            correlation,
            Correlation::Resolved(PullRequestMatch {
                number: 11,
                title: "Add RHEL 10".to_string(),
                author: "Ada Lovelace".to_string(),
                reviewers: vec!["Grace Hopper".to_string(), "Linus".to_string()],
            })
        );
    }

    #[test]
    fn test_query_scoped_to_repo_and_base() {
        let forge = MockForge::new();
        correlator(&forge).correlate("c1");
        assert_eq!(
            forge.queries(),
            vec!["c1 type:pr is:merged base:main repo:osbuild/images"]
        );
    }

    #[test]
    fn test_no_match_is_not_found() {
        let forge = MockForge::new();
        assert_eq!(correlator(&forge).correlate("c1"), Correlation::NotFound);
    }

    #[test]
    fn test_multiple_matches_are_ambiguous() {
        let mut forge = MockForge::new();
        forge.add_pull_request("c1", 11, "First", "ada");
        forge.add_pull_request("c1", 12, "Backport of first", "ada");

        match correlator(&forge).correlate("c1") {
            Correlation::Ambiguous(candidates) => {
                let numbers: Vec<u64> = candidates.iter().map(|c| c.number).collect();
                assert_eq!(numbers, vec![11, 12]);
            }
            other => panic!("expected ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn test_search_failure_is_not_found_and_continues() {
        let mut forge = MockForge::new();
        forge.fail_search("c1");
        forge.add_pull_request("c2", 12, "Second", "ada");

        let results = correlator(&forge).correlate_all(&[commit("c1"), commit("c2")]);
        assert_eq!(results[0], Correlation::NotFound);
        assert_eq!(results[1].as_match().map(|m| m.number), Some(12));
    }

    #[test]
    fn test_display_name_falls_back_to_handle() {
        let mut forge = MockForge::new();
        forge.add_pull_request("c1", 11, "Anonymous change", "ghost-user");
        forge.add_review(11, Some("nameless"), "APPROVED");

        let correlation = correlator(&forge).correlate("c1");
        let pr = correlation.as_match().unwrap();
        assert_eq!(pr.author, "ghost-user");
        assert_eq!(pr.reviewers, vec!["nameless"]);
    }

    #[test]
    fn test_review_failure_keeps_match() {
        let mut forge = MockForge::new();
        forge.add_pull_request("c1", 11, "Change", "ada");
        forge.fail_reviews(11);

        let correlation = correlator(&forge).correlate("c1");
        assert!(correlation.as_match().unwrap().reviewers.is_empty());
    }

    #[test]
    fn test_correlate_all_preserves_order() {
        let mut forge = MockForge::new();
        forge.add_pull_request("c1", 1, "One", "ada");
        forge.add_pull_request("c3", 3, "Three", "ada");

        let results = correlator(&forge).correlate_all(&[commit("c3"), commit("c2"), commit("c1")]);
        let numbers: Vec<Option<u64>> = results.iter().map(|r| r.as_match().map(|m| m.number)).collect();
        assert_eq!(numbers, vec![Some(3), None, Some(1)]);
    }

    #[test]
    fn test_pacing_only_between_searches() {
        let forge = MockForge::new();
        let pacing = Duration::from_millis(50);
        let correlator = PullRequestCorrelator::new(&forge, "osbuild/images", "main", pacing);
        let commits = [commit("c1"), commit("c2"), commit("c3")];

        let started = std::time::Instant::now();
        let correlations = correlator.correlate_all(&commits);
        let elapsed = started.elapsed();

        assert_eq!(correlations, vec![Correlation::NotFound; 3]);
        assert_eq!(forge.queries().len(), 3);
        assert!(elapsed >= pacing * 2, "expected two pauses, took {:?}", elapsed);
        assert!(elapsed < pacing * 3, "paused before the first search, took {:?}", elapsed);
    }
}
