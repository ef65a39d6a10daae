use std::fmt;

/// Non-fatal conditions met while preparing a release.
/// These are reported to the user and never abort the run by themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Nothing was committed since the latest release tag
    NoNewCommits { latest_tag: Option<String> },
    /// The only commit since the latest release is the automated version bump
    OnlyVersionBump { latest_tag: Option<String> },
    /// The forge search for a commit returned more than one pull request
    AmbiguousPullRequests { commit: String, count: usize },
    /// No merged pull request contains the commit
    NoPullRequest { commit: String },
    /// The forge could not be queried for a commit
    PullRequestLookupFailed { commit: String, reason: String },
    /// Reviews for a pull request could not be listed
    ReviewLookupFailed { number: u64, reason: String },
}

fn since(latest_tag: &Option<String>) -> String {
    match latest_tag {
        Some(tag) => format!("since '{}'", tag),
        None => "in this repository".to_string(),
    }
}

fn short(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits { latest_tag } => write!(
                f,
                "No new commits have been pushed {} therefore skipping the tag.",
                since(latest_tag)
            ),
            BoundaryWarning::OnlyVersionBump { latest_tag } => write!(
                f,
                "No new commits have been pushed {} (apart from the post release version bump) therefore skipping the tag.",
                since(latest_tag)
            ),
            BoundaryWarning::AmbiguousPullRequests { commit, count } => write!(
                f,
                "There are {} pull requests associated with {} - skipping...",
                count,
                short(commit)
            ),
            BoundaryWarning::NoPullRequest { commit } => write!(
                f,
                "There is no merged pull request associated with {} - skipping...",
                short(commit)
            ),
            BoundaryWarning::PullRequestLookupFailed { commit, reason } => write!(
                f,
                "Couldn't get PR infos for {}: {}",
                short(commit),
                reason
            ),
            BoundaryWarning::ReviewLookupFailed { number, reason } => write!(
                f,
                "Couldn't list reviews of #{}: {}",
                number, reason
            ),
        }
    }
}
