use std::collections::BTreeSet;

/// A pull request that was unambiguously matched to a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestMatch {
    pub number: u64,
    pub title: String,
    pub author: String,
    /// Display names of approving reviewers, sorted and unique
    pub reviewers: Vec<String>,
}

/// Bullet layout of changelog entries, which differs per component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangelogStyle {
    /// `- title (#n)` at column zero
    Compact,
    /// `  * title (#n)` nested under the tag header
    Nested,
}

impl ChangelogStyle {
    /// Style for a component given the configured list of compact components
    pub fn for_component(component: &str, compact_components: &[String]) -> Self {
        if compact_components.iter().any(|c| c == component) {
            ChangelogStyle::Compact
        } else {
            ChangelogStyle::Nested
        }
    }

    fn bullet(&self) -> &'static str {
        match self {
            ChangelogStyle::Compact => "- ",
            ChangelogStyle::Nested => "  * ",
        }
    }

    fn attribution_indent(&self) -> &'static str {
        match self {
            ChangelogStyle::Compact => "  ",
            ChangelogStyle::Nested => "    ",
        }
    }
}

impl PullRequestMatch {
    /// Two-line changelog entry: the summary bullet and the attribution line
    pub fn to_entry(&self, style: ChangelogStyle) -> String {
        let reviewers = if self.reviewers.is_empty() {
            "none".to_string()
        } else {
            self.reviewers.join(", ")
        };
        format!(
            "{}{} (#{})\n{}Author: {}, Reviewers: {}",
            style.bullet(),
            self.title,
            self.number,
            style.attribution_indent(),
            self.author,
            reviewers
        )
    }
}

/// Release notes body assembled from matched pull requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changelog {
    entries: Vec<String>,
    commits_processed: usize,
}

impl Changelog {
    /// Build the changelog from the pull requests resolved for a release.
    ///
    /// Entries are de-duplicated on their exact text and ordered
    /// lexicographically, independent of commit order.
    pub fn assemble<'a, I>(matches: I, commits_processed: usize, style: ChangelogStyle) -> Self
    where
        I: IntoIterator<Item = &'a PullRequestMatch>,
    {
        let entries: BTreeSet<String> = matches.into_iter().map(|m| m.to_entry(style)).collect();
        Changelog {
            entries: entries.into_iter().collect(),
            commits_processed,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn unique_entries(&self) -> usize {
        self.entries.len()
    }

    pub fn commits_processed(&self) -> usize {
        self.commits_processed
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn body(&self) -> String {
        self.entries.join("\n")
    }
}
