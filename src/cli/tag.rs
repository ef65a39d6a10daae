//! The tag pipeline: version → commits → pull requests → changelog → tag.

use chrono::NaiveDate;

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{
    contributors, has_releasable_changes, latest_version_tag, next_version, Changelog,
    ChangelogStyle, ReleaseTag, Version, VersionBump, VersionPolicy,
};
use crate::error::Result;
use crate::forge::{Correlation, ForgeApi, PullRequestCorrelator};
use crate::git::Repository;
use crate::publish::{PublishState, TagPublisher};
use crate::ui;

/// Arguments for the tag workflow, decoupled from clap
#[derive(Debug, Clone, PartialEq)]
pub struct TagArgs {
    /// Explicit release version; computed from the latest tag when absent
    pub version: Option<String>,
    /// Release branch pull requests must be merged into
    pub base: String,
    /// `Some` when semantic versioning is requested
    pub semver_bump: Option<VersionBump>,
    pub dry_run: bool,
    /// Repository name on the forge
    pub component: String,
}

impl TagArgs {
    fn policy(&self) -> VersionPolicy {
        match self.semver_bump {
            Some(bump) => VersionPolicy::Semantic(bump),
            None => VersionPolicy::Plain,
        }
    }
}

/// How a tag run ended
#[derive(Debug, Clone, PartialEq)]
pub enum TagOutcome {
    /// Nothing new since the last release; no tag was made
    NothingToRelease,
    Released {
        tag: ReleaseTag,
        changelog: Changelog,
        state: PublishState,
    },
}

/// Run the whole tag pipeline against the given repository and forge.
///
/// `today` is the date written into the tag sign-off.
pub fn run_tag_workflow(
    args: &TagArgs,
    config: &Config,
    repo: &dyn Repository,
    forge: &dyn ForgeApi,
    today: NaiveDate,
) -> Result<TagOutcome> {
    let latest = latest_version_tag(&repo.tags_reachable_from_head()?)?;
    let latest_name = latest.as_ref().map(|t| t.name.clone());
    if latest.is_none() {
        ui::msg_info("There are no tags yet in this repository.");
    }

    let version = match &args.version {
        Some(explicit) => Version::parse(explicit)?,
        None => next_version(latest.as_ref().map(|t| &t.version), args.policy())?,
    };
    let version_string = version.to_string();
    let bump_name = args.semver_bump.map(|b| b.name());

    ui::print_release_banner(&ui::ReleaseBanner {
        component: &args.component,
        version: &version_string,
        base: &args.base,
        semver_bump: bump_name,
    });
    log::debug!(
        "Current release: {:?}, new release: {}, tag name: {}",
        latest_name,
        version,
        version.tag_name()
    );

    let commits = repo.commits_since(latest_name.as_deref())?;
    ui::msg_info(&format!(
        "Found {} commits since {} in {}:",
        commits.len(),
        latest_name.as_deref().unwrap_or("the beginning"),
        args.base
    ));
    for commit in &commits {
        log::debug!("{} {}", commit.hash, commit.subject);
    }

    let marker = &config.changelog.post_release_marker;
    if !has_releasable_changes(&commits, marker) {
        let warning = if commits.is_empty() {
            BoundaryWarning::NoNewCommits {
                latest_tag: latest_name,
            }
        } else {
            BoundaryWarning::OnlyVersionBump {
                latest_tag: latest_name,
            }
        };
        ui::display_boundary_warning(&warning);
        return Ok(TagOutcome::NothingToRelease);
    }

    let repository = format!("{}/{}", config.forge.owner, args.component);
    let correlator =
        PullRequestCorrelator::new(forge, repository, &args.base, config.forge.pacing());
    let correlations = correlator.correlate_all(&commits);

    let style = ChangelogStyle::for_component(&args.component, &config.changelog.compact_components);
    let changelog = Changelog::assemble(
        correlations.iter().filter_map(Correlation::as_match),
        commits.len(),
        style,
    );
    ui::msg_ok(&format!(
        "Collected summaries from {} pull requests ({} commits).",
        changelog.unique_entries(),
        changelog.commits_processed()
    ));

    let tag = ReleaseTag::prepare(&version, &changelog, &contributors(&commits, marker), today);
    let publisher = TagPublisher::new(repo, &config.forge.remote, &args.base, args.dry_run);
    let state = publisher.publish(&tag)?;

    Ok(TagOutcome::Released {
        tag,
        changelog,
        state,
    })
}
