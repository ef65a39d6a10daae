//! Creating and pushing the release tag.

use crate::domain::ReleaseTag;
use crate::error::Result;
use crate::git::Repository;
use crate::ui;

/// Where a release tag ended up.
///
/// A dry run stops at `Reported`; a live run goes through `TagCreated` to
/// `Pushed`. Failures at either live step abort the run, nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishState {
    Prepared,
    Reported,
    TagCreated,
    Pushed,
}

/// Creates the annotated release tag and pushes it to a single remote.
pub struct TagPublisher<'a> {
    repo: &'a dyn Repository,
    remote: String,
    base: String,
    dry_run: bool,
}

impl<'a> TagPublisher<'a> {
    pub fn new(
        repo: &'a dyn Repository,
        remote: impl Into<String>,
        base: impl Into<String>,
        dry_run: bool,
    ) -> Self {
        TagPublisher {
            repo,
            remote: remote.into(),
            base: base.into(),
            dry_run,
        }
    }

    /// Drive `tag` from `Prepared` to its terminal state.
    pub fn publish(&self, tag: &ReleaseTag) -> Result<PublishState> {
        let mut state = PublishState::Prepared;
        while let Some(next) = self.step(state, tag)? {
            log::debug!("{} {:?} -> {:?}", tag.name, state, next);
            state = next;
        }
        Ok(state)
    }

    fn step(&self, state: PublishState, tag: &ReleaseTag) -> Result<Option<PublishState>> {
        match state {
            PublishState::Prepared if self.dry_run => {
                ui::msg_info(&format!(
                    "DRY_RUN: Would create a tag '{}' with message:\n{}",
                    tag.name, tag.message
                ));
                ui::msg_info(&format!(
                    "DRY_RUN: Would push a tag {} to branch {}",
                    tag.name, self.base
                ));
                Ok(Some(PublishState::Reported))
            }
            PublishState::Prepared => {
                self.repo.create_annotated_tag(&tag.name, &tag.message)?;
                ui::msg_ok(&format!(
                    "Created tag '{}' with message:\n{}",
                    tag.name, tag.message
                ));
                Ok(Some(PublishState::TagCreated))
            }
            PublishState::TagCreated => {
                self.repo.push_tag(&self.remote, &tag.name)?;
                ui::msg_ok(&format!(
                    "Pushed tag '{}' to branch '{}'",
                    tag.name, self.base
                ));
                Ok(Some(PublishState::Pushed))
            }
            PublishState::Reported | PublishState::Pushed => Ok(None),
        }
    }
}
