//! Workflows behind the `tag` and `notify` subcommands.
//!
//! Each workflow takes plain argument structs and trait objects for its
//! collaborators, so it can be driven without clap or network access.

pub mod notify;
pub mod tag;

pub use notify::{run_notify_workflow, NotifyArgs};
pub use tag::{run_tag_workflow, TagArgs, TagOutcome};
