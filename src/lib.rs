pub mod boundary;
pub mod chat;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod forge;
pub mod git;
pub mod publish;
pub mod ui;

pub use error::{ReleaseBotError, Result};
