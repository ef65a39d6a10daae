use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use release_bot::chat::{SlackClient, SlackClientConfig};
use release_bot::cli::{run_notify_workflow, run_tag_workflow, NotifyArgs, TagArgs, TagOutcome};
use release_bot::config::{self, Config};
use release_bot::domain::VersionBump;
use release_bot::forge::{GitHubClient, GitHubClientConfig};
use release_bot::git::Git2Repository;
use release_bot::ui;

#[derive(Parser)]
#[command(
    name = "release-bot",
    about = "Tag releases with a pull request changelog and announce them"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, help = "Print lots of debugging statements")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create and push the next release tag
    Tag(TagCommand),
    /// Announce a release in a Slack channel with threaded release notes
    Notify(NotifyCommand),
}

#[derive(clap::Args)]
struct TagCommand {
    #[arg(
        short,
        long,
        help = "Set the version for the release (by default, the latest tag will be auto-incremented)"
    )]
    version: Option<String>,

    #[arg(short, long, help = "Set the GitHub token")]
    token: Option<String>,

    #[arg(short, long, default_value = "main", help = "Set the release branch")]
    base: String,

    #[arg(
        long,
        help = "Use semantic versioning, instead of a simple autoincrement"
    )]
    semver: bool,

    #[arg(
        long,
        value_enum,
        default_value_t = BumpType::Major,
        help = "When using semantic versioning, set the type of bump to perform"
    )]
    semver_bump_type: BumpType,

    #[arg(
        long,
        help = "Don't actually create the tag, just print the values that would be used"
    )]
    dry_run: bool,

    #[arg(long, help = "Repository name on GitHub (default: current directory name)")]
    component: Option<String>,
}

#[derive(clap::Args)]
struct NotifyCommand {
    #[arg(long, help = "Name of the component being released")]
    component: String,

    #[arg(long, help = "Version number of the release")]
    version: String,

    #[arg(long, help = "Path to file containing release notes")]
    release_notes_file: PathBuf,

    #[arg(long, help = "Slack bot OAuth token")]
    slack_bot_token: String,

    #[arg(long, help = "Slack channel ID to post to")]
    slack_channel_id: String,

    #[arg(
        long,
        help = "Don't actually send to Slack, just print what would be sent"
    )]
    dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum BumpType {
    Major,
    Minor,
    Patch,
}

impl From<BumpType> for VersionBump {
    fn from(bump: BumpType) -> Self {
        match bump {
            BumpType::Major => VersionBump::Major,
            BumpType::Minor => VersionBump::Minor,
            BumpType::Patch => VersionBump::Patch,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::msg_error(&format!("Cannot load configuration: {}", e));
            return ExitCode::FAILURE;
        }
    };

    let result = match args.command {
        Command::Tag(cmd) => tag(cmd, &config),
        Command::Notify(cmd) => notify(cmd, &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::msg_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn current_dir_name() -> Result<String> {
    let cwd = std::env::current_dir().context("Cannot determine the working directory")?;
    cwd.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .context("The working directory has no name to use as component")
}

fn tag(cmd: TagCommand, config: &Config) -> Result<()> {
    let component = match cmd.component {
        Some(component) => component,
        None => current_dir_name()?,
    };

    let repo = Git2Repository::open(".")?;
    let forge = GitHubClient::new(GitHubClientConfig {
        api_url: config.forge.api_url.clone(),
        owner: config.forge.owner.clone(),
        repo: component.clone(),
        token: cmd.token,
        timeout: config.forge.timeout(),
    })?;

    let args = TagArgs {
        version: cmd.version,
        base: cmd.base,
        semver_bump: cmd.semver.then(|| cmd.semver_bump_type.into()),
        dry_run: cmd.dry_run,
        component,
    };

    let today = chrono::Local::now().date_naive();
    match run_tag_workflow(&args, config, &repo, &forge, today)? {
        TagOutcome::NothingToRelease => log::debug!("Nothing to release"),
        TagOutcome::Released { tag, state, .. } => log::debug!("{} ended in {:?}", tag.name, state),
    }
    Ok(())
}

fn notify(cmd: NotifyCommand, config: &Config) -> Result<()> {
    let chat = SlackClient::new(SlackClientConfig {
        api_url: config.chat.api_url.clone(),
        bot_token: cmd.slack_bot_token,
        timeout: config.chat.timeout(),
    })?;

    let args = NotifyArgs {
        component: cmd.component,
        version: cmd.version,
        release_notes_file: cmd.release_notes_file,
        slack_channel_id: cmd.slack_channel_id,
        dry_run: cmd.dry_run,
    };

    match run_notify_workflow(&args, config, &chat) {
        Ok(receipt) => {
            log::debug!("Posted to {} at {}", receipt.channel, receipt.ts);
            ui::msg_ok("Release notification sent successfully!");
            Ok(())
        }
        Err(e) => Err(anyhow::Error::new(e).context("Failed to send release notification")),
    }
}
