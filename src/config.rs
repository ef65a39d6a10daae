use crate::domain::POST_RELEASE_MARKER;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "releasebot.toml";

/// Represents the complete configuration for release-bot.
///
/// Every field has a default, so an empty file (or no file at all) yields a
/// working configuration for the osbuild organisation on GitHub and Slack.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub forge: ForgeConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub chat: ChatConfig,
}

fn default_owner() -> String {
    "osbuild".to_string()
}

fn default_forge_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_forge_web_url() -> String {
    "https://github.com".to_string()
}

fn default_pacing_ms() -> u64 {
    2000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_compact_components() -> Vec<String> {
    vec!["cockpit-composer".to_string()]
}

fn default_post_release_marker() -> String {
    POST_RELEASE_MARKER.to_string()
}

fn default_chat_api_url() -> String {
    "https://slack.com/api".to_string()
}

/// Where releases live and how the forge is queried.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ForgeConfig {
    /// Organisation or user owning the released repositories
    #[serde(default = "default_owner")]
    pub owner: String,

    #[serde(default = "default_forge_api_url")]
    pub api_url: String,

    /// Base of the browser-facing URLs used in announcements
    #[serde(default = "default_forge_web_url")]
    pub web_url: String,

    /// Pause between pull request searches, in milliseconds
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Git remote the release tag is pushed to
    #[serde(default = "default_remote")]
    pub remote: String,
}

impl ForgeConfig {
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ForgeConfig {
    fn default() -> Self {
        ForgeConfig {
            owner: default_owner(),
            api_url: default_forge_api_url(),
            web_url: default_forge_web_url(),
            pacing_ms: default_pacing_ms(),
            timeout_secs: default_timeout_secs(),
            remote: default_remote(),
        }
    }
}

/// Changelog rendering and release detection settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    /// Components whose changelog uses `- ` bullets instead of nested `  * `
    #[serde(default = "default_compact_components")]
    pub compact_components: Vec<String>,

    /// Subject of the automated commit that follows every release
    #[serde(default = "default_post_release_marker")]
    pub post_release_marker: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            compact_components: default_compact_components(),
            post_release_marker: default_post_release_marker(),
        }
    }
}

/// Chat backend used for release announcements.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChatConfig {
    #[serde(default = "default_chat_api_url")]
    pub api_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ChatConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        ChatConfig {
            api_url: default_chat_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Parse a configuration document
pub fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasebot.toml` in current directory
/// 3. `.releasebot.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_config.exists() {
            fs::read_to_string(user_config)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}
