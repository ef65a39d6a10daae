use thiserror::Error;

/// Unified error type for release-bot operations
#[derive(Error, Debug)]
pub enum ReleaseBotError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Forge API error: {0}")]
    Forge(String),

    #[error("Chat API error: {0}")]
    Chat(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in release-bot
pub type Result<T> = std::result::Result<T, ReleaseBotError>;

impl ReleaseBotError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseBotError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseBotError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ReleaseBotError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ReleaseBotError::Remote(msg.into())
    }

    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        ReleaseBotError::Forge(msg.into())
    }

    /// Create a chat error with context
    pub fn chat(msg: impl Into<String>) -> Self {
        ReleaseBotError::Chat(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseBotError::config("no channel id");
        assert_eq!(err.to_string(), "Configuration error: no channel id");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseBotError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let err: ReleaseBotError = toml_err.into();
        assert!(err.to_string().starts_with("Invalid configuration file"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseBotError::config("x"), "Configuration error"),
            (ReleaseBotError::version("x"), "Version parsing error"),
            (ReleaseBotError::tag("x"), "Tag error"),
            (ReleaseBotError::remote("x"), "Remote operation failed"),
            (ReleaseBotError::forge("x"), "Forge API error"),
            (ReleaseBotError::chat("x"), "Chat API error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_error_keeps_message_verbatim() {
        let err = ReleaseBotError::chat("channel_not_found");
        assert!(err.to_string().ends_with("channel_not_found"));
    }
}
