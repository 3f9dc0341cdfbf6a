use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce a topic catalog. Either kind ends the session.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The CSV resource could not be retrieved at all.
    #[error("Could not load topics from {location}: {message}")]
    Transport { location: String, message: String },
    /// The resource was retrieved but the CSV tokenizer rejected it.
    #[error("Could not parse topics CSV: {0}")]
    Parse(String),
}

impl LoadError {
    pub fn transport(location: impl Into<String>, message: impl ToString) -> Self {
        LoadError::Transport {
            location: location.into(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown option: {0}. Run with --help for usage.")]
    UnknownOption(String),
    #[error("Option {0} requires a value")]
    MissingValue(String),
    #[error("Invalid value for {option}: {value}")]
    InvalidValue { option: String, value: String },
    #[error("Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed config file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message_names_location() {
        let err = LoadError::transport("./themes.csv", "No such file or directory");
        assert_eq!(
            err.to_string(),
            "Could not load topics from ./themes.csv: No such file or directory"
        );
    }

    #[test]
    fn test_parse_message_carries_diagnostic() {
        let err = LoadError::Parse("invalid utf-8 in record 2".to_string());
        assert!(err.to_string().contains("invalid utf-8 in record 2"));
    }
}
