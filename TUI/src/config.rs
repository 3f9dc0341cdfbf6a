//! Application configuration and constants.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::catalog::ColumnNames;
use crate::error::ConfigError;
use crate::loader::ThemeSource;

pub const USAGE: &str = "\
Usage: chat-gacha [OPTIONS]

Options:
  -t, --themes <PATH|URL>   Topics CSV to load (default: ./themes.csv)
  -c, --config <FILE>       JSON config file; flags override its values
      --genre-column <NAME> Header of the genre column (default: genre)
      --topic-column <NAME> Header of the topic column (default: topic)
      --log-file <PATH>     Where to write logs (default: <tmp>/chat-gacha.log)
  -h, --help                Show this message

Keys: Space/Enter start or stop, q/Esc quit";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path or http(s) URL of the topics CSV
    pub themes: String,

    /// Header names of the two required columns
    pub genre_column: String,
    pub topic_column: String,

    /// Period of the spinning redraw in milliseconds
    pub spin_interval_ms: u64,

    /// Frame tick for the loading spinner and redraws (~20 FPS)
    pub frame_rate_ms: u64,

    /// Pixel width assumed per terminal column when applying breakpoints
    pub cell_width_px: u16,

    /// How many frames to show status messages (60 = ~3s at 50ms)
    pub status_timeout_ticks: u64,

    /// Log destination; `None` means `<temp dir>/chat-gacha.log`
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let columns = ColumnNames::default();
        Self {
            themes: "./themes.csv".to_string(),
            genre_column: columns.genre,
            topic_column: columns.topic,
            spin_interval_ms: 80,
            frame_rate_ms: 50,
            cell_width_px: 8,
            status_timeout_ticks: 60,
            log_file: None,
        }
    }
}

/// Outcome of reading the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Run(Config),
    Help,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses arguments (without the program name). A `--config` file is
    /// applied first wherever it appears; the other flags override it.
    pub fn from_args<I, S>(args: I) -> Result<Invocation, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        let mut config = Config::default();
        let mut overrides: Vec<(String, String)> = Vec::new();
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Invocation::Help),
                "-t" | "--themes" | "-c" | "--config" | "--genre-column" | "--topic-column"
                | "--log-file" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    if arg == "-c" || arg == "--config" {
                        config = Config::from_file(Path::new(&value))?;
                    } else {
                        overrides.push((arg, value));
                    }
                }
                _ => return Err(ConfigError::UnknownOption(arg)),
            }
        }

        for (option, value) in overrides {
            if value.is_empty() {
                return Err(ConfigError::InvalidValue { option, value });
            }
            match option.as_str() {
                "-t" | "--themes" => config.themes = value,
                "--genre-column" => config.genre_column = value,
                "--topic-column" => config.topic_column = value,
                "--log-file" => config.log_file = Some(PathBuf::from(value)),
                _ => {}
            }
        }

        config.validate()?;
        Ok(Invocation::Run(config))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |option: &str, value: String| ConfigError::InvalidValue {
            option: option.to_string(),
            value,
        };
        if self.genre_column == self.topic_column {
            return Err(invalid("topic_column", self.topic_column.clone()));
        }
        if self.spin_interval_ms == 0 {
            return Err(invalid("spin_interval_ms", "0".to_string()));
        }
        if self.frame_rate_ms == 0 {
            return Err(invalid("frame_rate_ms", "0".to_string()));
        }
        if self.cell_width_px == 0 {
            return Err(invalid("cell_width_px", "0".to_string()));
        }
        Ok(())
    }

    pub fn source(&self) -> ThemeSource {
        ThemeSource::parse(&self.themes)
    }

    pub fn columns(&self) -> ColumnNames {
        ColumnNames {
            genre: self.genre_column.clone(),
            topic: self.topic_column.clone(),
        }
    }

    pub fn spin_interval(&self) -> Duration {
        Duration::from_millis(self.spin_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_rate_ms)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("chat-gacha.log"))
    }
}
