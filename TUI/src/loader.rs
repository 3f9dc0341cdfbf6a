// Topic catalog loading: fetch the CSV resource, then validate its rows.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::catalog::{ColumnNames, TopicCatalog, TopicRecord};
use crate::error::LoadError;

/// Where the topics CSV lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeSource {
    File(PathBuf),
    Url(String),
}

impl ThemeSource {
    /// `http://` and `https://` locations are fetched over the network,
    /// anything else is a filesystem path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            ThemeSource::Url(location.to_string())
        } else {
            ThemeSource::File(PathBuf::from(location))
        }
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        match self {
            ThemeSource::File(path) => tokio::fs::read(path)
                .await
                .map_err(|e| LoadError::transport(self.to_string(), e)),
            ThemeSource::Url(url) => {
                let response = reqwest::get(url)
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| LoadError::transport(self.to_string(), e))?;
                let body = response
                    .bytes()
                    .await
                    .map_err(|e| LoadError::transport(self.to_string(), e))?;
                Ok(body.to_vec())
            }
        }
    }
}

impl fmt::Display for ThemeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeSource::File(path) => write!(f, "{}", path.display()),
            ThemeSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Loads a [`TopicCatalog`] once per session. No retries.
#[derive(Debug, Clone)]
pub struct CsvThemeLoader {
    source: ThemeSource,
    columns: ColumnNames,
}

impl CsvThemeLoader {
    pub fn new(source: ThemeSource, columns: ColumnNames) -> Self {
        Self { source, columns }
    }

    pub async fn load(&self) -> Result<TopicCatalog, LoadError> {
        let bytes = match self.source.fetch().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(source = %self.source, error = %e, "topic retrieval failed");
                return Err(e);
            }
        };

        match parse_catalog(&bytes, &self.columns) {
            Ok(catalog) => {
                info!(source = %self.source, topics = catalog.len(), "loaded topic catalog");
                Ok(catalog)
            }
            Err(e) => {
                warn!(source = %self.source, error = %e, "topic CSV rejected");
                Err(e)
            }
        }
    }
}

/// Parses CSV-with-header bytes into a catalog.
///
/// Rows missing either column (short rows, or a header without the column)
/// come out with an empty field and are dropped by validation, so an input
/// with no usable rows yields an empty catalog rather than an error.
pub fn parse_catalog(bytes: &[u8], columns: &ColumnNames) -> Result<TopicCatalog, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| LoadError::Parse(e.to_string()))?
        .clone();
    let genre_idx = headers.iter().position(|h| h == columns.genre);
    let topic_idx = headers.iter().position(|h| h == columns.topic);
    if genre_idx.is_none() || topic_idx.is_none() {
        warn!(
            genre = %columns.genre,
            topic = %columns.topic,
            "header is missing a required column"
        );
    }

    let mut rows = 0usize;
    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| LoadError::Parse(e.to_string()))?;
        rows += 1;
        let field = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .unwrap_or_default()
                .to_string()
        };
        records.push(TopicRecord::new(field(genre_idx), field(topic_idx)));
    }

    let catalog = TopicCatalog::from_records(records);
    debug!(rows, kept = catalog.len(), dropped = rows - catalog.len(), "parsed topics CSV");
    Ok(catalog)
}
