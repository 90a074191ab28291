use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid backend url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("failed to read catalog '{path}': {source}")]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse catalog '{path}': {source}")]
    CatalogParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("catalog entry is missing its {field}")]
    CatalogEntryIncomplete { field: &'static str },
}
