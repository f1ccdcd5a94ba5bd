use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Unexpected status {status} from {endpoint}: {body}")]
    UnexpectedStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Search returned no neighbor other than the queried item")]
    NoNeighbor,

    #[error("Index not found: {0}")]
    IndexNotFound(String),

    #[error("Failed to encode media file {path}: {source}")]
    Media {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
