use crate::item::ItemKey;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to create remote index: {0}")]
    IndexCreation(String),

    #[error("Remote operation failed for item '{key}': {cause}")]
    ItemOperation { key: ItemKey, cause: String },

    #[error("Failed to delete remote index: {0}")]
    Cleanup(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Wraps a per-item remote failure, labeling it with the item it
    /// belongs to.
    pub fn item_operation<E: std::fmt::Display>(key: impl Into<ItemKey>, cause: E) -> Self {
        Error::ItemOperation {
            key: key.into(),
            cause: cause.to_string(),
        }
    }
}
