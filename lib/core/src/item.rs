use serde::{Deserialize, Serialize};

/// Stable external identity of a deduplication candidate, e.g. a file path
/// or dataset-local id.
pub type ItemKey = String;

/// One deduplication candidate: a key plus the payload sent to the remote
/// index (for images, a base64 data URI; any string the service accepts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub key: ItemKey,
    pub payload: String,
}

impl Item {
    pub fn new(key: impl Into<ItemKey>, payload: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            payload: payload.into(),
        }
    }
}

/// Opaque identifier assigned by the remote index when an item is inserted.
/// The item-key to remote-id mapping is bijective for the lifetime of one
/// pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteId(String);

impl RemoteId {
    pub fn new(id: impl Into<String>) -> Self {
        RemoteId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RemoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RemoteId {
    fn from(s: String) -> Self {
        RemoteId(s)
    }
}

impl From<&str> for RemoteId {
    fn from(s: &str) -> Self {
        RemoteId(s.to_string())
    }
}

/// The nearest stored sample for a queried item, excluding the item's own
/// entry. Distance is non-negative; smaller means more similar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborResult {
    pub neighbor: RemoteId,
    pub distance: f64,
}

impl NeighborResult {
    pub fn new(neighbor: impl Into<RemoteId>, distance: f64) -> Self {
        Self {
            neighbor: neighbor.into(),
            distance,
        }
    }
}
