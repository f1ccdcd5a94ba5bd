use crate::error::ClientError;
use async_trait::async_trait;
use neardup_core::{Item, NeighborResult, RemoteId};

/// Handle for one remote index, valid from `create_index` until
/// `delete_index`. The inner id is whatever the backing implementation
/// uses to address the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHandle(String);

impl IndexHandle {
    pub fn new(id: impl Into<String>) -> Self {
        IndexHandle(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IndexHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The capability surface the deduplication engine needs from a remote
/// nearest-neighbor index.
///
/// Implementations either succeed or surface a terminal error; any
/// retry/backoff or session renewal happens inside the implementation,
/// never in the engine. Implementations must not rely on process-global
/// state, so independent pipeline runs can use independent clients.
#[async_trait]
pub trait RemoteIndexClient: Send + Sync {
    /// Allocates a fresh index scoped to one pipeline run.
    async fn create_index(&self) -> Result<IndexHandle, ClientError>;

    /// Stores an item in the index and returns its remote id.
    async fn insert(&self, index: &IndexHandle, item: &Item) -> Result<RemoteId, ClientError>;

    /// Returns the stored sample nearest to `item`, excluding the item's
    /// own entry.
    async fn query_nearest_excluding_self(
        &self,
        index: &IndexHandle,
        item: &Item,
    ) -> Result<NeighborResult, ClientError>;

    /// Tears the index down. Idempotence is not required; deleting an
    /// unknown index may fail.
    async fn delete_index(&self, index: &IndexHandle) -> Result<(), ClientError>;
}
