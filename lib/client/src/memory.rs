use crate::error::ClientError;
use crate::remote::{IndexHandle, RemoteIndexClient};
use ahash::AHashMap;
use async_trait::async_trait;
use neardup_core::{Item, ItemKey, NeighborResult, RemoteId};
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

/// Distance between two item payloads; non-negative, smaller is closer.
pub type PayloadMetric = Arc<dyn Fn(&str, &str) -> f64 + Send + Sync>;

struct StoredSample {
    remote_id: RemoteId,
    key: ItemKey,
    payload: String,
}

#[derive(Default)]
struct MemoryIndex {
    samples: Vec<StoredSample>,
}

/// In-process [`RemoteIndexClient`] with a pluggable payload metric.
///
/// Stands in for the hosted service in tests and offline runs. Queries
/// scan all stored samples, excluding entries inserted under the queried
/// item's own key, and return the closest remaining sample.
pub struct MemoryIndexClient {
    indexes: RwLock<AHashMap<String, MemoryIndex>>,
    metric: PayloadMetric,
}

impl MemoryIndexClient {
    pub fn new(metric: PayloadMetric) -> Self {
        Self {
            indexes: RwLock::new(AHashMap::new()),
            metric,
        }
    }

    /// Client whose payloads are decimal numbers compared by absolute
    /// difference. Unparsable payloads are infinitely far from everything.
    pub fn numeric() -> Self {
        Self::new(Arc::new(|a, b| {
            match (a.parse::<f64>(), b.parse::<f64>()) {
                (Ok(a), Ok(b)) => (a - b).abs(),
                _ => f64::INFINITY,
            }
        }))
    }

    /// Number of live indexes; lets tests assert cleanup happened.
    pub fn index_count(&self) -> usize {
        self.indexes.read().len()
    }
}

#[async_trait]
impl RemoteIndexClient for MemoryIndexClient {
    async fn create_index(&self) -> Result<IndexHandle, ClientError> {
        let id = Uuid::new_v4().to_string();
        self.indexes.write().insert(id.clone(), MemoryIndex::default());
        Ok(IndexHandle::new(id))
    }

    async fn insert(&self, index: &IndexHandle, item: &Item) -> Result<RemoteId, ClientError> {
        let mut indexes = self.indexes.write();
        let index = indexes
            .get_mut(index.as_str())
            .ok_or_else(|| ClientError::IndexNotFound(index.to_string()))?;
        let remote_id = RemoteId::new(Uuid::new_v4().to_string());
        index.samples.push(StoredSample {
            remote_id: remote_id.clone(),
            key: item.key.clone(),
            payload: item.payload.clone(),
        });
        Ok(remote_id)
    }

    async fn query_nearest_excluding_self(
        &self,
        index: &IndexHandle,
        item: &Item,
    ) -> Result<NeighborResult, ClientError> {
        let indexes = self.indexes.read();
        let index = indexes
            .get(index.as_str())
            .ok_or_else(|| ClientError::IndexNotFound(index.to_string()))?;

        index
            .samples
            .iter()
            .filter(|sample| sample.key != item.key)
            .map(|sample| (sample, (self.metric)(&item.payload, &sample.payload)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(sample, distance)| NeighborResult::new(sample.remote_id.clone(), distance))
            .ok_or(ClientError::NoNeighbor)
    }

    async fn delete_index(&self, index: &IndexHandle) -> Result<(), ClientError> {
        self.indexes
            .write()
            .remove(index.as_str())
            .map(|_| ())
            .ok_or_else(|| ClientError::IndexNotFound(index.to_string()))
    }
}
