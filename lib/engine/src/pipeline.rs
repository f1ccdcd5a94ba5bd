use crate::dispatcher::dispatch;
use neardup_client::{IndexHandle, RemoteIndexClient};
use neardup_core::{extract_duplicate_pairs, Cluster, ClusterBuilder, Error, Item, Result};
use std::time::Instant;
use tracing::{info, warn};

/// Tuning knobs for one deduplication run.
#[derive(Debug, Clone)]
pub struct DedupeConfig {
    /// Pairs strictly below this distance are duplicates. A distance equal
    /// to the threshold is NOT a duplicate.
    pub duplication_threshold: f64,
    /// Maximum number of remote calls in flight per pass.
    pub max_concurrency: usize,
}

impl Default for DedupeConfig {
    fn default() -> Self {
        Self {
            duplication_threshold: 0.05,
            max_concurrency: 20,
        }
    }
}

impl DedupeConfig {
    fn validate(&self) -> Result<()> {
        if !self.duplication_threshold.is_finite() || self.duplication_threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "duplication_threshold must be a non-negative number, got {}",
                self.duplication_threshold
            )));
        }
        Ok(())
    }
}

/// Result of a successful run. A failed index teardown after successful
/// clustering is reported here rather than discarding the clusters.
#[derive(Debug)]
pub struct DedupeOutcome {
    /// Disjoint clusters of mutually near-duplicate item keys. Items
    /// without any duplicate do not appear.
    pub clusters: Vec<Cluster>,
    pub cleanup_error: Option<Error>,
}

impl DedupeOutcome {
    fn empty() -> Self {
        Self {
            clusters: Vec::new(),
            cleanup_error: None,
        }
    }
}

/// Orchestrates one deduplication run against a remote index:
/// create index, insert all items, query each item's nearest neighbor
/// excluding itself, extract duplicate pairs, cluster them, delete the
/// index. The index is torn down best-effort on every exit path, and a
/// teardown failure never masks an earlier error.
pub struct Deduper<C> {
    client: C,
    config: DedupeConfig,
}

impl<C: RemoteIndexClient> Deduper<C> {
    pub fn new(client: C, config: DedupeConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Runs the full pipeline and returns the duplicate clusters.
    pub async fn deduplicate(&self, items: &[Item]) -> Result<DedupeOutcome> {
        self.config.validate()?;
        if items.len() < 2 {
            // Nothing can be a duplicate of anything; skip the remote
            // round trips entirely.
            return Ok(DedupeOutcome::empty());
        }

        let index = self
            .client
            .create_index()
            .await
            .map_err(|e| Error::IndexCreation(e.to_string()))?;

        match self.run(&index, items).await {
            Ok(clusters) => {
                let cleanup_error = self
                    .client
                    .delete_index(&index)
                    .await
                    .err()
                    .map(|e| Error::Cleanup(e.to_string()));
                if let Some(error) = &cleanup_error {
                    warn!("Index teardown failed after a successful run: {error}");
                }
                Ok(DedupeOutcome {
                    clusters,
                    cleanup_error,
                })
            }
            Err(error) => {
                if let Err(cleanup) = self.client.delete_index(&index).await {
                    warn!("Index teardown failed while aborting: {cleanup}");
                }
                Err(error)
            }
        }
    }

    async fn run(&self, index: &IndexHandle, items: &[Item]) -> Result<Vec<Cluster>> {
        let concurrency = self.config.max_concurrency;

        let started = Instant::now();
        let remote_ids = dispatch(items, concurrency, |item| self.client.insert(index, item)).await?;
        info!(
            "Inserted {} items in {:.2}s",
            items.len(),
            started.elapsed().as_secs_f64()
        );

        let started = Instant::now();
        let neighbors = dispatch(items, concurrency, |item| {
            self.client.query_nearest_excluding_self(index, item)
        })
        .await?;
        info!(
            "Queried {} items in {:.2}s",
            items.len(),
            started.elapsed().as_secs_f64()
        );

        let pairs = extract_duplicate_pairs(
            &remote_ids,
            &neighbors,
            self.config.duplication_threshold,
        );
        let clusters = ClusterBuilder::build(pairs);
        info!("Found {} duplicate clusters", clusters.len());
        Ok(clusters)
    }
}
