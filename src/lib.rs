//! # neardup
//!
//! Near-duplicate detection backed by a remote similarity-search index.
//!
//! neardup finds clusters of near-duplicate items (images in the bundled
//! CLI, but the engine is modality-agnostic) by delegating pairwise
//! similarity to a remote nearest-neighbor index and consolidating the
//! results into disjoint clusters of mutually similar items.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! cargo install neardup
//! neardup ./photos --threshold 0.05 --client-id ... --client-secret ...
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use neardup::prelude::*;
//!
//! # async fn run() -> neardup_core::Result<()> {
//! // Any RemoteIndexClient works; MemoryIndexClient needs no network.
//! let client = MemoryIndexClient::numeric();
//! let deduper = Deduper::new(client, DedupeConfig::default());
//!
//! let items = vec![
//!     Item::new("a", "1.00"),
//!     Item::new("b", "1.01"),
//!     Item::new("c", "9.00"),
//! ];
//! let outcome = deduper.deduplicate(&items).await?;
//! for cluster in outcome.clusters {
//!     println!("{cluster:?}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! - [`neardup-core`](https://docs.rs/neardup-core) - data model, pair
//!   extraction, incremental clustering
//! - [`neardup-client`](https://docs.rs/neardup-client) - remote index
//!   clients (hosted HTTP API, in-memory fake) and payload encoding
//! - [`neardup-engine`](https://docs.rs/neardup-engine) - bounded-concurrency
//!   dispatch and pipeline orchestration

// Re-export core types
pub use neardup_core::{
    extract_duplicate_pairs, Cluster, ClusterBuilder, DuplicatePair, Error, Item, ItemKey,
    NeighborResult, RemoteId, Result,
};

// Re-export clients
pub use neardup_client::{
    ClientError, HttpConfig, HttpIndexClient, IndexHandle, MemoryIndexClient, RemoteIndexClient,
};

// Re-export the engine
pub use neardup_engine::{dispatch, DedupeConfig, DedupeOutcome, Deduper};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ClientError, Cluster, ClusterBuilder, DedupeConfig, DedupeOutcome, Deduper, DuplicatePair,
        Error, HttpConfig, HttpIndexClient, IndexHandle, Item, ItemKey, MemoryIndexClient,
        NeighborResult, RemoteId, RemoteIndexClient, Result,
    };
}

/// Payload encoding helpers for the image use case
pub mod encode {
    pub use neardup_client::encode::image_data_uri;
}
