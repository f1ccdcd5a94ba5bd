//! Core data model and algorithms for near-duplicate detection.
//!
//! This crate is pure and synchronous: it defines the items being
//! deduplicated, the duplicate-pair extraction over raw nearest-neighbor
//! results, and the incremental clustering of pairs into disjoint groups.
//! Talking to the remote similarity index lives in `neardup-client`;
//! concurrency and orchestration live in `neardup-engine`.

pub mod cluster;
pub mod error;
pub mod item;
pub mod pairs;

pub use cluster::{Cluster, ClusterBuilder};
pub use error::{Error, Result};
pub use item::{Item, ItemKey, NeighborResult, RemoteId};
pub use pairs::{extract_duplicate_pairs, DuplicatePair};
