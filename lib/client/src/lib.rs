//! Clients for the remote similarity index used by the neardup engine.
//!
//! The engine only needs four operations from the remote side: create an
//! index, insert an item, query an item's nearest neighbor excluding
//! itself, and delete the index. [`RemoteIndexClient`] captures exactly
//! that surface; [`HttpIndexClient`] implements it against a hosted
//! search API and [`MemoryIndexClient`] implements it in-process for
//! tests and offline runs.

pub mod encode;
pub mod error;
pub mod http;
pub mod memory;
pub mod remote;

pub use error::ClientError;
pub use http::{HttpConfig, HttpIndexClient};
pub use memory::MemoryIndexClient;
pub use remote::{IndexHandle, RemoteIndexClient};
