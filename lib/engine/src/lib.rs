//! The neardup deduplication engine: bounded-concurrency dispatch of
//! remote index calls and the pipeline that turns raw nearest-neighbor
//! responses into disjoint duplicate clusters.

pub mod dispatcher;
pub mod pipeline;

pub use dispatcher::dispatch;
pub use pipeline::{DedupeConfig, DedupeOutcome, Deduper};
