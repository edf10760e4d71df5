//! Channel-backed stream pipelines with fan-out, plus a fluent in-memory
//! sequence wrapper.
//!
//! A [`Stream`] pipes a finite ordered sequence through a chain of worker
//! stages connected by rendezvous channels: each send blocks until the next
//! stage is ready, so backpressure propagates all the way back to the
//! source. Dropping a downstream receiver cancels the upstream chain, and
//! the terminal operations join every stage thread before returning.
//!
//! # Features
//!
//! - Chainable stages: `filter`, `map`, `flat_map`, `limit`
//! - Fan-out across K racing workers with `parallel` (unordered by design)
//! - Terminal `reduce` (left-fold) and `collect`
//! - Per-stage counters and closure latency percentiles via [`PipelineStats`]
//! - Panics in caller closures surface as [`PipelineError::StagePanicked`]
//! - [`Sequence`]: the same operations over a plain vector, single-threaded,
//!   with `Option`-returning accessors
//!
//! # Example
//!
//! ```
//! use flowline::Stream;
//!
//! let evens = Stream::from_vec((1..=10).collect::<Vec<i32>>())
//!     .filter(|n| n % 2 == 0)
//!     .map(|n| n * 10)
//!     .collect()
//!     .unwrap();
//! assert_eq!(evens, vec![20, 40, 60, 80, 100]);
//! ```

pub mod error;
pub mod seq;
pub mod stats;
pub mod stream;

// Re-exports for convenience
pub use error::{PipelineError, Result};
pub use seq::Sequence;
pub use stats::{PipelineStats, StageSnapshot, StageStats};
pub use stream::Stream;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
