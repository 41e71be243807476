//! Distance-distribution estimation for large graphs via HyperBall, a
//! breadth-synchronous ball-expansion algorithm built on HyperLogLog
//! cardinality sketches.
//!
//! The crate is organized around five collaborating pieces:
//!
//! - [`accumulator`] — a sparse non-negative histogram shared by the engine
//!   and the ground-truth BFS routine.
//! - [`sketch`] — the HyperLogLog cardinality sketch.
//! - [`engine`] — the HyperBall iteration itself.
//! - [`bfs`] — exact per-source BFS, used only to validate accuracy.
//! - [`graph`] — the read-only adjacency seam a host implements.
//!
//! # Example
//!
//! ```
//! use hyperball::{Engine, UndirectedGraph};
//!
//! let mut graph = UndirectedGraph::new();
//! graph.add_edge(0, 1);
//! graph.add_edge(1, 2);
//!
//! let mut engine = Engine::new(10, graph).unwrap();
//! engine.run().unwrap();
//! let avg_distance = engine.distribution().avg().unwrap();
//! assert!(avg_distance > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accumulator;
pub mod bfs;
pub mod engine;
pub mod error;
pub mod graph;
pub mod hash;
pub mod sketch;
pub mod traits;
pub mod validation;

pub use accumulator::FrequencyAccumulator;
pub use engine::Engine;
pub use error::{DistanceError, Result};
pub use graph::{Graph, UndirectedGraph};
pub use sketch::HllSketch;
pub use traits::{Mergeable, Sketch};
