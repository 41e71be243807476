//! The HyperBall iteration engine: breadth-synchronous ball expansion over
//! every node, producing a distance-distribution accumulator.

use crate::accumulator::FrequencyAccumulator;
use crate::error::Result;
use crate::graph::Graph;
use crate::sketch::HllSketch;
use crate::traits::{Mergeable, Sketch};
use rayon::prelude::*;
use std::collections::HashMap;

/// The previous iteration's output for one node, staged so that every node's
/// update within an iteration observes a consistent snapshot of the prior
/// one.
#[derive(Clone, Debug)]
struct DiskEntry {
    sketch: Option<HllSketch>,
    last_estimate: f64,
    changed: bool,
}

/// Runs HyperBall over a [`Graph`], accumulating a distance distribution.
///
/// Construct with [`Engine::new`], drive to a fixed point with [`Engine::run`]
/// (single-threaded) or [`Engine::run_parallel`] (worker-pool per iteration),
/// then read [`Engine::distribution`].
pub struct Engine<G: Graph> {
    precision: u8,
    graph: G,
    nodes: Vec<u64>,
    #[allow(dead_code)]
    index_of: HashMap<u64, usize>,
    neighbour_indices: Vec<Vec<usize>>,
    current: Vec<HllSketch>,
    disk: Vec<DiskEntry>,
    accumulator: FrequencyAccumulator,
    iteration: usize,
    converged: bool,
}

impl<G: Graph> Engine<G> {
    /// Builds an engine over `graph` with HLL precision `precision`, seeding
    /// one sketch per node with that node's own encoded identifier.
    ///
    /// # Errors
    /// Returns [`crate::error::DistanceError::PrecisionOutOfRange`] if
    /// `precision` is outside `[4, 16]`, or
    /// [`crate::error::DistanceError::EncodingUnavailable`] if the graph
    /// cannot encode one of its node identifiers.
    pub fn new(precision: u8, graph: G) -> Result<Self> {
        let nodes = graph.nodes();
        let n = nodes.len();

        let mut index_of = HashMap::with_capacity(n);
        for (i, &v) in nodes.iter().enumerate() {
            index_of.insert(v, i);
        }

        let mut current = Vec::with_capacity(n);
        for &v in &nodes {
            let mut sketch = HllSketch::new(precision)?;
            let bytes = graph.encode(v)?;
            sketch.add(&bytes);
            current.push(sketch);
        }

        let neighbour_indices: Vec<Vec<usize>> = nodes
            .iter()
            .map(|&v| {
                graph
                    .neighbours(v)
                    .into_iter()
                    .filter_map(|w| index_of.get(&w).copied())
                    .collect()
            })
            .collect();

        // `last_estimate` is seeded from each node's own singleton-sketch
        // estimate (its radius-0 ball), not zero, so a node whose ball never
        // expands past itself (e.g. it has no neighbours) contributes a
        // delta of exactly zero rather than charging its self-mass as
        // growth on the first iteration.
        let disk: Vec<DiskEntry> = current
            .iter()
            .map(|sketch| DiskEntry {
                sketch: None,
                last_estimate: sketch.estimate(),
                changed: true,
            })
            .collect();

        Ok(Self {
            precision,
            graph,
            nodes,
            index_of,
            neighbour_indices,
            current,
            disk,
            accumulator: FrequencyAccumulator::new(0),
            iteration: 1,
            converged: false,
        })
    }

    /// Returns the HLL precision this engine was constructed with.
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Returns the number of nodes captured at construction.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of completed iterations so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Returns a read-only view of the accumulated distance distribution.
    pub fn distribution(&self) -> &FrequencyAccumulator {
        &self.accumulator
    }

    /// Gives back the graph this engine was built over.
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Drives the engine to a fixed point on the caller's thread.
    ///
    /// Idempotent: once every sketch has saturated, a further call performs
    /// zero iterations.
    pub fn run(&mut self) -> Result<()> {
        while !self.converged {
            log::debug!("iteration {} over {} nodes (sequential)", self.iteration, self.nodes.len());
            let outputs: Vec<(DiskEntry, f64)> =
                (0..self.nodes.len()).map(|i| self.process_node(i)).collect();
            self.apply_outputs(outputs);
        }
        Ok(())
    }

    /// Installs one iteration's outputs: accumulates deltas, overwrites
    /// `disk`, swaps `current` to the newly-installed sketches, and updates
    /// convergence state. Shared by the sequential and parallel drivers.
    fn apply_outputs(&mut self, outputs: Vec<(DiskEntry, f64)>) {
        let mut any_changed = false;
        for (i, (entry, delta)) in outputs.into_iter().enumerate() {
            log::trace!("node {} delta={}", i, delta);
            any_changed |= entry.changed;
            self.accumulator.add(self.iteration, delta);
            self.disk[i] = entry;
        }

        for i in 0..self.nodes.len() {
            self.current[i] = self.disk[i]
                .sketch
                .clone()
                .expect("a disk entry always carries a sketch after its first iteration");
        }

        self.iteration += 1;
        self.converged = !any_changed;
    }

    /// Processes one node against the frozen `current` snapshot, producing
    /// its next disk entry and the estimate delta to accumulate.
    fn process_node(&self, i: usize) -> (DiskEntry, f64) {
        if !self.disk[i].changed {
            return (self.disk[i].clone(), 0.0);
        }

        let mut a = self.current[i].copy();
        let mut changed = false;
        for &w in &self.neighbour_indices[i] {
            let union_changed = a
                .union_in_place(&self.current[w])
                .expect("sketches constructed by the same engine always share precision");
            changed |= union_changed;
        }

        let estimate = a.estimate();
        let delta = estimate - self.disk[i].last_estimate;
        (
            DiskEntry {
                sketch: Some(a),
                last_estimate: estimate,
                changed,
            },
            delta,
        )
    }
}

impl<G: Graph + Sync> Engine<G> {
    /// Drives the engine to a fixed point, processing each iteration's
    /// nodes across a worker pool.
    ///
    /// Produces the same accumulator as [`Engine::run`] on the same graph,
    /// precision, and hash, modulo floating-point addition order (applied
    /// by the coordinator in node-index order either way, so it matches
    /// exactly in practice).
    pub fn run_parallel(&mut self) -> Result<()> {
        while !self.converged {
            log::debug!("iteration {} over {} nodes (parallel)", self.iteration, self.nodes.len());
            let this = &*self;
            let outputs: Vec<(DiskEntry, f64)> = (0..this.nodes.len())
                .into_par_iter()
                .map(|i| this.process_node(i))
                .collect();
            self.apply_outputs(outputs);
        }
        Ok(())
    }
}
