//! Ground-truth distance distribution via per-source breadth-first search.
//!
//! This is a validation oracle, not part of the estimation core: it is
//! exact, and exact shortest-path computation over every source is the
//! thing HyperBall exists to avoid doing at scale.

use crate::accumulator::FrequencyAccumulator;
use crate::graph::Graph;
use std::collections::{HashMap, VecDeque};

/// Runs a single-source BFS from `source`, returning the distance from
/// `source` to every node it can reach (including `source` itself, at
/// distance 0).
fn bfs_from_single_source<G: Graph>(graph: &G, source: u64) -> HashMap<u64, usize> {
    let mut distances = HashMap::new();
    let mut queue = VecDeque::new();
    distances.insert(source, 0);
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        let d = distances[&v];
        for w in graph.neighbours(v) {
            if !distances.contains_key(&w) {
                distances.insert(w, d + 1);
                queue.push_back(w);
            }
        }
    }
    distances
}

/// Computes the exact distance distribution of `graph` over ordered node
/// pairs, excluding self-pairs.
///
/// Runs a BFS from every node, accumulates every reached distance, then
/// drops the distance-0 (self) mass and halves the remainder to undo the
/// double count each unordered pair contributes (once from each endpoint).
pub fn distance_distribution<G: Graph>(graph: &G) -> FrequencyAccumulator {
    let nodes = graph.nodes();
    let mut acc = FrequencyAccumulator::new(0);

    for &s in &nodes {
        let distances = bfs_from_single_source(graph, s);
        for &d in distances.values() {
            acc.add_one(d);
        }
    }

    acc.clear_zero();
    acc.half();
    acc
}
