//! Deterministic graph generators shared by the integration test binaries.
//!
//! Mirrors the generators used by the crate's own unit tests; duplicated
//! here because `tests/*.rs` binaries compile against the public API only
//! and cannot reach the library's `#[cfg(test)]` helpers.

use hyperball::graph::UndirectedGraph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn complete_graph(n: u64) -> UndirectedGraph {
    let mut g = UndirectedGraph::new();
    for u in 0..n {
        g.add_node(u);
        for v in (u + 1)..n {
            g.add_edge(u, v);
        }
    }
    g
}

pub fn erdos_renyi(n: u64, p: f64, seed: u64) -> UndirectedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = UndirectedGraph::new();
    for u in 0..n {
        g.add_node(u);
    }
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.random::<f64>() < p {
                g.add_edge(u, v);
            }
        }
    }
    g
}

pub fn barabasi_albert(n: u64, m: u64, seed: u64) -> UndirectedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = UndirectedGraph::new();
    let mut targets: Vec<u64> = (0..m).collect();
    for &u in &targets {
        g.add_node(u);
    }

    let mut repeated_nodes: Vec<u64> = Vec::new();
    let mut source = m;
    while source < n {
        g.add_node(source);
        for &t in &targets {
            g.add_edge(source, t);
        }
        repeated_nodes.extend(targets.iter().copied());
        repeated_nodes.extend(std::iter::repeat(source).take(targets.len()));

        targets.clear();
        while targets.len() < m as usize && !repeated_nodes.is_empty() {
            let idx = rng.random_range(0..repeated_nodes.len());
            let candidate = repeated_nodes[idx];
            if candidate != source && !targets.contains(&candidate) {
                targets.push(candidate);
            }
        }
        source += 1;
    }
    g
}
