//! Graph adapter: the read-only view the engine and the BFS distribution
//! consume, with node identifiers fixed to `u64` and adjacency undirected.

use crate::error::Result;

/// A frozen, read-only graph with densely-enumerable `u64` node identifiers.
///
/// Implementors provide stable iteration order for [`Graph::nodes`] — two
/// calls during the lifetime of one engine must yield the same sequence —
/// and undirected adjacency: if `w` appears in `neighbours(v)`, `v` must
/// appear in `neighbours(w)`.
pub trait Graph {
    /// Enumerates all nodes in a stable order.
    fn nodes(&self) -> Vec<u64>;

    /// Enumerates `v`'s neighbours. Order is not required to be stable.
    fn neighbours(&self, v: u64) -> Vec<u64>;

    /// Encodes a node identifier into the canonical bytes the sketch hashes.
    ///
    /// The default is the 8-byte big-endian encoding of `v` itself, which is
    /// injective over `u64` and therefore always available; implementors
    /// working with external identifier spaces may override this to reject
    /// identifiers that don't round-trip, returning
    /// [`crate::error::DistanceError::EncodingUnavailable`].
    fn encode(&self, v: u64) -> Result<[u8; 8]> {
        Ok(v.to_be_bytes())
    }
}

/// A simple in-memory undirected graph backed by adjacency lists.
///
/// This is the concrete [`Graph`] a host builds once it has loaded or
/// generated a graph elsewhere; the engine never constructs one itself.
#[derive(Clone, Debug, Default)]
pub struct UndirectedGraph {
    adjacency: std::collections::BTreeMap<u64, Vec<u64>>,
}

impl UndirectedGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures `v` appears in the node set, even with no edges.
    pub fn add_node(&mut self, v: u64) {
        self.adjacency.entry(v).or_default();
    }

    /// Adds an undirected edge between `u` and `v`, and both endpoints as
    /// nodes if not already present. Adding the same edge twice is a no-op.
    pub fn add_edge(&mut self, u: u64, v: u64) {
        if u == v {
            self.adjacency.entry(u).or_default();
            return;
        }
        let uv = self.adjacency.entry(u).or_default();
        if !uv.contains(&v) {
            uv.push(v);
        }
        let vu = self.adjacency.entry(v).or_default();
        if !vu.contains(&u) {
            vu.push(u);
        }
    }

    /// Returns the number of distinct nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }
}

impl Graph for UndirectedGraph {
    fn nodes(&self) -> Vec<u64> {
        self.adjacency.keys().copied().collect()
    }

    fn neighbours(&self, v: u64) -> Vec<u64> {
        self.adjacency.get(&v).cloned().unwrap_or_default()
    }
}
