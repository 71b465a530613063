//! The chain graph.
//!
//! An immutable undirected graph over chain ids. It fixes which chains are
//! adjacent and thus between which pairs a header may carry an
//! adjacent-parent link. Diameters of graphs used in practice are small,
//! so every shortest path is short.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::{ChainError, ChainId};

/// An immutable undirected graph over [`ChainId`]s.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ChainGraph {
    adjacency: BTreeMap<ChainId, BTreeSet<ChainId>>,
}

impl ChainGraph {
    /// Build a graph from an undirected edge list.
    ///
    /// Every endpoint becomes a vertex. Self-loops are rejected; duplicate
    /// edges collapse.
    pub fn new(
        edges: impl IntoIterator<Item = (ChainId, ChainId)>,
    ) -> Result<Self, ChainError> {
        let mut adjacency: BTreeMap<ChainId, BTreeSet<ChainId>> = BTreeMap::new();
        for (a, b) in edges {
            if a == b {
                return Err(ChainError::InvalidGraph(format!(
                    "self-loop on chain {}",
                    a
                )));
            }
            adjacency.entry(a).or_default().insert(b);
            adjacency.entry(b).or_default().insert(a);
        }
        if adjacency.is_empty() {
            return Err(ChainError::InvalidGraph("graph has no edges".to_string()));
        }
        Ok(ChainGraph { adjacency })
    }

    /// The complete graph over chain ids `0..n`: every pair adjacent.
    pub fn complete(n: u32) -> Self {
        let edges = (0..n).flat_map(|a| {
            (a + 1..n).map(move |b| (ChainId::new(a), ChainId::new(b)))
        });
        Self::new(edges).expect("complete graph over n >= 2 chains is valid")
    }

    /// The cycle graph over chain ids `0..n`.
    pub fn cycle(n: u32) -> Self {
        let edges = (0..n).map(|a| (ChainId::new(a), ChainId::new((a + 1) % n)));
        Self::new(edges).expect("cycle over n >= 3 chains is valid")
    }

    /// All chains in the graph, in ascending order.
    pub fn chains(&self) -> impl Iterator<Item = ChainId> + '_ {
        self.adjacency.keys().copied()
    }

    /// The number of chains.
    pub fn size(&self) -> usize {
        self.adjacency.len()
    }

    /// Whether the graph contains the given chain.
    pub fn contains(&self, chain: ChainId) -> bool {
        self.adjacency.contains_key(&chain)
    }

    /// The chains adjacent to `chain`, in ascending order.
    pub fn adjacent(&self, chain: ChainId) -> Result<&BTreeSet<ChainId>, ChainError> {
        self.adjacency
            .get(&chain)
            .ok_or(ChainError::UnknownChain(chain))
    }

    /// The shortest path from `from` to `to` as the sequence of chains
    /// stepped into, ending with `to`; empty when `from == to`.
    ///
    /// Deterministic: breadth-first search visiting neighbors in ascending
    /// chain-id order, so ties always resolve to the path whose next hop
    /// has the smallest id.
    pub fn shortest_path(
        &self,
        from: ChainId,
        to: ChainId,
    ) -> Result<Vec<ChainId>, ChainError> {
        if !self.contains(from) {
            return Err(ChainError::UnknownChain(from));
        }
        if !self.contains(to) {
            return Err(ChainError::UnknownChain(to));
        }
        if from == to {
            return Ok(Vec::new());
        }

        let mut predecessor: BTreeMap<ChainId, ChainId> = BTreeMap::new();
        let mut queue = VecDeque::from([from]);
        'search: while let Some(current) = queue.pop_front() {
            for &next in &self.adjacency[&current] {
                if next == from || predecessor.contains_key(&next) {
                    continue;
                }
                predecessor.insert(next, current);
                if next == to {
                    break 'search;
                }
                queue.push_back(next);
            }
        }

        if !predecessor.contains_key(&to) {
            return Err(ChainError::NoRoute(from, to));
        }
        let mut path = vec![to];
        let mut current = to;
        while let Some(&prev) = predecessor.get(&current) {
            if prev == from {
                break;
            }
            path.push(prev);
            current = prev;
        }
        path.reverse();
        Ok(path)
    }
}
