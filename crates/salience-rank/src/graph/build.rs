//! Graph construction from a triple sequence.
//!
//! # Overview
//!
//! Each triple `(h, t, r)` becomes an edge `h → t` carrying relation `r`.
//! Nodes are exactly the heads and tails that appear, inserted in first-seen
//! order over the triple sequence so node indices are deterministic.
//!
//! ## Multigraph
//!
//! Parallel edges with different relation ids are kept distinctly, and
//! self-loops are kept. The input is expected to be de-duplicated already
//! (see [`TripleSet`]), so the edge count equals the triple count.
//!
//! ## Orientation
//!
//! Edges are always stored directed. An undirected graph is an
//! interpretation: metrics see `in ∪ out` as the neighbourhood of a node.
//! See [`Adjacency`].
//!
//! ## Fingerprint
//!
//! [`TripleGraph::content_hash`] is a BLAKE3 hash of the sorted edge list
//! and the orientation, so two graphs built from the same triples (in any
//! order) share a fingerprint.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use salience_core::{EntityId, RelationId, Triple, TripleSet};
use tracing::{debug, instrument};

// ---------------------------------------------------------------------------
// TripleGraph
// ---------------------------------------------------------------------------

/// A knowledge graph built from triples.
///
/// Node weights are entity ids, edge weights are relation ids.
#[derive(Debug, Clone)]
pub struct TripleGraph {
    /// Directed multigraph: nodes = entities, edges = head → tail.
    pub graph: DiGraph<EntityId, RelationId>,
    /// Mapping from entity id to petgraph `NodeIndex`.
    pub node_map: HashMap<EntityId, NodeIndex>,
    /// Whether metrics read edges as directed.
    pub directed: bool,
    /// BLAKE3 content hash of the edge set and orientation.
    pub content_hash: String,
}

impl TripleGraph {
    /// Build a graph from a de-duplicated triple set.
    #[must_use]
    #[instrument(skip(triples), fields(triples = triples.len()))]
    pub fn build(triples: &TripleSet, directed: bool) -> Self {
        Self::from_triples(triples.as_slice(), directed)
    }

    /// Build a graph from any triple slice. Repeated triples become parallel
    /// edges; use [`TripleGraph::build`] with a [`TripleSet`] for set semantics.
    #[must_use]
    pub fn from_triples(triples: &[Triple], directed: bool) -> Self {
        let mut graph = DiGraph::<EntityId, RelationId>::with_capacity(triples.len(), triples.len());
        let mut node_map: HashMap<EntityId, NodeIndex> = HashMap::new();

        for triple in triples {
            let head = *node_map
                .entry(triple.head)
                .or_insert_with(|| graph.add_node(triple.head));
            let tail = *node_map
                .entry(triple.tail)
                .or_insert_with(|| graph.add_node(triple.tail));
            graph.add_edge(head, tail, triple.relation);
        }

        let content_hash = compute_edge_hash(triples, directed);

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            directed,
            "built triple graph"
        );

        Self {
            graph,
            node_map,
            directed,
            content_hash,
        }
    }

    /// Return the number of nodes (entities) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of edges (triples) in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    /// Look up the `NodeIndex` for an entity.
    #[must_use]
    pub fn node_index(&self, entity: EntityId) -> Option<NodeIndex> {
        self.node_map.get(&entity).copied()
    }

    /// Return the entity stored at a node.
    #[must_use]
    pub fn entity(&self, idx: NodeIndex) -> Option<EntityId> {
        self.graph.node_weight(idx).copied()
    }

    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.node_map.contains_key(&entity)
    }

    /// Entities in node-index (first-seen) order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.graph.node_weights().copied()
    }

    /// Relation ids on all edges from `head` to `tail`, in insertion order.
    #[must_use]
    pub fn relations_between(&self, head: EntityId, tail: EntityId) -> Vec<RelationId> {
        let (Some(h), Some(t)) = (self.node_index(head), self.node_index(tail)) else {
            return Vec::new();
        };
        let mut rels: Vec<(usize, RelationId)> = self
            .graph
            .edges_connecting(h, t)
            .map(|e| (e.id().index(), *e.weight()))
            .collect();
        rels.sort_unstable_by_key(|(idx, _)| *idx);
        rels.into_iter().map(|(_, r)| r).collect()
    }

    /// De-duplicated neighbour lists in this graph's orientation.
    #[must_use]
    pub fn adjacency(&self) -> Adjacency {
        Adjacency::from_graph(self)
    }
}

// ---------------------------------------------------------------------------
// Adjacency
// ---------------------------------------------------------------------------

/// Simple-graph view of a [`TripleGraph`], indexed by node index.
///
/// Parallel edges collapse to one neighbour entry. A self-loop makes a node
/// its own neighbour. For undirected graphs `successors == predecessors`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    /// `successors[v]`: nodes `w` with an edge `v → w` (or `v — w`).
    pub successors: Vec<Vec<usize>>,
    /// `predecessors[v]`: nodes `u` with an edge `u → v` (or `u — v`).
    pub predecessors: Vec<Vec<usize>>,
}

impl Adjacency {
    fn from_graph(g: &TripleGraph) -> Self {
        let n = g.node_count();
        let mut successors = Vec::with_capacity(n);
        let mut predecessors = Vec::with_capacity(n);

        for v in g.graph.node_indices() {
            let out = collect_unique(g.graph.neighbors_directed(v, Direction::Outgoing));
            let inc = collect_unique(g.graph.neighbors_directed(v, Direction::Incoming));
            if g.directed {
                successors.push(out);
                predecessors.push(inc);
            } else {
                let both = collect_unique(out.into_iter().chain(inc).map(NodeIndex::new));
                successors.push(both.clone());
                predecessors.push(both);
            }
        }

        Self {
            successors,
            predecessors,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.successors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Sorted, de-duplicated node indices.
fn collect_unique(nodes: impl Iterator<Item = NodeIndex>) -> Vec<usize> {
    let mut out: Vec<usize> = nodes.map(NodeIndex::index).collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Compute a BLAKE3 hash of the sorted edge list and orientation.
fn compute_edge_hash(triples: &[Triple], directed: bool) -> String {
    let mut edges: Vec<[u64; 3]> = triples.iter().map(|&t| t.into()).collect();
    edges.sort_unstable();

    let mut hasher = blake3::Hasher::new();
    hasher.update(if directed { b"directed\x00" } else { b"undirect\x00" });
    for [head, tail, relation] in edges {
        hasher.update(&head.to_le_bytes());
        hasher.update(&tail.to_le_bytes());
        hasher.update(&relation.to_le_bytes());
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn triples(rows: &[(u64, u64, u64)]) -> TripleSet {
        rows.iter().map(|&(h, t, r)| Triple::new(h, t, r)).collect()
    }

    #[test]
    fn empty_set_produces_empty_graph() {
        let graph = TripleGraph::build(&TripleSet::new(), true);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.content_hash.starts_with("blake3:"));
    }

    #[test]
    fn nodes_are_heads_and_tails_in_first_seen_order() {
        let graph = TripleGraph::build(&triples(&[(5, 2, 0), (2, 9, 1), (9, 5, 0)]), true);
        let ids: Vec<u64> = graph.entities().map(|e| e.0).collect();
        assert_eq!(ids, vec![5, 2, 9]);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn single_edge_direction() {
        let graph = TripleGraph::build(&triples(&[(1, 2, 0)]), true);
        let a = graph.node_index(EntityId(1)).expect("node 1");
        let b = graph.node_index(EntityId(2)).expect("node 2");
        assert!(graph.graph.contains_edge(a, b), "expected 1 → 2");
        assert!(!graph.graph.contains_edge(b, a), "no reverse edge");
    }

    #[test]
    fn parallel_edges_with_different_relations_are_kept() {
        let graph = TripleGraph::build(&triples(&[(1, 2, 0), (1, 2, 3), (1, 2, 7)]), true);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(
            graph.relations_between(EntityId(1), EntityId(2)),
            vec![RelationId(0), RelationId(3), RelationId(7)]
        );
    }

    #[test]
    fn self_loops_are_kept() {
        let graph = TripleGraph::build(&triples(&[(4, 4, 0)]), false);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 1);
        let adj = graph.adjacency();
        assert_eq!(adj.successors[0], vec![0]);
    }

    #[test]
    fn content_hash_ignores_triple_order() {
        let a = TripleGraph::build(&triples(&[(1, 2, 0), (2, 3, 0)]), true);
        let b = TripleGraph::build(&triples(&[(2, 3, 0), (1, 2, 0)]), true);
        assert_eq!(a.content_hash, b.content_hash);
    }

    #[test]
    fn content_hash_depends_on_orientation_and_edges() {
        let t = triples(&[(1, 2, 0)]);
        let directed = TripleGraph::build(&t, true).content_hash;
        let undirected = TripleGraph::build(&t, false).content_hash;
        assert_ne!(directed, undirected);

        let more = TripleGraph::build(&triples(&[(1, 2, 0), (2, 1, 0)]), true).content_hash;
        assert_ne!(directed, more, "hash must change when edges added");
    }

    #[test]
    fn adjacency_collapses_parallel_edges() {
        let graph = TripleGraph::build(&triples(&[(1, 2, 0), (1, 2, 1), (2, 3, 0)]), true);
        let adj = graph.adjacency();
        // Node order: 1 → idx 0, 2 → idx 1, 3 → idx 2.
        assert_eq!(adj.successors[0], vec![1]);
        assert_eq!(adj.predecessors[1], vec![0]);
        assert_eq!(adj.successors[1], vec![2]);
        assert!(adj.predecessors[0].is_empty());
    }

    #[test]
    fn undirected_adjacency_is_symmetric() {
        let graph = TripleGraph::build(&triples(&[(1, 2, 0), (2, 3, 0), (3, 2, 5)]), false);
        let adj = graph.adjacency();
        assert_eq!(adj.successors, adj.predecessors);
        assert_eq!(adj.successors[1], vec![0, 2]);
    }
}
