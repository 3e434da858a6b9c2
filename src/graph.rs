//! Read-only graph capability consumed by every strategy, plus a small adjacency-set graph.
//!
//! The strategies in this crate only ever see a [`GraphView`]. [`SimpleGraph`] is the
//! in-memory implementation used by the tests and by callers without a graph library of
//! their own; with the `petgraph` feature enabled, `petgraph::graph::UnGraph` works too.

use crate::error::GraphError;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};

/// Vertex identifier.
pub type Vertex = usize;

/// Returns `(min(u, v), max(u, v))`.
#[inline]
pub fn normalize_edge(u: Vertex, v: Vertex) -> (Vertex, Vertex) {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

// ============================================================================
// GraphView
// ============================================================================

/// Read-only view of a simple undirected graph.
///
/// Implementations must stay unchanged for the duration of one computation and must not
/// report self-loops or parallel edges.
pub trait GraphView {
    /// All vertices in ascending order.
    fn vertices(&self) -> Vec<Vertex>;

    /// Every edge exactly once, as a normalized `(smaller, larger)` pair.
    fn edges(&self) -> Vec<(Vertex, Vertex)>;

    /// Neighbors of `v` in ascending order; empty if `v` is not a vertex.
    fn neighbors(&self, v: Vertex) -> Vec<Vertex>;

    /// Degree of `v`.
    fn degree(&self, v: Vertex) -> usize {
        self.neighbors(v).len()
    }

    /// Number of vertices.
    fn order(&self) -> usize {
        self.vertices().len()
    }

    /// Number of edges.
    fn size(&self) -> usize {
        self.edges().len()
    }

    /// Whether `v` is a vertex of the graph.
    fn contains_vertex(&self, v: Vertex) -> bool {
        self.vertices().binary_search(&v).is_ok()
    }

    /// Whether `u` and `v` are adjacent.
    fn has_edge(&self, u: Vertex, v: Vertex) -> bool {
        self.neighbors(u).binary_search(&v).is_ok()
    }

    /// Degrees of all vertices, in vertex order.
    fn degree_sequence(&self) -> Vec<i64> {
        self.vertices()
            .into_iter()
            .map(|v| self.degree(v) as i64)
            .collect()
    }
}

impl<G: GraphView + ?Sized> GraphView for &G {
    fn vertices(&self) -> Vec<Vertex> {
        (**self).vertices()
    }

    fn edges(&self) -> Vec<(Vertex, Vertex)> {
        (**self).edges()
    }

    fn neighbors(&self, v: Vertex) -> Vec<Vertex> {
        (**self).neighbors(v)
    }

    fn degree(&self, v: Vertex) -> usize {
        (**self).degree(v)
    }

    fn order(&self) -> usize {
        (**self).order()
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn contains_vertex(&self, v: Vertex) -> bool {
        (**self).contains_vertex(v)
    }

    fn has_edge(&self, u: Vertex, v: Vertex) -> bool {
        (**self).has_edge(u, v)
    }

    fn degree_sequence(&self) -> Vec<i64> {
        (**self).degree_sequence()
    }
}

// ============================================================================
// SimpleGraph
// ============================================================================

/// Adjacency-set graph with ordered vertex identifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimpleGraph {
    adj: BTreeMap<Vertex, BTreeSet<Vertex>>,
}

impl SimpleGraph {
    /// Creates a graph with no vertices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an edgeless graph on the given vertices.
    pub fn with_vertices(vertices: impl IntoIterator<Item = Vertex>) -> Self {
        let mut graph = Self::new();
        for v in vertices {
            graph.add_vertex(v);
        }
        graph
    }

    /// Builds a graph from an edge list; endpoints are added as vertices.
    ///
    /// Repeated edges collapse into one.
    ///
    /// # Errors
    /// Returns [`GraphError::SelfLoop`] if an edge joins a vertex to itself.
    pub fn from_edges(edges: impl IntoIterator<Item = (Vertex, Vertex)>) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for (u, v) in edges {
            graph.add_vertex(u);
            graph.add_vertex(v);
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Adds `v`; returns `false` if it was already present.
    pub fn add_vertex(&mut self, v: Vertex) -> bool {
        if self.adj.contains_key(&v) {
            return false;
        }
        self.adj.insert(v, BTreeSet::new());
        true
    }

    /// Adds the edge `{u, v}`; returns `false` if it was already present.
    ///
    /// # Errors
    /// Returns an error on a self-loop or when either endpoint is not a vertex.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex) -> Result<bool, GraphError> {
        if u == v {
            return Err(GraphError::SelfLoop { vertex: u });
        }
        if !self.adj.contains_key(&u) || !self.adj.contains_key(&v) {
            return Err(GraphError::UnknownVertex { u, v });
        }
        let inserted = self.adj.entry(u).or_default().insert(v);
        self.adj.entry(v).or_default().insert(u);
        Ok(inserted)
    }

    /// Removes the edge `{u, v}` if present.
    pub fn remove_edge(&mut self, u: Vertex, v: Vertex) -> bool {
        let removed = self.adj.get_mut(&u).is_some_and(|n| n.remove(&v));
        if let Some(n) = self.adj.get_mut(&v) {
            n.remove(&u);
        }
        removed
    }

    /// Returns the complement graph on the same vertex set.
    pub fn complement(&self) -> Self {
        let vertices: Vec<Vertex> = self.adj.keys().copied().collect();
        let mut out = Self::with_vertices(vertices.iter().copied());
        for (i, &u) in vertices.iter().enumerate() {
            for &v in &vertices[i + 1..] {
                if !self.adj[&u].contains(&v) {
                    out.adj.entry(u).or_default().insert(v);
                    out.adj.entry(v).or_default().insert(u);
                }
            }
        }
        out
    }

    // ------------------------------------------------------------------------
    // Standard families (vertices numbered 1..=n)
    // ------------------------------------------------------------------------

    /// `n` isolated vertices.
    pub fn edgeless(n: usize) -> Self {
        Self::with_vertices(1..=n)
    }

    /// Path `1 - 2 - ... - n`.
    pub fn path(n: usize) -> Self {
        let mut graph = Self::edgeless(n);
        for v in 2..=n {
            graph.insert_unchecked(v - 1, v);
        }
        graph
    }

    /// Cycle `1 - 2 - ... - n - 1`; for `n < 3` this is a path.
    pub fn cycle(n: usize) -> Self {
        let mut graph = Self::path(n);
        if n >= 3 {
            graph.insert_unchecked(n, 1);
        }
        graph
    }

    /// Star with center `1` and leaves `2..=n`.
    pub fn star(n: usize) -> Self {
        let mut graph = Self::edgeless(n);
        for v in 2..=n {
            graph.insert_unchecked(1, v);
        }
        graph
    }

    /// Complete graph on `1..=n`.
    pub fn complete(n: usize) -> Self {
        let mut graph = Self::edgeless(n);
        for u in 1..=n {
            for v in (u + 1)..=n {
                graph.insert_unchecked(u, v);
            }
        }
        graph
    }

    /// Erdős–Rényi `G(n, p)` on `1..=n`.
    pub fn new_random<R: Rng>(rng: &mut R, n: usize, p: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&p), "p must be in [0, 1]");
        let mut graph = Self::edgeless(n);
        for u in 1..=n {
            for v in (u + 1)..=n {
                if rng.random_bool(p) {
                    graph.insert_unchecked(u, v);
                }
            }
        }
        graph
    }

    #[inline]
    fn insert_unchecked(&mut self, u: Vertex, v: Vertex) {
        debug_assert!(u != v);
        self.adj.entry(u).or_default().insert(v);
        self.adj.entry(v).or_default().insert(u);
    }

    // ------------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------------

    /// Parses a `0/1` adjacency matrix; row `i` becomes vertex `i + 1`.
    ///
    /// Rules:
    /// - Blank lines are ignored.
    /// - The matrix must be square, symmetric, and have a zero diagonal.
    ///
    /// # Errors
    /// Returns an error if the input is empty, non-square, contains invalid characters,
    /// has self-loops, or is not symmetric.
    pub fn from_adjacency_matrix(text: &str) -> Result<Self, GraphError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        if lines.is_empty() {
            return Err(GraphError::Empty);
        }
        let n = lines.len();

        let mut rows: Vec<Vec<bool>> = Vec::with_capacity(n);
        for (i, line) in lines.iter().enumerate() {
            let bytes = line.as_bytes();
            if bytes.len() != n {
                return Err(GraphError::NonSquare {
                    row: i,
                    expected: n,
                    got: bytes.len(),
                });
            }
            let mut row = Vec::with_capacity(n);
            for (j, &b) in bytes.iter().enumerate() {
                match b {
                    b'0' => row.push(false),
                    b'1' => row.push(true),
                    _ => {
                        return Err(GraphError::InvalidChar {
                            row: i,
                            col: j,
                            ch: b as char,
                        })
                    }
                }
            }
            rows.push(row);
        }

        for (i, row) in rows.iter().enumerate() {
            if row[i] {
                return Err(GraphError::SelfLoop { vertex: i + 1 });
            }
        }

        let mut graph = Self::edgeless(n);
        for i in 0..n {
            for j in (i + 1)..n {
                if rows[i][j] != rows[j][i] {
                    return Err(GraphError::NotSymmetric { i, j });
                }
                if rows[i][j] {
                    graph.insert_unchecked(i + 1, j + 1);
                }
            }
        }
        Ok(graph)
    }
}

impl GraphView for SimpleGraph {
    fn vertices(&self) -> Vec<Vertex> {
        self.adj.keys().copied().collect()
    }

    fn edges(&self) -> Vec<(Vertex, Vertex)> {
        let mut out = Vec::new();
        for (&u, neighbors) in &self.adj {
            out.extend(neighbors.range((u + 1)..).map(|&v| (u, v)));
        }
        out
    }

    fn neighbors(&self, v: Vertex) -> Vec<Vertex> {
        self.adj
            .get(&v)
            .map(|n| n.iter().copied().collect())
            .unwrap_or_default()
    }

    fn degree(&self, v: Vertex) -> usize {
        self.adj.get(&v).map_or(0, BTreeSet::len)
    }

    fn order(&self) -> usize {
        self.adj.len()
    }

    fn contains_vertex(&self, v: Vertex) -> bool {
        self.adj.contains_key(&v)
    }

    fn has_edge(&self, u: Vertex, v: Vertex) -> bool {
        self.adj.get(&u).is_some_and(|n| n.contains(&v))
    }
}

// ============================================================================
// petgraph adapter
// ============================================================================

/// `NodeIndex::index() + 1` is the vertex identifier. Self-loops and parallel edges are
/// filtered out so the view stays simple.
#[cfg(feature = "petgraph")]
impl<N, E> GraphView for petgraph::graph::UnGraph<N, E> {
    fn vertices(&self) -> Vec<Vertex> {
        self.node_indices().map(|i| i.index() + 1).collect()
    }

    fn edges(&self) -> Vec<(Vertex, Vertex)> {
        let mut out: Vec<(Vertex, Vertex)> = self
            .raw_edges()
            .iter()
            .filter(|e| e.source() != e.target())
            .map(|e| normalize_edge(e.source().index() + 1, e.target().index() + 1))
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    fn neighbors(&self, v: Vertex) -> Vec<Vertex> {
        if v == 0 || v > self.node_count() {
            return Vec::new();
        }
        let idx = petgraph::graph::NodeIndex::new(v - 1);
        let mut out: Vec<Vertex> = petgraph::graph::Graph::neighbors(self, idx)
            .filter(|&w| w != idx)
            .map(|w| w.index() + 1)
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    fn order(&self) -> usize {
        self.node_count()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn edges_are_normalized_and_unique() {
        let graph = SimpleGraph::from_edges([(2, 1), (1, 2), (3, 2)]).unwrap();
        assert_eq!(graph.edges(), vec![(1, 2), (2, 3)]);
        assert_eq!(graph.size(), 2);
    }

    #[test]
    fn normalize_edge_orders_endpoints() {
        assert_eq!(normalize_edge(5, 2), (2, 5));
        assert_eq!(normalize_edge(2, 5), (2, 5));
    }

    #[test]
    fn reference_view_matches_owned_view() {
        let graph = SimpleGraph::star(5);
        let view = &graph;
        assert_eq!(GraphView::size(&view), graph.size());
        assert_eq!(GraphView::order(&view), 5);
        assert!(GraphView::contains_vertex(&view, 3));
        assert!(!GraphView::contains_vertex(&view, 6));
        assert_eq!(GraphView::degree_sequence(&view), vec![4, 1, 1, 1, 1]);
    }

    #[test]
    fn add_edge_rejects_self_loop_and_unknown_vertex() {
        let mut graph = SimpleGraph::edgeless(3);
        assert_eq!(graph.add_edge(2, 2), Err(GraphError::SelfLoop { vertex: 2 }));
        assert_eq!(
            graph.add_edge(1, 9),
            Err(GraphError::UnknownVertex { u: 1, v: 9 })
        );
        assert_eq!(graph.add_edge(1, 3), Ok(true));
        assert_eq!(graph.add_edge(3, 1), Ok(false));
    }

    #[test]
    fn star_degrees() {
        let graph = SimpleGraph::star(5);
        assert_eq!(graph.degree(1), 4);
        for leaf in 2..=5 {
            assert_eq!(graph.degree(leaf), 1);
            assert_eq!(graph.neighbors(leaf), vec![1]);
        }
        assert_eq!(graph.degree_sequence(), vec![4, 1, 1, 1, 1]);
    }

    #[test]
    fn cycle_and_path_sizes() {
        assert_eq!(SimpleGraph::cycle(5).size(), 5);
        assert_eq!(SimpleGraph::path(5).size(), 4);
        assert_eq!(SimpleGraph::cycle(2).size(), 1);
        assert_eq!(SimpleGraph::complete(6).size(), 15);
        assert_eq!(SimpleGraph::edgeless(0).order(), 0);
    }

    #[test]
    fn handshaking_lemma_holds() {
        let mut rng = XorShiftRng::seed_from_u64(42);
        for _ in 0..10 {
            let graph = SimpleGraph::new_random(&mut rng, 24, 0.25);
            let sum: i64 = graph.degree_sequence().iter().sum();
            assert_eq!(sum as usize, 2 * graph.size());
        }
    }

    #[test]
    fn complement_partitions_pairs() {
        let mut rng = XorShiftRng::seed_from_u64(7);
        let graph = SimpleGraph::new_random(&mut rng, 10, 0.4);
        let comp = graph.complement();
        assert_eq!(graph.size() + comp.size(), 45);
        for (u, v) in graph.edges() {
            assert!(!comp.has_edge(u, v));
        }
    }

    #[test]
    fn remove_edge_is_symmetric() {
        let mut graph = SimpleGraph::path(3);
        assert!(graph.remove_edge(2, 1));
        assert!(!graph.has_edge(1, 2));
        assert!(!graph.has_edge(2, 1));
        assert!(!graph.remove_edge(1, 2));
    }

    #[test]
    fn reference_forwards_to_graph() {
        let graph = SimpleGraph::cycle(4);
        let view: &SimpleGraph = &graph;
        assert_eq!(GraphView::edges(&view), graph.edges());
        assert_eq!(GraphView::degree(&view, 1), 2);
    }

    // -------------------------------------------------------------------------
    // Parser tests
    // -------------------------------------------------------------------------

    #[test]
    fn parse_path_matrix() {
        let graph = SimpleGraph::from_adjacency_matrix("0100\n1010\n0101\n0010\n").unwrap();
        assert_eq!(graph, SimpleGraph::path(4));
    }

    #[test]
    fn parse_rejects_non_square() {
        let err = SimpleGraph::from_adjacency_matrix("010\n10\n").unwrap_err();
        assert!(matches!(err, GraphError::NonSquare { .. }));
    }

    #[test]
    fn parse_rejects_invalid_char() {
        let err = SimpleGraph::from_adjacency_matrix("0a\n00\n").unwrap_err();
        assert!(matches!(err, GraphError::InvalidChar { .. }));
    }

    #[test]
    fn parse_rejects_self_loop() {
        let err = SimpleGraph::from_adjacency_matrix("10\n01\n").unwrap_err();
        assert_eq!(err, GraphError::SelfLoop { vertex: 1 });
    }

    #[test]
    fn parse_rejects_non_symmetric() {
        let err = SimpleGraph::from_adjacency_matrix("01\n00\n").unwrap_err();
        assert_eq!(err, GraphError::NotSymmetric { i: 0, j: 1 });
    }

    #[test]
    fn parse_rejects_whitespace_only() {
        let err = SimpleGraph::from_adjacency_matrix("   \n\n  \n").unwrap_err();
        assert_eq!(err, GraphError::Empty);
    }

    #[cfg(feature = "petgraph")]
    #[test]
    fn petgraph_view_matches_simple_graph() {
        let mut pg = petgraph::graph::UnGraph::<(), ()>::new_undirected();
        let nodes: Vec<_> = (0..4).map(|_| pg.add_node(())).collect();
        pg.add_edge(nodes[0], nodes[1], ());
        pg.add_edge(nodes[1], nodes[0], ());
        pg.add_edge(nodes[1], nodes[2], ());
        pg.add_edge(nodes[2], nodes[3], ());
        pg.add_edge(nodes[3], nodes[3], ());
        let simple = SimpleGraph::path(4);
        assert_eq!(GraphView::vertices(&pg), simple.vertices());
        assert_eq!(GraphView::edges(&pg), simple.edges());
        assert_eq!(GraphView::neighbors(&pg, 2), vec![1, 3]);
        assert_eq!(GraphView::neighbors(&pg, 4), vec![3]);
        assert!(GraphView::neighbors(&pg, 0).is_empty());
    }
}
