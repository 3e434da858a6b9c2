//! Canonical containers for vertex-set and edge-set results.
//!
//! Storage keeps insertion order (whatever the producing strategy emitted); equality is
//! always set equality. Edges compare by their normalized `(smaller, larger)` form, so
//! `(2, 1)` and `(1, 2)` are the same edge.

use crate::error::InvariantError;
use crate::graph::{normalize_edge, Vertex};
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// NodeSet / EdgeSet
// ============================================================================

/// A set of vertices returned by an exact algorithm.
#[derive(Clone, Debug, Default)]
pub struct NodeSet {
    nodes: Vec<Vertex>,
}

impl NodeSet {
    /// Creates a node set; duplicates are dropped, first occurrence wins.
    pub fn new(nodes: impl IntoIterator<Item = Vertex>) -> Self {
        let mut seen = BTreeSet::new();
        let nodes = nodes.into_iter().filter(|v| seen.insert(*v)).collect();
        Self { nodes }
    }

    /// Vertices in insertion order.
    pub fn nodes(&self) -> &[Vertex] {
        &self.nodes
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `v` is in the set.
    pub fn contains(&self, v: Vertex) -> bool {
        self.nodes.contains(&v)
    }

    /// The canonical form used for comparison.
    pub fn canonical(&self) -> BTreeSet<Vertex> {
        self.nodes.iter().copied().collect()
    }
}

impl PartialEq for NodeSet {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for NodeSet {}

impl FromIterator<Vertex> for NodeSet {
    fn from_iter<I: IntoIterator<Item = Vertex>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// A set of edges returned by an exact algorithm.
#[derive(Clone, Debug, Default)]
pub struct EdgeSet {
    edges: Vec<(Vertex, Vertex)>,
}

impl EdgeSet {
    /// Creates an edge set; an edge given twice (in either orientation) is kept once.
    pub fn new(edges: impl IntoIterator<Item = (Vertex, Vertex)>) -> Self {
        let mut seen = BTreeSet::new();
        let edges = edges
            .into_iter()
            .filter(|&(u, v)| seen.insert(normalize_edge(u, v)))
            .collect();
        Self { edges }
    }

    /// Edges in insertion order, with their original orientation.
    pub fn edges(&self) -> &[(Vertex, Vertex)] {
        &self.edges
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether `{u, v}` is in the set, in either orientation.
    pub fn contains(&self, u: Vertex, v: Vertex) -> bool {
        let key = normalize_edge(u, v);
        self.edges.iter().any(|&(a, b)| normalize_edge(a, b) == key)
    }

    /// The canonical form used for comparison.
    pub fn canonical(&self) -> BTreeSet<(Vertex, Vertex)> {
        self.edges.iter().map(|&(u, v)| normalize_edge(u, v)).collect()
    }

    /// Every endpoint touched by the set.
    pub fn endpoints(&self) -> BTreeSet<Vertex> {
        self.edges.iter().flat_map(|&(u, v)| [u, v]).collect()
    }
}

impl PartialEq for EdgeSet {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for EdgeSet {}

impl FromIterator<(Vertex, Vertex)> for EdgeSet {
    fn from_iter<I: IntoIterator<Item = (Vertex, Vertex)>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// ============================================================================
// OptimalSet
// ============================================================================

/// Either a node set or an edge set.
///
/// Compare with [`OptimalSet::try_eq`]; a node set and an edge set are not comparable.
#[derive(Clone, Debug)]
pub enum OptimalSet {
    /// Vertex subset (independent set, dominating set, ...).
    Nodes(NodeSet),
    /// Edge subset (matching, edge dominating set, ...).
    Edges(EdgeSet),
}

impl OptimalSet {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            OptimalSet::Nodes(_) => "node",
            OptimalSet::Edges(_) => "edge",
        }
    }

    /// Cardinality of the set.
    pub fn len(&self) -> usize {
        match self {
            OptimalSet::Nodes(s) => s.len(),
            OptimalSet::Edges(s) => s.len(),
        }
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The node set, if this is one.
    pub fn as_nodes(&self) -> Option<&NodeSet> {
        match self {
            OptimalSet::Nodes(s) => Some(s),
            OptimalSet::Edges(_) => None,
        }
    }

    /// The edge set, if this is one.
    pub fn as_edges(&self) -> Option<&EdgeSet> {
        match self {
            OptimalSet::Edges(s) => Some(s),
            OptimalSet::Nodes(_) => None,
        }
    }

    /// Order-independent equality.
    ///
    /// # Errors
    /// Returns [`InvariantError::TypeMismatch`] when one side is a node set and the other an
    /// edge set.
    pub fn try_eq(&self, other: &Self) -> Result<bool, InvariantError> {
        match (self, other) {
            (OptimalSet::Nodes(a), OptimalSet::Nodes(b)) => Ok(a == b),
            (OptimalSet::Edges(a), OptimalSet::Edges(b)) => Ok(a == b),
            _ => Err(InvariantError::TypeMismatch {
                left: self.kind(),
                right: other.kind(),
            }),
        }
    }
}

impl From<NodeSet> for OptimalSet {
    fn from(set: NodeSet) -> Self {
        OptimalSet::Nodes(set)
    }
}

impl From<EdgeSet> for OptimalSet {
    fn from(set: EdgeSet) -> Self {
        OptimalSet::Edges(set)
    }
}

/// Free-function form of [`OptimalSet::try_eq`].
///
/// # Errors
/// Returns [`InvariantError::TypeMismatch`] on a node/edge comparison.
pub fn optimal_sets_equal(a: &OptimalSet, b: &OptimalSet) -> Result<bool, InvariantError> {
    a.try_eq(b)
}

// ============================================================================
// Coloring
// ============================================================================

/// Vertex to color map; colors are `0..colors_used()` when produced by this crate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Coloring {
    colors: BTreeMap<Vertex, usize>,
}

impl Coloring {
    /// Creates a coloring from `(vertex, color)` pairs.
    pub fn new(assignment: impl IntoIterator<Item = (Vertex, usize)>) -> Self {
        Self {
            colors: assignment.into_iter().collect(),
        }
    }

    /// Color of `v`.
    pub fn color(&self, v: Vertex) -> Option<usize> {
        self.colors.get(&v).copied()
    }

    /// Number of distinct colors.
    pub fn colors_used(&self) -> usize {
        self.colors.values().collect::<BTreeSet<_>>().len()
    }

    /// Number of colored vertices.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether no vertex is colored.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// `(vertex, color)` pairs in vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (Vertex, usize)> + '_ {
        self.colors.iter().map(|(&v, &c)| (v, c))
    }

    /// Vertices grouped by color, in color order.
    pub fn classes(&self) -> Vec<NodeSet> {
        let mut classes: BTreeMap<usize, Vec<Vertex>> = BTreeMap::new();
        for (&v, &c) in &self.colors {
            classes.entry(c).or_default().push(v);
        }
        classes.into_values().map(NodeSet::new).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn edge_orientation_does_not_matter() {
        let a = OptimalSet::from(EdgeSet::new([(1, 2), (2, 3)]));
        let b = OptimalSet::from(EdgeSet::new([(2, 1), (3, 2)]));
        assert!(a.try_eq(&b).unwrap());
    }

    #[test]
    fn different_edges_are_unequal() {
        let a = OptimalSet::from(EdgeSet::new([(1, 2)]));
        let b = OptimalSet::from(EdgeSet::new([(1, 3)]));
        assert!(!a.try_eq(&b).unwrap());
    }

    #[test]
    fn node_order_does_not_matter() {
        assert_eq!(NodeSet::new([3, 1, 2]), NodeSet::new([1, 2, 3]));
        assert_ne!(NodeSet::new([1, 2]), NodeSet::new([1, 2, 3]));
    }

    #[test]
    fn node_vs_edge_is_type_mismatch() {
        let nodes = OptimalSet::from(NodeSet::new([1, 2]));
        let edges = OptimalSet::from(EdgeSet::new([(1, 2)]));
        assert_eq!(
            nodes.try_eq(&edges),
            Err(InvariantError::TypeMismatch {
                left: "node",
                right: "edge"
            })
        );
        assert!(optimal_sets_equal(&edges, &nodes).is_err());
    }

    #[test]
    fn storage_keeps_insertion_order() {
        let set = EdgeSet::new([(3, 2), (1, 2), (2, 3)]);
        assert_eq!(set.edges(), &[(3, 2), (1, 2)]);
        assert!(set.contains(2, 1));
        assert_eq!(set.endpoints().into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn coloring_counts_distinct_colors() {
        let coloring = Coloring::new([(1, 0), (2, 1), (3, 1), (4, 0)]);
        assert_eq!(coloring.colors_used(), 2);
        assert_eq!(coloring.color(3), Some(1));
        assert_eq!(coloring.color(9), None);
        assert_eq!(coloring.classes(), vec![NodeSet::new([1, 4]), NodeSet::new([2, 3])]);
    }

    #[test]
    fn empty_sets_are_equal() {
        assert_eq!(EdgeSet::default(), EdgeSet::new([]));
        assert!(OptimalSet::from(NodeSet::default()).is_empty());
    }

    fn edge_list() -> impl Strategy<Value = Vec<(usize, usize)>> {
        prop::collection::vec((1usize..8, 1usize..8), 0..10)
            .prop_map(|v| v.into_iter().filter(|(a, b)| a != b).collect())
    }

    proptest! {
        #[test]
        fn equality_is_reflexive_and_orientation_invariant(edges in edge_list()) {
            let a = EdgeSet::new(edges.iter().copied());
            let flipped = EdgeSet::new(edges.iter().rev().map(|&(u, v)| (v, u)));
            prop_assert_eq!(&a, &a);
            prop_assert_eq!(&a, &flipped);
        }

        #[test]
        fn equality_is_symmetric(a in edge_list(), b in edge_list()) {
            let (a, b) = (EdgeSet::new(a), EdgeSet::new(b));
            prop_assert_eq!(a == b, b == a);
        }

        #[test]
        fn equality_is_transitive(
            a in prop::collection::vec(1usize..5, 0..6),
            b in prop::collection::vec(1usize..5, 0..6),
            c in prop::collection::vec(1usize..5, 0..6),
        ) {
            let (a, b, c) = (NodeSet::new(a), NodeSet::new(b), NodeSet::new(c));
            if a == b && b == c {
                prop_assert_eq!(a, c);
            }
        }
    }
}
