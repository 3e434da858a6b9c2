//! Deterministic validation of decoded solver results.
//!
//! Every set or coloring decoded from a solver assignment is checked here before it is
//! returned, so a backend that reports `Optimal` with a wrong assignment is caught.

use crate::graph::{normalize_edge, GraphView};
use crate::optimal_set::{Coloring, EdgeSet, NodeSet};
use std::collections::BTreeSet;

// ============================================================================
// Vertex sets
// ============================================================================

/// Checks that no two vertices of `set` are adjacent.
///
/// # Errors
/// Returns a message naming the first edge inside the set, or a vertex not in the graph.
pub fn validate_independent_set<G: GraphView + ?Sized>(graph: &G, set: &NodeSet) -> Result<(), String> {
    check_vertices(graph, set)?;
    let nodes = set.nodes();
    for (i, &u) in nodes.iter().enumerate() {
        for &v in &nodes[i + 1..] {
            if graph.has_edge(u, v) {
                return Err(format!("vertices {u} and {v} are adjacent"));
            }
        }
    }
    Ok(())
}

/// Checks that every two vertices of `set` are adjacent.
///
/// # Errors
/// Returns a message naming the first missing edge.
pub fn validate_clique<G: GraphView + ?Sized>(graph: &G, set: &NodeSet) -> Result<(), String> {
    check_vertices(graph, set)?;
    let nodes = set.nodes();
    for (i, &u) in nodes.iter().enumerate() {
        for &v in &nodes[i + 1..] {
            if !graph.has_edge(u, v) {
                return Err(format!("vertices {u} and {v} are not adjacent"));
            }
        }
    }
    Ok(())
}

/// Checks that every vertex is in `set` or adjacent to a vertex of `set`.
///
/// # Errors
/// Returns a message naming the first undominated vertex.
pub fn validate_dominating_set<G: GraphView + ?Sized>(graph: &G, set: &NodeSet) -> Result<(), String> {
    check_vertices(graph, set)?;
    for v in graph.vertices() {
        if !set.contains(v) && !graph.neighbors(v).iter().any(|&w| set.contains(w)) {
            return Err(format!("vertex {v} is not dominated"));
        }
    }
    Ok(())
}

/// Checks that every edge has an endpoint in `set`.
///
/// # Errors
/// Returns a message naming the first uncovered edge.
pub fn validate_vertex_cover<G: GraphView + ?Sized>(graph: &G, set: &NodeSet) -> Result<(), String> {
    check_vertices(graph, set)?;
    for (u, v) in graph.edges() {
        if !set.contains(u) && !set.contains(v) {
            return Err(format!("edge ({u}, {v}) is not covered"));
        }
    }
    Ok(())
}

fn check_vertices<G: GraphView + ?Sized>(graph: &G, set: &NodeSet) -> Result<(), String> {
    match set.nodes().iter().find(|&&v| !graph.contains_vertex(v)) {
        Some(v) => Err(format!("vertex {v} is not in the graph")),
        None => Ok(()),
    }
}

// ============================================================================
// Edge sets
// ============================================================================

/// Checks that no two edges of `set` share an endpoint.
///
/// # Errors
/// Returns a message naming the first shared endpoint.
pub fn validate_matching<G: GraphView + ?Sized>(graph: &G, set: &EdgeSet) -> Result<(), String> {
    check_edges(graph, set)?;
    let mut seen = BTreeSet::new();
    for &(u, v) in set.edges() {
        for w in [u, v] {
            if !seen.insert(w) {
                return Err(format!("vertex {w} is matched twice"));
            }
        }
    }
    Ok(())
}

/// Checks that every edge of the graph shares an endpoint with an edge of `set`.
///
/// # Errors
/// Returns a message naming the first undominated edge.
pub fn validate_edge_dominating_set<G: GraphView + ?Sized>(
    graph: &G,
    set: &EdgeSet,
) -> Result<(), String> {
    check_edges(graph, set)?;
    let covered = set.endpoints();
    for (u, v) in graph.edges() {
        if !covered.contains(&u) && !covered.contains(&v) {
            return Err(format!("edge ({u}, {v}) is not dominated"));
        }
    }
    Ok(())
}

fn check_edges<G: GraphView + ?Sized>(graph: &G, set: &EdgeSet) -> Result<(), String> {
    match set.edges().iter().find(|&&(u, v)| !graph.has_edge(u, v)) {
        Some(&(u, v)) => {
            let (u, v) = normalize_edge(u, v);
            Err(format!("edge ({u}, {v}) is not in the graph"))
        }
        None => Ok(()),
    }
}

// ============================================================================
// Colorings
// ============================================================================

/// Checks that every vertex is colored and adjacent vertices differ.
///
/// # Errors
/// Returns a message naming the first uncolored vertex or conflicting edge.
pub fn validate_proper_coloring<G: GraphView + ?Sized>(
    graph: &G,
    coloring: &Coloring,
) -> Result<(), String> {
    for v in graph.vertices() {
        if coloring.color(v).is_none() {
            return Err(format!("vertex {v} has no color"));
        }
    }
    for (u, v) in graph.edges() {
        if coloring.color(u) == coloring.color(v) {
            return Err(format!("edge ({u}, {v}) joins two vertices of the same color"));
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
