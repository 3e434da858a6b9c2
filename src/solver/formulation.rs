//! Binary-program formulations of NP-hard invariants, and decoding of their solutions.
//!
//! Every `*_program` function only builds the model; the matching solve function submits
//! it, reads the assignment back through [`is_selected`], and validates the decoded result
//! against the graph before returning it.
//!
//! Degenerate graphs (no vertices, or no edges where the formulation is over edges) are
//! answered directly and never reach the backend.

use super::{is_selected, BinaryProgram, Comparison, Sense, SolveLimits, SolveStatus, SolverBackend, VarId};
use crate::error::InvariantError;
use crate::graph::{GraphView, Vertex};
use crate::optimal_set::{Coloring, EdgeSet, NodeSet};
use crate::validate::{
    validate_clique, validate_dominating_set, validate_edge_dominating_set, validate_independent_set,
    validate_matching, validate_proper_coloring, validate_vertex_cover,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

// ============================================================================
// Selection programs
// ============================================================================

/// A program with one decision variable per key (vertex or edge).
#[derive(Clone, Debug)]
pub struct SelectionProgram<K> {
    /// The model.
    pub program: BinaryProgram,
    /// `keys[i]` is the vertex or edge behind variable `i`.
    pub keys: Vec<K>,
}

impl<K: Copy> SelectionProgram<K> {
    fn new(name: &'static str, sense: Sense, keys: Vec<K>, label: impl Fn(&K) -> String) -> Self {
        let mut program = BinaryProgram::new(name, sense);
        for key in &keys {
            let var = program.add_variable(label(key));
            program.add_objective_term(var, 1.0);
        }
        Self { program, keys }
    }

    /// Keys whose variable is selected in `values`.
    pub fn decode(&self, values: &[f64]) -> Vec<K> {
        self.keys
            .iter()
            .zip(values)
            .filter(|(_, x)| is_selected(**x))
            .map(|(&k, _)| k)
            .collect()
    }
}

fn vertex_index(vertices: &[Vertex]) -> BTreeMap<Vertex, VarId> {
    vertices.iter().enumerate().map(|(i, &v)| (v, VarId(i))).collect()
}

/// Maximum independent set: `x_u + x_v <= 1` per edge, maximize `sum x`.
pub fn independent_set_program<G: GraphView + ?Sized>(graph: &G) -> SelectionProgram<Vertex> {
    let mut sel = SelectionProgram::new("maximum independent set", Sense::Maximize, graph.vertices(), |v| format!("x_{v}"));
    let index = vertex_index(&sel.keys);
    for (u, v) in graph.edges() {
        sel.program
            .add_constraint(vec![(index[&u], 1.0), (index[&v], 1.0)], Comparison::LessEq, 1.0);
    }
    sel
}

/// Maximum clique: `x_u + x_v <= 1` per non-adjacent pair, maximize `sum x`.
pub fn clique_program<G: GraphView + ?Sized>(graph: &G) -> SelectionProgram<Vertex> {
    let mut sel = SelectionProgram::new("maximum clique", Sense::Maximize, graph.vertices(), |v| format!("x_{v}"));
    let vertices = sel.keys.clone();
    for (i, &u) in vertices.iter().enumerate() {
        for (j, &v) in vertices.iter().enumerate().skip(i + 1) {
            if !graph.has_edge(u, v) {
                sel.program
                    .add_constraint(vec![(VarId(i), 1.0), (VarId(j), 1.0)], Comparison::LessEq, 1.0);
            }
        }
    }
    sel
}

/// Minimum dominating set: `x_v + sum_{u in N(v)} x_u >= 1` per vertex, minimize `sum x`.
pub fn dominating_set_program<G: GraphView + ?Sized>(graph: &G) -> SelectionProgram<Vertex> {
    let mut sel = SelectionProgram::new("minimum dominating set", Sense::Minimize, graph.vertices(), |v| format!("x_{v}"));
    let index = vertex_index(&sel.keys);
    for &v in &sel.keys {
        let mut terms = vec![(index[&v], 1.0)];
        terms.extend(graph.neighbors(v).iter().map(|u| (index[u], 1.0)));
        sel.program.add_constraint(terms, Comparison::GreaterEq, 1.0);
    }
    sel
}

/// Minimum vertex cover: `x_u + x_v >= 1` per edge, minimize `sum x`.
pub fn vertex_cover_program<G: GraphView + ?Sized>(graph: &G) -> SelectionProgram<Vertex> {
    let mut sel = SelectionProgram::new("minimum vertex cover", Sense::Minimize, graph.vertices(), |v| format!("x_{v}"));
    let index = vertex_index(&sel.keys);
    for (u, v) in graph.edges() {
        sel.program
            .add_constraint(vec![(index[&u], 1.0), (index[&v], 1.0)], Comparison::GreaterEq, 1.0);
    }
    sel
}

/// Edge variables incident to each vertex.
fn incidence(edges: &[(Vertex, Vertex)]) -> BTreeMap<Vertex, Vec<VarId>> {
    let mut out: BTreeMap<Vertex, Vec<VarId>> = BTreeMap::new();
    for (i, &(u, v)) in edges.iter().enumerate() {
        out.entry(u).or_default().push(VarId(i));
        out.entry(v).or_default().push(VarId(i));
    }
    out
}

/// Maximum matching: `sum_{e incident to v} x_e <= 1` per vertex, maximize `sum x`.
pub fn matching_program<G: GraphView + ?Sized>(graph: &G) -> SelectionProgram<(Vertex, Vertex)> {
    let mut sel = SelectionProgram::new("maximum matching", Sense::Maximize, graph.edges(), |&(u, v)| format!("x_{u}_{v}"));
    for vars in incidence(&sel.keys).into_values() {
        if vars.len() > 1 {
            sel.program
                .add_constraint(vars.into_iter().map(|e| (e, 1.0)).collect(), Comparison::LessEq, 1.0);
        }
    }
    sel
}

/// Minimum edge dominating set: for each edge `e`, the edges sharing an endpoint with `e`
/// (including `e`) sum to at least one; minimize `sum x`.
pub fn edge_dominating_set_program<G: GraphView + ?Sized>(graph: &G) -> SelectionProgram<(Vertex, Vertex)> {
    let mut sel = SelectionProgram::new(
        "minimum edge dominating set",
        Sense::Minimize,
        graph.edges(),
        |&(u, v)| format!("x_{u}_{v}"),
    );
    let incident = incidence(&sel.keys);
    for &(u, v) in &sel.keys.clone() {
        let neighborhood: BTreeSet<VarId> = incident[&u].iter().chain(&incident[&v]).copied().collect();
        sel.program.add_constraint(
            neighborhood.into_iter().map(|e| (e, 1.0)).collect(),
            Comparison::GreaterEq,
            1.0,
        );
    }
    sel
}

// ============================================================================
// Coloring program
// ============================================================================

/// Minimum proper coloring with at most `colors.len()` colors.
#[derive(Clone, Debug)]
pub struct ColoringProgram {
    /// The model.
    pub program: BinaryProgram,
    /// Vertices, in the order of `assign`.
    pub vertices: Vec<Vertex>,
    /// `assign[i][k]` is 1 iff `vertices[i]` gets color `k`.
    pub assign: Vec<Vec<VarId>>,
    /// `colors[k]` is 1 iff color `k` is used.
    pub colors: Vec<VarId>,
}

/// Builds the coloring model over `max_colors` colors:
/// - each vertex gets exactly one color;
/// - adjacent vertices never share a color;
/// - a vertex may only take color `k` if `k` is used;
/// - color `k` may only be used if color `k - 1` is, so used colors form a prefix;
/// - minimize the number of used colors.
///
/// Color variables are created before vertex variables, so a depth-first backend settles
/// the number of colors first.
pub fn coloring_program<G: GraphView + ?Sized>(graph: &G, max_colors: usize) -> ColoringProgram {
    let mut program = BinaryProgram::new("minimum proper coloring", Sense::Minimize);
    let vertices = graph.vertices();

    let colors: Vec<VarId> = (0..max_colors)
        .map(|k| {
            let y = program.add_variable(format!("y_{k}"));
            program.add_objective_term(y, 1.0);
            y
        })
        .collect();
    let assign: Vec<Vec<VarId>> = vertices
        .iter()
        .map(|v| (0..max_colors).map(|k| program.add_variable(format!("x_{v}_{k}"))).collect())
        .collect();

    for row in &assign {
        program.add_constraint(row.iter().map(|&x| (x, 1.0)).collect(), Comparison::Eq, 1.0);
        for (&x, &y) in row.iter().zip(&colors) {
            program.add_constraint(vec![(x, 1.0), (y, -1.0)], Comparison::LessEq, 0.0);
        }
    }

    let position: BTreeMap<Vertex, usize> = vertices.iter().enumerate().map(|(i, &v)| (v, i)).collect();
    for (u, v) in graph.edges() {
        let (iu, iv) = (position[&u], position[&v]);
        for k in 0..max_colors {
            program.add_constraint(
                vec![(assign[iu][k], 1.0), (assign[iv][k], 1.0)],
                Comparison::LessEq,
                1.0,
            );
        }
    }

    for pair in colors.windows(2) {
        program.add_constraint(vec![(pair[1], 1.0), (pair[0], -1.0)], Comparison::LessEq, 0.0);
    }

    ColoringProgram {
        program,
        vertices,
        assign,
        colors,
    }
}

/// Greedy coloring: repeatedly peel off a maximal independent set, scanning vertices by
/// descending degree. Its color count bounds the chromatic number from above.
pub fn greedy_coloring<G: GraphView + ?Sized>(graph: &G) -> Coloring {
    let mut order = graph.vertices();
    order.sort_by_key(|&v| std::cmp::Reverse(graph.degree(v)));

    let mut uncolored: Vec<Vertex> = order;
    let mut assignment = Vec::with_capacity(uncolored.len());
    let mut color = 0usize;
    while !uncolored.is_empty() {
        let mut blocked = BTreeSet::new();
        let mut rest = Vec::new();
        for v in uncolored {
            if blocked.contains(&v) {
                rest.push(v);
            } else {
                assignment.push((v, color));
                blocked.extend(graph.neighbors(v));
            }
        }
        uncolored = rest;
        color += 1;
    }
    Coloring::new(assignment)
}

// ============================================================================
// Solving
// ============================================================================

fn failed(problem: &'static str, status: impl Into<String>) -> InvariantError {
    InvariantError::SolverFailed {
        problem,
        status: status.into(),
    }
}

/// Submits `program` and returns the assignment when it is proven optimal.
fn submit<B: SolverBackend + ?Sized>(
    program: &BinaryProgram,
    backend: &B,
    limits: &SolveLimits,
) -> Result<Vec<f64>, InvariantError> {
    debug!(
        problem = program.name(),
        backend = backend.name(),
        variables = program.num_variables(),
        constraints = program.constraints().len(),
        "submitting binary program"
    );
    let outcome = backend.solve(program, limits);
    debug!(problem = program.name(), status = %outcome.status, objective = ?outcome.objective, "solver returned");

    match outcome.status {
        SolveStatus::Optimal if outcome.values.len() == program.num_variables() => Ok(outcome.values),
        SolveStatus::Optimal => Err(failed(
            program.name(),
            format!(
                "expected {} values, got {}",
                program.num_variables(),
                outcome.values.len()
            ),
        )),
        SolveStatus::Infeasible => Err(InvariantError::SolverInfeasible {
            problem: program.name(),
        }),
        status => Err(failed(program.name(), status.to_string())),
    }
}

fn solve_nodes<G, B>(
    graph: &G,
    formulation: &SelectionProgram<Vertex>,
    backend: &B,
    limits: &SolveLimits,
    validate: fn(&G, &NodeSet) -> Result<(), String>,
) -> Result<NodeSet, InvariantError>
where
    G: GraphView + ?Sized,
    B: SolverBackend + ?Sized,
{
    let values = submit(&formulation.program, backend, limits)?;
    let set = NodeSet::new(formulation.decode(&values));
    validate(graph, &set).map_err(|msg| failed(formulation.program.name(), msg))?;
    Ok(set)
}

fn solve_edges<G, B>(
    graph: &G,
    formulation: &SelectionProgram<(Vertex, Vertex)>,
    backend: &B,
    limits: &SolveLimits,
    validate: fn(&G, &EdgeSet) -> Result<(), String>,
) -> Result<EdgeSet, InvariantError>
where
    G: GraphView + ?Sized,
    B: SolverBackend + ?Sized,
{
    let values = submit(&formulation.program, backend, limits)?;
    let set = EdgeSet::new(formulation.decode(&values));
    validate(graph, &set).map_err(|msg| failed(formulation.program.name(), msg))?;
    Ok(set)
}

/// Maximum independent set.
///
/// # Errors
/// Returns a solver error if the backend does not return a valid optimal assignment.
pub fn maximum_independent_set<G, B>(graph: &G, backend: &B, limits: &SolveLimits) -> Result<NodeSet, InvariantError>
where
    G: GraphView + ?Sized,
    B: SolverBackend + ?Sized,
{
    if graph.size() == 0 {
        return Ok(NodeSet::new(graph.vertices()));
    }
    solve_nodes(graph, &independent_set_program(graph), backend, limits, validate_independent_set)
}

/// Maximum clique.
///
/// # Errors
/// Returns a solver error if the backend does not return a valid optimal assignment.
pub fn maximum_clique<G, B>(graph: &G, backend: &B, limits: &SolveLimits) -> Result<NodeSet, InvariantError>
where
    G: GraphView + ?Sized,
    B: SolverBackend + ?Sized,
{
    if graph.order() == 0 {
        return Ok(NodeSet::default());
    }
    solve_nodes(graph, &clique_program(graph), backend, limits, validate_clique)
}

/// Minimum dominating set.
///
/// # Errors
/// Returns a solver error if the backend does not return a valid optimal assignment.
pub fn minimum_dominating_set<G, B>(graph: &G, backend: &B, limits: &SolveLimits) -> Result<NodeSet, InvariantError>
where
    G: GraphView + ?Sized,
    B: SolverBackend + ?Sized,
{
    if graph.size() == 0 {
        return Ok(NodeSet::new(graph.vertices()));
    }
    solve_nodes(graph, &dominating_set_program(graph), backend, limits, validate_dominating_set)
}

/// Minimum vertex cover.
///
/// # Errors
/// Returns a solver error if the backend does not return a valid optimal assignment.
pub fn minimum_vertex_cover<G, B>(graph: &G, backend: &B, limits: &SolveLimits) -> Result<NodeSet, InvariantError>
where
    G: GraphView + ?Sized,
    B: SolverBackend + ?Sized,
{
    if graph.size() == 0 {
        return Ok(NodeSet::default());
    }
    solve_nodes(graph, &vertex_cover_program(graph), backend, limits, validate_vertex_cover)
}

/// Maximum matching.
///
/// # Errors
/// Returns a solver error if the backend does not return a valid optimal assignment.
pub fn maximum_matching<G, B>(graph: &G, backend: &B, limits: &SolveLimits) -> Result<EdgeSet, InvariantError>
where
    G: GraphView + ?Sized,
    B: SolverBackend + ?Sized,
{
    if graph.size() == 0 {
        return Ok(EdgeSet::default());
    }
    solve_edges(graph, &matching_program(graph), backend, limits, validate_matching)
}

/// Minimum edge dominating set.
///
/// # Errors
/// Returns a solver error if the backend does not return a valid optimal assignment.
pub fn minimum_edge_dominating_set<G, B>(graph: &G, backend: &B, limits: &SolveLimits) -> Result<EdgeSet, InvariantError>
where
    G: GraphView + ?Sized,
    B: SolverBackend + ?Sized,
{
    if graph.size() == 0 {
        return Ok(EdgeSet::default());
    }
    solve_edges(graph, &edge_dominating_set_program(graph), backend, limits, validate_edge_dominating_set)
}

/// Minimum proper coloring, with colors renumbered `0..chi` in ascending order.
///
/// The number of available colors is the greedy coloring's count, so the model is always
/// feasible.
///
/// # Errors
/// Returns a solver error if the backend does not return a valid optimal assignment.
pub fn minimum_proper_coloring<G, B>(graph: &G, backend: &B, limits: &SolveLimits) -> Result<Coloring, InvariantError>
where
    G: GraphView + ?Sized,
    B: SolverBackend + ?Sized,
{
    if graph.size() == 0 {
        return Ok(Coloring::new(graph.vertices().into_iter().map(|v| (v, 0))));
    }

    let upper = greedy_coloring(graph).colors_used();
    let formulation = coloring_program(graph, upper);
    let name = formulation.program.name();
    let values = submit(&formulation.program, backend, limits)?;

    let mut raw = Vec::with_capacity(formulation.vertices.len());
    for (&v, row) in formulation.vertices.iter().zip(&formulation.assign) {
        let chosen: Vec<usize> = row
            .iter()
            .enumerate()
            .filter(|(_, x)| is_selected(values[x.0]))
            .map(|(k, _)| k)
            .collect();
        match chosen.as_slice() {
            [k] => raw.push((v, *k)),
            _ => return Err(failed(name, format!("vertex {v} selected {} colors", chosen.len()))),
        }
    }

    let used: BTreeSet<usize> = raw.iter().map(|&(_, k)| k).collect();
    let renumber: BTreeMap<usize, usize> = used.into_iter().enumerate().map(|(i, k)| (k, i)).collect();
    let coloring = Coloring::new(raw.into_iter().map(|(v, k)| (v, renumber[&k])));
    validate_proper_coloring(graph, &coloring).map_err(|msg| failed(name, msg))?;
    Ok(coloring)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SimpleGraph;
    use crate::solver::{BranchAndBound, SolverOutcome};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    /// Brute-force independence number over all vertex subsets.
    fn brute_alpha(graph: &SimpleGraph) -> usize {
        let vertices = graph.vertices();
        let n = vertices.len();
        let mut best = 0;
        for mask in 0u32..(1 << n) {
            let set: Vec<Vertex> = (0..n).filter(|i| mask >> i & 1 == 1).map(|i| vertices[i]).collect();
            if set.len() > best && validate_independent_set(graph, &NodeSet::new(set)).is_ok() {
                best = mask.count_ones() as usize;
            }
        }
        best
    }

    /// Brute-force matching number by recursion over edges.
    fn brute_nu(edges: &[(Vertex, Vertex)], used: &mut BTreeSet<Vertex>) -> usize {
        let Some((&(u, v), rest)) = edges.split_first() else {
            return 0;
        };
        let skip = brute_nu(rest, used);
        if used.contains(&u) || used.contains(&v) {
            return skip;
        }
        used.insert(u);
        used.insert(v);
        let take = 1 + brute_nu(rest, used);
        used.remove(&u);
        used.remove(&v);
        skip.max(take)
    }

    /// A backend that returns a fixed outcome.
    struct Canned(SolverOutcome);

    impl SolverBackend for Canned {
        fn name(&self) -> &'static str {
            "canned"
        }

        fn solve(&self, _: &BinaryProgram, _: &SolveLimits) -> SolverOutcome {
            self.0.clone()
        }
    }

    #[test]
    fn coloring_program_shape() {
        let graph = SimpleGraph::star(5);
        let formulation = coloring_program(&graph, 2);
        // 2 color variables + 5 * 2 assignment variables.
        assert_eq!(formulation.program.num_variables(), 12);
        // 5 exactly-one + 10 linking + 4 edges * 2 colors + 1 symmetry-breaking.
        assert_eq!(formulation.program.constraints().len(), 5 + 10 + 8 + 1);
        assert_eq!(formulation.program.sense(), Sense::Minimize);
    }

    #[test]
    fn matching_program_skips_single_edge_vertices() {
        let formulation = matching_program(&SimpleGraph::path(3));
        assert_eq!(formulation.keys, vec![(1, 2), (2, 3)]);
        assert_eq!(formulation.program.constraints().len(), 1);
    }

    #[test]
    fn decode_uses_threshold() {
        let formulation = independent_set_program(&SimpleGraph::edgeless(3));
        assert_eq!(formulation.decode(&[0.5, 0.500_001, 0.98]), vec![2, 3]);
    }

    #[test]
    fn greedy_coloring_is_proper() {
        let mut rng = XorShiftRng::seed_from_u64(0x5555);
        for _ in 0..20 {
            let graph = SimpleGraph::new_random(&mut rng, 15, 0.4);
            let coloring = greedy_coloring(&graph);
            assert!(validate_proper_coloring(&graph, &coloring).is_ok());
        }
    }

    #[test]
    fn star_needs_two_colors() {
        let graph = SimpleGraph::star(5);
        let coloring = minimum_proper_coloring(&graph, &BranchAndBound, &SolveLimits::default()).unwrap();
        assert_eq!(coloring.colors_used(), 2);
        let center = coloring.color(1).unwrap();
        for leaf in 2..=5 {
            assert_ne!(coloring.color(leaf), Some(center));
        }
    }

    #[test]
    fn known_chromatic_numbers() {
        let limits = SolveLimits::default();
        let chi = |g: &SimpleGraph| minimum_proper_coloring(g, &BranchAndBound, &limits).unwrap().colors_used();
        assert_eq!(chi(&SimpleGraph::cycle(5)), 3);
        assert_eq!(chi(&SimpleGraph::cycle(6)), 2);
        assert_eq!(chi(&SimpleGraph::complete(4)), 4);
        assert_eq!(chi(&SimpleGraph::edgeless(3)), 1);
        assert_eq!(chi(&SimpleGraph::new()), 0);
    }

    #[test]
    fn c5_matching_number_is_two() {
        let matching = maximum_matching(&SimpleGraph::cycle(5), &BranchAndBound, &SolveLimits::default()).unwrap();
        assert_eq!(matching.len(), 2);
    }

    #[test]
    fn known_domination_numbers() {
        let limits = SolveLimits::default();
        let gamma = |g: &SimpleGraph| minimum_dominating_set(g, &BranchAndBound, &limits).unwrap().len();
        assert_eq!(gamma(&SimpleGraph::star(6)), 1);
        assert_eq!(gamma(&SimpleGraph::path(7)), 3);
        assert_eq!(gamma(&SimpleGraph::cycle(6)), 2);
        assert_eq!(gamma(&SimpleGraph::edgeless(3)), 3);
    }

    #[test]
    fn known_edge_domination_numbers() {
        let limits = SolveLimits::default();
        let gamma_e = |g: &SimpleGraph| minimum_edge_dominating_set(g, &BranchAndBound, &limits).unwrap().len();
        assert_eq!(gamma_e(&SimpleGraph::path(5)), 2);
        assert_eq!(gamma_e(&SimpleGraph::star(6)), 1);
        assert_eq!(gamma_e(&SimpleGraph::cycle(6)), 2);
        assert_eq!(gamma_e(&SimpleGraph::edgeless(4)), 0);
    }

    #[test]
    fn clique_and_cover_are_consistent() {
        let mut rng = XorShiftRng::seed_from_u64(0xAAAA);
        let limits = SolveLimits::default();
        for _ in 0..15 {
            let graph = SimpleGraph::new_random(&mut rng, 9, 0.5);
            let alpha = maximum_independent_set(&graph, &BranchAndBound, &limits).unwrap().len();
            let cover = minimum_vertex_cover(&graph, &BranchAndBound, &limits).unwrap().len();
            let omega_comp = maximum_clique(&graph.complement(), &BranchAndBound, &limits).unwrap().len();
            // Gallai: alpha + tau = n; alpha(G) = omega(complement of G).
            assert_eq!(alpha + cover, graph.order());
            assert_eq!(alpha, omega_comp);
        }
    }

    #[test]
    fn independent_set_matches_brute_force() {
        let mut rng = XorShiftRng::seed_from_u64(0xDEADBEEF);
        let limits = SolveLimits::default();
        for _ in 0..25 {
            let graph = SimpleGraph::new_random(&mut rng, 11, 0.35);
            let set = maximum_independent_set(&graph, &BranchAndBound, &limits).unwrap();
            assert_eq!(set.len(), brute_alpha(&graph));
        }
    }

    #[test]
    fn matching_matches_brute_force() {
        let mut rng = XorShiftRng::seed_from_u64(0x1234);
        let limits = SolveLimits::default();
        for _ in 0..25 {
            let graph = SimpleGraph::new_random(&mut rng, 9, 0.3);
            let matching = maximum_matching(&graph, &BranchAndBound, &limits).unwrap();
            assert_eq!(matching.len(), brute_nu(&graph.edges(), &mut BTreeSet::new()));
        }
    }

    #[test]
    fn infeasible_status_is_surfaced() {
        let backend = Canned(SolverOutcome::without_values(SolveStatus::Infeasible));
        let err = maximum_matching(&SimpleGraph::path(3), &backend, &SolveLimits::default()).unwrap_err();
        assert_eq!(err, InvariantError::SolverInfeasible { problem: "maximum matching" });
    }

    #[test]
    fn timeout_is_a_failure() {
        let backend = Canned(SolverOutcome::without_values(SolveStatus::TimedOut));
        let err = maximum_independent_set(&SimpleGraph::path(3), &backend, &SolveLimits::default()).unwrap_err();
        assert!(matches!(err, InvariantError::SolverFailed { .. }));
    }

    #[test]
    fn invalid_assignment_is_rejected() {
        // Selects both endpoints of the only edge.
        let backend = Canned(SolverOutcome {
            status: SolveStatus::Optimal,
            values: vec![1.0, 1.0],
            objective: Some(2.0),
        });
        let err = maximum_independent_set(&SimpleGraph::path(2), &backend, &SolveLimits::default()).unwrap_err();
        match err {
            InvariantError::SolverFailed { status, .. } => assert!(status.contains("adjacent")),
            other => panic!("expected SolverFailed, got {other:?}"),
        }
    }

    #[test]
    fn wrong_value_count_is_rejected() {
        let backend = Canned(SolverOutcome {
            status: SolveStatus::Optimal,
            values: vec![1.0],
            objective: Some(1.0),
        });
        let err = maximum_independent_set(&SimpleGraph::path(3), &backend, &SolveLimits::default()).unwrap_err();
        assert!(matches!(err, InvariantError::SolverFailed { .. }));
    }

    #[test]
    fn noisy_values_decode_correctly() {
        // Path 1-2-3: {1, 3} with solver noise.
        let backend = Canned(SolverOutcome {
            status: SolveStatus::Optimal,
            values: vec![0.999_999_8, 2e-7, 1.000_000_1],
            objective: Some(2.0),
        });
        let set = maximum_independent_set(&SimpleGraph::path(3), &backend, &SolveLimits::default()).unwrap();
        assert_eq!(set, NodeSet::new([1, 3]));
    }
}
