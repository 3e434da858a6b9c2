//! Bounded fixed-point propagation over a vertex marking.
//!
//! A [`PropagationRule`] looks at one marked vertex and its neighborhood and names the
//! vertices it forces. [`PropagationEngine`] applies the rule in full passes over the
//! vertex set until a pass forces nothing or the pass cap is reached.
//!
//! For forcing rules whose trigger only depends on a vertex's own neighborhood (zero
//! forcing, k-forcing) the final closure does not depend on the visitation order; only the
//! number of passes does.

use crate::graph::{GraphView, Vertex};
use std::collections::BTreeSet;
use tracing::{trace, warn};

/// Default cap on full passes.
pub const DEFAULT_ITERATION_CAP: usize = 100_000;

// ============================================================================
// MarkingState
// ============================================================================

/// Set of marked ("blue") vertices. Only ever grows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkingState {
    marked: BTreeSet<Vertex>,
}

impl MarkingState {
    /// Creates an empty marking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `v`; returns `true` if it was not marked before.
    #[inline]
    pub fn mark(&mut self, v: Vertex) -> bool {
        self.marked.insert(v)
    }

    /// Whether `v` is marked.
    #[inline]
    pub fn contains(&self, v: Vertex) -> bool {
        self.marked.contains(&v)
    }

    /// Number of marked vertices.
    pub fn len(&self) -> usize {
        self.marked.len()
    }

    /// Whether nothing is marked.
    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    /// Marked vertices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.marked.iter().copied()
    }

    /// Consumes the marking.
    pub fn into_set(self) -> BTreeSet<Vertex> {
        self.marked
    }
}

// ============================================================================
// Rules
// ============================================================================

/// A local forcing rule.
pub trait PropagationRule {
    /// Vertices forced by the marked vertex whose neighbors are `neighbors`.
    fn forced(&self, neighbors: &[Vertex], state: &MarkingState) -> Vec<Vertex>;
}

/// Zero forcing: a marked vertex with exactly one unmarked neighbor marks it.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroForcing;

impl PropagationRule for ZeroForcing {
    #[inline]
    fn forced(&self, neighbors: &[Vertex], state: &MarkingState) -> Vec<Vertex> {
        let mut unmarked = neighbors.iter().copied().filter(|&w| !state.contains(w));
        match (unmarked.next(), unmarked.next()) {
            (Some(w), None) => vec![w],
            _ => Vec::new(),
        }
    }
}

/// k-forcing: a marked vertex with between one and `k` unmarked neighbors marks all of them.
///
/// `KForcing { k: 1 }` is zero forcing.
#[derive(Clone, Copy, Debug)]
pub struct KForcing {
    /// Largest number of unmarked neighbors that still triggers a force.
    pub k: usize,
}

impl PropagationRule for KForcing {
    fn forced(&self, neighbors: &[Vertex], state: &MarkingState) -> Vec<Vertex> {
        let unmarked: Vec<Vertex> = neighbors
            .iter()
            .copied()
            .filter(|&w| !state.contains(w))
            .collect();
        if (1..=self.k).contains(&unmarked.len()) {
            unmarked
        } else {
            Vec::new()
        }
    }
}

// ============================================================================
// PropagationEngine
// ============================================================================

/// Final marking of one propagation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Closure {
    /// The marking at the fixed point (or at the cap).
    pub marked: MarkingState,
    /// Full passes executed, including the last one that forced nothing.
    pub passes: usize,
    /// `true` when the run stopped at the pass cap before reaching a fixed point.
    /// The marking is then a subset of the true closure.
    pub limit_reached: bool,
    /// Marking size after the initial seeding and after every pass.
    pub growth: Vec<usize>,
}

impl Closure {
    /// Number of marked vertices.
    pub fn len(&self) -> usize {
        self.marked.len()
    }

    /// Whether nothing is marked.
    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    /// Whether every vertex of `graph` is marked.
    pub fn covers<G: GraphView + ?Sized>(&self, graph: &G) -> bool {
        self.marked.len() == graph.order()
    }
}

/// Repeats full passes of a rule up to a pass cap.
#[derive(Clone, Copy, Debug)]
pub struct PropagationEngine {
    iteration_cap: usize,
}

impl Default for PropagationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATION_CAP)
    }
}

impl PropagationEngine {
    /// Creates an engine that stops after `iteration_cap` passes.
    pub fn new(iteration_cap: usize) -> Self {
        Self { iteration_cap }
    }

    /// The pass cap.
    pub fn iteration_cap(&self) -> usize {
        self.iteration_cap
    }

    /// Computes the closure of `initial`, visiting vertices in ascending order.
    pub fn run<G, R>(&self, graph: &G, initial: impl IntoIterator<Item = Vertex>, rule: &R) -> Closure
    where
        G: GraphView + ?Sized,
        R: PropagationRule + ?Sized,
    {
        let order = graph.vertices();
        self.run_in_order(graph, &order, initial, rule)
    }

    /// Computes the closure of `initial`, visiting vertices in `order` on every pass.
    ///
    /// Initial vertices that are not in the graph are ignored.
    pub fn run_in_order<G, R>(
        &self,
        graph: &G,
        order: &[Vertex],
        initial: impl IntoIterator<Item = Vertex>,
        rule: &R,
    ) -> Closure
    where
        G: GraphView + ?Sized,
        R: PropagationRule + ?Sized,
    {
        let mut state = MarkingState::new();
        for v in initial {
            if graph.contains_vertex(v) {
                state.mark(v);
            } else {
                warn!(vertex = v, "ignoring initial vertex not in graph");
            }
        }

        let mut growth = vec![state.len()];
        let mut passes = 0usize;
        let mut converged = false;

        while passes < self.iteration_cap {
            passes += 1;
            let mut progress = false;
            for &v in order {
                if !state.contains(v) {
                    continue;
                }
                let neighbors = graph.neighbors(v);
                for w in rule.forced(&neighbors, &state) {
                    progress |= state.mark(w);
                }
            }
            growth.push(state.len());
            trace!(pass = passes, marked = state.len(), "propagation pass");
            if !progress {
                converged = true;
                break;
            }
        }
        // A fully marked state is a fixed point even if the last pass still made progress.
        converged |= state.len() == graph.order();

        if !converged {
            warn!(
                cap = self.iteration_cap,
                marked = state.len(),
                "propagation stopped at pass cap"
            );
        }

        Closure {
            marked: state,
            passes,
            limit_reached: !converged,
            growth,
        }
    }
}

// ============================================================================
// Zero forcing number
// ============================================================================

/// Whether the closure of `set` under zero forcing is the whole vertex set.
pub fn is_zero_forcing_set<G: GraphView + ?Sized>(
    graph: &G,
    set: &[Vertex],
    engine: &PropagationEngine,
) -> bool {
    engine.run(graph, set.iter().copied(), &ZeroForcing).covers(graph)
}

/// Smallest zero forcing set, by exhaustive search over sets of increasing size.
///
/// The search starts at the minimum degree, a lower bound on the zero forcing number.
/// Exponential in the vertex count.
pub fn minimum_zero_forcing_set<G: GraphView + ?Sized>(
    graph: &G,
    engine: &PropagationEngine,
) -> Vec<Vertex> {
    let vertices = graph.vertices();
    let n = vertices.len();
    if n == 0 {
        return Vec::new();
    }
    let min_degree = vertices
        .iter()
        .map(|&v| graph.degree(v))
        .min()
        .unwrap_or(0);

    let mut candidate = Vec::with_capacity(n);
    for size in min_degree.max(1)..=n {
        let mut idx: Vec<usize> = (0..size).collect();
        loop {
            candidate.clear();
            candidate.extend(idx.iter().map(|&i| vertices[i]));
            let closure = engine.run_in_order(graph, &vertices, candidate.iter().copied(), &ZeroForcing);
            if closure.covers(graph) {
                return candidate;
            }
            if !next_combination(&mut idx, n) {
                break;
            }
        }
    }
    vertices
}

/// Zero forcing number: size of [`minimum_zero_forcing_set`].
pub fn zero_forcing_number<G: GraphView + ?Sized>(graph: &G, engine: &PropagationEngine) -> usize {
    minimum_zero_forcing_set(graph, engine).len()
}

/// Advances `idx` to the next `idx.len()`-subset of `0..n` in lexicographic order.
fn next_combination(idx: &mut [usize], n: usize) -> bool {
    let k = idx.len();
    let mut i = k;
    while i > 0 {
        i -= 1;
        if idx[i] < n - k + i {
            idx[i] += 1;
            for j in (i + 1)..k {
                idx[j] = idx[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

// ============================================================================
// Tests
// ============================================================================
