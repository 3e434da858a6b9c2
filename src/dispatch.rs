//! Routing from an invariant name to the algorithm that computes it.

use crate::error::InvariantError;
use crate::graph::{GraphView, Vertex};
use crate::havel_hakimi;
use crate::optimal_set::{Coloring, OptimalSet};
use crate::options::ComputeOptions;
use crate::propagation::{self, Closure, ZeroForcing};
use crate::solver::formulation;
use crate::solver::SolverBackend;
use rayon::prelude::*;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

// ============================================================================
// Invariant
// ============================================================================

/// Invariants the dispatcher knows how to compute.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Invariant {
    /// Number of zeros left when Havel–Hakimi terminates on the degree sequence.
    HavelHakimiResidue,
    /// Size of a smallest zero forcing set.
    ZeroForcingNumber,
    /// Zero forcing closure of the given initial vertices.
    ZeroForcingClosure(Vec<Vertex>),
    /// Size of a maximum matching.
    MatchingNumber,
    /// A maximum matching.
    MaximumMatching,
    /// Size of a maximum independent set.
    IndependenceNumber,
    /// A maximum independent set.
    MaximumIndependentSet,
    /// Fewest colors in a proper coloring.
    ChromaticNumber,
    /// A proper coloring with the fewest colors.
    MinimumProperColoring,
    /// Size of a minimum edge dominating set.
    EdgeDominationNumber,
    /// A minimum edge dominating set.
    MinimumEdgeDominatingSet,
    /// Size of a minimum dominating set.
    DominationNumber,
    /// A minimum dominating set.
    MinimumDominatingSet,
    /// Size of a minimum vertex cover.
    VertexCoverNumber,
    /// A minimum vertex cover.
    MinimumVertexCover,
    /// Size of a maximum clique.
    CliqueNumber,
    /// A maximum clique.
    MaximumClique,
}

impl Invariant {
    /// Every scalar invariant.
    pub const COUNTS: [Invariant; 9] = [
        Invariant::HavelHakimiResidue,
        Invariant::ZeroForcingNumber,
        Invariant::MatchingNumber,
        Invariant::IndependenceNumber,
        Invariant::ChromaticNumber,
        Invariant::EdgeDominationNumber,
        Invariant::DominationNumber,
        Invariant::VertexCoverNumber,
        Invariant::CliqueNumber,
    ];

    /// Snake-case name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Invariant::HavelHakimiResidue => "havel_hakimi_residue",
            Invariant::ZeroForcingNumber => "zero_forcing_number",
            Invariant::ZeroForcingClosure(_) => "zero_forcing_closure",
            Invariant::MatchingNumber => "matching_number",
            Invariant::MaximumMatching => "maximum_matching",
            Invariant::IndependenceNumber => "independence_number",
            Invariant::MaximumIndependentSet => "maximum_independent_set",
            Invariant::ChromaticNumber => "chromatic_number",
            Invariant::MinimumProperColoring => "minimum_proper_coloring",
            Invariant::EdgeDominationNumber => "edge_domination_number",
            Invariant::MinimumEdgeDominatingSet => "minimum_edge_dominating_set",
            Invariant::DominationNumber => "domination_number",
            Invariant::MinimumDominatingSet => "minimum_dominating_set",
            Invariant::VertexCoverNumber => "vertex_cover_number",
            Invariant::MinimumVertexCover => "minimum_vertex_cover",
            Invariant::CliqueNumber => "clique_number",
            Invariant::MaximumClique => "maximum_clique",
        }
    }

    /// Whether computing this invariant goes through a solver backend.
    pub fn uses_solver(&self) -> bool {
        !matches!(
            self,
            Invariant::HavelHakimiResidue | Invariant::ZeroForcingNumber | Invariant::ZeroForcingClosure(_)
        )
    }
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invariant::ZeroForcingClosure(initial) if !initial.is_empty() => {
                let list: Vec<String> = initial.iter().map(ToString::to_string).collect();
                write!(f, "{}:{}", self.name(), list.join(","))
            }
            _ => f.write_str(self.name()),
        }
    }
}

impl FromStr for Invariant {
    type Err = InvariantError;

    /// Parses a snake-case name. The closure takes its initial vertices after a colon,
    /// e.g. `zero_forcing_closure:1,4`; without them the initial set is empty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsupported = || InvariantError::UnsupportedInvariant { name: s.to_string() };
        let (head, args) = match s.trim().split_once(':') {
            Some((head, args)) => (head, Some(args)),
            None => (s.trim(), None),
        };

        if head == "zero_forcing_closure" {
            let initial = match args.map(str::trim) {
                None | Some("") => Vec::new(),
                Some(list) => list
                    .split(',')
                    .map(|v| v.trim().parse::<Vertex>())
                    .collect::<Result<Vec<Vertex>, _>>()
                    .map_err(|_| unsupported())?,
            };
            return Ok(Invariant::ZeroForcingClosure(initial));
        }
        if args.is_some() {
            return Err(unsupported());
        }

        let invariant = match head {
            "havel_hakimi_residue" => Invariant::HavelHakimiResidue,
            "zero_forcing_number" => Invariant::ZeroForcingNumber,
            "matching_number" => Invariant::MatchingNumber,
            "maximum_matching" => Invariant::MaximumMatching,
            "independence_number" => Invariant::IndependenceNumber,
            "maximum_independent_set" => Invariant::MaximumIndependentSet,
            "chromatic_number" => Invariant::ChromaticNumber,
            "minimum_proper_coloring" => Invariant::MinimumProperColoring,
            "edge_domination_number" => Invariant::EdgeDominationNumber,
            "minimum_edge_dominating_set" => Invariant::MinimumEdgeDominatingSet,
            "domination_number" => Invariant::DominationNumber,
            "minimum_dominating_set" => Invariant::MinimumDominatingSet,
            "vertex_cover_number" => Invariant::VertexCoverNumber,
            "minimum_vertex_cover" => Invariant::MinimumVertexCover,
            "clique_number" => Invariant::CliqueNumber,
            "maximum_clique" => Invariant::MaximumClique,
            _ => return Err(unsupported()),
        };
        Ok(invariant)
    }
}

// ============================================================================
// InvariantResult
// ============================================================================

/// Value of a computed invariant.
#[derive(Clone, Debug)]
pub enum InvariantResult {
    /// A scalar invariant.
    Count(usize),
    /// An optimal vertex or edge set.
    Set(OptimalSet),
    /// An optimal coloring.
    Coloring(Coloring),
    /// A propagation closure.
    Closure(Closure),
}

impl InvariantResult {
    /// The scalar, if this is a count.
    pub fn as_count(&self) -> Option<usize> {
        match self {
            InvariantResult::Count(n) => Some(*n),
            _ => None,
        }
    }

    /// The set, if this is one.
    pub fn as_set(&self) -> Option<&OptimalSet> {
        match self {
            InvariantResult::Set(set) => Some(set),
            _ => None,
        }
    }

    /// The coloring, if this is one.
    pub fn as_coloring(&self) -> Option<&Coloring> {
        match self {
            InvariantResult::Coloring(coloring) => Some(coloring),
            _ => None,
        }
    }

    /// The closure, if this is one.
    pub fn as_closure(&self) -> Option<&Closure> {
        match self {
            InvariantResult::Closure(closure) => Some(closure),
            _ => None,
        }
    }

    /// The count, the set's cardinality, the number of colors, or the closure size.
    pub fn size(&self) -> usize {
        match self {
            InvariantResult::Count(n) => *n,
            InvariantResult::Set(set) => set.len(),
            InvariantResult::Coloring(coloring) => coloring.colors_used(),
            InvariantResult::Closure(closure) => closure.len(),
        }
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Computes invariants with one solver backend and one set of options.
///
/// The backend is shared by reference across calls, including the parallel calls of
/// [`compute_all`](Self::compute_all).
pub struct InvariantDispatcher<B = Box<dyn SolverBackend>> {
    backend: B,
    options: ComputeOptions,
}

impl InvariantDispatcher {
    /// Dispatcher using the backend named in `options`.
    pub fn new(options: ComputeOptions) -> Self {
        Self {
            backend: options.solver_backend.instantiate(),
            options,
        }
    }
}

impl Default for InvariantDispatcher {
    fn default() -> Self {
        Self::new(ComputeOptions::default())
    }
}

impl<B: SolverBackend> InvariantDispatcher<B> {
    /// Dispatcher using a caller-supplied backend; `options.solver_backend` is ignored.
    pub fn with_backend(backend: B, options: ComputeOptions) -> Self {
        Self { backend, options }
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The options.
    pub fn options(&self) -> &ComputeOptions {
        &self.options
    }

    /// Computes one invariant.
    ///
    /// # Errors
    /// Returns [`InvariantError::Graphicality`] if the degree sequence fails Havel–Hakimi, and
    /// the solver errors of [`formulation`] for solver-backed invariants.
    pub fn compute<G: GraphView + ?Sized>(
        &self,
        invariant: &Invariant,
        graph: &G,
    ) -> Result<InvariantResult, InvariantError> {
        debug!(
            invariant = invariant.name(),
            order = graph.order(),
            size = graph.size(),
            "computing invariant"
        );
        let backend = &self.backend;
        let limits = &self.options.solver_limits;

        let result = match invariant {
            Invariant::HavelHakimiResidue => InvariantResult::Count(havel_hakimi::residue(graph)?),
            Invariant::ZeroForcingNumber => {
                InvariantResult::Count(propagation::zero_forcing_number(graph, &self.options.engine()))
            }
            Invariant::ZeroForcingClosure(initial) => InvariantResult::Closure(self.options.engine().run(
                graph,
                initial.iter().copied(),
                &ZeroForcing,
            )),
            Invariant::MatchingNumber => {
                InvariantResult::Count(formulation::maximum_matching(graph, backend, limits)?.len())
            }
            Invariant::MaximumMatching => {
                InvariantResult::Set(formulation::maximum_matching(graph, backend, limits)?.into())
            }
            Invariant::IndependenceNumber => {
                InvariantResult::Count(formulation::maximum_independent_set(graph, backend, limits)?.len())
            }
            Invariant::MaximumIndependentSet => {
                InvariantResult::Set(formulation::maximum_independent_set(graph, backend, limits)?.into())
            }
            Invariant::ChromaticNumber => InvariantResult::Count(
                formulation::minimum_proper_coloring(graph, backend, limits)?.colors_used(),
            ),
            Invariant::MinimumProperColoring => {
                InvariantResult::Coloring(formulation::minimum_proper_coloring(graph, backend, limits)?)
            }
            Invariant::EdgeDominationNumber => InvariantResult::Count(
                formulation::minimum_edge_dominating_set(graph, backend, limits)?.len(),
            ),
            Invariant::MinimumEdgeDominatingSet => {
                InvariantResult::Set(formulation::minimum_edge_dominating_set(graph, backend, limits)?.into())
            }
            Invariant::DominationNumber => {
                InvariantResult::Count(formulation::minimum_dominating_set(graph, backend, limits)?.len())
            }
            Invariant::MinimumDominatingSet => {
                InvariantResult::Set(formulation::minimum_dominating_set(graph, backend, limits)?.into())
            }
            Invariant::VertexCoverNumber => {
                InvariantResult::Count(formulation::minimum_vertex_cover(graph, backend, limits)?.len())
            }
            Invariant::MinimumVertexCover => {
                InvariantResult::Set(formulation::minimum_vertex_cover(graph, backend, limits)?.into())
            }
            Invariant::CliqueNumber => {
                InvariantResult::Count(formulation::maximum_clique(graph, backend, limits)?.len())
            }
            Invariant::MaximumClique => {
                InvariantResult::Set(formulation::maximum_clique(graph, backend, limits)?.into())
            }
        };

        debug!(invariant = invariant.name(), size = result.size(), "invariant computed");
        Ok(result)
    }

    /// Parses `name` and computes it.
    ///
    /// # Errors
    /// Returns [`InvariantError::UnsupportedInvariant`] for an unknown name, otherwise as
    /// [`compute`](Self::compute).
    pub fn compute_named<G: GraphView + ?Sized>(
        &self,
        name: &str,
        graph: &G,
    ) -> Result<InvariantResult, InvariantError> {
        let invariant: Invariant = name.parse()?;
        self.compute(&invariant, graph)
    }

    /// Computes several invariants of one graph in parallel; results keep the input order.
    pub fn compute_all<G: GraphView + Sync + ?Sized>(
        &self,
        invariants: &[Invariant],
        graph: &G,
    ) -> Vec<Result<InvariantResult, InvariantError>> {
        debug!(count = invariants.len(), "computing invariants in parallel");
        invariants
            .par_iter()
            .map(|invariant| self.compute(invariant, graph))
            .collect()
    }
}

/// Computes one invariant with the backend named in `options`.
///
/// # Errors
/// As [`InvariantDispatcher::compute`].
pub fn compute<G: GraphView + ?Sized>(
    invariant: &Invariant,
    graph: &G,
    options: &ComputeOptions,
) -> Result<InvariantResult, InvariantError> {
    InvariantDispatcher::new(*options).compute(invariant, graph)
}

/// Parses `name` and computes it with the backend named in `options`.
///
/// # Errors
/// As [`InvariantDispatcher::compute_named`].
pub fn compute_named<G: GraphView + ?Sized>(
    name: &str,
    graph: &G,
    options: &ComputeOptions,
) -> Result<InvariantResult, InvariantError> {
    InvariantDispatcher::new(*options).compute_named(name, graph)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SimpleGraph;

    #[test]
    fn names_round_trip() {
        for invariant in Invariant::COUNTS {
            assert_eq!(invariant.name().parse::<Invariant>().unwrap(), invariant);
        }
        assert_eq!(
            "minimum_proper_coloring".parse::<Invariant>().unwrap(),
            Invariant::MinimumProperColoring
        );
    }

    #[test]
    fn closure_name_carries_initial_set() {
        let parsed: Invariant = "zero_forcing_closure:1, 4".parse().unwrap();
        assert_eq!(parsed, Invariant::ZeroForcingClosure(vec![1, 4]));
        assert_eq!(parsed.to_string(), "zero_forcing_closure:1,4");
        assert_eq!(
            "zero_forcing_closure".parse::<Invariant>().unwrap(),
            Invariant::ZeroForcingClosure(Vec::new())
        );
        assert!("zero_forcing_closure:x".parse::<Invariant>().is_err());
    }

    #[test]
    fn unknown_names_are_unsupported() {
        for name in ["girth", "matching_number:3", ""] {
            assert_eq!(
                name.parse::<Invariant>(),
                Err(InvariantError::UnsupportedInvariant { name: name.to_string() })
            );
        }
    }

    #[test]
    fn result_shapes_follow_the_invariant() {
        let graph = SimpleGraph::path(4);
        let options = ComputeOptions::default();
        let matching = compute(&Invariant::MaximumMatching, &graph, &options).unwrap();
        assert!(matching.as_set().and_then(OptimalSet::as_edges).is_some());
        let cover = compute(&Invariant::MinimumVertexCover, &graph, &options).unwrap();
        assert!(cover.as_set().and_then(OptimalSet::as_nodes).is_some());
        let coloring = compute(&Invariant::MinimumProperColoring, &graph, &options).unwrap();
        assert_eq!(coloring.as_coloring().map(Coloring::colors_used), Some(2));
        let closure = compute(&Invariant::ZeroForcingClosure(vec![1]), &graph, &options).unwrap();
        assert_eq!(closure.as_closure().map(Closure::len), Some(4));
        assert_eq!(closure.as_count(), None);
    }

    #[test]
    fn path_invariants() {
        let graph = SimpleGraph::path(5);
        let dispatcher = InvariantDispatcher::new(ComputeOptions::default());
        let count = |name: &str| dispatcher.compute_named(name, &graph).unwrap().size();
        assert_eq!(count("zero_forcing_number"), 1);
        assert_eq!(count("matching_number"), 2);
        assert_eq!(count("independence_number"), 3);
        assert_eq!(count("chromatic_number"), 2);
        assert_eq!(count("domination_number"), 2);
        assert_eq!(count("vertex_cover_number"), 2);
        assert_eq!(count("clique_number"), 2);
        assert_eq!(count("edge_domination_number"), 2);
    }

    #[test]
    fn compute_named_rejects_unknown_names() {
        let dispatcher = InvariantDispatcher::new(ComputeOptions::default());
        let err = dispatcher.compute_named("nope", &SimpleGraph::new()).unwrap_err();
        assert!(matches!(err, InvariantError::UnsupportedInvariant { .. }));
    }

    #[test]
    fn solver_usage_flag() {
        assert!(!Invariant::HavelHakimiResidue.uses_solver());
        assert!(!Invariant::ZeroForcingClosure(vec![]).uses_solver());
        assert!(Invariant::ChromaticNumber.uses_solver());
    }
}
