//! Per-computation configuration.

use crate::propagation::{PropagationEngine, DEFAULT_ITERATION_CAP};
use crate::solver::{SolveLimits, SolverBackendKind};
use std::time::Duration;

/// Options accepted by [`compute`](crate::dispatch::compute).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComputeOptions {
    /// Backend used for solver-backed invariants.
    pub solver_backend: SolverBackendKind,
    /// Maximum number of propagation passes before a closure is cut off.
    pub iteration_cap: usize,
    /// Budget handed to the backend on every solve.
    pub solver_limits: SolveLimits,
}

impl Default for ComputeOptions {
    fn default() -> Self {
        Self {
            solver_backend: SolverBackendKind::BranchAndBound,
            iteration_cap: DEFAULT_ITERATION_CAP,
            solver_limits: SolveLimits::default(),
        }
    }
}

impl ComputeOptions {
    /// Sets the solver backend.
    #[must_use]
    pub fn with_solver_backend(mut self, backend: SolverBackendKind) -> Self {
        self.solver_backend = backend;
        self
    }

    /// Sets the propagation pass cap.
    #[must_use]
    pub fn with_iteration_cap(mut self, cap: usize) -> Self {
        self.iteration_cap = cap;
        self
    }

    /// Sets the wall-clock budget per solve.
    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.solver_limits.time_limit = Some(limit);
        self
    }

    /// Sets the search-node budget per solve.
    #[must_use]
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.solver_limits.node_limit = Some(limit);
        self
    }

    /// Propagation engine configured with this pass cap.
    pub fn engine(&self) -> PropagationEngine {
        PropagationEngine::new(self.iteration_cap)
    }
}
