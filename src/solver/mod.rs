//! Binary linear programs and the adapter boundary to the solver that answers them.
//!
//! [`BinaryProgram`] is the only thing a backend ever sees: 0/1 variables, linear
//! constraints, a linear objective. [`SolverBackend`] returns a value per variable plus a
//! [`SolveStatus`]. Values are read back through [`is_selected`], which treats anything above
//! [`SELECTION_THRESHOLD`] as chosen.

pub mod branch_bound;
pub mod formulation;

pub use branch_bound::BranchAndBound;

use std::fmt;
use std::time::Duration;

/// A variable is selected iff its value is strictly greater than this.
///
/// Backends may return values like `0.9999999` or `1e-9`; `0.5` itself counts as not selected.
pub const SELECTION_THRESHOLD: f64 = 0.5;

/// Whether a returned variable value means "selected".
#[inline]
pub fn is_selected(value: f64) -> bool {
    value > SELECTION_THRESHOLD
}

// ============================================================================
// Model
// ============================================================================

/// Index of a variable inside its [`BinaryProgram`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub usize);

/// Relation between a constraint's left-hand side and its right-hand side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    /// `lhs <= rhs`
    LessEq,
    /// `lhs == rhs`
    Eq,
    /// `lhs >= rhs`
    GreaterEq,
}

/// `sum(coef * x) <cmp> rhs`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearConstraint {
    /// Coefficient per variable.
    pub terms: Vec<(VarId, f64)>,
    /// Relation.
    pub cmp: Comparison,
    /// Right-hand side.
    pub rhs: f64,
}

impl LinearConstraint {
    /// Left-hand side under `values`.
    pub fn activity(&self, values: &[f64]) -> f64 {
        self.terms.iter().map(|&(v, c)| c * values[v.0]).sum()
    }

    /// Whether `values` satisfy the constraint within `tol`.
    pub fn is_satisfied_by(&self, values: &[f64], tol: f64) -> bool {
        let lhs = self.activity(values);
        match self.cmp {
            Comparison::LessEq => lhs <= self.rhs + tol,
            Comparison::Eq => (lhs - self.rhs).abs() <= tol,
            Comparison::GreaterEq => lhs >= self.rhs - tol,
        }
    }
}

/// Optimization direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sense {
    /// Minimize the objective.
    Minimize,
    /// Maximize the objective.
    Maximize,
}

/// A 0/1 linear program.
#[derive(Clone, Debug)]
pub struct BinaryProgram {
    name: &'static str,
    sense: Sense,
    variables: Vec<String>,
    constraints: Vec<LinearConstraint>,
    objective: Vec<(VarId, f64)>,
}

impl BinaryProgram {
    /// Creates an empty program.
    pub fn new(name: &'static str, sense: Sense) -> Self {
        Self {
            name,
            sense,
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: Vec::new(),
        }
    }

    /// Adds a binary variable.
    pub fn add_variable(&mut self, name: impl Into<String>) -> VarId {
        self.variables.push(name.into());
        VarId(self.variables.len() - 1)
    }

    /// Adds `sum(terms) <cmp> rhs`.
    pub fn add_constraint(&mut self, terms: Vec<(VarId, f64)>, cmp: Comparison, rhs: f64) {
        debug_assert!(terms.iter().all(|(v, _)| v.0 < self.variables.len()));
        self.constraints.push(LinearConstraint { terms, cmp, rhs });
    }

    /// Adds `coef * var` to the objective.
    pub fn add_objective_term(&mut self, var: VarId, coef: f64) {
        self.objective.push((var, coef));
    }

    /// Name of the formulation, used in diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Optimization direction.
    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Variable names.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Number of variables.
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Constraints.
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Objective terms.
    pub fn objective(&self) -> &[(VarId, f64)] {
        &self.objective
    }

    /// Objective value under `values`.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.objective.iter().map(|&(v, c)| c * values[v.0]).sum()
    }

    /// Whether `values` satisfy every constraint within `tol`.
    pub fn is_feasible(&self, values: &[f64], tol: f64) -> bool {
        values.len() == self.variables.len()
            && self.constraints.iter().all(|c| c.is_satisfied_by(values, tol))
    }
}

// ============================================================================
// Backend boundary
// ============================================================================

/// Budget handed to a backend for one solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveLimits {
    /// Wall-clock budget.
    pub time_limit: Option<Duration>,
    /// Maximum number of search nodes, for backends that count them.
    pub node_limit: Option<u64>,
}

/// Final state reported by a backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// The returned assignment is proven optimal.
    Optimal,
    /// No assignment satisfies the constraints.
    Infeasible,
    /// A limit was hit; `values` holds the best assignment found, if any.
    TimedOut,
    /// The backend failed for another reason.
    Failed(String),
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "optimal"),
            SolveStatus::Infeasible => write!(f, "infeasible"),
            SolveStatus::TimedOut => write!(f, "limit reached before optimality was proven"),
            SolveStatus::Failed(msg) => write!(f, "failed: {msg}"),
        }
    }
}

/// What a backend returns.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverOutcome {
    /// Status of the solve.
    pub status: SolveStatus,
    /// One value per variable; empty when no assignment is available.
    pub values: Vec<f64>,
    /// Objective value of `values`, when present.
    pub objective: Option<f64>,
}

impl SolverOutcome {
    /// Outcome carrying no assignment.
    pub fn without_values(status: SolveStatus) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective: None,
        }
    }
}

/// Anything that can solve a [`BinaryProgram`].
///
/// `solve` takes `&self` and must not keep per-call state in the backend, so one backend can
/// serve concurrent computations.
pub trait SolverBackend: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Solves `program` within `limits`.
    fn solve(&self, program: &BinaryProgram, limits: &SolveLimits) -> SolverOutcome;
}

impl<B: SolverBackend + ?Sized> SolverBackend for Box<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, program: &BinaryProgram, limits: &SolveLimits) -> SolverOutcome {
        (**self).solve(program, limits)
    }
}

impl<B: SolverBackend + ?Sized> SolverBackend for std::sync::Arc<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, program: &BinaryProgram, limits: &SolveLimits) -> SolverOutcome {
        (**self).solve(program, limits)
    }
}

/// Backends that can be selected by name in [`ComputeOptions`](crate::options::ComputeOptions).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SolverBackendKind {
    /// The built-in exact [`BranchAndBound`] search.
    #[default]
    BranchAndBound,
}

impl SolverBackendKind {
    /// Creates the backend.
    pub fn instantiate(self) -> Box<dyn SolverBackend> {
        match self {
            SolverBackendKind::BranchAndBound => Box::new(BranchAndBound::new()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_threshold_boundary() {
        assert!(!is_selected(0.5));
        assert!(is_selected(0.500_000_1));
        assert!(is_selected(0.999_999_9));
        assert!(!is_selected(1e-9));
        assert!(!is_selected(-0.0));
    }

    #[test]
    fn constraint_satisfaction_uses_tolerance() {
        let mut program = BinaryProgram::new("test", Sense::Maximize);
        let a = program.add_variable("a");
        let b = program.add_variable("b");
        program.add_constraint(vec![(a, 1.0), (b, 1.0)], Comparison::LessEq, 1.0);
        program.add_constraint(vec![(a, 1.0)], Comparison::Eq, 1.0);
        assert!(program.is_feasible(&[1.0, 0.0], 1e-6));
        assert!(program.is_feasible(&[0.999_999_9, 1e-8], 1e-6));
        assert!(!program.is_feasible(&[1.0, 1.0], 1e-6));
        assert!(!program.is_feasible(&[1.0], 1e-6));
    }

    #[test]
    fn evaluate_sums_objective() {
        let mut program = BinaryProgram::new("test", Sense::Minimize);
        let a = program.add_variable("a");
        let b = program.add_variable("b");
        program.add_objective_term(a, 2.0);
        program.add_objective_term(b, 3.0);
        assert_eq!(program.evaluate(&[1.0, 1.0]), 5.0);
        assert_eq!(program.objective().len(), 2);
        assert_eq!(program.variables(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn status_display_is_descriptive() {
        assert_eq!(SolveStatus::Optimal.to_string(), "optimal");
        assert_eq!(
            SolveStatus::Failed("boom".into()).to_string(),
            "failed: boom"
        );
    }
}
