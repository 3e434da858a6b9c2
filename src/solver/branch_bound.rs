//! Exact depth-first branch-and-bound for small binary programs.
//!
//! Each node fixes one variable, then tightens the partial assignment by bound propagation:
//! for every constraint the smallest and largest achievable left-hand sides are computed
//! from the free variables, which either proves the node infeasible or forces further
//! variables. Nodes whose optimistic objective cannot beat the incumbent are cut.
//!
//! Variables are branched in index order, so formulations control the search order by the
//! order in which they create variables.

use super::{BinaryProgram, Comparison, Sense, SolveLimits, SolveStatus, SolverBackend, SolverOutcome};
use std::time::Instant;

const EPS: f64 = 1e-9;

/// The built-in exact backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct BranchAndBound;

impl BranchAndBound {
    /// Creates the backend.
    pub fn new() -> Self {
        Self
    }
}

impl SolverBackend for BranchAndBound {
    fn name(&self) -> &'static str {
        "branch-and-bound"
    }

    fn solve(&self, program: &BinaryProgram, limits: &SolveLimits) -> SolverOutcome {
        let mut search = Search::new(program, *limits);
        let mut root = vec![None; program.num_variables()];
        if search.propagate(&mut root) {
            search.descend(root);
        }

        let status = if search.aborted {
            SolveStatus::TimedOut
        } else if search.best.is_some() {
            SolveStatus::Optimal
        } else {
            SolveStatus::Infeasible
        };
        tracing::debug!(
            problem = program.name(),
            nodes = search.nodes,
            %status,
            "branch-and-bound finished"
        );

        match search.best {
            Some((objective, assignment)) => SolverOutcome {
                status,
                values: assignment.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect(),
                objective: Some(objective),
            },
            None => SolverOutcome::without_values(status),
        }
    }
}

// ============================================================================
// Search
// ============================================================================

type Partial = Vec<Option<bool>>;

struct Search<'a> {
    program: &'a BinaryProgram,
    limits: SolveLimits,
    started: Instant,
    /// Objective coefficient per variable (terms on the same variable are summed).
    costs: Vec<f64>,
    nodes: u64,
    aborted: bool,
    best: Option<(f64, Vec<bool>)>,
}

impl<'a> Search<'a> {
    fn new(program: &'a BinaryProgram, limits: SolveLimits) -> Self {
        let mut costs = vec![0.0; program.num_variables()];
        for &(v, c) in program.objective() {
            costs[v.0] += c;
        }
        Self {
            program,
            limits,
            started: Instant::now(),
            costs,
            nodes: 0,
            aborted: false,
            best: None,
        }
    }

    fn out_of_budget(&self) -> bool {
        if self.limits.node_limit.is_some_and(|limit| self.nodes > limit) {
            return true;
        }
        self.limits
            .time_limit
            .is_some_and(|limit| self.started.elapsed() >= limit)
    }

    /// Best objective any completion of `partial` could reach.
    fn optimistic_bound(&self, partial: &Partial) -> f64 {
        let maximize = self.program.sense() == Sense::Maximize;
        let mut bound = 0.0;
        for (value, &c) in partial.iter().zip(&self.costs) {
            bound += match value {
                Some(true) => c,
                Some(false) => 0.0,
                None if maximize => c.max(0.0),
                None => c.min(0.0),
            };
        }
        bound
    }

    fn improves(&self, candidate: f64) -> bool {
        match (&self.best, self.program.sense()) {
            (None, _) => true,
            (Some((best, _)), Sense::Maximize) => candidate > best + EPS,
            (Some((best, _)), Sense::Minimize) => candidate < best - EPS,
        }
    }

    /// Value tried first for a free variable: the one that looks better for the objective.
    fn preferred_value(&self, var: usize) -> bool {
        let c = self.costs[var];
        match self.program.sense() {
            Sense::Maximize => c >= 0.0,
            Sense::Minimize => c <= 0.0,
        }
    }

    fn descend(&mut self, partial: Partial) {
        if self.aborted {
            return;
        }
        self.nodes += 1;
        if self.out_of_budget() {
            self.aborted = true;
            return;
        }
        if !self.improves(self.optimistic_bound(&partial)) {
            return;
        }

        let Some(var) = partial.iter().position(Option::is_none) else {
            let value = self.optimistic_bound(&partial);
            let assignment = partial.iter().map(|v| v.unwrap_or(false)).collect();
            self.best = Some((value, assignment));
            return;
        };

        let first = self.preferred_value(var);
        for value in [first, !first] {
            let mut child = partial.clone();
            child[var] = Some(value);
            if self.propagate(&mut child) {
                self.descend(child);
            }
            if self.aborted {
                return;
            }
        }
    }

    /// Tightens `partial` to a fixed point; returns `false` on a conflict.
    fn propagate(&self, partial: &mut Partial) -> bool {
        loop {
            let mut changed = false;
            for constraint in self.program.constraints() {
                let mut fixed = 0.0;
                let mut free_min = 0.0;
                let mut free_max = 0.0;
                for &(v, c) in &constraint.terms {
                    match partial[v.0] {
                        Some(true) => fixed += c,
                        Some(false) => {}
                        None if c < 0.0 => free_min += c,
                        None => free_max += c,
                    }
                }
                let lo = fixed + free_min;
                let hi = fixed + free_max;
                let need_le = matches!(constraint.cmp, Comparison::LessEq | Comparison::Eq);
                let need_ge = matches!(constraint.cmp, Comparison::GreaterEq | Comparison::Eq);
                let rhs = constraint.rhs;

                if (need_le && lo > rhs + EPS) || (need_ge && hi < rhs - EPS) {
                    return false;
                }

                for &(v, c) in &constraint.terms {
                    if partial[v.0].is_some() || c == 0.0 {
                        continue;
                    }
                    // lo/hi may be stale after earlier forcings in this loop; the next round
                    // recomputes them.
                    let mut must: Option<bool> = None;
                    let mut conflict = false;
                    let mut require = |value: bool| match must {
                        Some(prev) if prev != value => conflict = true,
                        _ => must = Some(value),
                    };
                    if need_le {
                        if c > 0.0 && lo + c > rhs + EPS {
                            require(false);
                        } else if c < 0.0 && lo - c > rhs + EPS {
                            require(true);
                        }
                    }
                    if need_ge {
                        if c > 0.0 && hi - c < rhs - EPS {
                            require(true);
                        } else if c < 0.0 && hi + c < rhs - EPS {
                            require(false);
                        }
                    }
                    if conflict {
                        return false;
                    }
                    if let Some(value) = must {
                        partial[v.0] = Some(value);
                        changed = true;
                    }
                }
            }
            if !changed {
                return true;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
