//! Havel–Hakimi reduction of degree sequences.
//!
//! Each step sorts the sequence descending, removes the leading degree `Δ` and subtracts one
//! from the next `Δ` entries. The sequence is graphical iff repeated steps reach all zeros;
//! the number of zeros left at that point is the Havel–Hakimi residue, a lower bound on the
//! independence number.

use crate::error::{GraphicalityViolation, InvariantError};
use crate::graph::GraphView;
use tracing::trace;

// ============================================================================
// EliminationTrace
// ============================================================================

/// Leading degrees removed by each reduction step, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EliminationTrace {
    removed: Vec<i64>,
    trailing_zeros: Option<usize>,
}

impl EliminationTrace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removed leading degrees; one entry per step.
    pub fn removed(&self) -> &[i64] {
        &self.removed
    }

    /// Number of steps recorded.
    pub fn steps(&self) -> usize {
        self.removed.len()
    }

    /// Zeros left when the reduction finished, or `None` while it is still running.
    pub fn trailing_zeros(&self) -> Option<usize> {
        self.trailing_zeros
    }

    fn push(&mut self, degree: i64) {
        self.removed.push(degree);
    }
}

// ============================================================================
// SequenceReducer
// ============================================================================

/// Outcome of a single reduction step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// A leading degree was removed; another step may apply.
    Reduced,
    /// Every entry is zero; no further step applies.
    Exhausted,
}

/// Havel–Hakimi reducer over an owned degree buffer.
#[derive(Clone, Debug)]
pub struct SequenceReducer {
    degrees: Vec<i64>,
    trace: Option<EliminationTrace>,
    steps: usize,
}

impl SequenceReducer {
    /// Creates a reducer that does not record an elimination trace.
    pub fn new(degrees: impl Into<Vec<i64>>) -> Self {
        Self {
            degrees: degrees.into(),
            trace: None,
            steps: 0,
        }
    }

    /// Creates a reducer that records every removed leading degree.
    pub fn with_trace(degrees: impl Into<Vec<i64>>) -> Self {
        Self {
            trace: Some(EliminationTrace::new()),
            ..Self::new(degrees)
        }
    }

    /// Current sequence; sorted descending after the first step.
    pub fn sequence(&self) -> &[i64] {
        &self.degrees
    }

    /// The trace, if this reducer records one.
    pub fn trace(&self) -> Option<&EliminationTrace> {
        self.trace.as_ref()
    }

    /// Number of successful steps so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Performs one reduction step.
    ///
    /// # Errors
    /// Returns [`InvariantError::Graphicality`] if the leading degree is negative, exceeds
    /// `len - 1`, or drives a following entry below zero. The sequence is then left sorted
    /// descending, with no entry decremented.
    pub fn step(&mut self) -> Result<Step, InvariantError> {
        if self.degrees.iter().all(|&d| d == 0) {
            if let Some(trace) = self.trace.as_mut() {
                trace.trailing_zeros = Some(self.degrees.len());
            }
            return Ok(Step::Exhausted);
        }

        self.degrees.sort_unstable_by(|a, b| b.cmp(a));
        let len = self.degrees.len();
        let delta = self.degrees[0];

        let fail = |reason| InvariantError::Graphicality {
            step: self.steps,
            degree: delta,
            remaining: len,
            reason,
        };

        if delta < 0 {
            return Err(fail(GraphicalityViolation::NegativeDegree));
        }
        let delta_len = delta as usize;
        if delta_len > len - 1 {
            return Err(fail(GraphicalityViolation::DegreeTooLarge));
        }
        if self.degrees[1..=delta_len].iter().any(|&d| d - 1 < 0) {
            return Err(fail(GraphicalityViolation::NegativeResidual));
        }

        for d in &mut self.degrees[1..=delta_len] {
            *d -= 1;
        }
        self.degrees.remove(0);
        if let Some(trace) = self.trace.as_mut() {
            trace.push(delta);
        }
        self.steps += 1;
        trace!(step = self.steps, delta, remaining = self.degrees.len(), "havel-hakimi step");
        Ok(Step::Reduced)
    }

    /// Steps until exhausted.
    ///
    /// Terminates because every successful step shortens the sequence by one.
    ///
    /// # Errors
    /// Propagates the first [`InvariantError::Graphicality`].
    pub fn run(mut self) -> Result<Reduction, InvariantError> {
        while self.step()? == Step::Reduced {}
        Ok(Reduction {
            remaining: self.degrees,
            trace: self.trace,
            steps: self.steps,
        })
    }
}

/// Result of a completed reduction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reduction {
    remaining: Vec<i64>,
    trace: Option<EliminationTrace>,
    steps: usize,
}

impl Reduction {
    /// Havel–Hakimi residue: the number of zeros left.
    pub fn residue(&self) -> usize {
        self.remaining.len()
    }

    /// Number of steps performed.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Elimination trace, if one was recorded.
    pub fn trace(&self) -> Option<&EliminationTrace> {
        self.trace.as_ref()
    }
}

// ============================================================================
// Convenience entry points
// ============================================================================

/// Runs the reduction to completion without a trace.
///
/// # Errors
/// Returns [`InvariantError::Graphicality`] for non-graphical input.
pub fn havel_hakimi(degrees: impl Into<Vec<i64>>) -> Result<Reduction, InvariantError> {
    SequenceReducer::new(degrees).run()
}

/// Runs the reduction to completion, recording the elimination trace.
///
/// # Errors
/// Returns [`InvariantError::Graphicality`] for non-graphical input.
pub fn havel_hakimi_traced(degrees: impl Into<Vec<i64>>) -> Result<Reduction, InvariantError> {
    SequenceReducer::with_trace(degrees).run()
}

/// Havel–Hakimi residue of a graph's degree sequence.
///
/// # Errors
/// Only fails if the view reports an inconsistent degree sequence.
pub fn residue<G: GraphView + ?Sized>(graph: &G) -> Result<usize, InvariantError> {
    havel_hakimi(graph.degree_sequence()).map(|r| r.residue())
}

/// Whether the sequence is realizable by a simple graph, by Havel–Hakimi.
pub fn is_graphical(degrees: &[i64]) -> bool {
    havel_hakimi(degrees.to_vec()).is_ok()
}

/// Erdős–Gallai test: for sorted `d_1 >= ... >= d_n` with even sum,
/// \(\sum_{i \le k} d_i \le k(k-1) + \sum_{i > k} \min(d_i, k)\) for every `k`.
pub fn satisfies_erdos_gallai(degrees: &[i64]) -> bool {
    if degrees.iter().any(|&d| d < 0) {
        return false;
    }
    if degrees.iter().sum::<i64>() % 2 != 0 {
        return false;
    }
    let mut sorted = degrees.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut prefix = 0i64;
    for k in 1..=sorted.len() {
        prefix += sorted[k - 1];
        let kk = k as i64;
        let tail: i64 = sorted[k..].iter().map(|&d| d.min(kk)).sum();
        if prefix > kk * (kk - 1) + tail {
            return false;
        }
    }
    true
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SimpleGraph;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn single_step_matches_documented_trace() {
        let mut reducer = SequenceReducer::with_trace(vec![3, 3, 2, 2, 1, 1]);
        assert_eq!(reducer.step().unwrap(), Step::Reduced);
        assert_eq!(reducer.trace().unwrap().removed(), &[3]);
        assert_eq!(reducer.sequence(), &[2, 1, 1, 1, 1]);
        assert_eq!(reducer.steps(), 1);
    }

    #[test]
    fn full_run_reaches_zeros() {
        let reduction = havel_hakimi_traced(vec![3, 3, 2, 2, 1, 1]).unwrap();
        let trace = reduction.trace().unwrap();
        assert_eq!(trace.removed(), &[3, 2, 1]);
        assert_eq!(trace.trailing_zeros(), Some(3));
        assert_eq!(reduction.steps(), 3);
        assert_eq!(reduction.residue(), 3);
    }

    #[test]
    fn non_graphical_sequence_fails() {
        let err = havel_hakimi(vec![4, 4, 1, 1, 1]).unwrap_err();
        assert_eq!(
            err,
            InvariantError::Graphicality {
                step: 1,
                degree: 3,
                remaining: 4,
                reason: GraphicalityViolation::NegativeResidual,
            }
        );
    }

    #[test]
    fn degree_too_large_fails_immediately() {
        let err = havel_hakimi(vec![3, 1, 1]).unwrap_err();
        assert!(matches!(
            err,
            InvariantError::Graphicality {
                step: 0,
                reason: GraphicalityViolation::DegreeTooLarge,
                ..
            }
        ));
    }

    #[test]
    fn negative_degree_fails() {
        let err = havel_hakimi(vec![0, -1]).unwrap_err();
        assert!(matches!(
            err,
            InvariantError::Graphicality {
                reason: GraphicalityViolation::NegativeDegree,
                ..
            }
        ));
    }

    #[test]
    fn odd_sum_fails() {
        assert!(!is_graphical(&[1, 1, 1]));
        assert!(!satisfies_erdos_gallai(&[1, 1, 1]));
    }

    #[test]
    fn failed_step_leaves_no_partial_trace_entry() {
        let mut reducer = SequenceReducer::with_trace(vec![4, 4, 1, 1, 1]);
        assert_eq!(reducer.step().unwrap(), Step::Reduced);
        assert!(reducer.step().is_err());
        assert_eq!(reducer.trace().unwrap().removed(), &[4]);
        assert_eq!(reducer.trace().unwrap().trailing_zeros(), None);
        assert_eq!(reducer.sequence(), &[3, 0, 0, 0]);
    }

    #[test]
    fn failed_first_step_leaves_sequence_sorted_and_undecremented() {
        let mut reducer = SequenceReducer::new(vec![1, 3, 0, 0]);
        let err = reducer.step().unwrap_err();
        assert_eq!(
            err,
            InvariantError::Graphicality {
                step: 0,
                degree: 3,
                remaining: 4,
                reason: GraphicalityViolation::NegativeResidual,
            }
        );
        assert_eq!(reducer.sequence(), &[3, 1, 0, 0]);
        assert_eq!(reducer.steps(), 0);
    }

    #[test]
    fn empty_sequence_has_zero_residue() {
        let reduction = havel_hakimi_traced(Vec::new()).unwrap();
        assert_eq!(reduction.residue(), 0);
        assert_eq!(reduction.steps(), 0);
        assert_eq!(reduction.trace().unwrap().trailing_zeros(), Some(0));
    }

    #[test]
    fn known_residues() {
        assert_eq!(residue(&SimpleGraph::complete(5)).unwrap(), 1);
        assert_eq!(residue(&SimpleGraph::star(5)).unwrap(), 4);
        assert_eq!(residue(&SimpleGraph::edgeless(6)).unwrap(), 6);
        assert_eq!(residue(&SimpleGraph::cycle(5)).unwrap(), 2);
        assert_eq!(residue(&SimpleGraph::new()).unwrap(), 0);
    }

    #[test]
    fn graph_degree_sequences_are_graphical() {
        let mut rng = XorShiftRng::seed_from_u64(0xDEADBEEF);
        for _ in 0..50 {
            let graph = SimpleGraph::new_random(&mut rng, 16, 0.35);
            let reduction = havel_hakimi_traced(graph.degree_sequence()).unwrap();
            assert_eq!(reduction.steps() + reduction.residue(), 16);
            assert_eq!(reduction.trace().unwrap().steps(), reduction.steps());
        }
    }

    proptest! {
        #[test]
        fn havel_hakimi_agrees_with_erdos_gallai(degrees in prop::collection::vec(0i64..8, 0..10)) {
            prop_assert_eq!(is_graphical(&degrees), satisfies_erdos_gallai(&degrees));
        }

        #[test]
        fn steps_shrink_sequence_by_one(degrees in prop::collection::vec(0i64..6, 1..9)) {
            let mut reducer = SequenceReducer::new(degrees);
            loop {
                let before = reducer.sequence().len();
                match reducer.step() {
                    Ok(Step::Reduced) => prop_assert_eq!(reducer.sequence().len(), before - 1),
                    Ok(Step::Exhausted) | Err(_) => break,
                }
            }
        }
    }
}
