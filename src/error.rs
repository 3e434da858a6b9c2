//! Error types for invariant computation and graph construction.

use crate::graph::Vertex;
use thiserror::Error;

/// Errors surfaced by [`compute`](crate::dispatch::compute) and the strategies behind it.
///
/// None of these are recovered inside the crate; they reach the caller verbatim.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantError {
    /// The degree sequence cannot be realized by any simple graph.
    #[error("sequence is not graphical at step {step}: leading degree {degree} with {remaining} entries ({reason})")]
    Graphicality {
        /// Zero-based reduction step at which the failure was detected.
        step: usize,
        /// Leading degree of that step.
        degree: i64,
        /// Sequence length at that step.
        remaining: usize,
        /// Which check failed.
        reason: GraphicalityViolation,
    },

    /// The solver proved the formulation infeasible.
    #[error("solver reported {problem} infeasible")]
    SolverInfeasible {
        /// Name of the formulation that was submitted.
        problem: &'static str,
    },

    /// The solver timed out, failed, or returned an assignment that does not decode.
    #[error("solver failed on {problem}: {status}")]
    SolverFailed {
        /// Name of the formulation that was submitted.
        problem: &'static str,
        /// Diagnostic status from the backend or the decoder.
        status: String,
    },

    /// No strategy is registered for the requested invariant name.
    #[error("unsupported invariant: '{name}'")]
    UnsupportedInvariant {
        /// The name that failed to resolve.
        name: String,
    },

    /// A node set was compared to an edge set.
    #[error("cannot compare a {left} set with a {right} set")]
    TypeMismatch {
        /// Kind of the left operand.
        left: &'static str,
        /// Kind of the right operand.
        right: &'static str,
    },
}

/// The check a Havel–Hakimi step failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphicalityViolation {
    /// The leading degree is negative.
    NegativeDegree,
    /// The leading degree exceeds the number of remaining entries minus one.
    DegreeTooLarge,
    /// Subtracting from the following entries drove one below zero.
    NegativeResidual,
}

impl std::fmt::Display for GraphicalityViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphicalityViolation::NegativeDegree => write!(f, "negative degree"),
            GraphicalityViolation::DegreeTooLarge => write!(f, "degree exceeds length - 1"),
            GraphicalityViolation::NegativeResidual => write!(f, "residual degree below zero"),
        }
    }
}

/// Errors encountered while building or parsing a [`SimpleGraph`](crate::graph::SimpleGraph).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// No non-empty rows were found.
    #[error("adjacency matrix is empty")]
    Empty,

    /// Matrix is not square.
    #[error("adjacency matrix is not square: row {row} has length {got}, expected {expected}")]
    NonSquare {
        /// The row index with wrong length.
        row: usize,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Encountered a non `0/1` character.
    #[error("invalid character at ({row}, {col}): {ch:?} (expected '0' or '1')")]
    InvalidChar {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// The invalid character.
        ch: char,
    },

    /// An edge joins a vertex to itself.
    #[error("self-loop detected at vertex {vertex}")]
    SelfLoop {
        /// The vertex with a self-loop.
        vertex: Vertex,
    },

    /// `A[i][j] != A[j][i]`.
    #[error("matrix is not symmetric at ({i},{j})")]
    NotSymmetric {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
    },

    /// An edge names a vertex that was never added.
    #[error("edge ({u}, {v}) references unknown vertex")]
    UnknownVertex {
        /// First endpoint.
        u: Vertex,
        /// Second endpoint.
        v: Vertex,
    },
}
