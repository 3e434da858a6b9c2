//! # Graph Invariants
//!
//! Exact computation of invariants of simple undirected graphs.
//!
//! This crate provides:
//! - The **Havel–Hakimi** reduction of a degree sequence, with an optional elimination trace,
//!   and the residue it leaves behind.
//! - A **propagation engine** for zero forcing and k-forcing closures, and the zero forcing
//!   number by exhaustive search.
//! - **Binary-program formulations** of matching, independence, chromatic, edge domination,
//!   domination, vertex cover and clique numbers, solved by a pluggable backend. The built-in
//!   backend is an exact branch-and-bound search.
//! - A **dispatcher** that maps an invariant name to its algorithm.
//!
//! ## Quick Start
//!
//! ```
//! use graph_invariants::prelude::*;
//!
//! let c5 = SimpleGraph::cycle(5);
//! let options = ComputeOptions::default();
//!
//! let nu = compute(&Invariant::MatchingNumber, &c5, &options).unwrap();
//! assert_eq!(nu.as_count(), Some(2));
//!
//! let chi = compute_named("chromatic_number", &c5, &options).unwrap();
//! assert_eq!(chi.as_count(), Some(3));
//! ```
//!
//! ## Degree Sequences
//!
//! ```
//! use graph_invariants::havel_hakimi::havel_hakimi_traced;
//!
//! let reduction = havel_hakimi_traced(vec![3, 3, 2, 2, 1, 1]).unwrap();
//! assert_eq!(reduction.trace().unwrap().removed(), &[3, 2, 1]);
//! assert_eq!(reduction.residue(), 3);
//!
//! assert!(havel_hakimi_traced(vec![4, 4, 1, 1, 1]).is_err());
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: The [`GraphView`](graph::GraphView) trait and an adjacency-set graph.
//! - [`havel_hakimi`]: Degree-sequence reduction.
//! - [`propagation`]: Zero forcing and k-forcing closures.
//! - [`solver`]: Binary programs, the backend trait, and the invariant formulations.
//! - [`optimal_set`]: Node sets, edge sets and colorings with set equality.
//! - [`validate`]: Checks applied to every decoded solver result.
//! - [`dispatch`]: Name-based routing to the algorithms above.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::many_single_char_names)] // Mathematical variable names
#![allow(clippy::doc_markdown)]
#![allow(clippy::multiple_crate_versions)] // Cargo.lock management is external

pub mod dispatch;
pub mod error;
pub mod graph;
pub mod havel_hakimi;
pub mod optimal_set;
pub mod options;
pub mod propagation;
pub mod solver;
pub mod validate;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::dispatch::{compute, compute_named, Invariant, InvariantDispatcher, InvariantResult};
    pub use crate::error::{GraphError, InvariantError};
    pub use crate::graph::{GraphView, SimpleGraph, Vertex};
    pub use crate::optimal_set::{optimal_sets_equal, Coloring, EdgeSet, NodeSet, OptimalSet};
    pub use crate::options::ComputeOptions;
    pub use crate::propagation::{Closure, PropagationEngine, ZeroForcing};
    pub use crate::solver::{BranchAndBound, SolveLimits, SolverBackend, SolverBackendKind};
}
