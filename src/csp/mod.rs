//! Crossword constraint satisfaction solver.
//!
//! Each slot of a [`PuzzleModel`](crate::puzzle::PuzzleModel) is a variable
//! whose domain is the set of dictionary words that could fill it.
//!
//! # Key Components
//!
//! - **Domains**: [`Domains`] — per-slot candidate sets
//! - **Consistency**: [`enforce_node_consistency`], [`revise`], [`ac3`]
//! - **Validation**: [`consistent`], [`is_complete`], [`validate_model`]
//! - **Heuristics**: [`select_unassigned_variable`] (MRV + degree),
//!   [`order_domain_values`] (least constraining value)
//! - **Search**: [`CspRunner`] — backtracking with optional inference,
//!   step/time budgets and cancellation
//!
//! # Outcomes
//!
//! A solve yields [`SolveOutcome::Solved`], [`SolveOutcome::Unsatisfiable`]
//! or [`SolveOutcome::Aborted`]. A malformed model is reported as a
//! [`ContractViolation`] error instead.
//!
//! # References
//!
//! - Mackworth (1977), "Consistency in Networks of Relations"
//! - Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//!   Constraint Satisfaction Problems"

mod config;
mod consistency;
mod heuristics;
mod runner;
mod types;
mod validator;

pub use config::{ArcQueue, SolverConfig};
pub use consistency::{ac3, enforce_node_consistency, propagate, revise, Propagation};
pub use heuristics::{order_domain_values, select_unassigned_variable};
pub use runner::{CspRunner, SearchStats, SolveResult};
pub use types::{AbortReason, Assignment, ContractViolation, Domains, SolveOutcome};
pub use validator::{consistent, consistent_with, is_complete, validate_model};
