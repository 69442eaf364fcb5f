//! Crossword filling as a constraint satisfaction problem.
//!
//! Given a grid of word slots and a dictionary, finds words for every slot
//! so that crossing slots agree on their shared letters:
//!
//! - **Puzzle model**: [`puzzle::Crossword`] parses a grid structure and a
//!   word list into slots, overlaps and neighbors behind the
//!   [`puzzle::PuzzleModel`] trait.
//! - **Consistency**: node consistency (word length) and AC-3 arc
//!   consistency prune every slot's candidate set before searching.
//! - **Search**: [`csp::CspRunner`] runs depth-first backtracking ordered
//!   by minimum remaining values, degree and least constraining value.
//!
//! The solver returns the first fill it finds, a proof that none exists,
//! or an abort when a step/time budget or cancellation token stops it.
//!
//! # Examples
//!
//! ```
//! use crossword_csp::csp::{CspRunner, SolveOutcome, SolverConfig};
//! use crossword_csp::puzzle::{render, Crossword};
//!
//! let crossword = Crossword::new("___\n#_#\n#_#", "cat\ncar\nart").unwrap();
//! let result = CspRunner::run(&crossword, &SolverConfig::default()).unwrap();
//!
//! match result.outcome {
//!     SolveOutcome::Solved(fill) => print!("{}", render(&crossword, &fill)),
//!     other => panic!("expected a fill, got {other:?}"),
//! }
//! ```

pub mod csp;
pub mod puzzle;
