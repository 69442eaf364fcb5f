//! Crossword puzzle model.
//!
//! - **Variables**: [`Variable`] identifies a slot by start cell, direction
//!   and length.
//! - **Model**: [`PuzzleModel`] is the read-only interface the solver
//!   consumes; [`Crossword`] implements it for a parsed grid.
//! - **Rendering**: [`letter_grid`] and [`render`] turn an assignment back
//!   into a grid of letters.

mod model;
mod render;
mod variable;

pub use model::{Crossword, Overlap, ParseError, PuzzleModel, SlotId};
pub use render::{letter_grid, render, BLOCK};
pub use variable::{Direction, Variable};
