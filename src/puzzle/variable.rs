//! Slot variables.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Orientation of a slot in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Left to right.
    Across,
    /// Top to bottom.
    Down,
}

/// A word slot: a maximal run of open cells in one direction.
///
/// Equality, hashing and ordering are by all four fields, so two slots
/// starting on the same cell in different directions are distinct.
///
/// # Examples
///
/// ```
/// use crossword_csp::puzzle::{Direction, Variable};
///
/// let v = Variable::new(1, 0, Direction::Down, 3);
/// let cells: Vec<_> = v.cells().collect();
/// assert_eq!(cells, vec![(1, 0), (2, 0), (3, 0)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variable {
    /// Start row.
    pub i: usize,
    /// Start column.
    pub j: usize,
    /// Orientation.
    pub direction: Direction,
    /// Number of cells.
    pub length: usize,
}

impl Variable {
    /// Creates a slot starting at row `i`, column `j`.
    pub fn new(i: usize, j: usize, direction: Direction, length: usize) -> Self {
        Self {
            i,
            j,
            direction,
            length,
        }
    }

    /// The `(row, column)` cells covered by this slot, in word order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(move |k| self.cell(k))
    }

    /// The cell holding character `k` of this slot's word.
    pub fn cell(&self, k: usize) -> (usize, usize) {
        match self.direction {
            Direction::Across => (self.i, self.j + k),
            Direction::Down => (self.i + k, self.j),
        }
    }

    /// Position of `cell` within this slot, if the slot covers it.
    pub fn index_of(&self, cell: (usize, usize)) -> Option<usize> {
        let (row, col) = cell;
        match self.direction {
            Direction::Across if row == self.i && col >= self.j && col < self.j + self.length => {
                Some(col - self.j)
            }
            Direction::Down if col == self.j && row >= self.i && row < self.i + self.length => {
                Some(row - self.i)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dir = match self.direction {
            Direction::Across => "across",
            Direction::Down => "down",
        };
        write!(f, "({}, {}) {dir} : {}", self.i, self.j, self.length)
    }
}
