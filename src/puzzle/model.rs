//! Puzzle model: the grid geometry and dictionary the solver reads.

use super::variable::{Direction, Variable};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Index of a variable within [`PuzzleModel::variables`].
pub type SlotId = usize;

/// Character positions `(ix, iy)` at which two crossing slots share a cell.
pub type Overlap = (usize, usize);

/// Read-only view of a crossword puzzle consumed by the solver.
///
/// Implementations must keep the overlap relation symmetric
/// (`overlap(x, y) == Some((a, b))` iff `overlap(y, x) == Some((b, a))`)
/// and list as neighbors of `x` exactly the slots with a defined overlap.
/// [`crate::csp::validate_model`] checks this before every solve.
pub trait PuzzleModel {
    /// All slots, indexed by [`SlotId`].
    fn variables(&self) -> &[Variable];

    /// Shared-cell indices of `x` and `y`, if they cross.
    fn overlap(&self, x: SlotId, y: SlotId) -> Option<Overlap>;

    /// Slots crossing `x`.
    fn neighbors(&self, x: SlotId) -> &[SlotId];

    /// Candidate words.
    fn words(&self) -> &BTreeSet<String>;

    /// Number of slots.
    fn slot_count(&self) -> usize {
        self.variables().len()
    }
}

/// Error building a [`Crossword`].
#[derive(Debug)]
pub enum ParseError {
    /// The structure text contains no rows.
    EmptyStructure,
    /// A structure or word file could not be read.
    Io(std::io::Error),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyStructure => write!(f, "structure has no rows"),
            ParseError::Io(e) => write!(f, "failed to read puzzle input: {e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(e) => Some(e),
            ParseError::EmptyStructure => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        ParseError::Io(e)
    }
}

/// A rectangular crossword grid with its dictionary.
///
/// Open cells are written `_` in the structure text; every other character
/// is a block. Rows shorter than the widest row are padded with blocks.
///
/// # Examples
///
/// ```
/// use crossword_csp::puzzle::{Crossword, PuzzleModel};
///
/// let cw = Crossword::new("___\n#_#\n#_#", "cat\ncar\nart").unwrap();
/// assert_eq!(cw.slot_count(), 2);
/// assert_eq!(cw.overlap(0, 1), Some((1, 0)));
/// assert!(cw.words().contains("CAT"));
/// ```
#[derive(Debug, Clone)]
pub struct Crossword {
    /// Number of rows.
    pub height: usize,
    /// Number of columns.
    pub width: usize,
    /// `structure[i][j]` is true for open cells.
    pub structure: Vec<Vec<bool>>,
    words: BTreeSet<String>,
    variables: Vec<Variable>,
    overlaps: HashMap<(SlotId, SlotId), Overlap>,
    neighbors: Vec<Vec<SlotId>>,
}

impl Crossword {
    /// Parses a structure and a newline-separated word list.
    ///
    /// Words are trimmed and upper-cased; blank lines are skipped.
    pub fn new(structure: &str, words: &str) -> Result<Self, ParseError> {
        let lines: Vec<&str> = structure.lines().collect();
        if lines.is_empty() {
            return Err(ParseError::EmptyStructure);
        }
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let grid = lines
            .iter()
            .map(|line| {
                let mut row: Vec<bool> = line.chars().map(|c| c == '_').collect();
                row.resize(width, false);
                row
            })
            .collect();

        let words = words
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_uppercase);

        Ok(Self::from_grid(grid, words))
    }

    /// Reads the structure and word list from files.
    pub fn from_files(
        structure: impl AsRef<Path>,
        words: impl AsRef<Path>,
    ) -> Result<Self, ParseError> {
        let structure = std::fs::read_to_string(structure)?;
        let words = std::fs::read_to_string(words)?;
        Self::new(&structure, &words)
    }

    /// Builds a crossword from an open-cell grid and words used verbatim.
    pub fn from_grid<I, S>(structure: Vec<Vec<bool>>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let height = structure.len();
        let width = structure.iter().map(Vec::len).max().unwrap_or(0);
        let open = |i: usize, j: usize| structure[i].get(j).copied().unwrap_or(false);

        let mut variables = Vec::new();
        for i in 0..height {
            for j in 0..width {
                if !open(i, j) {
                    continue;
                }
                if j == 0 || !open(i, j - 1) {
                    let length = (j..width).take_while(|&k| open(i, k)).count();
                    if length > 1 {
                        variables.push(Variable::new(i, j, Direction::Across, length));
                    }
                }
                if i == 0 || !open(i - 1, j) {
                    let length = (i..height).take_while(|&k| open(k, j)).count();
                    if length > 1 {
                        variables.push(Variable::new(i, j, Direction::Down, length));
                    }
                }
            }
        }

        let mut overlaps = HashMap::new();
        let mut neighbors = vec![Vec::new(); variables.len()];
        for (x, vx) in variables.iter().enumerate() {
            for (y, vy) in variables.iter().enumerate() {
                if x == y {
                    continue;
                }
                let shared = vx
                    .cells()
                    .enumerate()
                    .find_map(|(ix, cell)| vy.index_of(cell).map(|iy| (ix, iy)));
                if let Some(overlap) = shared {
                    overlaps.insert((x, y), overlap);
                    neighbors[x].push(y);
                }
            }
        }

        Self {
            height,
            width,
            structure,
            words: words.into_iter().map(Into::into).collect(),
            variables,
            overlaps,
            neighbors,
        }
    }

    /// Whether `(i, j)` is an open cell.
    pub fn is_open(&self, i: usize, j: usize) -> bool {
        self.structure
            .get(i)
            .and_then(|row| row.get(j))
            .copied()
            .unwrap_or(false)
    }

    /// Looks up the [`SlotId`] of a variable.
    pub fn slot_of(&self, variable: &Variable) -> Option<SlotId> {
        self.variables.iter().position(|v| v == variable)
    }
}

impl PuzzleModel for Crossword {
    fn variables(&self) -> &[Variable] {
        &self.variables
    }

    fn overlap(&self, x: SlotId, y: SlotId) -> Option<Overlap> {
        self.overlaps.get(&(x, y)).copied()
    }

    fn neighbors(&self, x: SlotId) -> &[SlotId] {
        &self.neighbors[x]
    }

    fn words(&self) -> &BTreeSet<String> {
        &self.words
    }
}
