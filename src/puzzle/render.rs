//! Text rendering of a (partial) fill.

use super::model::{Crossword, PuzzleModel};
use crate::csp::Assignment;

/// Glyph drawn for blocked cells.
pub const BLOCK: char = '█';

/// Letters placed in each cell by `assignment`; `None` for empty cells.
pub fn letter_grid(crossword: &Crossword, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; crossword.width]; crossword.height];
    let variables = crossword.variables();
    for (slot, word) in assignment.iter() {
        let variable = &variables[slot];
        for (k, ch) in word.chars().enumerate().take(variable.length) {
            let (i, j) = variable.cell(k);
            letters[i][j] = Some(ch);
        }
    }
    letters
}

/// Renders the grid one row per line, blocks as [`BLOCK`] and unfilled
/// open cells as spaces.
pub fn render(crossword: &Crossword, assignment: &Assignment) -> String {
    let letters = letter_grid(crossword, assignment);
    let mut out = String::with_capacity(crossword.height * (crossword.width + 1));
    for (i, row) in letters.iter().enumerate() {
        for (j, letter) in row.iter().enumerate() {
            if crossword.is_open(i, j) {
                out.push(letter.unwrap_or(' '));
            } else {
                out.push(BLOCK);
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_full() {
        let cw = Crossword::new("___\n#_#", "").unwrap();
        let mut assignment = Assignment::new(cw.slot_count());
        assignment.assign(0, "CAT".into()).unwrap();
        assignment.assign(1, "AX".into()).unwrap();
        assert_eq!(render(&cw, &assignment), "CAT\n█X█\n");
    }

    #[test]
    fn test_render_partial() {
        let cw = Crossword::new("___\n#_#", "").unwrap();
        let mut assignment = Assignment::new(cw.slot_count());
        assignment.assign(1, "AX".into()).unwrap();
        let grid = letter_grid(&cw, &assignment);
        assert_eq!(grid[0], vec![None, Some('A'), None]);
        assert_eq!(render(&cw, &assignment), " A \n█X█\n");
    }
}
