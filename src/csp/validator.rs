//! Assignment and model checks.

use super::types::{char_at, Assignment, ContractViolation};
use crate::puzzle::{PuzzleModel, SlotId};
use std::collections::HashSet;

/// Whether `assignment` respects lengths, word uniqueness and every
/// crossing between assigned slots.
///
/// A word held by a slot the model does not have is inconsistent.
pub fn consistent<M: PuzzleModel + ?Sized>(model: &M, assignment: &Assignment) -> bool {
    let variables = model.variables();
    let assigned: Vec<(SlotId, &str)> = assignment.iter().collect();

    let mut seen = HashSet::with_capacity(assigned.len());
    for &(slot, word) in &assigned {
        let length = variables.get(slot).map(|v| v.length);
        if length != Some(word.chars().count()) || !seen.insert(word) {
            return false;
        }
    }

    for (k, &(x, wx)) in assigned.iter().enumerate() {
        for &(y, wy) in &assigned[k + 1..] {
            if let Some((ix, iy)) = model.overlap(x, y) {
                if char_at(wx, ix) != char_at(wy, iy) {
                    return false;
                }
            }
        }
    }
    true
}

/// Checks only the constraints touching `slot`.
///
/// Equivalent to [`consistent`] when the rest of `assignment` was already
/// consistent, which holds for every extension made by the search.
pub fn consistent_with<M: PuzzleModel + ?Sized>(
    model: &M,
    assignment: &Assignment,
    slot: SlotId,
) -> bool {
    let Some(word) = assignment.get(slot) else {
        return true;
    };
    let length = model.variables().get(slot).map(|v| v.length);
    if length != Some(word.chars().count()) {
        return false;
    }
    if assignment.iter().any(|(other, w)| other != slot && w == word) {
        return false;
    }
    model.neighbors(slot).iter().all(|&other| {
        match (assignment.get(other), model.overlap(slot, other)) {
            (Some(w), Some((ix, iy))) => char_at(word, ix) == char_at(w, iy),
            _ => true,
        }
    })
}

/// Whether every slot holds a dictionary word.
pub fn is_complete<M: PuzzleModel + ?Sized>(model: &M, assignment: &Assignment) -> bool {
    assignment.slot_count() == model.slot_count()
        && assignment.len() == model.slot_count()
        && assignment.iter().all(|(_, word)| model.words().contains(word))
}

/// Checks the overlap relation and neighbor lists of `model`.
///
/// Overlap indices must fall inside both slots, overlaps must be
/// symmetric, and `neighbors(x)` must list exactly the slots crossing `x`.
pub fn validate_model<M: PuzzleModel + ?Sized>(model: &M) -> Result<(), ContractViolation> {
    let variables = model.variables();
    let n = variables.len();

    for x in 0..n {
        let neighbors: HashSet<SlotId> = model.neighbors(x).iter().copied().collect();
        if let Some(&y) = neighbors.iter().find(|&&y| y >= n || y == x) {
            return Err(ContractViolation::NeighborMismatch {
                x: variables[x],
                y,
            });
        }

        for y in (0..n).filter(|&y| y != x) {
            let overlap = model.overlap(x, y);
            if let Some((ix, iy)) = overlap {
                if ix >= variables[x].length || iy >= variables[y].length {
                    return Err(ContractViolation::OverlapOutOfRange {
                        x: variables[x],
                        y: variables[y],
                        overlap: (ix, iy),
                    });
                }
            }
            if model.overlap(y, x) != overlap.map(|(a, b)| (b, a)) {
                return Err(ContractViolation::AsymmetricOverlap {
                    x: variables[x],
                    y: variables[y],
                });
            }
            if overlap.is_some() != neighbors.contains(&y) {
                return Err(ContractViolation::NeighborMismatch {
                    x: variables[x],
                    y,
                });
            }
        }
    }
    Ok(())
}
