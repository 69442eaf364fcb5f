//! Variable and value ordering for the backtracking search.
//!
//! - Variables: minimum remaining values, ties broken by degree.
//! - Values: least constraining value first.

use super::types::{char_at, Assignment, Domains};
use crate::puzzle::{PuzzleModel, SlotId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Picks the unassigned slot with the fewest candidates, preferring the
/// one crossing the most slots on a tie.
///
/// Remaining ties go to the lowest [`SlotId`], or to a random member of
/// the tied set when `rng` is given. Returns `None` once every slot is
/// assigned.
pub fn select_unassigned_variable<M: PuzzleModel + ?Sized>(
    model: &M,
    domains: &Domains,
    assignment: &Assignment,
    rng: Option<&mut StdRng>,
) -> Option<SlotId> {
    let key = |slot: SlotId| (domains.size(slot), Reverse(model.neighbors(slot).len()));
    let unassigned = || (0..model.slot_count()).filter(move |&slot| !assignment.is_assigned(slot));

    let best = unassigned().map(key).min()?;
    let tied: Vec<SlotId> = unassigned().filter(|&slot| key(slot) == best).collect();

    match rng {
        Some(rng) => Some(tied[rng.random_range(0..tied.len())]),
        None => tied.first().copied(),
    }
}

/// Candidates of `slot` sorted by how many words they would rule out in
/// the domains of unassigned crossing slots, fewest first.
///
/// Candidates with equal counts keep dictionary order, or a shuffled
/// order when `rng` is given.
pub fn order_domain_values<M: PuzzleModel + ?Sized>(
    model: &M,
    domains: &Domains,
    slot: SlotId,
    assignment: &Assignment,
    rng: Option<&mut StdRng>,
    parallel: bool,
) -> Vec<String> {
    // For each unassigned neighbor: the overlap index into `slot`'s word,
    // the neighbor's domain size and how many of its words carry each
    // letter at the shared cell.
    let crossings: Vec<(usize, usize, HashMap<char, usize>)> = model
        .neighbors(slot)
        .iter()
        .filter(|&&other| !assignment.is_assigned(other))
        .filter_map(|&other| {
            let (ix, iy) = model.overlap(slot, other)?;
            let mut letters: HashMap<char, usize> = HashMap::new();
            for word in domains.get(other) {
                if let Some(c) = char_at(word, iy) {
                    *letters.entry(c).or_default() += 1;
                }
            }
            Some((ix, domains.size(other), letters))
        })
        .collect();

    let ruled_out = |word: &str| -> usize {
        crossings
            .iter()
            .map(|(ix, size, letters)| {
                let kept = char_at(word, *ix)
                    .and_then(|c| letters.get(&c))
                    .copied()
                    .unwrap_or(0);
                size - kept
            })
            .sum()
    };

    let mut candidates: Vec<&String> = domains.get(slot).iter().collect();
    if let Some(rng) = rng {
        candidates.shuffle(rng);
    }

    let mut scored = score(candidates, ruled_out, parallel);
    scored.sort_by_key(|&(count, _)| count);
    scored.into_iter().map(|(_, word)| word.clone()).collect()
}

#[cfg(feature = "parallel")]
fn score<'a, F>(candidates: Vec<&'a String>, ruled_out: F, parallel: bool) -> Vec<(usize, &'a String)>
where
    F: Fn(&str) -> usize + Sync,
{
    use rayon::prelude::*;

    if parallel {
        candidates
            .into_par_iter()
            .map(|word| (ruled_out(word.as_str()), word))
            .collect()
    } else {
        candidates.into_iter().map(|word| (ruled_out(word.as_str()), word)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn score<'a, F>(candidates: Vec<&'a String>, ruled_out: F, _parallel: bool) -> Vec<(usize, &'a String)>
where
    F: Fn(&str) -> usize,
{
    candidates.into_iter().map(|word| (ruled_out(word.as_str()), word)).collect()
}
