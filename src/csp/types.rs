//! Domain store, assignment and solver outcome types.

use crate::puzzle::{Overlap, PuzzleModel, SlotId, Variable};
use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Character `k` of `word`, counted in `char`s.
pub(crate) fn char_at(word: &str, k: usize) -> Option<char> {
    word.chars().nth(k)
}

/// Candidate words for every slot, indexed by [`SlotId`].
///
/// Seeded with the full dictionary and only ever shrunk by the
/// consistency engine. Cloning yields an independent snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    sets: Vec<BTreeSet<String>>,
}

impl Domains {
    /// Gives every slot of `model` a copy of the whole dictionary.
    pub fn new<M: PuzzleModel + ?Sized>(model: &M) -> Self {
        Self {
            sets: vec![model.words().clone(); model.slot_count()],
        }
    }

    /// Candidates of `slot`.
    pub fn get(&self, slot: SlotId) -> &BTreeSet<String> {
        &self.sets[slot]
    }

    /// Mutable candidates of `slot`.
    pub fn get_mut(&mut self, slot: SlotId) -> &mut BTreeSet<String> {
        &mut self.sets[slot]
    }

    /// Number of candidates left for `slot`.
    pub fn size(&self, slot: SlotId) -> usize {
        self.sets[slot].len()
    }

    /// Sum of all domain sizes.
    pub fn total_size(&self) -> usize {
        self.sets.iter().map(BTreeSet::len).sum()
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.sets.len()
    }

    /// First slot whose domain is empty, if any.
    pub fn first_empty(&self) -> Option<SlotId> {
        self.sets.iter().position(BTreeSet::is_empty)
    }

    /// Narrows `slot` to the single candidate `word`.
    pub fn restrict(&mut self, slot: SlotId, word: &str) {
        let set = &mut self.sets[slot];
        set.clear();
        set.insert(word.to_string());
    }

    /// Whether every domain is a subset of the corresponding one in `other`.
    pub fn is_subset_of(&self, other: &Domains) -> bool {
        self.sets.len() == other.sets.len()
            && self.sets.iter().zip(&other.sets).all(|(a, b)| a.is_subset(b))
    }
}

/// A partial map from slot to chosen word.
///
/// Grown with [`Assignment::assign`] and shrunk with
/// [`Assignment::unassign`]; the search pairs every successful assign
/// with an unassign on the way out of a failed branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment {
    values: Vec<Option<String>>,
    assigned: usize,
}

impl Assignment {
    /// Creates an empty assignment over `slot_count` slots.
    pub fn new(slot_count: usize) -> Self {
        Self {
            values: vec![None; slot_count],
            assigned: 0,
        }
    }

    /// Places `word` in `slot`.
    ///
    /// Filling a slot that already holds a word, or one outside the
    /// puzzle, is a [`ContractViolation`].
    pub fn assign(&mut self, slot: SlotId, word: String) -> Result<(), ContractViolation> {
        let slot_count = self.values.len();
        let entry = self
            .values
            .get_mut(slot)
            .ok_or(ContractViolation::UnknownSlot { slot, slot_count })?;
        if let Some(existing) = entry {
            return Err(ContractViolation::SlotAlreadyAssigned {
                slot,
                existing: existing.clone(),
                attempted: word,
            });
        }
        *entry = Some(word);
        self.assigned += 1;
        Ok(())
    }

    /// Clears `slot`, returning the word it held.
    pub fn unassign(&mut self, slot: SlotId) -> Option<String> {
        let word = self.values.get_mut(slot).and_then(Option::take);
        if word.is_some() {
            self.assigned -= 1;
        }
        word
    }

    /// Word held by `slot`.
    pub fn get(&self, slot: SlotId) -> Option<&str> {
        self.values.get(slot).and_then(|w| w.as_deref())
    }

    /// Whether `slot` holds a word.
    pub fn is_assigned(&self, slot: SlotId) -> bool {
        self.get(slot).is_some()
    }

    /// Number of assigned slots.
    pub fn len(&self) -> usize {
        self.assigned
    }

    /// Whether no slot is assigned.
    pub fn is_empty(&self) -> bool {
        self.assigned == 0
    }

    /// Total number of slots, assigned or not.
    pub fn slot_count(&self) -> usize {
        self.values.len()
    }

    /// Assigned `(slot, word)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &str)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(slot, w)| w.as_deref().map(|w| (slot, w)))
    }

    /// Re-keys the assignment by [`Variable`].
    pub fn to_variable_map<M: PuzzleModel + ?Sized>(&self, model: &M) -> BTreeMap<Variable, String> {
        let variables = model.variables();
        self.iter()
            .map(|(slot, word)| (variables[slot], word.to_string()))
            .collect()
    }
}

/// Why a search stopped before reaching a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AbortReason {
    /// The cancellation token was set.
    Cancelled,
    /// `max_steps` recursive steps were taken.
    StepLimit,
    /// `time_limit_ms` elapsed.
    TimeLimit,
}

/// Result of a solve attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolveOutcome {
    /// Every slot holds a word and all crossings agree.
    Solved(Assignment),
    /// Proven to have no fill with this dictionary.
    Unsatisfiable,
    /// Stopped early; says nothing about satisfiability.
    Aborted(AbortReason),
}

impl SolveOutcome {
    /// Whether a fill was found.
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }

    /// The fill, if one was found.
    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            SolveOutcome::Solved(a) => Some(a),
            _ => None,
        }
    }

    /// Consumes the outcome, returning the fill if one was found.
    pub fn into_assignment(self) -> Option<Assignment> {
        match self {
            SolveOutcome::Solved(a) => Some(a),
            _ => None,
        }
    }
}

/// A broken invariant in the supplied puzzle model or in how the
/// assignment was driven. Never recoverable by retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    /// An overlap index does not fit inside one of the two slots.
    OverlapOutOfRange {
        x: Variable,
        y: Variable,
        overlap: Overlap,
    },
    /// `overlap(x, y)` and `overlap(y, x)` disagree.
    AsymmetricOverlap { x: Variable, y: Variable },
    /// `neighbors(x)` disagrees with the overlap relation about `y`.
    NeighborMismatch { x: Variable, y: SlotId },
    /// A word was placed in a slot that already holds one.
    SlotAlreadyAssigned {
        slot: SlotId,
        existing: String,
        attempted: String,
    },
    /// A slot id outside the puzzle.
    UnknownSlot { slot: SlotId, slot_count: usize },
}

impl std::fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractViolation::OverlapOutOfRange { x, y, overlap } => write!(
                f,
                "overlap {overlap:?} out of range for {x} and {y}"
            ),
            ContractViolation::AsymmetricOverlap { x, y } => {
                write!(f, "overlap between {x} and {y} is not symmetric")
            }
            ContractViolation::NeighborMismatch { x, y } => {
                write!(f, "neighbors of {x} disagree with overlaps about slot {y}")
            }
            ContractViolation::SlotAlreadyAssigned {
                slot,
                existing,
                attempted,
            } => write!(
                f,
                "slot {slot} already holds {existing:?}, refusing {attempted:?}"
            ),
            ContractViolation::UnknownSlot { slot, slot_count } => {
                write!(f, "slot {slot} does not exist ({slot_count} slots)")
            }
        }
    }
}

impl std::error::Error for ContractViolation {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Crossword;

    #[test]
    fn test_char_at_unicode() {
        assert_eq!(char_at("ÉTÉ", 1), Some('T'));
        assert_eq!(char_at("ÉTÉ", 2), Some('É'));
        assert_eq!(char_at("AB", 2), None);
    }

    #[test]
    fn test_domains_seeded_from_dictionary() {
        let cw = Crossword::new("___\n_##\n_##", "cat\ndog").unwrap();
        let domains = Domains::new(&cw);
        assert_eq!(domains.slot_count(), 2);
        assert_eq!(domains.size(0), 2);
        assert_eq!(domains.total_size(), 4);
        assert_eq!(domains.first_empty(), None);
    }

    #[test]
    fn test_restrict_and_subset() {
        let cw = Crossword::new("___", "cat\ndog").unwrap();
        let original = Domains::new(&cw);
        let mut narrowed = original.clone();
        narrowed.restrict(0, "DOG");
        assert_eq!(narrowed.size(0), 1);
        assert!(narrowed.is_subset_of(&original));
        assert!(!original.is_subset_of(&narrowed));
    }

    #[test]
    fn test_assign_unassign() {
        let mut a = Assignment::new(3);
        assert!(a.is_empty());
        a.assign(1, "CAT".into()).unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(a.get(1), Some("CAT"));
        assert!(!a.is_assigned(0));

        assert_eq!(a.unassign(1), Some("CAT".to_string()));
        assert_eq!(a.unassign(1), None);
        assert_eq!(a, Assignment::new(3));
    }

    #[test]
    fn test_double_assign_is_violation() {
        let mut a = Assignment::new(2);
        a.assign(0, "CAT".into()).unwrap();
        let err = a.assign(0, "DOG".into()).unwrap_err();
        assert_eq!(
            err,
            ContractViolation::SlotAlreadyAssigned {
                slot: 0,
                existing: "CAT".into(),
                attempted: "DOG".into(),
            }
        );
        assert_eq!(a.get(0), Some("CAT"));
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_unknown_slot() {
        let mut a = Assignment::new(1);
        assert!(matches!(
            a.assign(4, "CAT".into()),
            Err(ContractViolation::UnknownSlot { slot: 4, slot_count: 1 })
        ));
    }

    #[test]
    fn test_to_variable_map() {
        let cw = Crossword::new("___", "cat").unwrap();
        let mut a = Assignment::new(1);
        a.assign(0, "CAT".into()).unwrap();
        let map = a.to_variable_map(&cw);
        assert_eq!(map.get(&cw.variables()[0]).map(String::as_str), Some("CAT"));
    }

    #[test]
    fn test_outcome_accessors() {
        let solved = SolveOutcome::Solved(Assignment::new(0));
        assert!(solved.is_solved());
        assert!(solved.assignment().is_some());
        assert!(SolveOutcome::Unsatisfiable.into_assignment().is_none());
        assert!(!SolveOutcome::Aborted(AbortReason::StepLimit).is_solved());
    }
}
