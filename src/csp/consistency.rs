//! Node consistency and AC-3 arc consistency over a [`Domains`] store.
//!
//! A domain is node-consistent when every candidate has its slot's length,
//! and arc-consistent with a crossing slot when every candidate has some
//! word in the crossing domain with the same letter in the shared cell.
//!
//! # References
//!
//! Mackworth (1977), "Consistency in Networks of Relations"

use super::config::ArcQueue;
use super::types::{char_at, Domains};
use crate::puzzle::{PuzzleModel, SlotId};
use log::{debug, trace};
use std::collections::{HashSet, VecDeque};

/// Counters from one AC-3 run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Propagation {
    /// Calls to [`revise`] that removed at least one word.
    pub revisions: usize,
    /// Words removed across all domains.
    pub pruned: usize,
    /// The slot whose domain was emptied, if propagation failed.
    pub wiped_out: Option<SlotId>,
}

impl Propagation {
    /// Whether propagation finished without emptying a domain.
    pub fn is_consistent(&self) -> bool {
        self.wiped_out.is_none()
    }
}

/// Removes every candidate whose length differs from its slot's length.
///
/// Returns the number of words removed.
pub fn enforce_node_consistency<M: PuzzleModel + ?Sized>(model: &M, domains: &mut Domains) -> usize {
    let mut pruned = 0;
    for (slot, variable) in model.variables().iter().enumerate() {
        let domain = domains.get_mut(slot);
        let before = domain.len();
        domain.retain(|word| word.chars().count() == variable.length);
        pruned += before - domain.len();
    }
    debug!("node consistency removed {pruned} candidates");
    pruned
}

/// Makes `x` arc-consistent with `y`.
///
/// Drops every word of `x` whose letter at the shared cell appears at the
/// matching position of no word of `y`. Returns true iff something was
/// removed. Slots that do not cross are left untouched.
pub fn revise<M: PuzzleModel + ?Sized>(model: &M, domains: &mut Domains, x: SlotId, y: SlotId) -> bool {
    let Some((ix, iy)) = model.overlap(x, y) else {
        return false;
    };

    let supported: HashSet<char> = domains
        .get(y)
        .iter()
        .filter_map(|word| char_at(word, iy))
        .collect();

    let domain = domains.get_mut(x);
    let before = domain.len();
    domain.retain(|word| char_at(word, ix).is_some_and(|c| supported.contains(&c)));
    domain.len() != before
}

/// Enforces arc consistency, returning false if some domain was emptied.
///
/// With `arcs = None` every crossing pair is queued in both directions;
/// arcs between slots that do not cross are no-ops and are skipped.
pub fn ac3<M: PuzzleModel + ?Sized>(
    model: &M,
    domains: &mut Domains,
    arcs: Option<Vec<(SlotId, SlotId)>>,
    queue: ArcQueue,
) -> bool {
    propagate(model, domains, arcs, queue).is_consistent()
}

/// AC-3 with counters. See [`ac3`].
pub fn propagate<M: PuzzleModel + ?Sized>(
    model: &M,
    domains: &mut Domains,
    arcs: Option<Vec<(SlotId, SlotId)>>,
    queue: ArcQueue,
) -> Propagation {
    let arcs = arcs.unwrap_or_else(|| all_arcs(model));

    // Pending arcs are deduplicated; an arc already waiting will see the
    // latest domains when it is eventually revised.
    let mut pending: HashSet<(SlotId, SlotId)> = arcs.iter().copied().collect();
    let mut work: VecDeque<(SlotId, SlotId)> = arcs.into_iter().collect();
    let mut result = Propagation::default();

    loop {
        let next = match queue {
            ArcQueue::Fifo => work.pop_front(),
            ArcQueue::Lifo => work.pop_back(),
        };
        let Some((x, y)) = next else {
            break;
        };
        pending.remove(&(x, y));

        let before = domains.size(x);
        if !revise(model, domains, x, y) {
            continue;
        }
        result.revisions += 1;
        result.pruned += before - domains.size(x);
        trace!("revise({x}, {y}) left {} candidates", domains.size(x));

        if domains.size(x) == 0 {
            debug!("AC-3 emptied the domain of slot {x}");
            result.wiped_out = Some(x);
            return result;
        }

        for &z in model.neighbors(x) {
            if z != y && pending.insert((z, x)) {
                work.push_back((z, x));
            }
        }
    }

    debug!(
        "AC-3 finished: {} revisions, {} candidates removed",
        result.revisions, result.pruned
    );
    result
}

/// Every ordered pair of crossing slots.
fn all_arcs<M: PuzzleModel + ?Sized>(model: &M) -> Vec<(SlotId, SlotId)> {
    (0..model.slot_count())
        .flat_map(|x| model.neighbors(x).iter().map(move |&y| (x, y)))
        .collect()
}
