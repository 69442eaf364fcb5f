//! Backtracking search execution.
//!
//! # Algorithm
//!
//! 1. Check the puzzle model's overlap contract
//! 2. Seed every domain with the dictionary, enforce node consistency
//! 3. Enforce arc consistency (AC-3); a wiped-out domain ends the solve
//! 4. Depth-first search:
//!    a. Pick a slot (MRV, then degree)
//!    b. Try its candidates in least-constraining order
//!    c. Recurse on every consistent extension, undo it on failure
//!
//! # Reference
//!
//! Russell & Norvig, *Artificial Intelligence: A Modern Approach*, ch. 6.

use super::config::SolverConfig;
use super::consistency::{enforce_node_consistency, propagate};
use super::heuristics::{order_domain_values, select_unassigned_variable};
use super::types::{AbortReason, Assignment, ContractViolation, Domains, SolveOutcome};
use super::validator::{consistent_with, is_complete, validate_model};
use crate::puzzle::{PuzzleModel, SlotId};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Counters collected during a solve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchStats {
    /// Recursive search entries.
    pub steps: usize,
    /// Candidates tried and undone.
    pub backtracks: usize,
    /// Successful `revise` calls, including those made during inference.
    pub ac3_revisions: usize,
    /// Words removed by node consistency.
    pub pruned_by_node: usize,
    /// Words removed by arc consistency before the search started.
    pub pruned_by_arc: usize,
    /// Wall-clock time of the whole solve in milliseconds.
    pub elapsed_ms: u64,
}

/// Result of a solve.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveResult {
    /// Fill, proof of unsatisfiability, or abort reason.
    pub outcome: SolveOutcome,
    /// Search statistics.
    pub stats: SearchStats,
}

/// Runs the crossword CSP solver.
pub struct CspRunner;

impl CspRunner {
    /// Solves `model` under `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossword_csp::csp::{CspRunner, SolverConfig};
    /// use crossword_csp::puzzle::Crossword;
    ///
    /// let crossword = Crossword::new("___\n#_#\n#_#", "cat\ncar\nart").unwrap();
    /// let result = CspRunner::run(&crossword, &SolverConfig::default()).unwrap();
    /// let fill = result.outcome.assignment().unwrap();
    /// assert_eq!(fill.get(1), Some("ART"));
    /// ```
    ///
    /// # Panics
    ///
    /// If `config` fails [`SolverConfig::validate`].
    pub fn run<M: PuzzleModel + ?Sized>(
        model: &M,
        config: &SolverConfig,
    ) -> Result<SolveResult, ContractViolation> {
        Self::run_with_cancel(model, config, None)
    }

    /// Solves with an optional cancellation token.
    ///
    /// The token is polled on every search step; once it reads `true` the
    /// search unwinds and reports [`AbortReason::Cancelled`].
    pub fn run_with_cancel<M: PuzzleModel + ?Sized>(
        model: &M,
        config: &SolverConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SolveResult, ContractViolation> {
        config.validate().expect("invalid SolverConfig");
        validate_model(model)?;

        let start = Instant::now();
        info!(
            "solving {} slots against {} words",
            model.slot_count(),
            model.words().len()
        );

        let mut stats = SearchStats::default();
        let mut domains = Domains::new(model);
        stats.pruned_by_node = enforce_node_consistency(model, &mut domains);

        let propagation = propagate(model, &mut domains, None, config.arc_queue);
        stats.ac3_revisions = propagation.revisions;
        stats.pruned_by_arc = propagation.pruned;

        if let Some(slot) = propagation.wiped_out.or_else(|| domains.first_empty()) {
            debug!("slot {slot} has no candidates left, skipping search");
            stats.elapsed_ms = start.elapsed().as_millis() as u64;
            return Ok(SolveResult {
                outcome: SolveOutcome::Unsatisfiable,
                stats,
            });
        }

        let mut search = Search {
            model,
            config,
            domains,
            assignment: Assignment::new(model.slot_count()),
            rng: config.seed.map(StdRng::seed_from_u64),
            cancel,
            start,
            stats,
        };

        let outcome = match search.backtrack()? {
            Branch::Complete => SolveOutcome::Solved(search.assignment),
            Branch::Failed => SolveOutcome::Unsatisfiable,
            Branch::Aborted(reason) => SolveOutcome::Aborted(reason),
        };

        let mut stats = search.stats;
        stats.elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            "search finished ({}) after {} steps, {} backtracks, {} ms",
            outcome_label(&outcome),
            stats.steps,
            stats.backtracks,
            stats.elapsed_ms
        );

        Ok(SolveResult { outcome, stats })
    }
}

fn outcome_label(outcome: &SolveOutcome) -> &'static str {
    match outcome {
        SolveOutcome::Solved(_) => "solved",
        SolveOutcome::Unsatisfiable => "unsatisfiable",
        SolveOutcome::Aborted(AbortReason::Cancelled) => "cancelled",
        SolveOutcome::Aborted(AbortReason::StepLimit) => "step limit",
        SolveOutcome::Aborted(AbortReason::TimeLimit) => "time limit",
    }
}

/// Result of exploring one subtree.
enum Branch {
    Complete,
    Failed,
    Aborted(AbortReason),
}

/// State owned by one in-flight solve.
struct Search<'a, M: PuzzleModel + ?Sized> {
    model: &'a M,
    config: &'a SolverConfig,
    domains: Domains,
    assignment: Assignment,
    rng: Option<StdRng>,
    cancel: Option<Arc<AtomicBool>>,
    start: Instant,
    stats: SearchStats,
}

impl<M: PuzzleModel + ?Sized> Search<'_, M> {
    fn backtrack(&mut self) -> Result<Branch, ContractViolation> {
        if let Some(reason) = self.budget_exhausted() {
            return Ok(Branch::Aborted(reason));
        }
        self.stats.steps += 1;

        if is_complete(self.model, &self.assignment) {
            return Ok(Branch::Complete);
        }

        let Some(slot) =
            select_unassigned_variable(self.model, &self.domains, &self.assignment, self.rng.as_mut())
        else {
            // every slot holds a word but some word is not in the dictionary
            return Ok(Branch::Failed);
        };

        let values = order_domain_values(
            self.model,
            &self.domains,
            slot,
            &self.assignment,
            self.rng.as_mut(),
            self.config.parallel,
        );

        for word in values {
            trace!("slot {slot} = {word}");
            self.assignment.assign(slot, word)?;

            let branch = self.explore(slot);
            if let Ok(Branch::Complete) = branch {
                return branch;
            }

            self.assignment.unassign(slot);
            match branch? {
                Branch::Failed => self.stats.backtracks += 1,
                aborted => return Ok(aborted),
            }
        }

        Ok(Branch::Failed)
    }

    /// Explores the subtree below the tentative assignment of `slot`.
    ///
    /// Domains narrowed by inference are restored before returning unless
    /// the subtree completed.
    fn explore(&mut self, slot: SlotId) -> Result<Branch, ContractViolation> {
        if !consistent_with(self.model, &self.assignment, slot) {
            return Ok(Branch::Failed);
        }
        if !self.config.inference {
            return self.backtrack();
        }

        let snapshot = self.domains.clone();
        let word = self.assignment.get(slot).unwrap_or_default().to_string();
        self.domains.restrict(slot, &word);

        let arcs = self.model.neighbors(slot).iter().map(|&z| (z, slot)).collect();
        let propagation = propagate(self.model, &mut self.domains, Some(arcs), self.config.arc_queue);
        self.stats.ac3_revisions += propagation.revisions;

        let branch = if propagation.is_consistent() {
            self.backtrack()
        } else {
            trace!("inference rejected slot {slot} = {word}");
            Ok(Branch::Failed)
        };

        if !matches!(branch, Ok(Branch::Complete)) {
            self.domains = snapshot;
        }
        branch
    }

    fn budget_exhausted(&self) -> Option<AbortReason> {
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Some(AbortReason::Cancelled);
            }
        }
        if self.config.max_steps > 0 && self.stats.steps >= self.config.max_steps {
            return Some(AbortReason::StepLimit);
        }
        if self.config.time_limit_ms > 0
            && self.start.elapsed().as_millis() >= u128::from(self.config.time_limit_ms)
        {
            return Some(AbortReason::TimeLimit);
        }
        None
    }
}
