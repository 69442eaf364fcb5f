//! End-to-end solves on small hand-made grids.

use crossword_csp::csp::{
    consistent, is_complete, AbortReason, ContractViolation, CspRunner, SolveOutcome,
    SolverConfig,
};
use crossword_csp::puzzle::{Crossword, Direction, Overlap, PuzzleModel, SlotId, Variable};
use std::collections::BTreeSet;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

fn solve(structure: &str, words: &str) -> (Crossword, SolveOutcome) {
    let crossword = Crossword::new(structure, words).unwrap();
    let result = CspRunner::run(&crossword, &SolverConfig::default()).unwrap();
    (crossword, result.outcome)
}

#[test]
fn single_slot_takes_any_word() {
    let (cw, outcome) = solve("___", "cat\ndog");
    let fill = outcome.assignment().expect("one slot, two words");
    let word = fill.get(0).unwrap();
    assert!(word == "CAT" || word == "DOG", "unexpected word {word}");
    assert_eq!(fill.len(), cw.slot_count());
}

#[test]
fn crossing_slots_agree() {
    let (cw, outcome) = solve("___\n#_#\n#_#", "cat\ncar\nart");
    assert_eq!(cw.overlap(0, 1), Some((1, 0)));

    let fill = outcome.assignment().expect("CAR/ART and CAT/ART both fit");
    let across = fill.get(0).unwrap();
    let down = fill.get(1).unwrap();
    assert_eq!(across.chars().nth(1), down.chars().nth(0));
    assert_eq!(down, "ART");
    assert!(consistent(&cw, fill));
}

#[test]
fn no_word_of_the_right_length() {
    let (_, outcome) = solve("_____", "cat\ndog\nart");
    assert_eq!(outcome, SolveOutcome::Unsatisfiable);
}

#[test]
fn empty_grid_is_trivially_solved() {
    let (cw, outcome) = solve("#_#\n###", "cat");
    assert_eq!(cw.slot_count(), 0);
    let fill = outcome.assignment().expect("nothing to fill");
    assert!(fill.is_empty());
}

#[test]
fn classic_five_by_five() {
    let structure = "#___#\n#_##_\n#_##_\n#_##_\n#____\n";
    let words = "one\ntwo\nthree\nfour\nfive\nsix\nseven\neight\nnine\nten\n";
    let (cw, outcome) = solve(structure, words);

    let fill = outcome.assignment().expect("SIX/SEVEN/FIVE/NINE");
    assert!(consistent(&cw, fill));
    assert!(is_complete(&cw, fill));

    let by_variable = fill.to_variable_map(&cw);
    assert_eq!(by_variable[&Variable::new(0, 1, Direction::Down, 5)], "SEVEN");
    assert_eq!(by_variable[&Variable::new(4, 1, Direction::Across, 4)], "NINE");
    assert_eq!(by_variable[&Variable::new(1, 4, Direction::Down, 4)], "FIVE");
    assert_eq!(by_variable[&Variable::new(0, 1, Direction::Across, 3)], "SIX");
}

#[test]
fn inference_and_queue_order_do_not_change_the_verdict() {
    let structure = "_____\n_#_#_\n_____\n_#_#_\n_____";
    let words = "salsa\nabide\nlemon\nsolid\ntarot\naside\nrelax\nsated\nalert\nsnare\nlasso\nsalad";
    let cw = Crossword::new(structure, words).unwrap();

    let configs = [
        SolverConfig::default(),
        SolverConfig::default().with_inference(true),
        SolverConfig::default().with_arc_queue(crossword_csp::csp::ArcQueue::Lifo),
        SolverConfig::default().with_seed(9).with_inference(true),
    ];
    let verdicts: Vec<bool> = configs
        .iter()
        .map(|config| {
            let outcome = CspRunner::run(&cw, config).unwrap().outcome;
            if let Some(fill) = outcome.assignment() {
                assert!(consistent(&cw, fill) && is_complete(&cw, fill));
            }
            assert!(!matches!(outcome, SolveOutcome::Aborted(_)));
            outcome.is_solved()
        })
        .collect();
    assert!(verdicts.windows(2).all(|w| w[0] == w[1]), "{verdicts:?}");
}

#[test]
fn cancellation_is_not_unsatisfiable() {
    let cw = Crossword::new("___", "cat").unwrap();
    let cancel = Arc::new(AtomicBool::new(true));
    let result = CspRunner::run_with_cancel(&cw, &SolverConfig::default(), Some(cancel)).unwrap();
    assert_eq!(result.outcome, SolveOutcome::Aborted(AbortReason::Cancelled));
}

#[test]
fn independent_solves_on_threads() {
    let grids = [
        ("___\n#_#\n#_#", "cat\ncar\nart"),
        ("#___#\n#_##_\n#_##_\n#_##_\n#____\n", "six\nseven\nfive\nnine\nten"),
    ];
    std::thread::scope(|scope| {
        let handles: Vec<_> = grids
            .iter()
            .map(|&(structure, words)| {
                scope.spawn(move || {
                    let cw = Crossword::new(structure, words).unwrap();
                    let outcome = CspRunner::run(&cw, &SolverConfig::default()).unwrap().outcome;
                    outcome
                        .assignment()
                        .is_some_and(|fill| consistent(&cw, fill) && is_complete(&cw, fill))
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    });
}

/// Two slots whose overlap points past the end of the down slot.
struct OutOfRange {
    variables: Vec<Variable>,
    neighbors: Vec<Vec<SlotId>>,
    words: BTreeSet<String>,
}

impl PuzzleModel for OutOfRange {
    fn variables(&self) -> &[Variable] {
        &self.variables
    }

    fn overlap(&self, x: SlotId, y: SlotId) -> Option<Overlap> {
        match (x, y) {
            (0, 1) => Some((0, 7)),
            (1, 0) => Some((7, 0)),
            _ => None,
        }
    }

    fn neighbors(&self, x: SlotId) -> &[SlotId] {
        &self.neighbors[x]
    }

    fn words(&self) -> &BTreeSet<String> {
        &self.words
    }
}

#[test]
fn malformed_model_is_a_contract_violation() {
    let model = OutOfRange {
        variables: vec![
            Variable::new(0, 0, Direction::Across, 3),
            Variable::new(0, 0, Direction::Down, 3),
        ],
        neighbors: vec![vec![1], vec![0]],
        words: ["CAT".to_string()].into_iter().collect(),
    };
    let err = CspRunner::run(&model, &SolverConfig::default()).unwrap_err();
    assert!(matches!(err, ContractViolation::OverlapOutOfRange { .. }));
    assert!(err.to_string().contains("out of range"));
}
