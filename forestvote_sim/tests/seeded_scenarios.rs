//! Runs every check scenario across a spread of seeds.

use forestvote_core::QuizController;
use forestvote_sim::scenarios::ScenarioId;
use forestvote_sim::{Oracle, ScenarioRunner, SimEntropy};

#[test]
fn test_all_scenarios_across_seeds() {
    for seed in [1u64, 7, 42, 1337, u64::MAX] {
        let runner = ScenarioRunner::new(seed).with_rounds(15);
        for scenario in ScenarioId::all() {
            let result = runner.run(scenario);
            assert!(
                result.passed,
                "{} (seed={}) failed: {:?}",
                scenario,
                seed,
                result.failure_reason
            );
            assert_eq!(result.seed, seed);
        }
    }
}

#[test]
fn test_same_seed_same_sequence_of_rounds() {
    let mut a = QuizController::with_defaults(SimEntropy::new(99));
    let mut b = QuizController::with_defaults(SimEntropy::new(99));
    for requested in [3, 5, 15, 8] {
        let left = a.start_new_round(requested).unwrap().clone();
        let right = b.start_new_round(requested).unwrap();
        assert_eq!(&left, right);
    }
}

#[test]
fn test_majority_matches_oracle_over_many_rounds() {
    let oracle = Oracle::new();
    let mut controller = QuizController::with_defaults(SimEntropy::new(2024));
    let mut seen = [false, false];

    for _ in 0..200 {
        let session = controller.start_new_round(7).unwrap();
        assert_eq!(
            session.majority,
            oracle.majority(&oracle.votes(&session.forest, &session.point))
        );
        seen[session.majority.index() as usize] = true;
    }
    // Both classes should win some rounds
    assert_eq!(seen, [true, true]);
}
