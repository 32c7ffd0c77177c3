use numgrid_core::*;

fn wrong_answer(puzzle: &PuzzleContext) -> Option<Selection> {
    puzzle
        .cells()
        .map(|cell| puzzle.select([cell.id.index]))
        .find(|selection| !verify(puzzle, selection))
}

fn assert_invariants(round: &RoundState, rules: &ScoringRules) {
    assert!(round.time_remaining >= 0.0, "{round:?}");
    assert!(round.time_remaining <= round.time_budget, "{round:?}");
    assert!(round.max_combo >= round.combo, "{round:?}");
    assert_eq!(round.level, rules.level_for(round.score), "{round:?}");
}

#[test]
fn scripted_player_keeps_session_invariants() {
    let rules = ScoringRules::default();

    for seed in 0..20 {
        let generator = StandardGenerator::new(SeededSource::seeded(seed), (4, 3))
            .unwrap()
            .with_check(RequireSolution);
        let mut controller =
            RoundController::new(SessionConfig::default(), generator, MemoryHighScore::default());
        controller.start_session();

        for step in 0..300u32 {
            let puzzle = controller.puzzle().unwrap().clone();
            let before = *controller.round();

            if step % 4 == 3 {
                if let Some(selection) = wrong_answer(&puzzle) {
                    assert_eq!(controller.submit(&selection), Ok(SubmitOutcome::Wrong));
                    assert_eq!(controller.round().combo, 0);
                    assert_eq!(controller.puzzle().unwrap().id(), puzzle.id());
                }
            } else if let Some(solution) = find_solution(&puzzle) {
                let outcome = controller.submit(&solution).unwrap();
                assert!(outcome.is_correct(), "{puzzle:?} {solution:?}");
                assert!(controller.round().score > before.score);
                assert_eq!(controller.round().combo, before.combo + 1);
                assert_ne!(controller.puzzle().unwrap().id(), puzzle.id());
            }
            assert_invariants(controller.round(), &rules);

            controller.tick(0.75);
            assert_invariants(controller.round(), &rules);
            assert!(controller.state().is_playing(), "seed {seed}");
        }

        // stop answering and let the clock run out
        let mut game_overs = 0;
        for _ in 0..1_000 {
            if controller.tick(0.75).is_game_over() {
                game_overs += 1;
            }
            assert_invariants(controller.round(), &rules);
        }

        assert_eq!(game_overs, 1, "seed {seed}");
        assert_eq!(controller.state(), SessionState::GameOver, "seed {seed}");
    }
}

#[test]
fn opening_sum_round_pays_base_speed_and_level_bonus() {
    let seed = (0..200)
        .find(|&seed| {
            let mut controller = RoundController::seeded(SessionConfig::default(), seed).unwrap();
            controller.start_session();
            let puzzle = controller.puzzle().unwrap();
            puzzle.kind() == PatternKind::Sum && is_solvable(puzzle)
        })
        .expect("some seed should open with a solvable sum round");

    let mut controller = RoundController::seeded(SessionConfig::default(), seed).unwrap();
    controller.start_session();
    let solution = find_solution(controller.puzzle().unwrap()).unwrap();

    let outcome = controller.submit(&solution).unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Correct {
            points: 150 + 100 + 15,
            leveled_up: false
        }
    );
    assert_eq!(controller.round().score, 265);
    assert_eq!(controller.round().combo, 1);
    assert_eq!(controller.round().level, 1);
}

#[test]
fn high_score_outlives_the_controller() {
    let mut store = MemoryHighScore::default();

    {
        let generator = StandardGenerator::new(SeededSource::seeded(7), (4, 3))
            .unwrap()
            .with_check(RequireSolution);
        let mut controller = RoundController::new(SessionConfig::default(), generator, &mut store);
        controller.start_session();
        let solution = find_solution(controller.puzzle().unwrap()).unwrap();
        controller.submit(&solution).unwrap();
        assert!(controller.tick(120.0).is_game_over());
    }

    assert!(store.0 > 0);

    let generator = StandardGenerator::new(SeededSource::seeded(8), (4, 3)).unwrap();
    let controller = RoundController::new(SessionConfig::default(), generator, store);
    assert_eq!(controller.high_score(), store.0);
}

#[test]
fn custom_grid_shapes_flow_through_generation() {
    let config = SessionConfig::new((5, 4), ScoringRules::default());
    let mut controller = RoundController::seeded(config, 3).unwrap();
    controller.start_session();

    let puzzle = controller.puzzle().unwrap();
    assert_eq!(puzzle.shape(), (5, 4));
    assert_eq!(puzzle.len(), 20);
    assert!(puzzle.cell_at((4, 3)).is_some());
}
