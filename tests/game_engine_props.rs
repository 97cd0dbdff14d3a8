use paper_bombing::{AttackOutcome, GameConfig, GameSession, Phase, PlayerId};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn battle_ready(seed: u64, size: usize) -> (GameSession, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut session = GameSession::new(GameConfig::with_grid_size(size)).unwrap();
    session.start_new_game();
    for _ in 0..2 {
        session.auto_place(&mut rng).unwrap();
        session.advance_placement().unwrap();
    }
    (session, rng)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Random play always ends with exactly one winner whose opponent has no
    /// units left, and every resolved attack advances the counter by one.
    #[test]
    fn random_games_terminate(seed in any::<u64>(), size in 8usize..=14) {
        let (mut session, mut rng) = battle_ready(seed, size);
        let mut resolved = 0u32;
        let limit = 2 * size * size;
        for _ in 0..limit * 4 {
            if session.phase() != Phase::Battle {
                break;
            }
            let attacker = session.active_player();
            let r = rng.random_range(0..size);
            let c = rng.random_range(0..size);
            let report = session.attack(r, c).unwrap();
            prop_assert_eq!(report.attacker, attacker);
            if report.outcome == AttackOutcome::AlreadyAttacked {
                prop_assert_eq!(session.active_player(), attacker);
            } else {
                resolved += 1;
            }
            prop_assert_eq!(session.turn_count(), resolved);
        }

        // finish deterministically if random cells ran out of luck
        while session.phase() == Phase::Battle {
            let attacker = session.active_player();
            let target = session.board(attacker.other());
            let cell = (0..size * size)
                .map(|i| (i / size, i % size))
                .find(|&(r, c)| !target.is_attacked(r, c))
                .unwrap();
            session.attack(cell.0, cell.1).unwrap();
        }

        prop_assert_eq!(session.phase(), Phase::Finished);
        let winner = session.winner().unwrap();
        prop_assert_eq!(session.remaining_units(winner.other()), 0);
        prop_assert!(session.remaining_units(winner) > 0);
        prop_assert!(session.turn_count() as usize <= limit);
    }

    /// Attacks by each player land only on the opponent's board.
    #[test]
    fn attacks_hit_opponent_board(seed in any::<u64>(), turns in 1usize..40) {
        let (mut session, mut rng) = battle_ready(seed, 12);
        for _ in 0..turns {
            if session.phase() != Phase::Battle {
                break;
            }
            let before_one = session.board(PlayerId::One).hit_log().len();
            let before_two = session.board(PlayerId::Two).hit_log().len();
            let attacker = session.active_player();
            let report = session
                .attack(rng.random_range(0..12), rng.random_range(0..12))
                .unwrap();
            let grew = usize::from(report.outcome.is_resolved());
            let (own, target) = match attacker {
                PlayerId::One => (before_one, before_two),
                PlayerId::Two => (before_two, before_one),
            };
            prop_assert_eq!(session.board(attacker).hit_log().len(), own);
            prop_assert_eq!(session.board(attacker.other()).hit_log().len(), target + grew);
        }
    }
}
