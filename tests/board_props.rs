use paper_bombing::{
    auto_place, AttackOutcome, Board, BoardState, Footprint, GameConfig, PlacementError,
    SequentialIds, Unit, UnitId, UnitKind,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_board(seed: u64, size: usize) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new(size);
    let config = GameConfig::with_grid_size(size);
    auto_place(&mut board, &config.roster, &mut SequentialIds::new(), &mut rng).unwrap();
    let attacks = rng.random_range(0..size * size);
    for _ in 0..attacks {
        let r = rng.random_range(0..size);
        let c = rng.random_range(0..size);
        board.attack(r, c).unwrap();
    }
    board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn board_state_roundtrip(seed in any::<u64>(), size in 8usize..=20) {
        let board = random_board(seed, size);
        let state1 = BoardState::from(&board);
        let board2 = Board::try_from(state1.clone()).unwrap();
        let state2 = BoardState::from(&board2);
        prop_assert_eq!(state1, state2);
    }

    #[test]
    fn live_units_in_bounds_and_disjoint(seed in any::<u64>(), size in 8usize..=20) {
        let board = random_board(seed, size);
        let live: Vec<_> = board.units().iter().filter(|u| !u.is_destroyed()).collect();
        for (i, a) in live.iter().enumerate() {
            prop_assert!(a.footprint().within(size));
            for b in &live[i + 1..] {
                prop_assert!(!a.footprint().overlaps(&b.footprint()));
            }
        }
    }

    #[test]
    fn manual_placement_keeps_units_disjoint(
        candidates in prop::collection::vec(
            (0usize..12, 0usize..12, 1usize..5, 1usize..5, any::<bool>()),
            1..40,
        )
    ) {
        let size = 10;
        let mut board = Board::new(size);
        for (i, (row, col, w, h, strike)) in candidates.into_iter().enumerate() {
            let footprint = Footprint::new(row, col, w, h);
            let unit = Unit::new(UnitId(i as u32), UnitKind::Tank, footprint, 1);
            match board.place_unit(unit) {
                Ok(()) => prop_assert!(footprint.within(size)),
                Err(PlacementError::OutOfBounds) => prop_assert!(!footprint.within(size)),
                Err(PlacementError::Overlaps(other)) => {
                    let blocker = board.unit(other).unwrap();
                    prop_assert!(!blocker.is_destroyed());
                    prop_assert!(blocker.footprint().overlaps(&footprint));
                }
            }
            if strike && row < size && col < size {
                board.attack(row, col).unwrap();
            }

            let live: Vec<_> = board.units().iter().filter(|u| !u.is_destroyed()).collect();
            for (j, a) in live.iter().enumerate() {
                prop_assert!(a.footprint().within(size));
                for b in &live[j + 1..] {
                    prop_assert!(!a.footprint().overlaps(&b.footprint()));
                }
            }
        }
    }

    #[test]
    fn attack_idempotent(seed in any::<u64>(), row in 0usize..12, col in 0usize..12) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new(12);
        let config = GameConfig::default();
        auto_place(&mut board, &config.roster, &mut SequentialIds::new(), &mut rng).unwrap();
        let state_before = BoardState::from(&board);
        let first = board.attack(row, col).unwrap();
        prop_assert!(first.is_resolved());
        let state_after = BoardState::from(&board);
        prop_assert_eq!(board.attack(row, col).unwrap(), AttackOutcome::AlreadyAttacked);
        prop_assert_eq!(BoardState::from(&board), state_after);
        prop_assert_ne!(state_before, BoardState::from(&board));
        prop_assert_eq!(
            board.hit_log().iter().filter(|h| h.row == row && h.col == col).count(),
            1
        );
    }

    #[test]
    fn health_monotonic(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new(12);
        let config = GameConfig::default();
        auto_place(&mut board, &config.roster, &mut SequentialIds::new(), &mut rng).unwrap();
        let mut last: Vec<u32> = board.units().iter().map(|u| u.health()).collect();
        for _ in 0..200 {
            let r = rng.random_range(0..12);
            let c = rng.random_range(0..12);
            board.attack(r, c).unwrap();
            for (u, prev) in board.units().iter().zip(&last) {
                prop_assert!(u.health() <= *prev);
                prop_assert!(u.health() <= u.max_health());
                prop_assert_eq!(u.is_destroyed(), u.health() == 0);
            }
            last = board.units().iter().map(|u| u.health()).collect();
        }
    }

    #[test]
    fn full_roster_seated(seed in any::<u64>(), size in 8usize..=20) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new(size);
        let config = GameConfig::with_grid_size(size);
        let placed =
            auto_place(&mut board, &config.roster, &mut SequentialIds::new(), &mut rng).unwrap();
        prop_assert_eq!(placed, config.roster.total_units());
        for kind in UnitKind::ALL {
            prop_assert_eq!(
                board.count_kind(kind),
                config.roster.spec(kind).count as usize
            );
        }
    }
}
