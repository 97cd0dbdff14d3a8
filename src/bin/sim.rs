use paper_bombing::{init_logging, GameConfig, GameSession, Phase, PlayerId};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde_json::json;

/// Pick a cell `player` has not attacked yet on the opponent's board.
fn untried_cell<R: Rng>(session: &GameSession, player: PlayerId, rng: &mut R) -> (usize, usize) {
    let target = session.board(player.other());
    let size = target.size();
    loop {
        let r = rng.random_range(0..size);
        let c = rng.random_range(0..size);
        if !target.is_attacked(r, c) {
            return (r, c);
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);

    let mut session = GameSession::new(GameConfig::default())?;
    session.start_new_game();
    session.auto_place(&mut rng1)?;
    session.advance_placement()?;
    session.auto_place(&mut rng2)?;
    session.advance_placement()?;

    let mut hits = [0usize; 2];
    while session.phase() == Phase::Battle {
        let attacker = session.active_player();
        let (r, c) = match attacker {
            PlayerId::One => untried_cell(&session, attacker, &mut rng1),
            PlayerId::Two => untried_cell(&session, attacker, &mut rng2),
        };
        let report = session.attack(r, c)?;
        if report.outcome.is_hit() {
            hits[attacker.index()] += 1;
        }
    }

    let winner = session.winner().map(|w| match w {
        PlayerId::One => "player1",
        PlayerId::Two => "player2",
    });

    let result = json!({
        "player1": {"hits": hits[0], "units_left": session.remaining_units(PlayerId::One)},
        "player2": {"hits": hits[1], "units_left": session.remaining_units(PlayerId::Two)},
        "turns": session.turn_count(),
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
