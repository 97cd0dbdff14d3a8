use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use paper_bombing::{
    init_logging, storage,
    ui::{coord_to_string, parse_coord, render_enemy_board, render_own_board, unit_summary},
    AttackOutcome, GameConfig, GameSession, Orientation, Phase, PlacementStep, PlayerId, UnitId,
    UnitKind,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Play a two-player hot-seat game on this terminal.
    Play {
        #[arg(long, help = "JSON configuration file; missing values use defaults")]
        config: Option<PathBuf>,
        #[arg(long, default_value = "paper-bombing.save")]
        save: PathBuf,
        #[arg(long, help = "Fix RNG seed for reproducible auto-placement (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Discard the saved game.
    New {
        #[arg(long, default_value = "paper-bombing.save")]
        save: PathBuf,
    },
    /// Print the default configuration as JSON.
    DefaultConfig,
}

enum Command {
    Help,
    Place(UnitKind, usize, usize, Orientation),
    Rotate(Option<UnitId>),
    Auto,
    Clear,
    Done,
    Attack(usize, usize),
    Status,
    New,
    Quit,
}

const HELP: &str = "\
Commands:
  place <kind> <cell> [r]   place a unit, e.g. `place tank B3 r` (r = rotated)
  rotate [id]               rotate a unit (default: the last one placed)
  auto                      random placement of your whole roster
  clear                     remove all your placed units
  done                      finish placement
  attack <cell> | <cell>    attack a cell on the opponent's board
  status                    show both boards
  new                       start a new game
  quit                      leave (the game is saved)";

fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err("empty command".into());
    };
    let cell = |s: Option<&str>| {
        s.and_then(parse_coord)
            .ok_or_else(|| "expected a cell like B3".to_string())
    };
    match head.to_ascii_lowercase().as_str() {
        "help" | "?" => Ok(Command::Help),
        "place" | "p" => {
            let kind = parts
                .next()
                .ok_or("missing unit kind")?
                .parse::<UnitKind>()
                .map_err(|e| e.to_string())?;
            let (r, c) = cell(parts.next())?;
            let orientation = match parts.next() {
                Some(o) if o.eq_ignore_ascii_case("r") => Orientation::Rotated,
                _ => Orientation::Upright,
            };
            Ok(Command::Place(kind, r, c, orientation))
        }
        "rotate" => {
            let id = match parts.next() {
                Some(raw) => Some(UnitId(
                    raw.trim_start_matches('u')
                        .parse()
                        .map_err(|_| "expected a unit id like u3".to_string())?,
                )),
                None => None,
            };
            Ok(Command::Rotate(id))
        }
        "auto" => Ok(Command::Auto),
        "clear" => Ok(Command::Clear),
        "done" => Ok(Command::Done),
        "attack" | "a" => {
            let (r, c) = cell(parts.next())?;
            Ok(Command::Attack(r, c))
        }
        "status" | "s" => Ok(Command::Status),
        "new" => Ok(Command::New),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        _ => match parse_coord(head) {
            Some((r, c)) => Ok(Command::Attack(r, c)),
            None => Err(format!("unknown command `{}`", head)),
        },
    }
}

fn print_view(session: &GameSession) {
    let me = session.active_player();
    match session.phase() {
        Phase::Setup => println!("No game in progress. Type `new` to start."),
        Phase::Placement => {
            let (placed, required) = session.placement_progress(me);
            println!("\n{} is placing units ({}/{}):", me, placed, required);
            print!("{}", render_own_board(session.board(me)));
            let palette: Vec<String> = UnitKind::ALL
                .iter()
                .filter(|k| session.remaining_to_place(**k) > 0)
                .map(|k| {
                    let spec = session.config().roster.spec(*k);
                    format!(
                        "{} x{} ({}x{}, hp {})",
                        k,
                        session.remaining_to_place(*k),
                        spec.width,
                        spec.height,
                        spec.health
                    )
                })
                .collect();
            if !palette.is_empty() {
                println!("Left to place: {}", palette.join(", "));
            }
        }
        Phase::Battle | Phase::Finished => {
            println!(
                "\nTurn {} | {} units left: {} | {} units left: {}",
                session.turn_count(),
                PlayerId::One,
                session.remaining_units(PlayerId::One),
                PlayerId::Two,
                session.remaining_units(PlayerId::Two),
            );
            println!("Opponent board:");
            print!("{}", render_enemy_board(session.board(me.other())));
            println!("\n{}'s board:", me);
            print!("{}", render_own_board(session.board(me)));
            if let Some(w) = session.winner() {
                println!(
                    "\n{} wins after {} attacks. Type `new` for a rematch.",
                    w,
                    session.turn_count()
                );
            } else {
                println!("{} to attack.", me);
            }
        }
    }
}

/// Apply one command. Returns `Ok(true)` when the session changed.
fn apply(session: &mut GameSession, cmd: Command, rng: &mut SmallRng) -> anyhow::Result<bool> {
    match cmd {
        Command::Help => {
            println!("{}", HELP);
            Ok(false)
        }
        Command::Status => {
            let me = session.active_player();
            print!("{}", unit_summary(session.board(me)));
            Ok(false)
        }
        Command::Quit => Ok(false),
        Command::New => {
            session.start_new_game();
            Ok(true)
        }
        Command::Place(kind, r, c, orientation) => {
            let id = session.place_unit(kind, r, c, orientation)?;
            println!("Placed {} {} at {}.", kind, id, coord_to_string(r, c));
            Ok(true)
        }
        Command::Rotate(id) => {
            let id = match id {
                Some(id) => {
                    session.rotate_unit(id)?;
                    id
                }
                None => session.rotate_last_unit()?,
            };
            println!("Rotated {}.", id);
            Ok(true)
        }
        Command::Auto => {
            let placed = session.auto_place(rng)?;
            println!("Placed {} units at random.", placed);
            Ok(true)
        }
        Command::Clear => {
            session.clear_placement()?;
            println!("Placement cleared.");
            Ok(true)
        }
        Command::Done => {
            match session.advance_placement()? {
                PlacementStep::NextPlacer(p) => {
                    println!("\nPass the terminal to {}.", p);
                }
                PlacementStep::BattleStarted => println!("\nBattle begins!"),
            }
            Ok(true)
        }
        Command::Attack(r, c) => {
            let report = session.attack(r, c)?;
            let cell = coord_to_string(r, c);
            match report.outcome {
                AttackOutcome::AlreadyAttacked => {
                    println!("{} was already attacked; pick another cell.", cell);
                    return Ok(false);
                }
                AttackOutcome::Miss => println!("{} -> miss", cell),
                AttackOutcome::Hit {
                    destroyed: true, ..
                } => println!("{} -> hit, unit destroyed!", cell),
                AttackOutcome::Hit { .. } => println!("{} -> hit", cell),
            }
            Ok(true)
        }
    }
}

fn play(config_path: Option<PathBuf>, save: &Path, seed: Option<u64>) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => match storage::load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Ignoring configuration ({:#}); using defaults.", e);
                GameConfig::default()
            }
        },
        None => GameConfig::default(),
    };

    let loaded = storage::load_session_or_fresh(save, config);
    if let Some(w) = &loaded.warning {
        eprintln!("Saved game could not be loaded ({}); starting fresh.", w);
    }
    let mut session = loaded.session;
    if loaded.resumed {
        println!("Resuming saved game.");
    }
    if session.phase() == Phase::Setup {
        session.start_new_game();
        storage::save_session(save, &session)?;
    }

    let mut rng = if let Some(s) = seed {
        println!("Using fixed seed: {} (auto-placement will be reproducible)", s);
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    };

    println!("{}", HELP);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print_view(&session);
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let cmd = match parse_command(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                println!("{} (type `help`)", e);
                continue;
            }
        };
        let quit = matches!(cmd, Command::Quit);
        match apply(&mut session, cmd, &mut rng) {
            Ok(true) => {
                if let Err(e) = storage::save_session(save, &session) {
                    eprintln!("Could not save game: {:#}", e);
                }
            }
            Ok(false) => {}
            Err(e) => println!("Error: {}", e),
        }
        if quit {
            break;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { config, save, seed } => play(config, &save, seed)?,
        Commands::New { save } => {
            storage::clear_saved(&save)?;
            println!("Saved game discarded.");
        }
        Commands::DefaultConfig => {
            println!("{}", serde_json::to_string_pretty(&GameConfig::default())?);
        }
    }
    Ok(())
}
