use alloc::vec::Vec;
use rand::Rng;

use crate::{
    auto_place::auto_place,
    board::{Board, BoardState},
    common::{AttackOutcome, GameError, Phase, PlayerId},
    config::GameConfig,
    placement::check_placement,
    snapshot::{PlacementState, Snapshot, SnapshotError, SNAPSHOT_VERSION},
    unit::{IdGenerator, Orientation, SequentialIds, Unit, UnitId, UnitKind},
};

/// What happened when a player finished placing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStep {
    /// The other player now places their roster.
    NextPlacer(PlayerId),
    /// Both rosters are down; player one attacks first.
    BattleStarted,
}

/// Result of a submitted attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackReport {
    pub attacker: PlayerId,
    pub row: usize,
    pub col: usize,
    pub outcome: AttackOutcome,
    /// Turn counter after this attack.
    pub turn_count: u32,
    /// Set when this attack ended the game.
    pub winner: Option<PlayerId>,
}

/// Two boards plus the phase, turn and winner bookkeeping around them.
///
/// The session is the only writer of its boards; collaborators read them
/// through [`GameSession::board`] and mutate through the session methods.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    phase: Phase,
    active_player: PlayerId,
    turn_count: u32,
    boards: [Board; 2],
    placement: PlacementState,
    winner: Option<PlayerId>,
    ids: SequentialIds,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::fresh(GameConfig::default())
    }
}

impl GameSession {
    /// Create a session in the `setup` phase.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::fresh(config))
    }

    fn fresh(config: GameConfig) -> Self {
        let size = config.grid_size;
        Self {
            config,
            phase: Phase::Setup,
            active_player: PlayerId::One,
            turn_count: 0,
            boards: [Board::new(size), Board::new(size)],
            placement: PlacementState::new(),
            winner: None,
            ids: SequentialIds::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Player currently entitled to place or attack.
    pub fn active_player(&self) -> PlayerId {
        self.active_player
    }

    /// Attacks resolved so far.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn placement(&self) -> &PlacementState {
        &self.placement
    }

    /// Read-only view of a player's own board.
    pub fn board(&self, player: PlayerId) -> &Board {
        &self.boards[player.index()]
    }

    pub fn remaining_units(&self, player: PlayerId) -> usize {
        self.board(player).remaining_units()
    }

    /// Units placed and units required for `player`.
    pub fn placement_progress(&self, player: PlayerId) -> (usize, usize) {
        (
            self.board(player).remaining_units(),
            self.config.roster.total_units(),
        )
    }

    /// Units of `kind` the active placer still has to put down.
    pub fn remaining_to_place(&self, kind: UnitKind) -> usize {
        let board = self.board(self.placement.active_placer);
        (self.config.roster.spec(kind).count as usize).saturating_sub(board.count_kind(kind))
    }

    fn require(&self, expected: Phase) -> Result<(), GameError> {
        if self.phase != expected {
            return Err(GameError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    /// Replace the configuration and rebuild both boards. Only allowed
    /// between games (`setup` or `finished`); the session returns to `setup`.
    pub fn configure(&mut self, config: GameConfig) -> Result<(), GameError> {
        if !matches!(self.phase, Phase::Setup | Phase::Finished) {
            return Err(GameError::WrongPhase {
                expected: Phase::Setup,
                actual: self.phase,
            });
        }
        config.validate()?;
        *self = Self::fresh(config);
        Ok(())
    }

    /// Discard any game in progress and begin placement for player one.
    pub fn start_new_game(&mut self) {
        *self = Self::fresh(self.config);
        self.phase = Phase::Placement;
        log::info!(
            "new game on a {}x{} grid, {} units per player",
            self.config.grid_size,
            self.config.grid_size,
            self.config.roster.total_units()
        );
    }

    /// Place one unit of `kind` for the active placer with its origin at
    /// (`row`, `col`).
    pub fn place_unit(
        &mut self,
        kind: UnitKind,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<UnitId, GameError> {
        self.require(Phase::Placement)?;
        if self.remaining_to_place(kind) == 0 {
            return Err(GameError::KindExhausted(kind));
        }
        let spec = *self.config.roster.spec(kind);
        let board = &mut self.boards[self.placement.active_placer.index()];
        let footprint = spec.footprint_at(row, col, orientation);
        check_placement(board.size(), board.units(), &footprint, None)?;

        let upright = spec.footprint_at(row, col, Orientation::Upright);
        let id = self.ids.next_id();
        board.place_unit(Unit::new(id, kind, upright, spec.health).oriented(orientation))?;
        Ok(id)
    }

    /// Rotate one of the active placer's units in place.
    pub fn rotate_unit(&mut self, id: UnitId) -> Result<(), GameError> {
        self.require(Phase::Placement)?;
        self.boards[self.placement.active_placer.index()].rotate_unit(id)?;
        Ok(())
    }

    /// Rotate the unit the active placer put down most recently.
    pub fn rotate_last_unit(&mut self) -> Result<UnitId, GameError> {
        self.require(Phase::Placement)?;
        let board = &mut self.boards[self.placement.active_placer.index()];
        let id = board
            .units()
            .last()
            .map(|u| u.id())
            .ok_or(GameError::NothingToRotate)?;
        board.rotate_unit(id)?;
        Ok(id)
    }

    /// Remove every unit the active placer has put down.
    pub fn clear_placement(&mut self) -> Result<(), GameError> {
        self.require(Phase::Placement)?;
        self.boards[self.placement.active_placer.index()].clear_units();
        Ok(())
    }

    /// Clear the active placer's board and seat the whole roster at random.
    ///
    /// If a unit cannot be seated the units placed before it remain and the
    /// error names the kind that failed.
    pub fn auto_place<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, GameError> {
        self.require(Phase::Placement)?;
        let board = &mut self.boards[self.placement.active_placer.index()];
        board.clear_units();
        let placed = auto_place(board, &self.config.roster, &mut self.ids, rng)?;
        Ok(placed)
    }

    /// Finish the active placer's turn. Fails with the placed/required counts
    /// while the roster is incomplete.
    pub fn advance_placement(&mut self) -> Result<PlacementStep, GameError> {
        self.require(Phase::Placement)?;
        let placer = self.placement.active_placer;
        let (placed, required) = self.placement_progress(placer);
        if placed < required {
            return Err(GameError::IncompletePlacement { placed, required });
        }
        match placer {
            PlayerId::One => {
                self.placement.player_one_done = true;
                self.placement.active_placer = PlayerId::Two;
                self.active_player = PlayerId::Two;
                log::info!("player 1 finished placement");
                Ok(PlacementStep::NextPlacer(PlayerId::Two))
            }
            PlayerId::Two => {
                self.placement.player_two_done = true;
                self.phase = Phase::Battle;
                self.active_player = PlayerId::One;
                log::info!("battle begins");
                Ok(PlacementStep::BattleStarted)
            }
        }
    }

    /// Active player attacks (`row`, `col`) on the opponent's board.
    ///
    /// A repeated cell is reported as [`AttackOutcome::AlreadyAttacked`] and
    /// does not consume the turn.
    pub fn attack(&mut self, row: usize, col: usize) -> Result<AttackReport, GameError> {
        self.require(Phase::Battle)?;
        let attacker = self.active_player;
        let target = &mut self.boards[attacker.other().index()];
        let outcome = target.attack(row, col)?;
        let mut report = AttackReport {
            attacker,
            row,
            col,
            outcome,
            turn_count: self.turn_count,
            winner: None,
        };
        if !outcome.is_resolved() {
            return Ok(report);
        }

        self.turn_count += 1;
        report.turn_count = self.turn_count;
        if target.remaining_units() == 0 {
            self.phase = Phase::Finished;
            self.winner = Some(attacker);
            report.winner = Some(attacker);
            log::info!("{} wins after {} attacks", attacker, self.turn_count);
        } else {
            self.active_player = attacker.other();
        }
        Ok(report)
    }

    /// Capture the full session state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            phase: self.phase,
            active_player: self.active_player,
            turn_count: self.turn_count,
            config: self.config,
            boards: [
                BoardState::from(&self.boards[0]),
                BoardState::from(&self.boards[1]),
            ],
            placement: self.placement,
            winner: self.winner,
        }
    }

    /// Rebuild a session from a snapshot, validating every invariant first.
    pub fn restore(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }
        let config = snapshot.config;
        config.validate()?;

        let [first, second] = snapshot.boards.clone();
        let boards = [
            restore_board(PlayerId::One, first, &config)?,
            restore_board(PlayerId::Two, second, &config)?,
        ];
        check_progress(&snapshot, &boards, &config)?;

        let next_id = boards
            .iter()
            .flat_map(|b| b.units())
            .map(|u| u.id().0.saturating_add(1))
            .max()
            .unwrap_or(0);

        Ok(Self {
            config,
            phase: snapshot.phase,
            active_player: snapshot.active_player,
            turn_count: snapshot.turn_count,
            boards,
            placement: snapshot.placement,
            winner: snapshot.winner,
            ids: SequentialIds::starting_at(next_id),
        })
    }
}

fn restore_board(
    player: PlayerId,
    state: BoardState,
    config: &GameConfig,
) -> Result<Board, SnapshotError> {
    if state.size != config.grid_size {
        return Err(SnapshotError::BoardSizeMismatch {
            player,
            size: state.size,
            expected: config.grid_size,
        });
    }
    Board::try_from(state)
}

/// Every unit must match its roster shape and health, and ids must be
/// unique across both boards.
fn check_units(boards: &[Board; 2], config: &GameConfig) -> Result<(), SnapshotError> {
    let units: Vec<&Unit> = boards.iter().flat_map(|b| b.units()).collect();
    for (i, unit) in units.iter().enumerate() {
        let id = unit.id();
        if units[..i].iter().any(|u| u.id() == id) {
            return Err(SnapshotError::DuplicateUnit(id));
        }
        let spec = config.roster.spec(unit.kind());
        let footprint = unit.footprint();
        let shape = if unit.is_rotated() {
            (spec.height, spec.width)
        } else {
            (spec.width, spec.height)
        };
        if (footprint.width, footprint.height) != shape || unit.max_health() != spec.health {
            return Err(SnapshotError::UnitMismatch(id));
        }
    }
    Ok(())
}

/// Cross-check phase, placement flags, turn counter and winner against the
/// restored boards.
fn check_progress(
    snapshot: &Snapshot,
    boards: &[Board; 2],
    config: &GameConfig,
) -> Result<(), SnapshotError> {
    use SnapshotError::Inconsistent;

    let roster = &config.roster;
    let p = &snapshot.placement;
    for board in boards {
        for kind in UnitKind::ALL {
            if board.count_kind(kind) > roster.spec(kind).count as usize {
                return Err(Inconsistent("more units than the roster allows"));
            }
        }
    }
    check_units(boards, config)?;
    let complete = |b: &Board| b.units().len() == roster.total_units();
    let attacks = |b: &Board| b.hit_log().len();

    match snapshot.phase {
        Phase::Setup | Phase::Placement => {
            if snapshot.winner.is_some() || snapshot.turn_count != 0 {
                return Err(Inconsistent("attacks recorded before battle"));
            }
            if boards.iter().any(|b| attacks(b) > 0) {
                return Err(Inconsistent("attacks recorded before battle"));
            }
            if snapshot.phase == Phase::Setup {
                if boards.iter().any(|b| !b.units().is_empty())
                    || *p != PlacementState::new()
                    || snapshot.active_player != PlayerId::One
                {
                    return Err(Inconsistent("setup phase with placement progress"));
                }
                return Ok(());
            }
            let flags_ok = match p.active_placer {
                PlayerId::One => {
                    !p.player_one_done && !p.player_two_done && boards[1].units().is_empty()
                }
                PlayerId::Two => p.player_one_done && !p.player_two_done && complete(&boards[0]),
            };
            if !flags_ok || snapshot.active_player != p.active_placer {
                return Err(Inconsistent("placement flags disagree with placer"));
            }
        }
        Phase::Battle | Phase::Finished => {
            if !(p.player_one_done && p.player_two_done) || !boards.iter().all(complete) {
                return Err(Inconsistent("battle without complete placement"));
            }
            let turns = snapshot.turn_count as usize;
            // player one attacks board two first, so board two has the odd attack
            if attacks(&boards[1]) != turns.div_ceil(2) || attacks(&boards[0]) != turns / 2 {
                return Err(Inconsistent("turn counter disagrees with hit logs"));
            }
            let alive = [boards[0].remaining_units(), boards[1].remaining_units()];
            if snapshot.phase == Phase::Battle {
                let expected = if turns % 2 == 0 {
                    PlayerId::One
                } else {
                    PlayerId::Two
                };
                if snapshot.winner.is_some()
                    || alive.contains(&0)
                    || snapshot.active_player != expected
                {
                    return Err(Inconsistent("battle state disagrees with turn order"));
                }
            } else {
                let winner = snapshot
                    .winner
                    .ok_or(Inconsistent("finished game without a winner"))?;
                if alive[winner.other().index()] != 0
                    || alive[winner.index()] == 0
                    || snapshot.active_player != winner
                    || (turns % 2 == 1) != (winner == PlayerId::One)
                {
                    return Err(Inconsistent("winner disagrees with remaining units"));
                }
            }
        }
    }
    Ok(())
}
