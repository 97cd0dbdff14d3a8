//! Common types: attack outcomes and the errors returned by board and
//! session operations.

use core::fmt;

use crate::config::ConfigError;
use crate::unit::{UnitId, UnitKind};

/// Result of attacking a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// A live unit occupied the cell and lost one hit point.
    Hit { unit: UnitId, destroyed: bool },
    /// No live unit occupied the cell.
    Miss,
    /// The cell was attacked before; nothing changed.
    AlreadyAttacked,
}

impl AttackOutcome {
    /// True for hit and miss, the outcomes that consume a turn.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, AttackOutcome::AlreadyAttacked)
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, AttackOutcome::Hit { .. })
    }

    /// True when this attack destroyed a unit.
    pub fn destroyed_unit(&self) -> bool {
        matches!(self, AttackOutcome::Hit { destroyed: true, .. })
    }
}

/// Why a candidate footprint cannot be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Footprint leaves the grid.
    OutOfBounds,
    /// Footprint shares a cell with the given live unit.
    Overlaps(UnitId),
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds => write!(f, "Unit placement is out of bounds"),
            PlacementError::Overlaps(id) => {
                write!(f, "Unit placement overlaps with unit {}", id)
            }
        }
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Attack coordinate outside the grid.
    CellOutOfBounds { row: usize, col: usize },
    /// No unit with this id on the board.
    UnknownUnit(UnitId),
    /// Rotation refused because the unit has taken damage.
    UnitDamaged(UnitId),
    /// Placement or rotation failed validation.
    Placement(PlacementError),
}

impl From<PlacementError> for BoardError {
    fn from(err: PlacementError) -> Self {
        BoardError::Placement(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::CellOutOfBounds { row, col } => {
                write!(f, "Cell ({}, {}) is outside the grid", row, col)
            }
            BoardError::UnknownUnit(id) => write!(f, "Unit {} is not on this board", id),
            BoardError::UnitDamaged(id) => {
                write!(f, "Unit {} has taken damage and can no longer rotate", id)
            }
            BoardError::Placement(e) => write!(f, "{}", e),
        }
    }
}

/// Random placement could not seat a unit within its retry bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoPlaceError {
    Unseated { kind: UnitKind, attempts: usize },
    /// A chosen spot was refused when the unit was seated.
    Placement(PlacementError),
}

impl fmt::Display for AutoPlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutoPlaceError::Unseated { kind, attempts } => write!(
                f,
                "Unable to place {} after {} attempts; roster does not fit the grid",
                kind, attempts
            ),
            AutoPlaceError::Placement(err) => write!(f, "Auto-placement failed: {}", err),
        }
    }
}

/// Errors returned by GameSession operations. State is unchanged whenever
/// one of these is returned, except for `AutoPlace` which keeps the units
/// seated before the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Operation not allowed in the current phase.
    WrongPhase { expected: Phase, actual: Phase },
    /// Placement cannot finish before the full roster is on the board.
    IncompletePlacement { placed: usize, required: usize },
    /// Every unit of this kind is already placed.
    KindExhausted(UnitKind),
    /// No unit on the active placer's board.
    NothingToRotate,
    Config(ConfigError),
    Board(BoardError),
    AutoPlace(AutoPlaceError),
}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}
#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
#[cfg(feature = "std")]
impl std::error::Error for AutoPlaceError {}
#[cfg(feature = "std")]
impl std::error::Error for GameError {}

impl From<ConfigError> for GameError {
    fn from(err: ConfigError) -> Self {
        GameError::Config(err)
    }
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl From<PlacementError> for GameError {
    fn from(err: PlacementError) -> Self {
        GameError::Board(BoardError::Placement(err))
    }
}

impl From<AutoPlaceError> for GameError {
    fn from(err: AutoPlaceError) -> Self {
        GameError::AutoPlace(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::WrongPhase { expected, actual } => {
                write!(f, "Expected {} phase, game is in {} phase", expected, actual)
            }
            GameError::IncompletePlacement { placed, required } => {
                write!(f, "Place every unit first ({}/{})", placed, required)
            }
            GameError::KindExhausted(kind) => write!(f, "No {} left to place", kind),
            GameError::NothingToRotate => write!(f, "No placed unit to rotate"),
            GameError::Config(e) => write!(f, "Invalid configuration: {}", e),
            GameError::Board(e) => write!(f, "{}", e),
            GameError::AutoPlace(e) => write!(f, "{}", e),
        }
    }
}

/// Top-level stage of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Phase {
    Setup,
    Placement,
    Battle,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Setup => "setup",
            Phase::Placement => "placement",
            Phase::Battle => "battle",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn other(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Index into two-element arrays.
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}
