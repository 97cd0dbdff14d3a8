//! Serializable snapshot of a whole session and the errors raised when a
//! snapshot fails validation.

use core::fmt;

use crate::board::BoardState;
use crate::common::{Phase, PlayerId};
use crate::config::{ConfigError, GameConfig};
use crate::unit::UnitId;

/// Current snapshot layout.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Placement progress of both players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementState {
    pub active_placer: PlayerId,
    pub player_one_done: bool,
    pub player_two_done: bool,
}

impl PlacementState {
    pub fn new() -> Self {
        Self {
            active_placer: PlayerId::One,
            player_one_done: false,
            player_two_done: false,
        }
    }

    pub fn is_done(&self, player: PlayerId) -> bool {
        match player {
            PlayerId::One => self.player_one_done,
            PlayerId::Two => self.player_two_done,
        }
    }
}

impl Default for PlacementState {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything needed to rebuild a session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub version: u32,
    pub phase: Phase,
    pub active_player: PlayerId,
    pub turn_count: u32,
    pub config: GameConfig,
    pub boards: [BoardState; 2],
    pub placement: PlacementState,
    pub winner: Option<PlayerId>,
}

/// Reasons a snapshot is rejected. Restoring never applies part of a
/// rejected snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    UnsupportedVersion(u32),
    Config(ConfigError),
    BoardSizeMismatch {
        player: PlayerId,
        size: usize,
        expected: usize,
    },
    DuplicateUnit(UnitId),
    UnitOutOfBounds(UnitId),
    UnitsOverlap(UnitId, UnitId),
    BadHealth(UnitId),
    AttackOutOfBounds { row: usize, col: usize },
    DuplicateAttack { row: usize, col: usize },
    BadHitRecord { row: usize, col: usize },
    HitCountMismatch(UnitId),
    /// Footprint or maximum health differs from the unit's roster entry.
    UnitMismatch(UnitId),
    /// Phase, placement flags, turn counter and winner disagree.
    Inconsistent(&'static str),
}

impl From<ConfigError> for SnapshotError {
    fn from(err: ConfigError) -> Self {
        SnapshotError::Config(err)
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::UnsupportedVersion(v) => {
                write!(f, "unsupported snapshot version {}", v)
            }
            SnapshotError::Config(e) => write!(f, "invalid configuration: {}", e),
            SnapshotError::BoardSizeMismatch {
                player,
                size,
                expected,
            } => write!(
                f,
                "{} board has size {} but configuration says {}",
                player, size, expected
            ),
            SnapshotError::DuplicateUnit(id) => write!(f, "unit {} appears twice", id),
            SnapshotError::UnitOutOfBounds(id) => write!(f, "unit {} leaves the grid", id),
            SnapshotError::UnitsOverlap(a, b) => write!(f, "units {} and {} overlap", a, b),
            SnapshotError::BadHealth(id) => write!(f, "unit {} has inconsistent health", id),
            SnapshotError::AttackOutOfBounds { row, col } => {
                write!(f, "attack record ({}, {}) outside the grid", row, col)
            }
            SnapshotError::DuplicateAttack { row, col } => {
                write!(f, "cell ({}, {}) attacked twice", row, col)
            }
            SnapshotError::BadHitRecord { row, col } => {
                write!(f, "attack record ({}, {}) does not match any unit", row, col)
            }
            SnapshotError::HitCountMismatch(id) => {
                write!(f, "hit log disagrees with health of unit {}", id)
            }
            SnapshotError::UnitMismatch(id) => {
                write!(f, "unit {} does not match its roster entry", id)
            }
            SnapshotError::Inconsistent(what) => write!(f, "inconsistent session: {}", what),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SnapshotError {}
