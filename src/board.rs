//! One player's grid: placed units and the log of attacks received.

use alloc::vec::Vec;
use core::fmt;

use crate::common::{AttackOutcome, BoardError, PlacementError};
use crate::placement::{can_place, check_placement};
use crate::snapshot::SnapshotError;
use crate::unit::{Footprint, Unit, UnitId, UnitKind};

/// Whether an attack record landed on a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum HitKind {
    Hit,
    Miss,
}

/// One attacked cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct HitRecord {
    pub row: usize,
    pub col: usize,
    pub result: HitKind,
    pub unit: Option<UnitId>,
}

/// Serializable board state for saving games.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardState {
    pub size: usize,
    pub units: Vec<Unit>,
    pub hit_log: Vec<HitRecord>,
}

/// Main board state: unit placements and attack history.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    units: Vec<Unit>,
    hit_log: Vec<HitRecord>,
}

impl Board {
    /// Create an empty `size`×`size` board.
    pub fn new(size: usize) -> Self {
        Board {
            size,
            units: Vec::new(),
            hit_log: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Units in placement order, destroyed ones included.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Attack records in the order they were resolved.
    pub fn hit_log(&self) -> &[HitRecord] {
        &self.hit_log
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id() == id)
    }

    /// Live unit covering (`row`, `col`), if any.
    pub fn unit_at(&self, row: usize, col: usize) -> Option<&Unit> {
        self.units
            .iter()
            .find(|u| !u.is_destroyed() && u.footprint().contains(row, col))
    }

    /// Recorded attack at (`row`, `col`), if any.
    pub fn record_at(&self, row: usize, col: usize) -> Option<&HitRecord> {
        self.hit_log.iter().find(|h| h.row == row && h.col == col)
    }

    pub fn is_attacked(&self, row: usize, col: usize) -> bool {
        self.record_at(row, col).is_some()
    }

    /// Count of units not yet destroyed. Zero means the owner has lost.
    pub fn remaining_units(&self) -> usize {
        self.units.iter().filter(|u| !u.is_destroyed()).count()
    }

    /// Units of `kind` currently on the board.
    pub fn count_kind(&self, kind: UnitKind) -> usize {
        self.units.iter().filter(|u| u.kind() == kind).count()
    }

    /// Placement check for a candidate footprint.
    pub fn can_place(&self, footprint: &Footprint) -> bool {
        can_place(self.size, &self.units, footprint)
    }

    /// Append `unit` if its footprint is in bounds and clear of live units.
    /// The board is unchanged on error.
    pub fn place_unit(&mut self, unit: Unit) -> Result<(), PlacementError> {
        check_placement(self.size, &self.units, &unit.footprint(), None)?;
        log::debug!(
            "placed {} {} at ({}, {}) {}x{}",
            unit.kind(),
            unit.id(),
            unit.footprint().row,
            unit.footprint().col,
            unit.footprint().width,
            unit.footprint().height
        );
        self.units.push(unit);
        Ok(())
    }

    /// Swap width and height of an undamaged unit if the rotated footprint
    /// still fits.
    pub fn rotate_unit(&mut self, id: UnitId) -> Result<(), BoardError> {
        let idx = self
            .units
            .iter()
            .position(|u| u.id() == id)
            .ok_or(BoardError::UnknownUnit(id))?;
        let unit = self.units[idx];
        if unit.is_damaged() || unit.is_destroyed() {
            return Err(BoardError::UnitDamaged(id));
        }
        let rotated = unit.footprint().rotated();
        check_placement(self.size, &self.units, &rotated, Some(id))?;
        self.units[idx].rotate();
        Ok(())
    }

    /// Remove every unit. Only meaningful before any attack has landed.
    pub fn clear_units(&mut self) {
        self.units.clear();
    }

    /// Resolve an attack at (`row`, `col`).
    ///
    /// A repeated cell yields [`AttackOutcome::AlreadyAttacked`] and changes
    /// nothing. Otherwise the first live unit covering the cell loses one hit
    /// point and the cell is appended to the hit log.
    pub fn attack(&mut self, row: usize, col: usize) -> Result<AttackOutcome, BoardError> {
        if row >= self.size || col >= self.size {
            return Err(BoardError::CellOutOfBounds { row, col });
        }
        if self.is_attacked(row, col) {
            return Ok(AttackOutcome::AlreadyAttacked);
        }
        let target = self
            .units
            .iter_mut()
            .find(|u| !u.is_destroyed() && u.footprint().contains(row, col));
        let (record, outcome) = match target {
            Some(unit) => {
                let destroyed = unit.take_hit();
                let id = unit.id();
                (
                    HitRecord {
                        row,
                        col,
                        result: HitKind::Hit,
                        unit: Some(id),
                    },
                    AttackOutcome::Hit { unit: id, destroyed },
                )
            }
            None => (
                HitRecord {
                    row,
                    col,
                    result: HitKind::Miss,
                    unit: None,
                },
                AttackOutcome::Miss,
            ),
        };
        self.hit_log.push(record);
        log::debug!("attack ({}, {}) -> {:?}", row, col, outcome);
        Ok(outcome)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  size: {},\n  units: {:?},\n  hit_log: {:?}\n}}",
            self.size, self.units, self.hit_log
        )
    }
}

impl From<&Board> for BoardState {
    fn from(b: &Board) -> Self {
        BoardState {
            size: b.size,
            units: b.units.clone(),
            hit_log: b.hit_log.clone(),
        }
    }
}

impl TryFrom<BoardState> for Board {
    type Error = SnapshotError;

    /// Rebuild a board, rejecting any state the engine could not have
    /// produced.
    fn try_from(state: BoardState) -> Result<Self, Self::Error> {
        let size = state.size;
        for (i, unit) in state.units.iter().enumerate() {
            let id = unit.id();
            if state.units[..i].iter().any(|u| u.id() == id) {
                return Err(SnapshotError::DuplicateUnit(id));
            }
            if !unit.footprint().within(size) {
                return Err(SnapshotError::UnitOutOfBounds(id));
            }
            if unit.max_health() == 0
                || unit.health() > unit.max_health()
                || unit.is_destroyed() != (unit.health() == 0)
            {
                return Err(SnapshotError::BadHealth(id));
            }
            if unit.is_destroyed() {
                continue;
            }
            if let Some(other) = state.units[..i]
                .iter()
                .find(|u| !u.is_destroyed() && u.footprint().overlaps(&unit.footprint()))
            {
                return Err(SnapshotError::UnitsOverlap(other.id(), id));
            }
        }

        for (i, rec) in state.hit_log.iter().enumerate() {
            let (row, col) = (rec.row, rec.col);
            if row >= size || col >= size {
                return Err(SnapshotError::AttackOutOfBounds { row, col });
            }
            if state.hit_log[..i]
                .iter()
                .any(|h| h.row == row && h.col == col)
            {
                return Err(SnapshotError::DuplicateAttack { row, col });
            }
            let consistent = match (rec.result, rec.unit) {
                (HitKind::Hit, Some(id)) => state
                    .units
                    .iter()
                    .any(|u| u.id() == id && u.footprint().contains(row, col)),
                (HitKind::Miss, None) => true,
                _ => false,
            };
            if !consistent {
                return Err(SnapshotError::BadHitRecord { row, col });
            }
        }

        for unit in &state.units {
            let hits = state
                .hit_log
                .iter()
                .filter(|h| h.unit == Some(unit.id()))
                .count();
            if hits as u64 != u64::from(unit.max_health() - unit.health()) {
                return Err(SnapshotError::HitCountMismatch(unit.id()));
            }
        }

        Ok(Board {
            size,
            units: state.units,
            hit_log: state.hit_log,
        })
    }
}
