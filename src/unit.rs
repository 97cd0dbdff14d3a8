//! Unit definitions and footprint geometry.

use core::fmt;
use core::str::FromStr;

/// The fixed set of unit kinds a roster can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum UnitKind {
    Soldier,
    Tank,
    Artillery,
    Bunker,
    Plane,
}

impl UnitKind {
    /// Every kind, in roster declaration order.
    pub const ALL: [UnitKind; 5] = [
        UnitKind::Soldier,
        UnitKind::Tank,
        UnitKind::Artillery,
        UnitKind::Bunker,
        UnitKind::Plane,
    ];

    /// Lowercase name used in configuration files and commands.
    pub const fn name(self) -> &'static str {
        match self {
            UnitKind::Soldier => "soldier",
            UnitKind::Tank => "tank",
            UnitKind::Artillery => "artillery",
            UnitKind::Bunker => "bunker",
            UnitKind::Plane => "plane",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown unit kind name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind;

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown unit kind")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownKind {}

impl FromStr for UnitKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitKind::ALL
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(UnknownKind)
    }
}

/// Stable identifier of a placed unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(transparent))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.0)
    }
}

/// Source of fresh unit identifiers.
pub trait IdGenerator {
    fn next_id(&mut self) -> UnitId;
}

/// Monotonic counter producing `u0, u1, u2, ...`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequentialIds {
    next: u32,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Counter whose first issued id is `next`.
    pub fn starting_at(next: u32) -> Self {
        Self { next }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> UnitId {
        let id = UnitId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Whether a unit uses its configured width/height or the swapped pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Upright,
    Rotated,
}

/// Axis-aligned rectangle of grid cells: origin (row, col), `width` columns
/// by `height` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint {
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

impl Footprint {
    pub const fn new(row: usize, col: usize, width: usize, height: usize) -> Self {
        Self {
            row,
            col,
            width,
            height,
        }
    }

    /// Footprint with width and height swapped around the same origin.
    pub const fn rotated(self) -> Self {
        Self {
            row: self.row,
            col: self.col,
            width: self.height,
            height: self.width,
        }
    }

    /// True when the rectangle lies entirely inside `[0, size) × [0, size)`.
    pub fn within(&self, size: usize) -> bool {
        self.width > 0
            && self.height > 0
            && self.row.checked_add(self.height).is_some_and(|end| end <= size)
            && self.col.checked_add(self.width).is_some_and(|end| end <= size)
    }

    /// True when (`row`, `col`) is one of the covered cells.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row
            && row < self.row + self.height
            && col >= self.col
            && col < self.col + self.width
    }

    /// True when both rectangles share at least one cell. Edge-adjacent
    /// rectangles do not overlap.
    pub fn overlaps(&self, other: &Footprint) -> bool {
        !(self.col + self.width <= other.col
            || other.col + other.width <= self.col
            || self.row + self.height <= other.row
            || other.row + other.height <= self.row)
    }
}

/// A unit placed on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    id: UnitId,
    kind: UnitKind,
    footprint: Footprint,
    health: u32,
    max_health: u32,
    destroyed: bool,
    rotated: bool,
}

impl Unit {
    /// Fresh unit at full health.
    ///
    /// `health` must be positive. Callers take it from a validated
    /// [`UnitSpec`](crate::config::UnitSpec), which never carries zero.
    pub fn new(id: UnitId, kind: UnitKind, footprint: Footprint, health: u32) -> Self {
        debug_assert!(health > 0, "unit {} built with zero health", id);
        Self {
            id,
            kind,
            footprint,
            health,
            max_health: health,
            destroyed: false,
            rotated: false,
        }
    }

    /// Apply `orientation` to a freshly built unit whose footprint is given
    /// in its configured (upright) shape.
    pub fn oriented(mut self, orientation: Orientation) -> Self {
        if orientation == Orientation::Rotated {
            self.rotate();
        }
        self
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// True once any hit has landed.
    pub fn is_damaged(&self) -> bool {
        self.health < self.max_health
    }

    /// Whether width/height are currently swapped relative to placement.
    pub fn is_rotated(&self) -> bool {
        self.rotated
    }

    /// Remove one hit point. Returns `true` when this hit destroyed the unit.
    pub(crate) fn take_hit(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.destroyed = true;
            return true;
        }
        false
    }

    pub(crate) fn rotate(&mut self) {
        self.footprint = self.footprint.rotated();
        self.rotated = !self.rotated;
    }
}
