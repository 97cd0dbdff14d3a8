//! Game configuration: grid size, per-kind roster and presentation settings.
//!
//! Configuration arriving from outside (files, snapshots) may be partial.
//! Missing values are filled from the per-kind defaults below and the result
//! is validated before it can be used by a session.

use core::fmt;

use crate::unit::{Footprint, Orientation, UnitKind};

pub const DEFAULT_GRID_SIZE: usize = 12;
pub const MIN_GRID_SIZE: usize = 6;
pub const MAX_GRID_SIZE: usize = 20;

/// Count, health and upright footprint size of one unit kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSpec {
    pub count: u32,
    pub health: u32,
    pub width: usize,
    pub height: usize,
}

impl UnitSpec {
    pub const fn new(count: u32, health: u32, width: usize, height: usize) -> Self {
        Self {
            count,
            health,
            width,
            height,
        }
    }

    /// Documented default for `kind`.
    pub const fn default_for(kind: UnitKind) -> Self {
        match kind {
            UnitKind::Soldier => UnitSpec::new(4, 1, 1, 1),
            UnitKind::Tank => UnitSpec::new(3, 2, 2, 1),
            UnitKind::Artillery => UnitSpec::new(2, 2, 3, 1),
            UnitKind::Bunker => UnitSpec::new(1, 3, 2, 2),
            UnitKind::Plane => UnitSpec::new(1, 2, 1, 3),
        }
    }

    /// Footprint of this kind at (`row`, `col`) in the given orientation.
    pub fn footprint_at(&self, row: usize, col: usize, orientation: Orientation) -> Footprint {
        let upright = Footprint::new(row, col, self.width, self.height);
        match orientation {
            Orientation::Upright => upright,
            Orientation::Rotated => upright.rotated(),
        }
    }

    /// Cells covered by one unit, saturating at `usize::MAX`.
    pub fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }
}

/// Roster with one named entry per unit kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    pub soldier: UnitSpec,
    pub tank: UnitSpec,
    pub artillery: UnitSpec,
    pub bunker: UnitSpec,
    pub plane: UnitSpec,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            soldier: UnitSpec::default_for(UnitKind::Soldier),
            tank: UnitSpec::default_for(UnitKind::Tank),
            artillery: UnitSpec::default_for(UnitKind::Artillery),
            bunker: UnitSpec::default_for(UnitKind::Bunker),
            plane: UnitSpec::default_for(UnitKind::Plane),
        }
    }
}

impl Roster {
    pub fn spec(&self, kind: UnitKind) -> &UnitSpec {
        match kind {
            UnitKind::Soldier => &self.soldier,
            UnitKind::Tank => &self.tank,
            UnitKind::Artillery => &self.artillery,
            UnitKind::Bunker => &self.bunker,
            UnitKind::Plane => &self.plane,
        }
    }

    pub fn spec_mut(&mut self, kind: UnitKind) -> &mut UnitSpec {
        match kind {
            UnitKind::Soldier => &mut self.soldier,
            UnitKind::Tank => &mut self.tank,
            UnitKind::Artillery => &mut self.artillery,
            UnitKind::Bunker => &mut self.bunker,
            UnitKind::Plane => &mut self.plane,
        }
    }

    /// Number of units each player must place.
    pub fn total_units(&self) -> usize {
        UnitKind::ALL
            .iter()
            .fold(0usize, |acc, &k| acc.saturating_add(self.spec(k).count as usize))
    }

    /// Cells covered by a complete placement.
    pub fn total_cells(&self) -> usize {
        UnitKind::ALL.iter().fold(0usize, |acc, &k| {
            let spec = self.spec(k);
            acc.saturating_add((spec.count as usize).saturating_mul(spec.area()))
        })
    }

    /// Kinds ordered largest footprint first, ties broken by the placement
    /// order bunker, artillery, plane, tank, soldier.
    pub fn placement_order(&self) -> [UnitKind; 5] {
        let mut kinds = [
            UnitKind::Bunker,
            UnitKind::Artillery,
            UnitKind::Plane,
            UnitKind::Tank,
            UnitKind::Soldier,
        ];
        // stable sort keeps the tie order above
        kinds.sort_by(|a, b| self.spec(*b).area().cmp(&self.spec(*a).area()));
        kinds
    }
}

/// Presentation preferences. The engine never reads them; they travel with
/// the configuration so a front-end can persist them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct DisplaySettings {
    #[cfg_attr(feature = "std", serde(alias = "dotSize"))]
    pub dot_size: u32,
    #[cfg_attr(feature = "std", serde(alias = "previewEnabled"))]
    pub preview_enabled: bool,
    #[cfg_attr(feature = "std", serde(alias = "soundEnabled"))]
    pub sound_enabled: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            dot_size: 14,
            preview_enabled: true,
            sound_enabled: true,
        }
    }
}

/// Complete game configuration. Sessions only accept it after
/// [`GameConfig::validate`] succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub grid_size: usize,
    pub roster: Roster,
    pub display: DisplaySettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            roster: Roster::default(),
            display: DisplaySettings::default(),
        }
    }
}

impl GameConfig {
    /// Default roster on a grid of `grid_size`.
    pub fn with_grid_size(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Self::default()
        }
    }

    /// Check every value a session relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.grid_size;
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            return Err(ConfigError::GridSizeOutOfRange {
                size,
                min: MIN_GRID_SIZE,
                max: MAX_GRID_SIZE,
            });
        }
        for kind in UnitKind::ALL {
            let spec = self.roster.spec(kind);
            if spec.health == 0 {
                return Err(ConfigError::ZeroHealth(kind));
            }
            if spec.width == 0 || spec.height == 0 {
                return Err(ConfigError::ZeroFootprint(kind));
            }
            if spec.count > 0 && spec.width.max(spec.height) > size {
                return Err(ConfigError::UnitTooLarge {
                    kind,
                    width: spec.width,
                    height: spec.height,
                    grid_size: size,
                });
            }
        }
        if self.roster.total_units() == 0 {
            return Err(ConfigError::EmptyRoster);
        }
        let cells = self.roster.total_cells();
        if cells > size * size {
            return Err(ConfigError::RosterTooDense {
                cells,
                capacity: size * size,
            });
        }
        Ok(())
    }
}

/// Reasons a configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    GridSizeOutOfRange { size: usize, min: usize, max: usize },
    ZeroHealth(UnitKind),
    ZeroFootprint(UnitKind),
    UnitTooLarge {
        kind: UnitKind,
        width: usize,
        height: usize,
        grid_size: usize,
    },
    EmptyRoster,
    RosterTooDense { cells: usize, capacity: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::GridSizeOutOfRange { size, min, max } => {
                write!(f, "grid size {} outside {}..={}", size, min, max)
            }
            ConfigError::ZeroHealth(kind) => write!(f, "{} must have positive health", kind),
            ConfigError::ZeroFootprint(kind) => {
                write!(f, "{} must have positive width and height", kind)
            }
            ConfigError::UnitTooLarge {
                kind,
                width,
                height,
                grid_size,
            } => write!(
                f,
                "{} footprint {}x{} does not fit a {}x{} grid",
                kind, width, height, grid_size, grid_size
            ),
            ConfigError::EmptyRoster => write!(f, "roster contains no units"),
            ConfigError::RosterTooDense { cells, capacity } => write!(
                f,
                "roster needs {} cells but the grid only has {}",
                cells, capacity
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Unit spec as found in external input; every field optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct PartialUnitSpec {
    pub count: Option<u32>,
    #[cfg_attr(feature = "std", serde(alias = "hp"))]
    pub health: Option<u32>,
    #[cfg_attr(feature = "std", serde(alias = "w"))]
    pub width: Option<usize>,
    #[cfg_attr(feature = "std", serde(alias = "h"))]
    pub height: Option<usize>,
}

impl PartialUnitSpec {
    pub fn resolve(&self, kind: UnitKind) -> UnitSpec {
        let def = UnitSpec::default_for(kind);
        UnitSpec {
            count: self.count.unwrap_or(def.count),
            health: self.health.unwrap_or(def.health),
            width: self.width.unwrap_or(def.width),
            height: self.height.unwrap_or(def.height),
        }
    }
}

/// Roster as found in external input; absent kinds use their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct PartialRoster {
    pub soldier: PartialUnitSpec,
    pub tank: PartialUnitSpec,
    pub artillery: PartialUnitSpec,
    pub bunker: PartialUnitSpec,
    pub plane: PartialUnitSpec,
}

/// Configuration as found in external input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct PartialConfig {
    #[cfg_attr(feature = "std", serde(alias = "gridSize"))]
    pub grid_size: Option<usize>,
    #[cfg_attr(feature = "std", serde(alias = "units"))]
    pub roster: PartialRoster,
    pub display: DisplaySettings,
}

impl PartialConfig {
    /// Fill gaps from the defaults without validating.
    pub fn resolve(&self) -> GameConfig {
        let r = &self.roster;
        GameConfig {
            grid_size: self.grid_size.unwrap_or(DEFAULT_GRID_SIZE),
            roster: Roster {
                soldier: r.soldier.resolve(UnitKind::Soldier),
                tank: r.tank.resolve(UnitKind::Tank),
                artillery: r.artillery.resolve(UnitKind::Artillery),
                bunker: r.bunker.resolve(UnitKind::Bunker),
                plane: r.plane.resolve(UnitKind::Plane),
            },
            display: self.display,
        }
    }
}

impl TryFrom<PartialConfig> for GameConfig {
    type Error = ConfigError;

    fn try_from(partial: PartialConfig) -> Result<Self, Self::Error> {
        let config = partial.resolve();
        config.validate()?;
        Ok(config)
    }
}
