//! Commonly used types and utilities for ease of import.

pub use crate::{
    AttackOutcome, AttackReport, GameConfig, GameError, GameSession, Orientation, Phase,
    PlacementStep, PlayerId, Snapshot, UnitKind,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, storage, ui};
