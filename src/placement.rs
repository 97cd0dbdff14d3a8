//! Placement validation: bounds and overlap checks against live units.

use crate::common::PlacementError;
use crate::unit::{Footprint, Unit, UnitId};

/// Explain why `candidate` cannot be placed on a `size`×`size` grid holding
/// `units`, or return `Ok(())` if it can. Destroyed units are ignored, as is
/// the unit named by `ignore` (used when re-validating a rotation).
pub fn check_placement(
    size: usize,
    units: &[Unit],
    candidate: &Footprint,
    ignore: Option<UnitId>,
) -> Result<(), PlacementError> {
    if !candidate.within(size) {
        return Err(PlacementError::OutOfBounds);
    }
    let blocker = units
        .iter()
        .filter(|u| !u.is_destroyed() && Some(u.id()) != ignore)
        .find(|u| u.footprint().overlaps(candidate));
    match blocker {
        Some(u) => Err(PlacementError::Overlaps(u.id())),
        None => Ok(()),
    }
}

/// True when `candidate` lies inside the grid and clears every live unit.
pub fn can_place(size: usize, units: &[Unit], candidate: &Footprint) -> bool {
    check_placement(size, units, candidate, None).is_ok()
}
