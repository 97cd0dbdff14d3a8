//! Randomized placement of a full roster.

use rand::Rng;

use crate::board::Board;
use crate::common::AutoPlaceError;
use crate::config::{Roster, UnitSpec};
use crate::unit::{Footprint, IdGenerator, Orientation, Unit, UnitKind};

/// Attempts per unit before giving up.
pub const MAX_ATTEMPTS: usize = 200;

/// Returns a random non-overlapping footprint for one unit of `kind`.
pub fn random_placement<R: Rng + ?Sized>(
    board: &Board,
    kind: UnitKind,
    spec: &UnitSpec,
    rng: &mut R,
) -> Result<(Footprint, Orientation), AutoPlaceError> {
    let size = board.size();
    for _ in 0..MAX_ATTEMPTS {
        let orientation = if spec.width != spec.height && rng.random_bool(0.5) {
            Orientation::Rotated
        } else {
            Orientation::Upright
        };
        let shape = spec.footprint_at(0, 0, orientation);
        if shape.width > size || shape.height > size {
            continue;
        }
        let row = rng.random_range(0..=size - shape.height);
        let col = rng.random_range(0..=size - shape.width);
        let footprint = spec.footprint_at(row, col, orientation);
        if board.can_place(&footprint) {
            return Ok((footprint, orientation));
        }
    }
    Err(AutoPlaceError::Unseated {
        kind,
        attempts: MAX_ATTEMPTS,
    })
}

/// Seat every unit of `roster` not already on `board`, largest kinds first.
///
/// Returns the number of units placed. On failure the units seated so far
/// stay on the board.
pub fn auto_place<R, G>(
    board: &mut Board,
    roster: &Roster,
    ids: &mut G,
    rng: &mut R,
) -> Result<usize, AutoPlaceError>
where
    R: Rng + ?Sized,
    G: IdGenerator + ?Sized,
{
    let mut placed = 0;
    for kind in roster.placement_order() {
        let spec = roster.spec(kind);
        let missing = (spec.count as usize).saturating_sub(board.count_kind(kind));
        for _ in 0..missing {
            let (footprint, orientation) = match random_placement(board, kind, spec, rng) {
                Ok(found) => found,
                Err(e) => {
                    log::warn!("{}", e);
                    return Err(e);
                }
            };
            let upright = spec.footprint_at(footprint.row, footprint.col, Orientation::Upright);
            let unit = Unit::new(ids.next_id(), kind, upright, spec.health).oriented(orientation);
            board.place_unit(unit).map_err(AutoPlaceError::Placement)?;
            placed += 1;
        }
    }
    Ok(placed)
}
