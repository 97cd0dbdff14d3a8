#![cfg(feature = "std")]

//! Plain-text board rendering and coordinate parsing for terminal front-ends.

use std::fmt::Write;
use std::string::String;

use crate::board::{Board, HitKind};
use crate::unit::UnitKind;

/// Format a cell as `A1`-style text (column letter, 1-based row).
pub fn coord_to_string(r: usize, c: usize) -> String {
    let col = (b'A' + c as u8) as char;
    std::format!("{}{}", col, r + 1)
}

/// Parse `A1`-style text into (row, col). Bounds are not checked.
pub fn parse_coord(input: &str) -> Option<(usize, usize)> {
    let input = input.trim();
    if input.len() < 2 {
        return None;
    }
    let mut chars = input.chars();
    let col_ch = chars.next()?.to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return None;
    }
    let col = (col_ch as u8 - b'A') as usize;
    let row_str: String = chars.collect();
    let row: usize = row_str.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, col))
}

fn kind_mark(kind: UnitKind) -> char {
    match kind {
        UnitKind::Soldier => 'S',
        UnitKind::Tank => 'T',
        UnitKind::Artillery => 'A',
        UnitKind::Bunker => 'B',
        UnitKind::Plane => 'P',
    }
}

fn header(out: &mut String, size: usize) {
    out.push_str("   ");
    for c in 0..size {
        let ch = (b'A' + c as u8) as char;
        let _ = write!(out, " {}", ch);
    }
    out.push('\n');
}

fn render(board: &Board, reveal: bool) -> String {
    let size = board.size();
    let mut out = String::new();
    header(&mut out, size);
    for r in 0..size {
        let _ = write!(out, "{:2} ", r + 1);
        for c in 0..size {
            let unit = board
                .units()
                .iter()
                .find(|u| u.footprint().contains(r, c));
            let ch = match board.record_at(r, c).map(|h| h.result) {
                Some(HitKind::Hit) => 'X',
                Some(HitKind::Miss) => 'o',
                None => match unit {
                    Some(u) if u.is_destroyed() => '#',
                    Some(u) if reveal => kind_mark(u.kind()),
                    _ => '.',
                },
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    out
}

/// Owner's view: every unit is shown with its kind letter.
pub fn render_own_board(board: &Board) -> String {
    render(board, true)
}

/// Opponent's view: only attack marks and the outlines of destroyed units.
pub fn render_enemy_board(board: &Board) -> String {
    render(board, false)
}

/// One line per unit: id, kind, origin, size and health.
pub fn unit_summary(board: &Board) -> String {
    let mut out = String::new();
    for u in board.units() {
        let status = if u.is_destroyed() { " destroyed" } else { "" };
        let _ = writeln!(
            out,
            "{:>4} {:<9} at {} {}x{} hp {}/{}{}",
            u.id().to_string(),
            u.kind().name(),
            coord_to_string(u.footprint().row, u.footprint().col),
            u.footprint().width,
            u.footprint().height,
            u.health(),
            u.max_health(),
            status
        );
    }
    out
}
