//! Move search - finds rotations that would remove at least one group
//!
//! The search simulates every 2x2 rotation on a detached copy of the board and
//! asks the matcher about the four rotated cells only. It looks one round
//! deep: cascades depend on refills that a hint must not consume.

use std::collections::BTreeSet;

use match_three_core::{Board, Matcher, Move, RotateSquare};
use match_three_types::{Position, Turn};

/// A rotation that produces at least one removable group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    pub rotation: RotateSquare,
    /// Removable groups created by the rotation
    pub groups: usize,
    /// Size of the largest of them
    pub largest: usize,
}

/// Every productive rotation, best first
///
/// Hints are ordered by largest group, then by group count, then by position
/// (row-major) with clockwise before counter-clockwise.
pub fn find_productive_moves(board: &Board, matcher: &dyn Matcher, min_match_size: usize) -> Vec<Hint> {
    let mut scratch = board.detached_copy();
    let mut hints = Vec::new();

    for origin in board.positions() {
        for turn in [Turn::Clockwise, Turn::CounterClockwise] {
            let rotation = RotateSquare::new(origin, turn);
            if !rotation.can_be_applied(&scratch) {
                continue;
            }
            if let Some(hint) = evaluate(&mut scratch, matcher, rotation, min_match_size) {
                hints.push(hint);
            }
        }
    }

    hints.sort_by(|a, b| {
        b.largest
            .cmp(&a.largest)
            .then(b.groups.cmp(&a.groups))
            .then(a.rotation.origin.cmp(&b.rotation.origin))
    });
    tracing::debug!(hints = hints.len(), "move search finished");
    hints
}

/// Whether any rotation on the board is productive
pub fn has_productive_move(board: &Board, matcher: &dyn Matcher, min_match_size: usize) -> bool {
    !find_productive_moves(board, matcher, min_match_size).is_empty()
}

/// Apply, match the touched cells, undo
fn evaluate(
    scratch: &mut Board,
    matcher: &dyn Matcher,
    rotation: RotateSquare,
    min_match_size: usize,
) -> Option<Hint> {
    rotation.apply(scratch).ok()?;
    let touched: BTreeSet<Position> = rotation.affected_positions().into_iter().collect();
    let sizes: Vec<usize> = matcher
        .match_all(scratch, &touched)
        .iter()
        .map(BTreeSet::len)
        .filter(|&len| len >= min_match_size)
        .collect();
    rotation.reversed().apply(scratch).ok()?;

    let largest = sizes.iter().copied().max()?;
    Some(Hint {
        rotation,
        groups: sizes.len(),
        largest,
    })
}
