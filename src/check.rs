//! Check detection.

use crate::board::{Board, NUM_SQUARES};
use crate::pieces::Side;
use crate::rules;

/// Whether `side`'s king is currently attacked.
///
/// Scans the board for the king, then asks every enemy piece whether its
/// movement predicate reaches the king's square, short-circuiting on the
/// first attacker. A board with no king for `side` reports "not in check";
/// the game-over transition for a captured king belongs to the controller.
///
/// Pure with respect to the board: never mutates.
pub fn is_in_check(board: &Board, side: Side) -> bool {
    let Some(king_pos) = king_position(board, side) else {
        return false;
    };

    for pos in 0..NUM_SQUARES as i32 {
        let Some(piece) = board.get(pos) else {
            continue;
        };
        if piece.side() == side {
            continue;
        }
        if rules::is_legal(board, piece.kind(), pos, king_pos, piece.side()) {
            return true;
        }
    }

    false
}

/// Index of `side`'s king, if one is on the board.
pub fn king_position(board: &Board, side: Side) -> Option<i32> {
    (0..NUM_SQUARES as i32)
        .find(|&pos| board.get(pos).is_some_and(|piece| piece.is_king() && piece.side() == side))
}
