//! Movement legality predicates, one per piece kind.
//!
//! All predicates are stateless over a [`Board`]: they answer whether the
//! geometry and occupancy allow the move, nothing more. Turn order,
//! self-check and castling live in [`crate::game`].
//!
//! The sliding pieces share a single ray scan that steps outward from the
//! source square along the enabled directions. Board positions are raw `i32`
//! indices; candidates that run off the board read as empty squares and can
//! never match a real target, so only the rank edges need explicit guards.

use crate::board::Board;
use crate::pieces::{Piece, PieceKind, Side};

/// Which direction families a ray scan walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directions {
    pub horizontal: bool,
    pub vertical: bool,
    pub diagonal: bool,
}

impl Directions {
    /// Rook movement: ranks and files.
    pub const STRAIGHT: Self = Self {
        horizontal: true,
        vertical: true,
        diagonal: false,
    };

    /// Bishop movement: diagonals only.
    pub const DIAGONAL: Self = Self {
        horizontal: false,
        vertical: false,
        diagonal: true,
    };

    /// Queen and king movement: everything.
    pub const ALL: Self = Self {
        horizontal: true,
        vertical: true,
        diagonal: true,
    };
}

/// True when `side` may land on `pos`: empty square or enemy piece.
#[inline]
fn can_land(board: &Board, pos: i32, side: Side) -> bool {
    match board.get(pos) {
        Some(piece) => piece.side() != side,
        None => true,
    }
}

#[inline]
fn is_friend(piece: Option<Piece>, side: Side) -> bool {
    piece.is_some_and(|piece| piece.side() == side)
}

/// Shared sliding-piece ray scan.
///
/// Steps a counter `i` from 1 to `sequence - 1` and advances up to eight
/// rays at once. A ray goes dead once it crosses a rank edge or passes a
/// square that is occupied by anything other than the target. Finding the
/// target is the single exit: the move is legal iff the target square is
/// empty or holds an enemy piece.
///
/// Horizontal rays are clamped to the source rank's index window. Diagonal
/// rays are retired after touching the a-file (left-going) or h-file
/// (right-going); the target test runs before that retirement check.
pub fn ray_move_allowed(
    board: &Board,
    from: i32,
    to: i32,
    side: Side,
    sequence: i32,
    directions: Directions,
) -> bool {
    if from == to {
        return false;
    }

    let mut left = directions.horizontal;
    let mut right = directions.horizontal;
    let mut up = directions.vertical;
    let mut down = directions.vertical;
    let mut up_left = directions.diagonal;
    let mut up_right = directions.diagonal;
    let mut down_left = directions.diagonal;
    let mut down_right = directions.diagonal;

    let left_limit = from - (from % 8);
    let right_limit = left_limit + 8;

    for i in 1..sequence {
        if left {
            let pos = from - i;
            if pos >= left_limit {
                if pos == to {
                    return can_land(board, pos, side);
                }
                left = board.get(pos).is_none();
            } else {
                left = false;
            }
        }

        if right {
            let pos = from + i;
            if pos < right_limit {
                if pos == to {
                    return can_land(board, pos, side);
                }
                right = board.get(pos).is_none();
            } else {
                right = false;
            }
        }

        if up {
            let pos = from + 8 * i;
            if pos == to {
                return can_land(board, pos, side);
            }
            up = board.get(pos).is_none();
        }

        if down {
            let pos = from - 8 * i;
            if pos == to {
                return can_land(board, pos, side);
            }
            down = board.get(pos).is_none();
        }

        if up_left {
            let pos = from + 7 * i;
            if pos == to {
                return can_land(board, pos, side);
            }
            up_left = board.get(pos).is_none();
            if pos % 8 == 0 {
                up_left = false;
            }
        }

        if up_right {
            let pos = from + 9 * i;
            if pos == to {
                return can_land(board, pos, side);
            }
            up_right = board.get(pos).is_none();
            if pos % 8 == 7 {
                up_right = false;
            }
        }

        if down_left {
            let pos = from - 9 * i;
            if pos == to {
                return can_land(board, pos, side);
            }
            down_left = board.get(pos).is_none();
            if pos % 8 == 0 {
                down_left = false;
            }
        }

        if down_right {
            let pos = from - 7 * i;
            if pos == to {
                return can_land(board, pos, side);
            }
            down_right = board.get(pos).is_none();
            if pos % 8 == 7 {
                down_right = false;
            }
        }
    }

    false
}

/// King movement: the shared scan with a short sequence.
///
/// `sequence` is 2 for ordinary single-step moves; the castling protocol
/// probes the king's reach with 3.
pub fn king_move_allowed(board: &Board, from: i32, to: i32, sequence: i32, side: Side) -> bool {
    ray_move_allowed(board, from, to, side, sequence, Directions::ALL)
}

/// Queen movement: full-length scan in every direction.
pub fn queen_move_allowed(board: &Board, from: i32, to: i32, side: Side) -> bool {
    ray_move_allowed(board, from, to, side, 8, Directions::ALL)
}

/// Rook movement: full-length scan along ranks and files.
pub fn rook_move_allowed(board: &Board, from: i32, to: i32, side: Side) -> bool {
    ray_move_allowed(board, from, to, side, 8, Directions::STRAIGHT)
}

/// Bishop movement: full-length scan along diagonals.
pub fn bishop_move_allowed(board: &Board, from: i32, to: i32, side: Side) -> bool {
    ray_move_allowed(board, from, to, side, 8, Directions::DIAGONAL)
}

/// Knight movement: fixed offset table, no file-wrap masking.
///
/// The eight candidates are raw index arithmetic; near the a/h files some of
/// them land on the far side of the board. Documented behavior, kept as-is.
pub fn knight_move_allowed(board: &Board, from: i32, to: i32, side: Side) -> bool {
    if from == to {
        return false;
    }

    let candidates = [
        from + 6,
        from - 6,
        from + 10,
        from - 10,
        from + 15,
        from - 15,
        from + 17,
        from - 17,
    ];

    if candidates.contains(&to) {
        return can_land(board, to, side);
    }

    false
}

/// Pawn movement: direction-dependent steps and diagonal captures.
///
/// Capture squares are tested first, then the single step, then the double
/// step. The double step is gated on the source index windows [8, 16] and
/// [48, 56], inclusive on both ends, and checks only the destination for
/// emptiness, not the square jumped over. Documented behavior, kept as-is.
/// No en passant.
pub fn pawn_move_allowed(board: &Board, from: i32, to: i32, side: Side) -> bool {
    if from == to {
        return false;
    }

    let (forward_step, double_forward_step, capture_left, capture_right) = match side {
        Side::Light => (8, 16, 7, 9),
        Side::Dark => (-8, -16, -7, -9),
    };

    // Diagonal captures
    if to == from + capture_left || to == from + capture_right {
        let piece = board.get(to);
        return piece.is_some() && !is_friend(piece, side);
    }

    // Single square forward
    if to == from + forward_step {
        return board.get(to).is_none();
    }

    // Double square forward from the starting windows
    if ((8..=16).contains(&from) || (48..=56).contains(&from)) && to == from + double_forward_step {
        return board.get(to).is_none();
    }

    false
}

/// Kind dispatch used by check detection.
///
/// Kings probe with sequence 2, the ordinary single-step reach.
pub fn is_legal(board: &Board, kind: PieceKind, from: i32, to: i32, side: Side) -> bool {
    match kind {
        PieceKind::Pawn => pawn_move_allowed(board, from, to, side),
        PieceKind::Knight => knight_move_allowed(board, from, to, side),
        PieceKind::Bishop => bishop_move_allowed(board, from, to, side),
        PieceKind::Rook => rook_move_allowed(board, from, to, side),
        PieceKind::Queen => queen_move_allowed(board, from, to, side),
        PieceKind::King => king_move_allowed(board, from, to, 2, side),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{FillVariant, Glyph};
    use test_case::test_case;

    fn piece(kind: PieceKind, side: Side) -> Piece {
        let fill = match side {
            Side::Light => FillVariant::Outline,
            Side::Dark => FillVariant::Filled,
        };
        Piece::new(Glyph::new(kind, fill), side)
    }

    fn board_with(pieces: &[(i32, PieceKind, Side)]) -> Board {
        let mut board = Board::empty();
        for &(index, kind, side) in pieces {
            board.place(index, Some(piece(kind, side)));
        }
        board
    }

    // ---------------------------------------------------------------
    // Ray scan: rook
    // ---------------------------------------------------------------

    #[test]
    fn test_rook_moves_along_rank_and_file() {
        let board = board_with(&[(27, PieceKind::Rook, Side::Light)]);
        assert!(rook_move_allowed(&board, 27, 24, Side::Light)); // d4 -> a4
        assert!(rook_move_allowed(&board, 27, 31, Side::Light)); // d4 -> h4
        assert!(rook_move_allowed(&board, 27, 3, Side::Light)); // d4 -> d1
        assert!(rook_move_allowed(&board, 27, 59, Side::Light)); // d4 -> d8
        assert!(!rook_move_allowed(&board, 27, 36, Side::Light)); // d4 -> e5
    }

    #[test]
    fn test_rook_blocked_by_intervening_piece() {
        let board = board_with(&[
            (27, PieceKind::Rook, Side::Light),
            (29, PieceKind::Pawn, Side::Dark), // f4
        ]);
        assert!(rook_move_allowed(&board, 27, 29, Side::Light), "capture on the blocker");
        assert!(!rook_move_allowed(&board, 27, 30, Side::Light), "cannot pass the blocker");
    }

    #[test]
    fn test_rook_cannot_land_on_friend() {
        let board = board_with(&[
            (27, PieceKind::Rook, Side::Light),
            (24, PieceKind::Pawn, Side::Light),
        ]);
        assert!(!rook_move_allowed(&board, 27, 24, Side::Light));
    }

    #[test]
    fn test_rook_does_not_wrap_rank_edges() {
        let board = board_with(&[(7, PieceKind::Rook, Side::Light)]); // h1
        assert!(!rook_move_allowed(&board, 7, 8, Side::Light), "h1 is not adjacent to a2");

        let board = board_with(&[(8, PieceKind::Rook, Side::Light)]); // a2
        assert!(!rook_move_allowed(&board, 8, 7, Side::Light), "a2 is not adjacent to h1");
    }

    #[test]
    fn test_ray_rejects_from_equal_to() {
        let board = board_with(&[(27, PieceKind::Queen, Side::Light)]);
        assert!(!queen_move_allowed(&board, 27, 27, Side::Light));
    }

    // ---------------------------------------------------------------
    // Ray scan: bishop and queen
    // ---------------------------------------------------------------

    #[test]
    fn test_bishop_moves_diagonally_only() {
        let board = board_with(&[(27, PieceKind::Bishop, Side::Light)]);
        assert!(bishop_move_allowed(&board, 27, 36, Side::Light)); // d4 -> e5
        assert!(bishop_move_allowed(&board, 27, 13, Side::Light)); // d4 -> f2
        assert!(bishop_move_allowed(&board, 27, 0, Side::Light)); // d4 -> a1
        assert!(!bishop_move_allowed(&board, 27, 28, Side::Light)); // d4 -> e4
    }

    #[test]
    fn test_bishop_ray_retires_after_board_edge() {
        // f1 up-right runs g2, h3 and must not continue onto a5.
        let board = board_with(&[(5, PieceKind::Bishop, Side::Light)]);
        assert!(bishop_move_allowed(&board, 5, 23, Side::Light)); // f1 -> h3
        assert!(!bishop_move_allowed(&board, 5, 32, Side::Light)); // f1 -/-> a5
    }

    #[test]
    fn test_bishop_blocked_diagonal() {
        let board = board_with(&[
            (27, PieceKind::Bishop, Side::Light),
            (36, PieceKind::Pawn, Side::Light), // e5
        ]);
        assert!(!bishop_move_allowed(&board, 27, 45, Side::Light));
    }

    #[test]
    fn test_queen_combines_rook_and_bishop() {
        let board = board_with(&[(27, PieceKind::Queen, Side::Light)]);
        assert!(queen_move_allowed(&board, 27, 31, Side::Light)); // rank
        assert!(queen_move_allowed(&board, 27, 59, Side::Light)); // file
        assert!(queen_move_allowed(&board, 27, 54, Side::Light)); // diagonal d4 -> g7
        assert!(!queen_move_allowed(&board, 27, 44, Side::Light)); // d4 -> e6 (knight shape)
    }

    // ---------------------------------------------------------------
    // King
    // ---------------------------------------------------------------

    #[test_case(28; "east")]
    #[test_case(26; "west")]
    #[test_case(35; "north")]
    #[test_case(19; "south")]
    #[test_case(36; "north east")]
    #[test_case(34; "north west")]
    #[test_case(20; "south east")]
    #[test_case(18; "south west")]
    fn test_king_single_steps(to: i32) {
        let board = board_with(&[(27, PieceKind::King, Side::Light)]);
        assert!(king_move_allowed(&board, 27, to, 2, Side::Light));
    }

    #[test]
    fn test_king_cannot_step_twice_with_ordinary_sequence() {
        let board = board_with(&[(27, PieceKind::King, Side::Light)]);
        assert!(!king_move_allowed(&board, 27, 29, 2, Side::Light));
    }

    #[test]
    fn test_king_castling_reach_spans_two_squares() {
        let board = board_with(&[(4, PieceKind::King, Side::Light)]);
        assert!(king_move_allowed(&board, 4, 6, 3, Side::Light));
        assert!(king_move_allowed(&board, 4, 2, 3, Side::Light));
    }

    #[test]
    fn test_king_castling_reach_blocked_by_occupied_transit() {
        let board = board_with(&[
            (4, PieceKind::King, Side::Light),
            (5, PieceKind::Bishop, Side::Light), // f1
        ]);
        assert!(!king_move_allowed(&board, 4, 6, 3, Side::Light));
    }

    // ---------------------------------------------------------------
    // Knight
    // ---------------------------------------------------------------

    #[test]
    fn test_knight_destination_set_from_center() {
        let board = board_with(&[(27, PieceKind::Knight, Side::Light)]);
        let expected = [21, 33, 17, 37, 12, 42, 10, 44];

        for to in 0..64 {
            let legal = knight_move_allowed(&board, 27, to, Side::Light);
            assert_eq!(
                legal,
                expected.contains(&to),
                "knight d4 -> index {to}"
            );
        }
    }

    #[test]
    fn test_knight_cannot_land_on_friend() {
        let board = board_with(&[
            (27, PieceKind::Knight, Side::Light),
            (44, PieceKind::Pawn, Side::Light),
        ]);
        assert!(!knight_move_allowed(&board, 27, 44, Side::Light));
        assert!(knight_move_allowed(&board, 27, 42, Side::Light));
    }

    #[test]
    fn test_knight_offsets_are_raw_arithmetic() {
        // From h4 the +10 offset lands on b6: the offsets carry across the
        // board edge. Kept as documented behavior.
        let board = board_with(&[(31, PieceKind::Knight, Side::Light)]);
        assert!(knight_move_allowed(&board, 31, 41, Side::Light));
    }

    // ---------------------------------------------------------------
    // Pawn
    // ---------------------------------------------------------------

    #[test]
    fn test_pawn_single_step_needs_empty_destination() {
        let board = board_with(&[(12, PieceKind::Pawn, Side::Light)]);
        assert!(pawn_move_allowed(&board, 12, 20, Side::Light));

        let blocked = board_with(&[
            (12, PieceKind::Pawn, Side::Light),
            (20, PieceKind::Pawn, Side::Dark),
        ]);
        assert!(!pawn_move_allowed(&blocked, 12, 20, Side::Light));
    }

    #[test]
    fn test_pawn_moves_forward_only() {
        let board = board_with(&[(28, PieceKind::Pawn, Side::Light)]);
        assert!(!pawn_move_allowed(&board, 28, 20, Side::Light), "no backward step");

        let board = board_with(&[(36, PieceKind::Pawn, Side::Dark)]);
        assert!(pawn_move_allowed(&board, 36, 28, Side::Dark));
        assert!(!pawn_move_allowed(&board, 36, 44, Side::Dark));
    }

    #[test]
    fn test_pawn_double_step_checks_destination_only() {
        // e3 occupied does not stop e2-e4; only e4 itself must be empty.
        let board = board_with(&[
            (12, PieceKind::Pawn, Side::Light),
            (20, PieceKind::Knight, Side::Dark),
        ]);
        assert!(pawn_move_allowed(&board, 12, 28, Side::Light));

        let blocked = board_with(&[
            (12, PieceKind::Pawn, Side::Light),
            (28, PieceKind::Knight, Side::Dark),
        ]);
        assert!(!pawn_move_allowed(&blocked, 12, 28, Side::Light));
    }

    #[test]
    fn test_pawn_double_step_outside_window_rejected() {
        let board = board_with(&[(28, PieceKind::Pawn, Side::Light)]);
        assert!(!pawn_move_allowed(&board, 28, 44, Side::Light));
    }

    #[test]
    fn test_pawn_double_step_window_is_inclusive() {
        // The dark window runs through index 56; a dark pawn parked on a8's
        // index would still qualify, and index 16 (a3) qualifies for the
        // light window's tail. Kept as documented behavior.
        let board = board_with(&[(16, PieceKind::Pawn, Side::Dark)]);
        assert!(pawn_move_allowed(&board, 16, 0, Side::Dark));
    }

    #[test]
    fn test_pawn_captures_diagonally_only_enemies() {
        let board = board_with(&[
            (12, PieceKind::Pawn, Side::Light),
            (19, PieceKind::Pawn, Side::Dark),  // d3
            (21, PieceKind::Pawn, Side::Light), // f3
        ]);
        assert!(pawn_move_allowed(&board, 12, 19, Side::Light));
        assert!(!pawn_move_allowed(&board, 12, 21, Side::Light), "friend on f3");

        let empty_diag = board_with(&[(12, PieceKind::Pawn, Side::Light)]);
        assert!(!pawn_move_allowed(&empty_diag, 12, 19, Side::Light), "no piece to take");
    }

    #[test]
    fn test_pawn_rejects_from_equal_to() {
        let board = board_with(&[(12, PieceKind::Pawn, Side::Light)]);
        assert!(!pawn_move_allowed(&board, 12, 12, Side::Light));
    }
}
