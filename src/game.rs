//! Game orchestration: the move state machine.
//!
//! [`GameController`] owns the board, the side to move, castling rights and
//! the game status. The UI collaborator drives it through [`swap_to`] and
//! receives notices, promotion requests and the game-over signal through its
//! [`GameEvents`] implementation.
//!
//! [`swap_to`]: GameController::swap_to

use std::fmt;

use thiserror::Error;

use crate::GameEvents;
use crate::board::{Board, NUM_SQUARES};
use crate::castling::CastlingRights;
use crate::check;
use crate::config::GameConfig;
use crate::pieces::{Glyph, Piece, PieceKind, Side};
use crate::rules;

/// Whether a game is still running.
///
/// A game ends only when a king is captured; the state is terminal until a
/// fresh controller is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    GameOver { winner: Side },
}

/// Token for a promotion awaiting the collaborator's choice.
///
/// Issued when a pawn reaches its far rank; pass it back to
/// [`GameController::resolve_promotion`] or
/// [`GameController::cancel_promotion`]. The turn has already flipped by the
/// time the token is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionRequest {
    square: i32,
    side: Side,
}

impl PromotionRequest {
    /// Board index of the pawn to be promoted.
    #[inline]
    pub const fn square(self) -> i32 {
        self.square
    }

    /// Side the promoting pawn belongs to.
    #[inline]
    pub const fn side(self) -> Side {
        self.side
    }
}

/// Misuse of the two-phase promotion protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PromotionError {
    #[error("no promotion is pending")]
    NonePending,
    #[error("request does not match the pending promotion")]
    RequestMismatch,
    #[error("pawns promote to queen, rook, bishop or knight")]
    KindNotOffered,
}

/// The rule engine façade.
///
/// Single-threaded and synchronous: every state change happens inside a call
/// made by the collaborator. The only suspended interaction is the promotion
/// choice, which is resolved through [`PromotionRequest`] after `swap_to` has
/// already returned.
pub struct GameController<E: GameEvents> {
    board: Board,
    config: GameConfig,
    turn: Side,
    light_castling: CastlingRights,
    dark_castling: CastlingRights,
    status: GameStatus,
    pending_promotion: Option<PromotionRequest>,
    after_promotion: Option<Box<dyn FnOnce()>>,
    events: E,
}

impl<E: GameEvents> GameController<E> {
    /// A fresh game with the standard layout, light to move.
    pub fn new(config: GameConfig, events: E) -> Self {
        Self::from_position(config, Board::starting(&config), Side::Light, events)
    }

    /// A game starting from an arbitrary position.
    pub fn from_position(config: GameConfig, board: Board, turn: Side, events: E) -> Self {
        Self {
            board,
            config,
            turn,
            light_castling: CastlingRights::new(),
            dark_castling: CastlingRights::new(),
            status: GameStatus::InProgress,
            pending_promotion: None,
            after_promotion: None,
            events,
        }
    }

    /// The piece at `index`, if any. Out-of-range indices answer `None`.
    #[inline]
    pub fn get(&self, index: i32) -> Option<Piece> {
        self.board.get(index)
    }

    /// The current board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Side {
        self.turn
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The promotion currently awaiting a choice, if any.
    #[inline]
    pub fn pending_promotion(&self) -> Option<PromotionRequest> {
        self.pending_promotion
    }

    /// The collaborator, for inspection.
    #[inline]
    pub fn events(&self) -> &E {
        &self.events
    }

    #[inline]
    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    /// Castling rights for `side`, for inspection.
    pub fn castling_rights(&self, side: Side) -> CastlingRights {
        match side {
            Side::Light => self.light_castling,
            Side::Dark => self.dark_castling,
        }
    }

    fn castling_mut(&mut self, side: Side) -> &mut CastlingRights {
        match side {
            Side::Light => &mut self.light_castling,
            Side::Dark => &mut self.dark_castling,
        }
    }

    /// Register a one-shot continuation run after the next confirmed
    /// promotion.
    pub fn register_promotion_continuation(&mut self, continuation: impl FnOnce() + 'static) {
        self.after_promotion = Some(Box::new(continuation));
    }

    /// Process a move request from `from` to `to`.
    ///
    /// Returns `false` for structurally invalid requests (finished game,
    /// out-of-range index, empty source, friendly destination): nothing
    /// happened and nothing was said. Returns `true` when the request was
    /// processed (applied, or rejected with a notice), in which case the
    /// board changed only if the move was legal.
    pub fn swap_to(&mut self, from: i32, to: i32) -> bool {
        if matches!(self.status, GameStatus::GameOver { .. }) {
            return false;
        }

        let range = 0..NUM_SQUARES as i32;
        if !range.contains(&from) || !range.contains(&to) {
            return false;
        }

        let Some(from_piece) = self.board.get(from) else {
            return false;
        };

        if from_piece.side() != self.turn {
            self.events.notify("It's not your turn!");
            return true;
        }

        let to_piece = self.board.get(to);

        if to_piece.is_some_and(|piece| piece.side() == self.turn) {
            return false;
        }

        let mover = self.turn;
        let is_rook = from_piece.is_rook();
        let is_king = from_piece.is_king();

        match from_piece.kind() {
            PieceKind::Pawn => {
                if !rules::pawn_move_allowed(&self.board, from, to, mover) {
                    self.events
                        .notify("The Pawn can only move one square forward.");
                    return true;
                }
            }
            PieceKind::Knight => {
                if !rules::knight_move_allowed(&self.board, from, to, mover) {
                    self.events.notify("The Knight can only move in an L shape.");
                    return true;
                }
            }
            PieceKind::Bishop => {
                if !rules::bishop_move_allowed(&self.board, from, to, mover) {
                    self.events.notify("The Bishop can only move diagonally.");
                    return true;
                }
            }
            PieceKind::Rook => {
                if !rules::rook_move_allowed(&self.board, from, to, mover) {
                    self.events
                        .notify("The Rook can only move horizontally or vertically.");
                    return true;
                }
            }
            PieceKind::Queen => {
                if !rules::queen_move_allowed(&self.board, from, to, mover) {
                    self.events
                        .notify("The Queen can move horizontally, vertically, or diagonally.");
                    return true;
                }
            }
            PieceKind::King => {
                if self.try_castle(from, to, from_piece, to_piece) {
                    self.turn = !self.turn;
                    return true;
                }
                if !rules::king_move_allowed(&self.board, from, to, 2, mover) {
                    self.events
                        .notify("The King can only move one square in any direction.");
                    return true;
                }
            }
        }

        self.move_piece(from, to, from_piece);

        if check::is_in_check(&self.board, mover) {
            self.reverse_move(from, to, from_piece, to_piece);
            self.events.notify(
                "Illegal move: You must get out of check and can't put your King in danger.",
            );
            return true;
        }

        if is_rook {
            // Rook flags key on the four home squares.
            match from {
                0 => self.light_castling.mark_first_rook_moved(),
                7 => self.light_castling.mark_second_rook_moved(),
                56 => self.dark_castling.mark_first_rook_moved(),
                63 => self.dark_castling.mark_second_rook_moved(),
                _ => {}
            }
        } else if is_king {
            self.castling_mut(mover).mark_king_moved();
        } else if from_piece.is_pawn() && on_promotion_rank(mover, to) {
            self.begin_promotion(to, mover);
        }

        match to_piece {
            Some(captured) if captured.is_king() => self.finish_game(mover),
            Some(captured) => {
                log::debug!("{mover} captures at {to}");
                self.events.notify(&format!(
                    "{} attacks and captures {}",
                    from_piece.glyph(),
                    captured.glyph()
                ));
            }
            None => {}
        }

        log::debug!("{mover} moved {} -> {}", from, to);
        self.turn = !self.turn;
        true
    }

    /// Castling sub-protocol.
    ///
    /// Entered for any king move request; does nothing unless the king sits
    /// on its home square and aims at a castle target. On a failed post-move
    /// check the attempt is rolled back and reported, and the caller falls
    /// through to the generic king rule.
    fn try_castle(&mut self, from: i32, to: i32, king: Piece, to_piece: Option<Piece>) -> bool {
        let side = self.turn;

        let home_attempt = match side {
            Side::Light => from == 4 && (to == 2 || to == 6),
            Side::Dark => from == 60 && (to == 58 || to == 62),
        };
        if !home_attempt {
            return false;
        }

        let (rook_from, rook_to) = match to {
            2 if self.queen_side_available(side) => (0, 3),
            6 if self.king_side_available(side) => (7, 5),
            58 if self.queen_side_available(side) => (56, 59),
            62 if self.king_side_available(side) => (63, 61),
            _ => return false,
        };

        let Some(rook) = self.board.get(rook_from) else {
            return false;
        };
        if !rook.is_rook() {
            return false;
        }

        if check::is_in_check(&self.board, side) {
            return false;
        }

        self.move_piece(from, to, king);
        self.move_piece(rook_from, rook_to, rook);

        if check::is_in_check(&self.board, side) {
            self.reverse_move(rook_from, rook_to, rook, None);
            self.reverse_move(from, to, king, to_piece);
            self.events.notify("Illegal move: Your King would be in check.");
            return false;
        }

        self.castling_mut(side).mark_castled();
        log::info!("{side} castled, king {from} -> {to}");
        self.events.notify("The King has castled.");
        true
    }

    /// King-side rights intact and the king's reach to its target clear.
    fn king_side_available(&self, side: Side) -> bool {
        let (rights, home, target) = match side {
            Side::Light => (self.light_castling, 4, 6),
            Side::Dark => (self.dark_castling, 60, 62),
        };
        rights.king_side_possible() && rules::king_move_allowed(&self.board, home, target, 3, side)
    }

    /// Queen-side rights intact and the king's reach to its target clear.
    fn queen_side_available(&self, side: Side) -> bool {
        let (rights, home, target) = match side {
            Side::Light => (self.light_castling, 4, 2),
            Side::Dark => (self.dark_castling, 60, 58),
        };
        rights.queen_side_possible() && rules::king_move_allowed(&self.board, home, target, 3, side)
    }

    fn begin_promotion(&mut self, square: i32, side: Side) {
        let fill = self.config.fill_of(side);
        let candidates = PieceKind::PROMOTION_CANDIDATES.map(|kind| Glyph::new(kind, fill));

        self.pending_promotion = Some(PromotionRequest { square, side });
        log::debug!("{side} pawn at {square} awaits promotion");
        self.events.request_promotion_choice(candidates);
    }

    /// Confirm a pending promotion with the chosen kind.
    ///
    /// Replaces the pawn's slot with a fresh piece of the chosen kind in the
    /// side's configured fill variant, runs the registered continuation, and
    /// returns the new glyph.
    pub fn resolve_promotion(
        &mut self,
        request: PromotionRequest,
        kind: PieceKind,
    ) -> Result<Glyph, PromotionError> {
        let pending = self.pending_promotion.ok_or(PromotionError::NonePending)?;
        if pending != request {
            return Err(PromotionError::RequestMismatch);
        }
        if !PieceKind::PROMOTION_CANDIDATES.contains(&kind) {
            return Err(PromotionError::KindNotOffered);
        }

        self.pending_promotion = None;

        let glyph = Glyph::new(kind, self.config.fill_of(request.side));
        self.board
            .place(request.square, Some(Piece::new(glyph, request.side)));

        if let Some(continuation) = self.after_promotion.take() {
            continuation();
        }

        log::info!("{} pawn at {} promoted", request.side, request.square);
        self.events
            .notify(&format!("The pawn was promoted to {glyph}"));
        Ok(glyph)
    }

    /// Abandon a pending promotion.
    ///
    /// The pawn stays on its far rank with its glyph unchanged; the turn has
    /// already passed to the opponent.
    pub fn cancel_promotion(&mut self, request: PromotionRequest) -> Result<(), PromotionError> {
        let pending = self.pending_promotion.ok_or(PromotionError::NonePending)?;
        if pending != request {
            return Err(PromotionError::RequestMismatch);
        }
        self.pending_promotion = None;
        Ok(())
    }

    fn finish_game(&mut self, winner: Side) {
        self.status = GameStatus::GameOver { winner };
        log::info!("game over, {winner} wins");
        self.events.announce_game_over(winner);
    }

    fn move_piece(&mut self, from: i32, to: i32, piece: Piece) {
        self.board.place(to, Some(piece));
        self.board.place(from, None);
    }

    fn reverse_move(&mut self, from: i32, to: i32, from_piece: Piece, to_piece: Option<Piece>) {
        self.board.place(from, Some(from_piece));
        self.board.place(to, to_piece);
    }
}

/// Whether `index` is on the farthest rank for `side`.
const fn on_promotion_rank(side: Side, index: i32) -> bool {
    matches!(
        (side, index),
        (Side::Light, 56..=63) | (Side::Dark, 0..=7)
    )
}

impl<E: GameEvents> fmt::Debug for GameController<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameController")
            .field("turn", &self.turn)
            .field("status", &self.status)
            .field("pending_promotion", &self.pending_promotion)
            .finish_non_exhaustive()
    }
}
