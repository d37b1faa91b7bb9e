//! A turn-based chess rule engine.
//!
//! The engine owns the board, decides whether a proposed move is legal
//! (movement rules, check avoidance, castling), applies or rejects it,
//! detects check, and manages pawn promotion. Board rendering, gesture
//! handling and theming are left to an external collaborator that calls
//! [`game::GameController::swap_to`] and listens through [`GameEvents`].
//!
//! Deliberate limits: no en passant, no draw detection, no automatic
//! checkmate or stalemate: a game ends only when a king is captured.

pub mod board;
pub mod castling;
pub mod check;
pub mod config;
pub mod game;
pub mod pieces;
pub mod rules;

pub mod mock;
pub mod visualization;

pub use board::{Board, Square};
pub use config::{GameConfig, Rgb};
pub use game::{GameController, GameStatus, PromotionError, PromotionRequest};
pub use pieces::{FillVariant, Glyph, Piece, PieceKind, Side, transform};

/// Trait for the engine's UI collaborator.
///
/// The engine is synchronous and single-threaded; all three callbacks fire
/// from inside an engine call and must not block. The promotion request in
/// particular is only an announcement; the collaborator answers later
/// through [`game::GameController::resolve_promotion`].
pub trait GameEvents {
    /// Fire-and-forget user notice (rejections, captures, castling).
    fn notify(&mut self, message: &str);

    /// A pawn reached its far rank; `candidates` are the four glyphs the
    /// player may choose from, in the mover's fill variant.
    fn request_promotion_choice(&mut self, candidates: [Glyph; 4]);

    /// A king was captured. The game is over; the engine stays terminal
    /// until a fresh one is constructed.
    fn announce_game_over(&mut self, winner: Side);
}
