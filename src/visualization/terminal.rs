use std::io::{self, Write};

use crate::GameEvents;
use crate::board::Square;
use crate::config::GameConfig;
use crate::game::{GameController, GameStatus, PromotionRequest};
use crate::pieces::{Glyph, PieceKind, Side};

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen() {
    print!("\x1B[2J\x1B[H");
}

/// Collaborator that prints engine notices straight to the terminal.
#[derive(Debug, Default)]
pub struct TerminalEvents;

impl GameEvents for TerminalEvents {
    fn notify(&mut self, message: &str) {
        println!("💬 {message}");
    }

    fn request_promotion_choice(&mut self, candidates: [Glyph; 4]) {
        let symbols: String = candidates.iter().map(|glyph| glyph.symbol()).collect();
        println!("Pawn promotion! Candidates: {symbols}");
    }

    fn announce_game_over(&mut self, winner: Side) {
        println!("🏁 Game over: {winner} wins!");
    }
}

/// Runs an interactive terminal game against the rule engine.
///
/// Moves are entered as two algebraic squares; the engine answers with its
/// notices and the board is redrawn after every command.
pub fn run_interactive_terminal() {
    let mut game = GameController::new(GameConfig::default(), TerminalEvents);

    clear_screen();
    draw_interface(&game);

    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            eprintln!("Failed to flush stdout: {}", e);
            break;
        }

        let mut input = String::new();
        if let Err(e) = io::stdin().read_line(&mut input) {
            eprintln!("Failed to read input: {}", e);
            break;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "m" => {
                if parts.len() < 3 {
                    println!("Usage: m <from> <to>  (e.g., m e2 e4)");
                } else {
                    match (parts[1].parse::<Square>(), parts[2].parse::<Square>()) {
                        (Ok(from), Ok(to)) => {
                            clear_screen();
                            if !game.swap_to(from.index(), to.index()) {
                                println!("That move is not possible.");
                            }
                            if let Some(request) = game.pending_promotion() {
                                prompt_promotion(&mut game, request);
                            }
                            draw_interface(&game);
                        }
                        (Err(e), _) | (_, Err(e)) => println!("Invalid square: {}", e),
                    }
                }
            }
            "p" => {
                clear_screen();
                draw_interface(&game);
            }
            "q" => break,
            _ => println!("Commands: m <from> <to> | p (refresh) | q (quit)"),
        }
    }
}

/// Reads a promotion choice from stdin and resolves the pending request.
fn prompt_promotion(game: &mut GameController<TerminalEvents>, request: PromotionRequest) {
    loop {
        print!("Promote to [q]ueen, [r]ook, [b]ishop, k[n]ight, or [c]ancel: ");
        if io::stdout().flush().is_err() {
            return;
        }

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return;
        }

        let choice = match input.trim() {
            "q" => PieceKind::Queen,
            "r" => PieceKind::Rook,
            "b" => PieceKind::Bishop,
            "n" => PieceKind::Knight,
            "c" => {
                if let Err(e) = game.cancel_promotion(request) {
                    println!("Cannot cancel: {}", e);
                }
                return;
            }
            _ => {
                println!("Unknown choice");
                continue;
            }
        };

        match game.resolve_promotion(request, choice) {
            Ok(_) => return,
            Err(e) => println!("Promotion failed: {}", e),
        }
    }
}

/// Draws the complete interface: help text, board, and whose move it is.
fn draw_interface(game: &GameController<TerminalEvents>) {
    println!("♟️  Glyph Chess");
    println!();
    println!("Commands: m <from> <to> | p (refresh) | q (quit)");
    println!();
    draw_board(game);

    match game.status() {
        GameStatus::InProgress => println!("{} to move", game.turn()),
        GameStatus::GameOver { winner } => println!("Game over: {winner} won"),
    }
}

/// Draws the board with piece glyphs.
fn draw_board(game: &GameController<TerminalEvents>) {
    println!("╔═══╦═════════════════════════╗");

    for rank in (1..=8u8).rev() {
        print!("║ {} ║", rank);
        for file in 0..8 {
            let index = i32::from(rank - 1) * 8 + file;
            match game.get(index) {
                Some(piece) => print!(" {} ", piece.glyph()),
                None => print!(" · "),
            }
        }
        println!(" ║");
    }

    println!("╠═══╬═════════════════════════╣");
    println!("║   ║ a  b  c  d  e  f  g  h  ║");
    println!("╚═══╩═════════════════════════╝");
}
