use crate::GameEvents;
use crate::pieces::{Glyph, Side};

/// Recording collaborator for tests and development.
///
/// Keeps every notice, promotion request and game-over signal the engine
/// emits so assertions can inspect them after the fact.
#[derive(Debug, Clone, Default)]
pub struct RecordingEvents {
    notices: Vec<String>,
    promotion_requests: Vec<[Glyph; 4]>,
    game_over: Option<Side>,
}

impl RecordingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices, oldest first.
    #[inline]
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// The most recent notice, if any.
    pub fn last_notice(&self) -> Option<&str> {
        self.notices.last().map(String::as_str)
    }

    /// Candidate sets from every promotion request seen.
    #[inline]
    pub fn promotion_requests(&self) -> &[[Glyph; 4]] {
        &self.promotion_requests
    }

    /// Winner from the game-over signal, if one was announced.
    #[inline]
    pub fn game_over(&self) -> Option<Side> {
        self.game_over
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.notices.clear();
        self.promotion_requests.clear();
        self.game_over = None;
    }
}

impl GameEvents for RecordingEvents {
    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_owned());
    }

    fn request_promotion_choice(&mut self, candidates: [Glyph; 4]) {
        self.promotion_requests.push(candidates);
    }

    fn announce_game_over(&mut self, winner: Side) {
        self.game_over = Some(winner);
    }
}
