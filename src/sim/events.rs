//! Presentation notifications
//!
//! The simulation never touches widgets. It reports what happened through a
//! [`PresentationSink`] and the host renders it however it likes.

use serde::{Deserialize, Serialize};

use super::state::Direction;

/// Receiver for minigame notifications. Every method defaults to a no-op.
pub trait PresentationSink {
    /// A new round began
    fn on_round_started(&mut self, _round: u32, _total_rounds: u32, _sequence: &[Direction]) {}

    /// Timer fill (0-1) and how far the fill color has blended toward the
    /// green-window color (0 = base, 1 = in window)
    fn on_timer_progress(&mut self, _progress: f32, _blend: f32) {}

    /// A sequence slot was entered correctly or incorrectly
    fn on_symbol_result(&mut self, _index: usize, _passed: bool) {}

    fn on_status_message(&mut self, _text: &str) {}

    fn on_score_changed(&mut self, _score: u64, _streak_multiplier: f32) {}

    fn on_game_over(&mut self, _final_score: u64) {}
}

/// Silent sink
impl PresentationSink for () {}

/// One recorded notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    RoundStarted {
        round: u32,
        total_rounds: u32,
        sequence: Vec<Direction>,
    },
    TimerProgress {
        progress: f32,
        blend: f32,
    },
    SymbolResult {
        index: usize,
        passed: bool,
    },
    StatusMessage {
        text: String,
    },
    ScoreChanged {
        score: u64,
        streak_multiplier: f32,
    },
    GameOver {
        final_score: u64,
    },
}

/// Recording sink, used by tests and the web adapter
impl PresentationSink for Vec<GameEvent> {
    fn on_round_started(&mut self, round: u32, total_rounds: u32, sequence: &[Direction]) {
        self.push(GameEvent::RoundStarted {
            round,
            total_rounds,
            sequence: sequence.to_vec(),
        });
    }

    fn on_timer_progress(&mut self, progress: f32, blend: f32) {
        self.push(GameEvent::TimerProgress { progress, blend });
    }

    fn on_symbol_result(&mut self, index: usize, passed: bool) {
        self.push(GameEvent::SymbolResult { index, passed });
    }

    fn on_status_message(&mut self, text: &str) {
        self.push(GameEvent::StatusMessage {
            text: text.to_string(),
        });
    }

    fn on_score_changed(&mut self, score: u64, streak_multiplier: f32) {
        self.push(GameEvent::ScoreChanged {
            score,
            streak_multiplier,
        });
    }

    fn on_game_over(&mut self, final_score: u64) {
        self.push(GameEvent::GameOver { final_score });
    }
}
