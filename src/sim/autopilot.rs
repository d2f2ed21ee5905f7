//! Idle/demo mode - the game plays itself
//!
//! Presses the expected arrow each tick and confirms once the round timer
//! reaches the middle of the green window.

use super::state::RoundPhase;
use super::tick::{MiniGame, TickInput};

/// Edges a competent player would press on the next tick
pub fn autopilot_input(game: &MiniGame) -> TickInput {
    let state = game.state();
    match state.phase {
        RoundPhase::Inputting => state
            .round
            .sequence
            .get(state.progress.current_index)
            .map(|d| TickInput::direction(*d))
            .unwrap_or_default(),
        RoundPhase::AwaitingConfirm => {
            let config = game.config();
            let target = (config.green_start + config.green_end) * 0.5;
            if game.progress01() >= target {
                TickInput::confirm()
            } else {
                TickInput::default()
            }
        }
        _ => TickInput::default(),
    }
}
