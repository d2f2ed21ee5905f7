//! Minigame simulation module
//!
//! All gameplay logic lives here. This module is pure and deterministic:
//! - Time only advances through `tick(dt)`
//! - Seeded RNG only
//! - No rendering or platform dependencies (see `PresentationSink`)

pub mod autopilot;
pub mod events;
pub mod sequence;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use events::{GameEvent, PresentationSink};
pub use sequence::generate_sequence;
pub use state::{
    Direction, MiniGameState, PendingRound, Round, RoundPhase, RoundProgress, ScoreState,
    SessionState, StaggerReason, StaggerState,
};
pub use tick::{InputEdge, MiniGame, TickInput};
