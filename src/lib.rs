//! Brew Rush - arrow sequence timing minigame
//!
//! Core modules:
//! - `sim`: Frame-driven minigame round state machine (sequence, timer, stagger, scoring)
//! - `brew`: Step-gated coffee maker
//! - `stats`: Draining player energy meter
//! - `settings`: Data-driven game balance and difficulty presets
//! - `web`: wasm-bindgen host adapter (wasm32 only)

pub mod brew;
pub mod error;
pub mod settings;
pub mod sim;
pub mod stats;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use brew::{BrewEvent, BrewStep, CoffeeMaker, StepOutcome};
pub use error::{ConfigError, Result};
pub use settings::{BrewConfig, Difficulty, EnergyConfig, MiniGameConfig, Settings};
pub use stats::PlayerStats;

/// Game configuration constants
pub mod consts {
    /// Rounds per session
    pub const TOTAL_ROUNDS: u32 = 12;
    /// Sequence length of the first round
    pub const STARTING_LENGTH: usize = 5;
    /// Sequence length cap (reached after enough wins)
    pub const MAX_LENGTH: usize = 8;

    /// Seconds per round
    pub const ROUND_TIME: f32 = 6.0;
    /// Green window bounds (normalized round progress)
    pub const GREEN_START: f32 = 0.75;
    pub const GREEN_END: f32 = 0.88;
    /// Width of the color ramp leading into the green window
    pub const TIMER_BLEND_RAMP: f32 = 0.05;

    /// Penalty lockout after a mistake (seconds)
    pub const STAGGER_DURATION: f32 = 1.25;

    /// Score per correct arrow
    pub const POINTS_PER_ARROW: u32 = 25;
    /// Base score for a cleared round (scaled by streak)
    pub const SEQUENCE_BONUS: u32 = 200;
    /// Streak multiplier growth per cleared round
    pub const STREAK_STEP: f32 = 0.25;
    /// Share of the sequence bonus paid out on timeout, scaled by progress
    pub const CONSOLATION_FACTOR: f32 = 0.25;

    /// "Round cleared" pause before the next round (seconds)
    pub const WIN_ADVANCE_DELAY: f32 = 0.8;
    /// "Round failed" pause before the next round (seconds)
    pub const LOSS_ADVANCE_DELAY: f32 = 1.0;

    /// Coffee recipe step durations: water, coffee, sugar, machine (seconds)
    pub const BREW_STEP_DURATIONS: [f32; 4] = [8.0, 3.0, 0.5, 5.0];
    /// Energy restored by a finished coffee
    pub const COFFEE_ENERGY_GAIN: f32 = 50.0;

    /// Energy meter capacity
    pub const MAX_ENERGY: f32 = 100.0;
    /// Energy lost per second
    pub const ENERGY_DRAIN_RATE: f32 = 2.0;
}

/// Clamp to [0, 1]
#[inline]
pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Position of `value` between `a` and `b`, clamped to [0, 1]
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    clamp01((value - a) / (b - a))
}

/// Round to the nearest integer score, ties to even, never below zero
#[inline]
pub fn round_score(value: f32) -> u64 {
    value.round_ties_even().max(0.0) as u64
}

/// Host frame delta made safe for `tick`: NaN/inf become 0, gaps capped at `max`
#[inline]
pub fn sanitize_frame_dt(dt: f32, max: f32) -> f32 {
    if dt.is_finite() { dt.clamp(0.0, max) } else { 0.0 }
}
