//! Minigame state and core simulation types
//!
//! Plain data a host can inspect or serialize. The sequence RNG lives on
//! `MiniGame`, so a state only records the seed it started from.

use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Arrow direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed input priority order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }

    /// Accepts direction names and browser arrow key names
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "arrowup" => Some(Direction::Up),
            "down" | "arrowdown" => Some(Direction::Down),
            "left" | "arrowleft" => Some(Direction::Left),
            "right" | "arrowright" => Some(Direction::Right),
            _ => None,
        }
    }
}

impl Distribution<Direction> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        Direction::ALL[rng.random_range(0..Direction::ALL.len())]
    }
}

/// Current phase of the round state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Session not started yet
    Idle,
    /// Entering the arrow sequence
    Inputting,
    /// Sequence entered, waiting for confirm inside the green window
    AwaitingConfirm,
    /// Penalty lockout, input ignored
    Staggered,
    /// Round cleared, next round scheduled
    RoundWon,
    /// Round failed, next round scheduled
    RoundLost,
    /// All rounds played
    GameOver,
}

impl RoundPhase {
    /// Round resolved, waiting for the next one
    pub fn is_resolved(&self) -> bool {
        matches!(self, RoundPhase::RoundWon | RoundPhase::RoundLost)
    }
}

/// Why the player got staggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaggerReason {
    /// Confirm pressed before the sequence was finished
    TooEarly,
    /// Arrow did not match the sequence
    WrongArrow,
    /// Confirm pressed outside the green window
    BadTiming,
    /// Arrow pressed after the sequence was finished
    FinishWithConfirm,
}

impl StaggerReason {
    pub fn message(&self) -> &'static str {
        match self {
            StaggerReason::TooEarly => "Too early! Finish the arrows first.",
            StaggerReason::WrongArrow => "Wrong arrow!",
            StaggerReason::BadTiming => "Bad timing!",
            StaggerReason::FinishWithConfirm => "Finish with CONFIRM!",
        }
    }
}

/// The current round's target
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round number
    pub index: u32,
    pub sequence: Vec<Direction>,
}

impl Round {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Player progress through the current round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundProgress {
    /// Next expected sequence position
    pub current_index: usize,
    /// Seconds into the round (clamped to round time)
    pub elapsed: f32,
}

/// Stagger penalty timer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaggerState {
    pub active: bool,
    /// Seconds of lockout left
    pub remaining: f32,
}

impl StaggerState {
    pub fn clear(&mut self) {
        self.active = false;
        self.remaining = 0.0;
    }
}

/// Session score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u64,
    pub streak_multiplier: f32,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0,
            streak_multiplier: 1.0,
        }
    }
}

/// Session progression
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Rounds started so far
    pub current_round: u32,
    /// Rounds cleared (drives the length ramp)
    pub success_count: u32,
    pub game_over: bool,
}

/// A scheduled "begin next round" on the session clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingRound {
    /// Session clock time at which the next round begins
    pub deadline: f32,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// Minigame session state
///
/// Serializable for inspection and logging. It holds the session seed, not the
/// RNG position, so restoring it mid-session would not replay the same rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiniGameState {
    /// Session seed for reproducibility
    pub rng_state: RngState,
    pub phase: RoundPhase,
    pub round: Round,
    pub progress: RoundProgress,
    pub stagger: StaggerState,
    pub score: ScoreState,
    pub session: SessionState,
    pub pending: Option<PendingRound>,
    /// Seconds since the session started
    pub clock: f32,
}

impl MiniGameState {
    pub fn new(seed: u64) -> Self {
        Self {
            rng_state: RngState::new(seed),
            phase: RoundPhase::Idle,
            round: Round::default(),
            progress: RoundProgress::default(),
            stagger: StaggerState::default(),
            score: ScoreState::default(),
            session: SessionState::default(),
            pending: None,
            clock: 0.0,
        }
    }

    /// Whether the whole expected sequence has been entered
    pub fn sequence_consumed(&self) -> bool {
        self.progress.current_index >= self.round.len()
    }

    /// Add score (saturating)
    pub fn add_score(&mut self, amount: u64) {
        self.score.score = self.score.score.saturating_add(amount);
    }
}
