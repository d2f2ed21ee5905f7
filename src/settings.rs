//! Game settings and balance
//!
//! Everything tunable is plain data so hosts can ship it as JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, Result, check_duration};

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Round time multiplier
    pub fn round_time_scale(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.25,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 0.8,
        }
    }

    /// Amount added on each side of the green window (negative narrows it)
    pub fn green_padding(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.04,
            Difficulty::Normal => 0.0,
            Difficulty::Hard => -0.03,
        }
    }

    /// Stagger penalty multiplier
    pub fn stagger_scale(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.2,
        }
    }

    /// Apply this preset on top of a base configuration
    pub fn apply_to(&self, config: &mut MiniGameConfig) {
        config.round_time *= self.round_time_scale();
        config.stagger_duration *= self.stagger_scale();

        let pad = self.green_padding();
        let start = (config.green_start - pad).clamp(0.0, 1.0);
        let end = (config.green_end + pad).clamp(0.0, 1.0);
        // Never let narrowing invert the window
        if start <= end {
            config.green_start = start;
            config.green_end = end;
        } else {
            let mid = (config.green_start + config.green_end) * 0.5;
            config.green_start = mid;
            config.green_end = mid;
        }
    }
}

/// Minigame balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiniGameConfig {
    /// Rounds per session
    pub total_rounds: u32,
    /// Sequence length of the first round
    pub starting_length: usize,
    /// Sequence length cap
    pub max_length: usize,
    /// Seconds per round
    pub round_time: f32,
    /// Green window start (normalized progress)
    pub green_start: f32,
    /// Green window end (normalized progress)
    pub green_end: f32,
    /// Stagger lockout (seconds)
    pub stagger_duration: f32,
    /// Score per correct arrow
    pub points_per_arrow: u32,
    /// Base score for a cleared round
    pub sequence_bonus: u32,
    /// Streak multiplier growth per cleared round
    pub streak_step: f32,
}

impl Default for MiniGameConfig {
    fn default() -> Self {
        Self {
            total_rounds: TOTAL_ROUNDS,
            starting_length: STARTING_LENGTH,
            max_length: MAX_LENGTH,
            round_time: ROUND_TIME,
            green_start: GREEN_START,
            green_end: GREEN_END,
            stagger_duration: STAGGER_DURATION,
            points_per_arrow: POINTS_PER_ARROW,
            sequence_bonus: SEQUENCE_BONUS,
            streak_step: STREAK_STEP,
        }
    }
}

impl MiniGameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.total_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if self.starting_length == 0 {
            return Err(ConfigError::EmptySequence);
        }
        if self.starting_length > self.max_length {
            return Err(ConfigError::LengthOutOfRange {
                starting: self.starting_length,
                max: self.max_length,
            });
        }
        if !(self.round_time.is_finite() && self.round_time > 0.0) {
            return Err(ConfigError::NonPositiveRoundTime(self.round_time));
        }
        // Written so NaN bounds fail too
        let window_ok = 0.0 <= self.green_start
            && self.green_start <= self.green_end
            && self.green_end <= 1.0;
        if !window_ok {
            return Err(ConfigError::InvalidGreenWindow {
                start: self.green_start,
                end: self.green_end,
            });
        }
        // Stagger counts down from a positive duration
        if !(self.stagger_duration.is_finite() && self.stagger_duration > 0.0) {
            return Err(ConfigError::NonPositiveStagger(self.stagger_duration));
        }
        check_duration("streak_step", self.streak_step)?;
        Ok(())
    }

    /// Sequence length after `success_count` cleared rounds
    pub fn sequence_length(&self, success_count: u32) -> usize {
        self.starting_length
            .saturating_add(success_count as usize)
            .min(self.max_length)
    }

    /// Whether normalized progress lies inside the green window (inclusive)
    pub fn in_green_window(&self, progress: f32) -> bool {
        progress >= self.green_start && progress <= self.green_end
    }
}

/// Coffee maker balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrewConfig {
    /// Seconds per recipe step: water, coffee, sugar, machine
    pub step_durations: [f32; 4],
    /// Energy restored by a finished coffee
    pub energy_gain: f32,
}

impl Default for BrewConfig {
    fn default() -> Self {
        Self {
            step_durations: BREW_STEP_DURATIONS,
            energy_gain: COFFEE_ENERGY_GAIN,
        }
    }
}

impl BrewConfig {
    pub fn validate(&self) -> Result<()> {
        for duration in self.step_durations {
            check_duration("step_durations", duration)?;
        }
        check_duration("energy_gain", self.energy_gain)
    }
}

/// Energy meter balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    pub max_energy: f32,
    /// Energy lost per second
    pub drain_rate: f32,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            max_energy: MAX_ENERGY,
            drain_rate: ENERGY_DRAIN_RATE,
        }
    }
}

impl EnergyConfig {
    pub fn validate(&self) -> Result<()> {
        check_duration("max_energy", self.max_energy)?;
        check_duration("drain_rate", self.drain_rate)
    }
}

/// All game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty preset applied on top of `minigame`
    pub difficulty: Difficulty,
    pub minigame: MiniGameConfig,
    pub brew: BrewConfig,
    pub energy: EnergyConfig,
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_preset(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Minigame configuration with the difficulty preset applied
    pub fn effective_minigame(&self) -> MiniGameConfig {
        let mut config = self.minigame.clone();
        self.difficulty.apply_to(&mut config);
        config
    }

    pub fn validate(&self) -> Result<()> {
        self.minigame.validate()?;
        self.effective_minigame().validate()?;
        self.brew.validate()?;
        self.energy.validate()
    }

    /// Parse and validate settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded settings (difficulty: {})", settings.difficulty.as_str());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
