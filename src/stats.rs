//! Player energy meter
//!
//! Drains continuously; coffee tops it back up.

use crate::error::Result;
use crate::settings::EnergyConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStats {
    config: EnergyConfig,
    energy: f32,
    asleep: bool,
}

impl PlayerStats {
    /// Start with a full meter
    pub fn new(config: EnergyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            energy: config.max_energy,
            config,
            asleep: false,
        })
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn max_energy(&self) -> f32 {
        self.config.max_energy
    }

    /// Meter fill (0-1)
    pub fn fraction(&self) -> f32 {
        if self.config.max_energy > 0.0 {
            self.energy / self.config.max_energy
        } else {
            0.0
        }
    }

    pub fn is_asleep(&self) -> bool {
        self.asleep
    }

    /// Drain for `dt` seconds. Returns true on the tick the player falls asleep.
    pub fn tick(&mut self, dt: f32) -> bool {
        let drained = self.energy - dt * self.config.drain_rate;
        self.energy = drained.clamp(0.0, self.config.max_energy);
        if self.energy <= 0.0 && !self.asleep {
            self.asleep = true;
            log::info!("Player fell asleep (energy depleted)");
            return true;
        }
        false
    }

    pub fn add_energy(&mut self, amount: f32) {
        self.energy = (self.energy + amount).clamp(0.0, self.config.max_energy);
        if self.energy > 0.0 {
            self.asleep = false;
        }
    }
}
