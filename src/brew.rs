//! Coffee maker
//!
//! Four recipe steps that must be started in order. Each step takes a fixed
//! time to brew; starting the wrong step ruins the coffee and starts over.
//! Finishing the last step restores player energy.

use serde::{Deserialize, Serialize};

use crate::clamp01;
use crate::error::Result;
use crate::settings::BrewConfig;
use crate::stats::PlayerStats;

/// Recipe steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrewStep {
    Water,
    Coffee,
    Sugar,
    Machine,
}

impl BrewStep {
    pub const ALL: [BrewStep; 4] = [
        BrewStep::Water,
        BrewStep::Coffee,
        BrewStep::Sugar,
        BrewStep::Machine,
    ];

    pub fn index(&self) -> usize {
        match self {
            BrewStep::Water => 0,
            BrewStep::Coffee => 1,
            BrewStep::Sugar => 2,
            BrewStep::Machine => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BrewStep::Water => "Water",
            BrewStep::Coffee => "Coffee",
            BrewStep::Sugar => "Sugar",
            BrewStep::Machine => "Machine",
        }
    }

    /// Following step, None after the last
    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }
}

/// Result of pressing a step button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step began brewing
    Started(BrewStep),
    /// Another step is still brewing; press ignored
    Busy,
    /// Out of order: the coffee is ruined and the recipe restarts
    WrongOrder { expected: BrewStep, pressed: BrewStep },
}

/// Something finished during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrewEvent {
    StepFinished(BrewStep),
    CoffeeDone { energy_gain: f32 },
}

#[derive(Debug, Clone, PartialEq)]
struct Brewing {
    step: BrewStep,
    elapsed: f32,
    duration: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoffeeMaker {
    config: BrewConfig,
    next_step: BrewStep,
    brewing: Option<Brewing>,
}

impl CoffeeMaker {
    pub fn new(config: BrewConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            next_step: BrewStep::Water,
            brewing: None,
        })
    }

    /// Step the recipe expects next
    pub fn next_step(&self) -> BrewStep {
        self.next_step
    }

    pub fn is_brewing(&self) -> bool {
        self.brewing.is_some()
    }

    /// Progress of the brewing step (0-1), None when the bar is hidden
    pub fn progress(&self) -> Option<f32> {
        self.brewing.as_ref().map(|b| {
            if b.duration > 0.0 {
                clamp01(b.elapsed / b.duration)
            } else {
                1.0
            }
        })
    }

    pub fn press_step(&mut self, step: BrewStep) -> StepOutcome {
        if self.brewing.is_some() {
            return StepOutcome::Busy;
        }

        if step != self.next_step {
            let expected = self.next_step;
            log::warn!(
                "Wrong order: pressed {} while {} was next, coffee ruined",
                step.as_str(),
                expected.as_str()
            );
            self.reset();
            return StepOutcome::WrongOrder {
                expected,
                pressed: step,
            };
        }

        let duration = self.config.step_durations[step.index()];
        log::debug!("Brewing {} ({}s)", step.as_str(), duration);
        self.brewing = Some(Brewing {
            step,
            elapsed: 0.0,
            duration,
        });
        StepOutcome::Started(step)
    }

    /// Advance the brewing step. A finished coffee goes straight into `stats`.
    pub fn tick(&mut self, dt: f32, stats: &mut PlayerStats) -> Option<BrewEvent> {
        let brewing = self.brewing.as_mut()?;
        brewing.elapsed += dt;
        if brewing.elapsed < brewing.duration {
            return None;
        }

        let step = brewing.step;
        self.brewing = None;
        match step.next() {
            Some(next) => {
                self.next_step = next;
                Some(BrewEvent::StepFinished(step))
            }
            None => {
                let energy_gain = self.config.energy_gain;
                log::info!("Coffee done! Energy +{}", energy_gain);
                stats.add_energy(energy_gain);
                self.reset();
                Some(BrewEvent::CoffeeDone { energy_gain })
            }
        }
    }

    fn reset(&mut self) {
        self.next_step = BrewStep::Water;
        self.brewing = None;
    }
}
