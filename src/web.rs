//! Browser host adapter
//!
//! JS owns the frame loop and the widgets; it forwards key names and frame
//! deltas here and pulls recorded notifications back as JSON.

use wasm_bindgen::prelude::*;

use crate::brew::{BrewStep, CoffeeMaker, StepOutcome};
use crate::error::ConfigError;
use crate::sanitize_frame_dt;
use crate::settings::Settings;
use crate::sim::{Direction, GameEvent, MiniGame};
use crate::stats::PlayerStats;

/// Largest frame delta accepted (tab switches produce huge gaps)
const MAX_FRAME_DT: f32 = 0.1;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    // Already initialized on hot reload
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Brew Rush starting...");
}

fn to_js(err: ConfigError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WebGame {
    game: MiniGame,
    coffee: CoffeeMaker,
    stats: PlayerStats,
    events: Vec<GameEvent>,
}

#[wasm_bindgen]
impl WebGame {
    /// Build from a settings JSON string (empty for defaults) and start round 1
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: &str) -> Result<WebGame, JsValue> {
        let settings = if settings_json.trim().is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json).map_err(to_js)?
        };

        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);

        let mut web = WebGame {
            game: MiniGame::new(settings.effective_minigame(), seed).map_err(to_js)?,
            coffee: CoffeeMaker::new(settings.brew).map_err(to_js)?,
            stats: PlayerStats::new(settings.energy).map_err(to_js)?,
            events: Vec::new(),
        };
        web.game.start(&mut web.events);
        Ok(web)
    }

    /// Forward a `KeyboardEvent.key`. Returns false for keys the game ignores.
    pub fn key_down(&mut self, key: &str) -> bool {
        if let Some(direction) = Direction::from_name(key) {
            self.game.on_direction_pressed(direction);
            true
        } else if key == " " || key.eq_ignore_ascii_case("enter") {
            self.game.on_confirm_pressed();
            true
        } else {
            false
        }
    }

    /// Press a coffee maker button (0 = water .. 3 = machine). Returns true if
    /// the step started brewing.
    pub fn press_brew_step(&mut self, step: usize) -> bool {
        match BrewStep::from_index(step) {
            Some(step) => matches!(self.coffee.press_step(step), StepOutcome::Started(_)),
            None => false,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        let dt = sanitize_frame_dt(dt, MAX_FRAME_DT);
        self.game.tick(dt, &mut self.events);
        self.coffee.tick(dt, &mut self.stats);
        if self.stats.tick(dt) {
            self.game.end_session(&mut self.events);
        }
    }

    pub fn score(&self) -> f64 {
        self.game.score() as f64
    }

    pub fn energy(&self) -> f32 {
        self.stats.fraction()
    }

    pub fn brew_progress(&self) -> Option<f32> {
        self.coffee.progress()
    }

    pub fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    /// Notifications since the last call, as a JSON array
    pub fn drain_events(&mut self) -> String {
        let json = serde_json::to_string(&self.events).unwrap_or_else(|e| {
            log::warn!("Failed to serialize events: {}", e);
            "[]".to_string()
        });
        self.events.clear();
        json
    }
}
