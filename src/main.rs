//! Brew Rush entry point
//!
//! Native build: plays a headless session on autopilot and logs it.
//! The browser build is driven from JS through `brew_rush::web`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use brew_rush::sim::{Direction, MiniGame, PresentationSink, autopilot_input};
    use brew_rush::{BrewEvent, CoffeeMaker, Difficulty, PlayerStats, Settings};
    use clap::Parser;

    /// Fixed frame step (60 Hz)
    const FRAME_DT: f32 = 1.0 / 60.0;

    const DEFAULT_SEED: u64 = 0x5EED;

    /// Play one Brew Rush session on autopilot and print the final score.
    #[derive(Debug, Parser)]
    #[command(author, version, about, long_about = None)]
    pub struct CliArgs {
        /// Session seed (same seed, same rounds)
        #[arg(value_name = "SEED")]
        pub seed: Option<u64>,
        /// Difficulty preset: easy, normal or hard
        #[arg(
            short,
            long,
            value_name = "PRESET",
            default_value = "normal",
            value_parser = parse_difficulty
        )]
        pub difficulty: Difficulty,
    }

    fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
        Difficulty::from_name(s)
            .ok_or_else(|| format!("unknown difficulty '{s}' (expected easy, normal or hard)"))
    }

    /// Writes notifications to the log instead of widgets
    struct LogSink;

    impl PresentationSink for LogSink {
        fn on_round_started(&mut self, round: u32, total_rounds: u32, sequence: &[Direction]) {
            let arrows: Vec<&str> = sequence.iter().map(|d| d.as_str()).collect();
            log::info!(
                "Round {}/{}  |  Len {}: {}",
                round,
                total_rounds,
                sequence.len(),
                arrows.join(" ")
            );
        }

        fn on_symbol_result(&mut self, index: usize, passed: bool) {
            log::debug!("Slot {}: {}", index, if passed { "ok" } else { "miss" });
        }

        fn on_status_message(&mut self, text: &str) {
            log::info!("{}", text);
        }

        fn on_score_changed(&mut self, score: u64, streak_multiplier: f32) {
            log::debug!("Score: {}   x{:.2}", score, streak_multiplier);
        }
    }

    pub fn run(settings: &Settings, seed: u64) -> brew_rush::Result<()> {
        let mut game = MiniGame::new(settings.effective_minigame(), seed)?;
        let mut coffee = CoffeeMaker::new(settings.brew.clone())?;
        let mut stats = PlayerStats::new(settings.energy.clone())?;
        let mut sink = LogSink;

        game.start(&mut sink);
        while !game.is_game_over() {
            let input = autopilot_input(&game);
            game.tick_with_input(&input, FRAME_DT, &mut sink);

            // Keep a coffee brewing in the background
            if !coffee.is_brewing() {
                coffee.press_step(coffee.next_step());
            }
            if let Some(BrewEvent::CoffeeDone { energy_gain }) = coffee.tick(FRAME_DT, &mut stats)
            {
                log::info!(
                    "Coffee break: +{} energy ({:.0}%)",
                    energy_gain,
                    stats.fraction() * 100.0
                );
            }
            if stats.tick(FRAME_DT) {
                game.end_session(&mut sink);
            }
        }

        println!(
            "Final score: {} ({} of {} rounds cleared, energy {:.0}%)",
            game.score(),
            game.state().session.success_count,
            game.config().total_rounds,
            stats.fraction() * 100.0
        );
        Ok(())
    }

    pub fn main() {
        env_logger::init();

        let args = CliArgs::parse();
        let seed = args.seed.unwrap_or(DEFAULT_SEED);
        log::info!(
            "Brew Rush (native) seed {} difficulty {}",
            seed,
            args.difficulty.as_str()
        );

        if let Err(e) = run(&Settings::from_preset(args.difficulty), seed) {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::main();
}


#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is brew_rush::web::wasm_main
}
