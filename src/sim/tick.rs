//! Frame-driven round state machine
//!
//! `MiniGame::tick` is called once per rendered frame. Each call advances the
//! round timer, counts down any stagger penalty, fires a scheduled round
//! change when its deadline passes, and acts on at most one input edge.

use rand_pcg::Pcg32;

use super::events::PresentationSink;
use super::sequence::generate_sequence;
use super::state::{
    Direction, MiniGameState, PendingRound, Round, RoundPhase, RoundProgress, StaggerReason,
};
use crate::consts::{CONSOLATION_FACTOR, LOSS_ADVANCE_DELAY, TIMER_BLEND_RAMP, WIN_ADVANCE_DELAY};
use crate::error::Result;
use crate::settings::MiniGameConfig;
use crate::{clamp01, inverse_lerp, round_score};

/// Key edges ("became pressed") for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub confirm: bool,
}

/// The one edge a tick acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEdge {
    Direction(Direction),
    Confirm,
}

impl TickInput {
    pub fn direction(direction: Direction) -> Self {
        let mut input = Self::default();
        input.press(direction);
        input
    }

    pub fn confirm() -> Self {
        Self {
            confirm: true,
            ..Default::default()
        }
    }

    pub fn press(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.up = true,
            Direction::Down => self.down = true,
            Direction::Left => self.left = true,
            Direction::Right => self.right = true,
        }
    }

    pub fn is_pressed(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// First edge in priority order: Up, Down, Left, Right, Confirm
    pub fn first_edge(&self) -> Option<InputEdge> {
        Direction::ALL
            .into_iter()
            .find(|d| self.is_pressed(*d))
            .map(InputEdge::Direction)
            .or(self.confirm.then_some(InputEdge::Confirm))
    }
}

/// The minigame: config, session state and the sequence RNG
#[derive(Debug, Clone)]
pub struct MiniGame {
    config: MiniGameConfig,
    state: MiniGameState,
    rng: Pcg32,
    /// Edges latched by `on_*_pressed` since the last tick
    pending_input: TickInput,
}

impl MiniGame {
    pub fn new(config: MiniGameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let state = MiniGameState::new(seed);
        let rng = state.rng_state.to_rng();
        Ok(Self {
            config,
            state,
            rng,
            pending_input: TickInput::default(),
        })
    }

    pub fn config(&self) -> &MiniGameConfig {
        &self.config
    }

    pub fn state(&self) -> &MiniGameState {
        &self.state
    }

    pub fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score.score
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == RoundPhase::GameOver
    }

    /// Normalized round progress (0-1)
    pub fn progress01(&self) -> f32 {
        clamp01(self.state.progress.elapsed / self.config.round_time)
    }

    /// How far the timer color has blended toward the green-window color.
    ///
    /// 1 inside the window, a linear ramp just before it, 0 everywhere else.
    pub fn timer_blend(&self, progress: f32) -> f32 {
        let start = self.config.green_start;
        if self.config.in_green_window(progress) {
            1.0
        } else if progress < start {
            inverse_lerp(start - TIMER_BLEND_RAMP, start, progress)
        } else {
            0.0
        }
    }

    /// Leave Idle and begin the first round
    pub fn start(&mut self, sink: &mut dyn PresentationSink) {
        if self.state.phase == RoundPhase::Idle {
            log::info!(
                "Starting session: {} rounds, seed {}",
                self.config.total_rounds,
                self.state.rng_state.seed
            );
            self.begin_next_round(sink);
        }
    }

    /// Latch a direction edge for the next tick
    pub fn on_direction_pressed(&mut self, direction: Direction) {
        self.pending_input.press(direction);
    }

    /// Latch a confirm edge for the next tick
    pub fn on_confirm_pressed(&mut self) {
        self.pending_input.confirm = true;
    }

    /// Advance one frame using the edges latched since the last tick
    pub fn tick(&mut self, dt: f32, sink: &mut dyn PresentationSink) {
        let input = std::mem::take(&mut self.pending_input);
        self.tick_with_input(&input, dt, sink);
    }

    /// Advance one frame with an explicit edge set
    ///
    /// # Panics
    /// If `dt` is negative or not finite.
    pub fn tick_with_input(
        &mut self,
        input: &TickInput,
        dt: f32,
        sink: &mut dyn PresentationSink,
    ) {
        assert!(
            dt.is_finite() && dt >= 0.0,
            "tick dt must be finite and non-negative (got {dt})"
        );

        match self.state.phase {
            RoundPhase::Idle => return,
            RoundPhase::GameOver => {
                sink.on_game_over(self.state.score.score);
                return;
            }
            _ => {}
        }

        self.state.clock += dt;

        // Scheduled round change
        if let Some(pending) = self.state.pending
            && self.state.clock >= pending.deadline
        {
            self.begin_next_round(sink);
            return;
        }

        // Round timer (frozen once the round is resolved)
        if !self.state.phase.is_resolved() {
            self.state.progress.elapsed =
                (self.state.progress.elapsed + dt).min(self.config.round_time);
        }
        let progress = self.progress01();
        sink.on_timer_progress(progress, self.timer_blend(progress));

        // Timeout beats everything, stagger included
        if progress >= 1.0 && !self.state.phase.is_resolved() {
            self.lose_round(sink);
            return;
        }

        if self.state.stagger.active {
            self.state.stagger.remaining -= dt;
            if self.state.stagger.remaining <= 0.0 {
                self.recover(sink);
            }
        }

        match self.state.phase {
            RoundPhase::Inputting => {
                match input.first_edge() {
                    Some(InputEdge::Direction(direction)) => self.evaluate_input(direction, sink),
                    Some(InputEdge::Confirm) => self.trigger_stagger(StaggerReason::TooEarly, sink),
                    None => {}
                }

                if self.state.phase == RoundPhase::Inputting && self.state.sequence_consumed() {
                    self.state.phase = RoundPhase::AwaitingConfirm;
                    sink.on_status_message("Hit CONFIRM in the green window!");
                }
            }
            RoundPhase::AwaitingConfirm => match input.first_edge() {
                Some(InputEdge::Direction(_)) => {
                    self.trigger_stagger(StaggerReason::FinishWithConfirm, sink)
                }
                Some(InputEdge::Confirm) => {
                    if self.config.in_green_window(progress) {
                        self.win_round(sink);
                    } else {
                        self.trigger_stagger(StaggerReason::BadTiming, sink);
                    }
                }
                None => {}
            },
            // Staggered and resolved rounds drop their edges
            _ => {}
        }
    }

    /// Start the next round, or end the session once every round was played
    pub fn begin_next_round(&mut self, sink: &mut dyn PresentationSink) {
        self.state.pending = None;

        if self.state.session.game_over
            || self.state.session.current_round >= self.config.total_rounds
        {
            self.finish_session(sink);
            return;
        }

        self.state.session.current_round += 1;
        let length = self.config.sequence_length(self.state.session.success_count);
        self.state.round = Round {
            index: self.state.session.current_round,
            sequence: generate_sequence(&mut self.rng, length),
        };
        self.state.progress = RoundProgress::default();
        self.state.stagger.clear();
        self.state.phase = RoundPhase::Inputting;

        log::debug!(
            "Round {}/{}: {} arrows",
            self.state.round.index,
            self.config.total_rounds,
            length
        );

        sink.on_round_started(
            self.state.round.index,
            self.config.total_rounds,
            &self.state.round.sequence,
        );
        sink.on_score_changed(self.state.score.score, self.state.score.streak_multiplier);
        sink.on_status_message("Enter the arrows!");
        sink.on_timer_progress(0.0, self.timer_blend(0.0));
    }

    /// Check one arrow against the next expected slot
    ///
    /// # Panics
    /// If the sequence has already been fully entered.
    pub fn evaluate_input(&mut self, pressed: Direction, sink: &mut dyn PresentationSink) {
        let index = self.state.progress.current_index;
        let len = self.state.round.len();
        assert!(
            index < len,
            "evaluate_input called with the sequence already consumed ({index}/{len})"
        );

        if self.state.round.sequence[index] == pressed {
            sink.on_symbol_result(index, true);
            self.state.progress.current_index += 1;
            self.state.add_score(self.config.points_per_arrow as u64);
            sink.on_status_message(&format!("Good! {}/{}", index + 1, len));
            sink.on_score_changed(self.state.score.score, self.state.score.streak_multiplier);
        } else {
            // Slot stays current; it must be retried after recovery
            sink.on_symbol_result(index, false);
            self.trigger_stagger(StaggerReason::WrongArrow, sink);
        }
    }

    /// Round cleared: raise the streak, then pay the bonus at the raised value
    pub fn win_round(&mut self, sink: &mut dyn PresentationSink) {
        self.state.phase = RoundPhase::RoundWon;
        self.state.session.success_count += 1;
        self.state.score.streak_multiplier += self.config.streak_step;

        let bonus =
            round_score(self.config.sequence_bonus as f32 * self.state.score.streak_multiplier);
        self.state.add_score(bonus);

        log::debug!(
            "Round {} cleared: +{} (x{:.2})",
            self.state.round.index,
            bonus,
            self.state.score.streak_multiplier
        );

        sink.on_status_message(&format!(
            "Round {} Cleared! +{}",
            self.state.round.index, bonus
        ));
        sink.on_score_changed(self.state.score.score, self.state.score.streak_multiplier);
        self.schedule_next_round(WIN_ADVANCE_DELAY);
    }

    /// Round failed: reset the streak and pay partial credit for progress
    pub fn lose_round(&mut self, sink: &mut dyn PresentationSink) {
        self.state.phase = RoundPhase::RoundLost;
        self.state.stagger.clear();
        self.state.score.streak_multiplier = 1.0;

        let index = self.state.progress.current_index;
        let len = self.state.round.len();
        let fraction = if len == 0 {
            0.0
        } else {
            index as f32 / len as f32
        };
        let consolation =
            round_score(self.config.sequence_bonus as f32 * CONSOLATION_FACTOR * fraction);
        if consolation > 0 {
            self.state.add_score(consolation);
        }

        log::debug!(
            "Round {} failed at {}/{} (+{})",
            self.state.round.index,
            index,
            len,
            consolation
        );

        sink.on_status_message(&format!(
            "Failed Round {}. (Progress {}/{})",
            self.state.round.index, index, len
        ));
        sink.on_score_changed(self.state.score.score, self.state.score.streak_multiplier);
        self.schedule_next_round(LOSS_ADVANCE_DELAY);
    }

    /// Lock input for the stagger duration. No-op unless the player is
    /// inputting or awaiting confirm.
    pub fn trigger_stagger(&mut self, reason: StaggerReason, sink: &mut dyn PresentationSink) {
        if self.state.stagger.active
            || !matches!(
                self.state.phase,
                RoundPhase::Inputting | RoundPhase::AwaitingConfirm
            )
        {
            return;
        }

        self.state.stagger.active = true;
        self.state.stagger.remaining = self.config.stagger_duration;
        self.state.phase = RoundPhase::Staggered;

        log::debug!("Staggered: {:?}", reason);
        sink.on_status_message(&format!("Staggered! {}", reason.message()));
    }

    /// Force the session to end now (e.g. the player fell asleep).
    /// Cancels any scheduled round.
    pub fn end_session(&mut self, sink: &mut dyn PresentationSink) {
        if self.state.phase != RoundPhase::GameOver {
            self.finish_session(sink);
        }
    }

    fn recover(&mut self, sink: &mut dyn PresentationSink) {
        self.state.stagger.clear();
        if self.state.sequence_consumed() {
            self.state.phase = RoundPhase::AwaitingConfirm;
            sink.on_status_message("Recovered. Hit CONFIRM in the green window!");
        } else {
            self.state.phase = RoundPhase::Inputting;
            sink.on_status_message("Recovered. Continue the arrows!");
        }
    }

    fn schedule_next_round(&mut self, delay: f32) {
        self.state.pending = Some(PendingRound {
            deadline: self.state.clock + delay,
        });
    }

    fn finish_session(&mut self, sink: &mut dyn PresentationSink) {
        self.state.phase = RoundPhase::GameOver;
        self.state.session.game_over = true;
        self.state.pending = None;
        self.state.stagger.clear();

        let score = self.state.score.score;
        log::info!(
            "Game over after {} rounds ({} cleared): final score {}",
            self.state.session.current_round,
            self.state.session.success_count,
            score
        );
        sink.on_status_message(&format!("Game Over! Final Score: {}", score));
        sink.on_game_over(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameEvent;
    use Direction::*;

    fn config(len: usize) -> MiniGameConfig {
        MiniGameConfig {
            starting_length: len,
            max_length: len.max(8),
            ..Default::default()
        }
    }

    /// Started game whose first round has a known sequence
    fn started(config: MiniGameConfig, sequence: Vec<Direction>) -> (MiniGame, Vec<GameEvent>) {
        let mut game = MiniGame::new(config, 12345).expect("valid config");
        let mut events = Vec::new();
        game.start(&mut events);
        game.state.round.sequence = sequence;
        (game, events)
    }

    fn press(game: &mut MiniGame, direction: Direction, dt: f32, events: &mut Vec<GameEvent>) {
        game.on_direction_pressed(direction);
        game.tick(dt, events);
    }

    #[test]
    fn test_start_begins_first_round() {
        let mut game = MiniGame::new(MiniGameConfig::default(), 1).expect("valid config");
        assert_eq!(game.phase(), RoundPhase::Idle);

        // Idle ignores ticks
        let mut events = Vec::new();
        game.tick(1.0, &mut events);
        assert!(events.is_empty());

        game.start(&mut events);
        assert_eq!(game.phase(), RoundPhase::Inputting);
        assert_eq!(game.state().round.index, 1);
        assert_eq!(game.state().round.len(), 5);
        assert!(matches!(
            events[0],
            GameEvent::RoundStarted { round: 1, total_rounds: 12, .. }
        ));
        assert!(events.contains(&GameEvent::StatusMessage {
            text: "Enter the arrows!".to_string()
        }));
    }

    #[test]
    fn test_scenario_a_single_arrow_reaches_confirm() {
        let (mut game, mut events) = started(config(1), vec![Up]);
        press(&mut game, Up, 0.0, &mut events);
        assert_eq!(game.state().progress.current_index, 1);
        assert_eq!(game.phase(), RoundPhase::AwaitingConfirm);
        assert_eq!(game.score(), 25);
        assert!(events.contains(&GameEvent::SymbolResult { index: 0, passed: true }));
    }

    #[test]
    fn test_scenario_b_confirm_in_window_wins() {
        let (mut game, mut events) = started(config(1), vec![Up]);
        press(&mut game, Up, 0.0, &mut events);

        game.on_confirm_pressed();
        game.tick(0.8 * 6.0, &mut events);

        assert_eq!(game.phase(), RoundPhase::RoundWon);
        assert_eq!(game.state().session.success_count, 1);
        assert!((game.state().score.streak_multiplier - 1.25).abs() < 1e-6);
        assert_eq!(game.score(), 25 + 250);
        assert!(events.contains(&GameEvent::StatusMessage {
            text: "Round 1 Cleared! +250".to_string()
        }));
        assert!(game.state().pending.is_some());
    }

    #[test]
    fn test_scenario_c_wrong_arrow_staggers_then_recovers() {
        let (mut game, mut events) = started(config(2), vec![Up, Left]);
        press(&mut game, Down, 0.0, &mut events);

        assert!(events.contains(&GameEvent::SymbolResult { index: 0, passed: false }));
        assert_eq!(game.phase(), RoundPhase::Staggered);
        assert!(game.state().stagger.active);
        assert_eq!(game.state().progress.current_index, 0);
        assert_eq!(game.score(), 0);

        game.tick(1.0, &mut events);
        assert_eq!(game.phase(), RoundPhase::Staggered);

        game.tick(0.25, &mut events);
        assert_eq!(game.phase(), RoundPhase::Inputting);
        assert!(!game.state().stagger.active);
        assert_eq!(game.state().progress.current_index, 0);

        // Same slot is retried
        press(&mut game, Up, 0.1, &mut events);
        assert_eq!(game.state().progress.current_index, 1);
    }

    #[test]
    fn test_scenario_d_timeout_pays_consolation() {
        let (mut game, mut events) = started(config(4), vec![Up, Up, Down, Down]);
        game.state.score.streak_multiplier = 1.5;
        press(&mut game, Up, 0.1, &mut events);
        press(&mut game, Up, 0.1, &mut events);
        assert_eq!(game.score(), 50);

        game.tick(6.0, &mut events);
        assert_eq!(game.phase(), RoundPhase::RoundLost);
        assert_eq!(game.state().progress.elapsed, 6.0);
        assert_eq!(game.score(), 50 + 25);
        assert_eq!(game.state().score.streak_multiplier, 1.0);
        assert!(events.contains(&GameEvent::StatusMessage {
            text: "Failed Round 1. (Progress 2/4)".to_string()
        }));
    }

    #[test]
    fn test_scenario_e_game_over_after_last_round() {
        let cfg = MiniGameConfig {
            total_rounds: 1,
            ..config(1)
        };
        let (mut game, mut events) = started(cfg, vec![Right]);
        press(&mut game, Right, 0.0, &mut events);
        game.on_confirm_pressed();
        game.tick(4.8, &mut events);
        assert_eq!(game.phase(), RoundPhase::RoundWon);

        // Not yet due
        game.tick(0.5, &mut events);
        assert_eq!(game.phase(), RoundPhase::RoundWon);

        game.tick(0.5, &mut events);
        assert!(game.is_game_over());
        assert!(game.state().pending.is_none());
        assert_eq!(events.last(), Some(&GameEvent::GameOver { final_score: 275 }));

        let snapshot = game.state().clone();
        let mut later = Vec::new();
        game.on_direction_pressed(Up);
        game.tick(1.0, &mut later);
        game.tick(1.0, &mut later);
        assert_eq!(game.state(), &snapshot);
        assert_eq!(
            later,
            vec![
                GameEvent::GameOver { final_score: 275 },
                GameEvent::GameOver { final_score: 275 }
            ]
        );
    }

    #[test]
    fn test_win_ramps_next_round_length() {
        let (mut game, mut events) = started(config(1), vec![Left]);
        press(&mut game, Left, 0.0, &mut events);
        game.on_confirm_pressed();
        game.tick(4.8, &mut events);
        game.tick(0.8, &mut events);

        assert_eq!(game.phase(), RoundPhase::Inputting);
        assert_eq!(game.state().round.index, 2);
        assert_eq!(game.state().round.len(), 2);
        assert_eq!(game.state().progress.elapsed, 0.0);
    }

    #[test]
    fn test_loss_delay_then_next_round_same_length() {
        let (mut game, mut events) = started(config(3), vec![Up, Down, Left]);
        game.tick(6.0, &mut events);
        assert_eq!(game.phase(), RoundPhase::RoundLost);
        assert_eq!(game.score(), 0);

        game.tick(0.9, &mut events);
        assert_eq!(game.phase(), RoundPhase::RoundLost);
        game.tick(0.2, &mut events);
        assert_eq!(game.phase(), RoundPhase::Inputting);
        assert_eq!(game.state().round.index, 2);
        assert_eq!(game.state().round.len(), 3);
    }

    #[test]
    fn test_confirm_too_early_staggers() {
        let (mut game, mut events) = started(config(2), vec![Up, Up]);
        game.on_confirm_pressed();
        game.tick(0.1, &mut events);
        assert_eq!(game.phase(), RoundPhase::Staggered);
        assert!(events.contains(&GameEvent::StatusMessage {
            text: "Staggered! Too early! Finish the arrows first.".to_string()
        }));
    }

    #[test]
    fn test_bad_timing_recovers_to_confirm() {
        let (mut game, mut events) = started(config(1), vec![Down]);
        press(&mut game, Down, 0.0, &mut events);
        game.on_confirm_pressed();
        game.tick(1.0, &mut events);
        assert_eq!(game.phase(), RoundPhase::Staggered);

        game.tick(1.25, &mut events);
        assert_eq!(game.phase(), RoundPhase::AwaitingConfirm);
        assert!(events.contains(&GameEvent::StatusMessage {
            text: "Recovered. Hit CONFIRM in the green window!".to_string()
        }));
    }

    #[test]
    fn test_arrow_while_awaiting_confirm_staggers() {
        let (mut game, mut events) = started(config(1), vec![Down]);
        press(&mut game, Down, 0.0, &mut events);
        press(&mut game, Down, 0.1, &mut events);
        assert_eq!(game.phase(), RoundPhase::Staggered);
        assert_eq!(game.state().progress.current_index, 1);
        assert!(events.contains(&GameEvent::StatusMessage {
            text: "Staggered! Finish with CONFIRM!".to_string()
        }));
    }

    #[test]
    fn test_one_edge_per_tick_in_priority_order() {
        let (mut game, mut events) = started(config(2), vec![Up, Up]);
        let input = TickInput {
            up: true,
            down: true,
            confirm: true,
            ..Default::default()
        };
        assert_eq!(input.first_edge(), Some(InputEdge::Direction(Up)));
        game.tick_with_input(&input, 0.1, &mut events);
        assert_eq!(game.phase(), RoundPhase::Inputting);
        assert_eq!(game.state().progress.current_index, 1);

        assert_eq!(TickInput::confirm().first_edge(), Some(InputEdge::Confirm));
        assert_eq!(TickInput::default().first_edge(), None);
    }

    #[test]
    fn test_edges_dropped_while_staggered() {
        let (mut game, mut events) = started(config(2), vec![Up, Up]);
        press(&mut game, Left, 0.1, &mut events);
        press(&mut game, Up, 0.1, &mut events);
        assert_eq!(game.state().progress.current_index, 0);
        assert_eq!(game.phase(), RoundPhase::Staggered);

        // Recovery tick with no new edge: nothing replays
        game.tick(1.25, &mut events);
        assert_eq!(game.phase(), RoundPhase::Inputting);
        assert_eq!(game.state().progress.current_index, 0);
    }

    #[test]
    fn test_timeout_overrides_stagger() {
        let (mut game, mut events) = started(config(2), vec![Up, Up]);
        game.tick(5.5, &mut events);
        press(&mut game, Right, 0.1, &mut events);
        assert_eq!(game.phase(), RoundPhase::Staggered);

        game.tick(0.5, &mut events);
        assert_eq!(game.phase(), RoundPhase::RoundLost);
        assert!(!game.state().stagger.active);

        // The expired stagger never resurrects the round
        game.tick(0.5, &mut events);
        assert_eq!(game.phase(), RoundPhase::RoundLost);
    }

    #[test]
    fn test_end_session_cancels_pending_round() {
        let (mut game, mut events) = started(config(1), vec![Up]);
        game.tick(6.0, &mut events);
        assert!(game.state().pending.is_some());

        game.end_session(&mut events);
        assert!(game.is_game_over());
        assert!(game.state().pending.is_none());

        game.tick(5.0, &mut events);
        assert!(game.is_game_over());
        assert_eq!(game.state().session.current_round, 1);
    }

    #[test]
    fn test_timer_blend() {
        let game = MiniGame::new(MiniGameConfig::default(), 0).expect("valid config");
        assert_eq!(game.timer_blend(0.0), 0.0);
        assert_eq!(game.timer_blend(0.69), 0.0);
        assert!((game.timer_blend(0.725) - 0.5).abs() < 1e-3);
        assert_eq!(game.timer_blend(0.75), 1.0);
        assert_eq!(game.timer_blend(0.88), 1.0);
        assert_eq!(game.timer_blend(0.95), 0.0);
    }

    #[test]
    fn test_timer_progress_reported_each_tick() {
        let (mut game, _) = started(config(3), vec![Up, Up, Up]);
        let mut events = Vec::new();
        game.tick(1.5, &mut events);
        assert_eq!(
            events,
            vec![GameEvent::TimerProgress {
                progress: 0.25,
                blend: 0.0
            }]
        );
    }

    #[test]
    fn test_tick_zero_changes_nothing() {
        let (mut game, mut events) = started(config(2), vec![Up, Down]);
        press(&mut game, Left, 0.3, &mut events);
        let snapshot = game.state().clone();
        for _ in 0..5 {
            game.tick(0.0, &mut events);
        }
        assert_eq!(game.state(), &snapshot);
    }

    #[test]
    fn test_stagger_survives_tick_zero() {
        let (mut game, mut events) = started(config(2), vec![Up, Down]);
        press(&mut game, Down, 0.3, &mut events);
        assert_eq!(game.phase(), RoundPhase::Staggered);
        assert!(game.state().stagger.remaining > 0.0);

        let snapshot = game.state().clone();
        game.tick(0.0, &mut events);
        assert_eq!(game.state(), &snapshot);

        let zero_stagger = MiniGameConfig {
            stagger_duration: 0.0,
            ..config(2)
        };
        assert!(matches!(
            MiniGame::new(zero_stagger, 0),
            Err(crate::error::ConfigError::NonPositiveStagger(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let bad = MiniGameConfig {
            round_time: -2.0,
            ..Default::default()
        };
        assert!(MiniGame::new(bad, 0).is_err());
    }

    #[test]
    #[should_panic(expected = "already consumed")]
    fn test_evaluate_past_end_panics() {
        let (mut game, mut events) = started(config(1), vec![Up]);
        press(&mut game, Up, 0.0, &mut events);
        game.evaluate_input(Up, &mut events);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_negative_dt_panics() {
        let (mut game, mut events) = started(config(1), vec![Up]);
        game.tick(-0.1, &mut events);
    }

    #[test]
    fn test_same_seed_same_rounds() {
        let mut a = MiniGame::new(MiniGameConfig::default(), 99999).expect("valid config");
        let mut b = MiniGame::new(MiniGameConfig::default(), 99999).expect("valid config");
        a.start(&mut ());
        b.start(&mut ());
        for _ in 0..3 {
            assert_eq!(a.state().round, b.state().round);
            a.tick(6.0, &mut ());
            b.tick(6.0, &mut ());
            a.tick(1.0, &mut ());
            b.tick(1.0, &mut ());
        }
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn drive(game: &mut MiniGame, dt: f32, key: u8) {
            match key {
                0..=3 => game.on_direction_pressed(Direction::ALL[key as usize]),
                4 => game.on_confirm_pressed(),
                _ => {}
            }
            game.tick(dt, &mut ());
        }

        proptest! {
            #[test]
            fn invariants_hold_every_tick(
                seed in any::<u64>(),
                steps in prop::collection::vec((0.0f32..0.5, 0u8..7), 1..400),
            ) {
                let mut game = MiniGame::new(MiniGameConfig::default(), seed).unwrap();
                game.start(&mut ());
                let mut last_score = 0;
                for (dt, key) in steps {
                    drive(&mut game, dt, key);
                    let s = game.state();
                    prop_assert!(s.progress.elapsed >= 0.0);
                    prop_assert!(s.progress.elapsed <= game.config().round_time);
                    prop_assert!(s.progress.current_index <= s.round.len());
                    prop_assert!(s.score.score >= last_score);
                    prop_assert!(s.score.streak_multiplier >= 1.0);
                    prop_assert_eq!(s.stagger.active, s.phase == RoundPhase::Staggered);
                    last_score = s.score.score;
                }
            }

            #[test]
            fn tick_zero_is_idempotent(
                seed in any::<u64>(),
                steps in prop::collection::vec((0.0f32..0.5, 0u8..7), 0..100),
            ) {
                let mut game = MiniGame::new(MiniGameConfig::default(), seed).unwrap();
                game.start(&mut ());
                for (dt, key) in steps {
                    drive(&mut game, dt, key);
                }
                let snapshot = game.state().clone();
                game.tick(0.0, &mut ());
                game.tick(0.0, &mut ());
                prop_assert_eq!(game.state(), &snapshot);
            }

            #[test]
            fn length_follows_success_count(
                starting in 1usize..10,
                extra in 0usize..10,
                success in 0u32..100,
            ) {
                let config = MiniGameConfig {
                    starting_length: starting,
                    max_length: starting + extra,
                    ..Default::default()
                };
                let expected = (starting + success as usize).min(starting + extra);
                prop_assert_eq!(config.sequence_length(success), expected);
            }
        }
    }
}
