//! One player's sitting at the game.
//!
//! `Session` owns the simulation, the tick scheduler and the collaborators,
//! and is the only place where game outcomes turn into sounds and saved
//! scores. Collaborator failures are logged and otherwise ignored.

use std::time::{Duration, Instant};

use crate::audio::AudioSink;
use crate::config::{BASE_TICK_INTERVAL, DEFAULT_PLAYER_NAME};
use crate::error::{AudioError, StoreError};
use crate::game::{GameState, GameStatus, TickOutcome};
use crate::grid::Grid;
use crate::input::Direction;
use crate::score::ScoreStore;
use crate::ticker::{TickScheduler, Ticker};

/// Construction parameters for a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub grid: Grid,
    pub base_interval: Duration,
    /// Fixed food seed; `None` draws from entropy.
    pub seed: Option<u64>,
    pub player_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            base_interval: BASE_TICK_INTERVAL,
            seed: None,
            player_name: DEFAULT_PLAYER_NAME.to_owned(),
        }
    }
}

pub struct Session<A: AudioSink, S: ScoreStore> {
    state: GameState,
    ticker: Ticker,
    audio: A,
    scores: S,
    player_name: String,
    base_interval: Duration,
    leaderboard_open: bool,
}

impl<A: AudioSink, S: ScoreStore> Session<A, S> {
    #[must_use]
    pub fn new(config: SessionConfig, audio: A, scores: S) -> Self {
        let state = match config.seed {
            Some(seed) => GameState::new_with_seed(config.grid, seed),
            None => GameState::new(config.grid),
        };

        Self {
            state,
            ticker: Ticker::new(),
            audio,
            scores,
            player_name: config.player_name,
            base_interval: config.base_interval,
            leaderboard_open: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for staging positions in tools and tests.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn audio(&self) -> &A {
        &self.audio
    }

    #[must_use]
    pub fn scores(&self) -> &S {
        &self.scores
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_running()
    }

    /// Whether the leaderboard overlay covers the board.
    #[must_use]
    pub fn is_leaderboard_open(&self) -> bool {
        self.leaderboard_open
    }

    /// Shows or hides the leaderboard. A running game is paused first, and
    /// stays paused after the overlay closes.
    pub fn toggle_leaderboard(&mut self, now: Instant) -> bool {
        if !self.leaderboard_open && self.state.status() == GameStatus::Running {
            self.on_pause_toggle(now);
        }
        self.leaderboard_open = !self.leaderboard_open;
        self.leaderboard_open
    }

    /// Interval the ticker uses at the current level.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.state.tick_interval(self.base_interval)
    }

    /// Idle → Running; starts music and the tick driver.
    pub fn start(&mut self, now: Instant) {
        if !self.state.start() {
            return;
        }

        log::info!(
            "game started for {} at {:?} per tick",
            self.player_name,
            self.tick_interval()
        );
        report_audio("game start", self.audio.on_game_start());
        self.sync_ticker(now);
    }

    /// Direction key. The first one on an idle board also starts the game.
    pub fn on_direction(&mut self, direction: Direction, now: Instant) {
        if self.leaderboard_open {
            return;
        }
        if self.state.status() == GameStatus::Idle {
            self.start(now);
        }

        self.state.set_direction(direction);
    }

    pub fn on_pause_toggle(&mut self, now: Instant) {
        if self.leaderboard_open || !self.state.toggle_pause() {
            return;
        }

        match self.state.status() {
            GameStatus::Paused => report_audio("pause music", self.audio.pause_music()),
            _ => report_audio("resume music", self.audio.resume_music()),
        }
        self.sync_ticker(now);
    }

    /// Leaves the level popup and restarts ticking at the new speed.
    pub fn acknowledge(&mut self, now: Instant) {
        if !self.state.acknowledge() {
            return;
        }

        log::info!(
            "entering level {} at {:?} per tick",
            self.state.level,
            self.tick_interval()
        );
        report_audio("resume music", self.audio.resume_music());
        self.sync_ticker(now);
    }

    /// Confirm key: start, continue to the next level, or set up a new game.
    pub fn on_confirm(&mut self, now: Instant) {
        if self.leaderboard_open {
            return;
        }
        match self.state.status() {
            GameStatus::Idle => self.start(now),
            GameStatus::LevelTransition(_) => self.acknowledge(now),
            status if status.is_terminal() => self.reset(),
            _ => {}
        }
    }

    /// Throws away the current run and waits idle for a new start.
    pub fn reset(&mut self) {
        self.ticker.cancel();
        self.state.reset();
    }

    /// Flips mute and returns the new state.
    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.audio.is_muted();
        self.audio.set_muted(muted);
        if !muted && self.state.status() == GameStatus::Running {
            report_audio("resume music", self.audio.resume_music());
        }
        muted
    }

    /// Runs a tick if the scheduler says one is due.
    pub fn update(&mut self, now: Instant) -> Option<TickOutcome> {
        if !self.ticker.poll(now) {
            return None;
        }

        Some(self.tick(now))
    }

    /// Advances one tick and reacts to what happened.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let outcome = self.state.tick();

        match outcome {
            TickOutcome::Skipped | TickOutcome::Moved => {}
            TickOutcome::AteFood { .. } => {
                report_audio("food eaten", self.audio.on_food_eaten());
            }
            TickOutcome::LevelUp(level) => {
                report_audio("food eaten", self.audio.on_food_eaten());
                report_audio("pause music", self.audio.pause_music());
                log::info!("level {level} reached with score {}", self.state.score);
            }
            TickOutcome::GameOver(reason) => {
                log::info!("game over ({reason:?}) with score {}", self.state.score);
                report_audio("game over", self.audio.on_game_over());
                self.record_final_score();
            }
            TickOutcome::Won => {
                log::info!("game won with score {}", self.state.score);
                report_audio("food eaten", self.audio.on_food_eaten());
                report_audio("pause music", self.audio.pause_music());
                self.record_final_score();
            }
        }

        self.sync_ticker(now);
        outcome
    }

    /// Stops the tick driver. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.ticker.cancel();
    }

    fn record_final_score(&mut self) {
        let result = self
            .scores
            .record_score(&self.player_name, self.state.score);
        report_store(result);
    }

    fn sync_ticker(&mut self, now: Instant) {
        if self.state.status() != GameStatus::Running {
            self.ticker.cancel();
            return;
        }

        let interval = self.tick_interval();
        if self.ticker.interval() != Some(interval) {
            self.ticker.start(interval, now);
        }
    }
}

fn report_audio(event: &str, result: Result<(), AudioError>) {
    if let Err(error) = result {
        log::warn!("ignoring audio failure on {event}: {error}");
    }
}

fn report_store(result: Result<(), StoreError>) {
    if let Err(error) = result {
        log::warn!("failed to record score: {error}");
    }
}
