//! Stateful driver around the pure engine: a timestamp-gated tick gate, a
//! FIFO of buffered direction inputs, and the session-level lifecycle
//! (start/pause/reset/mode-change) that is not part of the per-tick
//! transition.
//!
//! The scheduler is a plain polling interface: callers feed it a monotonic
//! millisecond timestamp at whatever cadence they like (render frames, a
//! tokio interval) and it commits at most one engine step per elapsed tick
//! interval. It owns the `GameState` exclusively between ticks.

use std::collections::VecDeque;

use crate::engine::{self, Direction, GameMode, GameState, GameStatus};
use crate::input::{self, KeyAction};
use crate::log;
use crate::session_rng::SessionRng;

pub struct GameScheduler {
    state: GameState,
    queue: VecDeque<Direction>,
    rng: SessionRng,
    /// Timestamp of the last committed tick. `None` means "commit on the
    /// next frame", which is what a freshly started or resumed game wants.
    last_tick_ms: Option<u64>,
    tick: u64,
}

impl GameScheduler {
    pub fn new(mode: GameMode, mut rng: SessionRng) -> Self {
        let state = GameState::initial(mode, &mut rng);
        Self {
            state,
            queue: VecDeque::new(),
            rng,
            last_tick_ms: None,
            tick: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Ticks committed since the last start/reset.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Begins a new game in the current mode. Valid from any status; from
    /// game-over it acts as "play again". Pending inputs are dropped.
    pub fn start(&mut self) -> &GameState {
        self.state = GameState::initial(self.state.mode, &mut self.rng);
        self.state.status = GameStatus::Playing;
        self.queue.clear();
        self.last_tick_ms = None;
        self.tick = 0;
        &self.state
    }

    /// Playing <-> paused. Guarded no-op from idle or game-over.
    pub fn toggle_pause(&mut self) -> &GameState {
        match self.state.status {
            GameStatus::Playing => {
                self.state.status = GameStatus::Paused;
            }
            GameStatus::Paused => {
                self.state.status = GameStatus::Playing;
                // Resume without owing a burst of missed ticks.
                self.last_tick_ms = None;
            }
            GameStatus::Idle | GameStatus::GameOver => {}
        }
        &self.state
    }

    /// Back to a fresh idle state in the current mode; cancels the tick gate
    /// and drops pending inputs.
    pub fn reset(&mut self) -> &GameState {
        self.state = GameState::initial(self.state.mode, &mut self.rng);
        self.queue.clear();
        self.last_tick_ms = None;
        self.tick = 0;
        &self.state
    }

    /// Switching the boundary rule implies a full reset. Guarded no-op while
    /// a game is actively being played.
    pub fn change_mode(&mut self, mode: GameMode) -> &GameState {
        if self.state.status == GameStatus::Playing {
            log!("Ignoring mode change to {:?} while playing", mode);
            return &self.state;
        }
        self.state = GameState::initial(mode, &mut self.rng);
        self.queue.clear();
        self.last_tick_ms = None;
        self.tick = 0;
        &self.state
    }

    /// Buffers a direction without validating it against the current travel
    /// direction: by the time it is consumed an earlier queued entry may
    /// have changed what "current" means, so validation belongs to the
    /// engine at tick time.
    pub fn enqueue_direction(&mut self, direction: Direction) {
        self.queue.push_back(direction);
    }

    /// Input-collaborator entry point. `from_text_input` marks key events
    /// that originated while a text field had focus; those never reach the
    /// game.
    pub fn handle_key(&mut self, key: &str, from_text_input: bool) {
        if from_text_input {
            return;
        }

        match input::map_key(key) {
            KeyAction::Turn(direction) => self.enqueue_direction(direction),
            KeyAction::StartOrPause => match self.state.status {
                GameStatus::Idle | GameStatus::GameOver => {
                    self.start();
                }
                GameStatus::Playing | GameStatus::Paused => {
                    self.toggle_pause();
                }
            },
            KeyAction::Ignored => {}
        }
    }

    /// Frame callback. `now_ms` must come from a monotonically increasing
    /// clock. Commits at most one tick per call, consuming at most one
    /// queued direction; returns whether a tick was committed.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        if self.state.status != GameStatus::Playing {
            return false;
        }

        if let Some(last) = self.last_tick_ms
            && now_ms.saturating_sub(last) < self.state.speed_ms
        {
            return false;
        }

        self.last_tick_ms = Some(now_ms);
        let requested = self.queue.pop_front();
        self.state = engine::step(&self.state, requested, &mut self.rng);
        self.tick += 1;
        true
    }

    #[cfg(test)]
    pub(crate) fn state_mut_for_tests(&mut self) -> &mut GameState {
        &mut self.state
    }
}
