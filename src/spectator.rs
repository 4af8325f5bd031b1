//! Local re-simulation of a remote player's last known state. The spectator
//! replays the exact same pure engine; it is a plausible-looking playback,
//! not a live feed. Direction injection sits behind a capability trait so
//! the simulation stays deterministic under test.

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use crate::defaults::{SPECTATOR_TICK_INTERVAL_MS, SPECTATOR_TURN_PROBABILITY};
use crate::engine::{self, Direction, GameState, GameStatus};
use crate::session_rng::SessionRng;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectatorConfig {
    /// Fixed cadence the caller drives [`SpectatorSession::advance`] at.
    pub tick_interval_ms: u64,
    /// Per-tick probability of injecting a random turn.
    pub turn_probability: f32,
}

impl Default for SpectatorConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: SPECTATOR_TICK_INTERVAL_MS,
            turn_probability: SPECTATOR_TURN_PROBABILITY,
        }
    }
}

impl Validate for SpectatorConfig {
    fn validate(&self) -> Result<(), String> {
        if self.tick_interval_ms < 50 || self.tick_interval_ms > 5000 {
            return Err("Spectator tick interval must be between 50ms and 5000ms".to_string());
        }
        if !(0.0..=1.0).contains(&self.turn_probability) {
            return Err("Turn probability must be between 0.0 and 1.0".to_string());
        }
        Ok(())
    }
}

/// Supplies the direction fed into each simulated tick. `None` keeps the
/// current heading.
pub trait DirectionProvider {
    fn next_direction(&mut self, state: &GameState) -> Option<Direction>;
}

/// Stock provider: with the configured probability, turn to a uniformly
/// random direction (the engine discards illegal reversals on its own).
pub struct RandomTurnProvider {
    probability: f32,
    rng: SessionRng,
}

impl RandomTurnProvider {
    pub fn new(probability: f32, rng: SessionRng) -> Self {
        Self { probability, rng }
    }
}

impl DirectionProvider for RandomTurnProvider {
    fn next_direction(&mut self, _state: &GameState) -> Option<Direction> {
        if self.rng.random::<f32>() < self.probability {
            let idx = self.rng.random_range(0..Direction::ALL.len());
            Some(Direction::ALL[idx])
        } else {
            None
        }
    }
}

pub struct SpectatorSession<P: DirectionProvider> {
    snapshot: GameState,
    state: GameState,
    provider: P,
    rng: SessionRng,
}

impl<P: DirectionProvider> SpectatorSession<P> {
    /// Seeds from a remote snapshot. A non-playing snapshot stays frozen.
    pub fn from_snapshot(snapshot: GameState, provider: P, rng: SessionRng) -> Self {
        Self {
            state: snapshot.clone(),
            snapshot,
            provider,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// One simulated tick; the caller owns the timer. When the simulated
    /// snake dies, playback loops back to the seeded snapshot.
    pub fn advance(&mut self) -> &GameState {
        if self.state.status != GameStatus::Playing {
            return &self.state;
        }

        let requested = self.provider.next_direction(&self.state);
        let next = engine::step(&self.state, requested, &mut self.rng);

        if next.status == GameStatus::GameOver {
            self.state = self.snapshot.clone();
            self.state.status = GameStatus::Playing;
        } else {
            self.state = next;
        }

        &self.state
    }
}
