//! Collaborator seams. The core never blocks on any of these: rendering is
//! a read-only consumer, scoring is fire-and-forget, and every failure here
//! stays out of gameplay.

use std::future::Future;

use crate::engine::{GameMode, GameState};

/// Read-only consumer of the game state: receives a fresh copy on every
/// committed tick and on every session-level transition.
pub trait StateObserver: Send + Sync + Clone + 'static {
    fn state_changed(&self, state: GameState) -> impl Future<Output = ()> + Send;
}

/// Auth/session collaborator: whether a score submission is allowed at all
/// (typically "is someone logged in").
pub trait AuthProbe: Send + Sync + 'static {
    fn can_submit_score(&self) -> bool;
}

/// Leaderboard/persistence collaborator. Called once per transition into
/// game-over with a positive score; the result is logged and otherwise
/// ignored by the core.
pub trait Leaderboard: Send + Sync + 'static {
    fn submit_score(
        &self,
        score: u32,
        mode: GameMode,
    ) -> impl Future<Output = Result<(), String>> + Send;
}
