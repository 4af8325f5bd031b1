use serde::{Deserialize, Serialize};

use crate::defaults::INITIAL_SPEED_MS;
use crate::session_rng::SessionRng;
use super::step::generate_food;
use super::types::{Direction, GameMode, GameStatus, Point};

/// Full state of one game session. The engine treats this as a value: every
/// tick consumes a reference and produces a fresh `GameState`, which is what
/// makes spectator re-simulation and testing safe.
///
/// Serde spellings match the wire shape used by remote snapshots
/// (`direction: "RIGHT"`, `mode: "pass-through"`, `status: "game-over"`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Head first, tail last. Never empty.
    pub snake: Vec<Point>,
    pub food: Point,
    pub direction: Direction,
    pub score: u32,
    pub status: GameStatus,
    pub mode: GameMode,
    /// Tick interval in milliseconds.
    #[serde(rename = "speed")]
    pub speed_ms: u64,
}

impl GameState {
    /// A fresh idle session: three segments heading right from the middle of
    /// the grid. Deterministic except for food placement.
    pub fn initial(mode: GameMode, rng: &mut SessionRng) -> Self {
        let snake = vec![Point::new(10, 10), Point::new(9, 10), Point::new(8, 10)];
        let food = generate_food(&snake, rng)
            .expect("a 3-segment snake cannot cover the grid");

        Self {
            snake,
            food,
            direction: Direction::Right,
            score: 0,
            status: GameStatus::Idle,
            mode,
            speed_ms: INITIAL_SPEED_MS,
        }
    }

    pub fn head(&self) -> Point {
        self.snake[0]
    }
}
