//! Fixed gameplay constants shared by the engine, scheduler and spectator.

/// The playing field is a fixed 20x20 grid.
pub const GRID_SIZE: i32 = 20;

/// Tick interval of a fresh game, in milliseconds.
pub const INITIAL_SPEED_MS: u64 = 150;

/// The tick interval never drops below this, no matter the score.
pub const SPEED_FLOOR_MS: u64 = 50;

/// Speed-up per food item, in milliseconds.
pub const SPEED_STEP_MS: u64 = 2;

/// Points awarded per food item.
pub const FOOD_SCORE: u32 = 10;

/// Rejection-sampling attempts before food placement falls back to an
/// exhaustive free-cell scan.
pub const FOOD_PLACEMENT_ATTEMPTS: u32 = 100;

/// Cadence the session runner polls the scheduler at (render-frame rate).
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Fixed cadence of spectator re-simulation.
pub const SPECTATOR_TICK_INTERVAL_MS: u64 = 150;

/// Per-tick probability that the spectator simulation injects a random turn.
pub const SPECTATOR_TURN_PROBABILITY: f32 = 0.1;
