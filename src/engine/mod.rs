mod state;
mod step;
mod types;

pub use state::GameState;
pub use step::{generate_food, is_self_collision, is_wall_collision, next_head, step};
pub use types::{Direction, GameMode, GameStatus, Point};
