//! The pure single-tick transition. No timers, no I/O; the only randomness
//! is food placement, and that goes through the injected [`SessionRng`].

use crate::defaults::{
    FOOD_PLACEMENT_ATTEMPTS, FOOD_SCORE, GRID_SIZE, SPEED_FLOOR_MS, SPEED_STEP_MS,
};
use crate::session_rng::SessionRng;
use super::state::GameState;
use super::types::{Direction, GameMode, GameStatus, Point};

/// Where the head lands when moving `direction` from `head`.
///
/// In pass-through mode out-of-range coordinates wrap to the opposite edge.
/// In walls mode the coordinate is left out of range; detecting that as
/// fatal is the caller's job.
pub fn next_head(head: Point, direction: Direction, mode: GameMode) -> Point {
    let (dx, dy) = direction.offset();
    let mut next = Point::new(head.x + dx, head.y + dy);

    if mode == GameMode::PassThrough {
        next.x = next.x.rem_euclid(GRID_SIZE);
        next.y = next.y.rem_euclid(GRID_SIZE);
    }

    next
}

/// True iff either coordinate is outside the grid. Only meaningful in walls
/// mode; pass-through never produces an out-of-range head.
pub fn is_wall_collision(position: Point) -> bool {
    position.x < 0 || position.x >= GRID_SIZE || position.y < 0 || position.y >= GRID_SIZE
}

/// True iff the head occupies the same cell as any later segment.
///
/// Callers pass the body as it exists after the move, with the tail already
/// truncated for a non-eating tick. That timing makes moving into the cell
/// the tail is vacating this tick legal, which is intended behavior.
pub fn is_self_collision(snake: &[Point]) -> bool {
    let head = snake[0];
    snake[1..].contains(&head)
}

/// Uniformly picks a free cell for food. Rejection-samples up to
/// [`FOOD_PLACEMENT_ATTEMPTS`] times, then falls back to an exhaustive scan
/// of free cells so placement terminates even on a nearly full grid.
/// Returns `None` only when the snake covers every cell.
pub fn generate_food(snake: &[Point], rng: &mut SessionRng) -> Option<Point> {
    for _ in 0..FOOD_PLACEMENT_ATTEMPTS {
        let candidate = Point::new(
            rng.random_range(0..GRID_SIZE),
            rng.random_range(0..GRID_SIZE),
        );
        if !snake.contains(&candidate) {
            return Some(candidate);
        }
    }

    let free: Vec<Point> = (0..GRID_SIZE)
        .flat_map(|y| (0..GRID_SIZE).map(move |x| Point::new(x, y)))
        .filter(|cell| !snake.contains(cell))
        .collect();

    if free.is_empty() {
        return None;
    }

    Some(free[rng.random_range(0..free.len())])
}

/// Advances the game by exactly one tick.
///
/// Total function: every input has a defined result and the only failure
/// outcome is `status = GameOver`, which is a normal value. Requests to
/// reverse onto the snake's own neck are ignored, not faulted.
pub fn step(state: &GameState, requested: Option<Direction>, rng: &mut SessionRng) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let direction = match requested {
        Some(dir) if !dir.is_opposite(&state.direction) => dir,
        _ => state.direction,
    };

    let new_head = next_head(state.head(), direction, state.mode);

    if state.mode == GameMode::Walls && is_wall_collision(new_head) {
        return GameState {
            status: GameStatus::GameOver,
            ..state.clone()
        };
    }

    let mut new_snake = Vec::with_capacity(state.snake.len() + 1);
    new_snake.push(new_head);
    new_snake.extend_from_slice(&state.snake);

    let ate_food = new_head == state.food;
    if !ate_food {
        new_snake.pop();
    }

    // Checked after the tail truncation above, so chasing the cell the tail
    // just vacated is survivable on a non-eating tick.
    if is_self_collision(&new_snake) {
        return GameState {
            status: GameStatus::GameOver,
            ..state.clone()
        };
    }

    let food = if ate_food {
        // None only when the snake fills the grid; keep the old food rather
        // than corrupting the no-overlap invariant.
        generate_food(&new_snake, rng).unwrap_or(state.food)
    } else {
        state.food
    };

    GameState {
        snake: new_snake,
        food,
        direction,
        score: if ate_food { state.score + FOOD_SCORE } else { state.score },
        status: state.status,
        mode: state.mode,
        speed_ms: if ate_food {
            state.speed_ms.saturating_sub(SPEED_STEP_MS).max(SPEED_FLOOR_MS)
        } else {
            state.speed_ms
        },
    }
}
