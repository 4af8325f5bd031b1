pub mod config;
pub mod defaults;
pub mod engine;
pub mod input;
pub mod logger;
pub mod observers;
pub mod scheduler;
pub mod session;
pub mod session_rng;
pub mod spectator;

pub use engine::{Direction, GameMode, GameState, GameStatus, Point};
pub use observers::{AuthProbe, Leaderboard, StateObserver};
pub use scheduler::GameScheduler;
pub use session::{GameSession, SessionCommand};
pub use session_rng::SessionRng;
pub use spectator::{DirectionProvider, RandomTurnProvider, SpectatorConfig, SpectatorSession};
