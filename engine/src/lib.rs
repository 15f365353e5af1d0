pub mod config;
pub mod game;
pub mod high_score;
pub mod logger;
pub mod session;

pub use game::{Difficulty, Direction, EndReason, GameSettings, GameState, SessionRng, TickEvent};
pub use session::{ControlCommand, GameFrontend, GameSession, Hud, MatchStatus, MatchSummary, TickScheduler};
