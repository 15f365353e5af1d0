mod achievements;
mod bot_controller;
mod effects;
mod events;
mod food;
mod game_state;
mod obstacle;
mod portal;
mod power_up;
mod session_rng;
mod settings;
mod snake;
mod spawner;
mod types;

pub use achievements::{Achievement, AchievementTracker};
pub use bot_controller::{BotController, BotKind};
pub use effects::{ActiveEffect, ActiveEffects};
pub use events::{SoundCue, TickEvent};
pub use food::{Food, FoodKind};
pub use game_state::GameState;
pub use obstacle::{Obstacle, ObstacleKind};
pub use portal::PortalPair;
pub use power_up::{PowerUp, PowerUpKind};
pub use session_rng::SessionRng;
pub use settings::{Difficulty, EffectDurations, GameMode, GameSettings};
pub use snake::Snake;
pub use spawner::find_free_cell;
pub use types::{CollisionKind, Direction, EndReason, FieldSize, Point};
