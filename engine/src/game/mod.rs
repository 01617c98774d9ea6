mod food;
mod grid;
mod logic;
mod obstacles;
mod power;
mod session_rng;
mod settings;
mod snake;
mod types;

pub use food::{Food, PowerUp};
pub use grid::random_free_cell;
pub use logic::{EngineError, GameLogic, GameSnapshot, TickEvents};
pub use obstacles::ObstacleField;
pub use power::{PowerEffect, PowerPolicy, PowerUpKind};
pub use session_rng::SessionRng;
pub use settings::{Difficulty, GameSettings};
pub use snake::Snake;
pub use types::{DeathReason, Direction, FieldSize, Point, TickStatus, WallCollisionMode};
