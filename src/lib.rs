//! Snake on a toroidal grid: a tick-driven simulation core plus a crossterm
//! frontend that schedules and paints it.

pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod item;
pub mod logger;
pub mod render;
pub mod rng;
pub mod session;
pub mod snake;
pub mod term;

pub use config::{GameConfig, Layout};
pub use error::{ConfigurationError, GameError};
pub use grid::{Grid, Position};
pub use item::{Item, ItemKind};
pub use session::{GameSession, SessionRules, TickOutcome};
pub use snake::{Direction, Snake, SnakeState};
