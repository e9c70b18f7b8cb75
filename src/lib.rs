//! Simulation core for a grid-based snake game.
//!
//! A [`Session`] owns the playing field, the snake, and the queue of turns
//! the player has asked for.  A front end drives it by calling
//! [`Session::tick()`] at the interval given by [`Session::tick_period()`],
//! passing key presses to [`Session::receive_command()`], and drawing the
//! field from [`Session::cell()`] or [`Session::field()`].  Rendering, input
//! handling, and timers are left to the front end.
//!
//! ```
//! use snakecore::{Direction, GameState, Session, SessionConfig};
//!
//! let mut session = Session::new(SessionConfig::default()).unwrap();
//! session.new_game().unwrap();
//! assert_eq!(session.state(), GameState::Running);
//! session.receive_command(Direction::Up).unwrap();
//! session.tick().unwrap();
//! assert_eq!(session.direction(), Direction::Up);
//! ```
pub mod config;
pub mod consts;
pub mod error;
pub mod game;
pub use crate::config::{Config, ConfigError, SessionConfig};
pub use crate::error::SnakeError;
pub use crate::game::{CellState, Direction, Field, GameState, Position, Session, Snake};
