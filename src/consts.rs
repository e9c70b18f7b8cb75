//! Default preferences & hard-coded limits
use crate::game::Direction;

/// Default field width, in cells
pub const DEFAULT_FIELD_WIDTH: u32 = 21;

/// Default field height, in cells
pub const DEFAULT_FIELD_HEIGHT: u32 = 15;

/// Default speed of the snake, in cells per second
pub const DEFAULT_SNAKE_SPEED: u32 = 15;

/// Default length of the snake at the start of a game
pub const DEFAULT_INITIAL_SNAKE_SIZE: u32 = 5;

/// Whether the snake passes through the walls by default
pub const DEFAULT_WRAP_WALLS: bool = false;

/// Largest accepted field width or height
pub const MAX_FIELD_DIMENSION: u32 = 127;

/// Direction the snake faces at the start of a game.  The body extends
/// behind the head in the opposite direction.
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Number of milliseconds in the period of a snake moving at speed 1
pub(crate) const MILLIS_PER_SECOND: u64 = 1000;
