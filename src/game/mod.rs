mod commands;
mod direction;
mod field;
mod snake;
pub use self::direction::Direction;
pub use self::field::{CellState, Field, Position};
pub use self::snake::Snake;
use self::commands::CommandQueue;
use crate::config::SessionConfig;
use crate::consts;
use crate::error::SnakeError;
use rand::Rng;
use std::time::Duration;

/// Where a session is in its lifecycle
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum GameState {
    /// No game is in progress
    #[default]
    Idle,
    Running,
    Paused,
    /// The snake ran into a wall or itself.  Stays this way until the session
    /// is initialized again.
    Lost,
    /// The snake filled the field and there are no more spaces to place food
    /// in.  Stays this way until the session is initialized again.
    Won,
}

impl GameState {
    /// Returns `true` if the game has ended
    pub fn is_over(self) -> bool {
        matches!(self, GameState::Lost | GameState::Won)
    }
}

/// A game session: the field, the snake on it, and the turns waiting to be
/// applied.
///
/// Drivers call [`tick()`][Session::tick] once per
/// [`tick_period()`][Session::tick_period], forward the player's turns to
/// [`receive_command()`][Session::receive_command], and draw using the read
/// accessors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session<R = rand::rngs::ThreadRng> {
    rng: R,
    config: SessionConfig,
    state: GameState,
    field: Option<Field>,
    snake: Option<Snake>,
    commands: CommandQueue,
    /// The direction the snake moved in on the last tick
    direction: Direction,
}

impl Session<rand::rngs::ThreadRng> {
    /// Create an idle session with an empty field.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `config` has an invalid field size or speed.
    pub fn new(config: SessionConfig) -> Result<Self, SnakeError> {
        Session::new_with_rng(config, rand::rng())
    }
}

impl<R: Rng> Session<R> {
    /// Like [`Session::new()`], but food is placed using `rng`
    ///
    /// # Errors
    ///
    /// Returns `Err` if `config` has an invalid field size or speed.
    pub fn new_with_rng(config: SessionConfig, rng: R) -> Result<Session<R>, SnakeError> {
        let mut session = Session {
            rng,
            config,
            state: GameState::Idle,
            field: None,
            snake: None,
            commands: CommandQueue::new(),
            direction: consts::INITIAL_DIRECTION,
        };
        session.initialize(config, true)?;
        Ok(session)
    }

    /// Replace the current game with a fresh one using `config`.
    ///
    /// If `empty_field` is true, the field is left without a snake or food
    /// and the session becomes idle; this is how new preferences are applied
    /// without starting to play.  Otherwise the snake is laid out, one piece
    /// of food is placed, and the session starts running.
    ///
    /// # Errors
    ///
    /// On any error, the session is left exactly as it was before the call.
    ///
    /// - [`SnakeError::BadFieldSize`] if the width or height is not in
    ///   `1..=127`
    /// - [`SnakeError::BadSnakeSpeed`] if the speed is zero
    /// - [`SnakeError::BadSnakeSize`] if the initial snake size is zero
    /// - [`SnakeError::BadInitialPosition`] if the snake does not fit on the
    ///   field
    /// - [`SnakeError::NoSpaceForFood`] if the snake leaves no room for food
    /// - [`SnakeError::Memory`] if allocation fails
    pub fn initialize(&mut self, config: SessionConfig, empty_field: bool) -> Result<(), SnakeError> {
        let (width, height) = config.dimensions()?;
        config.check_speed()?;
        let mut field = Field::new(width, height, config.wrap_walls)?;
        let (snake, state) = if empty_field {
            (None, GameState::Idle)
        } else {
            let head = config.snake_head()?;
            let snake = Snake::build(
                &mut field,
                head,
                consts::INITIAL_DIRECTION,
                config.initial_snake_size,
            )?;
            field.place_food(&mut self.rng)?;
            (Some(snake), GameState::Running)
        };
        log::debug!(
            "Initialized {width}x{height} session (speed {}, wrap {}, snake size {})",
            config.speed,
            config.wrap_walls,
            snake.as_ref().map_or(0, Snake::len),
        );
        self.config = config;
        self.field = Some(field);
        self.snake = snake;
        self.state = state;
        self.commands.clear();
        self.direction = consts::INITIAL_DIRECTION;
        Ok(())
    }

    /// Start a new game with the current preferences.
    ///
    /// # Errors
    ///
    /// See [`Session::initialize()`].
    pub fn new_game(&mut self) -> Result<(), SnakeError> {
        self.initialize(self.config, false)
    }

    /// Advance the snake by one cell and return the resulting state.  Does
    /// nothing unless the game is running.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::Memory`] if the snake ate and could not grow.  In
    /// that case nothing changes and the game is still running.
    pub fn tick(&mut self) -> Result<GameState, SnakeError> {
        if self.state != GameState::Running {
            return Ok(self.state);
        }
        let (Some(field), Some(snake)) = (self.field.as_mut(), self.snake.as_mut()) else {
            return Ok(self.state);
        };
        let direction = self.commands.peek(self.direction);
        let head = snake.head();
        let target = field.translate(head, 1, direction);
        // The tail moves out of the way before the head moves in, except when
        // eating, and the tail's cell never holds food.
        let target_state = field.get(target);
        let available =
            target_state.is_some_and(|st| st.is_available() || target == snake.tail());
        if !available {
            self.direction = self.commands.pop(self.direction);
            self.state = GameState::Lost;
            log::info!(
                "Snake of size {} crashed moving {direction:?} from ({}, {})",
                snake.len(),
                head.x,
                head.y
            );
            return Ok(self.state);
        }
        let ate = target_state == Some(CellState::Food);
        if ate {
            snake.reserve_segment()?;
        }
        self.direction = self.commands.pop(self.direction);
        if let Some(vacated) = snake.slither(target, ate) {
            field.set(vacated, CellState::Empty);
        }
        if snake.len() > 1 {
            field.set(head, CellState::SnakeBody);
        }
        field.set(target, CellState::SnakeHead);
        if ate {
            if field.empty_count() > 0 {
                field.place_food(&mut self.rng)?;
            } else {
                self.state = GameState::Won;
                log::info!("Snake filled the field at size {}", snake.len());
            }
        }
        Ok(self.state)
    }
}

impl<R> Session<R> {
    /// Queue a turn.  Turns are ignored unless the game is running, and turns
    /// that would keep going straight or reverse the snake are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::Memory`] if the turn could not be queued.  The
    /// queue is left unchanged.
    pub fn receive_command(&mut self, direction: Direction) -> Result<(), SnakeError> {
        if self.state != GameState::Running {
            return Ok(());
        }
        if !self.commands.push(direction, self.direction)? {
            log::trace!("Dropped {direction:?} command");
        }
        Ok(())
    }

    /// Pause a running game.  Returns `true` if the game was running.
    pub fn pause(&mut self) -> bool {
        if self.state == GameState::Running {
            self.state = GameState::Paused;
            true
        } else {
            false
        }
    }

    /// Resume a paused game.  Returns `true` if the game was paused.
    pub fn resume(&mut self) -> bool {
        if self.state == GameState::Paused {
            self.state = GameState::Running;
            true
        } else {
            false
        }
    }

    /// Pause a running game or resume a paused one; otherwise do nothing.
    pub fn toggle_pause(&mut self) {
        if !self.pause() {
            self.resume();
        }
    }

    /// Discard the field, the snake, and any queued turns, leaving the session
    /// idle.  The preferences are kept.
    pub fn teardown(&mut self) {
        if self.field.is_some() {
            log::debug!("Tearing down session");
        }
        self.field = None;
        self.snake = None;
        self.commands.clear();
        self.direction = consts::INITIAL_DIRECTION;
        self.state = GameState::Idle;
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// The preferences the session was last initialized with
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }

    /// Speed of the snake, in cells per second
    pub fn speed(&self) -> u32 {
        self.config.speed
    }

    pub fn wrap_walls(&self) -> bool {
        self.config.wrap_walls
    }

    /// Time between two calls to [`Session::tick()`]
    pub fn tick_period(&self) -> Duration {
        // The speed was validated as nonzero by `initialize()`.
        self.config.tick_period().unwrap_or_default()
    }

    /// Length of the snake, or zero if there is none
    pub fn snake_size(&self) -> usize {
        self.snake.as_ref().map_or(0, Snake::len)
    }

    /// The direction the snake last moved in (or will first move in)
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of queued turns
    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// State of the cell at `pos`, or `None` if `pos` is outside the field or
    /// the session has been torn down
    pub fn cell(&self, pos: Position) -> Option<CellState> {
        self.field.as_ref()?.get(pos)
    }

    pub fn field(&self) -> Option<&Field> {
        self.field.as_ref()
    }

    pub fn snake(&self) -> Option<&Snake> {
        self.snake.as_ref()
    }
}
