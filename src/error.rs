use std::collections::TryReserveError;
use thiserror::Error;

/// Errors reported by the simulation core
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum SnakeError {
    /// Growing the field buffer, the snake's body, or the command queue
    /// failed
    #[error("an error occurred while allocating memory")]
    Memory,
    #[error("field width and height must be between 1 and 127")]
    BadFieldSize,
    #[error("snake size must be greater than zero")]
    BadSnakeSize,
    #[error("snake doesn't fit into the field")]
    BadInitialPosition,
    #[error("the speed of the snake must be a positive integer")]
    BadSnakeSpeed,
    #[error("there is no empty space for the food")]
    NoSpaceForFood,
}

impl From<TryReserveError> for SnakeError {
    fn from(e: TryReserveError) -> SnakeError {
        log::warn!("Allocation failed: {e}");
        SnakeError::Memory
    }
}
