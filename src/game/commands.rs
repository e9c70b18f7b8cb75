use super::direction::Direction;
use crate::error::SnakeError;
use std::collections::VecDeque;

/// Turns requested by the player that have not been applied yet, oldest first
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct CommandQueue(VecDeque<Direction>);

impl CommandQueue {
    pub(crate) fn new() -> CommandQueue {
        CommandQueue::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Queue a turn to `direction` if it is perpendicular to the last queued
    /// turn or, if nothing is queued, to `applied`, the direction the snake
    /// last moved in.  Returns whether the turn was queued.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::Memory`] if the queue could not grow, in which
    /// case it is left unchanged.
    pub(crate) fn push(
        &mut self,
        direction: Direction,
        applied: Direction,
    ) -> Result<bool, SnakeError> {
        let reference = self.last().unwrap_or(applied);
        if !direction.is_perpendicular(reference) {
            return Ok(false);
        }
        self.0.try_reserve(1)?;
        self.0.push_back(direction);
        Ok(true)
    }

    /// The most recently queued turn
    pub(crate) fn last(&self) -> Option<Direction> {
        self.0.back().copied()
    }

    /// Return the direction the snake should move in next without consuming
    /// it
    pub(crate) fn peek(&self, applied: Direction) -> Direction {
        self.0.front().copied().unwrap_or(applied)
    }

    /// Remove and return the oldest queued turn, or return `applied` if the
    /// queue is empty
    pub(crate) fn pop(&mut self, applied: Direction) -> Direction {
        self.0.pop_front().unwrap_or(applied)
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Direction::Right, false)]
    #[case(Direction::Left, false)]
    #[case(Direction::Up, true)]
    #[case(Direction::Down, true)]
    fn push_against_applied(#[case] d: Direction, #[case] queued: bool) {
        let mut queue = CommandQueue::new();
        assert_eq!(queue.push(d, Direction::Right), Ok(queued));
        assert_eq!(queue.len(), usize::from(queued));
    }

    #[test]
    fn reference_is_last_queued() {
        let mut queue = CommandQueue::new();
        assert_eq!(queue.push(Direction::Up, Direction::Right), Ok(true));
        assert_eq!(queue.push(Direction::Up, Direction::Right), Ok(false));
        assert_eq!(queue.push(Direction::Down, Direction::Right), Ok(false));
        assert_eq!(queue.push(Direction::Left, Direction::Right), Ok(true));
        assert_eq!(queue.push(Direction::Down, Direction::Right), Ok(true));
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn pop_in_order() {
        let mut queue = CommandQueue::new();
        queue.push(Direction::Up, Direction::Right).unwrap();
        queue.push(Direction::Left, Direction::Right).unwrap();
        assert_eq!(queue.peek(Direction::Right), Direction::Up);
        assert_eq!(queue.pop(Direction::Right), Direction::Up);
        assert_eq!(queue.pop(Direction::Up), Direction::Left);
        assert_eq!(queue.peek(Direction::Left), Direction::Left);
        assert_eq!(queue.pop(Direction::Left), Direction::Left);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn clear() {
        let mut queue = CommandQueue::new();
        queue.push(Direction::Down, Direction::Left).unwrap();
        queue.clear();
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.pop(Direction::Left), Direction::Left);
    }
}
