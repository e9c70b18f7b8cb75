use super::direction::Direction;
use super::field::{CellState, Field, Position};
use crate::error::SnakeError;
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// The body is stored from tail to head; the head is always the last
/// element, and no two segments share a position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Lay out a snake of `size` segments with its head at `head`, its body
    /// trailing behind it opposite to `direction`, and mark its cells on
    /// `field`.
    ///
    /// The caller must have checked that `size` is nonzero and that every
    /// segment lands inside `field`.  On failure, `field` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::Memory`] if the body could not be allocated.
    pub(crate) fn build(
        field: &mut Field,
        head: Position,
        direction: Direction,
        size: u32,
    ) -> Result<Snake, SnakeError> {
        let mut body = VecDeque::new();
        body.try_reserve_exact(usize::try_from(size).map_err(|_| SnakeError::Memory)?)?;
        let backwards = direction.reverse();
        for steps in (1..size).rev() {
            let pos = head.offset(backwards, steps);
            field.set(pos, CellState::SnakeBody);
            body.push_back(pos);
        }
        field.set(head, CellState::SnakeHead);
        body.push_back(head);
        Ok(Snake { body })
    }

    /// Return the position of the snake's head
    pub fn head(&self) -> Position {
        self.body.back().copied().unwrap_or_default()
    }

    /// Return the position of the end of the snake's tail
    pub fn tail(&self) -> Position {
        self.body.front().copied().unwrap_or_default()
    }

    /// Number of segments, head included
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterate over the positions of the snake's segments, from the tail to
    /// the head
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Make room for one more segment so that a following `slither()` with
    /// `grow = true` cannot fail.
    pub(crate) fn reserve_segment(&mut self) -> Result<(), SnakeError> {
        self.body.try_reserve(1)?;
        Ok(())
    }

    /// Move the head to `head`.  Unless `grow` is true, the tail segment is
    /// dropped and its former position is returned.
    ///
    /// Field bookkeeping is up to the caller.
    pub(crate) fn slither(&mut self, head: Position, grow: bool) -> Option<Position> {
        self.body.push_back(head);
        if grow {
            None
        } else {
            self.body.pop_front()
        }
    }

    #[cfg(test)]
    pub(crate) fn from_positions<I: IntoIterator<Item = Position>>(iter: I) -> Snake {
        Snake {
            body: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn build() {
        let mut field = Field::new(21, 15, false).unwrap();
        let snake = Snake::build(&mut field, Position::new(9, 7), Direction::Right, 5).unwrap();
        assert_eq!(
            snake.positions().collect::<Vec<_>>(),
            [
                Position::new(5, 7),
                Position::new(6, 7),
                Position::new(7, 7),
                Position::new(8, 7),
                Position::new(9, 7),
            ]
        );
        assert_eq!(snake.head(), Position::new(9, 7));
        assert_eq!(snake.tail(), Position::new(5, 7));
        assert_eq!(snake.len(), 5);
        assert_eq!(field.get(Position::new(9, 7)), Some(CellState::SnakeHead));
        for x in 5..9 {
            assert_eq!(field.get(Position::new(x, 7)), Some(CellState::SnakeBody));
        }
        assert_eq!(field.empty_count(), 310);
    }

    #[test]
    fn build_single_segment() {
        let mut field = Field::new(3, 3, false).unwrap();
        let snake = Snake::build(&mut field, Position::new(1, 1), Direction::Up, 1).unwrap();
        assert_eq!(snake.head(), snake.tail());
        assert_eq!(snake.len(), 1);
        assert_eq!(field.get(Position::new(1, 1)), Some(CellState::SnakeHead));
        assert_eq!(field.empty_count(), 8);
    }

    #[test]
    fn slither() {
        let mut snake = Snake::from_positions([
            Position::new(1, 1),
            Position::new(2, 1),
            Position::new(3, 1),
        ]);
        assert_eq!(
            snake.slither(Position::new(3, 2), false),
            Some(Position::new(1, 1))
        );
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(3, 2));
        assert_eq!(snake.tail(), Position::new(2, 1));
        snake.reserve_segment().unwrap();
        assert_eq!(snake.slither(Position::new(3, 3), true), None);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(2, 1));
        assert_eq!(snake.head(), Position::new(3, 3));
    }
}
