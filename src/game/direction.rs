use enum_map::Enum;

/// A direction of movement on the field.
///
/// The variants are in counterclockwise order, so that turning around is a
/// rotation by two and a turn to either side is a rotation by one.  `Up`
/// increases the y coordinate.
#[derive(Clone, Copy, Debug, Enum, Eq, Hash, PartialEq)]
pub enum Direction {
    Right,
    Up,
    Left,
    Down,
}

impl Direction {
    pub fn iter() -> impl Iterator<Item = Direction> {
        (0..Self::LENGTH).map(Self::from_usize)
    }

    pub fn reverse(self) -> Direction {
        Direction::from_usize((self.into_usize() + 2) % Self::LENGTH)
    }

    /// Returns `true` if a snake moving in `self` can turn to move in
    /// `other`, i.e., the two directions are neither equal nor opposite.
    pub fn is_perpendicular(self, other: Direction) -> bool {
        (self.into_usize() ^ other.into_usize()) & 1 == 1
    }

    /// Unit step `(dx, dy)` for one cell of movement
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Right => (1, 0),
            Direction::Up => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Down => (0, -1),
        }
    }
}
