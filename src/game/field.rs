use super::direction::Direction;
use crate::error::SnakeError;
use rand::Rng;

/// Number of cells stored in each byte of a [`Field`]'s buffer
const CELLS_PER_BYTE: usize = 4;

/// Bits per cell
const CELL_BITS: usize = 2;

const CELL_MASK: u8 = 0b11;

/// A cell on the field, counted from the bottom-left corner.
///
/// Coordinates are signed so that a move off the edge of a non-wrapping field
/// is still representable; use [`Field::is_inside()`] to find out whether a
/// position is on the field.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub const fn new(x: i16, y: i16) -> Position {
        Position { x, y }
    }

    /// Return the position `steps` cells away in `direction`, ignoring any
    /// field boundaries.  Results too far off the field saturate.
    pub fn offset(self, direction: Direction, steps: u32) -> Position {
        let (dx, dy) = direction.delta();
        Position {
            x: saturate(i64::from(self.x) + i64::from(dx) * i64::from(steps)),
            y: saturate(i64::from(self.y) + i64::from(dy) * i64::from(steps)),
        }
    }
}

fn saturate(n: i64) -> i16 {
    i16::try_from(n).unwrap_or(if n < 0 { i16::MIN } else { i16::MAX })
}

/// What occupies a cell
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum CellState {
    #[default]
    Empty = 0,
    Food = 1,
    SnakeHead = 2,
    SnakeBody = 3,
}

impl CellState {
    /// Returns `true` if the snake's head may move into a cell in this state
    pub fn is_available(self) -> bool {
        matches!(self, CellState::Empty | CellState::Food)
    }

    fn from_bits(bits: u8) -> CellState {
        match bits & CELL_MASK {
            0 => CellState::Empty,
            1 => CellState::Food,
            2 => CellState::SnakeHead,
            _ => CellState::SnakeBody,
        }
    }
}

/// The playing field: a grid of cells packed two bits apiece, plus a running
/// count of the empty ones.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    width: u8,
    height: u8,
    wrap: bool,
    buffer: Vec<u8>,
    empty: usize,
}

impl Field {
    /// Create a field of all-empty cells.
    ///
    /// The dimensions must already have been validated as nonzero.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::Memory`] if the cell buffer could not be
    /// allocated.
    pub(crate) fn new(width: u8, height: u8, wrap: bool) -> Result<Field, SnakeError> {
        let cells = usize::from(width) * usize::from(height);
        let bytes = cells.div_ceil(CELLS_PER_BYTE);
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(bytes)?;
        buffer.resize(bytes, 0);
        Ok(Field {
            width,
            height,
            wrap,
            buffer,
            empty: cells,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether movement off one edge re-enters on the opposite edge
    pub fn wraps(&self) -> bool {
        self.wrap
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of cells currently in the [`CellState::Empty`] state
    pub fn empty_count(&self) -> usize {
        self.empty
    }

    pub fn is_inside(&self, pos: Position) -> bool {
        (0..i16::from(self.width)).contains(&pos.x) && (0..i16::from(self.height)).contains(&pos.y)
    }

    /// Return the state of the cell at `pos`, or `None` if `pos` is outside
    /// the field
    pub fn get(&self, pos: Position) -> Option<CellState> {
        let (byte, shift) = locate(self.index(pos)?);
        Some(CellState::from_bits(*self.buffer.get(byte)? >> shift))
    }

    /// Overwrite the state of the cell at `pos`, keeping the empty-cell count
    /// in step.  Returns the previous state, or `None` (and does nothing) if
    /// `pos` is outside the field.
    pub(crate) fn set(&mut self, pos: Position, state: CellState) -> Option<CellState> {
        let (byte, shift) = locate(self.index(pos)?);
        let b = self.buffer.get_mut(byte)?;
        let previous = CellState::from_bits(*b >> shift);
        *b = (*b & !(CELL_MASK << shift)) | ((state as u8) << shift);
        if previous == CellState::Empty {
            self.empty -= 1;
        }
        if state == CellState::Empty {
            self.empty += 1;
        }
        Some(previous)
    }

    /// Return the position reached by moving `steps` cells from `pos` in
    /// `direction`.  On a wrapping field the result is always inside the
    /// field; otherwise it may not be.
    pub fn translate(&self, pos: Position, steps: u32, direction: Direction) -> Position {
        if self.wrap {
            let (dx, dy) = direction.delta();
            Position {
                x: wrap_coord(pos.x, i64::from(dx) * i64::from(steps), self.width),
                y: wrap_coord(pos.y, i64::from(dy) * i64::from(steps), self.height),
            }
        } else {
            pos.offset(direction, steps)
        }
    }

    /// Iterate over every position on the field in row-major order, starting
    /// at the origin
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = i16::from(self.width);
        (0..i16::from(self.height)).flat_map(move |y| (0..width).map(move |x| Position { x, y }))
    }

    /// Turn a uniformly-chosen empty cell into food and return its position.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::NoSpaceForFood`] if there are no empty cells.
    pub(crate) fn place_food<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Position, SnakeError> {
        if self.empty == 0 {
            return Err(SnakeError::NoSpaceForFood);
        }
        let target = rng.random_range(0..self.empty);
        let pos = self
            .positions()
            .filter(|&p| self.get(p) == Some(CellState::Empty))
            .nth(target)
            .ok_or(SnakeError::NoSpaceForFood)?;
        self.set(pos, CellState::Food);
        log::trace!("Placed food at ({}, {})", pos.x, pos.y);
        Ok(pos)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if !self.is_inside(pos) {
            return None;
        }
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        Some(y * usize::from(self.width) + x)
    }

    /// Count the empty cells the slow way
    #[cfg(test)]
    pub(crate) fn scan_empty(&self) -> usize {
        self.positions()
            .filter(|&p| self.get(p) == Some(CellState::Empty))
            .count()
    }
}

/// Return the byte offset and bit shift of the cell at `index`
fn locate(index: usize) -> (usize, usize) {
    (index / CELLS_PER_BYTE, CELL_BITS * (index % CELLS_PER_BYTE))
}

fn wrap_coord(coord: i16, delta: i64, extent: u8) -> i16 {
    saturate((i64::from(coord) + delta).rem_euclid(i64::from(extent)))
}
