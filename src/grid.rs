use crate::error::{Error, Result};
use std::fmt;

/// Dimensions of a board. Both sides are at least one block long.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidGrid { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, Position { x, y }: Position) -> bool {
        x < self.width && y < self.height
    }

    pub(crate) fn check(&self, position: Position) -> Result<Position> {
        if self.contains(position) {
            Ok(position)
        } else {
            Err(Error::OutOfBounds(position))
        }
    }

    // blocks are stored column by column so that iteration runs over x, then y
    pub(crate) fn index_of(&self, Position { x, y }: Position) -> usize {
        x * self.height + y
    }

    /// Every position of the grid, in storage order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| Position::new(x, y)))
    }

    /// The up to eight positions sharing an edge or a corner with `center`,
    /// clipped at the borders of the grid.
    pub fn neighbors(&self, center: Position) -> impl Iterator<Item = Position> {
        adjacent(center, self.width, self.height)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            width: 9,
            height: 9,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Increment {
    NegOne,
    Zero,
    One,
}

impl Increment {
    fn offset(&self, value: usize) -> Option<usize> {
        match *self {
            Self::NegOne => value.checked_sub(1),
            Self::Zero => Some(value),
            Self::One => value.checked_add(1),
        }
    }
}

fn adjacent(
    Position { x, y }: Position,
    width: usize,
    height: usize,
) -> impl Iterator<Item = Position> {
    const INCREMENTS: [Increment; 3] = [Increment::NegOne, Increment::Zero, Increment::One];

    INCREMENTS
        .iter()
        .copied()
        .flat_map(|x_incr| std::iter::repeat(x_incr).zip(INCREMENTS))
        .filter_map(move |(x_incr, y_incr)| match (x_incr, y_incr) {
            (Increment::Zero, Increment::Zero) => None,
            _ => {
                let x = x_incr.offset(x).filter(|&x| x < width)?;
                let y = y_incr.offset(y).filter(|&y| y < height)?;
                Some(Position::new(x, y))
            }
        })
}
