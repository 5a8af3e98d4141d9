use std::fmt::Display;

use itertools::iproduct;

mod bits;
mod error;
mod point;

pub use bits::{BitMap, BitsError};
pub use error::BoardError;
pub use point::Point;

/// A rectangular Game of Life grid, one bit per cell in row-major order.
///
/// Only the row count is stored; the column count is derived from the bit
/// length. A board that has been handed to someone else is never mutated,
/// clone it instead.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    data: BitMap,
    rows: usize,
}

impl Board {
    /// An all-dead board.
    pub fn new(rows: usize, columns: usize) -> Result<Self, BoardError> {
        let cells = rows as u128 * columns as u128;
        let len = usize::try_from(cells)
            .map_err(|_| BoardError::NewBoard(BitsError::TooLarge { requested: cells }))?;
        let data = BitMap::new(len).map_err(BoardError::NewBoard)?;
        Ok(Board { data, rows })
    }

    /// Wraps caller supplied bits. Only `data.len() >= rows` is checked, the
    /// column count is whatever `data.len() / rows` comes out to.
    pub fn from_data(rows: usize, data: BitMap) -> Result<Self, BoardError> {
        if data.len() < rows {
            return Err(BoardError::DataTooSmall {
                len: data.len(),
                rows,
            });
        }
        Ok(Board { data, rows })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        if self.rows == 0 {
            return 0;
        }
        self.data.len() / self.rows
    }

    /// A copy of the raw bits, for encoding.
    pub fn data(&self) -> BitMap {
        self.data.clone()
    }

    pub fn alive(&self) -> usize {
        self.data.count_ones()
    }

    /// Every point of the board in row-major order. The iterator is cheap to
    /// clone and calling this again yields the same sequence.
    pub fn points(&self) -> impl Iterator<Item = Point> + Clone {
        iproduct!(0..self.rows(), 0..self.columns())
            .map(|(row, column)| Point::new(row as i64, column as i64))
    }

    fn is_valid_point(&self, p: Point) -> bool {
        let inside = |v: i64, bound: usize| usize::try_from(v).map_or(false, |v| v < bound);
        inside(p.row, self.rows()) && inside(p.column, self.columns())
    }

    fn invalid_point(&self, point: Point, origin: Option<BitsError>) -> BoardError {
        BoardError::InvalidPoint {
            rows: self.rows(),
            columns: self.columns(),
            point,
            origin,
        }
    }

    fn neighbours(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbours()
            .into_iter()
            .filter(move |n| self.is_valid_point(*n))
    }

    pub fn is_alive(&self, p: Point) -> Result<bool, BoardError> {
        if !self.is_valid_point(p) {
            return Err(self.invalid_point(p, None));
        }
        let index = p.row as usize * self.columns() + p.column as usize;
        self.data
            .is_set(index)
            .map_err(|err| self.invalid_point(p, Some(err)))
    }

    pub fn is_dead(&self, p: Point) -> Result<bool, BoardError> {
        self.is_alive(p).map(|alive| !alive)
    }

    /// Writes a single cell. Only the flat bit index is range checked, so a
    /// column past the edge lands on the next row as long as the bit exists.
    pub fn set(&mut self, p: Point, alive: bool) -> Result<(), BoardError> {
        let index = p
            .row
            .checked_mul(self.columns() as i64)
            .and_then(|i| i.checked_add(p.column))
            .and_then(|i| usize::try_from(i).ok())
            .unwrap_or(usize::MAX);
        self.data
            .set_val(index, alive)
            .map_err(|err| self.invalid_point(p, Some(err)))
    }

    fn count_living_neighbours(&self, p: Point) -> Result<usize, BoardError> {
        let mut count = 0;
        for n in self.neighbours(p) {
            if self.is_alive(n)? {
                count += 1;
            }
        }
        Ok(count)
    }

    pub fn is_alive_next_cycle(&self, p: Point) -> Result<bool, BoardError> {
        let alive = self.is_alive(p)?;
        let living = self.count_living_neighbours(p)?;
        let survives = alive && (living == 2 || living == 3);
        let born = !alive && living == 3;
        Ok(survives || born)
    }

    pub fn is_dead_next_cycle(&self, p: Point) -> Result<bool, BoardError> {
        self.is_alive_next_cycle(p).map(|alive| !alive)
    }

    /// Computes the next generation. Stops at the first failing cell.
    pub fn next_board(&self) -> Result<Board, BoardError> {
        let mut next = Board::new(self.rows(), self.columns())?;
        for p in self.points() {
            if self.is_alive_next_cycle(p)? {
                next.set(p, true)?;
            }
        }
        Ok(next)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let columns = self.columns();
        if columns == 0 {
            return Ok(());
        }
        let bits: Vec<bool> = self.data.iter().take(self.rows() * columns).collect();
        for row in bits.chunks(columns) {
            for bit in row {
                f.write_str(if *bit { "1" } else { "0" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
