use std::{fmt::Display, ops::Add};

const NEIGHBOUR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Point {
    pub row: i64,
    pub column: i64,
}

impl Point {
    pub const fn new(row: i64, column: i64) -> Self {
        Self { row, column }
    }

    /// The 8 Moore neighbours of this point. Some of them may lie outside a
    /// given board, callers filter them.
    pub fn neighbours(self) -> [Point; 8] {
        NEIGHBOUR_OFFSETS.map(|offset| self + Point::from(offset))
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self.row += rhs.row;
        self.column += rhs.column;
        self
    }
}

impl<I1, I2> From<(I1, I2)> for Point
where
    I1: Into<i64>,
    I2: Into<i64>,
{
    fn from((row, column): (I1, I2)) -> Self {
        Self {
            row: row.into(),
            column: column.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbours() {
        let pts = Point::new(0, 0).neighbours();
        assert_eq!(pts.len(), 8);
        assert_eq!(pts[0], Point::new(-1, -1));
        assert_eq!(pts[7], Point::new(1, 1));
        assert!(!pts.contains(&Point::new(0, 0)));

        let mut sorted = pts.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 8);
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::from((3, -2)).to_string(), "(3, -2)");
    }
}
