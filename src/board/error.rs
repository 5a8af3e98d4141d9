use thiserror::Error;

use super::{BitsError, Point};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid point {point} for a board of {rows} rows and {columns} columns")]
    InvalidPoint {
        rows: usize,
        columns: usize,
        point: Point,
        #[source]
        origin: Option<BitsError>,
    },
    #[error("cannot create board")]
    NewBoard(#[source] BitsError),
    #[error("data is too small ({len} < {rows})")]
    DataTooSmall { len: usize, rows: usize },
}

impl BoardError {
    pub fn point(&self) -> Option<Point> {
        match self {
            BoardError::InvalidPoint { point, .. } => Some(*point),
            _ => None,
        }
    }
}
