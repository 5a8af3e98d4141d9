use crate::board::{Board, Point};

mod blocks;

pub use blocks::BlockRenderer;

pub trait Renderer {
    fn render(&self, board: &Board) -> String;
}

/// One glyph per cell, after `rows` blank lines so consecutive frames scroll
/// the previous one away.
#[derive(Clone, Copy, Debug, Default)]
pub struct DotRenderer;

impl Renderer for DotRenderer {
    fn render(&self, board: &Board) -> String {
        let mut out = "\n".repeat(board.rows());
        for row in 0..board.rows() {
            for column in 0..board.columns() {
                let p = Point::new(row as i64, column as i64);
                let alive = board.is_alive(p).unwrap_or(false);
                out.push(if alive { '●' } else { '○' });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_dots() -> Result<()> {
        let mut b = Board::new(2, 3)?;
        b.set(Point::new(0, 0), true)?;
        b.set(Point::new(1, 2), true)?;
        assert_eq!(DotRenderer.render(&b), "\n\n●○○\n○○●\n");
        Ok(())
    }
}
