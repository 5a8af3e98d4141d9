use crate::board::{Board, Point};

use super::Renderer;

// indexed by the 2x2 cell mask: 1 top left, 2 top right, 4 bottom left, 8 bottom right
const GLYPHS: [char; 16] = [
    ' ', '▘', '▝', '▀', '▖', '▌', '▞', '▛', '▗', '▚', '▐', '▜', '▄', '▙', '▟', '█',
];

/// Packs each 2x2 square of cells into one quadrant block character, so a
/// board takes half its size in both directions. Cells past the edge of an
/// odd sized board count as dead.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockRenderer;

impl BlockRenderer {
    pub fn glyphs(&self, board: &Board) -> Vec<(Point, char)> {
        (0..board.rows())
            .step_by(2)
            .flat_map(|y| {
                (0..board.columns()).step_by(2).map(move |x| {
                    let origin = Point::new(y as i64, x as i64);
                    let mask = [(0, 0), (0, 1), (1, 0), (1, 1)]
                        .into_iter()
                        .enumerate()
                        .filter(|(_, offset)| {
                            board
                                .is_alive(origin + Point::from(*offset))
                                .unwrap_or(false)
                        })
                        .fold(0, |mask, (bit, _)| mask | 1 << bit);
                    (origin, GLYPHS[mask])
                })
            })
            .collect()
    }
}

impl Renderer for BlockRenderer {
    fn render(&self, board: &Board) -> String {
        let width = board.columns().div_ceil(2);
        let mut out = String::new();
        for (i, (_, ch)) in self.glyphs(board).into_iter().enumerate() {
            out.push(ch);
            if (i + 1) % width == 0 {
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::*;
    use anyhow::Result;

    fn empty_board() -> Board {
        Board::new(4, 4).unwrap()
    }

    #[test]
    fn test_individual() -> Result<()> {
        let mut b = empty_board();
        b.set(Point::new(0, 0), true)?;
        assert_eq!(BlockRenderer.glyphs(&b).len(), 4);
        assert_eq!(BlockRenderer.glyphs(&b)[0].1, '▘');

        b.set(Point::new(1, 1), true)?;
        assert_eq!(BlockRenderer.glyphs(&b)[0].1, '▚');

        b.set(Point::new(0, 1), true)?;
        assert_eq!(BlockRenderer.glyphs(&b)[0].1, '▜');
        b.set(Point::new(0, 1), false)?;

        b.set(Point::new(1, 0), true)?;
        assert_eq!(BlockRenderer.glyphs(&b)[0].1, '▙');
        b.set(Point::new(1, 0), false)?;

        b.set(Point::new(2, 3), true)?;
        assert_eq!(BlockRenderer.glyphs(&b)[3], (Point::new(2, 2), '▝'));
        Ok(())
    }

    #[test]
    fn test_all_defined() -> Result<()> {
        let quadrant = (0..2).flat_map(|y| (0..2).map(move |x| Point::new(y, x)));
        let mut seen = vec![];
        for pts in quadrant.powerset() {
            let mut b = empty_board();
            for pt in &pts {
                b.set(*pt, true)?;
            }
            let ch = BlockRenderer.glyphs(&b)[0].1;
            if !pts.is_empty() {
                assert_ne!(ch, ' ', "defined char for point combo: {:?}", pts);
            } else {
                assert_eq!(ch, ' ');
            }
            seen.push(ch);
        }
        assert_eq!(seen.iter().unique().count(), 16);
        Ok(())
    }

    #[test]
    fn test_odd_board() -> Result<()> {
        let mut b = Board::new(3, 3)?;
        b.set(Point::new(2, 2), true)?;
        assert_eq!(BlockRenderer.render(&b), "  \n ▘\n");
        Ok(())
    }
}
