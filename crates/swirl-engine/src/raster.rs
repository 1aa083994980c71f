//! Rasterization of model samples onto the frame grid.
//!
//! Continuous positions round to the nearest cell. Anything that lands
//! outside the grid is dropped, and when two samples hit the same cell the
//! later one wins.

use ratatui::style::Color;

use crate::grid::{Cell, FrameGrid};

/// Plot a sample at a continuous position.
pub fn plot(grid: &mut FrameGrid, x: f32, y: f32, ch: char, color: Option<Color>) {
    if !(x.is_finite() && y.is_finite()) {
        return;
    }
    plot_cell(grid, x.round() as i64, y.round() as i64, ch, color);
}

/// Plot a sample at a discrete cell.
pub fn plot_cell(grid: &mut FrameGrid, col: i64, row: i64, ch: char, color: Option<Color>) {
    if col < 0 || row < 0 || col >= i64::from(grid.cols()) || row >= i64::from(grid.rows()) {
        return;
    }
    grid.set(col as u16, row as u16, Cell::new(ch, color));
}

/// Blank a discrete cell.
pub fn erase_cell(grid: &mut FrameGrid, col: i64, row: i64) {
    plot_cell(grid, col, row, ' ', None);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_nearest_cell() {
        let mut grid = FrameGrid::new(4, 4);
        plot(&mut grid, 1.4, 2.6, '*', None);
        assert_eq!(grid.get(1, 3).map(|c| c.ch), Some('*'));
        plot(&mut grid, 2.5, 0.49, '+', None);
        assert_eq!(grid.get(3, 0).map(|c| c.ch), Some('+'));
    }

    #[test]
    fn boundary_values_never_touch_the_grid() {
        let (cols, rows) = (7u16, 5u16);
        let mut grid = FrameGrid::new(cols, rows);
        let w = cols as f32;
        let h = rows as f32;
        let points = [
            (-1.0, 0.0),
            (w, 0.0),
            (0.0, -1.0),
            (0.0, h),
            (-1.0, -1.0),
            (w, h),
            (-0.51, 2.0),
            (w - 0.5, 2.0),
            (f32::NAN, 1.0),
            (1.0, f32::INFINITY),
            (1e30, -1e30),
        ];
        for (x, y) in points {
            plot(&mut grid, x, y, '#', Some(Color::Red));
        }
        for (col, row) in [(-1, 0), (cols as i64, 0), (0, -1), (0, rows as i64)] {
            plot_cell(&mut grid, col, row, '#', Some(Color::Red));
        }
        assert_eq!(grid, FrameGrid::new(cols, rows));
    }

    #[test]
    fn edges_inside_the_grid_are_drawn() {
        let mut grid = FrameGrid::new(3, 2);
        plot(&mut grid, 0.0, 0.0, 'a', None);
        plot(&mut grid, 2.0, 1.0, 'b', None);
        assert_eq!(grid.row_text(0), "a  ");
        assert_eq!(grid.row_text(1), "  b");
    }

    #[test]
    fn last_write_wins() {
        let mut grid = FrameGrid::new(2, 1);
        plot(&mut grid, 0.2, 0.0, 'a', Some(Color::Red));
        plot(&mut grid, -0.2, 0.0, 'b', Some(Color::Blue));
        assert_eq!(grid.get(0, 0), Some(Cell::new('b', Some(Color::Blue))));
        erase_cell(&mut grid, 0, 0);
        assert_eq!(grid.get(0, 0), Some(Cell::BLANK));
    }
}
