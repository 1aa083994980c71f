//! Frame grid of (glyph, color) cells.

use ratatui::style::Color;

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Option<Color>,
}

impl Cell {
    /// Nothing drawn: a space without color.
    pub const BLANK: Cell = Cell { ch: ' ', color: None };

    /// A glyph in the given color. Spaces are never colored.
    pub fn new(ch: char, color: Option<Color>) -> Self {
        if ch == ' ' {
            Self::BLANK
        } else {
            Self { ch, color }
        }
    }

    pub fn is_blank(&self) -> bool {
        self.ch == ' '
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// 2D grid sized to the terminal, rebuilt from scratch every frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameGrid {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl FrameGrid {
    pub fn new(cols: u16, rows: u16) -> Self {
        let len = cols as usize * rows as usize;
        Self {
            cols,
            rows,
            cells: vec![Cell::BLANK; len],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Resize and blank the grid, keeping the allocation when possible.
    pub fn reset(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        let len = cols as usize * rows as usize;
        self.cells.clear();
        self.cells.resize(len, Cell::BLANK);
    }

    #[inline]
    fn idx(&self, col: u16, row: u16) -> Option<usize> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    pub fn get(&self, col: u16, row: u16) -> Option<Cell> {
        self.idx(col, row).map(|i| self.cells[i])
    }

    /// Overwrite a cell. Out-of-range writes are ignored.
    pub fn set(&mut self, col: u16, row: u16, cell: Cell) {
        if let Some(i) = self.idx(col, row) {
            self.cells[i] = cell;
        }
    }

    /// Cells of one row, left to right.
    pub fn row(&self, row: u16) -> &[Cell] {
        if row >= self.rows {
            return &[];
        }
        let start = row as usize * self.cols as usize;
        &self.cells[start..start + self.cols as usize]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Text of one row, handy for assertions.
    pub fn row_text(&self, row: u16) -> String {
        self.row(row).iter().map(|cell| cell.ch).collect()
    }
}
