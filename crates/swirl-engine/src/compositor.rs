//! Frame compositor: owns the frame grid and serializes it for the terminal.
//!
//! Each frame is a full redraw. The output starts at the top-left corner,
//! walks the rows top to bottom and always ends with the colors and
//! attributes reset, so no frame can leak style into the next. Encoding only
//! appends to memory; writes that miss the grid are dropped by the rasterizer
//! before they get here.

use std::io;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use ratatui::style::Color;

use crate::grid::{Cell, FrameGrid};

/// Builds frames and encodes them into terminal commands.
#[derive(Debug)]
pub struct Compositor {
    grid: FrameGrid,
    out: Vec<u8>,
    batch_colors: bool,
}

impl Compositor {
    /// With `batch_colors`, runs of identically colored glyphs share a single
    /// color escape; otherwise every colored glyph is followed by a reset.
    pub fn new(batch_colors: bool) -> Self {
        Self {
            grid: FrameGrid::new(0, 0),
            out: Vec::with_capacity(64 * 1024),
            batch_colors,
        }
    }

    /// Start a new frame: size the grid to the terminal and blank it.
    pub fn begin(&mut self, cols: u16, rows: u16) -> &mut FrameGrid {
        self.grid.reset(cols, rows);
        &mut self.grid
    }

    pub fn grid(&self) -> &FrameGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut FrameGrid {
        &mut self.grid
    }

    /// Encode the current grid. The returned bytes are one full frame.
    pub fn encode(&mut self) -> io::Result<&[u8]> {
        self.out.clear();
        encode_frame_into(&self.grid, &mut self.out, self.batch_colors)?;
        Ok(&self.out)
    }
}

/// Encode a full-frame redraw of `grid` into `out`.
pub fn encode_frame_into(grid: &FrameGrid, out: &mut Vec<u8>, batch_colors: bool) -> io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;

    let mut active: Option<Color> = None;
    for row in 0..grid.rows() {
        if row > 0 {
            out.queue(cursor::MoveTo(0, row))?;
        }
        for cell in grid.row(row) {
            encode_cell(out, *cell, &mut active, batch_colors)?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn encode_cell(
    out: &mut Vec<u8>,
    cell: Cell,
    active: &mut Option<Color>,
    batch_colors: bool,
) -> io::Result<()> {
    if cell.is_blank() {
        out.queue(Print(' '))?;
        return Ok(());
    }

    match cell.color {
        Some(color) if batch_colors => {
            if *active != Some(color) {
                out.queue(SetForegroundColor(to_crossterm(color)))?;
                *active = Some(color);
            }
            out.queue(Print(cell.ch))?;
        }
        Some(color) => {
            out.queue(SetForegroundColor(to_crossterm(color)))?;
            out.queue(Print(cell.ch))?;
            out.queue(ResetColor)?;
        }
        None => {
            if active.take().is_some() {
                out.queue(ResetColor)?;
            }
            out.queue(Print(cell.ch))?;
        }
    }
    Ok(())
}

/// Convert a ratatui color to the crossterm color used on the wire.
pub fn to_crossterm(color: Color) -> style::Color {
    match color {
        Color::Reset => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::Gray => style::Color::Grey,
        Color::DarkGray => style::Color::DarkGrey,
        Color::LightRed => style::Color::Red,
        Color::LightGreen => style::Color::Green,
        Color::LightYellow => style::Color::Yellow,
        Color::LightBlue => style::Color::Blue,
        Color::LightMagenta => style::Color::Magenta,
        Color::LightCyan => style::Color::Cyan,
        Color::White => style::Color::White,
        Color::Rgb(r, g, b) => style::Color::Rgb { r, g, b },
        Color::Indexed(i) => style::Color::AnsiValue(i),
    }
}
