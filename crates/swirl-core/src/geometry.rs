//! Terminal geometry and the values derived from it.

/// Size of the drawing area plus its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub cols: u16,
    pub rows: u16,
    /// Center column (`cols / 2`, integer halved).
    pub cx: f32,
    /// Center row (`rows / 2`, integer halved).
    pub cy: f32,
}

impl Geometry {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cx: (cols / 2) as f32,
            cy: (rows / 2) as f32,
        }
    }

    /// Largest radius of a circle that stays on screen once rows are squashed
    /// by `aspect`, minus `margin` cells. Never less than one.
    pub fn fitted_radius(&self, aspect: f32, margin: f32) -> f32 {
        let vertical = if aspect > 0.0 {
            (self.cy / aspect).floor()
        } else {
            self.cx
        };
        (self.cx.min(vertical) - margin).max(1.0)
    }
}
