//! Source ASCII art for the swirl vortex.
//!
//! Art is parsed once into a rectangular [`SourceArt`] grid and then
//! resampled into a [`ScaledArt`] whenever the terminal changes size.

use std::fmt;

/// Large vortex, roughly 106 columns by 52 rows.
pub const VORTEX_ART: &str = include_str!("vortex.txt");

/// Errors raised while loading source art.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtError {
    /// The text contained no non-empty rows.
    Empty,
}

impl fmt::Display for ArtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtError::Empty => write!(f, "source art has no rows"),
        }
    }
}

impl std::error::Error for ArtError {}

/// Immutable rectangular grid of art characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArt {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl SourceArt {
    /// Parse art text. Empty lines are dropped and ragged rows are padded
    /// with spaces to the widest row.
    pub fn parse(text: &str) -> Result<Self, ArtError> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect())
            .collect();

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if rows.is_empty() || width == 0 {
            return Err(ArtError::Empty);
        }

        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            let pad = width - row.len();
            cells.extend(row);
            cells.extend(std::iter::repeat_n(' ', pad));
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// The built-in vortex art.
    pub fn vortex() -> Result<Self, ArtError> {
        Self::parse(VORTEX_ART)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }
}

/// Source art resampled to fit the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaledArt {
    width: u16,
    height: u16,
    cells: Vec<char>,
}

impl ScaledArt {
    /// Scale `art` with nearest-neighbour sampling so it fills as much of a
    /// `cols` x `rows` area as possible.
    ///
    /// `aspect` is the width:height ratio of a character cell; heights are
    /// multiplied by it so round shapes in the art stay round on screen.
    pub fn fit(art: &SourceArt, cols: u16, rows: u16, aspect: f32) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let art_ratio = art.height() as f32 / art.width() as f32;
        let squash = (art_ratio * aspect).max(f32::EPSILON);

        let mut target_w = cols as f32;
        let mut target_h = (target_w * squash).floor();
        if target_h > rows as f32 {
            target_h = rows as f32;
            target_w = (target_h / squash).floor();
        }
        let width = (target_w as u16).clamp(1, cols);
        let height = (target_h as u16).clamp(1, rows);

        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            let sy = resample(y, height, art.height());
            for x in 0..width {
                let sx = resample(x, width, art.width());
                cells.push(art.get(sx, sy).unwrap_or(' '));
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width as usize + x as usize])
    }
}

/// Map target index `i` of `target` cells onto a source of `source` cells.
fn resample(i: u16, target: u16, source: usize) -> usize {
    let span = target.saturating_sub(1).max(1) as f32;
    let s = (i as f32 / span * (source - 1) as f32).round() as usize;
    s.min(source - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_ragged_rows() {
        let art = SourceArt::parse("@@@\n@\n\n@@").unwrap();
        assert_eq!(art.width(), 3);
        assert_eq!(art.height(), 3);
        assert_eq!(art.get(2, 1), Some(' '));
        assert_eq!(art.get(1, 2), Some('@'));
        assert_eq!(art.get(3, 0), None);
    }

    #[test]
    fn empty_art_is_rejected() {
        assert_eq!(SourceArt::parse(""), Err(ArtError::Empty));
        assert_eq!(SourceArt::parse("\n\n\r\n"), Err(ArtError::Empty));
    }

    #[test]
    fn vortex_art_is_rectangular() {
        let art = SourceArt::vortex().unwrap();
        assert_eq!(art.height(), 52);
        assert_eq!(art.width(), 108);
        for y in 0..art.height() {
            assert!(art.get(art.width() - 1, y).is_some());
        }
    }

    #[test]
    fn fit_stays_inside_terminal() {
        let art = SourceArt::vortex().unwrap();
        for (cols, rows) in [(80, 24), (200, 60), (20, 80), (1, 1), (0, 0)] {
            let scaled = ScaledArt::fit(&art, cols, rows, 0.5);
            assert!(scaled.width() >= 1 && scaled.width() <= cols.max(1));
            assert!(scaled.height() >= 1 && scaled.height() <= rows.max(1));
        }
    }

    #[test]
    fn fit_corrects_aspect() {
        let art = SourceArt::parse("@@@@\n@@@@\n@@@@\n@@@@").unwrap();
        let scaled = ScaledArt::fit(&art, 40, 40, 0.5);
        assert_eq!(scaled.width(), 40);
        assert_eq!(scaled.height(), 20);

        // Height bound: 10 rows available, width shrinks to match.
        let scaled = ScaledArt::fit(&art, 40, 10, 0.5);
        assert_eq!(scaled.height(), 10);
        assert_eq!(scaled.width(), 20);
    }

    #[test]
    fn fit_samples_corners() {
        let art = SourceArt::parse("ab\ncd").unwrap();
        let scaled = ScaledArt::fit(&art, 4, 4, 1.0);
        assert_eq!(scaled.get(0, 0), Some('a'));
        assert_eq!(scaled.get(3, 0), Some('b'));
        assert_eq!(scaled.get(0, 3), Some('c'));
        assert_eq!(scaled.get(3, 3), Some('d'));
    }
}
