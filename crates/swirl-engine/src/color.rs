//! Color mapping from hue/depth scalars to terminal colors.

use ratatui::style::Color;
use swirl_core::{ColorMode, Rgb};

/// Convert HSV to RGB color.
///
/// `h` wraps into `[0, 1)`, `s` and `v` are clamped into `[0, 1]`.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let [r, g, b] = hsv_channels(h, s, v);
    Rgb::new(to_byte(r), to_byte(g), to_byte(b))
}

/// The unscaled HSV conversion, each channel in `[0, 1]`.
pub(crate) fn hsv_channels(h: f32, s: f32, v: f32) -> [f32; 3] {
    let h = if h.is_finite() { h.rem_euclid(1.0) } else { 0.0 };
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);

    if s == 0.0 {
        return [v, v, v];
    }

    let scaled = h * 6.0;
    let sector = scaled.floor();
    let f = scaled - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u8 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)]
}

fn to_byte(channel: f32) -> u8 {
    (channel * 255.0).round() as u8
}

/// Quantize one channel to a 6-level cube coordinate.
fn level(channel: u8) -> u8 {
    (channel as f32 / 255.0 * 5.0 + 0.5) as u8
}

/// Map an RGB color onto the 6x6x6 cube of the 256-color palette.
pub fn quantize(rgb: Rgb) -> u8 {
    16 + 36 * level(rgb.r) + 6 * level(rgb.g) + level(rgb.b)
}

/// RGB value of a cube palette entry (linear levels).
///
/// Indices outside the cube are clamped to it.
pub fn cube_rgb(index: u8) -> Rgb {
    let n = index.clamp(16, 231) - 16;
    Rgb::new((n / 36) * 51, ((n / 6) % 6) * 51, (n % 6) * 51)
}

/// Turns color scalars into terminal colors for one [`ColorMode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorMapper {
    mode: ColorMode,
}

impl ColorMapper {
    pub fn new(mode: ColorMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Color for a hue/saturation/value triple.
    pub fn map(&self, h: f32, s: f32, v: f32) -> Color {
        self.rgb(hsv_to_rgb(h, s, v))
    }

    /// Color for a fixed RGB value.
    pub fn rgb(&self, rgb: Rgb) -> Color {
        match self.mode {
            ColorMode::TrueColor => rgb.into(),
            ColorMode::Palette => Color::Indexed(quantize(rgb)),
        }
    }

    /// Color on the depth ramp running through the palette cube; `depth` is
    /// clamped into `[0, 1]`.
    pub fn depth(&self, depth: f32) -> Color {
        let depth = if depth.is_nan() { 0.0 } else { depth.clamp(0.0, 1.0) };
        let index = 16 + (depth * 215.0) as u8;
        match self.mode {
            ColorMode::TrueColor => cube_rgb(index).into(),
            ColorMode::Palette => Color::Indexed(index),
        }
    }
}
