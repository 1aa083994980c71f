//! Glyph sets used by the presets.

/// Density ramp from empty to solid, used by the curve and galaxy fields.
pub const DENSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Glyphs for the plain supernova flash.
pub const FLARE_GLYPHS: &[char] = &['*', '+', '.', 'o', '@', '%', '#'];

/// Glyphs for supernova ejecta and spiral threads.
pub const EJECTA_GLYPHS: &[char] = &['*', '+', '.', 'o', '@', '%', '#', '&'];

/// Glyphs for accretion disk particles.
pub const DISK_GLYPHS: &[char] = &['*', '+', 'o', '@'];
