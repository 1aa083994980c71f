//! Core types shared by the swirl crates.
//!
//! Holds the engine configuration (and the preset tables that fill it in),
//! the simulation clock, the terminal geometry and the basic color types.

mod clock;
mod color;
mod config;
mod geometry;
mod glyphs;
mod preset;

pub use clock::{SimClock, TimeStep, wrap_unit};
pub use color::{ColorMode, Rgb};
pub use config::{
    ArtParams, ArtSource, Batch, ConfigError, CurveParams, EngineConfig, FieldConfig, GalaxyParams,
    KindStyle, Launch, ModelConfig, ParticleConfig, ParticleKind, Ramp, SpawnRule,
};
pub use geometry::Geometry;
pub use glyphs::{DENSITY_RAMP, DISK_GLYPHS, EJECTA_GLYPHS, FLARE_GLYPHS};
pub use preset::{Preset, UnknownPreset};
