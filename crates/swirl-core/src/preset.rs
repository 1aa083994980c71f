//! Built-in animation presets.
//!
//! Each preset is a complete [`EngineConfig`]; they only differ in data.

use std::fmt;
use std::str::FromStr;

use crate::{
    ArtParams, ArtSource, Batch, ColorMode, CurveParams, DENSITY_RAMP, DISK_GLYPHS,
    EJECTA_GLYPHS, EngineConfig, FLARE_GLYPHS, FieldConfig, GalaxyParams, KindStyle, Launch,
    ModelConfig, ParticleConfig, ParticleKind, Ramp, Rgb, SpawnRule, TimeStep,
};

const PHI: f32 = 1.618_034;

/// Frame rate of the scripts that slept 30ms between frames.
const FAST_FPS: f32 = 1.0 / 0.03;

const RED: Rgb = Rgb::new(255, 85, 85);
const YELLOW: Rgb = Rgb::new(255, 255, 85);
const WHITE: Rgb = Rgb::new(255, 255, 255);
const BLUE: Rgb = Rgb::new(85, 85, 255);
const MAGENTA: Rgb = Rgb::new(255, 85, 255);
const CYAN: Rgb = Rgb::new(85, 255, 255);
const SHADOW: Rgb = Rgb::new(85, 85, 85);

/// Named animations selectable from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Preset {
    /// Tie-dye vortex spun out of embedded ASCII art.
    #[default]
    Vortex,
    /// Archimedean spiral rotating counter-clockwise.
    Spiral,
    /// Golden-ratio spiral.
    Golden,
    /// Golden spiral endlessly expanding outward.
    Outward,
    /// Four-armed spiral galaxy with differential rotation.
    MilkyWay,
    /// A single expanding supernova flash.
    Supernova,
    /// Dense psychedelic plasma cloud with remnant dust.
    Plasma,
    /// Supernova remnant with dark globules and spiral threads.
    Remnant,
    /// Accretion disk settling into rotation around a black hole.
    BlackHole,
}

impl Preset {
    pub const ALL: [Preset; 9] = [
        Preset::Vortex,
        Preset::Spiral,
        Preset::Golden,
        Preset::Outward,
        Preset::MilkyWay,
        Preset::Supernova,
        Preset::Plasma,
        Preset::Remnant,
        Preset::BlackHole,
    ];

    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Vortex => "vortex",
            Preset::Spiral => "spiral",
            Preset::Golden => "golden",
            Preset::Outward => "outward",
            Preset::MilkyWay => "milkyway",
            Preset::Supernova => "supernova",
            Preset::Plasma => "plasma",
            Preset::Remnant => "remnant",
            Preset::BlackHole => "blackhole",
        }
    }

    /// Build the engine configuration for this preset.
    pub fn config(self, color_mode: ColorMode) -> EngineConfig {
        let (fps, time_step, vertical_aspect, model) = match self {
            Preset::Vortex => (20.0, TimeStep::Measured, 0.5, vortex()),
            Preset::Spiral => (
                FAST_FPS,
                TimeStep::Fixed,
                0.55,
                curve(30, 600, 1.0, 0.0, true),
            ),
            Preset::Golden => (
                FAST_FPS,
                TimeStep::Fixed,
                0.55,
                curve(20, 200, PHI, 0.0, false),
            ),
            Preset::Outward => (
                FAST_FPS,
                TimeStep::Fixed,
                0.55,
                curve(30, 200, PHI, 0.005, false),
            ),
            Preset::MilkyWay => (20.0, TimeStep::Fixed, 0.25, milky_way()),
            Preset::Supernova => (FAST_FPS, TimeStep::Fixed, 1.0, supernova()),
            Preset::Plasma => (FAST_FPS, TimeStep::Fixed, 1.0, plasma()),
            Preset::Remnant => (FAST_FPS, TimeStep::Fixed, 1.0, remnant()),
            Preset::BlackHole => (FAST_FPS, TimeStep::Measured, 1.0, black_hole()),
        };

        EngineConfig {
            fps,
            time_step,
            color_mode,
            vertical_aspect,
            batch_colors: true,
            model,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown preset name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPreset(pub String);

impl fmt::Display for UnknownPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
        write!(
            f,
            "unknown preset '{}' (expected one of: {})",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for UnknownPreset {}

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name() == wanted)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

fn vortex() -> ModelConfig {
    ModelConfig::Field(FieldConfig::Art(ArtParams {
        source: ArtSource::Vortex,
        swirl_speed: 0.06,
        twist: 1.2,
        outward_speed: 0.25,
        wobble_amplitude: 0.2,
        wobble_rate: 0.8,
        wobble_ripple: 10.0,
        hue_drift: 0.08,
        hue_radial: 2.5,
    }))
}

fn curve(
    turns: u32,
    points_per_turn: u32,
    angle_scale: f32,
    expansion_speed: f32,
    color_by_index: bool,
) -> ModelConfig {
    ModelConfig::Field(FieldConfig::Curve(CurveParams {
        turns,
        points_per_turn,
        angle_scale,
        phase_speed: -0.05,
        expansion_speed,
        color_by_index,
        ramp: DENSITY_RAMP.to_vec(),
    }))
}

fn milky_way() -> ModelConfig {
    ModelConfig::Field(FieldConfig::Galaxy(GalaxyParams {
        stars: 4000,
        arms: 4,
        arm_spread: 0.2,
        arm_turns: 4.0,
        core_share: 0.2,
        core_fraction: 0.1,
        hole_fraction: 0.02,
        core_speed: 0.08,
        outer_speed: 0.02,
        direction: 1.0,
        depth_scatter: 0.05,
        flicker: 0.02,
        ramp: DENSITY_RAMP.to_vec(),
    }))
}

fn style(
    kind: ParticleKind,
    glyphs: &[char],
    colors: &[Rgb],
    lifetime: std::ops::RangeInclusive<i32>,
) -> KindStyle {
    KindStyle {
        kind,
        glyphs: glyphs.to_vec(),
        colors: colors.to_vec(),
        lifetime,
    }
}

fn batch(kind: ParticleKind, count: std::ops::RangeInclusive<u32>, launch: Launch) -> Batch {
    Batch {
        kind,
        count,
        launch,
    }
}

fn spawn(probability: f64, batch: Batch) -> SpawnRule {
    SpawnRule { probability, batch }
}

fn dense_burst() -> Launch {
    Launch::Burst {
        reach: 0.0..=1.0,
        speed: 0.2..=2.0,
    }
}

fn quiet_particles(turbulence: f32) -> ParticleConfig {
    ParticleConfig {
        spiral_strength: Ramp::constant(0.0),
        turbulence: Ramp::constant(turbulence),
        gravity: 0.0,
        thread_pull: 0.0,
        thread_spiral: 0.0,
        absorption_radius: 0.0,
        styles: Vec::new(),
        initial: Vec::new(),
        spawns: Vec::new(),
        globule_shadow: false,
        dust: 0.0,
    }
}

fn supernova() -> ModelConfig {
    let flash = Launch::Burst {
        reach: 1.0..=1.0,
        speed: 0.05..=1.5,
    };
    ModelConfig::Particles(ParticleConfig {
        styles: vec![style(
            ParticleKind::Ejecta,
            FLARE_GLYPHS,
            &[RED, YELLOW, WHITE, BLUE, MAGENTA],
            50..=300,
        )],
        initial: vec![batch(ParticleKind::Ejecta, 1500..=1500, flash.clone())],
        spawns: vec![spawn(0.2, batch(ParticleKind::Ejecta, 10..=30, flash))],
        ..quiet_particles(0.05)
    })
}

fn plasma() -> ModelConfig {
    let sparse = Launch::Burst {
        reach: 0.0..=5.0,
        speed: 0.2..=2.0,
    };
    ModelConfig::Particles(ParticleConfig {
        styles: vec![style(
            ParticleKind::Ejecta,
            EJECTA_GLYPHS,
            &[RED, YELLOW, WHITE, BLUE, MAGENTA, CYAN],
            50..=500,
        )],
        initial: vec![batch(ParticleKind::Ejecta, 5000..=5000, dense_burst())],
        spawns: vec![
            spawn(0.5, batch(ParticleKind::Ejecta, 50..=200, dense_burst())),
            spawn(0.05, batch(ParticleKind::Ejecta, 5..=20, sparse)),
        ],
        dust: 0.02,
        ..quiet_particles(0.05)
    })
}

fn remnant() -> ModelConfig {
    let colors = [RED, YELLOW, WHITE, BLUE, MAGENTA, CYAN];
    ModelConfig::Particles(ParticleConfig {
        thread_pull: 0.02,
        thread_spiral: 1.0,
        styles: vec![
            style(ParticleKind::Ejecta, EJECTA_GLYPHS, &colors, 50..=500),
            style(ParticleKind::Globule, &[' '], &[SHADOW], 50..=500),
            style(ParticleKind::SpiralThread, EJECTA_GLYPHS, &colors, 50..=500),
        ],
        initial: vec![
            batch(ParticleKind::Ejecta, 5000..=5000, dense_burst()),
            batch(ParticleKind::Globule, 150..=400, dense_burst()),
            batch(ParticleKind::SpiralThread, 600..=600, dense_burst()),
        ],
        spawns: vec![
            spawn(0.5, batch(ParticleKind::Ejecta, 50..=200, dense_burst())),
            spawn(0.1, batch(ParticleKind::Globule, 10..=30, dense_burst())),
            spawn(0.05, batch(ParticleKind::SpiralThread, 10..=30, dense_burst())),
        ],
        globule_shadow: true,
        ..quiet_particles(0.03)
    })
}

fn black_hole() -> ModelConfig {
    let orbit = Launch::Orbit {
        offset: 0.5..=8.0,
        speed: 0.5..=2.5,
    };
    let evolution_secs = 30.0 * 60.0;
    ModelConfig::Particles(ParticleConfig {
        spiral_strength: Ramp {
            start: 0.05,
            end: 0.15,
            over_secs: evolution_secs,
        },
        turbulence: Ramp {
            start: 0.05,
            end: 0.01,
            over_secs: evolution_secs,
        },
        gravity: 0.002,
        absorption_radius: 3.0,
        styles: vec![
            style(
                ParticleKind::Ejecta,
                EJECTA_GLYPHS,
                &[RED, YELLOW, WHITE, MAGENTA, CYAN],
                1000..=4000,
            ),
            style(
                ParticleKind::Disk,
                DISK_GLYPHS,
                &[YELLOW, MAGENTA, WHITE, CYAN],
                1000..=4000,
            ),
            style(ParticleKind::Globule, &[' '], &[SHADOW], 1000..=4000),
        ],
        initial: vec![
            batch(ParticleKind::Ejecta, 6000..=6000, orbit.clone()),
            batch(ParticleKind::Disk, 500..=500, orbit.clone()),
            batch(ParticleKind::Globule, 200..=200, orbit.clone()),
        ],
        spawns: vec![
            spawn(0.3, batch(ParticleKind::Ejecta, 20..=50, orbit.clone())),
            spawn(0.02, batch(ParticleKind::Disk, 5..=15, orbit.clone())),
            spawn(0.02, batch(ParticleKind::Globule, 2..=5, orbit)),
        ],
        ..quiet_particles(0.05)
    })
}
