//! Engine configuration.
//!
//! Everything an animation needs is described here as plain data: the frame
//! rate, the color mode, the vertical aspect correction and the model
//! parameters. A configuration is validated once when the engine is built and
//! never changes afterwards.

use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

use crate::{ColorMode, Rgb, TimeStep};

/// Full description of one animation.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Target frames per second.
    pub fps: f32,
    /// How the simulation clock advances.
    pub time_step: TimeStep,
    /// Truecolor or 256-color output.
    pub color_mode: ColorMode,
    /// Width:height ratio of a character cell, applied to vertical offsets.
    pub vertical_aspect: f32,
    /// Only emit a color escape when the color changes along a row.
    pub batch_colors: bool,
    /// The field or particle model to animate.
    pub model: ModelConfig,
}

impl EngineConfig {
    /// Time budget of a single frame.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps))
    }

    /// Check every parameter the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(ConfigError::FrameRate(self.fps));
        }
        if !(self.vertical_aspect.is_finite() && self.vertical_aspect > 0.0) {
            return Err(ConfigError::Aspect(self.vertical_aspect));
        }
        match &self.model {
            ModelConfig::Field(field) => field.validate(),
            ModelConfig::Particles(particles) => particles.validate(),
        }
    }
}

/// The two model families.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelConfig {
    /// Closed-form mapping from (cell, time) to glyph and color.
    Field(FieldConfig),
    /// A population of independently evolving particles.
    Particles(ParticleConfig),
}

/// Sources for a transform field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldConfig {
    /// Spin and radiate a static piece of source art.
    Art(ArtParams),
    /// Sample points along an animated spiral curve.
    Curve(CurveParams),
    /// A star catalog rotating differentially around the core.
    Galaxy(GalaxyParams),
}

impl FieldConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            FieldConfig::Art(art) => check_finite(
                "art",
                &[
                    art.swirl_speed,
                    art.twist,
                    art.outward_speed,
                    art.wobble_amplitude,
                    art.wobble_rate,
                    art.wobble_ripple,
                    art.hue_drift,
                    art.hue_radial,
                ],
            ),
            FieldConfig::Curve(curve) => {
                if curve.turns == 0 || curve.points_per_turn == 0 {
                    return Err(ConfigError::NoPoints);
                }
                check_finite(
                    "curve",
                    &[curve.angle_scale, curve.phase_speed, curve.expansion_speed],
                )?;
                check_ramp(&curve.ramp)
            }
            FieldConfig::Galaxy(galaxy) => {
                if galaxy.stars == 0 || galaxy.arms == 0 {
                    return Err(ConfigError::NoPoints);
                }
                check_finite(
                    "galaxy",
                    &[
                        galaxy.arm_spread,
                        galaxy.arm_turns,
                        galaxy.core_share,
                        galaxy.core_fraction,
                        galaxy.hole_fraction,
                        galaxy.core_speed,
                        galaxy.outer_speed,
                        galaxy.direction,
                        galaxy.depth_scatter,
                        galaxy.flicker,
                    ],
                )?;
                check_ramp(&galaxy.ramp)
            }
        }
    }
}

fn check_finite(what: &'static str, values: &[f32]) -> Result<(), ConfigError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::NonFinite(what))
    }
}

fn check_ramp(ramp: &[char]) -> Result<(), ConfigError> {
    if ramp.is_empty() {
        Err(ConfigError::EmptyRamp)
    } else {
        Ok(())
    }
}

/// Where the art for an [`FieldConfig::Art`] field comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtSource {
    /// The built-in vortex.
    Vortex,
    /// Caller supplied text, one art row per line.
    Text(String),
}

/// Parameters of the source-art vortex.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtParams {
    pub source: ArtSource,
    /// Rotation speed in radians per second.
    pub swirl_speed: f32,
    /// Extra rotation per unit of radial phase (differential rotation).
    pub twist: f32,
    /// Radial phase advance per second.
    pub outward_speed: f32,
    /// Amplitude of the organic wobble term, in radians.
    pub wobble_amplitude: f32,
    /// Time frequency of the wobble.
    pub wobble_rate: f32,
    /// Radial frequency of the wobble.
    pub wobble_ripple: f32,
    /// Hue advance per second.
    pub hue_drift: f32,
    /// Hue change per unit of radial phase.
    pub hue_radial: f32,
}

/// Parameters of an animated spiral curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveParams {
    pub turns: u32,
    pub points_per_turn: u32,
    /// Multiplier on the winding angle (1 for Archimedean, phi for golden).
    pub angle_scale: f32,
    /// Rotation per tick, in radians.
    pub phase_speed: f32,
    /// Outward drift per tick, as a fraction of the radius.
    pub expansion_speed: f32,
    /// Color by position along the curve instead of by depth.
    pub color_by_index: bool,
    pub ramp: Vec<char>,
}

/// Parameters of the rotating galaxy.
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxyParams {
    pub stars: u32,
    pub arms: u32,
    /// Angular scatter around each arm, in radians.
    pub arm_spread: f32,
    /// How tightly the arms wind.
    pub arm_turns: f32,
    /// Share of stars placed in the core.
    pub core_share: f32,
    /// Radius fraction of the core.
    pub core_fraction: f32,
    /// Radius fraction of the empty central hole.
    pub hole_fraction: f32,
    /// Angular speed per tick at the center.
    pub core_speed: f32,
    /// Angular speed per tick at the rim.
    pub outer_speed: f32,
    /// 1 for counter-clockwise, -1 for clockwise.
    pub direction: f32,
    /// Random depth offset given to each star once.
    pub depth_scatter: f32,
    /// Random depth offset applied every frame.
    pub flicker: f32,
    pub ramp: Vec<char>,
}

/// Particle kinds, each with its own update behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    /// Accretion disk matter: spirals, ignores gravity.
    Disk,
    /// Dark matter clumps: blank glyphs that erase, never absorbed.
    Globule,
    /// Supernova ejecta: gravity and spiral.
    Ejecta,
    /// Threads that spiral around their own spawn anchor.
    SpiralThread,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; 4] = [
        ParticleKind::Disk,
        ParticleKind::Globule,
        ParticleKind::Ejecta,
        ParticleKind::SpiralThread,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParticleKind::Disk => "disk",
            ParticleKind::Globule => "globule",
            ParticleKind::Ejecta => "ejecta",
            ParticleKind::SpiralThread => "spiral-thread",
        }
    }

    /// Whether the particle disappears once it falls inside the absorption radius.
    pub fn absorbable(self) -> bool {
        self != ParticleKind::Globule
    }
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value that moves linearly from `start` to `end` over `over_secs`
/// seconds and then stays at `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    pub start: f32,
    pub end: f32,
    pub over_secs: f64,
}

impl Ramp {
    pub const fn constant(value: f32) -> Self {
        Self {
            start: value,
            end: value,
            over_secs: 0.0,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.over_secs.is_finite()
    }

    pub fn value(&self, elapsed_secs: f64) -> f32 {
        if self.over_secs <= 0.0 || elapsed_secs >= self.over_secs {
            return self.end;
        }
        let progress = (elapsed_secs / self.over_secs).max(0.0) as f32;
        self.start + (self.end - self.start) * progress
    }
}

/// Initial position and velocity of freshly spawned particles.
#[derive(Debug, Clone, PartialEq)]
pub enum Launch {
    /// Start at the center and fly out in a random direction with speed
    /// `reach * speed`, both drawn uniformly.
    Burst {
        reach: RangeInclusive<f32>,
        speed: RangeInclusive<f32>,
    },
    /// Start at a random offset around the center, moving tangentially.
    Orbit {
        offset: RangeInclusive<f32>,
        speed: RangeInclusive<f32>,
    },
}

impl Launch {
    fn validate(&self) -> Result<(), ConfigError> {
        let (a, b) = match self {
            Launch::Burst { reach, speed } => (reach, speed),
            Launch::Orbit { offset, speed } => (offset, speed),
        };
        check_range("launch", a)?;
        check_range("launch speed", b)
    }
}

fn check_range(what: &'static str, range: &RangeInclusive<f32>) -> Result<(), ConfigError> {
    if range.start().is_finite() && range.end().is_finite() && range.start() <= range.end() {
        Ok(())
    } else {
        Err(ConfigError::Range(what))
    }
}

/// Look of a particle kind.
#[derive(Debug, Clone, PartialEq)]
pub struct KindStyle {
    pub kind: ParticleKind,
    pub glyphs: Vec<char>,
    pub colors: Vec<Rgb>,
    /// Lifetime in ticks, drawn uniformly.
    pub lifetime: RangeInclusive<i32>,
}

/// A group of particles of one kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub kind: ParticleKind,
    pub count: RangeInclusive<u32>,
    pub launch: Launch,
}

/// A batch injected each tick with an independent probability.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRule {
    pub probability: f64,
    pub batch: Batch,
}

/// Parameters of the particle system.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleConfig {
    /// Angle added to the direction of travel of spiraling kinds each tick.
    pub spiral_strength: Ramp,
    /// Maximum random velocity kick per axis per tick.
    pub turbulence: Ramp,
    /// Pull toward the center for ejecta and globules.
    pub gravity: f32,
    /// Pull of spiral threads toward their anchor.
    pub thread_pull: f32,
    /// Spiral strength of spiral threads around their anchor.
    pub thread_spiral: f32,
    /// Radius inside which absorbable particles vanish.
    pub absorption_radius: f32,
    pub styles: Vec<KindStyle>,
    /// Batches spawned when the scene is first laid out.
    pub initial: Vec<Batch>,
    pub spawns: Vec<SpawnRule>,
    /// Globules also darken a ragged 5x5 patch around themselves.
    pub globule_shadow: bool,
    /// Probability that an empty cell shows a faint dust speck.
    pub dust: f64,
}

impl ParticleConfig {
    /// Style registered for `kind`, if any.
    pub fn style(&self, kind: ParticleKind) -> Option<&KindStyle> {
        self.styles.iter().find(|style| style.kind == kind)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.spiral_strength.is_finite() {
            return Err(ConfigError::NonFinite("spiral strength"));
        }
        if !self.turbulence.is_finite() {
            return Err(ConfigError::NonFinite("turbulence"));
        }
        check_finite(
            "force",
            &[
                self.gravity,
                self.thread_pull,
                self.thread_spiral,
                self.absorption_radius,
            ],
        )?;
        for style in &self.styles {
            if style.glyphs.is_empty() {
                return Err(ConfigError::EmptyGlyphs(style.kind));
            }
            if style.colors.is_empty() {
                return Err(ConfigError::EmptyColors(style.kind));
            }
            if style.lifetime.start() > style.lifetime.end() {
                return Err(ConfigError::Range("lifetime"));
            }
        }
        let batches = self
            .initial
            .iter()
            .chain(self.spawns.iter().map(|rule| &rule.batch));
        for batch in batches {
            if self.style(batch.kind).is_none() {
                return Err(ConfigError::MissingStyle(batch.kind));
            }
            if batch.count.start() > batch.count.end() {
                return Err(ConfigError::Range("batch count"));
            }
            batch.launch.validate()?;
        }
        for rule in &self.spawns {
            if !(0.0..=1.0).contains(&rule.probability) {
                return Err(ConfigError::Probability(rule.probability));
            }
        }
        if !(0.0..=1.0).contains(&self.dust) {
            return Err(ConfigError::Probability(self.dust));
        }
        Ok(())
    }
}

/// Reasons a configuration is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Frame rate is zero, negative or not finite.
    FrameRate(f32),
    /// Vertical aspect factor is zero, negative or not finite.
    Aspect(f32),
    /// A field would not produce any points.
    NoPoints,
    /// A glyph ramp is empty.
    EmptyRamp,
    /// A particle style has no glyphs.
    EmptyGlyphs(ParticleKind),
    /// A particle style has no colors.
    EmptyColors(ParticleKind),
    /// A batch refers to a kind without a style.
    MissingStyle(ParticleKind),
    /// A probability outside `[0, 1]`.
    Probability(f64),
    /// A range whose start lies after its end.
    Range(&'static str),
    /// A parameter is infinite or NaN.
    NonFinite(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FrameRate(fps) => write!(f, "frame rate must be positive, got {fps}"),
            ConfigError::Aspect(aspect) => {
                write!(f, "vertical aspect must be positive, got {aspect}")
            }
            ConfigError::NoPoints => write!(f, "field has no points to draw"),
            ConfigError::EmptyRamp => write!(f, "glyph ramp is empty"),
            ConfigError::EmptyGlyphs(kind) => write!(f, "no glyphs for {kind} particles"),
            ConfigError::EmptyColors(kind) => write!(f, "no colors for {kind} particles"),
            ConfigError::MissingStyle(kind) => write!(f, "no style for {kind} particles"),
            ConfigError::Probability(p) => write!(f, "probability {p} is outside [0, 1]"),
            ConfigError::Range(what) => write!(f, "invalid {what} range"),
            ConfigError::NonFinite(what) => write!(f, "{what} parameters must be finite"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Preset;

    #[test]
    fn ramp_settles_at_end() {
        let ramp = Ramp {
            start: 0.05,
            end: 0.15,
            over_secs: 100.0,
        };
        assert_eq!(ramp.value(0.0), 0.05);
        assert!((ramp.value(50.0) - 0.10).abs() < 1e-6);
        assert_eq!(ramp.value(1e9), 0.15);
        assert_eq!(Ramp::constant(0.3).value(12.0), 0.3);
    }

    #[test]
    fn all_presets_validate() {
        for preset in Preset::ALL {
            for mode in [ColorMode::TrueColor, ColorMode::Palette] {
                let config = preset.config(mode);
                assert_eq!(config.validate(), Ok(()), "{preset}");
                assert_eq!(config.color_mode, mode);
            }
        }
    }

    #[test]
    fn rejects_bad_frame_rate() {
        let mut config = Preset::Spiral.config(ColorMode::TrueColor);
        config.fps = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::FrameRate(0.0)));
    }

    #[test]
    fn rejects_batch_without_style() {
        let mut config = Preset::Supernova.config(ColorMode::TrueColor);
        if let ModelConfig::Particles(particles) = &mut config.model {
            particles.styles.clear();
        }
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingStyle(ParticleKind::Ejecta))
        );
    }

    #[test]
    fn rejects_infinite_turbulence() {
        let mut config = Preset::Plasma.config(ColorMode::TrueColor);
        if let ModelConfig::Particles(particles) = &mut config.model {
            particles.turbulence = Ramp::constant(f32::INFINITY);
        }
        assert_eq!(config.validate(), Err(ConfigError::NonFinite("turbulence")));
    }

    #[test]
    fn rejects_non_finite_forces_and_star_params() {
        let mut config = Preset::BlackHole.config(ColorMode::TrueColor);
        if let ModelConfig::Particles(particles) = &mut config.model {
            particles.absorption_radius = f32::NAN;
        }
        assert_eq!(config.validate(), Err(ConfigError::NonFinite("force")));

        let mut config = Preset::MilkyWay.config(ColorMode::TrueColor);
        if let ModelConfig::Field(FieldConfig::Galaxy(galaxy)) = &mut config.model {
            galaxy.flicker = f32::INFINITY;
        }
        assert_eq!(config.validate(), Err(ConfigError::NonFinite("galaxy")));
    }

    #[test]
    fn frame_interval_matches_fps() {
        let config = Preset::Vortex.config(ColorMode::TrueColor);
        assert_eq!(config.frame_interval(), Duration::from_millis(50));
    }
}
