//! Transform fields (stateless).
//!
//! Every frame is a closed-form function of the clock: nothing evolves
//! between ticks except the time that is fed in.

use std::f64::consts::TAU;

use rand::{Rng, rngs::StdRng};
use swirl_art::{ArtError, ScaledArt, SourceArt};
use swirl_core::{
    ArtParams, ArtSource, CurveParams, FieldConfig, GalaxyParams, Geometry, SimClock, wrap_unit,
};

use crate::color::ColorMapper;
use crate::grid::FrameGrid;
use crate::raster::{plot, plot_cell};

/// Radial phase of a point at normalized radius `r` after `t` seconds.
///
/// Always lands in `[0, 1)`, however large `t` grows.
pub fn radial_phase(r: f64, outward_speed: f64, t: f64) -> f64 {
    wrap_unit(r + wrap_unit(outward_speed * t))
}

/// A closed-form animation over one source.
#[derive(Debug)]
pub struct TransformField {
    source: FieldSource,
    aspect: f32,
    geometry: Geometry,
}

#[derive(Debug)]
enum FieldSource {
    Art(ArtField),
    Curve(CurveParams),
    Galaxy(GalaxyField),
}

impl TransformField {
    /// Build the field. Art is loaded and galaxy stars are laid out here.
    pub fn new(config: &FieldConfig, aspect: f32, rng: &mut StdRng) -> Result<Self, ArtError> {
        let source = match config {
            FieldConfig::Art(params) => FieldSource::Art(ArtField::new(params)?),
            FieldConfig::Curve(params) => FieldSource::Curve(params.clone()),
            FieldConfig::Galaxy(params) => FieldSource::Galaxy(GalaxyField::new(params, rng)),
        };
        Ok(Self {
            source,
            aspect,
            geometry: Geometry::new(0, 0),
        })
    }

    /// Recompute everything derived from the terminal size.
    pub fn resize(&mut self, geometry: &Geometry) {
        self.geometry = *geometry;
        if let FieldSource::Art(art) = &mut self.source {
            art.resize(geometry, self.aspect);
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn render(
        &self,
        grid: &mut FrameGrid,
        clock: &SimClock,
        mapper: &ColorMapper,
        rng: &mut StdRng,
    ) {
        match &self.source {
            FieldSource::Art(art) => art.render(grid, clock.seconds(), mapper),
            FieldSource::Curve(curve) => {
                render_curve(curve, &self.geometry, self.aspect, grid, clock, mapper)
            }
            FieldSource::Galaxy(galaxy) => {
                galaxy.render(&self.geometry, self.aspect, grid, clock, mapper, rng)
            }
        }
    }
}

/// Source art spun and radiated outward.
#[derive(Debug)]
struct ArtField {
    params: ArtParams,
    source: SourceArt,
    scaled: Option<ScaledArt>,
    /// Top-left frame cell of the centered art.
    origin: (i64, i64),
}

impl ArtField {
    fn new(params: &ArtParams) -> Result<Self, ArtError> {
        let source = match &params.source {
            ArtSource::Vortex => SourceArt::vortex()?,
            ArtSource::Text(text) => SourceArt::parse(text)?,
        };
        Ok(Self {
            params: params.clone(),
            source,
            scaled: None,
            origin: (0, 0),
        })
    }

    fn resize(&mut self, geometry: &Geometry, aspect: f32) {
        let scaled = ScaledArt::fit(&self.source, geometry.cols, geometry.rows, aspect);
        self.origin = (
            (i64::from(geometry.cols) - i64::from(scaled.width())).max(0) / 2,
            (i64::from(geometry.rows) - i64::from(scaled.height())).max(0) / 2,
        );
        self.scaled = Some(scaled);
    }

    fn render(&self, grid: &mut FrameGrid, t: f64, mapper: &ColorMapper) {
        let Some(art) = &self.scaled else {
            return;
        };
        let p = &self.params;
        let w = art.width();
        let h = art.height();
        let cx = f64::from(w - 1) / 2.0;
        let cy = f64::from(h - 1) / 2.0;
        let max_r = cx.hypot(cy);

        // Time terms are wrapped once per frame so they keep their precision.
        let outward = wrap_unit(f64::from(p.outward_speed) * t);
        let swirl = (f64::from(p.swirl_speed) * t).rem_euclid(TAU);
        let wobble = (f64::from(p.wobble_rate) * t).rem_euclid(TAU);
        let hue_shift = wrap_unit(f64::from(p.hue_drift) * t);
        let pulse = (2.0 * t).rem_euclid(TAU);

        for y in 0..h {
            for x in 0..w {
                let dx = f64::from(x) - cx;
                let dy = f64::from(y) - cy;
                let r = if max_r > 0.0 { dx.hypot(dy) / max_r } else { 0.0 };
                let ang = dy.atan2(dx);

                let r_out = wrap_unit(r + outward);
                let rot = swirl + r_out * f64::from(p.twist);
                let new_ang = ang - rot
                    + (wobble + r_out * f64::from(p.wobble_ripple)).sin()
                        * f64::from(p.wobble_amplitude);

                let sx = (cx + r_out * max_r * new_ang.cos()).round();
                let sy = (cy + r_out * max_r * new_ang.sin()).round();
                if sx < 0.0 || sy < 0.0 {
                    continue;
                }
                let Some(ch) = art.get(sx as u16, sy as u16) else {
                    continue;
                };
                if ch == ' ' {
                    continue;
                }

                let hue = wrap_unit(new_ang / TAU + hue_shift + r_out * f64::from(p.hue_radial));
                let sat = (0.9 - 0.6 * r_out).clamp(0.2, 1.0);
                let val = (0.85 - 0.25 * (1.0 - r_out) + 0.12 * (pulse + 15.0 * r_out).sin())
                    .clamp(0.15, 1.0);
                let color = mapper.map(hue as f32, sat as f32, val as f32);

                plot_cell(
                    grid,
                    self.origin.0 + i64::from(x),
                    self.origin.1 + i64::from(y),
                    ch,
                    Some(color),
                );
            }
        }
    }
}

/// Glyph at `depth` (clamped into `[0, 1]`) on a non-empty ramp.
fn ramp_glyph(ramp: &[char], depth: f32) -> char {
    let last = ramp.len().saturating_sub(1);
    let idx = (depth.clamp(0.0, 1.0) * last as f32) as usize;
    ramp.get(idx.min(last)).copied().unwrap_or(' ')
}

fn render_curve(
    curve: &CurveParams,
    geometry: &Geometry,
    aspect: f32,
    grid: &mut FrameGrid,
    clock: &SimClock,
    mapper: &ColorMapper,
) {
    let max_r = f64::from(geometry.fitted_radius(aspect, 1.0));
    let phase = clock.tick_phase(f64::from(curve.phase_speed));
    let expansion = clock.tick_fraction(f64::from(curve.expansion_speed));
    let per_turn = f64::from(curve.points_per_turn);
    let total = u64::from(curve.turns) * u64::from(curve.points_per_turn);
    let cx = f64::from(geometry.cx);
    let cy = f64::from(geometry.cy);

    for i in 0..total {
        let u = i as f64 / total as f64;
        let angle = TAU * i as f64 / per_turn * f64::from(curve.angle_scale) + phase;
        let radius = wrap_unit(u + expansion) * max_r;
        let x = cx + radius * angle.cos();
        let y = cy + radius * angle.sin() * f64::from(aspect);

        let depth = (1.0 - radius / max_r) as f32;
        let ch = ramp_glyph(&curve.ramp, depth);
        let color = if curve.color_by_index {
            mapper.depth(u as f32)
        } else {
            mapper.depth(depth)
        };
        plot(grid, x as f32, y as f32, ch, Some(color));
    }
}

/// One star of the galaxy catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Star {
    /// Radius as a fraction of the galaxy radius.
    r: f32,
    theta: f32,
    depth: f32,
}

#[derive(Debug)]
struct GalaxyField {
    params: GalaxyParams,
    stars: Vec<Star>,
}

impl GalaxyField {
    fn new(params: &GalaxyParams, rng: &mut StdRng) -> Self {
        let mut stars = Vec::with_capacity(params.stars as usize);
        let core = params.core_fraction.clamp(0.0, 1.0);
        let arms = params.arms.max(1);
        for _ in 0..params.stars {
            let (r, theta) = if rng.gen_bool(f64::from(params.core_share.clamp(0.0, 1.0))) {
                (rng.gen_range(0.0..=core), rng.gen_range(0.0..std::f32::consts::TAU))
            } else {
                let arm = rng.gen_range(0..arms) as f32;
                let along: f32 = rng.gen_range(0.0..=1.0);
                let r = core + along * (1.0 - core);
                let base = arm * std::f32::consts::TAU / arms as f32
                    + (r * 100.0 + 1.0).ln() * params.arm_turns;
                (r, base + jitter(rng, params.arm_spread))
            };
            if r < params.hole_fraction {
                continue;
            }
            let depth = (1.0 - r + jitter(rng, params.depth_scatter)).clamp(0.0, 1.0);
            stars.push(Star { r, theta, depth });
        }
        Self {
            params: params.clone(),
            stars,
        }
    }

    fn render(
        &self,
        geometry: &Geometry,
        aspect: f32,
        grid: &mut FrameGrid,
        clock: &SimClock,
        mapper: &ColorMapper,
        rng: &mut StdRng,
    ) {
        let p = &self.params;
        let max_r = geometry.fitted_radius(aspect, 2.0);
        let ticks = clock.ticks() as f64;

        for star in &self.stars {
            let speed = p.core_speed * (1.0 - star.r) + p.outer_speed * star.r;
            let turned = (f64::from(p.direction * speed) * ticks).rem_euclid(TAU);
            let theta = (f64::from(star.theta) - turned).rem_euclid(TAU) as f32;
            let radius = star.r * max_r;
            let x = geometry.cx + radius * theta.cos();
            let y = geometry.cy + radius * theta.sin() * aspect;

            let depth = (star.depth + jitter(rng, p.flicker)).clamp(0.0, 1.0);
            plot(grid, x, y, ramp_glyph(&p.ramp, depth), Some(mapper.depth(depth)));
        }
    }
}

/// Uniform offset in `[-amount, amount]`, zero when `amount` is not positive.
fn jitter(rng: &mut StdRng, amount: f32) -> f32 {
    if amount > 0.0 {
        rng.gen_range(-amount..=amount)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use swirl_core::{ColorMode, DENSITY_RAMP};

    fn art_params(text: &str) -> ArtParams {
        ArtParams {
            source: ArtSource::Text(text.to_string()),
            swirl_speed: 0.06,
            twist: 1.2,
            outward_speed: 0.25,
            wobble_amplitude: 0.2,
            wobble_rate: 0.8,
            wobble_ripple: 10.0,
            hue_drift: 0.08,
            hue_radial: 2.5,
        }
    }

    fn curve_params() -> CurveParams {
        CurveParams {
            turns: 4,
            points_per_turn: 50,
            angle_scale: 1.0,
            phase_speed: -0.05,
            expansion_speed: 0.0,
            color_by_index: false,
            ramp: DENSITY_RAMP.to_vec(),
        }
    }

    #[test]
    fn radial_phase_stays_in_unit_interval() {
        for t in [0.0, 1.0, 1e3, 1e9, 1e15, 1e300] {
            for r in [0.0, 0.3, 0.999_999, 1.0, 1.7] {
                let r_out = radial_phase(r, 0.25, t);
                assert!((0.0..1.0).contains(&r_out), "r={r} t={t} -> {r_out}");
            }
        }
    }

    #[test]
    fn art_center_is_drawn_at_start() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = FieldConfig::Art(art_params("@@@\n@@@\n@@@"));
        let mut field = TransformField::new(&config, 1.0, &mut rng).unwrap();
        field.resize(&Geometry::new(3, 3));

        let mut grid = FrameGrid::new(3, 3);
        let mapper = ColorMapper::new(ColorMode::TrueColor);
        field.render(&mut grid, &SimClock::new(), &mapper, &mut rng);

        let center = grid.get(1, 1).unwrap();
        assert_eq!(center.ch, '@');
        assert!(center.color.is_some());
    }

    #[test]
    fn art_spaces_stay_blank() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = FieldConfig::Art(art_params("   \n   \n   "));
        let mut field = TransformField::new(&config, 1.0, &mut rng).unwrap();
        field.resize(&Geometry::new(9, 9));

        let mut grid = FrameGrid::new(9, 9);
        let mapper = ColorMapper::new(ColorMode::Palette);
        let mut clock = SimClock::new();
        clock.advance(std::time::Duration::from_secs(3));
        field.render(&mut grid, &clock, &mapper, &mut rng);
        assert!(grid.cells().iter().all(|c| c.is_blank()));
    }

    #[test]
    fn empty_art_fails_to_load() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = FieldConfig::Art(art_params("\n\n"));
        assert!(TransformField::new(&config, 1.0, &mut rng).is_err());
    }

    #[test]
    fn art_is_centered_after_resize() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = FieldConfig::Art(art_params("@@@@\n@@@@\n@@@@\n@@@@"));
        let mut field = TransformField::new(&config, 1.0, &mut rng).unwrap();
        field.resize(&Geometry::new(20, 4));

        let mut grid = FrameGrid::new(20, 4);
        let mapper = ColorMapper::new(ColorMode::TrueColor);
        field.render(&mut grid, &SimClock::new(), &mapper, &mut rng);
        for row in 0..4 {
            assert!(grid.row_text(row).starts_with("        "));
            assert!(grid.row_text(row).ends_with("        "));
        }
    }

    #[test]
    fn art_follows_every_resize() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = FieldConfig::Art(art_params("@@@@\n@@@@\n@@@@\n@@@@"));
        let mut field = TransformField::new(&config, 1.0, &mut rng).unwrap();
        field.resize(&Geometry::new(20, 4));
        field.resize(&Geometry::new(40, 10));

        let FieldSource::Art(art) = &field.source else {
            panic!("expected an art field");
        };
        let scaled = art.scaled.as_ref().unwrap();
        assert_eq!((scaled.width(), scaled.height()), (10, 10));
        assert_eq!(art.origin, (15, 0));

        let mut grid = FrameGrid::new(40, 10);
        let mapper = ColorMapper::new(ColorMode::TrueColor);
        field.render(&mut grid, &SimClock::new(), &mapper, &mut rng);
        for row in 0..10 {
            let text = grid.row_text(row);
            assert!(text.starts_with(&" ".repeat(15)));
            assert!(text.ends_with(&" ".repeat(15)));
        }
        assert!((0..10).any(|row| grid.row_text(row).contains('@')));
    }

    #[test]
    fn curve_stays_on_screen_and_rotates() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut field =
            TransformField::new(&FieldConfig::Curve(curve_params()), 0.55, &mut rng).unwrap();
        field.resize(&Geometry::new(40, 20));
        let mapper = ColorMapper::new(ColorMode::TrueColor);

        let mut clock = SimClock::new();
        let mut first = FrameGrid::new(40, 20);
        field.render(&mut first, &clock, &mapper, &mut rng);
        assert!(first.cells().iter().any(|c| !c.is_blank()));

        for _ in 0..10 {
            clock.advance(std::time::Duration::from_millis(30));
        }
        let mut later = FrameGrid::new(40, 20);
        field.render(&mut later, &clock, &mapper, &mut rng);
        assert_ne!(first, later);
    }

    #[test]
    fn ramp_glyph_covers_both_ends() {
        assert_eq!(ramp_glyph(&DENSITY_RAMP, 0.0), ' ');
        assert_eq!(ramp_glyph(&DENSITY_RAMP, 1.0), '@');
        assert_eq!(ramp_glyph(&DENSITY_RAMP, 7.0), '@');
        assert_eq!(ramp_glyph(&DENSITY_RAMP, f32::NAN), ' ');
    }

    #[test]
    fn galaxy_skips_the_hole() {
        let params = GalaxyParams {
            stars: 500,
            arms: 4,
            arm_spread: 0.2,
            arm_turns: 4.0,
            core_share: 0.2,
            core_fraction: 0.1,
            hole_fraction: 0.05,
            core_speed: 0.08,
            outer_speed: 0.02,
            direction: 1.0,
            depth_scatter: 0.05,
            flicker: 0.02,
            ramp: DENSITY_RAMP.to_vec(),
        };
        let galaxy = GalaxyField::new(&params, &mut StdRng::seed_from_u64(7));
        assert!(!galaxy.stars.is_empty());
        assert!(galaxy.stars.len() <= 500);
        for star in &galaxy.stars {
            assert!(star.r >= 0.05 && star.r <= 1.0);
            assert!((0.0..=1.0).contains(&star.depth));
        }
    }
}
