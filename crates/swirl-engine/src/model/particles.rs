//! Particle systems (stateful).

use std::f32::consts::TAU;

use log::trace;
use rand::{Rng, rngs::StdRng, seq::SliceRandom};
use swirl_core::{Batch, Geometry, KindStyle, Launch, ParticleConfig, ParticleKind, Rgb, SimClock};

use crate::color::ColorMapper;
use crate::grid::{Cell, FrameGrid};
use crate::raster::{erase_cell, plot};

/// Added to distances before dividing by them.
const DISTANCE_EPSILON: f32 = 1e-4;

/// Speed given to a motionless particle that gets redirected.
const REST_SPEED: f32 = 0.1;

/// A single point entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub symbol: char,
    pub color: Rgb,
    /// Ticks left to live.
    pub lifetime: i32,
    pub kind: ParticleKind,
    /// Point a spiral thread winds around. Other kinds use the system center.
    pub anchor: Option<(f32, f32)>,
}

/// Force parameters for one tick, with ramps already evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forces {
    pub center: (f32, f32),
    pub turbulence: f32,
    pub spiral: f32,
    pub gravity: f32,
    pub thread_pull: f32,
    pub thread_spiral: f32,
    pub absorption_radius: f32,
}

impl Forces {
    /// No forces at all around `center`.
    pub fn none(center: (f32, f32)) -> Self {
        Self {
            center,
            turbulence: 0.0,
            spiral: 0.0,
            gravity: 0.0,
            thread_pull: 0.0,
            thread_spiral: 0.0,
            absorption_radius: 0.0,
        }
    }

    fn pull(&self, kind: ParticleKind) -> f32 {
        match kind {
            ParticleKind::Ejecta | ParticleKind::Globule => self.gravity,
            ParticleKind::SpiralThread => self.thread_pull,
            ParticleKind::Disk => 0.0,
        }
    }

    fn spiral(&self, kind: ParticleKind) -> f32 {
        match kind {
            ParticleKind::Disk | ParticleKind::Ejecta => self.spiral,
            ParticleKind::SpiralThread => self.thread_spiral,
            ParticleKind::Globule => 0.0,
        }
    }
}

impl Particle {
    /// Advance one tick. Returns whether the particle is still alive.
    ///
    /// Forces apply in a fixed order: turbulence, gravity, spiral
    /// redirection, then integration.
    pub fn step(&mut self, forces: &Forces, rng: &mut StdRng) -> bool {
        if forces.turbulence > 0.0 {
            let t = forces.turbulence;
            self.vx += rng.gen_range(-t..=t);
            self.vy += rng.gen_range(-t..=t);
        }

        let (ax, ay) = self.anchor.unwrap_or(forces.center);
        let dx = self.x - ax;
        let dy = self.y - ay;

        let pull = forces.pull(self.kind);
        if pull != 0.0 {
            let dist = dx.hypot(dy) + DISTANCE_EPSILON;
            self.vx -= pull * dx / dist;
            self.vy -= pull * dy / dist;
        }

        let spiral = forces.spiral(self.kind);
        if spiral != 0.0 {
            let mut speed = self.vx.hypot(self.vy);
            if speed == 0.0 {
                speed = REST_SPEED;
            }
            let angle = dy.atan2(dx) + spiral;
            self.vx = speed * angle.cos();
            self.vy = speed * angle.sin();
        }

        self.x += self.vx;
        self.y += self.vy;
        self.lifetime -= 1;

        if self.lifetime <= 0 {
            return false;
        }
        if self.kind.absorbable() {
            let (cx, cy) = forces.center;
            if (self.x - cx).hypot(self.y - cy) < forces.absorption_radius {
                return false;
            }
        }
        true
    }
}

/// A population of particles around the screen center.
#[derive(Debug)]
pub struct ParticleSystem {
    config: ParticleConfig,
    aspect: f32,
    particles: Vec<Particle>,
    geometry: Option<Geometry>,
}

impl ParticleSystem {
    pub fn new(config: ParticleConfig, aspect: f32) -> Self {
        Self {
            config,
            aspect,
            particles: Vec::new(),
            geometry: None,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current center, once the first resize has happened.
    pub fn center(&self) -> Option<(f32, f32)> {
        self.geometry.map(|g| (g.cx, g.cy))
    }

    /// Insert a particle directly.
    pub fn spawn_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Follow the terminal size.
    ///
    /// The first call lays out the initial batches around the center. Later
    /// calls shift every particle by the center delta so the scene stays
    /// centered.
    pub fn resize(&mut self, geometry: &Geometry, rng: &mut StdRng) {
        match self.geometry.replace(*geometry) {
            None => {
                for batch in self.config.initial.clone() {
                    self.spawn_batch(&batch, rng);
                }
            }
            Some(old) => {
                let dx = geometry.cx - old.cx;
                let dy = geometry.cy - old.cy;
                if dx == 0.0 && dy == 0.0 {
                    return;
                }
                for p in &mut self.particles {
                    p.x += dx;
                    p.y += dy;
                    if let Some((ax, ay)) = &mut p.anchor {
                        *ax += dx;
                        *ay += dy;
                    }
                }
            }
        }
    }

    /// Forces in effect at `clock`.
    pub fn forces(&self, clock: &SimClock) -> Forces {
        let elapsed = clock.seconds();
        let c = &self.config;
        Forces {
            center: self.center().unwrap_or((0.0, 0.0)),
            turbulence: c.turbulence.value(elapsed),
            spiral: c.spiral_strength.value(elapsed),
            gravity: c.gravity,
            thread_pull: c.thread_pull,
            thread_spiral: c.thread_spiral,
            absorption_radius: c.absorption_radius,
        }
    }

    /// Step every particle, drop the dead ones, then roll the spawn rules.
    pub fn update(&mut self, clock: &SimClock, rng: &mut StdRng) {
        let forces = self.forces(clock);
        self.particles.retain_mut(|p| p.step(&forces, rng));

        if self.geometry.is_none() {
            return;
        }
        let fired: Vec<Batch> = self
            .config
            .spawns
            .iter()
            .filter(|rule| rng.gen_bool(rule.probability))
            .map(|rule| rule.batch.clone())
            .collect();
        for batch in &fired {
            self.spawn_batch(batch, rng);
        }
    }

    fn spawn_batch(&mut self, batch: &Batch, rng: &mut StdRng) {
        let Some(center) = self.center() else {
            return;
        };
        let Some(style) = self.config.style(batch.kind) else {
            return;
        };
        let count = rng.gen_range(batch.count.clone());
        trace!("spawning {count} {} particles", batch.kind);
        for _ in 0..count {
            if let Some(p) = launch(style, &batch.launch, center, rng) {
                self.particles.push(p);
            }
        }
    }

    /// Draw the particles, then the globule shadows and the dust.
    pub fn render(&self, grid: &mut FrameGrid, mapper: &ColorMapper, rng: &mut StdRng) {
        let Some(geometry) = self.geometry else {
            return;
        };
        let cy = geometry.cy;

        for p in &self.particles {
            let y = cy + (p.y - cy) * self.aspect;
            plot(grid, p.x, y, p.symbol, Some(mapper.rgb(p.color)));
        }

        if self.config.globule_shadow {
            for p in self.particles.iter().filter(|p| p.kind == ParticleKind::Globule) {
                let y = cy + (p.y - cy) * self.aspect;
                if !(p.x.is_finite() && y.is_finite()) {
                    continue;
                }
                let (gx, gy) = (p.x.round() as i64, y.round() as i64);
                for dy in -2..=2 {
                    for dx in -2..=2 {
                        if rng.gen_bool(0.5) {
                            erase_cell(grid, gx + dx, gy + dy);
                        }
                    }
                }
            }
        }

        if self.config.dust > 0.0 {
            for cell in grid.cells_mut() {
                if cell.is_blank() && rng.gen_bool(self.config.dust) {
                    *cell = Cell::new('.', None);
                }
            }
        }
    }
}

/// Create one particle of `style` with the given launch.
fn launch(
    style: &KindStyle,
    launch: &Launch,
    center: (f32, f32),
    rng: &mut StdRng,
) -> Option<Particle> {
    let symbol = *style.glyphs.choose(rng)?;
    let color = *style.colors.choose(rng)?;
    let lifetime = rng.gen_range(style.lifetime.clone());
    let angle = rng.gen_range(0.0..TAU);

    let (x, y, vx, vy) = match launch {
        Launch::Burst { reach, speed } => {
            let speed = rng.gen_range(reach.clone()) * rng.gen_range(speed.clone());
            (center.0, center.1, speed * angle.cos(), speed * angle.sin())
        }
        Launch::Orbit { offset, speed } => {
            let offset = rng.gen_range(offset.clone());
            let speed = rng.gen_range(speed.clone());
            (
                center.0 + offset * angle.cos(),
                center.1 + offset * angle.sin(),
                -speed * angle.sin(),
                speed * angle.cos(),
            )
        }
    };

    Some(Particle {
        x,
        y,
        vx,
        vy,
        symbol,
        color,
        lifetime,
        kind: style.kind,
        anchor: (style.kind == ParticleKind::SpiralThread).then_some(center),
    })
}
