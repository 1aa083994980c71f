//! Field/particle models.

pub mod field;
pub mod particles;

use rand::rngs::StdRng;
use swirl_core::{Geometry, ModelConfig, SimClock};

use crate::color::ColorMapper;
use crate::error::EngineError;
use crate::grid::FrameGrid;

pub use field::{TransformField, radial_phase};
pub use particles::{Forces, Particle, ParticleSystem};

/// The simulation behind an animation.
#[derive(Debug)]
pub enum Model {
    Field(TransformField),
    Particles(ParticleSystem),
}

impl Model {
    pub fn new(config: &ModelConfig, aspect: f32, rng: &mut StdRng) -> Result<Self, EngineError> {
        Ok(match config {
            ModelConfig::Field(field) => Model::Field(TransformField::new(field, aspect, rng)?),
            ModelConfig::Particles(particles) => {
                Model::Particles(ParticleSystem::new(particles.clone(), aspect))
            }
        })
    }

    /// Rebuild the state derived from the terminal size.
    pub fn resize(&mut self, geometry: &Geometry, rng: &mut StdRng) {
        match self {
            Model::Field(field) => field.resize(geometry),
            Model::Particles(system) => system.resize(geometry, rng),
        }
    }

    /// Advance one tick. Fields are closed-form and have nothing to do.
    pub fn update(&mut self, clock: &SimClock, rng: &mut StdRng) {
        if let Model::Particles(system) = self {
            system.update(clock, rng);
        }
    }

    pub fn render(
        &self,
        grid: &mut FrameGrid,
        clock: &SimClock,
        mapper: &ColorMapper,
        rng: &mut StdRng,
    ) {
        match self {
            Model::Field(field) => field.render(grid, clock, mapper, rng),
            Model::Particles(system) => system.render(grid, mapper, rng),
        }
    }
}
