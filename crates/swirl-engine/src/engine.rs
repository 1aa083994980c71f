//! The engine: one model, one clock, one random source.

use std::time::Duration;

use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};
use swirl_core::{EngineConfig, Geometry, SimClock};

use crate::color::ColorMapper;
use crate::compositor::Compositor;
use crate::error::EngineError;
use crate::model::Model;

/// Drives one animation from its configuration.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    model: Model,
    mapper: ColorMapper,
    clock: SimClock,
    geometry: Option<Geometry>,
    rng: StdRng,
    seed: u64,
}

impl Engine {
    /// Build an engine seeded from system entropy.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_seed(config, rand::random())
    }

    /// Build an engine whose randomness is fully determined by `seed`.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self, EngineError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let model = Model::new(&config.model, config.vertical_aspect, &mut rng)?;
        info!(
            "engine ready: {} colors, {:.1} fps, seed {seed}",
            config.color_mode.name(),
            config.fps
        );
        Ok(Self {
            mapper: ColorMapper::new(config.color_mode),
            config,
            model,
            clock: SimClock::new(),
            geometry: None,
            rng,
            seed,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Geometry of the last resize.
    pub fn geometry(&self) -> Option<Geometry> {
        self.geometry
    }

    /// Adopt a new terminal size. Returns whether anything changed.
    pub fn resize(&mut self, cols: u16, rows: u16) -> bool {
        let geometry = Geometry::new(cols, rows);
        if self.geometry == Some(geometry) {
            return false;
        }
        debug!("resize to {cols}x{rows}");
        self.model.resize(&geometry, &mut self.rng);
        self.geometry = Some(geometry);
        true
    }

    /// Draw the current state into a fresh frame of `compositor`.
    pub fn render(&mut self, compositor: &mut Compositor) {
        let (cols, rows) = self.geometry.map_or((0, 0), |g| (g.cols, g.rows));
        let grid = compositor.begin(cols, rows);
        self.model.render(grid, &self.clock, &self.mapper, &mut self.rng);
    }

    /// Advance the clock by `delta` and step the model.
    pub fn update(&mut self, delta: Duration) {
        self.clock.advance(delta);
        self.model.update(&self.clock, &mut self.rng);
    }
}
