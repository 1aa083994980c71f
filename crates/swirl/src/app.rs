//! The animation loop.

use std::time::Instant;

use log::{debug, warn};
use swirl_core::TimeStep;
use swirl_engine::{Compositor, Engine};

use crate::terminal::{Signal, SignalSource, SizeProvider, Surface};

/// Size assumed while the terminal cannot report its own.
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Lifecycle of the loop. `Terminated` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopping,
    Terminated,
}

/// Paces ticks and feeds frames to the terminal.
#[derive(Debug)]
pub struct App {
    engine: Engine,
    compositor: Compositor,
    state: LoopState,
    last_tick: Option<Instant>,
    /// Whether the previous size query fell back to [`FALLBACK_SIZE`].
    size_fallback: bool,
}

impl App {
    pub fn new(engine: Engine) -> Self {
        let compositor = Compositor::new(engine.config().batch_colors);
        Self {
            engine,
            compositor,
            state: LoopState::Running,
            last_tick: None,
            size_fallback: false,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Run until interrupted. The terminal is cleaned up exactly once on
    /// every way out, and a failed tick is reported after the cleanup.
    pub fn run<T>(&mut self, term: &mut T) -> color_eyre::Result<()>
    where
        T: Surface + SizeProvider + SignalSource,
    {
        let result = self.run_loop(term);
        let cleanup = self.shutdown(term);
        result?;
        cleanup?;
        Ok(())
    }

    fn run_loop<T>(&mut self, term: &mut T) -> color_eyre::Result<()>
    where
        T: Surface + SizeProvider + SignalSource,
    {
        term.set_cursor_visible(false)?;
        term.clear()?;
        while self.state == LoopState::Running {
            self.tick(term)?;
        }
        Ok(())
    }

    /// One frame: follow the size, draw, advance the clock, then wait out
    /// the rest of the frame interval.
    pub fn tick<T>(&mut self, term: &mut T) -> color_eyre::Result<()>
    where
        T: Surface + SizeProvider + SignalSource,
    {
        let started = Instant::now();
        let (cols, rows) = self.query_size(term);
        if self.engine.resize(cols, rows) {
            debug!("frame size now {cols}x{rows}");
        }

        self.engine.render(&mut self.compositor);
        term.write_frame(self.compositor.encode()?)?;

        let interval = self.engine.config().frame_interval();
        let delta = match self.engine.config().time_step {
            TimeStep::Fixed => interval,
            TimeStep::Measured => self
                .last_tick
                .map_or(interval, |last| started.duration_since(last)),
        };
        self.last_tick = Some(started);
        self.engine.update(delta);

        let wait = interval.saturating_sub(started.elapsed());
        if term.wait(wait)? == Signal::Interrupt {
            self.stop();
        }
        Ok(())
    }

    fn query_size<T: SizeProvider>(&mut self, term: &mut T) -> (u16, u16) {
        match term.query() {
            Some((cols, rows)) if cols > 0 && rows > 0 => {
                self.size_fallback = false;
                (cols, rows)
            }
            _ => {
                if !self.size_fallback {
                    warn!(
                        "terminal size unavailable, assuming {}x{}",
                        FALLBACK_SIZE.0, FALLBACK_SIZE.1
                    );
                    self.size_fallback = true;
                }
                FALLBACK_SIZE
            }
        }
    }

    /// Ask the loop to finish at the next tick boundary.
    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            self.state = LoopState::Stopping;
        }
    }

    /// Restore the terminal. Only the first call does anything.
    pub fn shutdown<T: Surface>(&mut self, term: &mut T) -> std::io::Result<()> {
        if self.state == LoopState::Terminated {
            return Ok(());
        }
        self.state = LoopState::Terminated;
        let reset = term.reset_style();
        let clear = term.clear();
        let cursor = term.set_cursor_visible(true);
        reset.and(clear).and(cursor)
    }
}
