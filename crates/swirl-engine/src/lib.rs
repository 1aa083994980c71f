//! Procedural animation engine for the swirl terminal animations.
//!
//! An [`Engine`] owns one model (a stateless transform field or a stateful
//! particle system), a simulation clock and a seedable random source. Each
//! tick it draws into a [`Compositor`], which turns the frame grid into a
//! single buffer of terminal commands.

mod color;
mod compositor;
mod engine;
mod error;
mod grid;
pub mod model;
mod raster;

pub use color::{ColorMapper, cube_rgb, hsv_to_rgb, quantize};
pub use compositor::{Compositor, encode_frame_into, to_crossterm};
pub use engine::Engine;
pub use error::EngineError;
pub use grid::{Cell, FrameGrid};
pub use model::Model;
pub use raster::{erase_cell, plot, plot_cell};
