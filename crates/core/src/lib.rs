#![deny(unsafe_code)]
//! Core of the flow-field particle visualizer.
//!
//! A population of particles drifts through a vector field derived from
//! layered 3-D simplex noise. Each tick every particle becomes a short
//! segment from its previous to its current position, coloured from a
//! precomputed palette. The crate owns the simulation and its buffers; any
//! [`RenderSurface`] can draw the resulting [`Frame`].
//!
//! Entry point is [`Simulation`], which also implements the object-safe
//! [`Engine`] trait.

pub mod clock;
pub mod color;
pub mod color_map;
pub mod config;
pub mod engine;
pub mod error;
pub mod field_source;
pub mod noise_field;
pub mod palette;
pub mod params;
pub mod particles;
pub mod prng;
pub mod seed;
pub mod simulation;
pub mod surface;

pub use clock::SimulationClock;
pub use color::Srgb;
pub use color_map::ColorMapper;
pub use config::{
    ColorConfig, ColorFunction, ColorScheme, FieldConfig, FieldFunction, MotionConfig, NoiseConfig,
    Primitive, RenderConfig, SimulationConfig,
};
pub use engine::Engine;
pub use error::EngineError;
pub use field_source::{FieldSource, FlowField};
pub use noise_field::NoiseField;
pub use palette::{PaletteTable, Palettes, PALETTE_SIZE};
pub use particles::ParticleSystem;
pub use prng::Xorshift64;
pub use seed::Seed;
pub use simulation::{Simulation, TickStats};
pub use surface::{Frame, RenderSurface, Viewport};
