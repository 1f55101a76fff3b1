//! The `Engine` trait a host loop drives.
//!
//! The trait is object-safe so hosts can hold a `Box<dyn Engine>` and stay
//! ignorant of the concrete simulation.

use serde_json::Value;

use crate::error::EngineError;
use crate::surface::Frame;

/// A step-based simulation that exposes render data and a parameter surface.
///
/// The engine owns no scheduling: the host calls [`Engine::step`] once per
/// frame on its own cadence, then hands [`Engine::frame`] to a renderer.
pub trait Engine {
    /// Advance the simulation by one tick.
    fn step(&mut self) -> Result<(), EngineError>;

    /// Buffers and draw settings for the current state.
    fn frame(&self) -> Frame<'_>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all parameters: types, ranges or choices, defaults.
    fn param_schema(&self) -> Value;

    /// Merges a partial parameter object. All-or-nothing on error.
    fn apply_params(&mut self, params: &Value) -> Result<(), EngineError>;

    /// Tears down and rebuilds the population with fresh seeds.
    fn restart(&mut self) -> Result<(), EngineError>;
}
