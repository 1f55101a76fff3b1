//! Shared configuration read by the simulation every tick.
//!
//! Five groups mirror the control panel of the visualizer: particle motion,
//! colour, vector field, noise and render mode. Each group knows its
//! defaults, its valid ranges, how to merge a partial JSON object into
//! itself, and how to describe itself as a parameter schema for generic
//! key-value editors.
//!
//! Selectors are closed enums. Strings only appear at the JSON boundary,
//! where an unknown choice is rejected with [`EngineError::UnknownChoice`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::EngineError;
use crate::params::{
    check_half_open, check_range, param_bool, param_choice, param_group, param_in_half_open,
    param_in_range, param_u64,
};

/// Upper bound on the particle population; guards against runaway allocations.
pub const MAX_PARTICLES: usize = 5_000_000;

// ---------------------------------------------------------------------------
// Selectors
// ---------------------------------------------------------------------------

/// How a noise sample becomes a 2D direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldFunction {
    /// Noise scalar mapped to an angle around `base_angle`.
    #[default]
    Angle,
    /// Finite-difference gradient of the noise.
    Grad,
    /// Gradient rotated by 90 degrees (curl of a z-directed potential).
    Curl,
}

impl FieldFunction {
    pub const ALL: [FieldFunction; 3] = [Self::Angle, Self::Grad, Self::Curl];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Angle => "angle",
            Self::Grad => "grad",
            Self::Curl => "curl",
        }
    }
}

/// What drives a particle's colour at respawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFunction {
    /// Raw noise value at the spawn point.
    #[default]
    Noise,
    /// Polar angle of the spawn point, rotating with the colour phase.
    Angle,
}

impl ColorFunction {
    pub const ALL: [ColorFunction; 2] = [Self::Noise, Self::Angle];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Noise => "noise",
            Self::Angle => "angle",
        }
    }
}

/// Which precomputed palette table colours are drawn from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Hsl,
    #[default]
    Cubehelix,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 2] = [Self::Hsl, Self::Cubehelix];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hsl => "hsl",
            Self::Cubehelix => "cubehelix",
        }
    }
}

/// Primitive topology the renderer assembles from the vertex stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    /// Vertex pairs: one segment per particle.
    #[default]
    Lines,
    /// Every vertex on its own.
    Points,
    /// Vertex triplets.
    Triangles,
}

impl Primitive {
    pub const ALL: [Primitive; 3] = [Self::Lines, Self::Points, Self::Triangles];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Points => "points",
            Self::Triangles => "triangles",
        }
    }
}

fn unknown(param: &str, value: &str) -> EngineError {
    EngineError::UnknownChoice {
        param: param.to_string(),
        value: value.to_string(),
    }
}

impl FromStr for FieldFunction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| unknown("field function", s))
    }
}

impl FromStr for ColorFunction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| unknown("color function", s))
    }
}

impl FromStr for ColorScheme {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| unknown("color scheme", s))
    }
}

impl FromStr for Primitive {
    type Err = EngineError;

    /// Case-insensitive, so GL-style names ("LINES") are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| unknown("primitive", s))
    }
}

impl fmt::Display for FieldFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ColorFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn choices<T: fmt::Display>(all: &[T]) -> Vec<String> {
    all.iter().map(ToString::to_string).collect()
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

/// Particle population and advection speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Number of particles allocated at the next restart.
    pub particle_count: usize,
    /// Pixels travelled per tick by a unit-length field vector.
    pub speed: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            particle_count: 10_000,
            speed: 11.0,
        }
    }
}

impl MotionConfig {
    pub const SPEED_RANGE: (f64, f64) = (0.0, 100.0);

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.particle_count == 0 {
            return Err(EngineError::InvalidParticleCount);
        }
        check_range(
            "motion.particle_count",
            self.particle_count as f64,
            1.0,
            MAX_PARTICLES as f64,
        )?;
        check_range("motion.speed", self.speed, Self::SPEED_RANGE.0, Self::SPEED_RANGE.1)
    }

    /// Merges the keys present in `params` into a copy of `self`.
    pub fn apply_json(&self, params: &Value) -> Result<Self, EngineError> {
        let count = param_u64(params, "particle_count", self.particle_count as u64)?;
        let merged = Self {
            particle_count: usize::try_from(count).map_err(|_| EngineError::ParamOutOfRange {
                name: "motion.particle_count".into(),
                value: count as f64,
                min: 1.0,
                max: MAX_PARTICLES as f64,
            })?,
            speed: param_in_range(
                params,
                "speed",
                self.speed,
                Self::SPEED_RANGE.0,
                Self::SPEED_RANGE.1,
            )?,
        };
        merged.validate()?;
        Ok(merged)
    }

    pub fn schema() -> Value {
        let d = Self::default();
        json!({
            "particle_count": {
                "type": "integer",
                "default": d.particle_count,
                "min": 1,
                "max": MAX_PARTICLES,
                "description": "Number of particles; applied on restart"
            },
            "speed": {
                "type": "number",
                "default": d.speed,
                "min": Self::SPEED_RANGE.0,
                "max": Self::SPEED_RANGE.1,
                "description": "Advection speed in pixels per tick"
            }
        })
    }
}

/// Colour driving function, palette and colour-phase speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub function: ColorFunction,
    pub scheme: ColorScheme,
    /// Colour-phase advance per tick, in units of 1/10000.
    pub speed: f64,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            function: ColorFunction::Noise,
            scheme: ColorScheme::Cubehelix,
            speed: 60.0,
        }
    }
}

impl ColorConfig {
    pub const SPEED_RANGE: (f64, f64) = (0.0, 100.0);

    pub fn validate(&self) -> Result<(), EngineError> {
        check_range("color.speed", self.speed, Self::SPEED_RANGE.0, Self::SPEED_RANGE.1)
    }

    pub fn apply_json(&self, params: &Value) -> Result<Self, EngineError> {
        Ok(Self {
            function: param_choice(params, "function", self.function)?,
            scheme: param_choice(params, "scheme", self.scheme)?,
            speed: param_in_range(
                params,
                "speed",
                self.speed,
                Self::SPEED_RANGE.0,
                Self::SPEED_RANGE.1,
            )?,
        })
    }

    pub fn schema() -> Value {
        let d = Self::default();
        json!({
            "function": {
                "type": "choice",
                "default": d.function.as_str(),
                "choices": choices(&ColorFunction::ALL),
                "description": "What drives a particle's colour at respawn"
            },
            "scheme": {
                "type": "choice",
                "default": d.scheme.as_str(),
                "choices": choices(&ColorScheme::ALL),
                "description": "Palette table"
            },
            "speed": {
                "type": "number",
                "default": d.speed,
                "min": Self::SPEED_RANGE.0,
                "max": Self::SPEED_RANGE.1,
                "description": "Colour phase advance per tick (x 1/10000)"
            }
        })
    }
}

/// Vector field strategy and its angle parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub function: FieldFunction,
    /// Degrees. Only read by [`FieldFunction::Angle`].
    pub base_angle: f64,
    /// Degrees swept by a full noise swing. Only read by [`FieldFunction::Angle`].
    pub angle_range: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            function: FieldFunction::Angle,
            base_angle: 36.0,
            angle_range: 36.0,
        }
    }
}

impl FieldConfig {
    /// Half-open: 360 degrees is the same heading as 0.
    pub const BASE_ANGLE_RANGE: (f64, f64) = (0.0, 360.0);
    pub const ANGLE_RANGE_RANGE: (f64, f64) = (0.0, 180.0);

    pub fn validate(&self) -> Result<(), EngineError> {
        check_half_open(
            "field.base_angle",
            self.base_angle,
            Self::BASE_ANGLE_RANGE.0,
            Self::BASE_ANGLE_RANGE.1,
        )?;
        check_range(
            "field.angle_range",
            self.angle_range,
            Self::ANGLE_RANGE_RANGE.0,
            Self::ANGLE_RANGE_RANGE.1,
        )
    }

    pub fn apply_json(&self, params: &Value) -> Result<Self, EngineError> {
        Ok(Self {
            function: param_choice(params, "function", self.function)?,
            base_angle: param_in_half_open(
                params,
                "base_angle",
                self.base_angle,
                Self::BASE_ANGLE_RANGE.0,
                Self::BASE_ANGLE_RANGE.1,
            )?,
            angle_range: param_in_range(
                params,
                "angle_range",
                self.angle_range,
                Self::ANGLE_RANGE_RANGE.0,
                Self::ANGLE_RANGE_RANGE.1,
            )?,
        })
    }

    pub fn schema() -> Value {
        let d = Self::default();
        json!({
            "function": {
                "type": "choice",
                "default": d.function.as_str(),
                "choices": choices(&FieldFunction::ALL),
                "description": "How a noise sample becomes a direction"
            },
            "base_angle": {
                "type": "number",
                "default": d.base_angle,
                "min": Self::BASE_ANGLE_RANGE.0,
                "max": Self::BASE_ANGLE_RANGE.1,
                "max_exclusive": true,
                "description": "Centre direction in degrees (angle mode only)"
            },
            "angle_range": {
                "type": "number",
                "default": d.angle_range,
                "min": Self::ANGLE_RANGE_RANGE.0,
                "max": Self::ANGLE_RANGE_RANGE.1,
                "description": "Degrees swept by a full noise swing (angle mode only)"
            }
        })
    }
}

/// Multi-octave noise shape and its time speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub octaves: u32,
    /// Spatial frequency of the first octave.
    pub frequency: f64,
    /// Amplitude multiplier between consecutive octaves.
    pub falloff: f64,
    /// Noise-phase advance per tick, in units of 1/10000.
    pub speed: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 1,
            frequency: 1.0,
            falloff: 0.92,
            speed: 10.0,
        }
    }
}

impl NoiseConfig {
    pub const OCTAVES_RANGE: (u32, u32) = (1, 10);
    pub const FREQUENCY_RANGE: (f64, f64) = (0.5, 10.0);
    pub const FALLOFF_RANGE: (f64, f64) = (0.0, 1.0);
    pub const SPEED_RANGE: (f64, f64) = (0.0, 100.0);

    pub fn validate(&self) -> Result<(), EngineError> {
        check_range(
            "noise.octaves",
            f64::from(self.octaves),
            f64::from(Self::OCTAVES_RANGE.0),
            f64::from(Self::OCTAVES_RANGE.1),
        )?;
        check_range(
            "noise.frequency",
            self.frequency,
            Self::FREQUENCY_RANGE.0,
            Self::FREQUENCY_RANGE.1,
        )?;
        check_range(
            "noise.falloff",
            self.falloff,
            Self::FALLOFF_RANGE.0,
            Self::FALLOFF_RANGE.1,
        )?;
        check_range("noise.speed", self.speed, Self::SPEED_RANGE.0, Self::SPEED_RANGE.1)
    }

    pub fn apply_json(&self, params: &Value) -> Result<Self, EngineError> {
        let octaves = param_u64(params, "octaves", u64::from(self.octaves))?;
        let (lo, hi) = Self::OCTAVES_RANGE;
        check_range("octaves", octaves as f64, f64::from(lo), f64::from(hi))?;
        Ok(Self {
            // In range, so the narrowing cannot truncate.
            octaves: octaves as u32,
            frequency: param_in_range(
                params,
                "frequency",
                self.frequency,
                Self::FREQUENCY_RANGE.0,
                Self::FREQUENCY_RANGE.1,
            )?,
            falloff: param_in_range(
                params,
                "falloff",
                self.falloff,
                Self::FALLOFF_RANGE.0,
                Self::FALLOFF_RANGE.1,
            )?,
            speed: param_in_range(
                params,
                "speed",
                self.speed,
                Self::SPEED_RANGE.0,
                Self::SPEED_RANGE.1,
            )?,
        })
    }

    pub fn schema() -> Value {
        let d = Self::default();
        json!({
            "octaves": {
                "type": "integer",
                "default": d.octaves,
                "min": Self::OCTAVES_RANGE.0,
                "max": Self::OCTAVES_RANGE.1,
                "description": "Number of noise layers summed"
            },
            "frequency": {
                "type": "number",
                "default": d.frequency,
                "min": Self::FREQUENCY_RANGE.0,
                "max": Self::FREQUENCY_RANGE.1,
                "description": "Spatial frequency of the first octave"
            },
            "falloff": {
                "type": "number",
                "default": d.falloff,
                "min": Self::FALLOFF_RANGE.0,
                "max": Self::FALLOFF_RANGE.1,
                "description": "Amplitude multiplier between octaves"
            },
            "speed": {
                "type": "number",
                "default": d.speed,
                "min": Self::SPEED_RANGE.0,
                "max": Self::SPEED_RANGE.1,
                "description": "Noise phase advance per tick (x 1/10000)"
            }
        })
    }
}

/// How the renderer should draw the vertex stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub primitive: Primitive,
    pub point_size: f64,
    pub line_width: f64,
    /// Keep previous frames on the surface (trails) instead of clearing.
    pub preserve: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            primitive: Primitive::Lines,
            point_size: 1.0,
            line_width: 1.0,
            preserve: true,
        }
    }
}

impl RenderConfig {
    pub const SIZE_RANGE: (f64, f64) = (1.0, 10.0);

    pub fn validate(&self) -> Result<(), EngineError> {
        check_range(
            "render.point_size",
            self.point_size,
            Self::SIZE_RANGE.0,
            Self::SIZE_RANGE.1,
        )?;
        check_range(
            "render.line_width",
            self.line_width,
            Self::SIZE_RANGE.0,
            Self::SIZE_RANGE.1,
        )
    }

    pub fn apply_json(&self, params: &Value) -> Result<Self, EngineError> {
        Ok(Self {
            primitive: param_choice(params, "primitive", self.primitive)?,
            point_size: param_in_range(
                params,
                "point_size",
                self.point_size,
                Self::SIZE_RANGE.0,
                Self::SIZE_RANGE.1,
            )?,
            line_width: param_in_range(
                params,
                "line_width",
                self.line_width,
                Self::SIZE_RANGE.0,
                Self::SIZE_RANGE.1,
            )?,
            preserve: param_bool(params, "preserve", self.preserve)?,
        })
    }

    pub fn schema() -> Value {
        let d = Self::default();
        json!({
            "primitive": {
                "type": "choice",
                "default": d.primitive.as_str(),
                "choices": choices(&Primitive::ALL),
                "description": "Primitive topology for the vertex stream"
            },
            "point_size": {
                "type": "number",
                "default": d.point_size,
                "min": Self::SIZE_RANGE.0,
                "max": Self::SIZE_RANGE.1,
                "description": "Point size in pixels"
            },
            "line_width": {
                "type": "number",
                "default": d.line_width,
                "min": Self::SIZE_RANGE.0,
                "max": Self::SIZE_RANGE.1,
                "description": "Line width in pixels"
            },
            "preserve": {
                "type": "bool",
                "default": d.preserve,
                "description": "Accumulate frames instead of clearing"
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// Every configuration group the simulation reads.
///
/// Serializes as nested JSON `{motion, color, field, noise, render}`;
/// missing groups or keys deserialize to their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub motion: MotionConfig,
    pub color: ColorConfig,
    pub field: FieldConfig,
    pub noise: NoiseConfig,
    pub render: RenderConfig,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        self.motion.validate()?;
        self.color.validate()?;
        self.field.validate()?;
        self.noise.validate()?;
        self.render.validate()
    }

    /// Merges a partial nested JSON object into a copy of `self`.
    ///
    /// All-or-nothing: on error nothing is applied.
    pub fn apply_json(&self, params: &Value) -> Result<Self, EngineError> {
        let mut next = *self;
        if let Some(group) = param_group(params, "motion")? {
            next.motion = next.motion.apply_json(group)?;
        }
        if let Some(group) = param_group(params, "color")? {
            next.color = next.color.apply_json(group)?;
        }
        if let Some(group) = param_group(params, "field")? {
            next.field = next.field.apply_json(group)?;
        }
        if let Some(group) = param_group(params, "noise")? {
            next.noise = next.noise.apply_json(group)?;
        }
        if let Some(group) = param_group(params, "render")? {
            next.render = next.render.apply_json(group)?;
        }
        Ok(next)
    }

    /// Parameter schema of every group, keyed like the JSON form.
    pub fn schema() -> Value {
        json!({
            "motion": MotionConfig::schema(),
            "color": ColorConfig::schema(),
            "field": FieldConfig::schema(),
            "noise": NoiseConfig::schema(),
            "render": RenderConfig::schema(),
        })
    }
}
