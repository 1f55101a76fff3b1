//! Error types for the flowfield core.

use thiserror::Error;

/// Errors produced by simulation construction, configuration and presentation.
///
/// Nothing inside a tick can fail; these only surface at the boundaries
/// (construction, restart, parameter application, rendering).
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero when creating a viewport or surface.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// The particle population must hold at least one particle.
    #[error("invalid particle count: must be at least 1")]
    InvalidParticleCount,

    /// A selector parameter named a choice outside its enumerated set.
    #[error("unknown {param} '{value}'")]
    UnknownChoice { param: String, value: String },

    /// A numeric parameter fell outside its allowed range.
    #[error("parameter '{name}' = {value} out of range [{min}, {max}]")]
    ParamOutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A numeric parameter fell outside a range whose upper end is excluded.
    #[error("parameter '{name}' = {value} out of range [{min}, {max})")]
    ParamOutOfHalfOpenRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// A frame's buffers did not match the particle count it claimed.
    #[error("buffer mismatch: expected {expected} floats, got {got}")]
    BufferMismatch { expected: usize, got: usize },

    /// Writing a snapshot or reading a replay file failed.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = EngineError::InvalidDimensions.to_string();
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn unknown_choice_names_param_and_value() {
        let err = EngineError::UnknownChoice {
            param: "field function".into(),
            value: "spiral".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("field function"), "missing param in: {msg}");
        assert!(msg.contains("spiral"), "missing value in: {msg}");
    }

    #[test]
    fn param_out_of_range_includes_bounds() {
        let err = EngineError::ParamOutOfRange {
            name: "octaves".into(),
            value: 12.0,
            min: 1.0,
            max: 10.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("octaves"), "missing name in: {msg}");
        assert!(msg.contains("12"), "missing value in: {msg}");
        assert!(msg.contains("10"), "missing max in: {msg}");
    }

    #[test]
    fn param_type_mismatch_includes_all_fields() {
        let err = EngineError::ParamTypeMismatch {
            name: "preserve".into(),
            expected: "bool".into(),
            got: "string".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("preserve"), "missing param name in: {msg}");
        assert!(msg.contains("bool"), "missing expected type in: {msg}");
        assert!(msg.contains("string"), "missing got type in: {msg}");
    }

    #[test]
    fn buffer_mismatch_includes_sizes() {
        let msg = EngineError::BufferMismatch {
            expected: 40,
            got: 36,
        }
        .to_string();
        assert!(msg.contains("40") && msg.contains("36"), "got: {msg}");
    }

    #[test]
    fn engine_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineError>();
    }

    #[test]
    fn engine_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<EngineError>();
    }
}
