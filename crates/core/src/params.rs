//! Helpers for pulling typed parameters out of a `serde_json::Value` object.
//!
//! Each helper takes a JSON object, a key and the value currently in effect.
//! A missing key keeps the current value, so a partial object only touches
//! what it names. A present key with the wrong JSON type, an out-of-range
//! number, or an unknown selector is an error: the configuration surface is
//! only supposed to offer valid choices, and a bad one fails fast.

use std::str::FromStr;

use serde_json::Value;

use crate::error::EngineError;

/// Human-readable JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(name: &str, expected: &str, got: &Value) -> EngineError {
    EngineError::ParamTypeMismatch {
        name: name.to_string(),
        expected: expected.to_string(),
        got: json_type_name(got).to_string(),
    }
}

/// Returns the nested object `params[name]`, if present.
pub fn param_group<'a>(params: &'a Value, name: &str) -> Result<Option<&'a Value>, EngineError> {
    match params.get(name) {
        None => Ok(None),
        Some(v) if v.is_object() => Ok(Some(v)),
        Some(other) => Err(mismatch(name, "object", other)),
    }
}

/// Extracts an `f64` from `params[name]`, keeping `current` if missing.
///
/// Accepts JSON integers as well as floats.
pub fn param_f64(params: &Value, name: &str, current: f64) -> Result<f64, EngineError> {
    match params.get(name) {
        None => Ok(current),
        Some(v) => v.as_f64().ok_or_else(|| mismatch(name, "number", v)),
    }
}

/// Like [`param_f64`] but also enforces `min <= value <= max`.
pub fn param_in_range(
    params: &Value,
    name: &str,
    current: f64,
    min: f64,
    max: f64,
) -> Result<f64, EngineError> {
    let value = param_f64(params, name, current)?;
    check_range(name, value, min, max)?;
    Ok(value)
}

/// Fails with `ParamOutOfRange` unless `min <= value <= max`.
pub fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<(), EngineError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::ParamOutOfRange {
            name: name.to_string(),
            value,
            min,
            max,
        })
    }
}

/// Like [`param_f64`] but enforces `min <= value < max`.
pub fn param_in_half_open(
    params: &Value,
    name: &str,
    current: f64,
    min: f64,
    max: f64,
) -> Result<f64, EngineError> {
    let value = param_f64(params, name, current)?;
    check_half_open(name, value, min, max)?;
    Ok(value)
}

/// Fails with `ParamOutOfHalfOpenRange` unless `min <= value < max`.
pub fn check_half_open(name: &str, value: f64, min: f64, max: f64) -> Result<(), EngineError> {
    if (min..max).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::ParamOutOfHalfOpenRange {
            name: name.to_string(),
            value,
            min,
            max,
        })
    }
}

/// Extracts a non-negative integer from `params[name]`, keeping `current`
/// if missing. Floats are rejected.
pub fn param_u64(params: &Value, name: &str, current: u64) -> Result<u64, EngineError> {
    match params.get(name) {
        None => Ok(current),
        Some(v) => v.as_u64().ok_or_else(|| mismatch(name, "non-negative integer", v)),
    }
}

/// Extracts a `bool` from `params[name]`, keeping `current` if missing.
pub fn param_bool(params: &Value, name: &str, current: bool) -> Result<bool, EngineError> {
    match params.get(name) {
        None => Ok(current),
        Some(v) => v.as_bool().ok_or_else(|| mismatch(name, "bool", v)),
    }
}

/// Parses a selector string from `params[name]` into one of the enum's
/// choices, keeping `current` if missing.
pub fn param_choice<T>(params: &Value, name: &str, current: T) -> Result<T, EngineError>
where
    T: FromStr<Err = EngineError>,
{
    match params.get(name) {
        None => Ok(current),
        Some(Value::String(s)) => s.parse(),
        Some(other) => Err(mismatch(name, "string", other)),
    }
}
