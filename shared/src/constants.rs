//! Centralized constants for the parameter model.

/// Lower bound of every continuous parameter.
pub const PARAM_MIN: f32 = 0.0;

/// Upper bound of every continuous parameter.
pub const PARAM_MAX: f32 = 100.0;

/// Number of selectable faces.
pub const FACE_COUNT: usize = 5;

/// Value every continuous axis starts from before prompt keywords apply.
pub const BASELINE_VALUE: f32 = 50.0;

/// Session start parameters: color, length, width, layers.
pub const SESSION_DEFAULT: [f32; 4] = [70.0, 50.0, 70.0, 70.0];

/// Clamp a continuous parameter into `[PARAM_MIN, PARAM_MAX]`.
///
/// NaN collapses to `PARAM_MIN` so a bad producer can never leak it downstream.
#[inline]
pub fn clamp_param(value: f32) -> f32 {
    if value.is_nan() {
        PARAM_MIN
    } else {
        value.clamp(PARAM_MIN, PARAM_MAX)
    }
}
