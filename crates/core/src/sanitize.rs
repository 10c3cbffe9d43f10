//! Numeric sanitization helpers
//!
//! Shared by the mutation layer (edit-point clamping) and the allocation
//! engine (calculation-time sanitization). Malformed numbers degrade to a
//! safe default; they are never an error.

/// Coerce to a finite number; NaN and infinities become 0.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Clamp to non-negative; non-finite or negative values become 0.
pub fn clamp_positive(value: f64) -> f64 {
    let num = finite_or_zero(value);
    if num > 0.0 {
        num
    } else {
        0.0
    }
}

/// Clamp into `[min, max]`; non-finite input becomes the lower bound.
pub fn clamp_range(value: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() {
        return min;
    }
    value.max(min).min(max)
}
