//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Round a f64 and clamp it to the i64 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_i64(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i64>(clamped).unwrap_or(0)
}

/// Round a f64 and clamp it to the u64 range, returning 0 for non-finite
/// or negative values.
#[must_use]
pub fn round_f64_to_u64(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let max = cast::<u64, f64>(u64::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(0.0, max).round();
    cast::<f64, u64>(clamped).unwrap_or(0)
}

/// Floor a f64 and clamp it to the u32 range, returning 0 for non-finite
/// or negative values.
#[must_use]
pub fn floor_f64_to_u32(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let max = cast::<u32, f64>(u32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(0.0, max).floor();
    cast::<f64, u32>(clamped).unwrap_or(0)
}

/// Convert u32 to f64 without precision concerns (u32 fits f64 exactly).
#[must_use]
pub fn u32_to_f64(value: u32) -> f64 {
    f64::from(value)
}

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Convert u64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn u64_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}
