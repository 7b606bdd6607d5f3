//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

use crate::constants::{CARE_PERCENT_MAX, CARE_PERCENT_MIN};

/// Clamp a care input into the normalized percent range, returning 0.0 for
/// non-finite values.
#[must_use]
pub fn clamp_percent(value: f32) -> f32 {
    if !value.is_finite() {
        return CARE_PERCENT_MIN;
    }
    value.clamp(CARE_PERCENT_MIN, CARE_PERCENT_MAX)
}

/// Round a f64 and clamp it to the u32 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_u32(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<u32, f64>(u32::MIN).unwrap_or(0.0);
    let max = cast::<u32, f64>(u32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, u32>(clamped).unwrap_or(0)
}

/// Express `count / required` as a rounded whole percentage. A zero
/// denominator reports 0 rather than dividing.
#[must_use]
pub fn ratio_percent(count: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 0;
    }
    round_f64_to_u32(f64::from(count) / f64::from(denominator) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_handles_non_finite_and_range() {
        assert!((clamp_percent(f32::NAN) - 0.0).abs() < f32::EPSILON);
        assert!((clamp_percent(-12.0) - 0.0).abs() < f32::EPSILON);
        assert!((clamp_percent(250.0) - 100.0).abs() < f32::EPSILON);
        assert!((clamp_percent(42.5) - 42.5).abs() < f32::EPSILON);
    }

    #[test]
    fn rounders_cover_ranges() {
        assert_eq!(round_f64_to_u32(1.6), 2);
        assert_eq!(round_f64_to_u32(f64::NAN), 0);
        assert_eq!(round_f64_to_u32(-3.0), 0);
        assert_eq!(round_f64_to_u32(f64::from(u32::MAX) * 2.0), u32::MAX);
    }

    #[test]
    fn ratio_percent_guards_zero_denominator() {
        assert_eq!(ratio_percent(2, 0), 0);
        assert_eq!(ratio_percent(2, 2), 100);
        assert_eq!(ratio_percent(1, 3), 33);
        assert_eq!(ratio_percent(2, 3), 67);
    }
}
