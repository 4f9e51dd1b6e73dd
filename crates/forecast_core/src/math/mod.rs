//! Percentage arithmetic shared by every dashboard.
//!
//! All helpers are generic over `num_traits::Float` so they serve both `f64`
//! reporting code and `f32` chart buffers.

use num_traits::Float;

/// Converts a signed percentage level into a multiplicative factor.
///
/// `multiplier(10.0) == 1.1`, `multiplier(-20.0) == 0.8`.
///
/// # Examples
/// ```
/// use forecast_core::math::multiplier;
///
/// assert_eq!(multiplier(0.0_f64), 1.0);
/// assert!((multiplier(-20.0_f64) - 0.8).abs() < 1e-12);
/// ```
#[inline]
pub fn multiplier<T: Float>(level_pct: T) -> T {
    T::one() + level_pct / hundred()
}

/// Percentage change of `current` relative to `base`.
///
/// Returns `None` when `base` is zero, where the percentage is undefined.
///
/// # Examples
/// ```
/// use forecast_core::math::percent_change;
///
/// let pct = percent_change(110.0_f64, 100.0).unwrap();
/// assert!((pct - 10.0).abs() < 1e-9);
/// assert_eq!(percent_change(5.0_f64, 0.0), None);
/// ```
#[inline]
pub fn percent_change<T: Float>(current: T, base: T) -> Option<T> {
    if base == T::zero() {
        None
    } else {
        Some((current - base) / base * hundred())
    }
}

/// Period-over-period percentage changes of a value sequence.
///
/// The result has one entry per consecutive pair; an entry is `None` where
/// the earlier value is zero.
pub fn period_deltas<T: Float>(values: &[T]) -> Vec<Option<T>> {
    values
        .windows(2)
        .map(|pair| percent_change(pair[1], pair[0]))
        .collect()
}

#[inline]
fn hundred<T: Float>() -> T {
    T::from(100.0).unwrap_or_else(T::one)
}
