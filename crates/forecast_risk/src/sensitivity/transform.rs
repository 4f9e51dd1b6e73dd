//! Per-parameter perturbation transforms.
//!
//! A transform decides how perturbing a parameter by a level turns the
//! baseline into a perturbed series:
//!
//! | Transform | Effect of level `L` on parameter `p` |
//! |-----------|--------------------------------------|
//! | `Direct` | `p *= 1 + L/100` |
//! | `Linked { target, elasticity }` | `target *= 1 + elasticity·L/100` |
//! | `Custom` | caller-supplied function |
//!
//! `Linked` covers the inverse (cost driver lowering a revenue line),
//! redirect (lifetime value acting through recurring revenue) and dampened
//! (turnover at half strength) relationships.

use super::levels::PerturbationLevel;
use forecast_core::types::{BaselineSeries, SeriesError};
use std::fmt;
use std::sync::Arc;

/// Signature of a custom perturbation: `(baseline, parameter, level) -> perturbed`.
pub type CustomTransformFn =
    dyn Fn(&BaselineSeries, &str, PerturbationLevel) -> Result<BaselineSeries, SeriesError> + Send + Sync;

/// How a parameter's perturbation is applied to the baseline.
#[derive(Clone, Default)]
pub enum PerturbationTransform {
    /// Scale the parameter's own field.
    #[default]
    Direct,
    /// Scale another field with the given elasticity.
    Linked {
        /// Field actually scaled
        target: String,
        /// Fraction of the level passed through (negative for inverse)
        elasticity: f64,
    },
    /// Arbitrary caller-supplied perturbation.
    Custom(Arc<CustomTransformFn>),
}

impl PerturbationTransform {
    /// `target` moves against the parameter: `target *= 1 - L/100`.
    pub fn inverse(target: impl Into<String>) -> Self {
        Self::linked(target, -1.0)
    }

    /// The parameter acts entirely through `target`: `target *= 1 + L/100`.
    pub fn redirect(target: impl Into<String>) -> Self {
        Self::linked(target, 1.0)
    }

    /// `target` moves by `factor` of the level: `target *= 1 + factor·L/100`.
    pub fn dampened(target: impl Into<String>, factor: f64) -> Self {
        Self::linked(target, factor)
    }

    /// General linked transform.
    pub fn linked(target: impl Into<String>, elasticity: f64) -> Self {
        Self::Linked {
            target: target.into(),
            elasticity,
        }
    }

    /// Wrap a closure as a custom transform.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&BaselineSeries, &str, PerturbationLevel) -> Result<BaselineSeries, SeriesError>
            + Send
            + Sync
            + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Field that the transform writes to, where known up front.
    pub fn target<'a>(&'a self, parameter: &'a str) -> Option<&'a str> {
        match self {
            Self::Direct => Some(parameter),
            Self::Linked { target, .. } => Some(target),
            Self::Custom(_) => None,
        }
    }

    /// Apply the transform, returning a new series.
    pub fn apply(
        &self,
        baseline: &BaselineSeries,
        parameter: &str,
        level: PerturbationLevel,
    ) -> Result<BaselineSeries, SeriesError> {
        match self {
            Self::Direct => baseline.scale_field(parameter, level.multiplier()),
            Self::Linked { target, elasticity } => {
                baseline.scale_field(target, level.multiplier_with(*elasticity))
            }
            Self::Custom(f) => f(baseline, parameter, level),
        }
    }

    /// Short description for reports, e.g. `inverse → new_promotion_revenue`.
    pub fn describe(&self) -> String {
        match self {
            Self::Direct => "direct".to_string(),
            Self::Linked { target, elasticity } if *elasticity == -1.0 => {
                format!("inverse → {}", target)
            }
            Self::Linked { target, elasticity } if *elasticity == 1.0 => {
                format!("redirect → {}", target)
            }
            Self::Linked { target, elasticity } => format!("{}× → {}", elasticity, target),
            Self::Custom(_) => "custom".to_string(),
        }
    }
}

impl fmt::Debug for PerturbationTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => f.write_str("Direct"),
            Self::Linked { target, elasticity } => f
                .debug_struct("Linked")
                .field("target", target)
                .field("elasticity", elasticity)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use forecast_core::types::PeriodRecord;

    fn series() -> BaselineSeries {
        BaselineSeries::new(vec![
            PeriodRecord::new("Q1")
                .with_field("cac", 50.0)
                .with_field("promo", 200.0),
            PeriodRecord::new("Q2")
                .with_field("cac", 60.0)
                .with_field("promo", 300.0),
        ])
        .unwrap()
    }

    fn level(pct: f64) -> PerturbationLevel {
        PerturbationLevel::new(pct).unwrap()
    }

    #[test]
    fn test_direct_scales_own_field() {
        let out = PerturbationTransform::Direct
            .apply(&series(), "cac", level(10.0))
            .unwrap();
        assert_relative_eq!(out.sum("cac").unwrap(), 121.0, epsilon = 1e-9);
        assert_eq!(out.sum("promo").unwrap(), 500.0);
    }

    #[test]
    fn test_inverse_scales_target_down() {
        let out = PerturbationTransform::inverse("promo")
            .apply(&series(), "cac", level(10.0))
            .unwrap();
        assert_relative_eq!(out.sum("promo").unwrap(), 450.0, epsilon = 1e-9);
        assert_eq!(out.sum("cac").unwrap(), 110.0);
    }

    #[test]
    fn test_dampened_halves_the_level() {
        let out = PerturbationTransform::dampened("promo", 0.5)
            .apply(&series(), "cac", level(20.0))
            .unwrap();
        assert_relative_eq!(out.sum("promo").unwrap(), 550.0, epsilon = 1e-9);
    }

    #[test]
    fn test_custom_transform() {
        let shift = PerturbationTransform::custom(|s, p, l| {
            s.map_records(|r| {
                let v = r.require(p)?;
                r.replaced(p, v + l.pct())
            })
        });
        let out = shift.apply(&series(), "cac", level(-5.0)).unwrap();
        assert_eq!(out.column("cac").unwrap(), vec![45.0, 55.0]);
        assert_eq!(shift.target("cac"), None);
    }

    #[test]
    fn test_missing_target() {
        let err = PerturbationTransform::redirect("mrr")
            .apply(&series(), "cac", level(10.0))
            .unwrap_err();
        assert!(matches!(err, SeriesError::MissingField { ref field, .. } if field == "mrr"));
    }

    #[test]
    fn test_describe() {
        assert_eq!(PerturbationTransform::Direct.describe(), "direct");
        assert_eq!(
            PerturbationTransform::inverse("promo").describe(),
            "inverse → promo"
        );
        assert_eq!(
            PerturbationTransform::dampened("top", 0.5).describe(),
            "0.5× → top"
        );
    }
}
