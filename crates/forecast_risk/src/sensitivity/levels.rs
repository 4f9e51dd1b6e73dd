//! Perturbation levels and level sets.

use super::error::SensitivityError;
use forecast_core::math;
use std::fmt;

/// Default level grid in percent.
pub const DEFAULT_LEVELS: [f64; 5] = [-20.0, -10.0, 0.0, 10.0, 20.0];

/// A signed percentage applied multiplicatively to a parameter.
///
/// Always finite. Negative zero is normalised to zero.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PerturbationLevel(f64);

impl PerturbationLevel {
    /// The identity perturbation.
    pub const ZERO: Self = Self(0.0);

    /// Create a level from a percentage.
    ///
    /// # Errors
    ///
    /// `InvalidLevel` if `pct` is NaN or infinite.
    pub fn new(pct: f64) -> Result<Self, SensitivityError> {
        if pct.is_finite() {
            Ok(Self(pct + 0.0))
        } else {
            Err(SensitivityError::invalid_level(format!(
                "level must be a finite percentage, got {}",
                pct
            )))
        }
    }

    /// The level in percent.
    #[inline]
    pub fn pct(&self) -> f64 {
        self.0
    }

    /// Multiplicative factor `1 + level/100`.
    #[inline]
    pub fn multiplier(&self) -> f64 {
        math::multiplier(self.0)
    }

    /// Multiplicative factor `1 + elasticity * level/100`.
    #[inline]
    pub fn multiplier_with(&self, elasticity: f64) -> f64 {
        math::multiplier(elasticity * self.0)
    }

    /// True for the 0 % level.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.0 == 0.0
    }
}

impl fmt::Display for PerturbationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0.0 {
            write!(f, "+{}%", self.0)
        } else {
            write!(f, "{}%", self.0)
        }
    }
}

impl TryFrom<f64> for PerturbationLevel {
    type Error = SensitivityError;

    fn try_from(pct: f64) -> Result<Self, Self::Error> {
        Self::new(pct)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PerturbationLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let pct = f64::deserialize(deserializer)?;
        Self::new(pct).map_err(serde::de::Error::custom)
    }
}

/// Ordered, de-duplicated set of perturbation levels.
///
/// Levels are kept in ascending order. A non-empty set always contains the
/// 0 % level so that every impact table carries its identity column; an
/// empty set is allowed and produces a table with no columns.
///
/// # Examples
///
/// ```
/// use forecast_risk::sensitivity::LevelSet;
///
/// let levels = LevelSet::new([10.0, -10.0, 10.0]).unwrap();
/// let pcts: Vec<f64> = levels.iter().map(|l| l.pct()).collect();
/// assert_eq!(pcts, vec![-10.0, 0.0, 10.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<f64>", into = "Vec<f64>"))]
pub struct LevelSet {
    levels: Vec<PerturbationLevel>,
}

impl LevelSet {
    /// Build a level set from percentages.
    ///
    /// # Errors
    ///
    /// `InvalidLevel` if any percentage is not finite.
    pub fn new(levels: impl IntoIterator<Item = f64>) -> Result<Self, SensitivityError> {
        let levels = levels
            .into_iter()
            .map(PerturbationLevel::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::normalised(levels))
    }

    /// An empty level set.
    pub fn empty() -> Self {
        Self { levels: Vec::new() }
    }

    /// Symmetric grid `±step` for each step, plus 0.
    ///
    /// # Errors
    ///
    /// `InvalidLevel` if any step is not finite.
    pub fn symmetric(steps: &[f64]) -> Result<Self, SensitivityError> {
        Self::new(steps.iter().flat_map(|&s| [-s, s]).chain([0.0]))
    }

    /// Symmetric grid from compile-time constants.
    pub(crate) fn symmetric_steps(steps: &[f64]) -> Self {
        debug_assert!(steps.iter().all(|s| s.is_finite()));
        Self::normalised(
            steps
                .iter()
                .flat_map(|&s| [PerturbationLevel(-s), PerturbationLevel(s)])
                .collect(),
        )
    }

    fn normalised(mut levels: Vec<PerturbationLevel>) -> Self {
        if !levels.is_empty() && !levels.iter().any(PerturbationLevel::is_identity) {
            levels.push(PerturbationLevel::ZERO);
        }
        levels.sort_by(|a, b| a.0.total_cmp(&b.0));
        levels.dedup();
        Self { levels }
    }

    /// Levels in ascending order.
    #[inline]
    pub fn levels(&self) -> &[PerturbationLevel] {
        &self.levels
    }

    /// Iterate over levels in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &PerturbationLevel> {
        self.levels.iter()
    }

    /// Number of levels.
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// True if the set has no levels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Column index of a level given in percent.
    pub fn position(&self, pct: f64) -> Option<usize> {
        self.levels.iter().position(|l| l.0 == pct)
    }
}

impl Default for LevelSet {
    fn default() -> Self {
        Self::symmetric_steps(&[10.0, 20.0])
    }
}

impl TryFrom<Vec<f64>> for LevelSet {
    type Error = SensitivityError;

    fn try_from(levels: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(levels)
    }
}

impl From<LevelSet> for Vec<f64> {
    fn from(set: LevelSet) -> Self {
        set.levels.iter().map(PerturbationLevel::pct).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_levels() {
        let pcts: Vec<f64> = LevelSet::default().into();
        assert_eq!(pcts, DEFAULT_LEVELS.to_vec());
    }

    #[test]
    fn test_zero_is_inserted() {
        let set = LevelSet::new([20.0, -20.0]).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.position(0.0), Some(1));
    }

    #[test]
    fn test_empty_set_stays_empty() {
        let set = LevelSet::new(Vec::<f64>::new()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set, LevelSet::empty());
    }

    #[test]
    fn test_negative_zero_is_deduplicated() {
        let set = LevelSet::new([-0.0, 0.0, 5.0]).unwrap();
        let pcts: Vec<f64> = set.into();
        assert_eq!(pcts, vec![0.0, 5.0]);
    }

    #[test]
    fn test_non_finite_level_rejected() {
        assert!(matches!(
            LevelSet::new([10.0, f64::NAN]),
            Err(SensitivityError::InvalidLevel(_))
        ));
        assert!(PerturbationLevel::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_symmetric() {
        let pcts: Vec<f64> = LevelSet::symmetric(&[5.0, 10.0]).unwrap().into();
        assert_eq!(pcts, vec![-10.0, -5.0, 0.0, 5.0, 10.0]);
    }

    #[test]
    fn test_multipliers() {
        let level = PerturbationLevel::new(10.0).unwrap();
        assert_relative_eq!(level.multiplier(), 1.1, epsilon = 1e-12);
        assert_relative_eq!(level.multiplier_with(-1.0), 0.9, epsilon = 1e-12);
        assert_relative_eq!(level.multiplier_with(0.5), 1.05, epsilon = 1e-12);
        assert_eq!(PerturbationLevel::ZERO.multiplier(), 1.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(PerturbationLevel::new(10.0).unwrap().to_string(), "+10%");
        assert_eq!(PerturbationLevel::new(-20.0).unwrap().to_string(), "-20%");
        assert_eq!(PerturbationLevel::ZERO.to_string(), "0%");
        assert_eq!(PerturbationLevel::new(2.5).unwrap().to_string(), "+2.5%");
    }
}
