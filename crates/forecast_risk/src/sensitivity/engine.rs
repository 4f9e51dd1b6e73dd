//! One-at-a-time sensitivity engine.
//!
//! For every registered parameter and every level, the engine builds a
//! perturbed copy of the baseline through the parameter's
//! [`PerturbationTransform`], evaluates the aggregate on it and records the
//! percentage change against the baseline aggregate:
//!
//! ```text
//! impact(p, L) = (aggregate(perturb(baseline, p, L)) - aggregate(baseline))
//!                / aggregate(baseline) * 100
//! ```
//!
//! Parameters are perturbed independently; joint moves are not modelled.
//! The baseline aggregate is evaluated once per run and the 0 % column is
//! filled without re-evaluation, so it is exactly zero.

use super::error::SensitivityError;
use super::levels::{LevelSet, PerturbationLevel};
use super::table::{ImpactResult, ImpactRow, ImpactTable};
use super::transform::PerturbationTransform;
use crate::parallel::{try_parallel_map, ParallelConfig};
use forecast_core::math::percent_change;
use forecast_core::traits::Aggregation;
use forecast_core::types::BaselineSeries;
use tracing::{debug, info};

/// Sensitivity engine over an aggregate outcome `A`.
///
/// # Examples
///
/// ```
/// use forecast_core::types::{BaselineSeries, PeriodRecord, SeriesError};
/// use forecast_risk::sensitivity::{LevelSet, SensitivityEngine};
///
/// let net = |s: &BaselineSeries| -> Result<f64, SeriesError> {
///     Ok(s.sum("revenue")? - s.sum("cost")?)
/// };
///
/// let baseline = BaselineSeries::new(vec![
///     PeriodRecord::new("Q1").with_field("revenue", 100.0).with_field("cost", 40.0),
///     PeriodRecord::new("Q2").with_field("revenue", 100.0).with_field("cost", 40.0),
/// ])
/// .unwrap();
///
/// let table = SensitivityEngine::new(net)
///     .with_parameters(["revenue", "cost"])
///     .with_levels(LevelSet::new([-10.0, 0.0, 10.0]).unwrap())
///     .run(&baseline)
///     .unwrap();
///
/// let revenue_up = table.impact("revenue", 10.0).unwrap();
/// assert!((revenue_up - 100.0 / 6.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct SensitivityEngine<A> {
    aggregate: A,
    parameters: Vec<(String, PerturbationTransform)>,
    levels: LevelSet,
    parallel: ParallelConfig,
}

impl<A: Aggregation> SensitivityEngine<A> {
    /// Create an engine with the default level grid and no parameters.
    pub fn new(aggregate: A) -> Self {
        Self {
            aggregate,
            parameters: Vec::new(),
            levels: LevelSet::default(),
            parallel: ParallelConfig::default(),
        }
    }

    /// Register a parameter with direct scaling.
    pub fn with_parameter(self, name: impl Into<String>) -> Self {
        self.with_transform(name, PerturbationTransform::Direct)
    }

    /// Register several parameters with direct scaling.
    pub fn with_parameters<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .fold(self, |engine, name| engine.with_parameter(name))
    }

    /// Register a parameter with a specific transform.
    ///
    /// Re-registering a parameter replaces its transform and keeps its
    /// original position in the table.
    pub fn with_transform(mut self, name: impl Into<String>, transform: PerturbationTransform) -> Self {
        let name = name.into();
        match self.parameters.iter_mut().find(|(p, _)| *p == name) {
            Some(entry) => entry.1 = transform,
            None => self.parameters.push((name, transform)),
        }
        self
    }

    /// Replace the level grid.
    pub fn with_levels(mut self, levels: LevelSet) -> Self {
        self.levels = levels;
        self
    }

    /// Replace the parallel execution settings used by [`Self::run_parallel`].
    pub fn with_parallel_config(mut self, config: ParallelConfig) -> Self {
        self.parallel = config;
        self
    }

    /// The aggregate outcome.
    pub fn aggregate(&self) -> &A {
        &self.aggregate
    }

    /// Name of the aggregate outcome.
    pub fn aggregate_name(&self) -> &str {
        self.aggregate.name()
    }

    /// Registered parameters in order.
    pub fn parameters(&self) -> Vec<&str> {
        self.parameters.iter().map(|(p, _)| p.as_str()).collect()
    }

    /// Transform registered for a parameter.
    pub fn transform(&self, parameter: &str) -> Option<&PerturbationTransform> {
        self.parameters
            .iter()
            .find(|(p, _)| p == parameter)
            .map(|(_, t)| t)
    }

    /// The level grid.
    pub fn levels(&self) -> &LevelSet {
        &self.levels
    }

    /// Run the analysis sequentially.
    ///
    /// # Errors
    ///
    /// - `EmptySeries` if the baseline has no periods
    /// - `MissingField` if a parameter or transform target is absent
    /// - `DivisionByZero` if the baseline aggregate is zero
    /// - `NonFiniteAggregate` if an aggregate evaluates to NaN or infinity
    pub fn run(&self, baseline: &BaselineSeries) -> Result<ImpactTable, SensitivityError> {
        self.execute(baseline, None)
    }

    /// Run the analysis with the parameter × level grid spread over Rayon.
    ///
    /// Produces exactly the same table as [`Self::run`].
    pub fn run_parallel(&self, baseline: &BaselineSeries) -> Result<ImpactTable, SensitivityError> {
        self.execute(baseline, Some(&self.parallel))
    }

    fn execute(
        &self,
        baseline: &BaselineSeries,
        parallel: Option<&ParallelConfig>,
    ) -> Result<ImpactTable, SensitivityError> {
        let base = self.prepare(baseline)?;
        info!(
            aggregate = self.aggregate_name(),
            baseline = base,
            parameters = self.parameters.len(),
            levels = self.levels.len(),
            parallel = parallel.is_some(),
            "Running sensitivity analysis"
        );

        let cells: Vec<(usize, PerturbationLevel)> = (0..self.parameters.len())
            .flat_map(|p| self.levels.iter().map(move |&level| (p, level)))
            .collect();
        let evaluate = |&(p, level): &(usize, PerturbationLevel)| {
            let (parameter, transform) = &self.parameters[p];
            self.evaluate_cell(baseline, base, parameter, transform, level)
        };
        let results = match parallel {
            Some(config) => try_parallel_map(&cells, config, evaluate)?,
            None => cells.iter().map(evaluate).collect::<Result<Vec<_>, _>>()?,
        };

        let width = self.levels.len();
        let rows = self
            .parameters
            .iter()
            .enumerate()
            .map(|(i, (parameter, _))| {
                let row = ImpactRow {
                    parameter: parameter.clone(),
                    results: results[i * width..(i + 1) * width].to_vec(),
                };
                debug!(parameter = %row.parameter, swing = row.swing(), "Parameter analysed");
                row
            })
            .collect();

        Ok(ImpactTable::new(
            self.aggregate_name(),
            base,
            self.levels.clone(),
            rows,
        ))
    }

    /// Validates the baseline and returns its aggregate.
    fn prepare(&self, baseline: &BaselineSeries) -> Result<f64, SensitivityError> {
        if baseline.is_empty() {
            return Err(SensitivityError::EmptySeries);
        }
        for (parameter, transform) in &self.parameters {
            baseline.require_field(parameter)?;
            if let Some(target) = transform.target(parameter) {
                baseline.require_field(target)?;
            }
        }

        let base = self.aggregate.aggregate(baseline)?;
        if !base.is_finite() {
            return Err(SensitivityError::non_finite("baseline", base));
        }
        if base == 0.0 {
            return Err(SensitivityError::DivisionByZero {
                aggregate: self.aggregate_name().to_string(),
            });
        }
        Ok(base)
    }

    fn evaluate_cell(
        &self,
        baseline: &BaselineSeries,
        base: f64,
        parameter: &str,
        transform: &PerturbationTransform,
        level: PerturbationLevel,
    ) -> Result<ImpactResult, SensitivityError> {
        if level.is_identity() {
            return Ok(ImpactResult {
                level,
                aggregate: base,
                impact_pct: 0.0,
            });
        }

        let perturbed = transform.apply(baseline, parameter, level)?;
        let aggregate = self.aggregate.aggregate(&perturbed)?;
        if !aggregate.is_finite() {
            return Err(SensitivityError::non_finite(
                format!("parameter '{}' at {}", parameter, level),
                aggregate,
            ));
        }
        let impact_pct = percent_change(aggregate, base).ok_or_else(|| SensitivityError::DivisionByZero {
            aggregate: self.aggregate_name().to_string(),
        })?;

        Ok(ImpactResult {
            level,
            aggregate,
            impact_pct,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use forecast_core::traits::FieldSum;
    use forecast_core::types::{PeriodRecord, SeriesError};

    fn net(s: &BaselineSeries) -> Result<f64, SeriesError> {
        Ok(s.sum("revenue")? - s.sum("cost")?)
    }

    fn baseline(revenue: f64, cost: f64) -> BaselineSeries {
        BaselineSeries::new(vec![
            PeriodRecord::new("Q1")
                .with_field("revenue", revenue)
                .with_field("cost", cost),
            PeriodRecord::new("Q2")
                .with_field("revenue", revenue)
                .with_field("cost", cost),
        ])
        .unwrap()
    }

    #[test]
    fn test_revenue_and_cost_impacts() {
        let table = SensitivityEngine::new(net)
            .with_parameters(["revenue", "cost"])
            .run(&baseline(100.0, 40.0))
            .unwrap();

        assert_eq!(table.baseline(), 120.0);
        assert_relative_eq!(table.impact("revenue", 10.0).unwrap(), 100.0 / 6.0, epsilon = 1e-10);
        assert_relative_eq!(table.impact("cost", 10.0).unwrap(), -20.0 / 3.0, epsilon = 1e-10);
        assert_relative_eq!(table.get("revenue").unwrap().at(10.0).unwrap().aggregate, 140.0, epsilon = 1e-10);
        assert_relative_eq!(table.get("cost").unwrap().at(10.0).unwrap().aggregate, 112.0, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_baseline_is_division_by_zero() {
        let err = SensitivityEngine::new(net)
            .with_parameter("revenue")
            .run(&baseline(50.0, 50.0))
            .unwrap_err();
        assert_eq!(
            err,
            SensitivityError::DivisionByZero {
                aggregate: "aggregate".to_string()
            }
        );
    }

    #[test]
    fn test_missing_parameter() {
        let err = SensitivityEngine::new(FieldSum::new("revenue"))
            .with_parameter("volume")
            .run(&baseline(100.0, 40.0))
            .unwrap_err();
        assert!(matches!(err, SensitivityError::MissingField { ref field, ref period }
            if field == "volume" && period == "Q1"));
    }

    #[test]
    fn test_missing_transform_target() {
        let err = SensitivityEngine::new(FieldSum::new("revenue"))
            .with_transform("cost", PerturbationTransform::inverse("promo"))
            .run(&baseline(100.0, 40.0))
            .unwrap_err();
        assert!(matches!(err, SensitivityError::MissingField { ref field, .. } if field == "promo"));
    }

    #[test]
    fn test_level_zero_is_exactly_zero() {
        let table = SensitivityEngine::new(net)
            .with_parameters(["revenue", "cost"])
            .run(&baseline(100.0, 40.0))
            .unwrap();
        for row in table.rows() {
            let zero = row.at(0.0).unwrap();
            assert_eq!(zero.impact_pct, 0.0);
            assert_eq!(zero.aggregate, table.baseline());
        }
    }

    #[test]
    fn test_empty_levels_give_empty_rows() {
        let table = SensitivityEngine::new(net)
            .with_parameter("revenue")
            .with_levels(LevelSet::empty())
            .run(&baseline(100.0, 40.0))
            .unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.rows()[0].results.is_empty());
    }

    #[test]
    fn test_reregistering_keeps_position() {
        let engine = SensitivityEngine::new(net)
            .with_parameters(["revenue", "cost"])
            .with_transform("revenue", PerturbationTransform::redirect("cost"));
        assert_eq!(engine.parameters(), vec!["revenue", "cost"]);
        assert!(matches!(
            engine.transform("revenue"),
            Some(PerturbationTransform::Linked { .. })
        ));
    }

    #[test]
    fn test_non_finite_aggregate() {
        let ratio = |s: &BaselineSeries| -> Result<f64, SeriesError> {
            Ok(s.sum("revenue")? / s.sum("cost")?)
        };
        let err = SensitivityEngine::new(ratio)
            .with_parameter("cost")
            .with_levels(LevelSet::new([-100.0]).unwrap())
            .run(&baseline(100.0, 40.0))
            .unwrap_err();
        assert!(matches!(err, SensitivityError::NonFiniteAggregate { .. }));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let engine = SensitivityEngine::new(net)
            .with_parameters(["revenue", "cost"])
            .with_levels(LevelSet::symmetric(&[5.0, 10.0, 15.0, 20.0]).unwrap())
            .with_parallel_config(ParallelConfig::always());
        let data = baseline(100.0, 40.0);
        assert_eq!(engine.run(&data).unwrap(), engine.run_parallel(&data).unwrap());
    }
}
