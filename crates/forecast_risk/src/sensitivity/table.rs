//! Impact results and the impact table.

use super::levels::{LevelSet, PerturbationLevel};

/// Outcome of one (parameter, level) perturbation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpactResult {
    /// Perturbation level
    pub level: PerturbationLevel,
    /// Aggregate of the perturbed series
    pub aggregate: f64,
    /// `(aggregate - baseline) / baseline * 100`
    pub impact_pct: f64,
}

/// All results for one parameter, one per level in ascending level order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpactRow {
    /// Parameter name
    pub parameter: String,
    /// Results in level order
    pub results: Vec<ImpactResult>,
}

impl ImpactRow {
    /// Result at a level given in percent.
    pub fn at(&self, pct: f64) -> Option<&ImpactResult> {
        self.results.iter().find(|r| r.level.pct() == pct)
    }

    /// Smallest impact in the row.
    pub fn min_impact(&self) -> Option<f64> {
        self.results.iter().map(|r| r.impact_pct).reduce(f64::min)
    }

    /// Largest impact in the row.
    pub fn max_impact(&self) -> Option<f64> {
        self.results.iter().map(|r| r.impact_pct).reduce(f64::max)
    }

    /// Spread between largest and smallest impact (tornado bar width).
    pub fn swing(&self) -> f64 {
        match (self.min_impact(), self.max_impact()) {
            (Some(lo), Some(hi)) => hi - lo,
            _ => 0.0,
        }
    }
}

/// Full one-at-a-time sensitivity surface for one baseline.
///
/// Rows follow parameter registration order; every row has one result per
/// level of [`ImpactTable::levels`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpactTable {
    aggregate_name: String,
    baseline: f64,
    levels: LevelSet,
    rows: Vec<ImpactRow>,
}

impl ImpactTable {
    pub(crate) fn new(
        aggregate_name: impl Into<String>,
        baseline: f64,
        levels: LevelSet,
        rows: Vec<ImpactRow>,
    ) -> Self {
        Self {
            aggregate_name: aggregate_name.into(),
            baseline,
            levels,
            rows,
        }
    }

    /// Name of the aggregate outcome.
    pub fn aggregate_name(&self) -> &str {
        &self.aggregate_name
    }

    /// Baseline aggregate.
    #[inline]
    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Level columns.
    pub fn levels(&self) -> &LevelSet {
        &self.levels
    }

    /// Rows in registration order.
    pub fn rows(&self) -> &[ImpactRow] {
        &self.rows
    }

    /// Parameter names in registration order.
    pub fn parameters(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.parameter.as_str()).collect()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if no parameters were analysed.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for a parameter.
    pub fn get(&self, parameter: &str) -> Option<&ImpactRow> {
        self.rows.iter().find(|r| r.parameter == parameter)
    }

    /// Impact in percent of `parameter` at a level given in percent.
    pub fn impact(&self, parameter: &str, pct: f64) -> Option<f64> {
        self.get(parameter)?.at(pct).map(|r| r.impact_pct)
    }

    /// Swing of a parameter.
    pub fn swing(&self, parameter: &str) -> Option<f64> {
        self.get(parameter).map(ImpactRow::swing)
    }

    /// Rows sorted by descending swing; ties keep registration order.
    pub fn tornado_order(&self) -> Vec<&ImpactRow> {
        let mut rows: Vec<&ImpactRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| b.swing().total_cmp(&a.swing()));
        rows
    }

    /// Smallest and largest perturbed aggregate in the table.
    pub fn outcome_range(&self) -> Option<(f64, f64)> {
        self.results().map(|r| r.aggregate).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Smallest impact across the table.
    pub fn min_impact(&self) -> Option<f64> {
        self.results().map(|r| r.impact_pct).reduce(f64::min)
    }

    /// Largest impact across the table.
    pub fn max_impact(&self) -> Option<f64> {
        self.results().map(|r| r.impact_pct).reduce(f64::max)
    }

    fn results(&self) -> impl Iterator<Item = &ImpactResult> {
        self.rows.iter().flat_map(|r| r.results.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(pct: f64, aggregate: f64, impact_pct: f64) -> ImpactResult {
        ImpactResult {
            level: PerturbationLevel::new(pct).unwrap(),
            aggregate,
            impact_pct,
        }
    }

    fn table() -> ImpactTable {
        let levels = LevelSet::new([-10.0, 0.0, 10.0]).unwrap();
        ImpactTable::new(
            "net",
            100.0,
            levels,
            vec![
                ImpactRow {
                    parameter: "price".to_string(),
                    results: vec![
                        result(-10.0, 80.0, -20.0),
                        result(0.0, 100.0, 0.0),
                        result(10.0, 120.0, 20.0),
                    ],
                },
                ImpactRow {
                    parameter: "cost".to_string(),
                    results: vec![
                        result(-10.0, 105.0, 5.0),
                        result(0.0, 100.0, 0.0),
                        result(10.0, 95.0, -5.0),
                    ],
                },
                ImpactRow {
                    parameter: "fx".to_string(),
                    results: vec![
                        result(-10.0, 100.0, 0.0),
                        result(0.0, 100.0, 0.0),
                        result(10.0, 100.0, 0.0),
                    ],
                },
            ],
        )
    }

    #[test]
    fn test_lookup() {
        let t = table();
        assert_eq!(t.parameters(), vec!["price", "cost", "fx"]);
        assert_eq!(t.impact("cost", 10.0), Some(-5.0));
        assert_eq!(t.impact("cost", 20.0), None);
        assert_eq!(t.impact("volume", 10.0), None);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_swing_and_tornado_order() {
        let t = table();
        assert_eq!(t.swing("price"), Some(40.0));
        assert_eq!(t.swing("fx"), Some(0.0));

        let order: Vec<&str> = t
            .tornado_order()
            .iter()
            .map(|r| r.parameter.as_str())
            .collect();
        assert_eq!(order, vec!["price", "cost", "fx"]);
    }

    #[test]
    fn test_extremes() {
        let t = table();
        assert_eq!(t.outcome_range(), Some((80.0, 120.0)));
        assert_eq!(t.min_impact(), Some(-20.0));
        assert_eq!(t.max_impact(), Some(20.0));
    }

    #[test]
    fn test_empty_table_has_no_extremes() {
        let t = ImpactTable::new("net", 100.0, LevelSet::empty(), Vec::new());
        assert!(t.is_empty());
        assert_eq!(t.outcome_range(), None);
        assert_eq!(t.min_impact(), None);
    }
}
