//! Media elasticity: relative change in average travel queries divided by the
//! relative change in total impressions between two years.

use crate::errors::DashboardError;
use crate::format::{format_fixed, format_percent};
use crate::models::{ElasticityReport, ElasticityResult, MarketData, MonthlySeries};

pub const DEFAULT_BASE_YEAR: i32 = 2024;
pub const DEFAULT_COMPARE_YEAR: i32 = 2025;
pub const DEFAULT_SCENARIO: &str = "moderate";

pub fn calculate_elasticity(
    impressions_base: &[f64],
    impressions_compare: &[f64],
    queries_base: &[f64],
    queries_compare: &[f64],
) -> Result<ElasticityResult, DashboardError> {
    elasticity_between(
        &MonthlySeries::new(impressions_base)?,
        &MonthlySeries::new(impressions_compare)?,
        &MonthlySeries::new(queries_base)?,
        &MonthlySeries::new(queries_compare)?,
    )
}

pub fn elasticity_between(
    impressions_base: &MonthlySeries,
    impressions_compare: &MonthlySeries,
    queries_base: &MonthlySeries,
    queries_compare: &MonthlySeries,
) -> Result<ElasticityResult, DashboardError> {
    let total_base = impressions_base.sum();
    let total_compare = impressions_compare.sum();
    let avg_base = queries_base.mean();
    let avg_compare = queries_compare.mean();

    if ![total_base, total_compare].iter().all(|total| total.is_finite()) {
        return Err(DashboardError::NonFinite("impressions total overflowed"));
    }
    if ![avg_base, avg_compare].iter().all(|avg| avg.is_finite()) {
        return Err(DashboardError::NonFinite("query average overflowed"));
    }
    if total_base == 0.0 {
        return Err(DashboardError::DivisionByZero("base impressions total is zero"));
    }
    if avg_base == 0.0 {
        return Err(DashboardError::DivisionByZero("base query average is zero"));
    }

    let impressions_change = (total_compare - total_base) / total_base;
    let queries_change = (avg_compare - avg_base) / avg_base;
    if impressions_change == 0.0 {
        return Err(DashboardError::DivisionByZero("impressions did not change"));
    }

    let elasticity = queries_change / impressions_change;
    if ![impressions_change, queries_change, elasticity]
        .iter()
        .all(|value| value.is_finite())
    {
        return Err(DashboardError::NonFinite("relative change is out of range"));
    }

    Ok(ElasticityResult {
        elasticity,
        impressions_change,
        queries_change,
        total_impressions_base: total_base,
        total_impressions_compare: total_compare,
        avg_queries_base: avg_base,
        avg_queries_compare: avg_compare,
    })
}

/// Elasticity of `compare_year` against `base_year`. `scenario` picks the
/// forecast series wherever a year holds forecasts.
pub fn media_elasticity(
    data: &MarketData,
    base_year: i32,
    compare_year: i32,
    scenario: &str,
) -> Result<ElasticityResult, DashboardError> {
    elasticity_between(
        data.impressions.series(base_year, Some(scenario))?,
        data.impressions.series(compare_year, Some(scenario))?,
        data.travel_queries.series(base_year, Some(scenario))?,
        data.travel_queries.series(compare_year, Some(scenario))?,
    )
}

impl ElasticityResult {
    pub fn report(&self) -> ElasticityReport {
        ElasticityReport {
            elasticity: format_fixed(self.elasticity, 2),
            impressions_change: format_percent(self.impressions_change),
            queries_change: format_percent(self.queries_change),
            total_impressions_base: self.total_impressions_base,
            total_impressions_compare: self.total_impressions_compare,
            avg_queries_base: format_fixed(self.avg_queries_base, 2),
            avg_queries_compare: format_fixed(self.avg_queries_compare, 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn one_month(total: f64) -> [f64; 12] {
        let mut values = [0.0; 12];
        values[0] = total;
        values
    }

    #[test]
    fn reference_totals_give_expected_ratio() {
        let result = calculate_elasticity(
            &one_month(142_935_393.0),
            &one_month(713_758_806.0),
            &[4.655833; 12],
            &[5.955833; 12],
        )
        .unwrap();

        let report = result.report();
        assert_eq!(report.elasticity, "0.07");
        assert_eq!(report.queries_change, "27.9%");
        assert_eq!(report.impressions_change, "399.4%");
        assert_eq!(report.avg_queries_base, "4.66");
        assert_eq!(report.avg_queries_compare, "5.96");
        assert_eq!(report.total_impressions_base, 142_935_393.0);
    }

    #[test]
    fn builtin_dashboard_figures() {
        let data = crate::data::builtin();
        let result =
            media_elasticity(&data, DEFAULT_BASE_YEAR, DEFAULT_COMPARE_YEAR, DEFAULT_SCENARIO).unwrap();

        assert_eq!(result.total_impressions_base, 164_143_503.0);
        assert_eq!(result.total_impressions_compare, 713_758_806.0);
        assert_relative_eq!(result.avg_queries_base, 4.571_666_666, epsilon = 1e-6);
        assert_relative_eq!(result.avg_queries_compare, 5.878_333_333, epsilon = 1e-6);

        let report = result.report();
        assert_eq!(report.elasticity, "0.09");
        assert_eq!(report.impressions_change, "334.8%");
        assert_eq!(report.queries_change, "28.6%");
    }

    #[test]
    fn calculation_is_deterministic() {
        let data = crate::data::builtin();
        let first = media_elasticity(&data, 2024, 2025, "ambitious").unwrap();
        let second = media_elasticity(&data, 2024, 2025, "ambitious").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn change_signs_follow_the_inputs() {
        let result = calculate_elasticity(&[10.0; 12], &[5.0; 12], &[2.0; 12], &[3.0; 12]).unwrap();
        assert!(result.impressions_change < 0.0);
        assert!(result.queries_change > 0.0);
        assert!(result.elasticity < 0.0);
        assert_relative_eq!(result.elasticity, -1.0);
    }

    #[test]
    fn flat_queries_give_zero_elasticity() {
        let result = calculate_elasticity(&[10.0; 12], &[20.0; 12], &[4.0; 12], &[4.0; 12]).unwrap();
        assert_eq!(result.queries_change, 0.0);
        assert_eq!(result.elasticity, 0.0);
        assert_eq!(result.report().elasticity, "0.00");
    }

    #[test]
    fn zero_base_is_rejected() {
        let err = calculate_elasticity(&[0.0; 12], &[20.0; 12], &[4.0; 12], &[5.0; 12]).unwrap_err();
        assert!(matches!(err, DashboardError::DivisionByZero(_)));

        let err = calculate_elasticity(&[1.0; 12], &[2.0; 12], &[0.0; 12], &[5.0; 12]).unwrap_err();
        assert!(matches!(err, DashboardError::DivisionByZero(_)));
    }

    #[test]
    fn unchanged_impressions_are_rejected() {
        let err = calculate_elasticity(&[7.0; 12], &[7.0; 12], &[4.0; 12], &[5.0; 12]).unwrap_err();
        assert_eq!(err, DashboardError::DivisionByZero("impressions did not change"));
    }

    #[test]
    fn overflowing_totals_are_rejected() {
        let err = calculate_elasticity(&[f64::MAX / 2.0; 12], &[1.0; 12], &[2.0; 12], &[3.0; 12])
            .unwrap_err();
        assert_eq!(err, DashboardError::NonFinite("impressions total overflowed"));

        let err = calculate_elasticity(&[1.0; 12], &[2.0; 12], &[1.0; 12], &[f64::MAX; 12])
            .unwrap_err();
        assert_eq!(err, DashboardError::NonFinite("query average overflowed"));
    }

    #[test]
    fn overflowing_changes_are_rejected() {
        let err = calculate_elasticity(&[1.0; 12], &[2.0; 12], &[1e-300; 12], &[1e300; 12])
            .unwrap_err();
        assert_eq!(err, DashboardError::NonFinite("relative change is out of range"));
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        let err = calculate_elasticity(&[1.0; 11], &[2.0; 12], &[4.0; 12], &[5.0; 12]).unwrap_err();
        assert!(matches!(err, DashboardError::MalformedSeries(_)));

        let mut negative = [1.0; 12];
        negative[3] = -1.0;
        let err = calculate_elasticity(&[1.0; 12], &[2.0; 12], &negative, &[5.0; 12]).unwrap_err();
        assert!(matches!(err, DashboardError::MalformedSeries(_)));
    }

    #[test]
    fn unknown_scenario_is_rejected() {
        let data = crate::data::builtin();
        let err = media_elasticity(&data, 2024, 2025, "reckless").unwrap_err();
        assert_eq!(err, DashboardError::InvalidScenario("reckless".into()));
    }
}
