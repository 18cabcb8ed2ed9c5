use crate::errors::DashboardError;
use crate::models::{LabeledSeries, YearlyDataset};
use std::fmt;
use std::str::FromStr;

pub const ACTUAL: &str = "actual";

/// What the queries chart compares: two historical years, or the latest
/// historical year against one forecast scenario.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scenario {
    #[default]
    Actual,
    Forecast(String),
}

impl Scenario {
    pub fn key(&self) -> &str {
        match self {
            Scenario::Actual => ACTUAL,
            Scenario::Forecast(key) => key.as_str(),
        }
    }
}

impl FromStr for Scenario {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        match key.as_str() {
            "" => Err(DashboardError::InvalidScenario(s.to_string())),
            ACTUAL => Ok(Scenario::Actual),
            _ => Ok(Scenario::Forecast(key)),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

pub fn select_series(
    scenario: &Scenario,
    dataset: &YearlyDataset,
) -> Result<[LabeledSeries; 2], DashboardError> {
    let history = dataset.historical_years();

    match scenario {
        Scenario::Actual => {
            let [previous, latest] = match history.as_slice() {
                [.., previous, latest] => [*previous, *latest],
                _ => {
                    return Err(DashboardError::IncompleteDataset(
                        "two historical years are required".into(),
                    ));
                }
            };
            Ok([actual_series(dataset, previous)?, actual_series(dataset, latest)?])
        }
        Scenario::Forecast(key) => {
            let latest = *history.last().ok_or_else(|| {
                DashboardError::IncompleteDataset("no historical year to compare against".into())
            })?;
            let forecast_year = dataset
                .forecast_year()
                .ok_or_else(|| DashboardError::InvalidScenario(key.clone()))?;
            let forecast = dataset.series(forecast_year, Some(key.as_str()))?;

            Ok([
                actual_series(dataset, latest)?,
                LabeledSeries {
                    label: format!("{forecast_year} {}", capitalize(key)),
                    series: forecast.clone(),
                },
            ])
        }
    }
}

fn actual_series(dataset: &YearlyDataset, year: i32) -> Result<LabeledSeries, DashboardError> {
    Ok(LabeledSeries {
        label: format!("{year} Actual"),
        series: dataset.actual(year)?.clone(),
    })
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builtin;
    use crate::models::YearEntry;

    #[test]
    fn parse_normalizes_keys() {
        assert_eq!(" Actual ".parse::<Scenario>().unwrap(), Scenario::Actual);
        assert_eq!(
            "MODERATE".parse::<Scenario>().unwrap(),
            Scenario::Forecast("moderate".into())
        );
        assert!(matches!(
            "  ".parse::<Scenario>(),
            Err(DashboardError::InvalidScenario(_))
        ));
        assert_eq!(Scenario::default().to_string(), "actual");
    }

    #[test]
    fn actual_returns_two_distinct_years() {
        let data = builtin();
        let [first, second] = select_series(&Scenario::Actual, &data.travel_queries).unwrap();

        assert_eq!(first.label, "2023 Actual");
        assert_eq!(second.label, "2024 Actual");
        assert_ne!(first.label, second.label);
        assert_eq!(first.series.len(), 12);
        assert_eq!(second.series.len(), 12);
        assert_eq!(first.series.values()[0], 4.18);
    }

    #[test]
    fn forecast_returns_source_series_unchanged() {
        let data = builtin();
        let scenario: Scenario = "moderate".parse().unwrap();
        let [actual, forecast] = select_series(&scenario, &data.travel_queries).unwrap();

        assert_eq!(actual.label, "2024 Actual");
        assert_eq!(forecast.label, "2025 Moderate");
        assert_eq!(&actual.series, data.travel_queries.actual(2024).unwrap());
        match data.travel_queries.entry(2025).unwrap() {
            YearEntry::Forecast(scenarios) => assert_eq!(forecast.series, scenarios["moderate"]),
            YearEntry::Actual(_) => panic!("2025 should hold forecasts"),
        }
    }

    #[test]
    fn every_builtin_scenario_is_selectable() {
        let data = builtin();
        for key in data.travel_queries.scenario_keys() {
            let scenario: Scenario = key.parse().unwrap();
            let pair = select_series(&scenario, &data.travel_queries).unwrap();
            assert!(pair[1].label.starts_with("2025 "));
        }
    }

    #[test]
    fn unknown_scenario_is_rejected() {
        let data = builtin();
        let scenario: Scenario = "optimistic".parse().unwrap();
        let err = select_series(&scenario, &data.travel_queries).unwrap_err();
        assert_eq!(err, DashboardError::InvalidScenario("optimistic".into()));
    }

    #[test]
    fn actual_needs_two_years_of_history() {
        let dataset = YearlyDataset::default().with_actual(2024, &[1.0; 12]).unwrap();
        assert!(matches!(
            select_series(&Scenario::Actual, &dataset),
            Err(DashboardError::IncompleteDataset(_))
        ));
    }

    #[test]
    fn capitalize_handles_empty_and_single_char() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("a"), "A");
        assert_eq!(capitalize("ambitious"), "Ambitious");
    }
}
