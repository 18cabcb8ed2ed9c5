use crate::errors::DashboardError;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const MONTHS_PER_YEAR: usize = 12;

/// Twelve monthly samples, January first. Always finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct MonthlySeries([f64; MONTHS_PER_YEAR]);

impl MonthlySeries {
    pub fn new(values: &[f64]) -> Result<Self, DashboardError> {
        if values.len() != MONTHS_PER_YEAR {
            return Err(DashboardError::MalformedSeries(format!(
                "expected {MONTHS_PER_YEAR} monthly values, got {}",
                values.len()
            )));
        }
        if let Some((month, value)) = values
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite() || **value < 0.0)
        {
            return Err(DashboardError::MalformedSeries(format!(
                "month {} has invalid value {value}",
                month + 1
            )));
        }

        let mut samples = [0.0; MONTHS_PER_YEAR];
        samples.copy_from_slice(values);
        Ok(Self(samples))
    }

    /// Wraps samples known to be valid at compile time.
    pub(crate) const fn from_array(samples: [f64; MONTHS_PER_YEAR]) -> Self {
        Self(samples)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn mean(&self) -> f64 {
        self.sum() / MONTHS_PER_YEAR as f64
    }
}

impl TryFrom<Vec<f64>> for MonthlySeries {
    type Error = DashboardError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(&values)
    }
}

impl From<MonthlySeries> for Vec<f64> {
    fn from(series: MonthlySeries) -> Self {
        series.0.to_vec()
    }
}

/// A year holds either one historical series or one series per forecast scenario.
/// JSON form: an array for actuals, an object of arrays for forecasts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum YearEntry {
    Actual(MonthlySeries),
    Forecast(BTreeMap<String, MonthlySeries>),
}

impl<'de> Deserialize<'de> for YearEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(YearEntryVisitor)
    }
}

struct YearEntryVisitor;

impl<'de> Visitor<'de> for YearEntryVisitor {
    type Value = YearEntry;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an array of monthly values or a map of scenario series")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(MONTHS_PER_YEAR));
        while let Some(value) = seq.next_element::<f64>()? {
            values.push(value);
        }
        MonthlySeries::new(&values)
            .map(YearEntry::Actual)
            .map_err(de::Error::custom)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut scenarios = BTreeMap::new();
        while let Some((key, series)) = map.next_entry::<String, MonthlySeries>()? {
            scenarios.insert(key, series);
        }
        Ok(YearEntry::Forecast(scenarios))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearlyDataset {
    pub years: BTreeMap<i32, YearEntry>,
}

impl YearlyDataset {
    pub fn with_actual(mut self, year: i32, values: &[f64]) -> Result<Self, DashboardError> {
        self.years
            .insert(year, YearEntry::Actual(MonthlySeries::new(values)?));
        Ok(self)
    }

    pub fn with_forecast(
        mut self,
        year: i32,
        scenarios: &[(&str, &[f64])],
    ) -> Result<Self, DashboardError> {
        let mut map = BTreeMap::new();
        for (key, values) in scenarios {
            map.insert(key.to_string(), MonthlySeries::new(values)?);
        }
        self.years.insert(year, YearEntry::Forecast(map));
        Ok(self)
    }

    pub fn entry(&self, year: i32) -> Result<&YearEntry, DashboardError> {
        self.years.get(&year).ok_or(DashboardError::MissingYear(year))
    }

    pub fn actual(&self, year: i32) -> Result<&MonthlySeries, DashboardError> {
        match self.entry(year)? {
            YearEntry::Actual(series) => Ok(series),
            YearEntry::Forecast(_) => Err(DashboardError::IncompleteDataset(format!(
                "{year} holds forecasts, not actuals"
            ))),
        }
    }

    /// Series for `year`. Historical years ignore `scenario`; forecast years
    /// require a key present in their scenario map.
    pub fn series(&self, year: i32, scenario: Option<&str>) -> Result<&MonthlySeries, DashboardError> {
        match self.entry(year)? {
            YearEntry::Actual(series) => Ok(series),
            YearEntry::Forecast(scenarios) => {
                let key = scenario.unwrap_or_default();
                scenarios
                    .get(key)
                    .ok_or_else(|| DashboardError::InvalidScenario(key.to_string()))
            }
        }
    }

    pub fn historical_years(&self) -> Vec<i32> {
        self.years
            .iter()
            .filter(|(_, entry)| matches!(entry, YearEntry::Actual(_)))
            .map(|(year, _)| *year)
            .collect()
    }

    pub fn forecast_year(&self) -> Option<i32> {
        self.years
            .iter()
            .rev()
            .find(|(_, entry)| matches!(entry, YearEntry::Forecast(_)))
            .map(|(year, _)| *year)
    }

    pub fn scenario_keys(&self) -> Vec<&str> {
        match self.forecast_year().and_then(|year| self.years.get(&year)) {
            Some(YearEntry::Forecast(scenarios)) => scenarios.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub market: String,
    pub travel_queries: YearlyDataset,
    pub impressions: YearlyDataset,
    pub flight_searches: YearlyDataset,
    pub hotel_guests: YearlyDataset,
}

impl MarketData {
    /// Checks the shape the dashboard relies on: two historical query years,
    /// one forecast year with lowercase scenario keys.
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.travel_queries.historical_years().len() < 2 {
            return Err(DashboardError::IncompleteDataset(
                "travel queries need at least two historical years".into(),
            ));
        }
        if self.travel_queries.forecast_year().is_none() {
            return Err(DashboardError::IncompleteDataset(
                "travel queries need a forecast year".into(),
            ));
        }
        for key in self.travel_queries.scenario_keys() {
            let valid = !key.is_empty()
                && key != "actual"
                && key
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
            if !valid {
                return Err(DashboardError::IncompleteDataset(format!(
                    "scenario key '{key}' must be lowercase and not 'actual'"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledSeries {
    pub label: String,
    pub series: MonthlySeries,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElasticityResult {
    pub elasticity: f64,
    pub impressions_change: f64,
    pub queries_change: f64,
    pub total_impressions_base: f64,
    pub total_impressions_compare: f64,
    pub avg_queries_base: f64,
    pub avg_queries_compare: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElasticityReport {
    pub elasticity: String,
    pub impressions_change: String,
    pub queries_change: String,
    pub total_impressions_base: f64,
    pub total_impressions_compare: f64,
    pub avg_queries_base: String,
    pub avg_queries_compare: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElasticityResponse {
    pub base_year: i32,
    pub compare_year: i32,
    pub scenario: String,
    #[serde(flatten)]
    pub report: ElasticityReport,
}

#[derive(Debug, Default, Deserialize)]
pub struct ElasticityQuery {
    pub base: Option<i32>,
    pub compare: Option<i32>,
    pub scenario: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioRequest {
    pub scenario: String,
}

#[derive(Debug, Serialize)]
pub struct ScenariosResponse {
    pub active: String,
    pub scenarios: Vec<String>,
}
