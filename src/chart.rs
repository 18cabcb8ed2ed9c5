use crate::errors::DashboardError;
use crate::format::month_labels;
use crate::models::{LabeledSeries, MarketData, YearlyDataset};
use crate::scenario::{Scenario, select_series};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: &'static str,
    pub title: String,
    pub y_axis: &'static str,
    pub labels: Vec<String>,
    pub datasets: Vec<LabeledSeries>,
}

impl ChartSpec {
    fn new(id: &'static str, title: String, y_axis: &'static str, datasets: Vec<LabeledSeries>) -> Self {
        Self {
            id,
            title,
            y_axis,
            labels: month_labels(),
            datasets,
        }
    }
}

/// The dashboard's charts and the scenario currently shown on the queries chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBoard {
    pub market: String,
    pub active_scenario: String,
    pub queries: ChartSpec,
    pub impressions: ChartSpec,
    pub flights: ChartSpec,
    pub hotels: ChartSpec,
}

impl ChartBoard {
    pub const INITIAL_SCENARIO: &'static str = "moderate";

    pub fn new(data: &MarketData) -> Result<Self, DashboardError> {
        let scenario = Scenario::Forecast(Self::INITIAL_SCENARIO.to_string());
        let market = &data.market;

        Ok(Self {
            market: market.clone(),
            active_scenario: scenario.to_string(),
            queries: ChartSpec::new(
                "queries-chart",
                format!("{market} Travel Queries Forecast"),
                "Travel Queries Index",
                select_series(&scenario, &data.travel_queries)?.into(),
            ),
            impressions: ChartSpec::new(
                "impressions-chart",
                format!("{market} Media Impressions"),
                "Impressions",
                impressions_datasets(&data.impressions)?,
            ),
            flights: ChartSpec::new(
                "flights-chart",
                year_span_title("Flight Searches", &data.flight_searches),
                "Flight Searches",
                select_series(&Scenario::Actual, &data.flight_searches)?.into(),
            ),
            hotels: ChartSpec::new(
                "hotel-chart",
                year_span_title("Hotel Guests", &data.hotel_guests),
                "Hotel Guests",
                select_series(&Scenario::Actual, &data.hotel_guests)?.into(),
            ),
        })
    }

    /// Swaps the queries chart over to `scenario`. The board is left untouched
    /// when the selection fails.
    pub fn on_scenario_selected(
        &mut self,
        data: &MarketData,
        scenario: &Scenario,
    ) -> Result<&ChartSpec, DashboardError> {
        let pair = select_series(scenario, &data.travel_queries)?;
        self.queries.datasets = pair.into();
        self.active_scenario = scenario.to_string();
        Ok(&self.queries)
    }
}

/// Latest historical impressions against the year after it, labeled as planned.
fn impressions_datasets(dataset: &YearlyDataset) -> Result<Vec<LabeledSeries>, DashboardError> {
    let years = dataset.historical_years();
    let (planned, base) = match years.as_slice() {
        [.., base, planned] => (*planned, *base),
        _ => {
            return Err(DashboardError::IncompleteDataset(
                "impressions need a base and a planned year".into(),
            ));
        }
    };

    Ok(vec![
        LabeledSeries {
            label: base.to_string(),
            series: dataset.actual(base)?.clone(),
        },
        LabeledSeries {
            label: format!("{planned} (Planned)"),
            series: dataset.actual(planned)?.clone(),
        },
    ])
}

fn year_span_title(name: &str, dataset: &YearlyDataset) -> String {
    let years = dataset.historical_years();
    match (years.first(), years.last()) {
        (Some(first), Some(last)) if first != last => format!("{name} ({first}-{last})"),
        _ => name.to_string(),
    }
}
