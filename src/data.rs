use crate::models::{MarketData, MonthlySeries, YearEntry, YearlyDataset};
use std::collections::BTreeMap;

pub const MARKET: &str = "Kazakhstan";

const QUERIES_2023: [f64; 12] = [4.18, 3.22, 3.63, 3.40, 3.10, 3.17, 4.19, 4.20, 3.59, 4.40, 4.32, 4.23];
const QUERIES_2024: [f64; 12] = [6.20, 5.45, 4.33, 3.66, 3.99, 3.49, 4.82, 4.61, 5.01, 5.31, 4.27, 3.72];
const QUERIES_2025_MODERATE: [f64; 12] = [4.42, 3.97, 6.08, 4.45, 5.63, 3.95, 7.51, 6.89, 8.11, 9.16, 5.89, 4.48];
const QUERIES_2025_CONSERVATIVE: [f64; 12] = [4.42, 3.97, 5.76, 4.19, 5.20, 3.74, 7.11, 6.52, 7.68, 8.69, 5.58, 4.24];
const QUERIES_2025_AMBITIOUS: [f64; 12] = [4.42, 3.97, 6.41, 4.72, 6.07, 4.17, 7.92, 7.27, 8.56, 9.65, 6.21, 4.72];

// 2023 repeats the 2024 figures in the source data.
const IMPRESSIONS_2023: [f64; 12] = [
    0.0, 0.0, 0.0, 21595079.0, 17798768.0, 9884237.0, 1064614.0, 1251655.0, 7331765.0, 28887622.0,
    46896860.0, 29432903.0,
];
const IMPRESSIONS_2024: [f64; 12] = IMPRESSIONS_2023;
const IMPRESSIONS_2025: [f64; 12] = [
    43041083.0, 26302884.0, 58098094.0, 29802238.0, 143388850.0, 78482214.0, 76826671.0,
    60600012.0, 13575579.0, 21801603.0, 92592898.0, 69246680.0,
];

const FLIGHTS_2023: [f64; 12] = [1059.0, 807.0, 1262.0, 725.0, 512.0, 1044.0, 1020.0, 1296.0, 833.0, 817.0, 1018.0, 908.0];
const FLIGHTS_2024: [f64; 12] = [1785.0, 1587.0, 1045.0, 991.0, 1047.0, 925.0, 1068.0, 717.0, 846.0, 917.0, 754.0, 759.0];

const HOTELS_2023: [f64; 12] = [4742.0, 2951.0, 5257.0, 3304.0, 4249.0, 3076.0, 3169.0, 4427.0, 3595.0, 5891.0, 5089.0, 5542.0];
const HOTELS_2024: [f64; 12] = [6280.0, 5450.0, 8229.0, 5348.0, 6812.0, 5807.0, 4869.0, 5367.0, 5318.0, 7671.0, 5296.0, 5684.0];

/// The dataset compiled into the binary, used unless `APP_DATA_PATH` supplies another.
pub fn builtin() -> MarketData {
    let forecast = BTreeMap::from([
        ("moderate".to_string(), MonthlySeries::from_array(QUERIES_2025_MODERATE)),
        ("conservative".to_string(), MonthlySeries::from_array(QUERIES_2025_CONSERVATIVE)),
        ("ambitious".to_string(), MonthlySeries::from_array(QUERIES_2025_AMBITIOUS)),
    ]);

    MarketData {
        market: MARKET.to_string(),
        travel_queries: dataset([
            (2023, actual(QUERIES_2023)),
            (2024, actual(QUERIES_2024)),
            (2025, YearEntry::Forecast(forecast)),
        ]),
        impressions: dataset([
            (2023, actual(IMPRESSIONS_2023)),
            (2024, actual(IMPRESSIONS_2024)),
            (2025, actual(IMPRESSIONS_2025)),
        ]),
        flight_searches: dataset([(2023, actual(FLIGHTS_2023)), (2024, actual(FLIGHTS_2024))]),
        hotel_guests: dataset([(2023, actual(HOTELS_2023)), (2024, actual(HOTELS_2024))]),
    }
}

fn actual(samples: [f64; 12]) -> YearEntry {
    YearEntry::Actual(MonthlySeries::from_array(samples))
}

fn dataset<const N: usize>(entries: [(i32, YearEntry); N]) -> YearlyDataset {
    YearlyDataset {
        years: BTreeMap::from(entries),
    }
}
