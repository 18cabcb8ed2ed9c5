use chrono::Month;

/// "12.3M", "4.5K" or the plain value, as the dashboard tooltips show counts.
pub fn format_compact(value: f64) -> String {
    if value > 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value > 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Fraction as a percentage with one decimal: 0.279 -> "27.9%".
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Short month labels, January first.
pub fn month_labels() -> Vec<String> {
    (1..=12u8)
        .filter_map(|number| Month::try_from(number).ok())
        .map(|month| month.name()[..3].to_string())
        .collect()
}
