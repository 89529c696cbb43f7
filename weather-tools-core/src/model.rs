use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Length of every report window, past or future.
pub const REPORT_DAYS: usize = 7;

/// A resolved place: the geocoder's first match for a free-text city name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub display_name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

/// One local day's aggregates as reported by the upstream daily series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub precipitation_mm: f64,
    pub wind_speed_max_kmh: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Past,
    Future,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Past => "Last 7 Days",
            Mode::Future => "Next 7 Days",
        }
    }
}

/// The structured result of one tool call.
///
/// Invariant: `days` holds exactly [`REPORT_DAYS`] contiguous records in
/// ascending date order. For [`Mode::Past`] the window ends yesterday (the
/// archive lags behind "today"); for [`Mode::Future`] it starts today.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub location: Location,
    pub mode: Mode,
    pub days: Vec<DailyRecord>,
}

/// Inclusive 7-day window anchored on `today`.
pub fn date_window(today: NaiveDate, mode: Mode) -> (NaiveDate, NaiveDate) {
    match mode {
        Mode::Past => (today - Duration::days(7), today - Duration::days(1)),
        Mode::Future => (today, today + Duration::days(6)),
    }
}
