//! Assembly and rendering of [`WeatherReport`] values.
//!
//! Rendering is presentation only: protocol callers that need structured
//! data consume the report itself; the text form is for terminals and
//! humans.

use std::fmt::Write;

use crate::model::{DailyRecord, Location, Mode, REPORT_DAYS, WeatherReport};

impl WeatherReport {
    /// Pure combination of the two producers' outputs. The inputs are
    /// already validated: the geocoder populated every location field and
    /// the provider enforced the 7-day alignment.
    pub fn assemble(location: Location, mode: Mode, days: Vec<DailyRecord>) -> Self {
        debug_assert_eq!(days.len(), REPORT_DAYS);
        Self { location, mode, days }
    }

    /// Deterministic human-readable rendering: a location header followed
    /// by one block per day.
    pub fn render(&self) -> String {
        let heading = match self.mode {
            Mode::Past => "Weather Data",
            Mode::Future => "Weather Forecast",
        };

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{heading} for {} ({})",
            self.location.display_name, self.location.country
        );
        let _ = writeln!(out, "Location: {}, {}", self.location.latitude, self.location.longitude);
        let _ = writeln!(out, "Timezone: {}", self.location.timezone);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}:", self.mode.label());
        let _ = writeln!(out, "{}", "=".repeat(70));

        for day in &self.days {
            let _ = writeln!(out, "Date: {}", day.date);
            let _ = writeln!(out, "  Max Temperature: {}°C", day.temp_max_c);
            let _ = writeln!(out, "  Min Temperature: {}°C", day.temp_min_c);
            let _ = writeln!(out, "  Precipitation: {}mm", day.precipitation_mm);
            let _ = writeln!(out, "  Max Wind Speed: {}km/h", day.wind_speed_max_kmh);
        }

        out
    }
}
