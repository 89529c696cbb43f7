use anyhow::Context;
use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::Config,
    error::{Error, Result},
    model::{DailyRecord, Location, Mode, REPORT_DAYS, date_window},
};

pub(crate) const ARCHIVE_SERVICE: &str = "weather archive service";
pub(crate) const FORECAST_SERVICE: &str = "weather forecast service";

const DAILY_VARIABLES: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,wind_speed_10m_max";

/// Retrieves the 7-day daily series for a resolved location.
#[async_trait]
pub trait DailyProvider: Send + Sync {
    async fn fetch(&self, location: &Location, mode: Mode) -> Result<Vec<DailyRecord>>;
}

/// Daily aggregates from the Open-Meteo archive (past) and forecast
/// (future) endpoints.
///
/// Units are fixed to Celsius / mm / km-per-hour, and every request carries
/// the location's own timezone so the returned days are local days.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    archive_url: String,
    forecast_url: String,
}

impl OpenMeteoProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("Failed to build weather HTTP client")?;

        Ok(Self {
            http,
            archive_url: config.archive_url.clone(),
            forecast_url: config.forecast_url.clone(),
        })
    }

    async fn fetch_window(
        &self,
        location: &Location,
        mode: Mode,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyRecord>> {
        let (service, url) = match mode {
            Mode::Past => (ARCHIVE_SERVICE, &self.archive_url),
            Mode::Future => (FORECAST_SERVICE, &self.forecast_url),
        };

        tracing::debug!(
            location = %location.display_name,
            %start,
            %end,
            "fetching daily series from {service}"
        );

        let res = self
            .http
            .get(url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("start_date", start.to_string()),
                ("end_date", end.to_string()),
                ("daily", DAILY_VARIABLES.to_string()),
                ("timezone", location.timezone.clone()),
                ("temperature_unit", "celsius".to_string()),
                ("wind_speed_unit", "kmh".to_string()),
            ])
            .send()
            .await
            .map_err(|e| Error::upstream(service, e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| Error::upstream(service, e))?;

        if !status.is_success() {
            return Err(Error::upstream_status(service, status, &body));
        }

        let parsed: DailyResponse =
            serde_json::from_str(&body).map_err(|e| Error::upstream_parse(service, e))?;

        let daily = parsed.daily.ok_or_else(|| Error::DataShapeMismatch {
            service,
            detail: "missing daily series".to_string(),
        })?;

        build_records(service, daily, start)
    }
}

#[async_trait]
impl DailyProvider for OpenMeteoProvider {
    async fn fetch(&self, location: &Location, mode: Mode) -> Result<Vec<DailyRecord>> {
        let (start, end) = date_window(Local::now().date_naive(), mode);
        self.fetch_window(location, mode, start, end).await
    }
}

/// Turn the upstream parallel arrays into records, insisting on exactly one
/// entry per requested day in ascending order.
fn build_records(
    service: &'static str,
    daily: DailyBlock,
    start: NaiveDate,
) -> Result<Vec<DailyRecord>> {
    let lens = [
        daily.time.len(),
        daily.temperature_2m_max.len(),
        daily.temperature_2m_min.len(),
        daily.precipitation_sum.len(),
        daily.wind_speed_10m_max.len(),
    ];
    if let Some(&actual) = lens.iter().find(|&&len| len != REPORT_DAYS) {
        return Err(Error::DataShapeMismatch {
            service,
            detail: format!("expected {REPORT_DAYS} daily entries, got {actual}"),
        });
    }

    let mut records = Vec::with_capacity(REPORT_DAYS);
    for (i, raw) in daily.time.iter().enumerate() {
        let date: NaiveDate = raw.parse().map_err(|_| Error::DataShapeMismatch {
            service,
            detail: format!("unparseable date '{raw}'"),
        })?;

        let expected = start + Duration::days(i as i64);
        if date != expected {
            return Err(Error::DataShapeMismatch {
                service,
                detail: format!("entry {i} is {date}, expected {expected}"),
            });
        }

        records.push(DailyRecord {
            date,
            temp_max_c: daily.temperature_2m_max[i],
            temp_min_c: daily.temperature_2m_min[i],
            precipitation_mm: daily.precipitation_sum[i],
            wind_speed_max_kmh: daily.wind_speed_10m_max[i],
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    precipitation_sum: Vec<f64>,
    wind_speed_10m_max: Vec<f64>,
}
