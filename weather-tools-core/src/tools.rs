//! The tool-invocation boundary: two named tools over the weather pipeline.
//!
//! This is the sole recovery boundary. Every failure raised by the
//! geocoder or the daily provider is caught here and converted into a
//! tool-error reply; nothing propagates to the hosting process.

use serde::Serialize;
use serde_json::{Value, json};

use crate::{
    config::Config,
    error::{Error, Result},
    geocode::{Geocode, OpenMeteoGeocoder},
    model::{Mode, WeatherReport},
    provider::{DailyProvider, OpenMeteoProvider},
};

pub const GET_WEATHER: &str = "get_weather";
pub const GET_FORECAST: &str = "get_forecast";

/// A tool as advertised to callers: name, description and input schema.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

fn city_schema(purpose: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "city": {
                "type": "string",
                "description": format!(
                    "Name of the city to get {purpose} for (e.g., 'London', 'New York', 'Tokyo')"
                )
            }
        },
        "required": ["city"]
    })
}

/// The catalog of tools this crate exposes.
pub fn tool_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: GET_WEATHER,
            description: "Get historical weather data for the last 7 days for a specific city. \
                          Returns temperature (min/max), precipitation, and wind speed.",
            input_schema: city_schema("weather"),
        },
        ToolSpec {
            name: GET_FORECAST,
            description: "Get weather forecast for the next 7 days for a specific city. \
                          Returns temperature (min/max), precipitation, and wind speed.",
            input_schema: city_schema("forecast"),
        },
    ]
}

/// Outcome of one tool call: rendered text plus, on success, the
/// structured report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolReply {
    pub text: String,
    pub report: Option<WeatherReport>,
    pub is_error: bool,
}

impl ToolReply {
    fn success(report: WeatherReport) -> Self {
        Self { text: report.render(), report: Some(report), is_error: false }
    }

    fn error(message: impl std::fmt::Display) -> Self {
        Self { text: format!("Error: {message}"), report: None, is_error: true }
    }
}

/// Maps tool names to the resolve -> fetch -> assemble pipeline.
///
/// `dispatch` takes `&mut self`: one dispatcher handles one call at a
/// time, and concurrent sessions each construct their own instance. The
/// components hold no shared state beyond their HTTP clients.
pub struct Dispatcher {
    geocoder: Box<dyn Geocode>,
    provider: Box<dyn DailyProvider>,
}

impl Dispatcher {
    pub fn new(geocoder: Box<dyn Geocode>, provider: Box<dyn DailyProvider>) -> Self {
        Self { geocoder, provider }
    }

    /// Build a dispatcher over the Open-Meteo services named in `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            Box::new(OpenMeteoGeocoder::new(config)?),
            Box::new(OpenMeteoProvider::new(config)?),
        ))
    }

    /// Run the named tool. Infallible by contract: any pipeline failure
    /// comes back as an `is_error` reply.
    pub async fn dispatch(&mut self, name: &str, arguments: &Value) -> ToolReply {
        let mode = match name {
            GET_WEATHER => Mode::Past,
            GET_FORECAST => Mode::Future,
            other => return ToolReply::error(format!("unknown tool '{other}'")),
        };

        // Validate before any network call is attempted.
        let city = match city_argument(arguments) {
            Ok(city) => city,
            Err(err) => return ToolReply::error(err),
        };

        match self.run(&city, mode).await {
            Ok(report) => ToolReply::success(report),
            Err(err) => {
                tracing::warn!(tool = name, %city, error = %err, "tool call failed");
                ToolReply::error(err)
            }
        }
    }

    async fn run(&mut self, city: &str, mode: Mode) -> Result<WeatherReport> {
        let location = self.geocoder.resolve(city).await?;
        let days = self.provider.fetch(&location, mode).await?;
        Ok(WeatherReport::assemble(location, mode, days))
    }
}

fn city_argument(arguments: &Value) -> Result<String> {
    let city = arguments
        .get("city")
        .ok_or_else(|| Error::InvalidArgument("missing required argument 'city'".to_string()))?;

    let city = city
        .as_str()
        .ok_or_else(|| Error::InvalidArgument("argument 'city' must be a string".to_string()))?
        .trim();

    if city.is_empty() {
        return Err(Error::InvalidArgument("city name is required".to_string()));
    }

    Ok(city.to_string())
}
