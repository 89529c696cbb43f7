//! Core library for the `weather-tools` service.
//!
//! This crate defines:
//! - Configuration for the Open-Meteo endpoints
//! - Geocoding (city name -> coordinates) and daily-weather retrieval
//! - Report assembly and human-readable rendering
//! - The tool dispatch boundary (`get_weather` / `get_forecast`)
//!
//! It is used by `weather-tools-cli`, but can also be embedded in any host
//! process that speaks a tool-invocation protocol.

pub mod config;
pub mod error;
pub mod geocode;
pub mod model;
pub mod provider;
pub mod report;
pub mod tools;

pub use config::Config;
pub use error::{Error, Result};
pub use geocode::{Geocode, OpenMeteoGeocoder};
pub use model::{DailyRecord, Location, Mode, WeatherReport, date_window};
pub use provider::{DailyProvider, OpenMeteoProvider};
pub use tools::{Dispatcher, ToolReply, ToolSpec, tool_specs};
