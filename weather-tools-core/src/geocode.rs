use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::Config,
    error::{Error, Result},
    model::Location,
};

pub(crate) const SERVICE: &str = "geocoding service";

/// Resolves a free-text city name to a [`Location`].
#[async_trait]
pub trait Geocode: Send + Sync {
    async fn resolve(&self, city: &str) -> Result<Location>;
}

/// Geocoder backed by the Open-Meteo place-name search endpoint.
///
/// First match wins: the lookup requests `count=1` and there is no
/// disambiguation path for ambiguous names.
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    http: Client,
    search_url: String,
}

impl OpenMeteoGeocoder {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("Failed to build geocoding HTTP client")?;

        Ok(Self { http, search_url: config.geocoding_url.clone() })
    }
}

#[async_trait]
impl Geocode for OpenMeteoGeocoder {
    async fn resolve(&self, city: &str) -> Result<Location> {
        let city = city.trim();
        if city.is_empty() {
            return Err(Error::InvalidArgument("city name is required".to_string()));
        }

        tracing::debug!(%city, "resolving city name");

        let res = self
            .http
            .get(&self.search_url)
            .query(&[("name", city), ("count", "1"), ("language", "en"), ("format", "json")])
            .send()
            .await
            .map_err(|e| Error::upstream(SERVICE, e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| Error::upstream(SERVICE, e))?;

        if !status.is_success() {
            return Err(Error::upstream_status(SERVICE, status, &body));
        }

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| Error::upstream_parse(SERVICE, e))?;

        let hit = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| Error::LocationNotFound(city.to_string()))?;

        let location = Location {
            display_name: hit.name,
            country: hit.country.unwrap_or_default(),
            latitude: hit.latitude,
            longitude: hit.longitude,
            timezone: hit.timezone.unwrap_or_else(|| "UTC".to_string()),
        };

        tracing::info!(
            name = %location.display_name,
            country = %location.country,
            "resolved city"
        );

        Ok(location)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Option<Vec<SearchHit>>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    timezone: Option<String>,
}
