use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure kinds raised by the weather pipeline.
///
/// The geocoder and the daily provider raise these without attempting any
/// recovery; the tool dispatcher is the boundary that converts them into
/// caller-visible tool errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad or missing caller input; raised before any network call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The geocoding service returned no match for the queried name.
    #[error("no location found for '{0}'")]
    LocationNotFound(String),

    /// Transport failure or non-success status from a remote service.
    #[error("{service} request failed: {reason}")]
    UpstreamUnavailable { service: &'static str, reason: String },

    /// The remote daily series does not line up with the requested window.
    #[error("{service} returned a malformed daily series: {detail}")]
    DataShapeMismatch { service: &'static str, detail: String },
}

impl Error {
    pub(crate) fn upstream(service: &'static str, err: reqwest::Error) -> Self {
        Error::UpstreamUnavailable { service, reason: err.to_string() }
    }

    pub(crate) fn upstream_status(service: &'static str, status: StatusCode, body: &str) -> Self {
        Error::UpstreamUnavailable {
            service,
            reason: format!("status {}: {}", status, truncate_body(body)),
        }
    }

    pub(crate) fn upstream_parse(service: &'static str, err: serde_json::Error) -> Self {
        Error::UpstreamUnavailable { service, reason: format!("unparseable response: {err}") }
    }
}

/// Keep upstream error bodies short enough to embed in an error message.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
