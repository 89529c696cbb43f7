//! End-to-end tool calls against mocked Open-Meteo services.
//!
//! Both upstream endpoints run on one wiremock server; the dispatcher is
//! built from a config pointing at it, so the real HTTP implementations
//! are exercised.

use chrono::{Duration, Local};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use weather_tools_core::tools::{GET_FORECAST, GET_WEATHER};
use weather_tools_core::{Config, Dispatcher, Mode, date_window};

fn test_config(server: &MockServer) -> Config {
    Config {
        geocoding_url: format!("{}/v1/search", server.uri()),
        archive_url: format!("{}/v1/archive", server.uri()),
        forecast_url: format!("{}/v1/forecast", server.uri()),
        ..Config::default()
    }
}

fn london_hit() -> serde_json::Value {
    json!({
        "results": [{
            "name": "London",
            "country": "United Kingdom",
            "latitude": 51.50853,
            "longitude": -0.12574,
            "timezone": "Europe/London"
        }]
    })
}

/// Seven daily entries aligned with the window the provider will request.
fn daily_body(mode: Mode) -> serde_json::Value {
    let (start, _) = date_window(Local::now().date_naive(), mode);
    let dates: Vec<String> = (0..7).map(|i| (start + Duration::days(i)).to_string()).collect();
    json!({
        "timezone": "Europe/London",
        "daily": {
            "time": dates,
            "temperature_2m_max": [21.4, 22.0, 19.8, 18.5, 20.1, 23.3, 24.0],
            "temperature_2m_min": [12.1, 13.0, 11.2, 10.4, 11.9, 14.2, 15.0],
            "precipitation_sum": [0.3, 0.0, 4.2, 7.1, 0.0, 0.0, 1.2],
            "wind_speed_10m_max": [14.2, 10.7, 22.5, 31.0, 12.3, 9.8, 11.1]
        }
    })
}

#[tokio::test]
async fn get_weather_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_hit()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .and(query_param("timezone", "Europe/London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_body(Mode::Past)))
        .expect(1)
        .mount(&server)
        .await;

    let mut dispatcher = Dispatcher::from_config(&test_config(&server)).unwrap();
    let reply = dispatcher.dispatch(GET_WEATHER, &json!({"city": "London"})).await;

    assert!(!reply.is_error, "reply: {}", reply.text);
    assert!(reply.text.contains("Weather Data for London (United Kingdom)"));
    assert!(reply.text.contains("Location: 51.50853, -0.12574"));
    assert!(reply.text.contains("Timezone: Europe/London"));
    assert!(reply.text.contains("Last 7 Days:"));
    assert!(reply.text.contains("Max Temperature: 21.4°C"));
    assert!(reply.text.contains("Max Wind Speed: 31km/h"));

    let report = reply.report.expect("structured report present");
    assert_eq!(report.mode, Mode::Past);
    assert_eq!(report.days.len(), 7);
    assert_eq!(report.days[0].temp_max_c, 21.4);
    assert_eq!(report.days[3].precipitation_mm, 7.1);

    // Dates are contiguous and ascending, ending yesterday.
    let (start, end) = date_window(Local::now().date_naive(), Mode::Past);
    assert_eq!(report.days[0].date, start);
    assert_eq!(report.days[6].date, end);
    for pair in report.days.windows(2) {
        assert_eq!((pair[1].date - pair[0].date).num_days(), 1);
    }
}

#[tokio::test]
async fn get_forecast_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_hit()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_body(Mode::Future)))
        .mount(&server)
        .await;

    let mut dispatcher = Dispatcher::from_config(&test_config(&server)).unwrap();
    let reply = dispatcher.dispatch(GET_FORECAST, &json!({"city": "London"})).await;

    assert!(!reply.is_error, "reply: {}", reply.text);
    assert!(reply.text.contains("Weather Forecast for London (United Kingdom)"));
    assert!(reply.text.contains("Next 7 Days:"));

    let report = reply.report.expect("structured report present");
    let (start, _) = date_window(Local::now().date_naive(), Mode::Future);
    assert_eq!(report.days[0].date, start, "forecast starts today");
}

#[tokio::test]
async fn unknown_city_reports_a_tool_error_not_a_crash() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    // No weather mock mounted: the pipeline must stop at the geocoder.
    let mut dispatcher = Dispatcher::from_config(&test_config(&server)).unwrap();
    let reply = dispatcher.dispatch(GET_WEATHER, &json!({"city": "Nowhereland"})).await;

    assert!(reply.is_error);
    assert_eq!(reply.text, "Error: no location found for 'Nowhereland'");
    assert!(reply.report.is_none());
}

#[tokio::test]
async fn truncated_daily_series_reports_a_shape_mismatch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_hit()))
        .mount(&server)
        .await;

    let mut short = daily_body(Mode::Past);
    for key in
        ["time", "temperature_2m_max", "temperature_2m_min", "precipitation_sum", "wind_speed_10m_max"]
    {
        let arr = short["daily"][key].as_array_mut().unwrap();
        arr.truncate(5);
    }

    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(short))
        .mount(&server)
        .await;

    let mut dispatcher = Dispatcher::from_config(&test_config(&server)).unwrap();
    let reply = dispatcher.dispatch(GET_WEATHER, &json!({"city": "London"})).await;

    assert!(reply.is_error);
    assert!(reply.text.contains("expected 7 daily entries, got 5"));
}
