//! Integration tests for the HTTP weather sources using wiremock.

use widget_core::{
    FetchError, WeatherSource,
    provider::{proxy::ProxySource, weatherstack::WeatherstackSource},
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn flat_payload(city: &str) -> serde_json::Value {
    serde_json::json!({
        "temperature": 20,
        "observation_time": "10:00 AM",
        "weather_descriptions": ["Sunny"],
        "is_day": "yes",
        "pressure": 1012,
        "cloudcover": 10,
        "humidity": 40,
        "visibility": 10,
        "uv_index": 5,
        "wind_speed": 8,
        "location": { "name": city }
    })
}

#[tokio::test]
async fn proxy_sends_city_as_query_param() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("query", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(flat_payload("Paris")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = ProxySource::new(mock_server.uri());
    let payload = source.fetch_weather("Paris").await.unwrap();

    assert_eq!(payload.location.name, "Paris");
    assert_eq!(payload.temperature, 20.0);
    assert_eq!(payload.weather_descriptions, vec!["Sunny".to_string()]);
}

#[tokio::test]
async fn proxy_bad_request_is_reported_not_thrown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Bad Request"))
        .mount(&mock_server)
        .await;

    let source = ProxySource::new(mock_server.uri());
    let err = source.fetch_weather("Nowhere").await.unwrap_err();

    assert!(matches!(err, FetchError::BadRequest { ref city, .. } if city == "Nowhere"));
}

#[tokio::test]
async fn proxy_server_error_is_status_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&mock_server)
        .await;

    let source = ProxySource::new(mock_server.uri());
    let err = source.fetch_weather("Paris").await.unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 503, .. }));
}

#[tokio::test]
async fn proxy_malformed_json_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let source = ProxySource::new(mock_server.uri());
    let err = source.fetch_weather("Paris").await.unwrap_err();

    assert!(matches!(err, FetchError::Malformed(_)));
}

#[tokio::test]
async fn proxy_missing_fields_are_malformed_not_rendered() {
    let mock_server = MockServer::start().await;

    let mut body = flat_payload("Paris");
    body.as_object_mut().unwrap().remove("cloudcover");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let source = ProxySource::new(mock_server.uri());
    let err = source.fetch_weather("Paris").await.unwrap_err();

    assert!(err.to_string().contains("cloudcover"));
}

#[tokio::test]
async fn weatherstack_reads_nested_current_block() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current"))
        .and(query_param("access_key", "KEY"))
        .and(query_param("query", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "request": { "type": "City", "query": "London, United Kingdom" },
            "location": { "name": "London", "country": "United Kingdom" },
            "current": {
                "observation_time": "12:14 PM",
                "temperature": 13,
                "weather_descriptions": ["Overcast"],
                "wind_speed": 12,
                "pressure": 1010,
                "humidity": 83,
                "cloudcover": 83,
                "uv_index": 2,
                "visibility": 10,
                "is_day": "no"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = WeatherstackSource::new("KEY".into(), mock_server.uri());
    let payload = source.fetch_weather("London").await.unwrap();

    assert_eq!(payload.location.name, "London");
    assert_eq!(payload.cloudcover, 83.0);
    assert_eq!(payload.is_day, "no");
}

#[tokio::test]
async fn weatherstack_error_body_is_api_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "error": {
                "code": 101,
                "type": "invalid_access_key",
                "info": "You have not supplied a valid API Access Key."
            }
        })))
        .mount(&mock_server)
        .await;

    let source = WeatherstackSource::new("WRONG".into(), mock_server.uri());
    let err = source.fetch_weather("London").await.unwrap_err();

    assert!(matches!(err, FetchError::Api { code: 101, .. }));
}
