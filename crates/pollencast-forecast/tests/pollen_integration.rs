//! Integration tests for GooglePollenClient against a mock HTTP server.

use pollencast_forecast::{GooglePollenClient, PollenError, PollenProvider};
use wiremock::matchers::{any, method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "regionCode": "US",
        "dailyInfo": [{
            "date": {"year": 2025, "month": 6, "day": 15},
            "pollenTypeInfo": [
                {"code": "GRASS", "displayName": "Grass", "inSeason": true,
                 "healthRecommendations": ["Stay indoors in the morning."],
                 "indexInfo": {"code": "UPI", "displayName": "Universal Pollen Index",
                               "value": 2, "category": "Low"}},
                {"code": "TREE", "inSeason": false}
            ]
        }]
    })
}

#[tokio::test]
async fn test_forecast_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("key", "test-key"))
        .and(query_param("days", "3"))
        .and(query_param("languageCode", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = GooglePollenClient::with_base_url("test-key", server.uri()).unwrap();
    let raw = client.forecast(37.44, -122.14, 3).await.unwrap();

    assert_eq!(raw.region_code, "US");
    assert_eq!(raw.daily_info.len(), 1);

    let day = &raw.daily_info[0];
    assert_eq!(day.date.year, 2025);
    assert_eq!(day.pollen_type_info.len(), 2);

    let grass = &day.pollen_type_info[0];
    assert_eq!(grass.code, "GRASS");
    assert!(grass.in_season);
    assert_eq!(grass.index_info.as_ref().unwrap().value, 2);
    assert_eq!(grass.index_info.as_ref().unwrap().category, "Low");

    let tree = &day.pollen_type_info[1];
    assert!(tree.index_info.is_none());
}

#[tokio::test]
async fn test_invalid_days_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(0)
        .mount(&server)
        .await;

    let client = GooglePollenClient::with_base_url("test-key", server.uri()).unwrap();

    for days in [0u8, 6, 100] {
        let err = client.forecast(37.44, -122.14, days).await.unwrap_err();
        assert!(
            matches!(err, PollenError::InvalidDays(d) if d == days),
            "days {days}: got {err:?}"
        );
    }
}

#[tokio::test]
async fn test_error_envelope_message_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": {"code": 403, "message": "API key not valid.", "status": "PERMISSION_DENIED"}
        })))
        .mount(&server)
        .await;

    let client = GooglePollenClient::with_base_url("bad-key", server.uri()).unwrap();
    let err = client.forecast(37.44, -122.14, 1).await.unwrap_err();

    assert!(matches!(err, PollenError::Api(ref msg) if msg == "API key not valid."));
    assert!(err.to_string().contains("pollen API request failed"));
}

#[tokio::test]
async fn test_bare_status_when_no_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = GooglePollenClient::with_base_url("test-key", server.uri()).unwrap();
    let err = client.forecast(37.44, -122.14, 1).await.unwrap_err();

    assert!(matches!(err, PollenError::HttpStatus(500)));
}

#[tokio::test]
async fn test_unparseable_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = GooglePollenClient::with_base_url("test-key", server.uri()).unwrap();
    let err = client.forecast(37.44, -122.14, 1).await.unwrap_err();

    assert!(matches!(err, PollenError::Parse(_)));
}

#[tokio::test]
async fn test_network_failure() {
    let client = GooglePollenClient::with_base_url("test-key", "http://127.0.0.1:9").unwrap();
    let err = client.forecast(37.44, -122.14, 1).await.unwrap_err();

    assert!(matches!(err, PollenError::Network(_)));
}
