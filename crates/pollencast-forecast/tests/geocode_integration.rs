//! Integration tests for GoogleGeocoder against a mock HTTP server.

use pollencast_forecast::{GeocodeError, Geocoder, GoogleGeocoder};
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn geocoding_ok_body() -> serde_json::Value {
    serde_json::json!({
        "results": [{
            "geometry": {"location": {"lat": 37.4419, "lng": -122.1430}},
            "formatted_address": "Menlo Park, CA 94025, USA"
        }],
        "status": "OK"
    })
}

#[tokio::test]
async fn test_geocode_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("address", "94025"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocoding_ok_body()))
        .expect(1)
        .mount(&server)
        .await;

    let geocoder = GoogleGeocoder::with_base_url("test-key", server.uri()).unwrap();
    let location = geocoder.geocode("94025").await.unwrap();

    assert_eq!(location.latitude, 37.4419);
    assert_eq!(location.longitude, -122.1430);
    assert_eq!(location.display_name, "Menlo Park, CA 94025, USA");
}

#[tokio::test]
async fn test_invalid_zip_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(geocoding_ok_body()))
        .expect(0)
        .mount(&server)
        .await;

    let geocoder = GoogleGeocoder::with_base_url("test-key", server.uri()).unwrap();

    for zip in ["", "1234", "123456", "abcde", "12a45"] {
        let err = geocoder.geocode(zip).await.unwrap_err();
        assert!(
            matches!(err, GeocodeError::InvalidZip(ref z) if z == zip),
            "zip {zip:?}: got {err:?}"
        );
    }
}

#[tokio::test]
async fn test_provider_status_without_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [],
            "status": "ZERO_RESULTS"
        })))
        .mount(&server)
        .await;

    let geocoder = GoogleGeocoder::with_base_url("test-key", server.uri()).unwrap();
    let err = geocoder.geocode("00000").await.unwrap_err();

    assert!(matches!(err, GeocodeError::ProviderStatus(ref s) if s == "ZERO_RESULTS"));
    assert!(err.to_string().contains("ZERO_RESULTS"));
}

#[tokio::test]
async fn test_provider_error_with_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [],
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        })))
        .mount(&server)
        .await;

    let geocoder = GoogleGeocoder::with_base_url("bad-key", server.uri()).unwrap();
    let err = geocoder.geocode("94025").await.unwrap_err();

    match err {
        GeocodeError::Provider { status, message } => {
            assert_eq!(status, "REQUEST_DENIED");
            assert_eq!(message, "The provided API key is invalid.");
        }
        other => panic!("expected Provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_ok_status_with_empty_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [],
            "status": "OK"
        })))
        .mount(&server)
        .await;

    let geocoder = GoogleGeocoder::with_base_url("test-key", server.uri()).unwrap();
    let err = geocoder.geocode("94025").await.unwrap_err();

    assert!(matches!(err, GeocodeError::NoResults));
}

#[tokio::test]
async fn test_http_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let geocoder = GoogleGeocoder::with_base_url("test-key", server.uri()).unwrap();
    let err = geocoder.geocode("94025").await.unwrap_err();

    assert!(matches!(err, GeocodeError::HttpStatus(500)));
}

#[tokio::test]
async fn test_unparseable_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let geocoder = GoogleGeocoder::with_base_url("test-key", server.uri()).unwrap();
    let err = geocoder.geocode("94025").await.unwrap_err();

    assert!(matches!(err, GeocodeError::Parse(_)));
}

#[tokio::test]
async fn test_network_failure() {
    // Nothing listens on port 9 (discard); connection is refused.
    let geocoder = GoogleGeocoder::with_base_url("test-key", "http://127.0.0.1:9").unwrap();
    let err = geocoder.geocode("94025").await.unwrap_err();

    assert!(matches!(err, GeocodeError::Network(_)));
}
