//! Integration tests for the geocoding client (wiremock-based)

use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_geocoding::{
    GeocodingClient, GeocodingConfig, GeocodingError, OpenWeatherMapGeocoder,
};

const COLUMBUS_JSON: &str = r#"[{
    "name": "Columbus",
    "local_names": {"en": "Columbus"},
    "lat": 39.96,
    "lon": -83.0,
    "country": "US",
    "state": "Ohio"
}]"#;

fn client_for(server: &MockServer) -> OpenWeatherMapGeocoder {
    OpenWeatherMapGeocoder::new(&GeocodingConfig::for_testing(server.uri())).unwrap()
}

#[tokio::test]
async fn resolves_city_with_expected_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Columbus"))
        .and(query_param("limit", "1"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(COLUMBUS_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let city = client_for(&server).geocode("Columbus").await.unwrap().unwrap();

    assert!((city.location.latitude() - 39.96).abs() < f64::EPSILON);
    assert!((city.location.longitude() + 83.0).abs() < f64::EPSILON);
    assert_eq!(city.country.as_deref(), Some("US"));
    assert_eq!(city.name.as_deref(), Some("Columbus"));
}

#[tokio::test]
async fn empty_array_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    assert!(client_for(&server).geocode("Atlantis").await.unwrap().is_none());
}

#[tokio::test]
async fn server_error_is_request_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = client_for(&server).geocode("Columbus").await.unwrap_err();
    assert!(matches!(err, GeocodingError::RequestFailed(_)));
}

#[tokio::test]
async fn rejected_key_is_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"cod":401,"message":"Invalid API key."}"#,
        ))
        .mount(&server)
        .await;

    let err = client_for(&server).geocode("Columbus").await.unwrap_err();
    assert!(matches!(err, GeocodingError::Unauthorized));
}

#[tokio::test]
async fn rate_limit_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client_for(&server).geocode("Columbus").await.unwrap_err();
    assert!(matches!(err, GeocodingError::RateLimitExceeded));
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"unexpected":true}"#))
        .mount(&server)
        .await;

    let err = client_for(&server).geocode("Columbus").await.unwrap_err();
    assert!(matches!(err, GeocodingError::ParseError(_)));
}

#[tokio::test]
async fn slow_provider_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(COLUMBUS_JSON)
                .set_delay(Duration::from_secs(4)),
        )
        .mount(&server)
        .await;

    let config = GeocodingConfig {
        timeout_secs: 1,
        ..GeocodingConfig::for_testing(server.uri())
    };
    let client = OpenWeatherMapGeocoder::new(&config).unwrap();

    let err = client.geocode("Columbus").await.unwrap_err();
    assert!(matches!(err, GeocodingError::Timeout));
}

#[tokio::test]
async fn cache_serves_repeat_lookups() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_string(COLUMBUS_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let config = GeocodingConfig {
        cache_ttl_minutes: 10,
        ..GeocodingConfig::for_testing(server.uri())
    };
    let client = OpenWeatherMapGeocoder::new(&config).unwrap();

    let first = client.geocode("Columbus").await.unwrap();
    let second = client.geocode("Columbus").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn misses_are_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(2)
        .mount(&server)
        .await;

    let config = GeocodingConfig {
        cache_ttl_minutes: 10,
        ..GeocodingConfig::for_testing(server.uri())
    };
    let client = OpenWeatherMapGeocoder::new(&config).unwrap();

    assert!(client.geocode("Atlantis").await.unwrap().is_none());
    assert!(client.geocode("Atlantis").await.unwrap().is_none());
}
