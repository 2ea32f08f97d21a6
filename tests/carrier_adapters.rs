//! Integration tests for the carrier adapters against a mock HTTP server:
//! OAuth token flow, response mapping, and failure classification.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use rateshop::domain::entities::package::Package;
use rateshop::infrastructure::carriers::{
    CarrierAdapter, CarrierError, ClientCredentials, FedexAdapter, FedexCredentials,
    FedexEndpoints, UpsAdapter, UpsEndpoints, UspsAdapter, UspsEndpoints,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{basic_auth, body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_TIMEOUT_MS: u64 = 2000;

async fn mount_token(server: &MockServer, token_path: &str, token: &str) {
    Mock::given(method("POST"))
        .and(path(token_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": token, "token_type": "Bearer", "expires_in": 3600})),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn usps_live_flow_maps_mail_classes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/v3/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=usps-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "usps-token"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/shipments/v3/options/search"))
        .and(header("authorization", "Bearer usps-token"))
        .and(body_partial_json(json!({"originZIPCode": "94105"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pricingOptions": [
                {"shippingOptions": [
                    {"mailClass": "PRIORITY_MAIL"},
                    {"mailClass": "USPS_GROUND_ADVANTAGE"},
                    {"mailClass": "BOUND_PRINTED_MATTER"}
                ]}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = UspsAdapter::new(
        Some(ClientCredentials::new("usps-id", "usps-secret")),
        UspsEndpoints::from_base_url(&server.uri()),
        TEST_TIMEOUT_MS,
    )
    .unwrap();

    let services = adapter.fetch_services(&Package::reference()).await.unwrap();
    assert_eq!(services.len(), 3);
    assert_eq!(services[0].service(), "Priority Mail");
    assert_eq!(services[0].code(), "usps_PRIORITY_MAIL");
    assert_eq!(services[1].service(), "Ground Advantage");
    assert_eq!(services[2].service(), "Unknown (BOUND_PRINTED_MATTER)");
}

#[tokio::test]
async fn ups_token_uses_basic_auth_and_merchant_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/security/v1/oauth/token"))
        .and(basic_auth("ups-id", "ups-secret"))
        .and(header("x-merchant-id", "ups-id"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "ups-token"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/rating/v2403/Shop"))
        .and(header("authorization", "Bearer ups-token"))
        .and(body_partial_json(
            json!({"RateRequest": {"Request": {"RequestOption": "Shop"}}}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "RateResponse": {
                "RatedShipment": [
                    {"Service": {"Code": "03"}},
                    {"Service": {"Code": "12"}},
                    {"Service": {"Code": "96"}}
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = UpsAdapter::new(
        Some(ClientCredentials::new("ups-id", "ups-secret")),
        UpsEndpoints::from_base_url(&server.uri()),
        TEST_TIMEOUT_MS,
    )
    .unwrap();

    let services = adapter.fetch_services(&Package::reference()).await.unwrap();
    assert_eq!(services.len(), 3);
    assert_eq!(services[0].service(), "Ground");
    assert_eq!(services[1].service(), "3 Day Select");
    assert_eq!(services[2].service(), "Unknown (96)");
    assert_eq!(services[2].code(), "ups_96");
}

#[tokio::test]
async fn fedex_live_flow_sends_account_number() {
    let server = MockServer::start().await;
    mount_token(&server, "/oauth/token", "fedex-token").await;

    Mock::given(method("POST"))
        .and(path("/rate/v1/rates/quotes"))
        .and(header("authorization", "Bearer fedex-token"))
        .and(body_partial_json(
            json!({"accountNumber": {"value": "123456789"}}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": {
                "rateReplyDetails": [
                    {"serviceType": "FEDEX_GROUND"},
                    {"serviceType": "FEDEX_REGIONAL_ECONOMY", "serviceName": "FedEx Regional Economy"}
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = FedexAdapter::new(
        Some(FedexCredentials::new("fedex-key", "fedex-secret", "123456789")),
        FedexEndpoints::from_base_url(&server.uri()),
        TEST_TIMEOUT_MS,
    )
    .unwrap();

    let services = adapter.fetch_services(&Package::reference()).await.unwrap();
    assert_eq!(services.len(), 2);
    assert_eq!(services[0].service(), "FedEx Ground");
    assert_eq!(services[1].service(), "FedEx Regional Economy");
    assert_eq!(services[1].code(), "fedex_FEDEX_REGIONAL_ECONOMY");
}

#[tokio::test]
async fn rejected_token_is_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/v3/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid client"))
        .mount(&server)
        .await;

    let adapter = UspsAdapter::new(
        Some(ClientCredentials::new("bad-id", "bad-secret")),
        UspsEndpoints::from_base_url(&server.uri()),
        TEST_TIMEOUT_MS,
    )
    .unwrap();

    let err = adapter
        .fetch_services(&Package::reference())
        .await
        .unwrap_err();
    assert!(matches!(err, CarrierError::Authentication { .. }));
}

#[tokio::test]
async fn server_error_is_retryable() {
    let server = MockServer::start().await;
    mount_token(&server, "/oauth/token", "fedex-token").await;

    Mock::given(method("POST"))
        .and(path("/rate/v1/rates/quotes"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let adapter = FedexAdapter::new(
        Some(FedexCredentials::new("key", "secret", "123456789")),
        FedexEndpoints::from_base_url(&server.uri()),
        TEST_TIMEOUT_MS,
    )
    .unwrap();

    let err = adapter
        .fetch_services(&Package::reference())
        .await
        .unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn malformed_body_is_protocol_error() {
    let server = MockServer::start().await;
    mount_token(&server, "/security/v1/oauth/token", "ups-token").await;

    Mock::given(method("POST"))
        .and(path("/api/rating/v2403/Shop"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let adapter = UpsAdapter::new(
        Some(ClientCredentials::new("id", "secret")),
        UpsEndpoints::from_base_url(&server.uri()),
        TEST_TIMEOUT_MS,
    )
    .unwrap();

    let err = adapter
        .fetch_services(&Package::reference())
        .await
        .unwrap_err();
    assert!(matches!(err, CarrierError::Protocol { .. }));
}

#[tokio::test]
async fn hung_endpoint_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/v3/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "tok"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let adapter = UspsAdapter::new(
        Some(ClientCredentials::new("id", "secret")),
        UspsEndpoints::from_base_url(&server.uri()),
        100,
    )
    .unwrap();

    let err = adapter
        .fetch_services(&Package::reference())
        .await
        .unwrap_err();
    assert!(matches!(err, CarrierError::Timeout { .. }));
}
