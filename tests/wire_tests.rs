//! End-to-end requests against a local mock server over real HTTP

use bittrex::core::config::ExchangeConfig;
use bittrex::core::errors::ExchangeError;
use bittrex::core::kernel::{verify, SIGNATURE_HEADER};
use bittrex::core::traits::{AccountInfo, MarketTrading, PublicData};
use bittrex::exchanges::bittrex::OrderBookSide;
use bittrex::{build_connector, build_public_connector};
use rust_decimal_macros::dec;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const API_KEY: &str = "wire_key";
const SECRET: &str = "wire_secret";

fn envelope(result: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(format!(
        r#"{{"success":true,"message":"","result":{}}}"#,
        result
    ))
}

fn signed_config(server: &MockServer) -> ExchangeConfig {
    ExchangeConfig::new(API_KEY.to_string(), SECRET.to_string())
        .base_url(format!("{}/api", server.uri()))
        .timeout(Duration::from_secs(5))
}

fn public_config(server: &MockServer) -> ExchangeConfig {
    ExchangeConfig::read_only().base_url(format!("{}/api", server.uri()))
}

#[tokio::test]
async fn test_signed_request_carries_verifiable_signature() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1.1/market/buylimit"))
        .and(query_param("apikey", API_KEY))
        .and(query_param("market", "BTC-LTC"))
        .and(query_param("quantity", "1.5"))
        .and(query_param("rate", "0.0025"))
        .respond_with(envelope(r#"{"uuid":"e606d53c-8d70-11e3-94b5-425861b86ab6"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let connector = build_connector(signed_config(&server)).unwrap();
    let order = connector
        .buy_limit("BTC-LTC", dec!(1.50), dec!(0.0025))
        .await
        .unwrap();
    assert_eq!(order.uuid, "e606d53c-8d70-11e3-94b5-425861b86ab6");

    let requests: Vec<Request> = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    let pairs: Vec<(String, String)> = request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(pairs.first().map(|(k, _)| k.as_str()), Some("apikey"));
    assert_eq!(pairs.last().map(|(k, _)| k.as_str()), Some("nonce"));

    let signature = request
        .headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .expect("signature header");
    // the mock server reports its requests under a placeholder host
    let sent_url = format!(
        "{}{}?{}",
        server.uri(),
        request.url.path(),
        request.url.query().unwrap_or_default()
    );
    assert!(verify(SECRET.as_bytes(), &sent_url, signature));
}

#[tokio::test]
async fn test_api_failure_surfaces_exchange_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1.1/account/getbalance"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"success":false,"message":"APIKEY_INVALID","result":null}"#,
        ))
        .mount(&server)
        .await;

    let connector = build_connector(signed_config(&server)).unwrap();
    let err = connector.get_balances(&["BTC"]).await.unwrap_err();

    let ExchangeError::AggregateError(aggregate) = &err else {
        panic!("expected an aggregate error, got {:?}", err);
    };
    match aggregate.error_for("BTC") {
        Some(ExchangeError::ApiError { message }) => assert_eq!(message, "APIKEY_INVALID"),
        other => panic!("unexpected failure: {:?}", other),
    }
}

#[tokio::test]
async fn test_single_request_failure_is_not_aggregated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1.1/public/getticker"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"success":false,"message":"INVALID_MARKET","result":null}"#,
        ))
        .mount(&server)
        .await;

    let connector = build_public_connector(public_config(&server)).unwrap();
    let err = connector.get_ticker("BTC-NOPE").await.unwrap_err();

    assert_eq!(err.api_message(), Some("INVALID_MARKET"));
}

#[tokio::test]
async fn test_non_json_body_is_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1.1/public/getmarkets"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let connector = build_public_connector(public_config(&server)).unwrap();
    let err = connector.get_markets().await.unwrap_err();

    match err {
        ExchangeError::MalformedResponse(detail) => assert!(detail.contains("502")),
        other => panic!("expected a malformed response, got {:?}", other),
    }
}

#[tokio::test]
async fn test_order_book_sides() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1.1/public/getorderbook"))
        .and(query_param("type", "both"))
        .respond_with(envelope(
            r#"{"buy":[{"Quantity":12.37,"Rate":0.02525}],
                "sell":[{"Quantity":32.55,"Rate":0.02540},{"Quantity":60.0,"Rate":0.02541}]}"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1.1/public/getorderbook"))
        .and(query_param("type", "sell"))
        .respond_with(envelope(r#"[{"Quantity":32.55,"Rate":0.02540}]"#))
        .mount(&server)
        .await;

    let connector = build_public_connector(public_config(&server)).unwrap();

    let both = connector
        .get_order_book("BTC-LTC", OrderBookSide::Both)
        .await
        .unwrap();
    assert_eq!(both.buy.len(), 1);
    assert_eq!(both.sell.len(), 2);
    assert_eq!(both.buy[0].rate, dec!(0.02525));

    let sell = connector
        .get_order_book("BTC-LTC", OrderBookSide::Sell)
        .await
        .unwrap();
    assert!(sell.buy.is_empty());
    assert_eq!(sell.sell.len(), 1);
    assert_eq!(sell.sell[0].quantity, dec!(32.55));
}

#[tokio::test]
async fn test_withdraw_sends_payment_id_only_when_given() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1.1/account/withdraw"))
        .respond_with(envelope(r#"{"uuid":"68b5a16c-92de-11e3-ba3b-425861b86ab6"}"#))
        .expect(2)
        .mount(&server)
        .await;

    let connector = build_connector(signed_config(&server)).unwrap();
    connector
        .withdraw("XMR", dec!(2), "4Address", Some("abc"))
        .await
        .unwrap();
    connector
        .withdraw("BTC", dec!(0.1), "1Address", None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let has_payment_id = |request: &Request| {
        request
            .url
            .query_pairs()
            .any(|(key, value)| key == "paymentid" && value == "abc")
    };
    assert!(has_payment_id(&requests[0]));
    assert!(!requests[1]
        .url
        .query_pairs()
        .any(|(key, _)| key == "paymentid"));
}

#[tokio::test]
async fn test_cancel_accepts_null_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1.1/market/cancel"))
        .and(query_param("uuid", "09aa5bb6-8232-41aa-9b78-a5a1093e0211"))
        .respond_with(envelope("null"))
        .expect(1)
        .mount(&server)
        .await;

    let connector = build_connector(signed_config(&server)).unwrap();
    connector
        .cancel_order("09aa5bb6-8232-41aa-9b78-a5a1093e0211")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(envelope("[]").set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let config = public_config(&server).timeout(Duration::from_millis(50));
    let connector = build_public_connector(config).unwrap();
    let err = connector.get_currencies().await.unwrap_err();

    assert!(matches!(err, ExchangeError::TransportError(_)), "{err:?}");
}
