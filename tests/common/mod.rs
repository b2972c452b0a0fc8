//! Shared test utilities: a scripted, recording `Transport`
#![allow(dead_code)]

use async_trait::async_trait;
use bittrex::core::config::ExchangeConfig;
use bittrex::core::errors::ExchangeError;
use bittrex::core::kernel::{HttpRest, RawResponse, Transport};
use bittrex::exchanges::bittrex::{build_connector_with_transport, BittrexConnector};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

pub const API_KEY: &str = "test_api_key";
pub const SECRET: &str = "test_secret_key";

type Responder = dyn Fn(&Url) -> Result<String, ExchangeError> + Send + Sync;

/// One request as it reached the transport
#[derive(Debug, Clone)]
pub struct Recorded {
    pub url: String,
    pub headers: HashMap<String, String>,
}

impl Recorded {
    pub fn query(&self, name: &str) -> Option<String> {
        Url::parse(&self.url)
            .ok()?
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    pub fn path(&self) -> String {
        Url::parse(&self.url)
            .map(|url| url.path().to_string())
            .unwrap_or_default()
    }
}

/// Transport stub that answers from a closure and records every call
pub struct StubTransport {
    calls: Mutex<Vec<Recorded>>,
    responder: Box<Responder>,
    delay: Duration,
}

impl StubTransport {
    pub fn new(
        responder: impl Fn(&Url) -> Result<String, ExchangeError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
            delay: Duration::from_millis(5),
        })
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn execute(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<RawResponse, ExchangeError> {
        self.calls.lock().unwrap().push(Recorded {
            url: url.to_string(),
            headers: headers.clone(),
        });
        // keep jobs overlapping
        tokio::time::sleep(self.delay).await;

        let parsed = Url::parse(url).expect("transport received an invalid URL");
        let body = (self.responder)(&parsed)?;
        Ok(RawResponse {
            status: 200,
            body: body.into_bytes(),
        })
    }
}

/// Successful envelope around `result`
pub fn ok(result: &str) -> String {
    format!(r#"{{"success":true,"message":"","result":{}}}"#, result)
}

/// Failed envelope carrying `message`
pub fn api_failure(message: &str) -> String {
    format!(r#"{{"success":false,"message":"{}","result":null}}"#, message)
}

pub fn query_value(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

pub fn connector(transport: Arc<StubTransport>) -> BittrexConnector<HttpRest> {
    connector_with(transport, ExchangeConfig::new(API_KEY.to_string(), SECRET.to_string()))
}

pub fn connector_with(
    transport: Arc<StubTransport>,
    config: ExchangeConfig,
) -> BittrexConnector<HttpRest> {
    build_connector_with_transport(config, transport).expect("connector init")
}

pub fn balance_json(currency: &str, balance: &str) -> String {
    format!(
        r#"{{"Currency":"{}","Balance":{},"Available":{},"Pending":0,"CryptoAddress":null}}"#,
        currency, balance, balance
    )
}

pub fn order_history_json(uuid: &str, market: &str) -> String {
    format!(
        r#"{{
            "OrderUuid": "{}",
            "Exchange": "{}",
            "TimeStamp": "2014-07-09T04:01:00.667",
            "OrderType": "LIMIT_BUY",
            "Limit": 0.5,
            "Quantity": 2.0,
            "QuantityRemaining": 0.0,
            "Commission": 0.0025,
            "Price": 1.0,
            "PricePerUnit": 0.5,
            "IsConditional": false,
            "Condition": null,
            "ConditionTarget": null,
            "ImmediateOrCancel": false
        }}"#,
        uuid, market
    )
}
