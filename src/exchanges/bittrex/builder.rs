use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{HttpRest, HmacSigner, RestClientBuilder, RestClientConfig, Transport};
use crate::exchanges::bittrex::connector::BittrexConnector;
use std::sync::Arc;
use tracing::debug;

pub const EXCHANGE_NAME: &str = "bittrex";

/// Create a Bittrex connector for public and signed endpoints
///
/// Fails with `ConfigError` when the key or secret is empty.
pub fn build_connector(config: ExchangeConfig) -> Result<BittrexConnector<HttpRest>, ExchangeError> {
    let rest = signed_rest_builder(&config)?.build()?;
    Ok(BittrexConnector::new(rest))
}

/// Create a connector for public endpoints only; signed operations fail
/// with `AuthError` without touching the network
pub fn build_public_connector(
    config: ExchangeConfig,
) -> Result<BittrexConnector<HttpRest>, ExchangeError> {
    config.validate_transport()?;
    let rest = RestClientBuilder::new(RestClientConfig::from_exchange_config(
        &config,
        EXCHANGE_NAME,
    ))
    .build()?;
    Ok(BittrexConnector::new(rest))
}

/// Create a signed connector over a caller-supplied transport
pub fn build_connector_with_transport(
    config: ExchangeConfig,
    transport: Arc<dyn Transport>,
) -> Result<BittrexConnector<HttpRest>, ExchangeError> {
    let rest = signed_rest_builder(&config)?
        .with_transport(transport)
        .build()?;
    Ok(BittrexConnector::new(rest))
}

fn signed_rest_builder(config: &ExchangeConfig) -> Result<RestClientBuilder, ExchangeError> {
    config.validate()?;
    let rest_config = RestClientConfig::from_exchange_config(config, EXCHANGE_NAME);
    debug!(
        base_url = %rest_config.base_url,
        timeout_ms = rest_config.timeout.as_millis() as u64,
        max_concurrency = ?rest_config.max_concurrency,
        "building signed client"
    );

    let signer = HmacSigner::new(config.api_key().to_string(), config.secret_key.clone())?;
    Ok(RestClientBuilder::new(rest_config).with_signer(Arc::new(signer)))
}
