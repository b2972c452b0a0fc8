/// Request pipeline shared by every endpoint
///
/// # Architecture
///
/// ## Authentication
/// - `Signer`: pluggable authentication interface
/// - `HmacSigner`: HMAC-SHA512 over the full request URL, sent as `apisign`
/// - `NonceGenerator`: strictly increasing per-credential nonces
///
/// ## Transport
/// - `Transport`: one GET, no retries
/// - `ReqwestTransport`: pooled reqwest client with a request timeout
///
/// ## Response handling
/// - `decode_envelope`: unwraps `{success, message, result}`
/// - `decode_result`: decodes an unwrapped payload into a typed record
///
/// ## Composition
/// - `RestClient` / `HttpRest`: build URL, sign, send, unwrap
/// - `FanOut`: one concurrent request per symbol, results combined
///
/// # Example
/// ```rust,no_run
/// use bittrex::core::kernel::*;
/// use bittrex::core::types::RequestSpec;
/// use secrecy::Secret;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), bittrex::ExchangeError> {
/// let signer = HmacSigner::new("api_key".to_string(), Secret::new("secret".to_string()))?;
/// let rest = RestClientBuilder::new(RestClientConfig::new(
///     "https://bittrex.com/api".to_string(),
///     "bittrex".to_string(),
/// ))
/// .with_signer(Arc::new(signer))
/// .build()?;
///
/// let spec = RequestSpec::new("account/getbalance", true).param("currency", "BTC");
/// let payload = rest.request(&spec).await?;
/// let balance: serde_json::Value = decode_result(&payload)?;
/// # Ok(())
/// # }
/// ```
pub mod envelope;
pub mod fanout;
pub mod nonce;
pub mod rest;
pub mod signer;
pub mod transport;

pub use envelope::{decode_envelope, decode_result, Envelope, Payload};
pub use fanout::FanOut;
pub use nonce::NonceGenerator;
pub use rest::{HttpRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{sign, verify, HmacSigner, SignatureResult, Signer, SIGNATURE_HEADER};
pub use transport::{RawResponse, ReqwestTransport, Transport};
