use crate::core::config::{ExchangeConfig, DEFAULT_API_VERSION};
use crate::core::errors::ExchangeError;
use crate::core::kernel::envelope::{decode_envelope, Payload};
use crate::core::kernel::fanout::FanOut;
use crate::core::kernel::signer::Signer;
use crate::core::kernel::transport::{ReqwestTransport, Transport};
use crate::core::types::RequestSpec;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, trace};
use url::Url;

/// REST client trait for the request pipeline
///
/// One call builds the URL, signs it when required, sends it and unwraps the
/// response envelope.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Execute one request and return the unwrapped `result` payload
    async fn request(&self, spec: &RequestSpec) -> Result<Payload, ExchangeError>;

    /// Aggregator used for multi-symbol calls made through this client
    fn fan_out(&self) -> &FanOut;

    /// Whether this client can issue signed requests
    fn can_sign(&self) -> bool;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API, without the version segment
    pub base_url: String,
    /// Version path segment inserted after the base URL
    pub api_version: String,
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Cap on fan-out requests in flight at once, shared by every batch and
    /// every clone of the client
    pub max_concurrency: Option<usize>,
    /// User agent string to include in requests
    pub user_agent: String,
    /// Log raw response bodies
    pub debug: bool,
}

impl RestClientConfig {
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url,
            api_version: DEFAULT_API_VERSION.to_string(),
            exchange_name,
            timeout: crate::core::config::DEFAULT_TIMEOUT,
            max_concurrency: None,
            user_agent: concat!("bittrex-rs/", env!("CARGO_PKG_VERSION")).to_string(),
            debug: false,
        }
    }

    /// Derive the transport settings from an exchange configuration
    pub fn from_exchange_config(config: &ExchangeConfig, exchange_name: &str) -> Self {
        let mut rest = Self::new(
            config.effective_base_url().to_string(),
            exchange_name.to_string(),
        )
        .with_timeout(config.effective_timeout());
        rest.max_concurrency = config.max_concurrency;
        rest.debug = config.debug;
        rest
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_api_version(mut self, api_version: String) -> Self {
        self.api_version = api_version;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = Some(max_concurrency);
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
    transport: Option<Arc<dyn Transport>>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
            transport: None,
        }
    }

    /// Set the signer for authenticated requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Replace the default reqwest transport
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<HttpRest, ExchangeError> {
        Url::parse(&self.config.base_url).map_err(|e| {
            ExchangeError::ConfigurationError(format!(
                "Invalid base URL '{}': {}",
                self.config.base_url, e
            ))
        })?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                self.config.timeout,
                &self.config.user_agent,
            )?),
        };

        let fan_out = match self.config.max_concurrency {
            Some(limit) => FanOut::with_limit(limit),
            None => FanOut::new(),
        };

        Ok(HttpRest {
            transport,
            signer: self.signer,
            fan_out,
            config: self.config,
        })
    }
}

/// `RestClient` over a shared `Transport`
///
/// Cloning is cheap; clones share the connection pool and the signer's nonce
/// sequence.
#[derive(Clone)]
pub struct HttpRest {
    transport: Arc<dyn Transport>,
    signer: Option<Arc<dyn Signer>>,
    fan_out: FanOut,
    config: RestClientConfig,
}

impl std::fmt::Debug for HttpRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl HttpRest {
    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    /// Build the full request URL: `{base}/{version}/{path}?{query}`
    ///
    /// The returned URL is already normalized, so its string form is exactly
    /// what goes on the wire.
    pub fn build_url(&self, path: &str, query: &[(String, String)]) -> Result<Url, ExchangeError> {
        let raw = format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version.trim_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|e| {
            ExchangeError::InvalidParameters(format!("Invalid request path '{}': {}", path, e))
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn require_signer(&self) -> Result<&Arc<dyn Signer>, ExchangeError> {
        self.signer.as_ref().ok_or_else(|| {
            ExchangeError::AuthError(
                "Authentication required but no credentials configured".to_string(),
            )
        })
    }
}

#[async_trait]
impl RestClient for HttpRest {
    #[instrument(
        skip(self, spec),
        fields(exchange = %self.config.exchange_name, path = %spec.path, auth = spec.requires_auth)
    )]
    async fn request(&self, spec: &RequestSpec) -> Result<Payload, ExchangeError> {
        let signer = if spec.requires_auth {
            Some(self.require_signer()?)
        } else {
            None
        };

        let mut query = Vec::with_capacity(spec.params.len() + 2);
        if let Some(signer) = signer {
            query.push(("apikey".to_string(), signer.api_key().to_string()));
        }
        query.extend(spec.params.iter().cloned());
        if let Some(signer) = signer {
            query.push(("nonce".to_string(), signer.next_nonce().to_string()));
        }

        let url = self.build_url(&spec.path, &query)?;
        let headers = match signer {
            // Signed only after the nonce is embedded
            Some(signer) => signer.sign_request(url.as_str())?,
            None => HashMap::new(),
        };

        debug!("sending request");
        let response = self.transport.execute(url.as_str(), &headers).await?;
        if self.config.debug {
            debug!(status = response.status, body = %String::from_utf8_lossy(&response.body), "raw response");
        } else {
            trace!(status = response.status, len = response.body.len(), "raw response");
        }

        decode_envelope(&response.body).map_err(|err| match err {
            ExchangeError::MalformedResponse(reason) if !(200..300).contains(&response.status) => {
                ExchangeError::MalformedResponse(format!("HTTP {}: {}", response.status, reason))
            }
            other => other,
        })
    }

    fn fan_out(&self) -> &FanOut {
        &self.fan_out
    }

    fn can_sign(&self) -> bool {
        self.signer.is_some()
    }
}
