use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("API error: {message}")]
    ApiError { message: String },

    #[error(transparent)]
    AggregateError(#[from] AggregateError),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),

    #[error("Client construction failed: {0}")]
    ConfigurationError(String),
}

impl ExchangeError {
    /// True for failures below the API layer (connection, timeout).
    ///
    /// The client never retries on its own; this only helps callers decide.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::TransportError(_) => true,
            Self::AggregateError(aggregate) => aggregate
                .failures()
                .iter()
                .all(|failure| failure.error.is_transient()),
            _ => false,
        }
    }

    /// The exchange-reported message, if this is an `ApiError`.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::ApiError { message } => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TransportError(format!("Request timed out: {}", err))
        } else {
            Self::TransportError(format!("Request failed: {}", err))
        }
    }
}

/// One failed job of a fan-out batch.
#[derive(Debug)]
pub struct JobFailure {
    /// The input value (currency or market) the job was issued for.
    pub value: String,
    pub error: ExchangeError,
}

/// Report for a fan-out batch in which at least one job failed.
///
/// Every failure is kept, in input order, together with the values whose jobs
/// succeeded so partial progress is never silently dropped.
#[derive(Debug)]
pub struct AggregateError {
    failures: Vec<JobFailure>,
    succeeded: Vec<String>,
}

impl AggregateError {
    pub fn new(failures: Vec<JobFailure>, succeeded: Vec<String>) -> Self {
        Self {
            failures,
            succeeded,
        }
    }

    pub fn failures(&self) -> &[JobFailure] {
        &self.failures
    }

    /// Values whose jobs completed successfully; their results were discarded.
    pub fn succeeded(&self) -> &[String] {
        &self.succeeded
    }

    pub fn failed_values(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|failure| failure.value.as_str())
    }

    pub fn error_for(&self, value: &str) -> Option<&ExchangeError> {
        self.failures
            .iter()
            .find(|failure| failure.value == value)
            .map(|failure| &failure.error)
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} requests failed: ",
            self.failures.len(),
            self.failures.len() + self.succeeded.len()
        )?;
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "[{}] {}", failure.value, failure.error)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {}
