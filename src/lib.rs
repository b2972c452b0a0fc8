pub mod core;
pub mod exchanges;

pub use crate::core::{
    config::ExchangeConfig,
    errors::{AggregateError, ExchangeError, JobFailure},
    traits::{AccountInfo, ExchangeConnector, MarketTrading, PublicData},
    types::RequestSpec,
};
pub use exchanges::bittrex::{build_connector, build_public_connector, BittrexConnector};
