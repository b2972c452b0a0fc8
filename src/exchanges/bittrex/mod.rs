pub mod builder;
pub mod connector;
pub mod endpoints;
pub mod rest;
pub mod types;

pub use builder::{build_connector, build_connector_with_transport, build_public_connector};
pub use connector::BittrexConnector;
pub use endpoints::{Endpoint, EndpointDescriptor, EndpointRequest, ResultShape};
pub use types::{
    Balance, Currency, DepositAddress, Market, MarketSummary, OpenOrder, Order, OrderBook,
    OrderBookEntry, OrderBookSide, OrderHistoryEntry, OrderId, Ticker, Trade, Transfer,
};
