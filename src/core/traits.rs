use crate::core::errors::ExchangeError;
use crate::exchanges::bittrex::types::{
    Balance, Currency, DepositAddress, Market, MarketSummary, OpenOrder, Order, OrderBook,
    OrderBookSide, OrderHistoryEntry, OrderId, Ticker, Trade, Transfer,
};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Unsigned market data
///
/// Methods taking a list of markets issue one request per market
/// concurrently; an empty list fetches all markets with a single request.
#[async_trait]
pub trait PublicData {
    async fn get_currencies(&self) -> Result<Vec<Currency>, ExchangeError>;

    async fn get_markets(&self) -> Result<Vec<Market>, ExchangeError>;

    async fn get_ticker(&self, market: &str) -> Result<Ticker, ExchangeError>;

    async fn get_market_summaries(
        &self,
        markets: &[&str],
    ) -> Result<Vec<MarketSummary>, ExchangeError>;

    async fn get_order_book(
        &self,
        market: &str,
        side: OrderBookSide,
    ) -> Result<OrderBook, ExchangeError>;

    async fn get_market_history(&self, market: &str) -> Result<Vec<Trade>, ExchangeError>;
}

/// Signed order management
#[async_trait]
pub trait MarketTrading {
    async fn buy_limit(
        &self,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
    ) -> Result<OrderId, ExchangeError>;

    async fn sell_limit(
        &self,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
    ) -> Result<OrderId, ExchangeError>;

    async fn cancel_order(&self, uuid: &str) -> Result<(), ExchangeError>;

    async fn get_open_orders(&self, market: &str) -> Result<Vec<OpenOrder>, ExchangeError>;
}

/// Signed account queries and withdrawals
///
/// List-taking methods follow the same rule as [`PublicData`]: one concurrent
/// request per symbol, or a single unfiltered request for an empty list.
#[async_trait]
pub trait AccountInfo {
    async fn get_balances(&self, currencies: &[&str]) -> Result<Vec<Balance>, ExchangeError>;

    /// Fails with `ApiError("ADDRESS_GENERATING")` while a new address is
    /// being created; callers may retry later.
    async fn get_deposit_address(&self, currency: &str) -> Result<DepositAddress, ExchangeError>;

    async fn withdraw(
        &self,
        currency: &str,
        quantity: Decimal,
        address: &str,
        payment_id: Option<&str>,
    ) -> Result<OrderId, ExchangeError>;

    async fn get_order(&self, uuid: &str) -> Result<Order, ExchangeError>;

    async fn get_order_history(
        &self,
        markets: &[&str],
    ) -> Result<Vec<OrderHistoryEntry>, ExchangeError>;

    async fn get_withdrawal_history(
        &self,
        currencies: &[&str],
    ) -> Result<Vec<Transfer>, ExchangeError>;

    async fn get_deposit_history(&self, currencies: &[&str])
        -> Result<Vec<Transfer>, ExchangeError>;
}

/// Everything the exchange offers
#[async_trait]
pub trait ExchangeConnector: PublicData + MarketTrading + AccountInfo {}
