use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::{AccountInfo, ExchangeConnector, MarketTrading, PublicData};
use crate::exchanges::bittrex::rest::BittrexRest;
use crate::exchanges::bittrex::types::{
    Balance, Currency, DepositAddress, Market, MarketSummary, OpenOrder, Order, OrderBook,
    OrderBookSide, OrderHistoryEntry, OrderId, Ticker, Trade, Transfer,
};
use async_trait::async_trait;
use rust_decimal::Decimal;

pub mod account;
pub mod market_data;
pub mod trading;

pub use account::Account;
pub use market_data::MarketData;
pub use trading::Trading;

/// Bittrex connector that composes all sub-trait implementations
///
/// All parts share one REST client, so they share its connection pool, its
/// credentials and its nonce sequence.
pub struct BittrexConnector<R: RestClient> {
    pub market: MarketData<R>,
    pub trading: Trading<R>,
    pub account: Account<R>,
}

impl<R: RestClient + Clone> BittrexConnector<R> {
    pub fn new(rest: R) -> Self {
        Self {
            market: MarketData::new(&rest),
            trading: Trading::new(&rest),
            account: Account::new(&rest),
        }
    }
}

/// Fail fast, before any network I/O, when the client cannot sign
pub(crate) fn ensure_authenticated<R: RestClient>(
    rest: &BittrexRest<R>,
) -> Result<(), ExchangeError> {
    if rest.can_sign() {
        Ok(())
    } else {
        Err(ExchangeError::AuthError(
            "this operation requires API credentials".to_string(),
        ))
    }
}

/// Owned copies of caller symbols for the fan-out jobs
pub(crate) fn owned_symbols(symbols: &[&str]) -> Result<Vec<String>, ExchangeError> {
    symbols
        .iter()
        .map(|symbol| {
            let symbol = symbol.trim();
            if symbol.is_empty() {
                Err(ExchangeError::InvalidParameters(
                    "symbol list contains an empty entry".to_string(),
                ))
            } else {
                Ok(symbol.to_string())
            }
        })
        .collect()
}

#[async_trait]
impl<R: RestClient + Clone + 'static> PublicData for BittrexConnector<R> {
    async fn get_currencies(&self) -> Result<Vec<Currency>, ExchangeError> {
        self.market.get_currencies().await
    }

    async fn get_markets(&self) -> Result<Vec<Market>, ExchangeError> {
        self.market.get_markets().await
    }

    async fn get_ticker(&self, market: &str) -> Result<Ticker, ExchangeError> {
        self.market.get_ticker(market).await
    }

    async fn get_market_summaries(
        &self,
        markets: &[&str],
    ) -> Result<Vec<MarketSummary>, ExchangeError> {
        self.market.get_market_summaries(markets).await
    }

    async fn get_order_book(
        &self,
        market: &str,
        side: OrderBookSide,
    ) -> Result<OrderBook, ExchangeError> {
        self.market.get_order_book(market, side).await
    }

    async fn get_market_history(&self, market: &str) -> Result<Vec<Trade>, ExchangeError> {
        self.market.get_market_history(market).await
    }
}

#[async_trait]
impl<R: RestClient + Clone + 'static> MarketTrading for BittrexConnector<R> {
    async fn buy_limit(
        &self,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
    ) -> Result<OrderId, ExchangeError> {
        self.trading.buy_limit(market, quantity, rate).await
    }

    async fn sell_limit(
        &self,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
    ) -> Result<OrderId, ExchangeError> {
        self.trading.sell_limit(market, quantity, rate).await
    }

    async fn cancel_order(&self, uuid: &str) -> Result<(), ExchangeError> {
        self.trading.cancel_order(uuid).await
    }

    async fn get_open_orders(&self, market: &str) -> Result<Vec<OpenOrder>, ExchangeError> {
        self.trading.get_open_orders(market).await
    }
}

#[async_trait]
impl<R: RestClient + Clone + 'static> AccountInfo for BittrexConnector<R> {
    async fn get_balances(&self, currencies: &[&str]) -> Result<Vec<Balance>, ExchangeError> {
        self.account.get_balances(currencies).await
    }

    async fn get_deposit_address(&self, currency: &str) -> Result<DepositAddress, ExchangeError> {
        self.account.get_deposit_address(currency).await
    }

    async fn withdraw(
        &self,
        currency: &str,
        quantity: Decimal,
        address: &str,
        payment_id: Option<&str>,
    ) -> Result<OrderId, ExchangeError> {
        self.account
            .withdraw(currency, quantity, address, payment_id)
            .await
    }

    async fn get_order(&self, uuid: &str) -> Result<Order, ExchangeError> {
        self.account.get_order(uuid).await
    }

    async fn get_order_history(
        &self,
        markets: &[&str],
    ) -> Result<Vec<OrderHistoryEntry>, ExchangeError> {
        self.account.get_order_history(markets).await
    }

    async fn get_withdrawal_history(
        &self,
        currencies: &[&str],
    ) -> Result<Vec<Transfer>, ExchangeError> {
        self.account.get_withdrawal_history(currencies).await
    }

    async fn get_deposit_history(
        &self,
        currencies: &[&str],
    ) -> Result<Vec<Transfer>, ExchangeError> {
        self.account.get_deposit_history(currencies).await
    }
}

impl<R: RestClient + Clone + 'static> ExchangeConnector for BittrexConnector<R> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_symbols_trims_and_rejects_blanks() {
        assert_eq!(
            owned_symbols(&[" BTC", "ETH "]).unwrap(),
            vec!["BTC".to_string(), "ETH".to_string()]
        );
        assert!(matches!(
            owned_symbols(&["BTC", " "]),
            Err(ExchangeError::InvalidParameters(_))
        ));
    }
}
