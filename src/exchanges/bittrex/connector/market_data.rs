use crate::core::{errors::ExchangeError, kernel::RestClient, traits::PublicData};
use crate::exchanges::bittrex::connector::owned_symbols;
use crate::exchanges::bittrex::rest::BittrexRest;
use crate::exchanges::bittrex::types::{
    Currency, Market, MarketSummary, OrderBook, OrderBookSide, Ticker, Trade,
};
use async_trait::async_trait;
use tracing::instrument;

/// Public market data for Bittrex
pub struct MarketData<R: RestClient> {
    rest: BittrexRest<R>,
}

impl<R: RestClient + Clone> MarketData<R> {
    pub fn new(rest: &R) -> Self {
        Self {
            rest: BittrexRest::new(rest.clone()),
        }
    }
}

#[async_trait]
impl<R: RestClient + Clone + 'static> PublicData for MarketData<R> {
    #[instrument(skip(self), fields(exchange = "bittrex"))]
    async fn get_currencies(&self) -> Result<Vec<Currency>, ExchangeError> {
        self.rest.get_currencies().await
    }

    #[instrument(skip(self), fields(exchange = "bittrex"))]
    async fn get_markets(&self) -> Result<Vec<Market>, ExchangeError> {
        self.rest.get_markets().await
    }

    #[instrument(skip(self), fields(exchange = "bittrex"))]
    async fn get_ticker(&self, market: &str) -> Result<Ticker, ExchangeError> {
        self.rest.get_ticker(market).await
    }

    #[instrument(skip(self), fields(exchange = "bittrex", markets = markets.len()))]
    async fn get_market_summaries(
        &self,
        markets: &[&str],
    ) -> Result<Vec<MarketSummary>, ExchangeError> {
        if markets.is_empty() {
            return self.rest.get_market_summaries().await;
        }

        let markets = owned_symbols(markets)?;
        let rest = self.rest.clone();
        self.rest
            .fan_out()
            .run(&markets, move |market: String| {
                let rest = rest.clone();
                async move { rest.get_market_summary(&market).await }
            })
            .await
    }

    #[instrument(skip(self), fields(exchange = "bittrex"))]
    async fn get_order_book(
        &self,
        market: &str,
        side: OrderBookSide,
    ) -> Result<OrderBook, ExchangeError> {
        self.rest.get_order_book(market, side).await
    }

    #[instrument(skip(self), fields(exchange = "bittrex"))]
    async fn get_market_history(&self, market: &str) -> Result<Vec<Trade>, ExchangeError> {
        self.rest.get_market_history(market).await
    }
}
