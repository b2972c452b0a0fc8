use crate::core::{errors::ExchangeError, kernel::RestClient, traits::MarketTrading};
use crate::exchanges::bittrex::connector::ensure_authenticated;
use crate::exchanges::bittrex::rest::BittrexRest;
use crate::exchanges::bittrex::types::{OpenOrder, OrderId};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{info, instrument};

/// Order placement and cancellation for Bittrex
pub struct Trading<R: RestClient> {
    rest: BittrexRest<R>,
}

impl<R: RestClient + Clone> Trading<R> {
    pub fn new(rest: &R) -> Self {
        Self {
            rest: BittrexRest::new(rest.clone()),
        }
    }
}

#[async_trait]
impl<R: RestClient + Clone + 'static> MarketTrading for Trading<R> {
    #[instrument(skip(self), fields(exchange = "bittrex"))]
    async fn buy_limit(
        &self,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
    ) -> Result<OrderId, ExchangeError> {
        ensure_authenticated(&self.rest)?;
        let order = self.rest.buy_limit(market, quantity, rate).await?;
        info!(uuid = %order.uuid, "buy order placed");
        Ok(order)
    }

    #[instrument(skip(self), fields(exchange = "bittrex"))]
    async fn sell_limit(
        &self,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
    ) -> Result<OrderId, ExchangeError> {
        ensure_authenticated(&self.rest)?;
        let order = self.rest.sell_limit(market, quantity, rate).await?;
        info!(uuid = %order.uuid, "sell order placed");
        Ok(order)
    }

    #[instrument(skip(self), fields(exchange = "bittrex"))]
    async fn cancel_order(&self, uuid: &str) -> Result<(), ExchangeError> {
        ensure_authenticated(&self.rest)?;
        self.rest.cancel_order(uuid).await
    }

    #[instrument(skip(self), fields(exchange = "bittrex"))]
    async fn get_open_orders(&self, market: &str) -> Result<Vec<OpenOrder>, ExchangeError> {
        ensure_authenticated(&self.rest)?;
        self.rest.get_open_orders(market).await
    }
}
