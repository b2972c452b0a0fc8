use crate::core::{errors::ExchangeError, kernel::RestClient, traits::AccountInfo};
use crate::exchanges::bittrex::connector::{ensure_authenticated, owned_symbols};
use crate::exchanges::bittrex::rest::BittrexRest;
use crate::exchanges::bittrex::types::{
    Balance, DepositAddress, Order, OrderHistoryEntry, OrderId, Transfer,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{info, instrument};

/// Account implementation for Bittrex
pub struct Account<R: RestClient> {
    rest: BittrexRest<R>,
}

impl<R: RestClient + Clone> Account<R> {
    pub fn new(rest: &R) -> Self {
        Self {
            rest: BittrexRest::new(rest.clone()),
        }
    }
}

#[async_trait]
impl<R: RestClient + Clone + 'static> AccountInfo for Account<R> {
    #[instrument(skip(self), fields(exchange = "bittrex", currencies = currencies.len()))]
    async fn get_balances(&self, currencies: &[&str]) -> Result<Vec<Balance>, ExchangeError> {
        ensure_authenticated(&self.rest)?;
        if currencies.is_empty() {
            return self.rest.get_balances().await;
        }

        let currencies = owned_symbols(currencies)?;
        let rest = self.rest.clone();
        self.rest
            .fan_out()
            .run_single(&currencies, move |currency: String| {
                let rest = rest.clone();
                async move { rest.get_balance(&currency).await }
            })
            .await
    }

    #[instrument(skip(self), fields(exchange = "bittrex"))]
    async fn get_deposit_address(&self, currency: &str) -> Result<DepositAddress, ExchangeError> {
        ensure_authenticated(&self.rest)?;
        self.rest.get_deposit_address(currency).await
    }

    #[instrument(skip(self, address, payment_id), fields(exchange = "bittrex"))]
    async fn withdraw(
        &self,
        currency: &str,
        quantity: Decimal,
        address: &str,
        payment_id: Option<&str>,
    ) -> Result<OrderId, ExchangeError> {
        ensure_authenticated(&self.rest)?;
        let withdrawal = self
            .rest
            .withdraw(currency, quantity, address, payment_id)
            .await?;
        info!(uuid = %withdrawal.uuid, "withdrawal requested");
        Ok(withdrawal)
    }

    #[instrument(skip(self), fields(exchange = "bittrex"))]
    async fn get_order(&self, uuid: &str) -> Result<Order, ExchangeError> {
        ensure_authenticated(&self.rest)?;
        self.rest.get_order(uuid).await
    }

    #[instrument(skip(self), fields(exchange = "bittrex", markets = markets.len()))]
    async fn get_order_history(
        &self,
        markets: &[&str],
    ) -> Result<Vec<OrderHistoryEntry>, ExchangeError> {
        ensure_authenticated(&self.rest)?;
        if markets.is_empty() {
            return self.rest.get_order_history(None).await;
        }

        let markets = owned_symbols(markets)?;
        let rest = self.rest.clone();
        self.rest
            .fan_out()
            .run(&markets, move |market: String| {
                let rest = rest.clone();
                async move { rest.get_order_history(Some(market.as_str())).await }
            })
            .await
    }

    #[instrument(skip(self), fields(exchange = "bittrex", currencies = currencies.len()))]
    async fn get_withdrawal_history(
        &self,
        currencies: &[&str],
    ) -> Result<Vec<Transfer>, ExchangeError> {
        ensure_authenticated(&self.rest)?;
        if currencies.is_empty() {
            return self.rest.get_withdrawal_history(None).await;
        }

        let currencies = owned_symbols(currencies)?;
        let rest = self.rest.clone();
        self.rest
            .fan_out()
            .run(&currencies, move |currency: String| {
                let rest = rest.clone();
                async move { rest.get_withdrawal_history(Some(currency.as_str())).await }
            })
            .await
    }

    #[instrument(skip(self), fields(exchange = "bittrex", currencies = currencies.len()))]
    async fn get_deposit_history(
        &self,
        currencies: &[&str],
    ) -> Result<Vec<Transfer>, ExchangeError> {
        ensure_authenticated(&self.rest)?;
        if currencies.is_empty() {
            return self.rest.get_deposit_history(None).await;
        }

        let currencies = owned_symbols(currencies)?;
        let rest = self.rest.clone();
        self.rest
            .fan_out()
            .run(&currencies, move |currency: String| {
                let rest = rest.clone();
                async move { rest.get_deposit_history(Some(currency.as_str())).await }
            })
            .await
    }
}
