use crate::core::errors::ExchangeError;
use crate::core::kernel::{decode_result, FanOut, RestClient};
use crate::exchanges::bittrex::endpoints::{Endpoint, EndpointRequest, ResultShape};
use crate::exchanges::bittrex::types::{
    Balance, Currency, DepositAddress, Market, MarketSummary, OpenOrder, Order, OrderBook,
    OrderBookSide, OrderHistoryEntry, OrderId, Ticker, Trade, Transfer,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Thin typed wrapper around `RestClient` for the Bittrex API
///
/// One method per request; every method issues exactly one HTTP call.
#[derive(Debug, Clone)]
pub struct BittrexRest<R: RestClient> {
    client: R,
}

impl<R: RestClient> BittrexRest<R> {
    pub fn new(client: R) -> Self {
        Self { client }
    }

    pub fn fan_out(&self) -> &FanOut {
        self.client.fan_out()
    }

    pub fn can_sign(&self) -> bool {
        self.client.can_sign()
    }

    async fn get<T: DeserializeOwned>(&self, request: EndpointRequest) -> Result<T, ExchangeError> {
        let payload = self.client.request(&request.spec).await?;
        match (request.shape, payload.get()) {
            (ResultShape::Empty, _) => from_absent(Value::Null),
            // empty histories come back as null
            (ResultShape::List, "null") => from_absent(Value::Array(Vec::new())),
            _ => decode_result(&payload),
        }
    }

    pub async fn get_currencies(&self) -> Result<Vec<Currency>, ExchangeError> {
        self.get(Endpoint::Currencies.request()).await
    }

    pub async fn get_markets(&self) -> Result<Vec<Market>, ExchangeError> {
        self.get(Endpoint::Markets.request()).await
    }

    pub async fn get_ticker(&self, market: &str) -> Result<Ticker, ExchangeError> {
        let market = non_empty("market", market)?;
        self.get(Endpoint::Ticker.request().param("market", market))
            .await
    }

    /// Summary of one market (the exchange wraps it in a one-element list)
    pub async fn get_market_summary(
        &self,
        market: &str,
    ) -> Result<Vec<MarketSummary>, ExchangeError> {
        let market = non_empty("market", market)?;
        self.get(Endpoint::MarketSummary.request().param("market", market))
            .await
    }

    pub async fn get_market_summaries(&self) -> Result<Vec<MarketSummary>, ExchangeError> {
        self.get(Endpoint::MarketSummaries.request()).await
    }

    /// A single-sided request returns a bare list; it lands in the matching half
    pub async fn get_order_book(
        &self,
        market: &str,
        side: OrderBookSide,
    ) -> Result<OrderBook, ExchangeError> {
        let market = non_empty("market", market)?;
        let request = Endpoint::OrderBook
            .request()
            .param("market", market)
            .param("type", side.as_str());

        match side {
            OrderBookSide::Both => self.get(request).await,
            OrderBookSide::Buy => Ok(OrderBook {
                buy: self.get(request.with_shape(ResultShape::List)).await?,
                sell: Vec::new(),
            }),
            OrderBookSide::Sell => Ok(OrderBook {
                buy: Vec::new(),
                sell: self.get(request.with_shape(ResultShape::List)).await?,
            }),
        }
    }

    pub async fn get_market_history(&self, market: &str) -> Result<Vec<Trade>, ExchangeError> {
        let market = non_empty("market", market)?;
        self.get(Endpoint::MarketHistory.request().param("market", market))
            .await
    }

    pub async fn buy_limit(
        &self,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
    ) -> Result<OrderId, ExchangeError> {
        self.get(limit_order(Endpoint::BuyLimit, market, quantity, rate)?)
            .await
    }

    pub async fn sell_limit(
        &self,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
    ) -> Result<OrderId, ExchangeError> {
        self.get(limit_order(Endpoint::SellLimit, market, quantity, rate)?)
            .await
    }

    pub async fn cancel_order(&self, uuid: &str) -> Result<(), ExchangeError> {
        let uuid = non_empty("uuid", uuid)?;
        self.get(Endpoint::Cancel.request().param("uuid", uuid))
            .await
    }

    pub async fn get_open_orders(&self, market: &str) -> Result<Vec<OpenOrder>, ExchangeError> {
        let market = non_empty("market", market)?;
        self.get(Endpoint::OpenOrders.request().param("market", market))
            .await
    }

    pub async fn get_balance(&self, currency: &str) -> Result<Balance, ExchangeError> {
        let currency = non_empty("currency", currency)?;
        self.get(Endpoint::Balance.request().param("currency", currency))
            .await
    }

    pub async fn get_balances(&self) -> Result<Vec<Balance>, ExchangeError> {
        self.get(Endpoint::Balances.request()).await
    }

    pub async fn get_deposit_address(
        &self,
        currency: &str,
    ) -> Result<DepositAddress, ExchangeError> {
        let currency = non_empty("currency", currency)?;
        self.get(Endpoint::DepositAddress.request().param("currency", currency))
            .await
    }

    pub async fn withdraw(
        &self,
        currency: &str,
        quantity: Decimal,
        address: &str,
        payment_id: Option<&str>,
    ) -> Result<OrderId, ExchangeError> {
        let currency = non_empty("currency", currency)?;
        let address = non_empty("address", address)?;
        let request = Endpoint::Withdraw
            .request()
            .param("currency", currency)
            .param("quantity", positive("quantity", quantity)?)
            .param("address", address)
            .param_opt("paymentid", payment_id);
        self.get(request).await
    }

    pub async fn get_order(&self, uuid: &str) -> Result<Order, ExchangeError> {
        let uuid = non_empty("uuid", uuid)?;
        self.get(Endpoint::Order.request().param("uuid", uuid))
            .await
    }

    /// Order history, optionally narrowed to one market
    pub async fn get_order_history(
        &self,
        market: Option<&str>,
    ) -> Result<Vec<OrderHistoryEntry>, ExchangeError> {
        self.get(Endpoint::OrderHistory.request().param_opt("market", market))
            .await
    }

    pub async fn get_withdrawal_history(
        &self,
        currency: Option<&str>,
    ) -> Result<Vec<Transfer>, ExchangeError> {
        self.get(
            Endpoint::WithdrawalHistory
                .request()
                .param_opt("currency", currency),
        )
        .await
    }

    pub async fn get_deposit_history(
        &self,
        currency: Option<&str>,
    ) -> Result<Vec<Transfer>, ExchangeError> {
        self.get(
            Endpoint::DepositHistory
                .request()
                .param_opt("currency", currency),
        )
        .await
    }
}

fn non_empty<'a>(name: &str, value: &'a str) -> Result<&'a str, ExchangeError> {
    if value.trim().is_empty() {
        Err(ExchangeError::InvalidParameters(format!(
            "{} must not be empty",
            name
        )))
    } else {
        Ok(value)
    }
}

/// Plain decimal text without trailing zeros, e.g. `0.5` not `0.50000000`
fn positive(name: &str, value: Decimal) -> Result<String, ExchangeError> {
    if value <= Decimal::ZERO {
        return Err(ExchangeError::InvalidParameters(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(value.normalize().to_string())
}

/// Decode a result the exchange left out, as the value its shape implies
fn from_absent<T: DeserializeOwned>(value: Value) -> Result<T, ExchangeError> {
    serde_json::from_value(value).map_err(|e| {
        ExchangeError::DeserializationError(format!("Failed to deserialize result: {}", e))
    })
}

fn limit_order(
    endpoint: Endpoint,
    market: &str,
    quantity: Decimal,
    rate: Decimal,
) -> Result<EndpointRequest, ExchangeError> {
    Ok(endpoint
        .request()
        .param("market", non_empty("market", market)?)
        .param("quantity", positive("quantity", quantity)?)
        .param("rate", positive("rate", rate)?))
}
