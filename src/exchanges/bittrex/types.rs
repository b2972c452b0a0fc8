use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Currency {
    pub currency: String,
    pub currency_long: String,
    pub min_confirmation: u32,
    pub tx_fee: Decimal,
    pub is_active: bool,
    pub coin_type: String,
    pub base_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Market {
    pub market_currency: String,
    pub base_currency: String,
    pub market_currency_long: String,
    pub base_currency_long: String,
    pub min_trade_size: Decimal,
    pub market_name: String,
    pub is_active: bool,
    pub created: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ticker {
    pub bid: Decimal,
    pub ask: Decimal,
    pub last: Decimal,
}

/// 24h summary of one market
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MarketSummary {
    pub market_name: String,
    pub high: Decimal,
    pub low: Decimal,
    pub volume: Decimal,
    pub last: Decimal,
    pub base_volume: Decimal,
    pub time_stamp: NaiveDateTime,
    pub bid: Decimal,
    pub ask: Decimal,
    pub open_buy_orders: u32,
    pub open_sell_orders: u32,
    pub prev_day: Decimal,
    pub created: NaiveDateTime,
    #[serde(default)]
    pub display_market_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderBookEntry {
    pub quantity: Decimal,
    pub rate: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderBook {
    #[serde(default)]
    pub buy: Vec<OrderBookEntry>,
    #[serde(default)]
    pub sell: Vec<OrderBookEntry>,
}

/// Which half of the book to request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBookSide {
    Buy,
    Sell,
    Both,
}

impl OrderBookSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for OrderBookSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One executed trade from the public market history
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Trade {
    #[serde(rename = "Id")]
    pub id: u64,
    pub time_stamp: NaiveDateTime,
    pub quantity: Decimal,
    pub price: Decimal,
    pub total: Decimal,
    pub fill_type: String,
    pub order_type: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Balance {
    pub currency: String,
    pub balance: Decimal,
    pub available: Decimal,
    pub pending: Decimal,
    #[serde(default)]
    pub crypto_address: Option<String>,
    #[serde(default)]
    pub requested: Option<bool>,
    #[serde(rename = "Uuid", default)]
    pub uuid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepositAddress {
    pub currency: String,
    pub address: String,
}

/// Identifier returned by order placement and withdrawals
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderId {
    pub uuid: String,
}

/// An order still resting on the book
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OpenOrder {
    #[serde(rename = "Uuid", default)]
    pub uuid: Option<String>,
    #[serde(rename = "OrderUuid")]
    pub order_uuid: String,
    pub exchange: String,
    pub order_type: String,
    pub quantity: Decimal,
    pub quantity_remaining: Decimal,
    pub limit: Option<Decimal>,
    pub commission_paid: Decimal,
    pub price: Decimal,
    pub price_per_unit: Option<Decimal>,
    pub opened: NaiveDateTime,
    pub closed: Option<NaiveDateTime>,
    pub cancel_initiated: bool,
    pub immediate_or_cancel: bool,
    pub is_conditional: bool,
    pub condition: Option<String>,
    pub condition_target: Option<String>,
}

/// Full detail of a single order
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Order {
    #[serde(rename = "AccountId", default)]
    pub account_id: Option<String>,
    #[serde(rename = "OrderUuid")]
    pub order_uuid: String,
    pub exchange: String,
    #[serde(rename = "Type")]
    pub order_type: String,
    pub quantity: Decimal,
    pub quantity_remaining: Decimal,
    pub limit: Option<Decimal>,
    pub reserved: Option<Decimal>,
    pub reserve_remaining: Option<Decimal>,
    pub commission_reserved: Option<Decimal>,
    pub commission_reserve_remaining: Option<Decimal>,
    pub commission_paid: Decimal,
    pub price: Decimal,
    pub price_per_unit: Option<Decimal>,
    pub opened: NaiveDateTime,
    pub closed: Option<NaiveDateTime>,
    pub is_open: bool,
    #[serde(default)]
    pub sentinel: Option<String>,
    pub cancel_initiated: bool,
    pub immediate_or_cancel: bool,
    pub is_conditional: bool,
    pub condition: Option<String>,
    pub condition_target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderHistoryEntry {
    #[serde(rename = "OrderUuid")]
    pub order_uuid: String,
    pub exchange: String,
    pub time_stamp: NaiveDateTime,
    pub order_type: String,
    pub limit: Option<Decimal>,
    pub quantity: Decimal,
    pub quantity_remaining: Decimal,
    pub commission: Decimal,
    pub price: Decimal,
    pub price_per_unit: Option<Decimal>,
    pub is_conditional: bool,
    pub condition: Option<String>,
    pub condition_target: Option<String>,
    pub immediate_or_cancel: bool,
}

/// A deposit or withdrawal
///
/// Deposits carry fewer fields than withdrawals, so most are optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transfer {
    #[serde(rename = "PaymentUuid", default)]
    pub payment_uuid: Option<String>,
    pub currency: String,
    pub amount: Decimal,
    #[serde(default, alias = "CryptoAddress")]
    pub address: Option<String>,
    #[serde(default, alias = "LastUpdated")]
    pub opened: Option<NaiveDateTime>,
    #[serde(default)]
    pub authorized: Option<bool>,
    #[serde(default)]
    pub pending_payment: Option<bool>,
    #[serde(default)]
    pub tx_cost: Option<Decimal>,
    #[serde(rename = "TxId", default)]
    pub tx_id: Option<String>,
    #[serde(default)]
    pub canceled: Option<bool>,
    #[serde(default)]
    pub invalid_address: Option<bool>,
    #[serde(default)]
    pub confirmations: Option<u32>,
}
