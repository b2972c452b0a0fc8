use crate::core::types::RequestSpec;

/// Shape of the `result` payload an endpoint returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    Single,
    List,
    /// `result` is null or ignored
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub path: &'static str,
    pub requires_auth: bool,
    pub shape: ResultShape,
}

/// Every operation the client exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Currencies,
    Markets,
    Ticker,
    MarketSummary,
    MarketSummaries,
    OrderBook,
    MarketHistory,
    BuyLimit,
    SellLimit,
    Cancel,
    OpenOrders,
    Balance,
    Balances,
    DepositAddress,
    Withdraw,
    Order,
    OrderHistory,
    WithdrawalHistory,
    DepositHistory,
}

impl Endpoint {
    pub const fn descriptor(self) -> EndpointDescriptor {
        use ResultShape::{Empty, List, Single};

        let (path, requires_auth, shape) = match self {
            Self::Currencies => ("public/getcurrencies", false, List),
            Self::Markets => ("public/getmarkets", false, List),
            Self::Ticker => ("public/getticker", false, Single),
            Self::MarketSummary => ("public/getmarketsummary", false, List),
            Self::MarketSummaries => ("public/getmarketsummaries", false, List),
            // one-sided requests switch to List
            Self::OrderBook => ("public/getorderbook", false, Single),
            Self::MarketHistory => ("public/getmarkethistory", false, List),
            Self::BuyLimit => ("market/buylimit", true, Single),
            Self::SellLimit => ("market/selllimit", true, Single),
            Self::Cancel => ("market/cancel", true, Empty),
            Self::OpenOrders => ("market/getopenorders", true, List),
            Self::Balance => ("account/getbalance", true, Single),
            Self::Balances => ("account/getbalances", true, List),
            Self::DepositAddress => ("account/getdepositaddress", true, Single),
            Self::Withdraw => ("account/withdraw", true, Single),
            Self::Order => ("account/getorder", true, Single),
            Self::OrderHistory => ("account/getorderhistory", true, List),
            Self::WithdrawalHistory => ("account/getwithdrawalhistory", true, List),
            Self::DepositHistory => ("account/getdeposithistory", true, List),
        };

        EndpointDescriptor {
            path,
            requires_auth,
            shape,
        }
    }

    /// Start a request for this endpoint with no parameters yet
    pub fn request(self) -> EndpointRequest {
        let descriptor = self.descriptor();
        EndpointRequest {
            spec: RequestSpec::new(descriptor.path, descriptor.requires_auth),
            shape: descriptor.shape,
        }
    }
}

/// A request being built, tagged with the result shape it expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRequest {
    pub spec: RequestSpec,
    pub shape: ResultShape,
}

impl EndpointRequest {
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec = self.spec.param(name, value);
        self
    }

    #[must_use]
    pub fn param_opt(mut self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        self.spec = self.spec.param_opt(name, value);
        self
    }

    /// Override the catalog shape when parameters change what comes back
    #[must_use]
    pub fn with_shape(mut self, shape: ResultShape) -> Self {
        self.shape = shape;
        self
    }
}
