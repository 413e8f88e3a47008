//! Types for private REST API endpoints.

use std::collections::HashMap;

use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::error::DecodeError;
use crate::types::codec::{
    array_field, currency_field, decimal_field, decimal_value, map_elements, micro_epoch_field,
    milli_epoch_field, optional_decimal_field, optional_micro_epoch_field, optional_str_field,
    str_field,
};
use crate::types::{Currency, CurrencyRegistry, OrderSide, SearchType};

/// Exchange account information.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Account identifier.
    pub id: String,
    /// Time the account was created.
    pub created: OffsetDateTime,
    /// KRW balance.
    pub balance: f64,
    /// Trading fee rate for the queried pair.
    pub trade_fee: f64,
}

impl Account {
    pub(crate) fn from_raw(raw: &Map<String, Value>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: str_field(raw, "account_id")?.to_string(),
            created: milli_epoch_field(raw, "created")?,
            balance: decimal_field(raw, "balance")?,
            trade_fee: decimal_field(raw, "trade_fee")?,
        })
    }
}

/// The four kinds of per-currency balance fields the exchange reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BalanceKind {
    /// Total holdings (`total_<ccy>`).
    Total,
    /// Amount locked in open orders (`in_use_<ccy>`).
    InUse,
    /// Amount free to trade or withdraw (`available_<ccy>`).
    Available,
    /// Last traded price of the coin (`xcoin_last_<ccy>`).
    XcoinLast,
}

/// Balance key prefixes, longest first.
///
/// Keys are split by matching a whole kind token against this fixed set, not
/// by looking at the first character: several tokens share leading letters
/// with plausible currency symbols, and a key that matches none of them must
/// be a decode error rather than a guess.
const BALANCE_KEY_PREFIXES: &[(&str, BalanceKind)] = &[
    ("xcoin_last_", BalanceKind::XcoinLast),
    ("available_", BalanceKind::Available),
    ("in_use_", BalanceKind::InUse),
    ("total_", BalanceKind::Total),
];

/// Split a flattened balance key such as `total_btc` into its field kind and
/// currency suffix.
///
/// The longest matching prefix from the fixed four-token set wins; the
/// remainder is the currency, normalized to lowercase. Unrecognized prefixes
/// and empty suffixes are [`DecodeError`]s.
pub fn decode_balance_key(key: &str) -> Result<(BalanceKind, Currency), DecodeError> {
    for (prefix, kind) in BALANCE_KEY_PREFIXES {
        if let Some(suffix) = key.strip_prefix(prefix) {
            if suffix.is_empty() {
                return Err(DecodeError::new(key, "balance key has no currency suffix"));
            }
            let currency = Currency::new(suffix).map_err(|e| DecodeError::new(key, e.reason))?;
            return Ok((*kind, currency));
        }
    }
    Err(DecodeError::new(key, "unrecognized balance key prefix"))
}

/// Funds held in one currency.
///
/// Produced per currency for both request shapes. A field the exchange did
/// not send at all decodes as `0.0`; a field it sent malformed fails the
/// whole decode, so a zero here is never the residue of a parse failure.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Balance {
    /// Total holdings.
    pub total: f64,
    /// Amount locked in open orders or withdrawals.
    pub in_use: f64,
    /// Amount free to trade or withdraw.
    pub available: f64,
    /// Last traded price of the coin against KRW.
    pub xcoin_last: f64,
}

impl Balance {
    fn set(&mut self, kind: BalanceKind, amount: f64) {
        match kind {
            BalanceKind::Total => self.total = amount,
            BalanceKind::InUse => self.in_use = amount,
            BalanceKind::Available => self.available = amount,
            BalanceKind::XcoinLast => self.xcoin_last = amount,
        }
    }

    fn from_flat(raw: &Map<String, Value>, currency: &Currency) -> Result<Self, DecodeError> {
        let field = |kind: &str| format!("{kind}_{currency}");
        Ok(Self {
            total: optional_decimal_field(raw, &field("total"))?.unwrap_or(0.0),
            in_use: optional_decimal_field(raw, &field("in_use"))?.unwrap_or(0.0),
            available: optional_decimal_field(raw, &field("available"))?.unwrap_or(0.0),
            xcoin_last: optional_decimal_field(raw, &field("xcoin_last"))?.unwrap_or(0.0),
        })
    }

    /// Decode a single-currency balance payload.
    ///
    /// The exchange flattens the requested currency and KRW into one object,
    /// so this always yields two records (one, if KRW itself was requested).
    pub(crate) fn decode_single(
        raw: &Map<String, Value>,
        currency: &Currency,
    ) -> Result<HashMap<Currency, Balance>, DecodeError> {
        let mut result = HashMap::with_capacity(2);
        for currency in [currency.clone(), Currency::krw()] {
            let balance = Balance::from_flat(raw, &currency)?;
            result.insert(currency, balance);
        }
        Ok(result)
    }

    /// Decode an `ALL` balance payload.
    ///
    /// Starts from a zeroed record for every registered coin plus KRW, then
    /// folds each `kind_currency` key into the matching record. A key whose
    /// currency suffix is not pre-populated is a decode error, not a silent
    /// drop.
    pub(crate) fn decode_all(
        raw: &Map<String, Value>,
        registry: &CurrencyRegistry,
    ) -> Result<HashMap<Currency, Balance>, DecodeError> {
        let mut result: HashMap<Currency, Balance> = registry
            .iter()
            .cloned()
            .map(|currency| (currency, Balance::default()))
            .collect();
        result.insert(Currency::krw(), Balance::default());

        for (key, value) in raw {
            let (kind, currency) = decode_balance_key(key)?;
            let amount = decimal_value(key, value)?;
            let balance = result.get_mut(&currency).ok_or_else(|| {
                DecodeError::new(key.clone(), format!("unregistered currency `{currency}`"))
            })?;
            balance.set(kind, amount);
        }
        Ok(result)
    }
}

/// The member's view of recent market statistics for one pair.
#[derive(Debug, Clone, PartialEq)]
pub struct UserTicker {
    /// Opening price of the 24-hour window.
    pub opening_price: f64,
    /// Most recent trade price.
    pub closing_price: f64,
    /// Volume-weighted average price.
    pub average_price: f64,
    /// Lowest price of the window.
    pub min_price: f64,
    /// Highest price of the window.
    pub max_price: f64,
    /// Units traded in the window.
    pub units_traded: f64,
    /// Volume over the last day.
    pub volume_1day: f64,
    /// Volume over the last 7 days.
    pub volume_7day: f64,
    /// Price change over the last 24 hours.
    pub fluctate_24h: f64,
    /// Price change rate over the last 24 hours, in percent.
    pub fluctate_rate_24h: f64,
}

impl UserTicker {
    pub(crate) fn from_raw(raw: &Map<String, Value>) -> Result<Self, DecodeError> {
        Ok(Self {
            opening_price: decimal_field(raw, "opening_price")?,
            closing_price: decimal_field(raw, "closing_price")?,
            average_price: decimal_field(raw, "average_price")?,
            min_price: decimal_field(raw, "min_price")?,
            max_price: decimal_field(raw, "max_price")?,
            units_traded: decimal_field(raw, "units_traded")?,
            volume_1day: decimal_field(raw, "volume_1day")?,
            volume_7day: decimal_field(raw, "volume_7day")?,
            fluctate_24h: decimal_field(raw, "fluctate_24H")?,
            fluctate_rate_24h: decimal_field(raw, "fluctate_rate_24H")?,
        })
    }
}

/// A coin's deposit wallet address.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletAddress {
    /// The coin the address belongs to.
    pub currency: Currency,
    /// The deposit address. Empty if no address has been issued yet; the
    /// exchange reports that case as a success with no address.
    pub address: String,
}

impl WalletAddress {
    pub(crate) fn from_raw(raw: &Map<String, Value>) -> Result<Self, DecodeError> {
        Ok(Self {
            currency: currency_field(raw, "currency")?,
            address: optional_str_field(raw, "wallet_address")?
                .unwrap_or_default()
                .to_string(),
        })
    }
}

/// An open or recently placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Exchange-assigned order id.
    pub order_id: String,
    /// Time the order was placed.
    pub order_date: OffsetDateTime,
    /// Coin being bought or sold.
    pub order_currency: Currency,
    /// Currency the order is paid in.
    pub payment_currency: Currency,
    /// Order side.
    pub side: OrderSide,
    /// Limit price.
    pub price: f64,
    /// Ordered units.
    pub units: f64,
    /// Units not yet filled.
    pub units_remaining: f64,
    /// Trigger price, present only for stop-limit orders.
    pub watch_price: Option<f64>,
}

impl Order {
    pub(crate) fn from_raw(raw: &Map<String, Value>) -> Result<Self, DecodeError> {
        Ok(Self {
            order_id: str_field(raw, "order_id")?.to_string(),
            order_date: micro_epoch_field(raw, "order_date")?,
            order_currency: currency_field(raw, "order_currency")?,
            payment_currency: currency_field(raw, "payment_currency")?,
            side: str_field(raw, "type")?.parse()?,
            price: decimal_field(raw, "price")?,
            units: decimal_field(raw, "units")?,
            units_remaining: decimal_field(raw, "units_remaining")?,
            watch_price: optional_decimal_field(raw, "watch_price")?,
        })
    }
}

/// One partial fill of an order.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractFill {
    /// Time the fill concluded.
    pub transaction_date: OffsetDateTime,
    /// Fill price.
    pub price: f64,
    /// Filled units.
    pub units: f64,
    /// Currency the fee was charged in.
    pub fee_currency: Currency,
    /// Fee amount.
    pub fee: f64,
    /// Total value of the fill.
    pub total: f64,
}

impl ContractFill {
    fn from_raw(raw: &Map<String, Value>) -> Result<Self, DecodeError> {
        Ok(Self {
            transaction_date: micro_epoch_field(raw, "transaction_date")?,
            price: decimal_field(raw, "price")?,
            units: decimal_field(raw, "units")?,
            fee_currency: currency_field(raw, "fee_currency")?,
            fee: decimal_field(raw, "fee")?,
            total: decimal_field(raw, "total")?,
        })
    }
}

/// Full lifecycle data for one order, including its partial fills.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetail {
    /// Time the order was placed.
    pub order_date: OffsetDateTime,
    /// Order side.
    pub side: OrderSide,
    /// Exchange-reported status string (e.g. "Completed").
    pub order_status: String,
    /// Coin being bought or sold.
    pub order_currency: Currency,
    /// Currency the order is paid in.
    pub payment_currency: Currency,
    /// Limit price.
    pub order_price: f64,
    /// Ordered units.
    pub order_qty: f64,
    /// Time the order was canceled, if it was.
    pub cancel_date: Option<OffsetDateTime>,
    /// Cancellation kind, if the order was canceled.
    pub cancel_type: Option<String>,
    /// Partial fills, in the order the exchange reported them.
    pub contracts: Vec<ContractFill>,
}

impl OrderDetail {
    pub(crate) fn from_raw(raw: &Map<String, Value>) -> Result<Self, DecodeError> {
        let contracts = array_field(raw, "contract")?;
        Ok(Self {
            order_date: micro_epoch_field(raw, "order_date")?,
            side: str_field(raw, "type")?.parse()?,
            order_status: str_field(raw, "order_status")?.to_string(),
            order_currency: currency_field(raw, "order_currency")?,
            payment_currency: currency_field(raw, "payment_currency")?,
            order_price: decimal_field(raw, "order_price")?,
            order_qty: decimal_field(raw, "order_qty")?,
            cancel_date: optional_micro_epoch_field(raw, "cancel_date")?,
            cancel_type: optional_str_field(raw, "cancel_type")?.map(str::to_string),
            contracts: map_elements("contract", contracts, ContractFill::from_raw)?,
        })
    }
}

/// One entry of the member's transaction ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct UserTransaction {
    /// Which ledger category the entry belongs to.
    pub search: SearchType,
    /// Time of the transfer.
    pub transfer_date: OffsetDateTime,
    /// Coin side of the pair.
    pub order_currency: Currency,
    /// Payment side of the pair.
    pub payment_currency: Currency,
    /// Signed unit change.
    pub units: f64,
    /// Price per unit.
    pub price: f64,
    /// Signed payment-currency change.
    pub amount: f64,
    /// Currency the fee was charged in.
    pub fee_currency: Currency,
    /// Fee amount.
    pub fee: f64,
    /// Coin balance after the entry.
    pub order_balance: f64,
    /// Payment-currency balance after the entry.
    pub payment_balance: f64,
}

impl UserTransaction {
    pub(crate) fn from_raw(raw: &Map<String, Value>) -> Result<Self, DecodeError> {
        // The search code arrives as a digit string or a bare number,
        // depending on the endpoint revision.
        let search = match raw.get("search") {
            Some(Value::String(s)) => s.parse()?,
            Some(Value::Number(n)) => n.to_string().parse()?,
            _ => return Err(DecodeError::missing("search")),
        };
        Ok(Self {
            search,
            transfer_date: micro_epoch_field(raw, "transfer_date")?,
            order_currency: currency_field(raw, "order_currency")?,
            payment_currency: currency_field(raw, "payment_currency")?,
            units: decimal_field(raw, "units")?,
            price: decimal_field(raw, "price")?,
            amount: decimal_field(raw, "amount")?,
            fee_currency: currency_field(raw, "fee_currency")?,
            fee: decimal_field(raw, "fee")?,
            order_balance: decimal_field(raw, "order_balance")?,
            payment_balance: decimal_field(raw, "payment_balance")?,
        })
    }
}

/// Parameters for the open orders query.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdersRequest {
    /// Coin side of the pair.
    pub order_currency: Currency,
    /// Payment side of the pair.
    pub payment_currency: Currency,
    /// Maximum number of orders to return (1..=1000).
    pub count: u32,
    /// Only return orders placed after this time.
    pub after: Option<OffsetDateTime>,
}

impl OrdersRequest {
    /// Create a request for a pair with the exchange's default count of 100.
    pub fn new(order_currency: Currency, payment_currency: Currency) -> Self {
        Self {
            order_currency,
            payment_currency,
            count: 100,
            after: None,
        }
    }

    /// Limit the number of returned orders (1..=1000).
    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Only return orders placed after the given time.
    pub fn after(mut self, after: OffsetDateTime) -> Self {
        self.after = Some(after);
        self
    }
}

/// Parameters for the transaction ledger query.
#[derive(Debug, Clone, PartialEq)]
pub struct UserTransactionsRequest {
    /// Coin side of the pair.
    pub order_currency: Currency,
    /// Payment side of the pair.
    pub payment_currency: Currency,
    /// Ledger category filter.
    pub search: SearchType,
    /// Pagination offset.
    pub offset: Option<u32>,
    /// Page size.
    pub count: Option<u32>,
}

impl UserTransactionsRequest {
    /// Create a request for a pair covering all ledger categories.
    pub fn new(order_currency: Currency, payment_currency: Currency) -> Self {
        Self {
            order_currency,
            payment_currency,
            search: SearchType::All,
            offset: None,
            count: None,
        }
    }

    /// Restrict to one ledger category.
    pub fn search(mut self, search: SearchType) -> Self {
        self.search = search;
        self
    }

    /// Paginate: skip `offset` entries and return at most `count`.
    pub fn page(mut self, offset: u32, count: u32) -> Self {
        self.offset = Some(offset);
        self.count = Some(count);
        self
    }
}

/// Parameters for placing a limit order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceOrderRequest {
    /// Coin to buy or sell.
    pub order_currency: Currency,
    /// Currency to pay in.
    pub payment_currency: Currency,
    /// Units to trade.
    pub units: f64,
    /// Limit price.
    pub price: f64,
    /// Order side.
    pub side: OrderSide,
}

/// Parameters for placing a stop-limit order.
#[derive(Debug, Clone, PartialEq)]
pub struct StopLimitRequest {
    /// Coin to buy or sell.
    pub order_currency: Currency,
    /// Currency to pay in.
    pub payment_currency: Currency,
    /// Trigger price that activates the order.
    pub watch_price: f64,
    /// Limit price once triggered.
    pub price: f64,
    /// Units to trade.
    pub units: f64,
    /// Order side.
    pub side: OrderSide,
}

/// Secondary routing information some coins require on withdrawal.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferNote {
    /// A numeric destination tag (XRP).
    Tag(u64),
    /// A memo or payment id string (STEEM, XMR).
    Memo(String),
}

impl TransferNote {
    pub(crate) fn as_param(&self) -> String {
        match self {
            TransferNote::Tag(tag) => tag.to_string(),
            TransferNote::Memo(memo) => memo.clone(),
        }
    }
}

/// Parameters for withdrawing a coin to an external address.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinWithdrawalRequest {
    /// Coin to withdraw.
    pub currency: Currency,
    /// Units to withdraw.
    pub units: f64,
    /// Destination address.
    pub address: String,
    /// Destination tag / memo / payment id, required by some coins.
    pub destination: Option<TransferNote>,
}

impl CoinWithdrawalRequest {
    /// Create a withdrawal request with no secondary routing information.
    pub fn new(currency: Currency, units: f64, address: impl Into<String>) -> Self {
        Self {
            currency,
            units,
            address: address.into(),
            destination: None,
        }
    }

    /// Attach a destination tag, memo, or payment id.
    pub fn destination(mut self, destination: TransferNote) -> Self {
        self.destination = Some(destination);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    fn currency(symbol: &str) -> Currency {
        Currency::new(symbol).unwrap()
    }

    #[test]
    fn test_decode_balance_key() {
        assert_eq!(
            decode_balance_key("total_eth").unwrap(),
            (BalanceKind::Total, currency("eth"))
        );
        assert_eq!(
            decode_balance_key("xcoin_last_xrp").unwrap(),
            (BalanceKind::XcoinLast, currency("xrp"))
        );
        assert_eq!(
            decode_balance_key("in_use_btc").unwrap(),
            (BalanceKind::InUse, currency("btc"))
        );
        assert_eq!(
            decode_balance_key("available_krw").unwrap(),
            (BalanceKind::Available, currency("krw"))
        );
    }

    #[test]
    fn test_decode_balance_key_rejects_unknown_prefix() {
        let err = decode_balance_key("bogus_field").unwrap_err();
        assert_eq!(err.field, "bogus_field");
        assert!(decode_balance_key("total_").is_err());
        assert!(decode_balance_key("").is_err());
    }

    #[test]
    fn test_balance_decode_single_synthesizes_pair_and_krw() {
        let raw = obj(json!({
            "total_btc": "1.5",
            "in_use_btc": "0.5",
            "available_btc": "1.0",
            "xcoin_last_btc": "2500000",
            "total_krw": "1000000",
            "in_use_krw": "0",
            "available_krw": "1000000",
        }));
        let balances = Balance::decode_single(&raw, &currency("btc")).unwrap();
        assert_eq!(balances.len(), 2);
        let btc = &balances[&currency("btc")];
        assert_eq!(btc.total, 1.5);
        assert_eq!(btc.xcoin_last, 2_500_000.0);
        let krw = &balances[&Currency::krw()];
        assert_eq!(krw.available, 1_000_000.0);
        // xcoin_last_krw is never sent; absent means zero, not an error.
        assert_eq!(krw.xcoin_last, 0.0);
    }

    #[test]
    fn test_balance_decode_single_malformed_is_error() {
        let raw = obj(json!({
            "total_btc": "one point five",
        }));
        let err = Balance::decode_single(&raw, &currency("btc")).unwrap_err();
        assert_eq!(err.field, "total_btc");
    }

    #[test]
    fn test_balance_decode_all_populates_whole_registry() {
        let registry = CurrencyRegistry::new([currency("btc"), currency("eth")]);
        let raw = obj(json!({
            "total_btc": "1.5",
            "available_btc": "1.0",
            "total_krw": "1000000",
        }));
        let balances = Balance::decode_all(&raw, &registry).unwrap();
        // One record per registered coin plus KRW.
        assert_eq!(balances.len(), 3);
        assert_eq!(balances[&currency("btc")].total, 1.5);
        assert_eq!(balances[&currency("eth")].total, 0.0);
        assert_eq!(balances[&Currency::krw()].total, 1_000_000.0);
    }

    #[test]
    fn test_balance_decode_all_rejects_unregistered_suffix() {
        let registry = CurrencyRegistry::new([currency("btc")]);
        let raw = obj(json!({"total_doge": "5"}));
        let err = Balance::decode_all(&raw, &registry).unwrap_err();
        assert_eq!(err.field, "total_doge");
        assert!(err.reason.contains("unregistered"));
    }

    #[test]
    fn test_balance_decode_all_rejects_unknown_key() {
        let registry = CurrencyRegistry::new([currency("btc")]);
        let raw = obj(json!({"misu_depo_btc": "5"}));
        assert!(Balance::decode_all(&raw, &registry).is_err());
    }

    #[test]
    fn test_account_from_raw() {
        let raw = obj(json!({
            "account_id": "A01234567890",
            "created": "1500000000123",
            "balance": "1000000",
            "trade_fee": "0.0015",
        }));
        let account = Account::from_raw(&raw).unwrap();
        assert_eq!(account.id, "A01234567890");
        assert_eq!(account.created.unix_timestamp(), 1_500_000_000);
        assert_eq!(account.trade_fee, 0.0015);
    }

    #[test]
    fn test_order_from_raw_with_optional_watch_price() {
        let raw = obj(json!({
            "order_id": "1428646963419",
            "order_date": "1500000000123456",
            "order_currency": "BTC",
            "payment_currency": "KRW",
            "type": "bid",
            "price": "2500000",
            "units": "0.4",
            "units_remaining": "0.1",
        }));
        let order = Order::from_raw(&raw).unwrap();
        assert_eq!(order.order_id, "1428646963419");
        assert_eq!(order.order_currency, currency("btc"));
        assert_eq!(order.side, OrderSide::Bid);
        assert_eq!(order.watch_price, None);
        assert_eq!(order.order_date.microsecond(), 123_456);
    }

    #[test]
    fn test_order_detail_from_raw() {
        let raw = obj(json!({
            "order_date": "1500000000123456",
            "type": "ask",
            "order_status": "Completed",
            "order_currency": "ETH",
            "payment_currency": "KRW",
            "order_price": "300000",
            "order_qty": "2.0",
            "cancel_date": "",
            "cancel_type": "",
            "contract": [
                {
                    "transaction_date": "1500000001000000",
                    "price": "300000",
                    "units": "1.5",
                    "fee_currency": "KRW",
                    "fee": "675",
                    "total": "450000",
                },
            ],
        }));
        let detail = OrderDetail::from_raw(&raw).unwrap();
        assert_eq!(detail.side, OrderSide::Ask);
        assert_eq!(detail.order_qty, 2.0);
        assert_eq!(detail.cancel_date, None);
        assert_eq!(detail.cancel_type, None);
        assert_eq!(detail.contracts.len(), 1);
        assert_eq!(detail.contracts[0].fee_currency, Currency::krw());
    }

    #[test]
    fn test_user_transaction_from_raw() {
        let raw = obj(json!({
            "search": "1",
            "transfer_date": "1500000000123456",
            "order_currency": "BTC",
            "payment_currency": "KRW",
            "units": "+ 0.5",
            "price": "2500000",
            "amount": "- 1,250,000",
            "fee_currency": "KRW",
            "fee": "1875",
            "order_balance": "1.5",
            "payment_balance": "500000",
        }));
        let entry = UserTransaction::from_raw(&raw).unwrap();
        assert_eq!(entry.search, SearchType::Buy);
        assert_eq!(entry.units, 0.5);
        assert_eq!(entry.amount, -1_250_000.0);
    }
}
