//! Types for public REST API endpoints.

use std::collections::HashMap;

use serde_json::{Map, Value};
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::error::DecodeError;
use crate::types::codec::{
    array_field, as_object, decimal_field, decimal_value, int_field, map_elements, str_field,
};
use crate::types::{Currency, OrderSide};

/// 24-hour market statistics for one currency pair.
///
/// Every quantity arrives from the exchange as a decimal string; a malformed
/// value fails the decode rather than degrading to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticker {
    /// Opening price of the 24-hour window.
    pub opening_price: f64,
    /// Most recent trade price.
    pub closing_price: f64,
    /// Lowest price of the window.
    pub min_price: f64,
    /// Highest price of the window.
    pub max_price: f64,
    /// Units traded in the window.
    pub units_traded: f64,
    /// Accumulated trade value in the window.
    pub acc_trade_value: f64,
    /// Closing price of the previous window.
    pub prev_closing_price: f64,
    /// Units traded over the last 24 hours.
    pub units_traded_24h: f64,
    /// Accumulated trade value over the last 24 hours.
    pub acc_trade_value_24h: f64,
    /// Price change over the last 24 hours.
    pub fluctate_24h: f64,
    /// Price change rate over the last 24 hours, in percent.
    pub fluctate_rate_24h: f64,
}

impl Ticker {
    pub(crate) fn from_raw(raw: &Map<String, Value>) -> Result<Self, DecodeError> {
        Ok(Self {
            opening_price: decimal_field(raw, "opening_price")?,
            closing_price: decimal_field(raw, "closing_price")?,
            min_price: decimal_field(raw, "min_price")?,
            max_price: decimal_field(raw, "max_price")?,
            units_traded: decimal_field(raw, "units_traded")?,
            acc_trade_value: decimal_field(raw, "acc_trade_value")?,
            prev_closing_price: decimal_field(raw, "prev_closing_price")?,
            units_traded_24h: decimal_field(raw, "units_traded_24H")?,
            acc_trade_value_24h: decimal_field(raw, "acc_trade_value_24H")?,
            fluctate_24h: decimal_field(raw, "fluctate_24H")?,
            fluctate_rate_24h: decimal_field(raw, "fluctate_rate_24H")?,
        })
    }
}

/// Result of a ticker query: the exchange timestamp plus one [`Ticker`] per
/// requested currency.
///
/// A single-currency query yields exactly one entry; an `ALL` query yields
/// one per listed currency. Iteration order is unspecified.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerSnapshot {
    /// Server-side time the statistics were taken at.
    pub timestamp: OffsetDateTime,
    /// Tickers keyed by order currency.
    pub tickers: HashMap<Currency, Ticker>,
}

/// One price level of an order book.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderbookEntry {
    /// Price of the level.
    pub price: f64,
    /// Units available at the level.
    pub quantity: f64,
}

impl OrderbookEntry {
    fn from_raw(raw: &Map<String, Value>) -> Result<Self, DecodeError> {
        Ok(Self {
            price: decimal_field(raw, "price")?,
            quantity: decimal_field(raw, "quantity")?,
        })
    }
}

/// Bid and ask levels for one currency pair, in the order the exchange
/// reported them. The client never re-sorts either side.
#[derive(Debug, Clone, PartialEq)]
pub struct Orderbook {
    /// Buy-side levels.
    pub bids: Vec<OrderbookEntry>,
    /// Sell-side levels.
    pub asks: Vec<OrderbookEntry>,
}

impl Orderbook {
    pub(crate) fn from_raw(raw: &Map<String, Value>) -> Result<Self, DecodeError> {
        let bids = array_field(raw, "bids")?;
        let asks = array_field(raw, "asks")?;
        Ok(Self {
            bids: map_elements("bids", bids, OrderbookEntry::from_raw)?,
            asks: map_elements("asks", asks, OrderbookEntry::from_raw)?,
        })
    }
}

/// Result of an orderbook query, keyed like [`TickerSnapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrderbookSnapshot {
    /// Server-side time of the snapshot.
    pub timestamp: OffsetDateTime,
    /// Order books keyed by order currency.
    pub books: HashMap<Currency, Orderbook>,
}

const TRADE_DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// One publicly visible concluded trade.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    /// Time the trade concluded.
    pub transaction_date: OffsetDateTime,
    /// Whether the taker bought or sold.
    pub side: OrderSide,
    /// Units traded.
    pub units_traded: f64,
    /// Price per unit.
    pub price: f64,
    /// Total value of the trade.
    pub total: f64,
}

impl Trade {
    pub(crate) fn from_raw(raw: &Map<String, Value>) -> Result<Self, DecodeError> {
        let date_str = str_field(raw, "transaction_date")?;
        let transaction_date = PrimitiveDateTime::parse(date_str, TRADE_DATE_FORMAT)
            .map_err(|_| {
                DecodeError::new(
                    "transaction_date",
                    format!("invalid datetime string `{date_str}`"),
                )
            })?
            .assume_utc();
        Ok(Self {
            transaction_date,
            side: str_field(raw, "type")?.parse()?,
            units_traded: decimal_field(raw, "units_traded")?,
            price: decimal_field(raw, "price")?,
            total: decimal_field(raw, "total")?,
        })
    }
}

/// Deposit and withdrawal availability for one coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetsStatus {
    /// True if deposits are currently accepted.
    pub deposit: bool,
    /// True if withdrawals are currently processed.
    pub withdrawal: bool,
}

impl AssetsStatus {
    pub(crate) fn from_raw(raw: &Map<String, Value>) -> Result<Self, DecodeError> {
        Ok(Self {
            deposit: int_field(raw, "deposit_status")? == 1,
            withdrawal: int_field(raw, "withdrawal_status")? == 1,
        })
    }
}

/// One Bithumb market index reading.
#[derive(Debug, Clone, PartialEq)]
pub struct BtciEntry {
    /// Index value.
    pub market_index: f64,
    /// Change rate against the previous reading.
    pub rate: f64,
    /// Change width against the previous reading.
    pub width: f64,
}

impl BtciEntry {
    fn from_raw(raw: &Map<String, Value>) -> Result<Self, DecodeError> {
        Ok(Self {
            market_index: decimal_field(raw, "market_index")?,
            rate: decimal_field(raw, "rate")?,
            width: decimal_field(raw, "width")?,
        })
    }
}

/// The Bithumb market indices at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct BtciSnapshot {
    /// Server-side time of the reading.
    pub timestamp: OffsetDateTime,
    /// BTAI, the altcoin (asset) index.
    pub btai: BtciEntry,
    /// BTMI, the whole-market index.
    pub btmi: BtciEntry,
}

impl BtciSnapshot {
    pub(crate) fn from_raw(
        timestamp: OffsetDateTime,
        raw: &Map<String, Value>,
    ) -> Result<Self, DecodeError> {
        let btai = raw.get("btai").ok_or_else(|| DecodeError::missing("btai"))?;
        let btmi = raw.get("btmi").ok_or_else(|| DecodeError::missing("btmi"))?;
        Ok(Self {
            timestamp,
            btai: BtciEntry::from_raw(as_object("btai", btai)?)?,
            btmi: BtciEntry::from_raw(as_object("btmi", btmi)?)?,
        })
    }
}

/// One OHLC bucket from the candlestick endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Candlestick {
    /// Start of the bucket.
    pub time: OffsetDateTime,
    /// Opening price.
    pub opening_price: f64,
    /// Closing price.
    pub closing_price: f64,
    /// Highest price.
    pub high_price: f64,
    /// Lowest price.
    pub low_price: f64,
    /// Units traded in the bucket.
    pub units_traded: f64,
}

impl Candlestick {
    /// Decode one fixed-width candle row:
    /// `[epoch_millis, open, close, high, low, volume]`, where the epoch is
    /// a JSON number and the rest are decimal strings.
    pub(crate) fn from_row(index: usize, row: &Value) -> Result<Self, DecodeError> {
        let field = |col: usize| format!("data[{index}][{col}]");
        let row = row
            .as_array()
            .ok_or_else(|| DecodeError::new(format!("data[{index}]"), "expected an array"))?;
        if row.len() < 6 {
            return Err(DecodeError::new(
                format!("data[{index}]"),
                format!("expected 6 columns, got {}", row.len()),
            ));
        }
        let epoch_millis = row[0].as_i64().ok_or_else(|| {
            DecodeError::new(field(0), "expected a millisecond epoch number")
        })?;
        let time =
            OffsetDateTime::from_unix_timestamp_nanos(epoch_millis as i128 * 1_000_000)
                .map_err(|_| DecodeError::new(field(0), "epoch out of range"))?;
        Ok(Self {
            time,
            opening_price: decimal_value(&field(1), &row[1])?,
            closing_price: decimal_value(&field(2), &row[2])?,
            high_price: decimal_value(&field(3), &row[3])?,
            low_price: decimal_value(&field(4), &row[4])?,
            units_traded: decimal_value(&field(5), &row[5])?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    fn ticker_payload() -> Map<String, Value> {
        obj(json!({
            "opening_price": "100",
            "closing_price": "110",
            "min_price": "95",
            "max_price": "120",
            "units_traded": "3500.5",
            "acc_trade_value": "390000000",
            "prev_closing_price": "99",
            "units_traded_24H": "7200.25",
            "acc_trade_value_24H": "800000000",
            "fluctate_24H": "11",
            "fluctate_rate_24H": "10.0",
        }))
    }

    #[test]
    fn test_ticker_from_raw() {
        let ticker = Ticker::from_raw(&ticker_payload()).unwrap();
        assert_eq!(ticker.opening_price, 100.0);
        assert_eq!(ticker.closing_price, 110.0);
        assert_eq!(ticker.units_traded_24h, 7200.25);
    }

    #[test]
    fn test_ticker_malformed_field_is_error_not_zero() {
        let mut payload = ticker_payload();
        payload.insert("min_price".to_string(), json!("n/a"));
        let err = Ticker::from_raw(&payload).unwrap_err();
        assert_eq!(err.field, "min_price");
    }

    #[test]
    fn test_orderbook_preserves_exchange_order() {
        let raw = obj(json!({
            "bids": [
                {"price": "500", "quantity": "1"},
                {"price": "499", "quantity": "2"},
            ],
            "asks": [
                {"price": "501", "quantity": "3"},
            ],
        }));
        let book = Orderbook::from_raw(&raw).unwrap();
        assert_eq!(book.bids.len(), 2);
        assert_eq!(book.bids[0].price, 500.0);
        assert_eq!(book.bids[1].price, 499.0);
        assert_eq!(book.asks[0].quantity, 3.0);
    }

    #[test]
    fn test_trade_from_raw() {
        let raw = obj(json!({
            "transaction_date": "2017-07-14 02:40:00",
            "type": "bid",
            "units_traded": "0.5",
            "price": "2500000",
            "total": "1250000",
        }));
        let trade = Trade::from_raw(&raw).unwrap();
        assert_eq!(trade.side, OrderSide::Bid);
        assert_eq!(trade.total, 1_250_000.0);
        assert_eq!(trade.transaction_date.unix_timestamp(), 1_500_000_000);
    }

    #[test]
    fn test_candlestick_from_row() {
        let row = json!([1500000000123i64, "100", "110", "120", "95", "3500.5"]);
        let candle = Candlestick::from_row(0, &row).unwrap();
        assert_eq!(candle.time.unix_timestamp(), 1_500_000_000);
        assert_eq!(candle.time.millisecond(), 123);
        assert_eq!(candle.units_traded, 3500.5);
    }

    #[test]
    fn test_candlestick_rejects_short_row() {
        let row = json!([1500000000123i64, "100"]);
        assert!(Candlestick::from_row(3, &row).is_err());
    }

    #[test]
    fn test_btci_from_raw() {
        let raw = obj(json!({
            "btai": {"market_index": "2000.5", "rate": "1.1", "width": "22"},
            "btmi": {"market_index": "3000.5", "rate": "-0.4", "width": "-12"},
        }));
        let snapshot =
            BtciSnapshot::from_raw(OffsetDateTime::UNIX_EPOCH, &raw).unwrap();
        assert_eq!(snapshot.btai.market_index, 2000.5);
        assert_eq!(snapshot.btmi.rate, -0.4);
    }
}
