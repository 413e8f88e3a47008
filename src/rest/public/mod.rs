//! Public REST API endpoints (no authentication required).

mod types;

pub use types::*;

use std::collections::{BTreeSet, HashMap};

use crate::error::{BithumbError, DecodeError};
use crate::rest::BithumbRestClient;
use crate::rest::endpoints::public;
use crate::types::codec::{
    RESERVED_KEYS, as_object, decode_currency_map, map_elements, milli_epoch_field,
};
use crate::types::{ChartInterval, Currency, CurrencySelect};

impl BithumbRestClient {
    /// Get ticker statistics for one currency pair, or for every pair when
    /// [`CurrencySelect::All`] is passed.
    ///
    /// The response shape is chosen by the `order_currency` parameter, never
    /// by sniffing the payload: a single-currency request decodes the payload
    /// as one flat ticker, an `ALL` request iterates the currency-keyed
    /// entries (skipping the exchange's reserved bookkeeping keys).
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bithumb_api_client::rest::BithumbRestClient;
    /// use bithumb_api_client::types::{Currency, CurrencySelect};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = BithumbRestClient::new();
    ///     let btc = CurrencySelect::One(Currency::new("btc")?);
    ///     let snapshot = client.get_ticker(&btc, &Currency::krw()).await?;
    ///     for (currency, ticker) in &snapshot.tickers {
    ///         println!("{currency}: {}", ticker.closing_price);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_ticker(
        &self,
        order_currency: &CurrencySelect,
        payment_currency: &Currency,
    ) -> Result<TickerSnapshot, BithumbError> {
        let path = format!(
            "{}/{}_{}",
            public::TICKER,
            order_currency.request_symbol(),
            payment_currency.request_symbol()
        );
        let data = self.public_get(&path).await?.into_data()?;
        let raw = as_object("data", &data)?;

        let timestamp = milli_epoch_field(raw, "date")?;
        let tickers = match order_currency {
            CurrencySelect::All => decode_currency_map(raw, Ticker::from_raw)?,
            CurrencySelect::One(currency) => {
                HashMap::from([(currency.clone(), Ticker::from_raw(raw)?)])
            }
        };
        Ok(TickerSnapshot { timestamp, tickers })
    }

    /// Get the order book for one currency pair, or for every pair when
    /// [`CurrencySelect::All`] is passed.
    ///
    /// Bid and ask levels are returned in the exchange's own ordering.
    pub async fn get_orderbook(
        &self,
        order_currency: &CurrencySelect,
        payment_currency: &Currency,
    ) -> Result<OrderbookSnapshot, BithumbError> {
        let path = format!(
            "{}/{}_{}",
            public::ORDERBOOK,
            order_currency.request_symbol(),
            payment_currency.request_symbol()
        );
        let data = self.public_get(&path).await?.into_data()?;
        let raw = as_object("data", &data)?;

        let timestamp = milli_epoch_field(raw, "timestamp")?;
        let books = match order_currency {
            CurrencySelect::All => decode_currency_map(raw, Orderbook::from_raw)?,
            CurrencySelect::One(currency) => {
                HashMap::from([(currency.clone(), Orderbook::from_raw(raw)?)])
            }
        };
        Ok(OrderbookSnapshot { timestamp, books })
    }

    /// Get recently concluded trades for a currency pair, oldest first as
    /// reported by the exchange.
    pub async fn get_transaction_history(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
    ) -> Result<Vec<Trade>, BithumbError> {
        let path = format!(
            "{}/{}_{}",
            public::TRANSACTION_HISTORY,
            order_currency.request_symbol(),
            payment_currency.request_symbol()
        );
        let data = self.public_get(&path).await?.into_data()?;
        let rows = data
            .as_array()
            .ok_or_else(|| DecodeError::new("data", "expected an array"))?;
        Ok(map_elements("data", rows, Trade::from_raw)?)
    }

    /// Get deposit and withdrawal availability for a coin.
    pub async fn get_assets_status(
        &self,
        order_currency: &Currency,
    ) -> Result<AssetsStatus, BithumbError> {
        let path = format!(
            "{}/{}",
            public::ASSETS_STATUS,
            order_currency.request_symbol()
        );
        let data = self.public_get(&path).await?.into_data()?;
        Ok(AssetsStatus::from_raw(as_object("data", &data)?)?)
    }

    /// Get the Bithumb market indices (BTAI and BTMI).
    pub async fn get_btci(&self) -> Result<BtciSnapshot, BithumbError> {
        let data = self.public_get(public::BTCI).await?.into_data()?;
        let raw = as_object("data", &data)?;
        let timestamp = milli_epoch_field(raw, "date")?;
        Ok(BtciSnapshot::from_raw(timestamp, raw)?)
    }

    /// Get candlestick data for a currency pair at the given interval.
    ///
    /// The candlestick endpoint wraps its payload in a deviant envelope (an
    /// integer status and fixed-width rows); both are normalized here into
    /// the crate's standard types.
    pub async fn get_candlestick(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
        interval: ChartInterval,
    ) -> Result<Vec<Candlestick>, BithumbError> {
        let path = format!(
            "{}/{}_{}/{}",
            public::CANDLESTICK,
            order_currency.request_symbol(),
            payment_currency.request_symbol(),
            interval
        );
        let rows = self.public_get_candles(&path).await?.into_rows()?;
        rows.iter()
            .enumerate()
            .map(|(index, row)| Candlestick::from_row(index, row).map_err(BithumbError::from))
            .collect()
    }

    /// List the currencies currently tradable against KRW, in symbol order.
    ///
    /// Derived from an `ALL` ticker query: every payload key that is not a
    /// reserved bookkeeping key is a listed currency.
    pub async fn get_tradable_currencies(&self) -> Result<Vec<Currency>, BithumbError> {
        let path = format!("{}/ALL_KRW", public::TICKER);
        let data = self.public_get(&path).await?.into_data()?;
        let raw = as_object("data", &data)?;

        let mut currencies = BTreeSet::new();
        for key in raw.keys() {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            currencies
                .insert(Currency::new(key).map_err(|e| DecodeError::new(key.clone(), e.reason))?);
        }
        Ok(currencies.into_iter().collect())
    }
}
