//! Trait definition for the Bithumb REST API client.
//!
//! This module provides the `BithumbClient` trait which abstracts all REST
//! API operations. This enables:
//! - Mock implementations for testing
//! - Decorator pattern (e.g., an instrumentation wrapper)
//! - Alternative implementations
//!
//! # Example
//!
//! ```rust,ignore
//! use bithumb_api_client::rest::{BithumbClient, BithumbRestClient};
//! use bithumb_api_client::types::{Currency, CurrencySelect};
//!
//! async fn mid_price<C: BithumbClient>(client: &C) -> Result<f64, bithumb_api_client::BithumbError> {
//!     let btc = CurrencySelect::One(Currency::new("btc")?);
//!     let snapshot = client.get_orderbook(&btc, &Currency::krw()).await?;
//!     let book = snapshot.books.values().next().unwrap();
//!     Ok((book.bids[0].price + book.asks[0].price) / 2.0)
//! }
//! ```

use std::collections::HashMap;
use std::future::Future;

use crate::error::BithumbError;
use crate::rest::private::{
    Account, Balance, CoinWithdrawalRequest, Order, OrderDetail, OrdersRequest, PlaceOrderRequest,
    StopLimitRequest, UserTicker, UserTransaction, UserTransactionsRequest, WalletAddress,
};
use crate::rest::public::{
    AssetsStatus, BtciSnapshot, Candlestick, OrderbookSnapshot, TickerSnapshot, Trade,
};
use crate::types::{ChartInterval, Currency, CurrencySelect, OrderSide};

/// Trait defining all Bithumb REST API operations.
///
/// All methods are async and return `Result<T, BithumbError>`.
pub trait BithumbClient: Send + Sync {
    // ========== Public Endpoints ==========

    /// Get ticker statistics for one pair or all pairs.
    fn get_ticker(
        &self,
        order_currency: &CurrencySelect,
        payment_currency: &Currency,
    ) -> impl Future<Output = Result<TickerSnapshot, BithumbError>> + Send;

    /// Get the order book for one pair or all pairs.
    fn get_orderbook(
        &self,
        order_currency: &CurrencySelect,
        payment_currency: &Currency,
    ) -> impl Future<Output = Result<OrderbookSnapshot, BithumbError>> + Send;

    /// Get recently concluded trades for a pair.
    fn get_transaction_history(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
    ) -> impl Future<Output = Result<Vec<Trade>, BithumbError>> + Send;

    /// Get deposit and withdrawal availability for a coin.
    fn get_assets_status(
        &self,
        order_currency: &Currency,
    ) -> impl Future<Output = Result<AssetsStatus, BithumbError>> + Send;

    /// Get the Bithumb market indices.
    fn get_btci(&self) -> impl Future<Output = Result<BtciSnapshot, BithumbError>> + Send;

    /// Get candlestick data for a pair.
    fn get_candlestick(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
        interval: ChartInterval,
    ) -> impl Future<Output = Result<Vec<Candlestick>, BithumbError>> + Send;

    /// List the currencies currently tradable against KRW.
    fn get_tradable_currencies(
        &self,
    ) -> impl Future<Output = Result<Vec<Currency>, BithumbError>> + Send;

    // ========== Private Endpoints - Account ==========

    /// Get account and fee information.
    fn get_account(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
    ) -> impl Future<Output = Result<Account, BithumbError>> + Send;

    /// Get balances for one coin or all registered coins.
    fn get_balance(
        &self,
        currency: &CurrencySelect,
    ) -> impl Future<Output = Result<HashMap<Currency, Balance>, BithumbError>> + Send;

    /// Get the deposit wallet address for a coin.
    fn get_wallet_address(
        &self,
        currency: &Currency,
    ) -> impl Future<Output = Result<WalletAddress, BithumbError>> + Send;

    /// Get the member's view of recent market statistics.
    fn get_user_ticker(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
    ) -> impl Future<Output = Result<UserTicker, BithumbError>> + Send;

    /// Get open orders.
    fn get_orders(
        &self,
        request: &OrdersRequest,
    ) -> impl Future<Output = Result<Vec<Order>, BithumbError>> + Send;

    /// Get details of one order, including partial fills.
    fn get_order_detail(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
        order_id: &str,
    ) -> impl Future<Output = Result<OrderDetail, BithumbError>> + Send;

    /// Get the member's transaction ledger.
    fn get_user_transactions(
        &self,
        request: &UserTransactionsRequest,
    ) -> impl Future<Output = Result<Vec<UserTransaction>, BithumbError>> + Send;

    // ========== Private Endpoints - Trading ==========

    /// Place a limit order.
    fn place_order(
        &self,
        request: &PlaceOrderRequest,
    ) -> impl Future<Output = Result<String, BithumbError>> + Send;

    /// Place a market buy order.
    fn market_buy(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
        units: f64,
    ) -> impl Future<Output = Result<String, BithumbError>> + Send;

    /// Place a market sell order.
    fn market_sell(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
        units: f64,
    ) -> impl Future<Output = Result<String, BithumbError>> + Send;

    /// Place a stop-limit order.
    fn stop_limit(
        &self,
        request: &StopLimitRequest,
    ) -> impl Future<Output = Result<String, BithumbError>> + Send;

    /// Cancel an order.
    fn cancel_order(
        &self,
        side: OrderSide,
        order_id: &str,
        order_currency: &Currency,
        payment_currency: &Currency,
    ) -> impl Future<Output = Result<(), BithumbError>> + Send;

    /// Withdraw coins to an external address.
    fn withdraw_coin(
        &self,
        request: &CoinWithdrawalRequest,
    ) -> impl Future<Output = Result<(), BithumbError>> + Send;

    /// Withdraw KRW to a bank account.
    fn withdraw_krw(
        &self,
        bank: &str,
        account: &str,
        amount: u64,
    ) -> impl Future<Output = Result<(), BithumbError>> + Send;
}
