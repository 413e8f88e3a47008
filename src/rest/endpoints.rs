//! Bithumb REST API endpoint constants.

/// Base URL for the Bithumb REST API.
pub const BITHUMB_BASE_URL: &str = "https://api.bithumb.com";

/// Public endpoints (no authentication required).
///
/// Public endpoints take their arguments as path segments, e.g.
/// `/public/ticker/BTC_KRW`.
pub mod public {
    /// Get ticker statistics.
    pub const TICKER: &str = "/public/ticker";
    /// Get order book.
    pub const ORDERBOOK: &str = "/public/orderbook";
    /// Get recently concluded trades.
    pub const TRANSACTION_HISTORY: &str = "/public/transaction_history";
    /// Get deposit/withdrawal availability for a coin.
    pub const ASSETS_STATUS: &str = "/public/assetsstatus";
    /// Get the Bithumb market indices (BTAI/BTMI).
    pub const BTCI: &str = "/public/btci";
    /// Get candlestick data.
    pub const CANDLESTICK: &str = "/public/candlestick";
}

/// Private endpoints (authentication required).
///
/// Private endpoints are POSTed to with a signed form body that repeats the
/// endpoint path in an `endpoint` field.
pub mod private {
    // Account information endpoints
    /// Get account and fee information.
    pub const ACCOUNT: &str = "/info/account";
    /// Get per-currency balances.
    pub const BALANCE: &str = "/info/balance";
    /// Get the deposit wallet address for a coin.
    pub const WALLET_ADDRESS: &str = "/info/wallet_address";
    /// Get the member's view of recent ticker data.
    pub const TICKER: &str = "/info/ticker";
    /// Get open orders.
    pub const ORDERS: &str = "/info/orders";
    /// Get details of one order, including partial fills.
    pub const ORDER_DETAIL: &str = "/info/order_detail";
    /// Get the member's transaction ledger.
    pub const USER_TRANSACTIONS: &str = "/info/user_transactions";

    // Trading endpoints
    /// Place a limit order.
    pub const PLACE: &str = "/trade/place";
    /// Cancel an order.
    pub const CANCEL: &str = "/trade/cancel";
    /// Place a market buy order.
    pub const MARKET_BUY: &str = "/trade/market_buy";
    /// Place a market sell order.
    pub const MARKET_SELL: &str = "/trade/market_sell";
    /// Place a stop-limit order.
    pub const STOP_LIMIT: &str = "/trade/stop_limit";
    /// Withdraw coins to an external address.
    pub const BTC_WITHDRAWAL: &str = "/trade/btc_withdrawal";
    /// Withdraw KRW to a bank account.
    pub const KRW_WITHDRAWAL: &str = "/trade/krw_withdrawal";
}
