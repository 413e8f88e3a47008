//! Private REST API endpoints (authentication required).
//!
//! These endpoints require API credentials to be configured on the client.

mod types;

pub use types::*;

use std::collections::HashMap;

use crate::error::{BithumbError, DecodeError};
use crate::rest::BithumbRestClient;
use crate::rest::endpoints::private;
use crate::types::codec::{as_object, map_elements};
use crate::types::{Currency, CurrencySelect, OrderSide};

impl BithumbRestClient {
    /// Get account and fee information for a currency pair.
    pub async fn get_account(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
    ) -> Result<Account, BithumbError> {
        let params = vec![
            ("order_currency", order_currency.request_symbol()),
            ("payment_currency", payment_currency.request_symbol()),
        ];
        let data = self
            .private_post(private::ACCOUNT, params)
            .await?
            .into_data()?;
        Ok(Account::from_raw(as_object("data", &data)?)?)
    }

    /// Get balances, either for one coin or for every registered coin.
    ///
    /// A single-coin query always yields two records (the coin and KRW,
    /// which the exchange reports alongside it). An `ALL` query yields one
    /// record per coin in the client's registry plus KRW, zeroed where the
    /// exchange reported nothing.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bithumb_api_client::rest::BithumbRestClient;
    /// use bithumb_api_client::auth::StaticCredentials;
    /// use bithumb_api_client::types::{Currency, CurrencySelect};
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let credentials = Arc::new(StaticCredentials::new("key", "secret"));
    ///     let client = BithumbRestClient::builder().credentials(credentials).build();
    ///
    ///     let btc = CurrencySelect::One(Currency::new("btc")?);
    ///     let balances = client.get_balance(&btc).await?;
    ///     for (currency, balance) in &balances {
    ///         println!("{currency}: {} available", balance.available);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_balance(
        &self,
        currency: &CurrencySelect,
    ) -> Result<HashMap<Currency, Balance>, BithumbError> {
        let params = vec![("currency", currency.request_symbol())];
        let data = self
            .private_post(private::BALANCE, params)
            .await?
            .into_data()?;
        let raw = as_object("data", &data)?;

        let balances = match currency {
            CurrencySelect::All => Balance::decode_all(raw, self.registry())?,
            CurrencySelect::One(currency) => Balance::decode_single(raw, currency)?,
        };
        Ok(balances)
    }

    /// Get the deposit wallet address for a coin.
    ///
    /// If no address has been issued yet the exchange reports success with an
    /// empty address.
    pub async fn get_wallet_address(
        &self,
        currency: &Currency,
    ) -> Result<WalletAddress, BithumbError> {
        let params = vec![("currency", currency.request_symbol())];
        let data = self
            .private_post(private::WALLET_ADDRESS, params)
            .await?
            .into_data()?;
        Ok(WalletAddress::from_raw(as_object("data", &data)?)?)
    }

    /// Get the member's view of recent market statistics for a pair.
    pub async fn get_user_ticker(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
    ) -> Result<UserTicker, BithumbError> {
        let params = vec![
            ("order_currency", order_currency.request_symbol()),
            ("payment_currency", payment_currency.request_symbol()),
        ];
        let data = self
            .private_post(private::TICKER, params)
            .await?
            .into_data()?;
        Ok(UserTicker::from_raw(as_object("data", &data)?)?)
    }

    /// Get open orders for a pair, newest first as reported by the exchange.
    pub async fn get_orders(&self, request: &OrdersRequest) -> Result<Vec<Order>, BithumbError> {
        if request.count == 0 || request.count > 1000 {
            return Err(BithumbError::InvalidRequest(format!(
                "order count must be between 1 and 1000, got {}",
                request.count
            )));
        }

        let mut params = vec![
            ("order_currency", request.order_currency.request_symbol()),
            ("payment_currency", request.payment_currency.request_symbol()),
            ("count", request.count.to_string()),
        ];
        if let Some(after) = request.after {
            params.push(("after", after.unix_timestamp().to_string()));
        }

        let data = self
            .private_post(private::ORDERS, params)
            .await?
            .into_data()?;
        let rows = data
            .as_array()
            .ok_or_else(|| DecodeError::new("data", "expected an array"))?;
        Ok(map_elements("data", rows, Order::from_raw)?)
    }

    /// Get full details of one order, including its partial fills.
    pub async fn get_order_detail(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
        order_id: &str,
    ) -> Result<OrderDetail, BithumbError> {
        let params = vec![
            ("order_currency", order_currency.request_symbol()),
            ("payment_currency", payment_currency.request_symbol()),
            ("order_id", order_id.to_string()),
        ];
        let data = self
            .private_post(private::ORDER_DETAIL, params)
            .await?
            .into_data()?;
        Ok(OrderDetail::from_raw(as_object("data", &data)?)?)
    }

    /// Get the member's transaction ledger, element order preserved.
    pub async fn get_user_transactions(
        &self,
        request: &UserTransactionsRequest,
    ) -> Result<Vec<UserTransaction>, BithumbError> {
        let mut params = vec![
            ("order_currency", request.order_currency.request_symbol()),
            ("payment_currency", request.payment_currency.request_symbol()),
            ("searchGb", request.search.code().to_string()),
        ];
        if let Some(offset) = request.offset {
            params.push(("offset", offset.to_string()));
        }
        if let Some(count) = request.count {
            params.push(("count", count.to_string()));
        }

        let data = self
            .private_post(private::USER_TRANSACTIONS, params)
            .await?
            .into_data()?;
        let rows = data
            .as_array()
            .ok_or_else(|| DecodeError::new("data", "expected an array"))?;
        Ok(map_elements("data", rows, UserTransaction::from_raw)?)
    }

    /// Place a limit order. Returns the exchange-assigned order id.
    pub async fn place_order(&self, request: &PlaceOrderRequest) -> Result<String, BithumbError> {
        let params = vec![
            ("order_currency", request.order_currency.request_symbol()),
            ("payment_currency", request.payment_currency.request_symbol()),
            ("units", request.units.to_string()),
            ("price", request.price.to_string()),
            ("type", request.side.to_string()),
        ];
        self.private_post(private::PLACE, params)
            .await?
            .into_order_id()
    }

    /// Place a market buy order. Returns the exchange-assigned order id.
    pub async fn market_buy(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
        units: f64,
    ) -> Result<String, BithumbError> {
        let params = vec![
            ("order_currency", order_currency.request_symbol()),
            ("payment_currency", payment_currency.request_symbol()),
            ("units", units.to_string()),
        ];
        self.private_post(private::MARKET_BUY, params)
            .await?
            .into_order_id()
    }

    /// Place a market sell order. Returns the exchange-assigned order id.
    pub async fn market_sell(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
        units: f64,
    ) -> Result<String, BithumbError> {
        let params = vec![
            ("order_currency", order_currency.request_symbol()),
            ("payment_currency", payment_currency.request_symbol()),
            ("units", units.to_string()),
        ];
        self.private_post(private::MARKET_SELL, params)
            .await?
            .into_order_id()
    }

    /// Place a stop-limit order. Returns the exchange-assigned order id.
    pub async fn stop_limit(&self, request: &StopLimitRequest) -> Result<String, BithumbError> {
        let params = vec![
            ("order_currency", request.order_currency.request_symbol()),
            ("payment_currency", request.payment_currency.request_symbol()),
            ("watch_price", request.watch_price.to_string()),
            ("price", request.price.to_string()),
            ("units", request.units.to_string()),
            ("type", request.side.to_string()),
        ];
        self.private_post(private::STOP_LIMIT, params)
            .await?
            .into_order_id()
    }

    /// Cancel an order.
    pub async fn cancel_order(
        &self,
        side: OrderSide,
        order_id: &str,
        order_currency: &Currency,
        payment_currency: &Currency,
    ) -> Result<(), BithumbError> {
        let params = vec![
            ("order_currency", order_currency.request_symbol()),
            ("payment_currency", payment_currency.request_symbol()),
            ("order_id", order_id.to_string()),
            ("type", side.to_string()),
        ];
        self.private_post(private::CANCEL, params)
            .await?
            .ensure_success()
    }

    /// Withdraw coins to an external address.
    ///
    /// Coins with secondary routing (XRP's destination tag, STEEM's memo,
    /// XMR's payment id) must carry a [`TransferNote`]; the request is
    /// rejected client-side otherwise, since the exchange would send the
    /// funds into the void.
    pub async fn withdraw_coin(
        &self,
        request: &CoinWithdrawalRequest,
    ) -> Result<(), BithumbError> {
        let needs_note = matches!(request.currency.as_str(), "xrp" | "steem" | "xmr");
        if needs_note && request.destination.is_none() {
            return Err(BithumbError::InvalidRequest(format!(
                "withdrawing {} requires a destination tag, memo, or payment id",
                request.currency
            )));
        }

        let mut params = vec![
            ("order_currency", request.currency.request_symbol()),
            ("units", request.units.to_string()),
            ("address", request.address.clone()),
        ];
        if let Some(destination) = &request.destination {
            params.push(("destination", destination.as_param()));
        }

        self.private_post(private::BTC_WITHDRAWAL, params)
            .await?
            .ensure_success()
    }

    /// Withdraw KRW to a bank account.
    ///
    /// `bank` is the exchange's bank code and name joined with an underscore,
    /// e.g. `"011_NongHyup"`.
    pub async fn withdraw_krw(
        &self,
        bank: &str,
        account: &str,
        amount: u64,
    ) -> Result<(), BithumbError> {
        let params = vec![
            ("bank", bank.to_string()),
            ("account", account.to_string()),
            ("price", amount.to_string()),
        ];
        self.private_post(private::KRW_WITHDRAWAL, params)
            .await?
            .ensure_success()
    }
}
