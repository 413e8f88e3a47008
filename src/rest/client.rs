//! Bithumb REST API client implementation.

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::auth::{CredentialsProvider, IncreasingNonce, NonceProvider, sign_request};
use crate::error::{BithumbError, status_codes};
use crate::rest::endpoints::BITHUMB_BASE_URL;
use crate::rest::private::{
    Account, Balance, CoinWithdrawalRequest, Order, OrderDetail, OrdersRequest, PlaceOrderRequest,
    StopLimitRequest, UserTicker, UserTransaction, UserTransactionsRequest, WalletAddress,
};
use crate::rest::public::{
    AssetsStatus, BtciSnapshot, Candlestick, OrderbookSnapshot, TickerSnapshot, Trade,
};
use crate::rest::traits::BithumbClient;
use crate::types::envelope::{ApiEnvelope, CandleEnvelope};
use crate::types::{ChartInterval, Currency, CurrencyRegistry, CurrencySelect, OrderSide};

/// The Bithumb REST API client.
///
/// Provides access to the public market-data endpoints and, when credentials
/// are configured, the private account and trading endpoints. Each call is a
/// self-contained request/decode sequence: the client keeps no per-call
/// state, caches nothing, and never retries an exchange error.
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
///     let snapshot = client
///         .get_ticker(&CurrencySelect::All, &Currency::krw())
///         .await?;
///     println!("{} tickers at {}", snapshot.tickers.len(), snapshot.timestamp);
///     Ok(())
/// }
/// ```
///
/// For private endpoints, provide credentials:
///
/// ```rust,no_run
/// use bithumb_api_client::rest::BithumbRestClient;
/// use bithumb_api_client::auth::StaticCredentials;
/// use bithumb_api_client::types::CurrencySelect;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("connect_key", "secret_key"));
///     let client = BithumbRestClient::builder()
///         .credentials(credentials)
///         .build();
///
///     let balances = client.get_balance(&CurrencySelect::All).await?;
///     println!("{} balances", balances.len());
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BithumbRestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    registry: CurrencyRegistry,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Arc<dyn NonceProvider>,
}

impl BithumbRestClient {
    /// Create a new client with default settings.
    ///
    /// This client can only access public endpoints.
    /// Use [`BithumbRestClient::builder()`] to configure credentials for private endpoints.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> BithumbRestClientBuilder {
        BithumbRestClientBuilder::new()
    }

    /// The coin registry this client was built with.
    pub fn registry(&self) -> &CurrencyRegistry {
        &self.registry
    }

    /// Make a public GET request and parse the standard envelope.
    pub(crate) async fn public_get(&self, path: &str) -> Result<ApiEnvelope, BithumbError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http_client.get(&url).send().await?;
        let body = response.text().await?;
        let envelope: ApiEnvelope = serde_json::from_str(&body)?;
        if envelope.status != status_codes::SUCCESS {
            tracing::warn!(status = %envelope.status, path, "public API call failed");
        }
        Ok(envelope)
    }

    /// Make a public GET request against the candlestick endpoint, whose
    /// envelope deviates from the standard one.
    pub(crate) async fn public_get_candles(
        &self,
        path: &str,
    ) -> Result<CandleEnvelope, BithumbError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http_client.get(&url).send().await?;
        let body = response.text().await?;
        let envelope: CandleEnvelope = serde_json::from_str(&body)?;
        if envelope.status != status_codes::SUCCESS && envelope.status != "0" {
            tracing::warn!(status = %envelope.status, path, "candlestick API call failed");
        }
        Ok(envelope)
    }

    /// Make an authenticated POST request.
    ///
    /// The form body always carries the endpoint path in an `endpoint` field,
    /// which is also part of the signed message.
    pub(crate) async fn private_post(
        &self,
        endpoint: &str,
        params: Vec<(&str, String)>,
    ) -> Result<ApiEnvelope, BithumbError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(BithumbError::MissingCredentials)?;

        let nonce = self.nonce_provider.next_nonce();
        let creds = credentials.get_credentials();

        let mut fields = Vec::with_capacity(params.len() + 1);
        fields.push(("endpoint", endpoint.to_string()));
        fields.extend(params);

        let form_data = serde_urlencoded::to_string(&fields)
            .map_err(|e| BithumbError::InvalidRequest(format!("unencodable form body: {e}")))?;

        let signature = sign_request(creds, endpoint, nonce, &form_data)?;

        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .http_client
            .post(&url)
            .header("Api-Key", &creds.api_key)
            .header("Api-Sign", signature)
            .header("Api-Nonce", nonce.to_string())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(form_data)
            .send()
            .await?;

        let body = response.text().await?;
        let envelope: ApiEnvelope = serde_json::from_str(&body)?;
        if envelope.status != status_codes::SUCCESS {
            tracing::warn!(status = %envelope.status, endpoint, "private API call failed");
        }
        Ok(envelope)
    }
}

impl Default for BithumbRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BithumbRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BithumbRestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

/// Builder for [`BithumbRestClient`].
pub struct BithumbRestClientBuilder {
    base_url: String,
    registry: CurrencyRegistry,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    user_agent: Option<String>,
}

impl BithumbRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: BITHUMB_BASE_URL.to_string(),
            registry: CurrencyRegistry::default(),
            credentials: None,
            nonce_provider: None,
            user_agent: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Replace the coin registry used for `ALL` balance decoding.
    pub fn registry(mut self, registry: CurrencyRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> BithumbRestClient {
        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("bithumb-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("bithumb-api-client"));
        headers.insert(USER_AGENT, header_value);

        // Build the HTTP client with middleware.
        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(IncreasingNonce::new()));

        BithumbRestClient {
            http_client: client,
            base_url: self.base_url,
            registry: self.registry,
            credentials: self.credentials,
            nonce_provider,
        }
    }
}

impl Default for BithumbRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// BithumbClient trait implementation.

impl BithumbClient for BithumbRestClient {
    // ========== Public Endpoints ==========

    async fn get_ticker(
        &self,
        order_currency: &CurrencySelect,
        payment_currency: &Currency,
    ) -> Result<TickerSnapshot, BithumbError> {
        BithumbRestClient::get_ticker(self, order_currency, payment_currency).await
    }

    async fn get_orderbook(
        &self,
        order_currency: &CurrencySelect,
        payment_currency: &Currency,
    ) -> Result<OrderbookSnapshot, BithumbError> {
        BithumbRestClient::get_orderbook(self, order_currency, payment_currency).await
    }

    async fn get_transaction_history(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
    ) -> Result<Vec<Trade>, BithumbError> {
        BithumbRestClient::get_transaction_history(self, order_currency, payment_currency).await
    }

    async fn get_assets_status(
        &self,
        order_currency: &Currency,
    ) -> Result<AssetsStatus, BithumbError> {
        BithumbRestClient::get_assets_status(self, order_currency).await
    }

    async fn get_btci(&self) -> Result<BtciSnapshot, BithumbError> {
        BithumbRestClient::get_btci(self).await
    }

    async fn get_candlestick(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
        interval: ChartInterval,
    ) -> Result<Vec<Candlestick>, BithumbError> {
        BithumbRestClient::get_candlestick(self, order_currency, payment_currency, interval).await
    }

    async fn get_tradable_currencies(&self) -> Result<Vec<Currency>, BithumbError> {
        BithumbRestClient::get_tradable_currencies(self).await
    }

    // ========== Private Endpoints - Account ==========

    async fn get_account(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
    ) -> Result<Account, BithumbError> {
        BithumbRestClient::get_account(self, order_currency, payment_currency).await
    }

    async fn get_balance(
        &self,
        currency: &CurrencySelect,
    ) -> Result<HashMap<Currency, Balance>, BithumbError> {
        BithumbRestClient::get_balance(self, currency).await
    }

    async fn get_wallet_address(
        &self,
        currency: &Currency,
    ) -> Result<WalletAddress, BithumbError> {
        BithumbRestClient::get_wallet_address(self, currency).await
    }

    async fn get_user_ticker(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
    ) -> Result<UserTicker, BithumbError> {
        BithumbRestClient::get_user_ticker(self, order_currency, payment_currency).await
    }

    async fn get_orders(&self, request: &OrdersRequest) -> Result<Vec<Order>, BithumbError> {
        BithumbRestClient::get_orders(self, request).await
    }

    async fn get_order_detail(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
        order_id: &str,
    ) -> Result<OrderDetail, BithumbError> {
        BithumbRestClient::get_order_detail(self, order_currency, payment_currency, order_id).await
    }

    async fn get_user_transactions(
        &self,
        request: &UserTransactionsRequest,
    ) -> Result<Vec<UserTransaction>, BithumbError> {
        BithumbRestClient::get_user_transactions(self, request).await
    }

    // ========== Private Endpoints - Trading ==========

    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<String, BithumbError> {
        BithumbRestClient::place_order(self, request).await
    }

    async fn market_buy(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
        units: f64,
    ) -> Result<String, BithumbError> {
        BithumbRestClient::market_buy(self, order_currency, payment_currency, units).await
    }

    async fn market_sell(
        &self,
        order_currency: &Currency,
        payment_currency: &Currency,
        units: f64,
    ) -> Result<String, BithumbError> {
        BithumbRestClient::market_sell(self, order_currency, payment_currency, units).await
    }

    async fn stop_limit(&self, request: &StopLimitRequest) -> Result<String, BithumbError> {
        BithumbRestClient::stop_limit(self, request).await
    }

    async fn cancel_order(
        &self,
        side: OrderSide,
        order_id: &str,
        order_currency: &Currency,
        payment_currency: &Currency,
    ) -> Result<(), BithumbError> {
        BithumbRestClient::cancel_order(self, side, order_id, order_currency, payment_currency)
            .await
    }

    async fn withdraw_coin(&self, request: &CoinWithdrawalRequest) -> Result<(), BithumbError> {
        BithumbRestClient::withdraw_coin(self, request).await
    }

    async fn withdraw_krw(
        &self,
        bank: &str,
        account: &str,
        amount: u64,
    ) -> Result<(), BithumbError> {
        BithumbRestClient::withdraw_krw(self, bank, account, amount).await
    }
}
