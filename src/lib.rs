//! # Bithumb Client
//!
//! An async Rust client library for the Bithumb exchange REST API.
//!
//! ## Features
//!
//! - Full REST API support: public market data plus signed private endpoints
//! - Strong typing for every response, decoded from the exchange's
//!   string-heavy JSON with explicit, field-naming decode errors
//! - Single-currency and `ALL`-aggregated queries for ticker, orderbook,
//!   and balance
//! - HMAC-SHA512 request signing with strictly increasing nonces
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bithumb_api_client::rest::BithumbRestClient;
//! use bithumb_api_client::types::{Currency, CurrencySelect};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BithumbRestClient::new();
//!     let btc = CurrencySelect::One(Currency::new("btc")?);
//!     let snapshot = client.get_ticker(&btc, &Currency::krw()).await?;
//!     println!("Ticker: {:?}", snapshot);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ApiError, BithumbError, DecodeError};
pub use types::{ChartInterval, Currency, CurrencySelect, OrderSide, SearchType};

/// Result type alias using BithumbError
pub type Result<T> = std::result::Result<T, BithumbError>;
