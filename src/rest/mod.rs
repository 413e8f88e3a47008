//! Bithumb REST API client.
//!
//! Provides access to the public market-data endpoints and the signed
//! private endpoints.
//!
//! # Trait-based API
//!
//! The [`BithumbClient`] trait abstracts all REST API operations, enabling:
//! - Mock implementations for testing
//! - Decorator pattern (e.g., an instrumentation wrapper)
//! - Alternative implementations
//!
//! ```rust,ignore
//! use bithumb_api_client::rest::{BithumbClient, BithumbRestClient};
//! use bithumb_api_client::types::{Currency, CurrencySelect};
//!
//! async fn use_client<C: BithumbClient>(client: &C) -> Result<(), bithumb_api_client::BithumbError> {
//!     let snapshot = client.get_ticker(&CurrencySelect::All, &Currency::krw()).await?;
//!     println!("{} pairs", snapshot.tickers.len());
//!     Ok(())
//! }
//! ```

mod client;
mod endpoints;
pub mod private;
pub mod public;
mod traits;

pub use client::{BithumbRestClient, BithumbRestClientBuilder};
pub use endpoints::*;
pub use traits::BithumbClient;
