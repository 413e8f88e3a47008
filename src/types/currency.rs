//! Currency symbols, the `ALL` request sentinel, and the coin registry.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::DecodeError;

/// A currency symbol as used by the Bithumb API (e.g. "btc", "krw").
///
/// Every `Currency` value is lowercase and non-empty; construction through
/// [`Currency::new`] normalizes and validates. The set of symbols is open:
/// the exchange lists new coins without notice, so this is a validated string
/// rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Currency(String);

impl Currency {
    /// Create a currency from a symbol, normalizing to lowercase.
    ///
    /// Returns a [`DecodeError`] for an empty symbol.
    pub fn new(symbol: impl AsRef<str>) -> Result<Self, DecodeError> {
        let symbol = symbol.as_ref().trim();
        if symbol.is_empty() {
            return Err(DecodeError::new("currency", "empty currency symbol"));
        }
        Ok(Self(symbol.to_ascii_lowercase()))
    }

    /// The Korean won, the exchange's quote fiat currency.
    pub fn krw() -> Self {
        Self("krw".to_string())
    }

    /// The symbol as a lowercase string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The symbol in the uppercase form used in request paths and bodies.
    pub(crate) fn request_symbol(&self) -> String {
        self.0.to_ascii_uppercase()
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Currency {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::new(s)
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Currency::new(&s).map_err(de::Error::custom)
    }
}

/// Selects either one currency or server-side aggregation over all of them.
///
/// Several endpoints (ticker, orderbook, balance) accept `"ALL"` in place of
/// a currency symbol, in which case the response fans out into one entry per
/// currency. The selection is made here, at the call site; the response shape
/// is never guessed from the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencySelect {
    /// Request aggregation over every currency the exchange lists.
    All,
    /// Request a single currency.
    One(Currency),
}

impl CurrencySelect {
    /// True if this selection requests the aggregated (`ALL`) response shape.
    pub fn is_all(&self) -> bool {
        matches!(self, CurrencySelect::All)
    }

    /// The symbol sent to the exchange: `"ALL"` or the uppercase currency.
    pub(crate) fn request_symbol(&self) -> String {
        match self {
            CurrencySelect::All => "ALL".to_string(),
            CurrencySelect::One(currency) => currency.request_symbol(),
        }
    }
}

impl From<Currency> for CurrencySelect {
    fn from(currency: Currency) -> Self {
        CurrencySelect::One(currency)
    }
}

/// Coins listed on the exchange at client-build time.
const DEFAULT_COINS: &[&str] = &[
    "btc", "eth", "dash", "ltc", "etc", "xrp", "bch", "xmr", "zec", "qtum", "btg", "eos", "icx",
    "trx", "elf", "omg", "knc", "glm", "zil", "waxp", "powr", "lrc", "steem", "strax", "zrx",
    "rep", "xem", "snt", "ada",
];

/// The set of coins known to the client.
///
/// Used to pre-populate the result of an `ALL` balance query and to reject
/// balance keys whose currency suffix is not a listed coin. The registry is
/// an immutable value fixed at client construction; replace it through the
/// client builder when the exchange lists or delists coins.
///
/// KRW is the quote fiat currency and is not part of the registry; balance
/// decoding accounts for it separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyRegistry {
    coins: BTreeSet<Currency>,
}

impl CurrencyRegistry {
    /// Create a registry from an explicit set of coins.
    pub fn new(coins: impl IntoIterator<Item = Currency>) -> Self {
        Self {
            coins: coins.into_iter().collect(),
        }
    }

    /// True if the coin is listed in this registry.
    pub fn contains(&self, currency: &Currency) -> bool {
        self.coins.contains(currency)
    }

    /// Iterate the registered coins in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = &Currency> {
        self.coins.iter()
    }

    /// Number of registered coins.
    pub fn len(&self) -> usize {
        self.coins.len()
    }

    /// True if the registry holds no coins.
    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }
}

impl Default for CurrencyRegistry {
    fn default() -> Self {
        Self {
            coins: DEFAULT_COINS
                .iter()
                .map(|symbol| Currency(symbol.to_string()))
                .collect(),
        }
    }
}
