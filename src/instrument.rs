use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;

/// Codes are opaque to this crate; we only insist they are usable as log tokens.
fn is_valid_code(code: &str) -> bool {
    !code.is_empty() && !code.chars().any(char::is_whitespace)
}

/// A tradeable instrument, identified by its symbol (e.g. "BTC-USD").
///
/// Serialized as a plain string, so `"BTC-USD"` in JSON and not an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Instrument {
    symbol: String,
}

impl Instrument {
    /// Returns the symbol, e.g. "BTC-USD".
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl FromStr for Instrument {
    type Err = MarketDataError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_valid_code(s) {
            Ok(Instrument {
                symbol: s.to_string(),
            })
        } else {
            Err(MarketDataError::InvalidInstrument(s.to_string()))
        }
    }
}

impl TryFrom<String> for Instrument {
    type Error = MarketDataError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        if is_valid_code(&s) {
            Ok(Instrument { symbol: s })
        } else {
            Err(MarketDataError::InvalidInstrument(s))
        }
    }
}

impl From<Instrument> for String {
    fn from(i: Instrument) -> Self {
        i.symbol
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

/// The venue an order or quote was observed on (e.g. "BINANCE").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Exchange {
    code: String,
}

impl Exchange {
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl FromStr for Exchange {
    type Err = MarketDataError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_valid_code(s) {
            Ok(Exchange {
                code: s.to_string(),
            })
        } else {
            Err(MarketDataError::InvalidExchange(s.to_string()))
        }
    }
}

impl TryFrom<String> for Exchange {
    type Error = MarketDataError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        if is_valid_code(&s) {
            Ok(Exchange { code: s })
        } else {
            Err(MarketDataError::InvalidExchange(s))
        }
    }
}

impl From<Exchange> for String {
    fn from(e: Exchange) -> Self {
        e.code
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}
