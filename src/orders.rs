use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    errors::MarketDataError,
    instrument::{Exchange, Instrument},
    time::TimePoint,
};

/// Which side of the market an entry rests on.
///
/// - `Bid`: interest to buy. The best bid is the **highest** bid price.
/// - `Ask`: interest to sell. The best ask is the **lowest** ask price.
///
/// The canonical text tokens are `"BID"` and `"ASK"` (case-sensitive); they are
/// used by [`Display`](fmt::Display), [`FromStr`] and serde alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Bid => "BID",
            Side::Ask => "ASK",
        }
    }

    pub const fn opposite(self) -> Side {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = MarketDataError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BID" => Ok(Side::Bid),
            "ASK" => Ok(Side::Ask),
            other => Err(MarketDataError::InvalidSide(other.to_string())),
        }
    }
}

/// Parses a canonical side token. Inverse of `side.to_string()`.
pub fn side_from_string(s: &str) -> Result<Side, MarketDataError> {
    s.parse()
}

/// A single resting or executed order / price level as reported by a venue.
///
/// - `time_exchange`: when the venue produced the entry
/// - `time_received`: when we observed it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOrder {
    pub instr: Instrument,
    pub exchange: Exchange,
    pub side: Side,
    pub price: f64,
    pub qty: f64,
    pub time_exchange: TimePoint,
    pub time_received: TimePoint,
}

impl MarketOrder {
    /// Builds an order. A `None` timestamp is filled with the current time.
    pub fn new(
        instr: Instrument,
        exchange: Exchange,
        side: Side,
        price: f64,
        qty: f64,
        time_exchange: Option<TimePoint>,
        time_received: Option<TimePoint>,
    ) -> Self {
        Self {
            instr,
            exchange,
            side,
            price,
            qty,
            time_exchange: TimePoint::or_now(time_exchange),
            time_received: TimePoint::or_now(time_received),
        }
    }

    /// Nanoseconds between the venue stamping the entry and us receiving it.
    pub fn latency(&self) -> i64 {
        self.time_received.nanos_since(self.time_exchange)
    }

    pub fn notional(&self) -> f64 {
        self.price * self.qty
    }
}

impl fmt::Display for MarketOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MarketOrder {{ instr: {}, exchange: {}, side: {}, price: {}, qty: {}, time_exchange: {}, time_received: {} }}",
            self.instr,
            self.exchange,
            self.side,
            self.price,
            self.qty,
            self.time_exchange,
            self.time_received
        )
    }
}
