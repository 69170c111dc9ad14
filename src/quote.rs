use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time::{OptTime, TimePoint};

/// A simultaneous two-sided quote: best bid and best ask with their sizes.
///
/// Timestamps are left unset unless the caller supplies them; unlike
/// [`MarketOrder`](crate::orders::MarketOrder) a quote never stamps "now" on
/// its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TwoWayPrice {
    pub bid_price: f64,
    pub ask_price: f64,
    pub bid_qty: f64,
    pub ask_qty: f64,
    #[serde(default)]
    pub time_exchange: Option<TimePoint>,
    #[serde(default)]
    pub time_received: Option<TimePoint>,
}

impl TwoWayPrice {
    pub fn new(bid_price: f64, ask_price: f64, bid_qty: f64, ask_qty: f64) -> Self {
        Self {
            bid_price,
            ask_price,
            bid_qty,
            ask_qty,
            time_exchange: None,
            time_received: None,
        }
    }

    /// Returns a copy carrying the given timestamps.
    pub fn with_times(
        self,
        time_exchange: Option<TimePoint>,
        time_received: Option<TimePoint>,
    ) -> Self {
        Self {
            time_exchange,
            time_received,
            ..self
        }
    }

    pub fn spread(&self) -> f64 {
        self.ask_price - self.bid_price
    }

    pub fn mid_price(&self) -> f64 {
        (self.bid_price + self.ask_price) / 2.0
    }

    /// A quote is crossed when the bid reaches or exceeds the ask.
    pub fn is_crossed(&self) -> bool {
        self.bid_price >= self.ask_price
    }

    /// Receive latency in nanoseconds, if both timestamps are known.
    pub fn latency(&self) -> Option<i64> {
        match (self.time_exchange, self.time_received) {
            (Some(ex), Some(rx)) => Some(rx.nanos_since(ex)),
            _ => None,
        }
    }
}

impl fmt::Display for TwoWayPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TwoWayPrice {{ bid: {} @ {}, ask: {} @ {}, time_exchange: {}, time_received: {} }}",
            self.bid_qty,
            self.bid_price,
            self.ask_qty,
            self.ask_price,
            OptTime(self.time_exchange),
            OptTime(self.time_received)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spread_and_mid() {
        let q = TwoWayPrice::new(100.0, 101.0, 5.0, 7.0);
        assert_eq!(q.spread(), 1.0);
        assert_eq!(q.mid_price(), 100.5);
        assert!(!q.is_crossed());
    }

    #[test]
    fn locked_quote_counts_as_crossed() {
        assert!(TwoWayPrice::new(100.0, 100.0, 1.0, 1.0).is_crossed());
    }

    #[test]
    fn timestamps_stay_unset_by_default() {
        let q = TwoWayPrice::new(1.0, 2.0, 1.0, 1.0);
        assert_eq!(q.time_exchange, None);
        assert_eq!(q.time_received, None);
        assert_eq!(q.latency(), None);

        let q = q.with_times(
            Some(TimePoint::from_nanos(10)),
            Some(TimePoint::from_nanos(35)),
        );
        assert_eq!(q.latency(), Some(25));
    }

    #[test]
    fn display_shows_both_sides() {
        let s = TwoWayPrice::new(99.5, 100.25, 3.0, 4.0).to_string();
        assert!(s.contains("bid: 3 @ 99.5"), "{s}");
        assert!(s.contains("ask: 4 @ 100.25"), "{s}");
        assert!(s.contains("time_exchange: -"), "{s}");
    }
}
