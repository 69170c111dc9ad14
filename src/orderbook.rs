use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    errors::{MarketDataError, MarketDataResult},
    instrument::Instrument,
    orders::{MarketOrder, Side},
    quote::TwoWayPrice,
    time::TimePoint,
};

/// An [`OrderBook`] is a snapshot of resting interest for one instrument,
/// stored as two plain sequences:
/// - `bids` (buy interest)
/// - `asks` (sell interest)
///
/// The sequences are kept exactly as supplied. Nothing assumes they are
/// sorted, and every derived price is found by scanning.
///
/// A book is never mutated after construction; a newer snapshot is a new book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub instr: Instrument,
    pub bids: Vec<MarketOrder>,
    pub asks: Vec<MarketOrder>,
    pub time_exchange: TimePoint,
    pub time_received: TimePoint,
}

/// Highest (`Bid`) or lowest (`Ask`) price in `entries`.
fn best_price(entries: &[MarketOrder], side: Side) -> MarketDataResult<f64> {
    let mut prices = entries.iter().map(|o| o.price);
    let first = prices.next().ok_or(MarketDataError::EmptyBook(side))?;
    Ok(match side {
        Side::Bid => prices.fold(first, f64::max),
        Side::Ask => prices.fold(first, f64::min),
    })
}

/// Checks that every entry in `entries` is tagged `side` and quotes `instr`.
fn check_entries(instr: &Instrument, entries: &[MarketOrder], side: Side) -> MarketDataResult<()> {
    for (index, order) in entries.iter().enumerate() {
        if order.side != side {
            warn!("{} entry {} tagged {}: {}", side, index, order.side, order);
            return Err(MarketDataError::SideMismatch {
                expected: side,
                found: order.side,
                index,
            });
        }
        if &order.instr != instr {
            warn!("{} entry {} for {}, book is {}", side, index, order.instr, instr);
            return Err(MarketDataError::InstrumentMismatch {
                expected: instr.clone(),
                found: order.instr.clone(),
                index,
            });
        }
    }
    Ok(())
}

impl OrderBook {
    /// Creates a book from its two sequences without inspecting them.
    ///
    /// A `None` timestamp is filled with the current time. Use
    /// [`OrderBook::validated`] to reject inconsistent entries instead.
    pub fn new(
        instr: Instrument,
        bids: Vec<MarketOrder>,
        asks: Vec<MarketOrder>,
        time_exchange: Option<TimePoint>,
        time_received: Option<TimePoint>,
    ) -> Self {
        let book = Self {
            instr,
            bids,
            asks,
            time_exchange: TimePoint::or_now(time_exchange),
            time_received: TimePoint::or_now(time_received),
        };
        debug!(
            "built book {} with {} bids / {} asks",
            book.instr,
            book.bids.len(),
            book.asks.len()
        );
        book
    }

    /// Like [`OrderBook::new`], but every bid must be tagged [`Side::Bid`],
    /// every ask [`Side::Ask`], and all entries must quote `instr`.
    ///
    /// Bids are checked before asks; the first offending entry is reported.
    pub fn validated(
        instr: Instrument,
        bids: Vec<MarketOrder>,
        asks: Vec<MarketOrder>,
        time_exchange: Option<TimePoint>,
        time_received: Option<TimePoint>,
    ) -> MarketDataResult<Self> {
        check_entries(&instr, &bids, Side::Bid)?;
        check_entries(&instr, &asks, Side::Ask)?;
        Ok(Self::new(instr, bids, asks, time_exchange, time_received))
    }

    /// The sequence holding `side`.
    pub fn side(&self, side: Side) -> &[MarketOrder] {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    /// Highest bid price. Fails with [`MarketDataError::EmptyBook`] if there are no bids.
    pub fn best_bid(&self) -> MarketDataResult<f64> {
        best_price(&self.bids, Side::Bid)
    }

    /// Lowest ask price. Fails with [`MarketDataError::EmptyBook`] if there are no asks.
    pub fn best_ask(&self) -> MarketDataResult<f64> {
        best_price(&self.asks, Side::Ask)
    }

    /// `best_ask - best_bid`. The bid side is checked first.
    pub fn spread(&self) -> MarketDataResult<f64> {
        let bid = self.best_bid()?;
        let ask = self.best_ask()?;
        Ok(ask - bid)
    }

    pub fn mid_price(&self) -> MarketDataResult<f64> {
        let bid = self.best_bid()?;
        let ask = self.best_ask()?;
        Ok((bid + ask) / 2.0)
    }

    /// `true` when the best bid is at or through the best ask.
    /// A book with an empty side is never crossed.
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Ok(bid), Ok(ask)) => bid >= ask,
            _ => false,
        }
    }

    /// Number of entries on `side`.
    pub fn depth(&self, side: Side) -> usize {
        self.side(side).len()
    }

    /// Sum of quantities on `side`.
    pub fn total_qty(&self, side: Side) -> f64 {
        self.side(side).iter().map(|o| o.qty).sum()
    }

    /// Collapses the book to its top level.
    ///
    /// Prices are the best bid / best ask; each quantity is the sum over every
    /// entry resting at exactly that price. Timestamps are the book's own.
    pub fn top_of_book(&self) -> MarketDataResult<TwoWayPrice> {
        let bid_price = self.best_bid()?;
        let ask_price = self.best_ask()?;
        let qty_at = |entries: &[MarketOrder], price: f64| -> f64 {
            entries
                .iter()
                .filter(|o| o.price == price)
                .map(|o| o.qty)
                .sum()
        };
        Ok(TwoWayPrice::new(
            bid_price,
            ask_price,
            qty_at(&self.bids, bid_price),
            qty_at(&self.asks, ask_price),
        )
        .with_times(Some(self.time_exchange), Some(self.time_received)))
    }
}

/// Multi-line layout:
///
/// ```text
/// OrderBook BTC-USD (time_exchange: 1, time_received: 2)
///   bids (2):
///     MarketOrder { .. }
///   asks (0):
/// ```
impl fmt::Display for OrderBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "OrderBook {} (time_exchange: {}, time_received: {})",
            self.instr, self.time_exchange, self.time_received
        )?;
        for side in [Side::Bid, Side::Ask] {
            let entries = self.side(side);
            write!(f, "  {} ({}):", if side == Side::Bid { "bids" } else { "asks" }, entries.len())?;
            for order in entries {
                write!(f, "\n    {order}")?;
            }
            if side == Side::Bid {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
