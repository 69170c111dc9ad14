use thiserror::Error;

use crate::{instrument::Instrument, orders::Side};

/// Everything that can go wrong while building or reading market data values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// A derived quantity needed a side of the book that holds no entries.
    #[error("empty book: no {0} entries")]
    EmptyBook(Side),

    #[error("invalid side: `{0}` (expected BID or ASK)")]
    InvalidSide(String),

    #[error("invalid instrument symbol: `{0}`")]
    InvalidInstrument(String),

    #[error("invalid exchange code: `{0}`")]
    InvalidExchange(String),

    /// An entry in the `expected` sequence of a book is tagged with the other side.
    #[error("{expected} entry at index {index} is tagged {found}")]
    SideMismatch {
        expected: Side,
        found: Side,
        index: usize,
    },

    #[error("entry at index {index} belongs to {found}, book is for {expected}")]
    InstrumentMismatch {
        expected: Instrument,
        found: Instrument,
        index: usize,
    },
}

pub type MarketDataResult<T> = Result<T, MarketDataError>;
