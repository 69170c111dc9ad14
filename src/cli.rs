use std::{fmt::Write as _, fs, path::Path};

use anyhow::Context;
use clap::{Parser, Subcommand, builder::PossibleValuesParser};
use serde::Deserialize;
use tracing::{Level, info};

use crate::{
    instrument::{Exchange, Instrument},
    orderbook::OrderBook,
    orders::{MarketOrder, Side, side_from_string},
    time::TimePoint,
};

/// Inspect market data snapshots
#[derive(Parser)]
#[command(name = "market-data")]
#[command(version, about = "Inspect order book snapshots and derived quotes")]
struct Cli {
    /// Maximum log level written to stderr
    #[arg(
        long,
        global = true,
        default_value = "warn",
        value_parser = PossibleValuesParser::new(["trace", "debug", "info", "warn", "error"])
    )]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a side token (BID or ASK) and print its canonical form
    Side { token: String },

    /// Print a book snapshot with best bid, best ask, spread and mid
    Book {
        /// Path to a JSON snapshot
        file: String,

        /// Reject entries tagged with the wrong side or instrument
        #[arg(long)]
        validate: bool,
    },

    /// Print the top-of-book two-way price of a snapshot
    Quote {
        /// Path to a JSON snapshot
        file: String,
    },
}

/// One entry of a snapshot file. `side` defaults to the list it appears in.
#[derive(Deserialize)]
struct SnapshotLevel {
    price: f64,
    qty: f64,
    side: Option<Side>,
    time_exchange: Option<TimePoint>,
    time_received: Option<TimePoint>,
}

/// On-disk book snapshot, as handed over by a feed handler.
#[derive(Deserialize)]
struct BookSnapshot {
    instrument: Instrument,
    exchange: Exchange,
    time_exchange: Option<TimePoint>,
    time_received: Option<TimePoint>,
    #[serde(default)]
    bids: Vec<SnapshotLevel>,
    #[serde(default)]
    asks: Vec<SnapshotLevel>,
}

fn to_orders(snap: &BookSnapshot, levels: Vec<SnapshotLevel>, side: Side) -> Vec<MarketOrder> {
    levels
        .into_iter()
        .map(|l| {
            MarketOrder::new(
                snap.instrument.clone(),
                snap.exchange.clone(),
                l.side.unwrap_or(side),
                l.price,
                l.qty,
                l.time_exchange,
                l.time_received,
            )
        })
        .collect()
}

/// Reads a JSON snapshot from `path` into an [`OrderBook`].
///
/// With `validate`, mislabelled entries are rejected instead of kept.
pub fn load_snapshot(path: impl AsRef<Path>, validate: bool) -> anyhow::Result<OrderBook> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    let mut snap: BookSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("parsing snapshot {}", path.display()))?;

    let bid_levels = std::mem::take(&mut snap.bids);
    let ask_levels = std::mem::take(&mut snap.asks);
    let bids = to_orders(&snap, bid_levels, Side::Bid);
    let asks = to_orders(&snap, ask_levels, Side::Ask);
    info!(
        "loaded {} bids / {} asks for {} from {}",
        bids.len(),
        asks.len(),
        snap.instrument,
        path.display()
    );

    let book = if validate {
        OrderBook::validated(snap.instrument, bids, asks, snap.time_exchange, snap.time_received)
            .with_context(|| format!("validating snapshot {}", path.display()))?
    } else {
        OrderBook::new(snap.instrument, bids, asks, snap.time_exchange, snap.time_received)
    };
    Ok(book)
}

/// The rendered book followed by its derived quantities.
///
/// An empty side is reported in place of the value instead of failing.
pub fn render_summary(book: &OrderBook) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "------ Order Book ------");
    let _ = writeln!(out, "{book}");
    let _ = writeln!(out, "------------------------");
    let rows = [
        ("best bid", book.best_bid()),
        ("best ask", book.best_ask()),
        ("spread", book.spread()),
        ("mid", book.mid_price()),
    ];
    for (label, value) in rows {
        match value {
            Ok(v) => {
                let _ = writeln!(out, "{label}: {v}");
            }
            Err(e) => {
                let _ = writeln!(out, "{label}: n/a ({e})");
            }
        }
    }
    if book.is_crossed() {
        let _ = writeln!(out, "warning: book is crossed");
    }
    out
}

fn init_logging(level: &str) {
    let level: Level = level.parse().unwrap_or(Level::WARN);
    // a second init (e.g. in tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    match cli.command {
        Commands::Side { token } => {
            let side = side_from_string(&token)?;
            println!("{side}");
        }
        Commands::Book { file, validate } => {
            let book = load_snapshot(&file, validate)?;
            print!("{}", render_summary(&book));
        }
        Commands::Quote { file } => {
            let book = load_snapshot(&file, false)?;
            let quote = book
                .top_of_book()
                .with_context(|| format!("no top of book in {file}"))?;
            println!("{quote}");
        }
    }
    Ok(())
}
