use std::fs;

use market_data::{
    cli::{load_snapshot, render_summary},
    errors::MarketDataError,
    orders::Side,
    time::TimePoint,
};
use serde_json::json;
use tempfile::tempdir;

fn write_snapshot(dir: &tempfile::TempDir, body: serde_json::Value) -> std::path::PathBuf {
    let path = dir.path().join("snapshot.json");
    fs::write(&path, serde_json::to_vec(&body).unwrap()).unwrap();
    path
}

#[test]
fn loads_snapshot_and_fills_missing_timestamps() {
    let dir = tempdir().unwrap();
    let path = write_snapshot(
        &dir,
        json!({
            "instrument": "BTC-USD",
            "exchange": "BINANCE",
            "time_exchange": 1_000,
            "bids": [
                { "price": 100.0, "qty": 1.0, "time_exchange": 900, "time_received": 950 },
                { "price": 102.5, "qty": 2.0 },
                { "price": 101.0, "qty": 3.0 }
            ],
            "asks": [ { "price": 103.0, "qty": 1.0 } ]
        }),
    );

    let before = TimePoint::now();
    let book = load_snapshot(&path, false).unwrap();
    let after = TimePoint::now();

    assert_eq!(book.instr.symbol(), "BTC-USD");
    assert_eq!(book.time_exchange, TimePoint::from_nanos(1_000));
    assert!(before <= book.time_received && book.time_received <= after);
    assert_eq!(book.bids[0].time_received, TimePoint::from_nanos(950));
    assert!(book.bids.iter().all(|o| o.side == Side::Bid));
    assert_eq!(book.best_bid(), Ok(102.5));
    assert_eq!(book.best_ask(), Ok(103.0));
}

#[test]
fn validate_rejects_mislabelled_entry() {
    let dir = tempdir().unwrap();
    let path = write_snapshot(
        &dir,
        json!({
            "instrument": "BTC-USD",
            "exchange": "BINANCE",
            "bids": [ { "price": 100.0, "qty": 1.0, "side": "ASK" } ],
            "asks": []
        }),
    );

    // trusted load keeps the entry as-is
    let book = load_snapshot(&path, false).unwrap();
    assert_eq!(book.bids[0].side, Side::Ask);

    let err = load_snapshot(&path, true).unwrap_err();
    assert_eq!(
        err.downcast_ref::<MarketDataError>(),
        Some(&MarketDataError::SideMismatch {
            expected: Side::Bid,
            found: Side::Ask,
            index: 0,
        })
    );
}

#[test]
fn bad_side_token_in_snapshot_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = write_snapshot(
        &dir,
        json!({
            "instrument": "BTC-USD",
            "exchange": "BINANCE",
            "bids": [ { "price": 100.0, "qty": 1.0, "side": "BUY" } ]
        }),
    );
    let err = load_snapshot(&path, false).unwrap_err();
    assert!(format!("{err:#}").contains("parsing snapshot"), "{err:#}");
}

#[test]
fn missing_file_reports_path() {
    let dir = tempdir().unwrap();
    let err = load_snapshot(dir.path().join("nope.json"), false).unwrap_err();
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn summary_lists_derived_quantities() {
    let dir = tempdir().unwrap();
    let path = write_snapshot(
        &dir,
        json!({
            "instrument": "BTC-USD",
            "exchange": "BINANCE",
            "bids": [ { "price": 100.0, "qty": 1.0 } ],
            "asks": [ { "price": 101.0, "qty": 1.0 } ]
        }),
    );
    let summary = render_summary(&load_snapshot(&path, true).unwrap());
    assert!(summary.contains("OrderBook BTC-USD"));
    assert!(summary.contains("best bid: 100"));
    assert!(summary.contains("best ask: 101"));
    assert!(summary.contains("spread: 1"));
    assert!(summary.contains("mid: 100.5"));
    assert!(!summary.contains("crossed"));
}

#[test]
fn summary_reports_empty_side() {
    let dir = tempdir().unwrap();
    let path = write_snapshot(
        &dir,
        json!({
            "instrument": "BTC-USD",
            "exchange": "BINANCE",
            "asks": [ { "price": 101.0, "qty": 1.0 } ]
        }),
    );
    let summary = render_summary(&load_snapshot(&path, false).unwrap());
    assert!(summary.contains("best bid: n/a (empty book: no BID entries)"));
    assert!(summary.contains("best ask: 101"));
    assert!(summary.contains("mid: n/a"));
}
