//! Live basketball scorekeeping: a per-game ledger with undo, pure
//! aggregations over live and stored stats, and a JSON file game store.

pub mod aggregation;
pub mod config;
pub mod ledger;
pub mod logging;
pub mod report;
pub mod session;
pub mod storage;
