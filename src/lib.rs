#![doc(test(attr(deny(warnings))))]

//! Budget Recorder expands recurring transactions over a timeline and folds
//! them into calendar-aligned balance buckets (daily, weekly, monthly, yearly).

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Budget Recorder tracing initialized.");
    });
}
