//! Debounced, cached keyword search

pub mod cache;
pub mod debounce;
pub mod store;

use std::time::Duration;

/// Quiet period before a keystroke burst becomes a query
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Shortest trimmed keyword that is ever fetched or rendered
pub const MIN_KEYWORD_LEN: usize = 3;
