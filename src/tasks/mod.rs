//! Background tasks module
//!
//! This module contains the tick schedule and tasks that run alongside the
//! HTTP server.

pub mod ticker;
pub mod title_sync;

// Re-export main types and functions
pub use ticker::{Ticker, TICK_PERIOD};
pub use title_sync::{sync_titles, title_sync_task};
