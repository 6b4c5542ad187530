//! Usage accounting
//!
//! Every anonymized message (and every rejected input) can be recorded as one
//! line of a JSONL log. The log is later aggregated into
//! [`UsageStatistics`]. Only metadata is recorded: message type, segment
//! counts and lengths, never field values.

pub mod models;
pub mod tracker;

pub use models::{RankedCount, UsageEvent, UsageStatistics};
pub use tracker::UsageTracker;
