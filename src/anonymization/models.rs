//! Message-level anonymization results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of anonymizing one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizedMessage {
    /// Message type taken from the header segment (e.g. `ADT^A01`)
    pub message_type: String,
    /// Anonymized ER7 text
    pub anonymized_text: String,
    /// Segments per tag in the input
    pub segment_counts: BTreeMap<String, usize>,
    /// Input length in bytes
    pub input_length: usize,
    /// Output length in bytes
    pub output_length: usize,
    /// Fields rewritten, keyed by rule label
    pub scrubbed_by_rule: BTreeMap<String, usize>,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Timestamp of anonymization
    pub timestamp: DateTime<Utc>,
}

impl AnonymizedMessage {
    /// Total number of segments in the input
    pub fn total_segments(&self) -> usize {
        self.segment_counts.values().sum()
    }

    /// Total number of fields rewritten
    pub fn total_scrubbed(&self) -> usize {
        self.scrubbed_by_rule.values().sum()
    }
}
