//! Message-level anonymization engine
//!
//! [`AnonymizationEngine`] ties the segmenter and the rule dispatcher into a
//! single text-to-text transform. It owns the pseudonym caches, so one engine
//! must serve exactly one message: construct, use, discard.
//!
//! # Examples
//!
//! ```
//! use nubilum::anonymization::AnonymizationEngine;
//!
//! let message = "MSH|^~\\&|APP|FAC|RCV|RFAC|20250107120000||ADT^A01|1|P|2.5\n\
//!                PID|1||123^^^HOSP^MR||Doe^John||19800515|M";
//!
//! let anonymized = AnonymizationEngine::new().anonymize_message(message);
//! assert!(!anonymized.contains("Doe"));
//! assert_eq!(anonymized.lines().count(), 2);
//!
//! // A fresh engine produces the same output
//! assert_eq!(AnonymizationEngine::new().anonymize_message(message), anonymized);
//! ```

use crate::anonymization::{
    er7,
    models::AnonymizedMessage,
    pseudonym::PseudonymGenerator,
    rules::dispatch,
};
use chrono::Utc;
use std::collections::BTreeMap;
use std::time::Instant;

/// Segment-aware ER7 anonymizer
///
/// The engine never fails: malformed dates, short segments and unknown tags
/// all degrade to passthrough.
#[derive(Debug, Default)]
pub struct AnonymizationEngine {
    pseudonyms: PseudonymGenerator,
}

impl AnonymizationEngine {
    /// Create an engine with empty pseudonym caches
    pub fn new() -> Self {
        Self::default()
    }

    /// Anonymize one message and return the rewritten text
    ///
    /// Blank input is returned unchanged. Otherwise blank lines are dropped,
    /// lines are trimmed and segments are rejoined with `\n`.
    pub fn anonymize_message(&mut self, text: &str) -> String {
        self.transform(text).0
    }

    /// Anonymize one message and collect statistics about it
    pub fn anonymize_message_with_stats(&mut self, text: &str) -> AnonymizedMessage {
        let start = Instant::now();
        let (anonymized_text, scrubbed_by_rule) = self.transform(text);
        let processing_time_ms = start.elapsed().as_millis() as u64;

        AnonymizedMessage {
            message_type: er7::message_type(text),
            segment_counts: er7::segment_counts(text),
            input_length: text.len(),
            output_length: anonymized_text.len(),
            anonymized_text,
            scrubbed_by_rule,
            processing_time_ms,
            timestamp: Utc::now(),
        }
    }

    /// Pseudonym caches accumulated so far
    pub fn pseudonyms(&self) -> &PseudonymGenerator {
        &self.pseudonyms
    }

    fn transform(&mut self, text: &str) -> (String, BTreeMap<String, usize>) {
        let mut scrubbed = BTreeMap::new();
        if text.trim().is_empty() {
            return (text.to_string(), scrubbed);
        }

        let mut segments = er7::split(text);
        for segment in &mut segments {
            for applied in dispatch(segment, &mut self.pseudonyms) {
                *scrubbed.entry(applied.kind.label().to_string()).or_insert(0) += 1;
            }
        }

        let output = er7::join(&segments);
        tracing::debug!(
            segments = segments.len(),
            input_length = text.len(),
            output_length = output.len(),
            fields_scrubbed = scrubbed.values().sum::<usize>(),
            "Anonymized message"
        );
        (output, scrubbed)
    }
}
