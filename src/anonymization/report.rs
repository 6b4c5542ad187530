//! Run reporting for anonymization
//!
//! This module provides formatted reports for an `anonymize` run, showing
//! message and segment totals, fields scrubbed per rule and rejected inputs.

use crate::anonymization::models::AnonymizedMessage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Report over every message processed in one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Total messages anonymized
    pub total_messages: usize,

    /// Total segments seen
    pub total_segments: usize,

    /// Total fields rewritten
    pub total_fields_scrubbed: usize,

    /// Fields rewritten by rule label
    pub scrubbed_by_rule: BTreeMap<String, usize>,

    /// Messages by message type
    pub message_types: BTreeMap<String, usize>,

    /// Inputs that were rejected or could not be read
    pub warnings: Vec<String>,

    /// Processing statistics
    pub stats: ProcessingStats,
}

/// Processing statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingStats {
    /// Average processing time per message (ms)
    pub avg_processing_time_ms: u64,

    /// Total processing time (ms)
    pub total_processing_time_ms: u64,

    /// Messages with at least one field rewritten
    pub messages_scrubbed: usize,

    /// Messages passed through unchanged
    pub messages_untouched: usize,
}

impl BatchReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self {
            total_messages: 0,
            total_segments: 0,
            total_fields_scrubbed: 0,
            scrubbed_by_rule: BTreeMap::new(),
            message_types: BTreeMap::new(),
            warnings: Vec::new(),
            stats: ProcessingStats::default(),
        }
    }

    /// Add results from an anonymized message
    pub fn add_message(&mut self, message: &AnonymizedMessage) {
        self.total_messages += 1;
        self.total_segments += message.total_segments();
        self.stats.total_processing_time_ms += message.processing_time_ms;

        *self
            .message_types
            .entry(message.message_type.clone())
            .or_insert(0) += 1;

        let scrubbed = message.total_scrubbed();
        if scrubbed == 0 {
            self.stats.messages_untouched += 1;
        } else {
            self.stats.messages_scrubbed += 1;
            self.total_fields_scrubbed += scrubbed;
            for (rule, count) in &message.scrubbed_by_rule {
                *self.scrubbed_by_rule.entry(rule.clone()).or_insert(0) += count;
            }
        }

        self.stats.avg_processing_time_ms =
            self.stats.total_processing_time_ms / self.total_messages as u64;
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                    ANONYMIZATION REPORT                       \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "  Total Messages Anonymized:   {}\n",
            self.total_messages
        ));
        output.push_str(&format!(
            "  Messages with Fields Scrubbed: {}\n",
            self.stats.messages_scrubbed
        ));
        output.push_str(&format!(
            "  Messages Unchanged:          {}\n",
            self.stats.messages_untouched
        ));
        output.push_str(&format!(
            "  Total Segments:              {}\n",
            self.total_segments
        ));
        output.push_str(&format!(
            "  Total Fields Scrubbed:       {}\n",
            self.total_fields_scrubbed
        ));
        output.push_str(&format!(
            "  Avg Processing Time:         {} ms\n",
            self.stats.avg_processing_time_ms
        ));
        output.push('\n');

        if !self.scrubbed_by_rule.is_empty() {
            output.push_str("🔍 FIELDS SCRUBBED BY RULE\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");

            let mut rules: Vec<_> = self.scrubbed_by_rule.iter().collect();
            rules.sort_by(|a, b| b.1.cmp(a.1));

            for (rule, count) in rules {
                output.push_str(&format!("  {:30} {:>5}\n", rule, count));
            }
            output.push('\n');
        }

        if !self.message_types.is_empty() {
            output.push_str("📝 MESSAGE TYPES\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for (message_type, count) in &self.message_types {
                output.push_str(&format!("  {:30} {:>5}\n", message_type, count));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for warning in &self.warnings {
                output.push_str(&format!("  • {}\n", warning));
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for BatchReport {
    fn default() -> Self {
        Self::new()
    }
}
