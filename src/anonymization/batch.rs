//! Batch boundary: several concatenated messages in one text
//!
//! A new message starts at every header line after the first. Each message is
//! anonymized by its own [`AnonymizationEngine`], so pseudonym caches never
//! leak between messages.

use crate::anonymization::{engine::AnonymizationEngine, er7::HEADER_TAG, models::AnonymizedMessage};
use serde::Serialize;

/// Separator placed between anonymized messages
pub const MESSAGE_SEPARATOR: &str = "\n\n";

/// Anonymized batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutcome {
    /// Per-message results, in input order
    pub messages: Vec<AnonymizedMessage>,
    /// All anonymized messages joined by a blank line
    pub output: String,
}

impl BatchOutcome {
    /// Number of messages in the batch
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

/// Split text into individual messages
///
/// Lines before the first header belong to the first message. Text without
/// any header is a single message; blank text yields no messages.
pub fn split_messages(text: &str) -> Vec<&str> {
    let mut messages = Vec::new();
    let mut start = 0;
    let mut offset = 0;
    let mut seen_header = false;

    for line in text.split_inclusive(['\r', '\n']) {
        if line.trim_start().starts_with(HEADER_TAG) {
            if seen_header {
                messages.push(&text[start..offset]);
                start = offset;
            }
            seen_header = true;
        }
        offset += line.len();
    }
    messages.push(&text[start..]);

    messages.retain(|message| !message.trim().is_empty());
    messages
}

/// Anonymize every message in `text`, each with a fresh engine
pub fn anonymize_batch(text: &str) -> BatchOutcome {
    let messages: Vec<AnonymizedMessage> = split_messages(text)
        .into_iter()
        .map(|message| AnonymizationEngine::new().anonymize_message_with_stats(message))
        .collect();

    let output = messages
        .iter()
        .map(|message| message.anonymized_text.as_str())
        .collect::<Vec<_>>()
        .join(MESSAGE_SEPARATOR);

    tracing::info!(messages = messages.len(), "Anonymized batch");
    BatchOutcome { messages, output }
}
