//! Usage event and statistics models

use crate::anonymization::{er7, models::AnonymizedMessage};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

fn default_success() -> bool {
    true
}

/// RFC 3339, or an ISO 8601 local time without offset as older logs wrote it
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(timestamp.with_timezone(&Local));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

/// One recorded anonymization attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEvent {
    /// Unique event identifier
    #[serde(default)]
    pub id: Uuid,
    /// When the event happened
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Local>,
    /// Local date, `YYYY-MM-DD`
    pub date: String,
    /// Local time, `HH:MM:SS`
    pub time: String,
    /// Message type from the header segment
    pub message_type: String,
    /// Segments per tag
    #[serde(default)]
    pub segment_counts: BTreeMap<String, usize>,
    /// Sum of `segment_counts`
    #[serde(default)]
    pub total_segments: usize,
    /// Input length in bytes
    #[serde(default)]
    pub message_length: usize,
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl UsageEvent {
    /// Build an event for `message`, timestamped now
    pub fn from_message(message: &str, success: bool, error: Option<String>) -> Self {
        Self::from_message_at(message, success, error, Local::now())
    }

    /// Build an event for `message` with an explicit timestamp
    pub fn from_message_at(
        message: &str,
        success: bool,
        error: Option<String>,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self::new(
            er7::message_type(message),
            er7::segment_counts(message),
            message.len(),
            success,
            error,
            timestamp,
        )
    }

    /// Build a successful event from an anonymization result
    pub fn from_anonymized(message: &AnonymizedMessage) -> Self {
        Self::new(
            message.message_type.clone(),
            message.segment_counts.clone(),
            message.input_length,
            true,
            None,
            message.timestamp.with_timezone(&Local),
        )
    }

    fn new(
        message_type: String,
        segment_counts: BTreeMap<String, usize>,
        message_length: usize,
        success: bool,
        error: Option<String>,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: timestamp.format("%Y-%m-%d").to_string(),
            time: timestamp.format("%H:%M:%S").to_string(),
            timestamp,
            message_type,
            total_segments: segment_counts.values().sum(),
            segment_counts,
            message_length,
            success,
            error,
        }
    }
}

/// A name with its occurrence count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCount {
    pub name: String,
    pub count: usize,
}

/// Aggregate over recorded usage events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageStatistics {
    pub total_anonymizations: usize,
    pub successful_anonymizations: usize,
    pub failed_anonymizations: usize,
    /// Percentage of successful events, two decimals
    pub success_rate: f64,
    /// Message types, most frequent first
    pub message_types: Vec<RankedCount>,
    /// Segments processed per tag, most frequent first
    pub segments_processed: Vec<RankedCount>,
    pub total_segments: usize,
    pub total_message_length: usize,
    pub average_message_length: usize,
    /// One decimal
    pub average_segments_per_message: f64,
    /// Events per date (`YYYY-MM-DD`)
    pub daily_counts: BTreeMap<String, usize>,
    /// Events per hour of day
    pub hourly_distribution: BTreeMap<u32, usize>,
}

impl UsageStatistics {
    /// Aggregate a set of events
    pub fn from_events(events: &[UsageEvent]) -> Self {
        let total = events.len();
        if total == 0 {
            return Self::default();
        }

        let successful = events.iter().filter(|e| e.success).count();
        let mut message_types = BTreeMap::new();
        let mut segments_processed = BTreeMap::new();
        let mut daily_counts = BTreeMap::new();
        let mut hourly_distribution = BTreeMap::new();
        let mut total_segments = 0;
        let mut total_message_length = 0;

        for event in events {
            *message_types.entry(event.message_type.clone()).or_insert(0) += 1;
            for (segment, count) in &event.segment_counts {
                *segments_processed.entry(segment.clone()).or_insert(0) += count;
            }
            total_segments += event.total_segments;
            total_message_length += event.message_length;
            *daily_counts.entry(event.date.clone()).or_insert(0) += 1;
            *hourly_distribution.entry(event.timestamp.hour()).or_insert(0) += 1;
        }

        Self {
            total_anonymizations: total,
            successful_anonymizations: successful,
            failed_anonymizations: total - successful,
            success_rate: round_to(successful as f64 / total as f64 * 100.0, 2),
            message_types: ranked(message_types),
            segments_processed: ranked(segments_processed),
            total_segments,
            total_message_length,
            average_message_length: (total_message_length as f64 / total as f64).round() as usize,
            average_segments_per_message: round_to(total_segments as f64 / total as f64, 1),
            daily_counts,
            hourly_distribution,
        }
    }

    /// Count for a message type, zero when absent
    pub fn message_type_count(&self, message_type: &str) -> usize {
        self.message_types
            .iter()
            .find(|ranked| ranked.name == message_type)
            .map_or(0, |ranked| ranked.count)
    }

    /// Format statistics for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push_str("\n📊 Usage Statistics\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "  Total Anonymizations:   {}\n",
            self.total_anonymizations
        ));
        output.push_str(&format!(
            "  Successful:             {}\n",
            self.successful_anonymizations
        ));
        output.push_str(&format!(
            "  Failed:                 {}\n",
            self.failed_anonymizations
        ));
        output.push_str(&format!("  Success Rate:           {:.2}%\n", self.success_rate));
        output.push_str(&format!("  Total Segments:         {}\n", self.total_segments));
        output.push_str(&format!(
            "  Avg Message Length:     {} bytes\n",
            self.average_message_length
        ));
        output.push_str(&format!(
            "  Avg Segments/Message:   {:.1}\n",
            self.average_segments_per_message
        ));

        if !self.message_types.is_empty() {
            output.push_str("\n  Message Types:\n");
            for ranked in &self.message_types {
                output.push_str(&format!("    {:28} {:>6}\n", ranked.name, ranked.count));
            }
        }

        if !self.segments_processed.is_empty() {
            output.push_str("\n  Segments Processed:\n");
            for ranked in &self.segments_processed {
                output.push_str(&format!("    {:28} {:>6}\n", ranked.name, ranked.count));
            }
        }

        if !self.daily_counts.is_empty() {
            output.push_str("\n  Daily Counts:\n");
            for (date, count) in &self.daily_counts {
                output.push_str(&format!("    {:28} {:>6}\n", date, count));
            }
        }

        output
    }
}

/// Sort by count descending; ties keep name order
fn ranked(counts: BTreeMap<String, usize>) -> Vec<RankedCount> {
    let mut ranked: Vec<_> = counts
        .into_iter()
        .map(|(name, count)| RankedCount { name, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
