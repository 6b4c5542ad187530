//! JSONL usage tracker

use super::models::{UsageEvent, UsageStatistics};
use crate::domain::{NubilumError, Result};
use chrono::{Days, Local};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Append-only usage log
pub struct UsageTracker {
    log_path: PathBuf,
}

impl UsageTracker {
    /// Open (and create if needed) the usage log at `log_path`
    pub fn new(log_path: impl Into<PathBuf>) -> Result<Self> {
        let log_path = log_path.into();

        if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                NubilumError::Usage(format!(
                    "Failed to create usage log directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        if !log_path.exists() {
            File::create(&log_path).map_err(|e| {
                NubilumError::Usage(format!(
                    "Failed to create usage log {}: {e}",
                    log_path.display()
                ))
            })?;
            tracing::info!(path = %log_path.display(), "Created usage log");
        }

        Ok(Self { log_path })
    }

    /// Path of the usage log
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Append one event
    pub fn record(&self, event: &UsageEvent) -> Result<()> {
        let json_line = serde_json::to_string(event)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                NubilumError::Usage(format!(
                    "Failed to open usage log {}: {e}",
                    self.log_path.display()
                ))
            })?;
        writeln!(file, "{json_line}")?;

        tracing::debug!(
            message_type = %event.message_type,
            success = event.success,
            "Recorded usage event"
        );
        Ok(())
    }

    /// Aggregate recorded events, optionally only those from the last `days` days
    ///
    /// Lines that cannot be parsed are skipped. A missing log yields empty
    /// statistics.
    pub fn query(&self, days: Option<u32>) -> Result<UsageStatistics> {
        if !self.log_path.exists() {
            return Ok(UsageStatistics::default());
        }

        let cutoff = days.and_then(|days| {
            Local::now()
                .date_naive()
                .checked_sub_days(Days::new(u64::from(days)))
        });

        let reader = BufReader::new(File::open(&self.log_path)?);
        let mut events = Vec::new();
        let mut skipped = 0usize;
        for line in reader.split(b'\n') {
            let Ok(line) = String::from_utf8(line?) else {
                skipped += 1;
                continue;
            };
            if line.trim().is_empty() {
                continue;
            }
            let event: UsageEvent = match serde_json::from_str(&line) {
                Ok(event) => event,
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };
            if cutoff.is_some_and(|cutoff| event.timestamp.date_naive() < cutoff) {
                continue;
            }
            events.push(event);
        }

        if skipped > 0 {
            tracing::warn!(skipped, "Skipped unparseable usage log lines");
        }

        Ok(UsageStatistics::from_events(&events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_tracker_creates_log() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("nested").join("usage.jsonl");

        let tracker = UsageTracker::new(&log_path).unwrap();
        assert!(log_path.exists());
        assert_eq!(tracker.log_path(), log_path.as_path());
    }

    #[test]
    fn test_record_appends_json_lines() {
        let dir = tempdir().unwrap();
        let tracker = UsageTracker::new(dir.path().join("usage.jsonl")).unwrap();

        tracker
            .record(&UsageEvent::from_message("MSH|1|2|3|4|5|6|7|ADT^A01", true, None))
            .unwrap();
        tracker
            .record(&UsageEvent::from_message(
                "",
                false,
                Some("empty input".to_string()),
            ))
            .unwrap();

        let content = std::fs::read_to_string(tracker.log_path()).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "empty input");
        assert_eq!(value["message_type"], "NO_MSH_SEGMENT");
        assert_eq!(value["message_length"], 0);
    }

    #[test]
    fn test_query_skips_garbage_lines() {
        let dir = tempdir().unwrap();
        let tracker = UsageTracker::new(dir.path().join("usage.jsonl")).unwrap();
        tracker
            .record(&UsageEvent::from_message("MSH|1|2|3|4|5|6|7|ADT^A01", true, None))
            .unwrap();

        let mut file = OpenOptions::new()
            .append(true)
            .open(tracker.log_path())
            .unwrap();
        writeln!(file, "not json").unwrap();
        writeln!(file).unwrap();

        let stats = tracker.query(None).unwrap();
        assert_eq!(stats.total_anonymizations, 1);
    }

    #[test]
    fn test_query_skips_invalid_utf8_lines() {
        let dir = tempdir().unwrap();
        let tracker = UsageTracker::new(dir.path().join("usage.jsonl")).unwrap();

        let mut file = OpenOptions::new()
            .append(true)
            .open(tracker.log_path())
            .unwrap();
        file.write_all(&[0xff, 0xfe, b'{', b'\n']).unwrap();
        drop(file);

        tracker
            .record(&UsageEvent::from_message("MSH|1|2|3|4|5|6|7|ADT^A01", true, None))
            .unwrap();

        let stats = tracker.query(None).unwrap();
        assert_eq!(stats.total_anonymizations, 1);
        assert_eq!(stats.message_type_count("ADT^A01"), 1);
    }

    #[test]
    fn test_query_reads_offsetless_timestamps() {
        let dir = tempdir().unwrap();
        let tracker = UsageTracker::new(dir.path().join("usage.jsonl")).unwrap();

        let now = Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f");
        let mut file = OpenOptions::new()
            .append(true)
            .open(tracker.log_path())
            .unwrap();
        writeln!(
            file,
            r#"{{"timestamp": "{now}", "date": "2025-01-07", "time": "09:30:00", "message_type": "ORU^R01", "segment_counts": {{"MSH": 1, "OBX": 2}}, "total_segments": 3, "message_length": 40, "success": false, "error": "No message provided"}}"#
        )
        .unwrap();
        drop(file);

        let stats = tracker.query(Some(1)).unwrap();
        assert_eq!(stats.total_anonymizations, 1);
        assert_eq!(stats.failed_anonymizations, 1);
        assert_eq!(stats.total_segments, 3);
    }

    #[test]
    fn test_query_missing_log() {
        let dir = tempdir().unwrap();
        let tracker = UsageTracker::new(dir.path().join("usage.jsonl")).unwrap();
        std::fs::remove_file(tracker.log_path()).unwrap();

        let stats = tracker.query(Some(7)).unwrap();
        assert_eq!(stats, UsageStatistics::default());
    }

    #[test]
    fn test_query_day_window() {
        let dir = tempdir().unwrap();
        let tracker = UsageTracker::new(dir.path().join("usage.jsonl")).unwrap();

        let old = Local::now() - chrono::Duration::days(10);
        tracker
            .record(&UsageEvent::from_message_at(
                "MSH|1|2|3|4|5|6|7|ORU^R01",
                true,
                None,
                old,
            ))
            .unwrap();
        tracker
            .record(&UsageEvent::from_message("MSH|1|2|3|4|5|6|7|ADT^A01", true, None))
            .unwrap();

        assert_eq!(tracker.query(None).unwrap().total_anonymizations, 2);

        let recent = tracker.query(Some(3)).unwrap();
        assert_eq!(recent.total_anonymizations, 1);
        assert_eq!(recent.message_type_count("ADT^A01"), 1);
    }
}
