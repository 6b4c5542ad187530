//! Stats command implementation
//!
//! This module implements the `stats` command for displaying aggregated
//! usage statistics from the usage log.

use crate::config::NubilumConfig;
use crate::usage::UsageTracker;
use clap::Args;

/// Arguments for the stats command
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Only include events from the last N days
    #[arg(long)]
    pub days: Option<u32>,

    /// Print statistics as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsArgs {
    /// Execute the stats command
    pub async fn execute(&self, config: &NubilumConfig) -> anyhow::Result<i32> {
        tracing::info!(days = ?self.days, "Querying usage statistics");

        let tracker = UsageTracker::new(&config.usage.log_path)?;
        let stats = tracker.query(self.days)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
            return Ok(0);
        }

        match self.days {
            Some(days) => println!("Usage log: {} (last {days} days)", config.usage.log_path),
            None => println!("Usage log: {}", config.usage.log_path),
        }
        print!("{}", stats.format_console());

        if stats.total_anonymizations == 0 {
            println!();
            println!("No usage recorded yet.");
            println!("Run 'nubilum anonymize' to start anonymizing messages.");
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::UsageEvent;
    use tempfile::tempdir;

    fn config_with_log(dir: &std::path::Path) -> NubilumConfig {
        let mut config = NubilumConfig::default();
        config.usage.log_path = dir.join("usage.jsonl").display().to_string();
        config
    }

    #[tokio::test]
    async fn test_stats_reads_configured_log() {
        let dir = tempdir().unwrap();
        let config = config_with_log(dir.path());
        UsageTracker::new(&config.usage.log_path)
            .unwrap()
            .record(&UsageEvent::from_message("MSH|1|2|3|4|5|6|7|ADT^A01", true, None))
            .unwrap();

        let args = StatsArgs {
            days: Some(7),
            json: true,
        };
        assert_eq!(args.execute(&config).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_stats_creates_missing_log() {
        let dir = tempdir().unwrap();
        let config = config_with_log(&dir.path().join("nested"));

        let args = StatsArgs {
            days: None,
            json: false,
        };
        assert_eq!(args.execute(&config).await.unwrap(), 0);
        assert!(std::path::Path::new(&config.usage.log_path).exists());
    }
}
