//! Anonymize command implementation
//!
//! This module implements the `anonymize` command: read ER7 text from files
//! or stdin, anonymize every message and write the result to stdout or a
//! file. Status output goes to stderr so stdout carries only messages.

use crate::anonymization::batch::MESSAGE_SEPARATOR;
use crate::anonymization::{anonymize_batch, BatchOutcome, BatchReport};
use crate::config::NubilumConfig;
use crate::domain::{NubilumError, Result};
use crate::usage::{UsageEvent, UsageTracker};
use crate::{log_anonymization_complete, log_error_with_context};
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::task::JoinSet;

/// Name used for standard input in reports and logs
const STDIN_NAME: &str = "<stdin>";

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Input files; reads stdin when none is given or for `-`
    pub files: Vec<PathBuf>,

    /// Write anonymized messages to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print a processing report to stderr
    #[arg(long)]
    pub report: bool,

    /// Do not record usage events
    #[arg(long)]
    pub no_usage: bool,
}

/// One input document
#[derive(Debug, Clone)]
pub struct InputText {
    /// File name, or `<stdin>`
    pub name: String,
    pub text: String,
}

/// Result for one input document
#[derive(Debug)]
pub struct InputOutcome {
    pub input: InputText,
    pub result: Result<BatchOutcome>,
}

/// Reject empty input and input above `max_bytes`
pub fn check_input(text: &str, max_bytes: usize) -> Result<()> {
    if text.trim().is_empty() {
        return Err(NubilumError::Input("No message provided".to_string()));
    }
    if text.len() > max_bytes {
        return Err(NubilumError::Input(format!(
            "Message exceeds maximum size of {max_bytes} bytes"
        )));
    }
    Ok(())
}

/// Anonymize every input on a blocking worker, inputs in parallel
///
/// Outcomes come back in input order. Each message inside an input gets its
/// own engine.
pub async fn process_inputs(
    inputs: Vec<InputText>,
    max_bytes: usize,
) -> anyhow::Result<Vec<InputOutcome>> {
    let mut tasks = JoinSet::new();
    let mut outcomes: Vec<Option<InputOutcome>> = Vec::with_capacity(inputs.len());

    for (index, input) in inputs.into_iter().enumerate() {
        if let Err(e) = check_input(&input.text, max_bytes) {
            tracing::warn!(input = %input.name, error = %e, "Rejected input");
            outcomes.push(Some(InputOutcome {
                input,
                result: Err(e),
            }));
            continue;
        }

        outcomes.push(None);
        tasks.spawn_blocking(move || {
            let outcome = anonymize_batch(&input.text);
            (index, input, outcome)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        let (index, input, outcome) = joined.context("Anonymization worker failed")?;
        tracing::debug!(
            input = %input.name,
            messages = outcome.message_count(),
            "Input anonymized"
        );
        outcomes[index] = Some(InputOutcome {
            input,
            result: Ok(outcome),
        });
    }

    Ok(outcomes.into_iter().flatten().collect())
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub async fn execute(&self, config: &NubilumConfig) -> anyhow::Result<i32> {
        let start = Instant::now();

        let inputs = self.read_inputs().await?;
        tracing::info!(inputs = inputs.len(), "Starting anonymization");

        let outcomes = process_inputs(inputs, config.input.max_message_bytes).await?;

        let mut report = BatchReport::new();
        let mut outputs = Vec::new();
        let mut rejected = 0usize;
        for outcome in &outcomes {
            match &outcome.result {
                Ok(batch) => {
                    for message in &batch.messages {
                        report.add_message(message);
                    }
                    outputs.push(batch.output.as_str());
                }
                Err(e) => {
                    rejected += 1;
                    report.add_warning(format!("{}: {e}", outcome.input.name));
                    eprintln!("⚠️  {}: {e}", outcome.input.name);
                }
            }
        }

        self.write_output(&outputs.join(MESSAGE_SEPARATOR)).await?;

        if !self.no_usage {
            record_usage(config, &outcomes);
        }

        if self.report {
            eprint!("{}", report.format_console());
        }

        log_anonymization_complete!(report.total_messages, rejected, start.elapsed());

        Ok(if rejected > 0 { 1 } else { 0 })
    }

    async fn read_inputs(&self) -> anyhow::Result<Vec<InputText>> {
        if self.files.is_empty() {
            return Ok(vec![read_stdin().await?]);
        }

        let mut inputs = Vec::with_capacity(self.files.len());
        for path in &self.files {
            if path.as_os_str() == "-" {
                inputs.push(read_stdin().await?);
            } else {
                inputs.push(read_file(path).await?);
            }
        }
        Ok(inputs)
    }

    async fn write_output(&self, text: &str) -> anyhow::Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        match &self.output {
            Some(path) => {
                tokio::fs::write(path, format!("{text}\n"))
                    .await
                    .with_context(|| format!("Failed to write output: {}", path.display()))?;
                eprintln!("✅ Anonymized output written to {}", path.display());
            }
            None => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(text.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }
        Ok(())
    }
}

async fn read_stdin() -> anyhow::Result<InputText> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read standard input")?;
    Ok(InputText {
        name: STDIN_NAME.to_string(),
        text,
    })
}

async fn read_file(path: &Path) -> anyhow::Result<InputText> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    Ok(InputText {
        name: path.display().to_string(),
        text,
    })
}

/// Record one event per message, or one failure per rejected input
///
/// Usage accounting never fails the run.
fn record_usage(config: &NubilumConfig, outcomes: &[InputOutcome]) {
    if !config.usage.enabled {
        return;
    }

    let tracker = match UsageTracker::new(&config.usage.log_path) {
        Ok(tracker) => tracker,
        Err(e) => {
            log_error_with_context!(&e, "Failed to open usage log");
            return;
        }
    };

    for outcome in outcomes {
        let events: Vec<UsageEvent> = match &outcome.result {
            Ok(batch) => batch
                .messages
                .iter()
                .map(UsageEvent::from_anonymized)
                .collect(),
            Err(e) => vec![UsageEvent::from_message(
                &outcome.input.text,
                false,
                Some(e.to_string()),
            )],
        };

        for event in &events {
            if let Err(e) = tracker.record(event) {
                log_error_with_context!(&e, "Failed to record usage event");
                return;
            }
        }
    }
}
