// Nubilum - HL7 v2 Message Anonymizer
// Copyright (c) 2025 Nubilum Contributors
// Licensed under the MIT License

//! # Nubilum - HL7 v2 Message Anonymizer
//!
//! Nubilum rewrites the identifying fields of HL7 v2 messages in ER7
//! (pipe-delimited) encoding with deterministic pseudo-values. Segment order,
//! segment count, field count and component layout are preserved, so the
//! output still parses as the same kind of message.
//!
//! ## Architecture
//!
//! - [`anonymization`] - ER7 segmenting, rule tables and the anonymization engine
//! - [`usage`] - Append-only usage log and statistics
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration management
//! - [`domain`] - Error and result types
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```
//! use nubilum::anonymization::AnonymizationEngine;
//!
//! let message = "MSH|^~\\&|LAB|HOSP|EHR|HOSP|20250107120000||ADT^A01|MSG1|P|2.5\n\
//!                PID|1||123456789^^^HOSPITAL^MR||Doe^John^Robert||19800515|M";
//!
//! let mut engine = AnonymizationEngine::new();
//! let anonymized = engine.anonymize_message(message);
//!
//! assert!(anonymized.contains("PID177939^^^HOSPITAL^MR"));
//! assert!(!anonymized.contains("Doe"));
//! ```
//!
//! ## Determinism
//!
//! Pseudonyms are derived from a SHA-256 hash of the original value, so the
//! same input always produces the same output, across engines and runs. Within
//! one message a repeated value maps to the same pseudonym.
//!
//! ## Batches
//!
//! Several messages concatenated in one document are split at each `MSH`
//! segment and anonymized independently:
//!
//! ```
//! use nubilum::anonymization::anonymize_batch;
//!
//! let batch = "MSH|^~\\&|A|B|C|D|20250107||ADT^A01|1|P|2.5\n\
//!              MSH|^~\\&|A|B|C|D|20250107||ORU^R01|2|P|2.5";
//! let outcome = anonymize_batch(batch);
//! assert_eq!(outcome.message_count(), 2);
//! ```

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod usage;
