//! HL7 v2 ER7 anonymization
//!
//! This module rewrites identifying fields of pipe-delimited HL7 v2 messages
//! with deterministic pseudo-values while keeping segment order, segment
//! count and field count intact.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! - **Segmenter**: splits text into segments and fields ([`er7`])
//! - **Dispatch**: per-segment rule tables ([`rules`])
//! - **Generators**: pseudonyms, composite fields, dates and phones
//!   ([`pseudonym`], [`composite`], [`dates`], [`scrub`])
//! - **Engine**: one message in, one message out ([`engine`])
//! - **Batch**: splits concatenated messages, one engine each ([`batch`])
//!
//! # Usage
//!
//! ```
//! use nubilum::anonymization::anonymize_batch;
//!
//! let outcome = anonymize_batch("MSH|^~\\&|A|B|C|D|20250107||ADT^A01|1|P|2.5\nPID|1||42^^^H^MR");
//! assert_eq!(outcome.messages.len(), 1);
//! assert_eq!(outcome.messages[0].message_type, "ADT^A01");
//! ```

pub mod batch;
pub mod composite;
pub mod dates;
pub mod engine;
pub mod er7;
pub mod hashing;
pub mod models;
pub mod pseudonym;
pub mod report;
pub mod rules;
pub mod scrub;

// Re-export main types
pub use batch::{anonymize_batch, split_messages, BatchOutcome};
pub use engine::AnonymizationEngine;
pub use er7::{message_type, segment_counts};
pub use models::AnonymizedMessage;
pub use report::BatchReport;
