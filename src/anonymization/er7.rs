//! ER7 segmenter and reassembler
//!
//! Splits pipe-delimited HL7 v2 text into [`Segment`]s and joins them back.
//! The segmenter is lenient: it never rejects input. Blank lines are dropped
//! and every other line becomes a segment, whatever its tag.

use std::collections::BTreeMap;

/// Separator between fields of a segment
pub const FIELD_SEPARATOR: char = '|';

/// Separator between components of a composite field
pub const COMPONENT_SEPARATOR: char = '^';

/// Tag of the message header segment
pub const HEADER_TAG: &str = "MSH";

/// Separator used when rejoining segments
pub const SEGMENT_TERMINATOR: &str = "\n";

/// Reported when a header segment has an empty message type field
pub const UNKNOWN_MESSAGE_TYPE: &str = "UNKNOWN";

/// Reported when no header segment carries a message type field
pub const NO_HEADER_SEGMENT: &str = "NO_MSH_SEGMENT";

/// Index of the message type field in the header segment
const MESSAGE_TYPE_FIELD: usize = 8;

/// One line of an ER7 message
///
/// Field 0 is the segment tag. The number of fields is fixed at parse time:
/// fields can be rewritten in place but never added or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    fields: Vec<String>,
}

impl Segment {
    /// Parse a single (already trimmed) line, preserving empty fields
    pub fn parse(line: &str) -> Self {
        Self {
            fields: line.split(FIELD_SEPARATOR).map(str::to_owned).collect(),
        }
    }

    /// Segment type tag (e.g. `PID`)
    pub fn tag(&self) -> &str {
        self.fields.first().map(String::as_str).unwrap_or_default()
    }

    /// Number of fields, tag included
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Field at `index`, if the segment is long enough
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Replace the field at `index`; out-of-range indices are ignored
    pub fn set_field(&mut self, index: usize, value: String) {
        if let Some(slot) = self.fields.get_mut(index) {
            *slot = value;
        }
    }

    /// All fields, tag included
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Render the segment back to ER7
    pub fn to_er7(&self) -> String {
        self.fields.join(&FIELD_SEPARATOR.to_string())
    }
}

/// Split message text into segments
///
/// Lines are separated by `\n` or `\r`; each line is trimmed and blank lines
/// are dropped.
pub fn split(text: &str) -> Vec<Segment> {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Segment::parse)
        .collect()
}

/// Join segments back into message text
pub fn join(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(Segment::to_er7)
        .collect::<Vec<_>>()
        .join(SEGMENT_TERMINATOR)
}

/// Extract the message type (e.g. `ADT^A01`) from the first usable header segment
pub fn message_type(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|line| line.starts_with(HEADER_TAG))
        .find_map(|line| {
            line.split(FIELD_SEPARATOR)
                .nth(MESSAGE_TYPE_FIELD)
                .map(|field| match field.trim() {
                    "" => UNKNOWN_MESSAGE_TYPE.to_string(),
                    value => value.to_string(),
                })
        })
        .unwrap_or_else(|| NO_HEADER_SEGMENT.to_string())
}

/// Count segments per tag
///
/// Only lines containing a field separator and a non-empty tag are counted.
pub fn segment_counts(text: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for line in text.split(['\r', '\n']).map(str::trim) {
        if !line.contains(FIELD_SEPARATOR) {
            continue;
        }
        let tag = line.split(FIELD_SEPARATOR).next().unwrap_or_default();
        if !tag.is_empty() {
            *counts.entry(tag.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADT: &str = "MSH|^~\\&|APP|FAC|RCV|RFAC|20250107120000||ADT^A01|MSG00001|P|2.5\n\
EVN|A01|20250107120000\n\
PID|1||123^^^HOSP^MR||Doe^John||19800515|M";

    #[test]
    fn test_split_preserves_empty_fields() {
        let segments = split("PID|1||123|||");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].tag(), "PID");
        assert_eq!(segments[0].field_count(), 7);
        assert_eq!(segments[0].field(2), Some(""));
        assert_eq!(segments[0].field(7), None);
    }

    #[test]
    fn test_split_drops_blank_lines_and_trims() {
        let segments = split("  MSH|a  \n\n   \r\nPID|1\r\n");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].to_er7(), "MSH|a");
        assert_eq!(segments[1].to_er7(), "PID|1");
    }

    #[test]
    fn test_split_carriage_return_only() {
        let segments = split("MSH|a\rPID|1\rPV1|1");
        let tags: Vec<_> = segments.iter().map(Segment::tag).collect();
        assert_eq!(tags, vec!["MSH", "PID", "PV1"]);
    }

    #[test]
    fn test_join_roundtrip_is_identity_for_clean_text() {
        assert_eq!(join(&split(ADT)), ADT);
    }

    #[test]
    fn test_set_field_ignores_out_of_range() {
        let mut segment = Segment::parse("ZZZ|foo|bar");
        segment.set_field(1, "baz".to_string());
        segment.set_field(10, "ignored".to_string());
        assert_eq!(segment.to_er7(), "ZZZ|baz|bar");
    }

    #[test]
    fn test_message_type() {
        assert_eq!(message_type(ADT), "ADT^A01");
        assert_eq!(message_type("MSH|^~\\&|A|B|C|D|E||   |X"), UNKNOWN_MESSAGE_TYPE);
        assert_eq!(message_type("MSH|^~\\&|A"), NO_HEADER_SEGMENT);
        assert_eq!(message_type("PID|1"), NO_HEADER_SEGMENT);
        assert_eq!(message_type(""), NO_HEADER_SEGMENT);
    }

    #[test]
    fn test_segment_counts() {
        let counts = segment_counts("MSH|x\nOBX|1\nOBX|2\nnot a segment\n|orphan\n");
        assert_eq!(counts.get("MSH"), Some(&1));
        assert_eq!(counts.get("OBX"), Some(&2));
        assert_eq!(counts.len(), 2);
    }
}
