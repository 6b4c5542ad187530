//! Segment rule table and dispatcher
//!
//! Each supported segment type carries a fixed, ordered list of
//! [`FieldRule`]s naming which field positions are identifying and how each
//! one is scrubbed. [`dispatch`] looks the table up by segment tag and
//! rewrites the matching fields in place. Segments with unknown tags are left
//! untouched.
//!
//! # Examples
//!
//! ```
//! use nubilum::anonymization::er7::Segment;
//! use nubilum::anonymization::pseudonym::PseudonymGenerator;
//! use nubilum::anonymization::rules::{dispatch, SegmentKind};
//!
//! let mut pseudonyms = PseudonymGenerator::new();
//! let mut segment = Segment::parse("PID|1||123^^^HOSP^MR||Doe^John");
//!
//! assert_eq!(SegmentKind::from_tag(segment.tag()), Some(SegmentKind::Pid));
//! let applied = dispatch(&mut segment, &mut pseudonyms);
//! assert_eq!(applied.len(), 2);
//! assert_eq!(segment.field_count(), 6);
//! ```

mod table;

use super::composite;
use super::dates;
use super::er7::{Segment, COMPONENT_SEPARATOR};
use super::pseudonym::PseudonymGenerator;
use super::scrub;
use std::fmt;
use std::ops::Range;

/// How an identifying field is scrubbed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Whole field becomes a synthetic identifier with the given prefix
    Identifier(&'static str),
    /// Component 0 of an identifier composite becomes a synthetic identifier
    CompositeIdentifier(&'static str),
    /// Patient-style `last^first^middle` name
    PersonName,
    /// Provider name, rendered with a `Dr` prefix
    ProviderName,
    /// Street/city/postal code address
    Address,
    /// Telephone number
    Phone,
    /// Date or datetime
    Date,
    /// Fixed replacement token, independent of the original value
    Literal(&'static str),
    /// Provider name, applied only to fields containing a component separator
    ProviderIfComposite,
}

impl RuleKind {
    /// Short label used in statistics and reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Identifier(_) | Self::CompositeIdentifier(_) => "identifier",
            Self::PersonName => "person_name",
            Self::ProviderName | Self::ProviderIfComposite => "provider_name",
            Self::Address => "address",
            Self::Phone => "phone",
            Self::Date => "date",
            Self::Literal(_) => "literal",
        }
    }

    /// Whether the rule rewrites empty or whitespace-only fields
    ///
    /// Only whole-field identifiers do: they yield the `prefix000000`
    /// placeholder.
    pub fn acts_on_empty(&self) -> bool {
        matches!(self, Self::Identifier(_))
    }

    /// Scrub a single field value
    ///
    /// Returns `None` when the rule does not apply to this value.
    pub fn apply(&self, value: &str, pseudonyms: &mut PseudonymGenerator) -> Option<String> {
        let scrubbed = match *self {
            Self::Identifier(prefix) => pseudonyms.pseudo_identifier(value, prefix),
            Self::CompositeIdentifier(prefix) => composite::identifier(value, prefix, pseudonyms),
            Self::PersonName => composite::person_name(value, pseudonyms),
            Self::ProviderName => composite::provider_name(value, pseudonyms),
            Self::Address => composite::address(value),
            Self::Phone => scrub::phone(value),
            Self::Date => dates::shift_date(value),
            Self::Literal(token) => token.to_string(),
            Self::ProviderIfComposite => {
                if !value.contains(COMPONENT_SEPARATOR) {
                    return None;
                }
                composite::provider_name(value, pseudonyms)
            }
        };
        Some(scrubbed)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(prefix) => write!(f, "identifier({prefix})"),
            Self::CompositeIdentifier(prefix) => write!(f, "composite_identifier({prefix})"),
            Self::Literal(token) => write!(f, "literal({token})"),
            Self::ProviderIfComposite => write!(f, "provider_name_if_composite"),
            other => f.write_str(other.label()),
        }
    }
}

/// Field positions a rule covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSpan {
    /// A single field index
    At(usize),
    /// Every field from this index to the end of the segment
    From(usize),
}

impl FieldSpan {
    /// Indices covered within a segment of `field_count` fields
    pub fn indices(&self, field_count: usize) -> Range<usize> {
        match *self {
            Self::At(index) if index < field_count => index..index + 1,
            Self::At(_) => 0..0,
            Self::From(start) => start.min(field_count)..field_count,
        }
    }
}

/// One entry of a segment's rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub span: FieldSpan,
    pub kind: RuleKind,
}

impl FieldRule {
    /// Rule for a single field index
    pub const fn at(index: usize, kind: RuleKind) -> Self {
        Self {
            span: FieldSpan::At(index),
            kind,
        }
    }

    /// Rule for every field from `index` onward
    pub const fn starting_at(index: usize, kind: RuleKind) -> Self {
        Self {
            span: FieldSpan::From(index),
            kind,
        }
    }
}

/// Segment types with identifying fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Patient identification
    Pid,
    /// Merge patient information
    Mrg,
    /// Patient additional demographics
    Pd1,
    /// Next of kin / associated parties
    Nk1,
    /// Patient visit
    Pv1,
    /// Patient visit, additional information
    Pv2,
    /// Common order
    Orc,
    /// Observation request
    Obr,
    /// Observation/result
    Obx,
    /// Scheduling activity information
    Sch,
    /// Appointment information, general resource
    Aig,
    /// Appointment information, personnel resource
    Aip,
    /// Insurance
    In1,
    /// Insurance, additional information
    In2,
    /// Guarantor
    Gt1,
    /// Role
    Rol,
    /// Clinical study registration
    Csr,
    /// Diagnosis
    Dg1,
    /// Procedures
    Pr1,
    /// Event type
    Evn,
}

impl SegmentKind {
    /// Every segment type with a rule table
    pub const ALL: [SegmentKind; 20] = [
        Self::Pid,
        Self::Mrg,
        Self::Pd1,
        Self::Nk1,
        Self::Pv1,
        Self::Pv2,
        Self::Orc,
        Self::Obr,
        Self::Obx,
        Self::Sch,
        Self::Aig,
        Self::Aip,
        Self::In1,
        Self::In2,
        Self::Gt1,
        Self::Rol,
        Self::Csr,
        Self::Dg1,
        Self::Pr1,
        Self::Evn,
    ];

    /// Look up a segment type by its tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Segment tag as it appears on the wire
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Pid => "PID",
            Self::Mrg => "MRG",
            Self::Pd1 => "PD1",
            Self::Nk1 => "NK1",
            Self::Pv1 => "PV1",
            Self::Pv2 => "PV2",
            Self::Orc => "ORC",
            Self::Obr => "OBR",
            Self::Obx => "OBX",
            Self::Sch => "SCH",
            Self::Aig => "AIG",
            Self::Aip => "AIP",
            Self::In1 => "IN1",
            Self::In2 => "IN2",
            Self::Gt1 => "GT1",
            Self::Rol => "ROL",
            Self::Csr => "CSR",
            Self::Dg1 => "DG1",
            Self::Pr1 => "PR1",
            Self::Evn => "EVN",
        }
    }

    /// Identifying-field category the segment belongs to
    pub fn category(&self) -> &'static str {
        match self {
            Self::Pid | Self::Mrg => "patient identification",
            Self::Pd1 => "demographics",
            Self::Nk1 => "next of kin",
            Self::Pv1 | Self::Pv2 => "visit",
            Self::Orc | Self::Obr => "orders/results",
            Self::Obx => "observations",
            Self::Sch | Self::Aig | Self::Aip => "scheduling/resources",
            Self::In1 | Self::In2 => "insurance",
            Self::Gt1 => "guarantor",
            Self::Rol => "role assignment",
            Self::Csr => "clinical trial participant",
            Self::Dg1 => "diagnosis",
            Self::Pr1 => "procedure",
            Self::Evn => "event/audit",
        }
    }

    /// Ordered rule table for this segment type
    pub fn rules(&self) -> &'static [FieldRule] {
        match self {
            Self::Pid => table::PID,
            Self::Mrg => table::MRG,
            Self::Pd1 => table::PD1,
            Self::Nk1 => table::NK1,
            Self::Pv1 => table::PV1,
            Self::Pv2 => table::PV2,
            Self::Orc | Self::Obr => table::ORDER,
            Self::Obx => table::OBX,
            Self::Sch => table::SCH,
            Self::Aig => table::AIG,
            Self::Aip => table::AIP,
            Self::In1 => table::IN1,
            Self::In2 => table::IN2,
            Self::Gt1 => table::GT1,
            Self::Rol => table::ROL,
            Self::Csr => table::CSR,
            Self::Dg1 => table::DG1,
            Self::Pr1 => table::PR1,
            Self::Evn => table::EVN,
        }
    }
}

/// A field rewritten by [`dispatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedRule {
    pub index: usize,
    pub kind: RuleKind,
}

/// Apply the segment's rule table in place
///
/// Returns the rules that rewrote a field, in table order. Indices beyond the
/// segment's field count are skipped, as are empty fields unless the rule
/// [acts on empty fields](RuleKind::acts_on_empty). The field count never
/// changes.
pub fn dispatch(segment: &mut Segment, pseudonyms: &mut PseudonymGenerator) -> Vec<AppliedRule> {
    let Some(kind) = SegmentKind::from_tag(segment.tag()) else {
        return Vec::new();
    };

    let mut applied = Vec::new();
    for rule in kind.rules() {
        for index in rule.span.indices(segment.field_count()) {
            let Some(value) = segment.field(index) else {
                continue;
            };
            if value.trim().is_empty() && !rule.kind.acts_on_empty() {
                continue;
            }
            if let Some(scrubbed) = rule.kind.apply(value, pseudonyms) {
                segment.set_field(index, scrubbed);
                applied.push(AppliedRule {
                    index,
                    kind: rule.kind,
                });
            }
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use test_case::test_case;

    fn scrub_line(line: &str) -> String {
        let mut segment = Segment::parse(line);
        dispatch(&mut segment, &mut PseudonymGenerator::new());
        segment.to_er7()
    }

    #[test]
    fn test_from_tag_roundtrip() {
        for kind in SegmentKind::ALL {
            assert_eq!(SegmentKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(SegmentKind::from_tag("MSH"), None);
        assert_eq!(SegmentKind::from_tag("pid"), None);
    }

    #[test]
    fn test_tables_have_no_duplicate_indices() {
        for kind in SegmentKind::ALL {
            let mut seen = HashSet::new();
            for rule in kind.rules() {
                assert!(seen.insert(rule.span), "{} repeats {:?}", kind.tag(), rule.span);
                if let FieldSpan::At(index) = rule.span {
                    assert!(index > 0, "{} rule targets the tag", kind.tag());
                }
            }
            assert!(!kind.rules().is_empty());
        }
    }

    #[test]
    fn test_field_span_indices() {
        assert_eq!(FieldSpan::At(3).indices(5), 3..4);
        assert_eq!(FieldSpan::At(5).indices(5), 0..0);
        assert_eq!(FieldSpan::From(1).indices(4), 1..4);
        assert_eq!(FieldSpan::From(9).indices(4), 4..4);
    }

    #[test_case("ZZZ|foo|bar" ; "unknown tag")]
    #[test_case("MSH|^~\\&|APP|FAC|RCV|RFAC|20250107||ADT^A01|1|P|2.5" ; "header")]
    #[test_case("PID|1" ; "short segment")]
    #[test_case("PID" ; "tag only")]
    #[test_case("NK1|1||||" ; "empty fields")]
    #[test_case("PD1|||  " ; "whitespace literal field")]
    fn test_segment_untouched(line: &str) {
        assert_eq!(scrub_line(line), line);
    }

    #[test]
    fn test_whole_field_identifier_acts_on_empty() {
        // PID-18 and PID-19 present but empty
        let line = format!("PID{}", "|".repeat(19));
        let scrubbed = scrub_line(&line);
        let fields: Vec<_> = scrubbed.split('|').collect();
        assert_eq!(fields.len(), 20);
        assert_eq!(fields[18], "ACCT000000");
        assert_eq!(fields[19], "SSN000000");
        assert!(fields[1..18].iter().all(|f| f.is_empty()));
    }

    #[test]
    fn test_whole_field_identifier_discards_components() {
        let line = format!("PID{}987654321^^^HOSPITAL^AN", "|".repeat(18));
        let scrubbed = scrub_line(&line);
        let fields: Vec<_> = scrubbed.split('|').collect();
        assert_eq!(fields.len(), 19);
        assert!(fields[18].starts_with("ACCT"));
        assert_eq!(fields[18].len(), "ACCT".len() + 6);
    }

    #[test]
    fn test_conditional_rule_only_touches_composites() {
        let scrubbed = scrub_line("EVN|A01|20250107120000|||OPERATOR123^Smith^John");
        let fields: Vec<_> = scrubbed.split('|').collect();
        assert_eq!(&fields[..5], &["EVN", "A01", "20250107120000", "", ""]);
        assert!(fields[5].starts_with(super::composite::PROVIDER_TITLE));
        assert_eq!(fields[5].split('^').count(), 3);
        assert!(fields[5].ends_with("^John"));
    }

    #[test]
    fn test_literal_ignores_original_value() {
        let a = scrub_line("PD1|||General Hospital^^123|||||||||||Our Lady");
        let b = scrub_line("PD1|||Other Clinic|||||||||||Temple");
        let fields_a: Vec<_> = a.split('|').collect();
        let fields_b: Vec<_> = b.split('|').collect();
        assert_eq!(fields_a[3], scrub::CLINIC);
        assert_eq!(fields_b[3], scrub::CLINIC);
        assert_eq!(fields_a[14], scrub::PLACE_OF_WORSHIP);
        assert_eq!(fields_b[14], scrub::PLACE_OF_WORSHIP);
    }

    #[test]
    fn test_provider_if_composite_apply() {
        let mut pseudonyms = PseudonymGenerator::new();
        assert_eq!(RuleKind::ProviderIfComposite.apply("A01", &mut pseudonyms), None);
        assert_eq!(
            RuleKind::ProviderIfComposite.apply("DOC123^Johnson", &mut pseudonyms),
            Some(String::from("DrAnonymous84^John07"))
        );
    }

    #[test]
    fn test_rule_kind_display() {
        assert_eq!(RuleKind::Identifier("SSN").to_string(), "identifier(SSN)");
        assert_eq!(RuleKind::Phone.to_string(), "phone");
        assert_eq!(RuleKind::Literal("Employer").to_string(), "literal(Employer)");
        assert_eq!(RuleKind::ProviderName.label(), "provider_name");
    }

    #[test]
    fn test_dispatch_reports_applied_rules() {
        let mut segment =
            Segment::parse("NK1|1|Doe^Jane^|SPO|456 Oak Avenue^^Porto|+351918765432");
        let applied = dispatch(&mut segment, &mut PseudonymGenerator::new());
        let indices: Vec<_> = applied.iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![2, 4, 5]);
        assert_eq!(applied[0].kind, RuleKind::PersonName);
        assert_eq!(segment.field_count(), 6);
        assert_eq!(segment.field(3), Some("SPO"));
    }
}
