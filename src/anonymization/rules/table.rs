//! Per-segment rule tables
//!
//! Field indices are HL7 positions: index `n` is field `SEG-n`. Rules run in
//! table order.
//!
//! PID, NK1, PV1, PV2, ORC, OBR, OBX and EVN form the core catalogue. MRG,
//! PD1, SCH, AIG, AIP, IN1, IN2, GT1, ROL, CSR, DG1 and PR1 extend it to the
//! remaining identifying categories; the HL7 meaning of each of their fields
//! is noted beside the rule.

use super::super::scrub::{CLINIC, EMPLOYER, INSURANCE_COMPANY, PLACE_OF_WORSHIP};
use super::FieldRule;
use super::RuleKind::{
    Address, CompositeIdentifier, Date, Identifier, Literal, PersonName, Phone, ProviderIfComposite,
    ProviderName,
};

const fn at(index: usize, kind: super::RuleKind) -> FieldRule {
    FieldRule::at(index, kind)
}

pub(super) const PID: &[FieldRule] = &[
    at(3, CompositeIdentifier("PID")),
    at(5, PersonName),
    at(6, PersonName),
    at(7, Date),
    at(9, PersonName),
    at(11, Address),
    at(13, Phone),
    at(14, Phone),
    at(18, Identifier("ACCT")),
    at(19, Identifier("SSN")),
];

pub(super) const MRG: &[FieldRule] = &[
    at(1, CompositeIdentifier("PID")), // prior patient identifier list
    at(3, CompositeIdentifier("ACCT")), // prior patient account number
    at(5, CompositeIdentifier("VISIT")), // prior visit number
    at(7, PersonName), // prior patient name
];

pub(super) const PD1: &[FieldRule] = &[
    at(3, Literal(CLINIC)), // patient primary facility
    at(4, ProviderName), // patient primary care provider
    at(14, Literal(PLACE_OF_WORSHIP)), // place of worship
];

pub(super) const NK1: &[FieldRule] = &[at(2, PersonName), at(4, Address), at(5, Phone)];

pub(super) const PV1: &[FieldRule] = &[
    at(7, ProviderName),
    at(8, ProviderName),
    at(9, ProviderName),
    at(17, ProviderName),
    at(19, Identifier("VISIT")),
];

pub(super) const PV2: &[FieldRule] = &[FieldRule::starting_at(1, ProviderIfComposite)];

/// Shared by ORC and OBR
pub(super) const ORDER: &[FieldRule] = &[
    at(2, Identifier("ORDER")),
    at(3, Identifier("ORDER")),
    at(10, ProviderName),
    at(12, ProviderName),
];

pub(super) const OBX: &[FieldRule] = &[at(16, ProviderName)];

pub(super) const SCH: &[FieldRule] = &[
    at(1, CompositeIdentifier("APPT")), // placer appointment ID
    at(2, CompositeIdentifier("APPT")), // filler appointment ID
    at(12, PersonName), // placer contact person
    at(13, Phone), // placer contact phone
    at(14, Address), // placer contact address
    at(16, ProviderName), // filler contact person
    at(17, Phone), // filler contact phone
    at(18, Address), // filler contact address
    at(20, ProviderName), // entered by person
    at(21, Phone), // entered by phone
    at(23, CompositeIdentifier("ORDER")), // parent placer appointment ID
    at(24, CompositeIdentifier("ORDER")), // parent filler appointment ID
];

pub(super) const AIG: &[FieldRule] = &[
    at(3, ProviderName), // resource ID
];

pub(super) const AIP: &[FieldRule] = &[
    at(3, ProviderName), // personnel resource ID
];

pub(super) const IN1: &[FieldRule] = &[
    at(3, CompositeIdentifier("INS")), // insurance company ID
    at(4, Literal(INSURANCE_COMPANY)), // insurance company name
    at(5, Address), // insurance company address
    at(6, PersonName), // insurance co contact person
    at(7, Phone), // insurance co phone
    at(8, Identifier("GROUP")), // group number
    at(11, Literal(EMPLOYER)), // insured group employer name
    at(16, PersonName), // name of insured
    at(18, Date), // insured date of birth
    at(19, Address), // insured address
    at(36, Identifier("POLICY")), // policy number
    at(49, CompositeIdentifier("INS")), // insured ID number
];

pub(super) const IN2: &[FieldRule] = &[
    at(2, Identifier("SSN")), // insured social security number
    at(6, Identifier("MEDICARE")), // Medicare health ins card number
    at(8, Identifier("MEDICAID")), // Medicaid case number
];

pub(super) const GT1: &[FieldRule] = &[
    at(2, CompositeIdentifier("GT")), // guarantor number
    at(3, PersonName), // guarantor name
    at(4, PersonName), // guarantor spouse name
    at(5, Address), // guarantor address
    at(6, Phone), // guarantor home phone
    at(7, Phone), // guarantor business phone
    at(8, Date), // guarantor date of birth
    at(12, Identifier("SSN")), // guarantor SSN
    at(16, Literal(EMPLOYER)), // guarantor employer name
    at(17, Address), // guarantor employer address
    at(18, Phone), // guarantor employer phone
    at(19, CompositeIdentifier("EMP")), // guarantor employee ID
];

pub(super) const ROL: &[FieldRule] = &[
    at(4, ProviderName), // role person
    at(11, Address), // office/home address
    at(12, Phone), // phone
];

pub(super) const CSR: &[FieldRule] = &[
    at(4, CompositeIdentifier("STUDY")), // sponsor patient ID
    at(5, CompositeIdentifier("STUDY")), // alternate patient ID
    at(6, Date), // date of patient study registration
    at(7, ProviderName), // person performing study registration
    at(8, ProviderName), // study authorizing provider
    at(9, Date), // date patient study consent signed
];

pub(super) const DG1: &[FieldRule] = &[
    at(5, Date), // diagnosis date/time
    at(16, ProviderName), // diagnosing clinician
];

pub(super) const PR1: &[FieldRule] = &[
    at(5, Date), // procedure date/time
    at(8, ProviderName), // anesthesiologist
    at(11, ProviderName), // surgeon
    at(12, ProviderName), // procedure practitioner
];

pub(super) const EVN: &[FieldRule] = &[FieldRule::starting_at(1, ProviderIfComposite)];
