//! Integration tests for the anonymization pipeline with synthetic HL7 v2 messages

use nubilum::anonymization::{
    anonymize_batch, split_messages, AnonymizationEngine, BatchReport,
};

/// Synthetic ADT^A01 with PHI in patient, next-of-kin, visit and insurance segments
const ADT_A01: &str = "MSH|^~\\&|SENDING_APP|SENDING_FAC|RECEIVING_APP|RECEIVING_FAC|20250107120000||ADT^A01|MSG00001|P|2.5\n\
EVN|A01|20250107120000\n\
PID|1||123456789^^^HOSPITAL^MR||Doe^John^Robert||19800515|M|||123 Main Street^^Lisbon^^1000-001^PT||+351912345678|||||ACC42|123-45-6789\n\
NK1|1|Doe^Jane|SPO|123 Main Street^^Lisbon^^1000-001^PT|+351912345678\n\
PV1|1|I|WARD1^ROOM1^BED1|||||DOC123^Johnson^Michael|||||||||||VISIT123456\n\
IN1|1|PLAN01|INS001|Acme Health|Some Street^^Porto|Doe^John|+351900000000|GRP7";

fn fields(segment: &str) -> Vec<&str> {
    segment.split('|').collect()
}

fn segment<'a>(message: &'a str, tag: &str) -> &'a str {
    message
        .lines()
        .find(|line| line.starts_with(tag))
        .unwrap_or_else(|| panic!("segment {tag} missing"))
}

#[test]
fn test_full_message_structure_preserved() {
    let output = AnonymizationEngine::new().anonymize_message(ADT_A01);

    let input_lines: Vec<_> = ADT_A01.lines().collect();
    let output_lines: Vec<_> = output.lines().collect();
    assert_eq!(input_lines.len(), output_lines.len());

    for (input, output) in input_lines.iter().zip(&output_lines) {
        assert_eq!(fields(input)[0], fields(output)[0]);
        assert_eq!(fields(input).len(), fields(output).len());
    }
}

#[test]
fn test_no_phi_survives() {
    let output = AnonymizationEngine::new().anonymize_message(ADT_A01);

    for phi in [
        "123456789",
        "Doe",
        "Robert",
        "19800515",
        "123 Main Street",
        "+351912345678",
        "123-45-6789",
        "ACC42",
        "DOC123",
        "Johnson",
        "VISIT123456",
        "Acme Health",
    ] {
        assert!(!output.contains(phi), "{phi} leaked into {output}");
    }
}

#[test]
fn test_patient_identification() {
    let output = AnonymizationEngine::new().anonymize_message(ADT_A01);
    let pid = fields(segment(&output, "PID"));

    assert_eq!(pid[3], "PID177939^^^HOSPITAL^MR");
    assert_eq!(pid[5], "Smith51^Unknown36^Demo33");
    assert_eq!(pid[7], "19800609");
    assert_eq!(pid[8], "M");
    assert_eq!(pid[11], "Street12^^Lisbon^^1000-001^PT");
    assert_eq!(pid[13], "+351008625273");
    assert!(pid[18].starts_with("ACCT"));
    assert_eq!(pid[19], "SSN608617");
}

#[test]
fn test_repeated_values_map_consistently() {
    let output = AnonymizationEngine::new().anonymize_message(ADT_A01);
    let pid = fields(segment(&output, "PID"));
    let nk1 = fields(segment(&output, "NK1"));
    let in1 = fields(segment(&output, "IN1"));

    // Same surname in PID-5, NK1-2 and IN1-6
    let patient_last = pid[5].split('^').next().unwrap();
    assert_eq!(nk1[2].split('^').next().unwrap(), patient_last);
    assert_eq!(in1[6].split('^').next().unwrap(), patient_last);

    // Same address and phone in PID and NK1
    assert_eq!(nk1[4], pid[11]);
    assert_eq!(nk1[5], pid[13]);
}

#[test]
fn test_visit_and_insurance() {
    let output = AnonymizationEngine::new().anonymize_message(ADT_A01);
    let pv1 = fields(segment(&output, "PV1"));
    let in1 = fields(segment(&output, "IN1"));

    assert_eq!(pv1[3], "WARD1^ROOM1^BED1");
    assert_eq!(pv1[8], "DrAnonymous84^John07^Michael");
    assert_eq!(pv1[19], "VISIT047788");

    assert_eq!(in1[2], "PLAN01");
    assert!(in1[3].starts_with("INS"));
    assert_eq!(in1[4], "InsuranceCompany");
    assert!(in1[5].starts_with("Street"));
    assert!(in1[8].starts_with("GROUP"));
}

#[test]
fn test_header_and_event_untouched() {
    let output = AnonymizationEngine::new().anonymize_message(ADT_A01);
    assert_eq!(segment(&output, "MSH"), segment(ADT_A01, "MSH"));
    assert_eq!(segment(&output, "EVN"), "EVN|A01|20250107120000");
}

#[test]
fn test_deterministic_across_engines() {
    let message = "PID|1||123^^^HOSP^MR||Doe^John^Robert||19800515|M";
    let first = AnonymizationEngine::new().anonymize_message(message);
    let second = AnonymizationEngine::new().anonymize_message(message);
    assert_eq!(first, second);
    assert_ne!(first, message);
}

#[test]
fn test_cache_consistency_within_message() {
    let message = "PID|1||123^^^HOSP^MR||Doe^John\nNK1|1|Doe^Mary";
    let mut engine = AnonymizationEngine::new();
    let output = engine.anonymize_message(message);

    let pid = fields(segment(&output, "PID"));
    let nk1 = fields(segment(&output, "NK1"));
    assert_eq!(pid[5].split('^').next(), nk1[2].split('^').next());
    assert_eq!(engine.pseudonyms().cached_names(), 3);
    assert_eq!(engine.pseudonyms().cached_identifiers(), 1);
}

#[test]
fn test_unknown_segment_passthrough() {
    let message = "MSH|^~\\&|A|B|C|D|20250107||ADT^A01|1|P|2.5\nZZZ|Doe^John|123456789|19800515";
    let output = AnonymizationEngine::new().anonymize_message(message);
    assert_eq!(output, message);
}

#[test]
fn test_invalid_date_passthrough() {
    let output = AnonymizationEngine::new().anonymize_message("PID|1||||||20251345");
    assert_eq!(output, "PID|1||||||20251345");
}

#[test]
fn test_batch_of_messages() {
    let second = ADT_A01.replace("MSG00001", "MSG00002").replace("ADT^A01", "ADT^A08");
    let batch = format!("{ADT_A01}\n{second}");

    assert_eq!(split_messages(&batch).len(), 2);

    let outcome = anonymize_batch(&batch);
    assert_eq!(outcome.message_count(), 2);
    assert_eq!(outcome.messages[0].message_type, "ADT^A01");
    assert_eq!(outcome.messages[1].message_type, "ADT^A08");

    let rendered: Vec<_> = outcome.output.split("\n\n").collect();
    assert_eq!(rendered.len(), 2);
    assert_eq!(rendered[0], outcome.messages[0].anonymized_text);

    // Each message is anonymized on its own but to the same pseudonyms
    let first_pid = segment(rendered[0], "PID");
    let second_pid = segment(rendered[1], "PID");
    assert_eq!(first_pid, second_pid);
}

#[test]
fn test_batch_report() {
    let second = ADT_A01.replace("ADT^A01", "ORU^R01");
    let outcome = anonymize_batch(&format!("{ADT_A01}\r\n{second}"));

    let mut report = BatchReport::new();
    for message in &outcome.messages {
        report.add_message(message);
    }

    assert_eq!(report.total_messages, 2);
    assert_eq!(report.total_segments, 12);
    assert_eq!(report.message_types.get("ADT^A01"), Some(&1));
    assert_eq!(report.message_types.get("ORU^R01"), Some(&1));
    assert!(report.total_fields_scrubbed > 0);
    assert!(report.format_console().contains("ANONYMIZATION REPORT"));

    let json: serde_json::Value = serde_json::from_str(&report.format_json().unwrap()).unwrap();
    assert_eq!(json["total_messages"], 2);
}
