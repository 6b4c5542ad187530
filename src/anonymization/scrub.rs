//! Phone and literal scrubbers

use super::hashing::stable_hash;

/// Country calling code prefixed to every synthetic phone number
pub const PHONE_COUNTRY_CODE: &str = "+351";

/// Replacement for insurance company names
pub const INSURANCE_COMPANY: &str = "InsuranceCompany";

/// Replacement for employer names
pub const EMPLOYER: &str = "Employer";

/// Replacement for places of worship
pub const PLACE_OF_WORSHIP: &str = "PlaceOfWorship";

/// Replacement for clinic and organization names
pub const CLINIC: &str = "Clinic";

/// Replace a phone field with a synthetic nine-digit number
///
/// The whole field is replaced; punctuation, extensions and repetitions of
/// the original are discarded. Blank fields pass through.
pub fn phone(value: &str) -> String {
    if value.trim().is_empty() {
        return value.to_string();
    }
    format!(
        "{PHONE_COUNTRY_CODE}{:09}",
        stable_hash(value) % 1_000_000_000
    )
}
