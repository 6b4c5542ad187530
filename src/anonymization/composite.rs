//! Composite field decomposition
//!
//! Composite fields are split on `^` and rewritten component by component.
//! Only the positions each rule knows about are touched; empty components and
//! components past those positions are left alone, and a field with fewer
//! components than expected is rewritten as far as it goes.

use super::er7::COMPONENT_SEPARATOR;
use super::hashing::stable_hash;
use super::pseudonym::{NameKind, PseudonymGenerator};

/// Replacement for the city component of an address
pub const CITY: &str = "City";

/// Replacement for the postal code component of an address
pub const POSTAL_CODE: &str = "12345";

/// Prefix prepended to a provider's synthetic family name
pub const PROVIDER_TITLE: &str = "Dr";

/// Split `field` into components, rewrite the non-empty ones selected by
/// `rewrite(position, component)`, and join them back
fn rewrite_components<F>(field: &str, mut rewrite: F) -> String
where
    F: FnMut(usize, &str) -> Option<String>,
{
    if field.trim().is_empty() {
        return field.to_string();
    }

    field
        .split(COMPONENT_SEPARATOR)
        .enumerate()
        .map(|(position, component)| {
            if component.is_empty() {
                return component.to_string();
            }
            rewrite(position, component).unwrap_or_else(|| component.to_string())
        })
        .collect::<Vec<_>>()
        .join(&COMPONENT_SEPARATOR.to_string())
}

/// Identifier composite (`ID^check^scheme^authority^type`): pseudonymize the ID
pub fn identifier(field: &str, prefix: &str, pseudonyms: &mut PseudonymGenerator) -> String {
    rewrite_components(field, |position, component| {
        (position == 0).then(|| pseudonyms.pseudo_identifier(component, prefix))
    })
}

/// Person name composite (`last^first^middle^...`)
///
/// The middle name is drawn from the first-name list.
pub fn person_name(field: &str, pseudonyms: &mut PseudonymGenerator) -> String {
    rewrite_components(field, |position, component| match position {
        0 => Some(pseudonyms.pseudo_name(component, NameKind::Last)),
        1 | 2 => Some(pseudonyms.pseudo_name(component, NameKind::First)),
        _ => None,
    })
}

/// Provider name composite
///
/// Component 0 becomes `Dr` plus a synthetic last name, component 1 a
/// synthetic first name.
pub fn provider_name(field: &str, pseudonyms: &mut PseudonymGenerator) -> String {
    rewrite_components(field, |position, component| match position {
        0 => Some(format!(
            "{PROVIDER_TITLE}{}",
            pseudonyms.pseudo_name(component, NameKind::Last)
        )),
        1 => Some(pseudonyms.pseudo_name(component, NameKind::First)),
        _ => None,
    })
}

/// Address composite
///
/// Component 0 (street) becomes `StreetNN`, component 1 becomes `City` and
/// component 3 becomes `12345`. A whitespace-only street is kept. Addresses
/// are not cached.
pub fn address(field: &str) -> String {
    rewrite_components(field, |position, component| match position {
        0 if component.trim().is_empty() => None,
        0 => Some(format!("Street{:02}", stable_hash(component) % 100)),
        1 => Some(CITY.to_string()),
        3 => Some(POSTAL_CODE.to_string()),
        _ => None,
    })
}
