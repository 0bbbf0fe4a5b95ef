// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Country, LocalizedName, StateProvince};
use std::collections::HashSet;

/// Maximum length of a state/province abbreviation, in characters.
pub const MAX_ABBREVIATION_LENGTH: usize = 100;

/// Normalizes an ISO code: surrounding whitespace removed, upper case.
#[must_use]
pub fn normalize_iso_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

fn validate_iso_code(field: &'static str, code: &str, length: usize) -> Result<(), DomainError> {
    let code: &str = code.trim();
    if code.len() != length || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DomainError::InvalidIsoCode {
            field,
            reason: format!("'{code}' must be exactly {length} ASCII letters"),
        });
    }
    Ok(())
}

/// Validates a list of localized names.
///
/// # Errors
///
/// Returns an error if:
/// - A language ID is not positive
/// - The same language ID appears more than once
pub fn validate_locales(locales: &[LocalizedName]) -> Result<(), DomainError> {
    let mut seen: HashSet<i64> = HashSet::new();
    for locale in locales {
        if locale.language_id <= 0 {
            return Err(DomainError::InvalidLocale(format!(
                "language ID must be positive, got {}",
                locale.language_id
            )));
        }
        if !seen.insert(locale.language_id) {
            return Err(DomainError::InvalidLocale(format!(
                "language ID {} appears more than once",
                locale.language_id
            )));
        }
    }
    Ok(())
}

/// Validates that a country's field constraints are met.
///
/// Does not check ISO code uniqueness; that is left to storage.
///
/// # Arguments
///
/// * `country` - The country to validate
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The two-letter ISO code is not exactly 2 ASCII letters
/// - The three-letter ISO code is not exactly 3 ASCII letters
/// - The numeric ISO code is outside `0..=999`
/// - The locales are malformed
pub fn validate_country_fields(country: &Country) -> Result<(), DomainError> {
    // Rule: name must not be empty
    if country.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    validate_iso_code("two_letter_iso_code", &country.two_letter_iso_code, 2)?;
    validate_iso_code("three_letter_iso_code", &country.three_letter_iso_code, 3)?;

    if !(0..=999).contains(&country.numeric_iso_code) {
        return Err(DomainError::InvalidNumericIsoCode(country.numeric_iso_code));
    }

    validate_locales(&country.locales)
}

/// Validates that a state/province's field constraints are met.
///
/// Does not check that the referenced country exists; that requires
/// storage access and is done by the workflow.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The abbreviation is longer than [`MAX_ABBREVIATION_LENGTH`]
/// - The locales are malformed
pub fn validate_state_province_fields(state: &StateProvince) -> Result<(), DomainError> {
    if state.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    let abbreviation_len: usize = state.abbreviation.chars().count();
    if abbreviation_len > MAX_ABBREVIATION_LENGTH {
        return Err(DomainError::InvalidAbbreviation(format!(
            "Abbreviation must be at most {MAX_ABBREVIATION_LENGTH} characters, got {abbreviation_len}"
        )));
    }

    validate_locales(&state.locales)
}

/// Checks that no other state/province in `siblings` shares `state`'s
/// name, ignoring case and surrounding whitespace.
///
/// `siblings` are the states already stored for the same country. A
/// sibling with the same `state_province_id` is the record itself and is
/// not a conflict.
///
/// # Errors
///
/// Returns [`DomainError::DuplicateStateProvinceName`] on a clash.
pub fn validate_unique_state_name(
    state: &StateProvince,
    siblings: &[StateProvince],
) -> Result<(), DomainError> {
    let clash: bool = siblings.iter().any(|other| {
        other.country_id == state.country_id
            && (state.state_province_id.is_none()
                || other.state_province_id != state.state_province_id)
            && other.has_name(&state.name)
    });
    if clash {
        return Err(DomainError::DuplicateStateProvinceName {
            country_id: state.country_id,
            name: state.name.trim().to_string(),
        });
    }
    Ok(())
}
