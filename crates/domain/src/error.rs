// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Name is empty or invalid.
    #[error("Invalid name: {0}")]
    InvalidName(String),
    /// An ISO code field does not have the required shape.
    #[error("Invalid {field}: {reason}")]
    InvalidIsoCode {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// Numeric ISO code is outside `0..=999`.
    #[error("Invalid numeric ISO code: {0}. Must be between 0 and 999")]
    InvalidNumericIsoCode(i32),
    /// Abbreviation is invalid.
    #[error("Invalid abbreviation: {0}")]
    InvalidAbbreviation(String),
    /// A localized name entry is malformed.
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),
    /// Another state/province of the same country already has this name,
    /// ignoring case.
    #[error("State/province '{name}' already exists in country {country_id}")]
    DuplicateStateProvinceName {
        /// The country both states belong to.
        country_id: i64,
        /// The conflicting name.
        name: String,
    },
    /// Country does not exist.
    #[error("Country {0} not found")]
    CountryNotFound(i64),
    /// State/province does not exist.
    #[error("State/province {0} not found")]
    StateProvinceNotFound(i64),
    /// Country is still referenced by addresses.
    #[error("Country {country_id} can't be deleted: it has {address_count} associated address(es)")]
    CountryInUse {
        /// The country that was to be deleted.
        country_id: i64,
        /// Number of addresses referencing it.
        address_count: usize,
    },
    /// State/province is still referenced by addresses.
    #[error(
        "State/province {state_province_id} can't be deleted: it has {address_count} associated address(es)"
    )]
    StateProvinceInUse {
        /// The state/province that was to be deleted.
        state_province_id: i64,
        /// Number of addresses referencing it.
        address_count: usize,
    },
}
