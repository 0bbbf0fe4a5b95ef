// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types for country and state/province reference data.
//!
//! This crate is pure: it holds the record shapes and the field-level
//! rules a record must satisfy before it may be persisted. It performs
//! no I/O and knows nothing about storage or transport.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use types::{Address, Country, LocalizedName, StateProvince};
pub use validation::{
    MAX_ABBREVIATION_LENGTH, normalize_iso_code, validate_country_fields, validate_locales,
    validate_state_province_fields, validate_unique_state_name,
};
