// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A localized override of a record's `name` for one language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalizedName {
    /// The language this override applies to.
    pub language_id: i64,
    /// The localized name.
    pub name: String,
}

impl LocalizedName {
    /// Creates a new localized name entry.
    #[must_use]
    pub fn new(language_id: i64, name: &str) -> Self {
        Self {
            language_id,
            name: name.to_string(),
        }
    }
}

/// Returns the override for `language_id`, falling back to `default`.
fn localized<'a>(default: &'a str, locales: &'a [LocalizedName], language_id: i64) -> &'a str {
    locales
        .iter()
        .find(|l| l.language_id == language_id && !l.name.trim().is_empty())
        .map_or(default, |l| l.name.as_str())
}

/// A country record.
///
/// Countries gate which addresses may be used for billing and shipping,
/// and own the ordering of the country drop-downs on address forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Canonical internal identifier.
    /// `None` until the record has been persisted; immutable afterwards.
    pub country_id: Option<i64>,
    /// Display name in the default language.
    pub name: String,
    /// ISO 3166-1 alpha-2 code (e.g. `US`).
    pub two_letter_iso_code: String,
    /// ISO 3166-1 alpha-3 code (e.g. `USA`).
    pub three_letter_iso_code: String,
    /// ISO 3166-1 numeric code (e.g. `840`).
    pub numeric_iso_code: i32,
    /// Whether billing addresses may use this country.
    pub allows_billing: bool,
    /// Whether shipping addresses may use this country.
    pub allows_shipping: bool,
    /// Whether VAT rules apply to customers in this country.
    pub subject_to_vat: bool,
    /// Whether the storefront shows this country.
    pub published: bool,
    /// Sort key; lower values come first.
    pub display_order: i32,
    /// Localized overrides of `name`, in insertion order.
    pub locales: Vec<LocalizedName>,
    /// Stores this country is restricted to. Empty means every store.
    pub store_ids: BTreeSet<i64>,
}

impl Country {
    /// Creates a new, unpersisted country.
    ///
    /// New countries are published and allow both billing and shipping.
    #[must_use]
    pub fn new(name: &str, two_letter_iso_code: &str, three_letter_iso_code: &str) -> Self {
        Self {
            country_id: None,
            name: name.to_string(),
            two_letter_iso_code: two_letter_iso_code.to_string(),
            three_letter_iso_code: three_letter_iso_code.to_string(),
            numeric_iso_code: 0,
            allows_billing: true,
            allows_shipping: true,
            subject_to_vat: false,
            published: true,
            display_order: 0,
            locales: Vec::new(),
            store_ids: BTreeSet::new(),
        }
    }

    /// Returns whether this country is restricted to specific stores.
    #[must_use]
    pub fn is_limited_to_stores(&self) -> bool {
        !self.store_ids.is_empty()
    }
}

/// A state or province within a country.
///
/// `country_id` is a lookup key, not ownership: removing the country does
/// not remove its states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateProvince {
    /// Canonical internal identifier.
    /// `None` until the record has been persisted.
    pub state_province_id: Option<i64>,
    /// The country this state belongs to.
    pub country_id: i64,
    /// Display name in the default language.
    pub name: String,
    /// Postal abbreviation (e.g. `WA`).
    pub abbreviation: String,
    /// Whether the storefront shows this state.
    pub published: bool,
    /// Sort key; lower values come first.
    pub display_order: i32,
    /// Localized overrides of `name`, in insertion order.
    pub locales: Vec<LocalizedName>,
}

impl StateProvince {
    /// Creates a new, unpersisted, published state/province.
    #[must_use]
    pub fn new(country_id: i64, name: &str, abbreviation: &str) -> Self {
        Self {
            state_province_id: None,
            country_id,
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
            published: true,
            display_order: 0,
            locales: Vec::new(),
        }
    }

    /// Returns whether `name` denotes this state, ignoring case and
    /// surrounding whitespace.
    ///
    /// Together with `country_id` this is the natural key used by imports.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// Returns the name for `language_id`, or the default name when no
    /// override exists.
    #[must_use]
    pub fn localized_name(&self, language_id: i64) -> &str {
        localized(&self.name, &self.locales, language_id)
    }
}

/// A postal address.
///
/// Read-only from the reference-data workflow's perspective: addresses are
/// only counted to decide whether a country or state may be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Canonical internal identifier.
    pub address_id: Option<i64>,
    /// Referenced country, if any.
    pub country_id: Option<i64>,
    /// Referenced state/province, if any.
    pub state_province_id: Option<i64>,
    /// City.
    pub city: String,
    /// First address line.
    pub address1: String,
    /// Postal code.
    pub zip_postal_code: String,
}

impl Address {
    /// Creates a new, unpersisted address.
    #[must_use]
    pub fn new(country_id: Option<i64>, state_province_id: Option<i64>, city: &str) -> Self {
        Self {
            address_id: None,
            country_id,
            state_province_id,
            city: city.to_string(),
            address1: String::new(),
            zip_postal_code: String::new(),
        }
    }
}
