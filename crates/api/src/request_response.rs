// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use serde::{Deserialize, Serialize};

/// A localized name as exchanged with API clients.
///
/// An entry whose `name` is blank means "no override" and is dropped when
/// the request is mapped onto a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedNameModel {
    /// The language the override applies to.
    pub language_id: i64,
    /// The localized name.
    #[serde(default)]
    pub name: String,
}

/// API request to create or update a country.
///
/// Any identifier supplied by the client is ignored; the target of an
/// update is named separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryModel {
    /// Display name in the default language.
    pub name: String,
    /// ISO 3166-1 alpha-2 code.
    pub two_letter_iso_code: String,
    /// ISO 3166-1 alpha-3 code.
    pub three_letter_iso_code: String,
    /// ISO 3166-1 numeric code.
    #[serde(default)]
    pub numeric_iso_code: i32,
    /// Whether billing addresses may use this country.
    #[serde(default = "default_true")]
    pub allows_billing: bool,
    /// Whether shipping addresses may use this country.
    #[serde(default = "default_true")]
    pub allows_shipping: bool,
    /// Whether VAT applies.
    #[serde(default)]
    pub subject_to_vat: bool,
    /// Whether the storefront shows this country.
    #[serde(default = "default_true")]
    pub published: bool,
    /// Sort key.
    #[serde(default)]
    pub display_order: i32,
    /// Localized name overrides.
    #[serde(default)]
    pub locales: Vec<LocalizedNameModel>,
    /// Stores the country is restricted to. Empty means all stores.
    #[serde(default)]
    pub store_ids: Vec<i64>,
}

/// API request to create or update a state/province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateProvinceModel {
    /// The owning country.
    pub country_id: i64,
    /// Display name in the default language.
    pub name: String,
    /// Postal abbreviation.
    #[serde(default)]
    pub abbreviation: String,
    /// Whether the storefront shows this state.
    #[serde(default = "default_true")]
    pub published: bool,
    /// Sort key.
    #[serde(default)]
    pub display_order: i32,
    /// Localized name overrides.
    #[serde(default)]
    pub locales: Vec<LocalizedNameModel>,
}

const fn default_true() -> bool {
    true
}

/// A persisted country as returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryInfo {
    /// The canonical country identifier.
    pub country_id: i64,
    pub name: String,
    pub two_letter_iso_code: String,
    pub three_letter_iso_code: String,
    pub numeric_iso_code: i32,
    pub allows_billing: bool,
    pub allows_shipping: bool,
    pub subject_to_vat: bool,
    pub published: bool,
    pub display_order: i32,
    /// Whether the country is restricted to specific stores.
    pub limited_to_stores: bool,
    pub store_ids: Vec<i64>,
    pub locales: Vec<LocalizedNameModel>,
    /// Number of states/provinces, hidden included.
    pub number_of_states: usize,
}

/// A persisted state/province as returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateProvinceInfo {
    /// The canonical state/province identifier.
    pub state_province_id: i64,
    pub country_id: i64,
    pub name: String,
    pub abbreviation: String,
    pub published: bool,
    pub display_order: i32,
    pub locales: Vec<LocalizedNameModel>,
}

/// API response listing countries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCountriesResponse {
    pub countries: Vec<CountryInfo>,
    /// Total number of countries returned.
    pub total: usize,
}

/// API response listing the states/provinces of one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStatesResponse {
    pub country_id: i64,
    pub states: Vec<StateProvinceInfo>,
    pub total: usize,
}

/// API response for a country create, load or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryResponse {
    pub country: CountryInfo,
    /// A localized success notification, when the operation changed data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// API response for a state/province create, load or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateProvinceResponse {
    pub state: StateProvinceInfo,
}

/// API response for a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// The identifier of the removed record.
    pub id: i64,
    /// A localized success notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// API request to publish or unpublish countries in bulk.
///
/// An absent or empty list is a successful no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPublishedRequest {
    #[serde(default)]
    pub selected_ids: Option<Vec<i64>>,
}

/// API response for a bulk publish/unpublish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPublishedResponse {
    /// The value `published` was set to.
    pub published: bool,
    /// How many countries were resolved and updated.
    pub updated_count: usize,
}

/// One entry of the address-form state drop-down.
///
/// Placeholder entries have an empty `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateOption {
    pub id: String,
    pub name: String,
}

impl StateOption {
    /// Creates a placeholder entry.
    #[must_use]
    pub fn placeholder(name: String) -> Self {
        Self {
            id: String::new(),
            name,
        }
    }
}

/// A state export, ready to be sent as a file download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportStatesResponse {
    pub file_name: String,
    pub content_type: String,
    pub content: String,
    /// Number of states written.
    pub exported_count: usize,
}

/// API response for a successful state import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStatesResponse {
    /// Number of rows that inserted or updated a state.
    pub imported_count: usize,
    /// A localized success notification.
    pub message: String,
}
