// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Human-readable text lookup.
//!
//! Workflow operations refer to user-facing text by resource key. A
//! [`Localizer`] turns the key into text for the current language and
//! names that language, so localized record names can be picked too.

use std::collections::HashMap;

/// Resource keys used by the reference-data workflow.
pub mod keys {
    /// Placeholder shown on storefront address forms.
    pub const SELECT_STATE: &str = "Address.SelectState";
    /// Placeholder shown on admin address forms.
    pub const ADMIN_SELECT_STATE: &str = "Admin.Address.SelectState";
    /// Placeholder for countries without states.
    pub const ADMIN_OTHER_NON_US: &str = "Admin.Address.OtherNonUS";
    /// Notification after a country or state is created.
    pub const COUNTRY_ADDED: &str = "Admin.Configuration.Countries.Added";
    /// Notification after a country or state is updated.
    pub const COUNTRY_UPDATED: &str = "Admin.Configuration.Countries.Updated";
    /// Notification after a country or state is deleted.
    pub const COUNTRY_DELETED: &str = "Admin.Configuration.Countries.Deleted";
    /// Refusal to delete a country that addresses still reference.
    pub const COUNTRY_CANT_DELETE_WITH_ADDRESSES: &str =
        "Admin.Configuration.Countries.CantDeleteWithAddresses";
    /// Refusal to delete a state that addresses still reference.
    pub const STATE_CANT_DELETE_WITH_ADDRESSES: &str =
        "Admin.Configuration.Countries.States.CantDeleteWithAddresses";
    /// Notification after a successful state import. `{0}` is the count.
    pub const IMPORT_SUCCESS: &str = "Admin.Configuration.Countries.ImportSuccess";
    /// Error for an empty upload.
    pub const UPLOAD_FILE: &str = "Admin.Common.UploadFile";
}

/// Looks up user-facing text by resource key.
pub trait Localizer {
    /// Returns the text for `key`.
    fn resource(&self, key: &str) -> String;

    /// The working language. `None` means record names are shown in the
    /// default language.
    fn language_id(&self) -> Option<i64> {
        None
    }
}

const DEFAULT_RESOURCES: &[(&str, &str)] = &[
    (keys::SELECT_STATE, "Select state"),
    (keys::ADMIN_SELECT_STATE, "Select state"),
    (keys::ADMIN_OTHER_NON_US, "Other (Non US)"),
    (keys::COUNTRY_ADDED, "The new country has been added successfully."),
    (keys::COUNTRY_UPDATED, "The country has been updated successfully."),
    (keys::COUNTRY_DELETED, "The country has been deleted successfully."),
    (
        keys::COUNTRY_CANT_DELETE_WITH_ADDRESSES,
        "The country can't be deleted. It has associated addresses",
    ),
    (
        keys::STATE_CANT_DELETE_WITH_ADDRESSES,
        "This state can't be deleted. It has associated addresses",
    ),
    (
        keys::IMPORT_SUCCESS,
        "{0} states have been successfully imported",
    ),
    (keys::UPLOAD_FILE, "Please upload a file"),
];

/// An in-memory resource catalog.
///
/// Starts from the built-in English texts; overrides replace individual
/// entries. Unknown keys resolve to the key itself.
#[derive(Debug, Clone)]
pub struct ResourceCatalog {
    resources: HashMap<String, String>,
    language_id: Option<i64>,
}

impl ResourceCatalog {
    /// Creates a catalog holding the built-in English texts.
    #[must_use]
    pub fn english() -> Self {
        Self {
            resources: DEFAULT_RESOURCES
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            language_id: None,
        }
    }

    /// Returns a copy of this catalog with `overrides` merged over it.
    #[must_use]
    pub fn with_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.resources.extend(overrides);
        self
    }

    /// Returns a copy of this catalog working in `language_id`.
    #[must_use]
    pub const fn with_language(mut self, language_id: i64) -> Self {
        self.language_id = Some(language_id);
        self
    }

    /// Number of known keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        Self::english()
    }
}

impl Localizer for ResourceCatalog {
    fn resource(&self, key: &str) -> String {
        self.resources
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    fn language_id(&self) -> Option<i64> {
        self.language_id
    }
}

/// Substitutes `{0}` in a resource text.
#[must_use]
pub fn format_resource(template: &str, arg: impl std::fmt::Display) -> String {
    template.replace("{0}", &arg.to_string())
}
