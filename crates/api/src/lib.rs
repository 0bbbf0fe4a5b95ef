// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for country and state/province reference data.
//!
//! This crate holds the reference-data workflow: permission checks,
//! input validation, the address integrity guard on delete, the
//! address-form state lookup and the CSV import/export round trip. It is
//! transport-agnostic; the server crate maps it onto HTTP.

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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod csv_codec;
mod error;
mod handlers;
mod localization;
mod mapping;
mod request_response;
mod store;

#[cfg(test)]
mod tests;

pub use auth::{
    AuthenticatedActor, Permission, PermissionGate, Role, authenticate_stub, require_permission,
};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    EXPORT_CONTENT_TYPE, create_country, create_state, delete_country, delete_state,
    export_file_name, export_states, get_country, get_state, import_states, list_countries,
    list_states, set_countries_published, states_for_country, update_country, update_state,
};
pub use localization::{Localizer, ResourceCatalog, format_resource, keys};
pub use mapping::{country_from_model, state_from_model, to_localized_names};
pub use request_response::{
    CountryInfo, CountryModel, CountryResponse, DeleteResponse, ExportStatesResponse,
    ImportStatesResponse, ListCountriesResponse, ListStatesResponse, LocalizedNameModel,
    SetPublishedRequest, SetPublishedResponse, StateOption, StateProvinceInfo, StateProvinceModel,
    StateProvinceResponse,
};
pub use store::{AddressUsage, ReferenceDataStore};
