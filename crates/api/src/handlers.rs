// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for the country and state/province workflow.
//!
//! Every gated handler checks its permission before touching the store.
//! Handlers are generic over the collaborator traits so they can run
//! against the `SQLite` adapter or a test double.

use geodir_domain::{
    Country, DomainError, StateProvince, validate_country_fields, validate_state_province_fields,
    validate_unique_state_name,
};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::auth::{Permission, PermissionGate, require_permission};
use crate::csv_codec;
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::localization::{Localizer, format_resource, keys};
use crate::mapping::{
    apply_country_model, apply_state_model, country_from_model, country_info, state_from_model,
    state_info,
};
use crate::request_response::{
    CountryInfo, CountryModel, CountryResponse, DeleteResponse, ExportStatesResponse,
    ImportStatesResponse, ListCountriesResponse, ListStatesResponse, SetPublishedResponse,
    StateOption, StateProvinceInfo, StateProvinceModel, StateProvinceResponse,
};
use crate::store::{AddressUsage, ReferenceDataStore};

/// Content type of state exports.
pub const EXPORT_CONTENT_TYPE: &str = "text/csv";

const EXPORT_TIMESTAMP_FORMAT: &[time::format_description::FormatItem<'_>] =
    time::macros::format_description!("[year]-[month]-[day]-[hour]-[minute]-[second]");

fn load_country<S: ReferenceDataStore>(store: &mut S, country_id: i64) -> Result<Country, ApiError> {
    store
        .country_by_id(country_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_domain_error(DomainError::CountryNotFound(country_id)))
}

fn load_state<S: ReferenceDataStore>(
    store: &mut S,
    state_province_id: i64,
) -> Result<StateProvince, ApiError> {
    store
        .state_province_by_id(state_province_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_domain_error(DomainError::StateProvinceNotFound(state_province_id)))
}

/// Rejects a name another state of the same country already uses.
fn ensure_unique_state_name<S: ReferenceDataStore>(
    store: &mut S,
    state: &StateProvince,
) -> Result<(), ApiError> {
    let siblings: Vec<StateProvince> = store
        .state_provinces_by_country_id(state.country_id, true)
        .map_err(translate_persistence_error)?;
    validate_unique_state_name(state, &siblings).map_err(translate_domain_error)
}

fn render_country<S: ReferenceDataStore>(
    store: &mut S,
    country: &Country,
) -> Result<CountryInfo, ApiError> {
    let country_id: i64 = country.country_id.ok_or_else(|| ApiError::Internal {
        message: format!("Country '{}' has no ID", country.name),
    })?;
    let number_of_states: usize = store
        .state_provinces_by_country_id(country_id, true)
        .map_err(translate_persistence_error)?
        .len();
    country_info(country, number_of_states).ok_or_else(|| ApiError::Internal {
        message: format!("Country '{}' has no ID", country.name),
    })
}

fn render_state(state: &StateProvince) -> Result<StateProvinceInfo, ApiError> {
    state_info(state).ok_or_else(|| ApiError::Internal {
        message: format!("State/province '{}' has no ID", state.name),
    })
}

// ============================================================================
// Countries
// ============================================================================

/// Lists countries in display order.
///
/// # Arguments
///
/// * `store` - The reference-data store
/// * `include_hidden` - Whether unpublished countries are included
/// * `gate` - The caller's permission gate
///
/// # Errors
///
/// Returns an error if:
/// - The caller lacks `ManageCountries`
/// - The store cannot be read
pub fn list_countries<S: ReferenceDataStore>(
    store: &mut S,
    include_hidden: bool,
    gate: &impl PermissionGate,
) -> Result<ListCountriesResponse, ApiError> {
    require_permission(gate, Permission::ManageCountries, "list_countries")?;

    let countries: Vec<Country> = store
        .all_countries(include_hidden)
        .map_err(translate_persistence_error)?;

    let mut infos: Vec<CountryInfo> = Vec::with_capacity(countries.len());
    for country in &countries {
        infos.push(render_country(store, country)?);
    }

    debug!(count = infos.len(), include_hidden, "Listed countries");

    Ok(ListCountriesResponse {
        total: infos.len(),
        countries: infos,
    })
}

/// Loads one country for editing.
///
/// # Errors
///
/// Returns an error if:
/// - The caller lacks `ManageCountries`
/// - The country does not exist
pub fn get_country<S: ReferenceDataStore>(
    store: &mut S,
    country_id: i64,
    gate: &impl PermissionGate,
) -> Result<CountryResponse, ApiError> {
    require_permission(gate, Permission::ManageCountries, "get_country")?;

    let country: Country = load_country(store, country_id)?;

    Ok(CountryResponse {
        country: render_country(store, &country)?,
        message: None,
    })
}

/// Creates a country.
///
/// Store mappings in the request are attached at creation.
///
/// # Arguments
///
/// * `store` - The reference-data store
/// * `localizer` - Resolves the success notification
/// * `request` - The country to create
/// * `gate` - The caller's permission gate
///
/// # Errors
///
/// Returns an error if:
/// - The caller lacks `ManageCountries`
/// - Any field validation fails
/// - The store write fails
pub fn create_country<S: ReferenceDataStore>(
    store: &mut S,
    localizer: &impl Localizer,
    request: &CountryModel,
    gate: &impl PermissionGate,
) -> Result<CountryResponse, ApiError> {
    require_permission(gate, Permission::ManageCountries, "create_country")?;

    let mut country: Country = country_from_model(request);
    validate_country_fields(&country).map_err(translate_domain_error)?;

    let country_id: i64 = store
        .insert_country(&country)
        .map_err(translate_persistence_error)?;
    country.country_id = Some(country_id);

    info!(country_id, "Created country '{}'", country.name);

    Ok(CountryResponse {
        country: render_country(store, &country)?,
        message: Some(localizer.resource(keys::COUNTRY_ADDED)),
    })
}

/// Updates a country in place.
///
/// Locales and store mappings are replaced wholesale.
///
/// # Errors
///
/// Returns an error if:
/// - The caller lacks `ManageCountries`
/// - The country does not exist
/// - Any field validation fails
/// - The store write fails
pub fn update_country<S: ReferenceDataStore>(
    store: &mut S,
    localizer: &impl Localizer,
    country_id: i64,
    request: &CountryModel,
    gate: &impl PermissionGate,
) -> Result<CountryResponse, ApiError> {
    require_permission(gate, Permission::ManageCountries, "update_country")?;

    let mut country: Country = load_country(store, country_id)?;
    apply_country_model(&mut country, request);
    validate_country_fields(&country).map_err(translate_domain_error)?;

    store
        .update_country(&country)
        .map_err(translate_persistence_error)?;

    info!(country_id, "Updated country '{}'", country.name);

    Ok(CountryResponse {
        country: render_country(store, &country)?,
        message: Some(localizer.resource(keys::COUNTRY_UPDATED)),
    })
}

/// Deletes a country that no address references.
///
/// The address check runs before any mutation. States of the country are
/// not deleted.
///
/// # Errors
///
/// Returns an error if:
/// - The caller lacks `ManageCountries`
/// - The country does not exist
/// - Addresses still reference the country (`IntegrityViolation`)
/// - The store write fails
pub fn delete_country<S: ReferenceDataStore + AddressUsage>(
    store: &mut S,
    localizer: &impl Localizer,
    country_id: i64,
    gate: &impl PermissionGate,
) -> Result<DeleteResponse, ApiError> {
    require_permission(gate, Permission::ManageCountries, "delete_country")?;

    load_country(store, country_id)?;

    let address_count: usize = store
        .count_addresses_by_country_id(country_id)
        .map_err(translate_persistence_error)?;
    if address_count > 0 {
        let blocked: DomainError = DomainError::CountryInUse {
            country_id,
            address_count,
        };
        warn!("{blocked}");
        return Err(ApiError::IntegrityViolation {
            resource_type: String::from("Country"),
            message: localizer.resource(keys::COUNTRY_CANT_DELETE_WITH_ADDRESSES),
        });
    }

    store
        .delete_country(country_id)
        .map_err(translate_persistence_error)?;

    info!(country_id, "Deleted country");

    Ok(DeleteResponse {
        id: country_id,
        message: Some(localizer.resource(keys::COUNTRY_DELETED)),
    })
}

/// Sets `published` on every country in `country_ids`.
///
/// IDs that do not resolve are skipped. Countries are written one at a
/// time, so a failure partway through leaves earlier countries updated.
/// `None` or an empty list is a no-op.
///
/// # Errors
///
/// Returns an error if:
/// - The caller lacks `ManageCountries`
/// - The store fails
pub fn set_countries_published<S: ReferenceDataStore>(
    store: &mut S,
    country_ids: Option<&[i64]>,
    published: bool,
    gate: &impl PermissionGate,
) -> Result<SetPublishedResponse, ApiError> {
    let action: &str = if published {
        "publish_countries"
    } else {
        "unpublish_countries"
    };
    require_permission(gate, Permission::ManageCountries, action)?;

    let Some(ids) = country_ids.filter(|ids| !ids.is_empty()) else {
        return Ok(SetPublishedResponse {
            published,
            updated_count: 0,
        });
    };

    let countries: Vec<Country> = store
        .countries_by_ids(ids)
        .map_err(translate_persistence_error)?;

    let mut updated_count: usize = 0;
    for mut country in countries {
        country.published = published;
        store
            .update_country(&country)
            .map_err(translate_persistence_error)?;
        updated_count += 1;
    }

    info!(
        requested = ids.len(),
        updated_count, published, "Bulk-updated country publication"
    );

    Ok(SetPublishedResponse {
        published,
        updated_count,
    })
}

// ============================================================================
// States / Provinces
// ============================================================================

/// Lists the states/provinces of a country.
///
/// # Errors
///
/// Returns an error if:
/// - The caller lacks `ManageCountries`
/// - The store cannot be read
pub fn list_states<S: ReferenceDataStore>(
    store: &mut S,
    country_id: i64,
    include_hidden: bool,
    gate: &impl PermissionGate,
) -> Result<ListStatesResponse, ApiError> {
    require_permission(gate, Permission::ManageCountries, "list_states")?;

    let states: Vec<StateProvinceInfo> = store
        .state_provinces_by_country_id(country_id, include_hidden)
        .map_err(translate_persistence_error)?
        .iter()
        .map(render_state)
        .collect::<Result<Vec<StateProvinceInfo>, ApiError>>()?;

    Ok(ListStatesResponse {
        country_id,
        total: states.len(),
        states,
    })
}

/// Loads one state/province for editing.
///
/// # Errors
///
/// Returns an error if:
/// - The caller lacks `ManageCountries`
/// - The state/province does not exist
pub fn get_state<S: ReferenceDataStore>(
    store: &mut S,
    state_province_id: i64,
    gate: &impl PermissionGate,
) -> Result<StateProvinceResponse, ApiError> {
    require_permission(gate, Permission::ManageCountries, "get_state")?;

    let state: StateProvince = load_state(store, state_province_id)?;

    Ok(StateProvinceResponse {
        state: render_state(&state)?,
    })
}

/// Creates a state/province under an existing country.
///
/// # Errors
///
/// Returns an error if:
/// - The caller lacks `ManageCountries`
/// - The referenced country does not exist
/// - Any field validation fails
/// - The country already has a state of that name, ignoring case
/// - The store write fails
pub fn create_state<S: ReferenceDataStore>(
    store: &mut S,
    request: &StateProvinceModel,
    gate: &impl PermissionGate,
) -> Result<StateProvinceResponse, ApiError> {
    require_permission(gate, Permission::ManageCountries, "create_state")?;

    load_country(store, request.country_id)?;

    let mut state: StateProvince = state_from_model(request);
    validate_state_province_fields(&state).map_err(translate_domain_error)?;
    ensure_unique_state_name(store, &state)?;

    let state_province_id: i64 = store
        .insert_state_province(&state)
        .map_err(translate_persistence_error)?;
    state.state_province_id = Some(state_province_id);

    info!(
        state_province_id,
        country_id = state.country_id,
        "Created state/province '{}'",
        state.name
    );

    Ok(StateProvinceResponse {
        state: render_state(&state)?,
    })
}

/// Updates a state/province in place. Locales are replaced wholesale.
///
/// # Errors
///
/// Returns an error if:
/// - The caller lacks `ManageCountries`
/// - The state/province or the referenced country does not exist
/// - Any field validation fails
/// - Another state of the country has that name, ignoring case
/// - The store write fails
pub fn update_state<S: ReferenceDataStore>(
    store: &mut S,
    state_province_id: i64,
    request: &StateProvinceModel,
    gate: &impl PermissionGate,
) -> Result<StateProvinceResponse, ApiError> {
    require_permission(gate, Permission::ManageCountries, "update_state")?;

    let mut state: StateProvince = load_state(store, state_province_id)?;
    load_country(store, request.country_id)?;

    apply_state_model(&mut state, request);
    validate_state_province_fields(&state).map_err(translate_domain_error)?;
    ensure_unique_state_name(store, &state)?;

    store
        .update_state_province(&state)
        .map_err(translate_persistence_error)?;

    info!(state_province_id, "Updated state/province '{}'", state.name);

    Ok(StateProvinceResponse {
        state: render_state(&state)?,
    })
}

/// Deletes a state/province that no address references.
///
/// # Errors
///
/// Returns an error if:
/// - The caller lacks `ManageCountries`
/// - The state/province does not exist
/// - Addresses still reference it (`IntegrityViolation`, carrying a
///   localized message meant for the user)
/// - The store write fails
pub fn delete_state<S: ReferenceDataStore + AddressUsage>(
    store: &mut S,
    localizer: &impl Localizer,
    state_province_id: i64,
    gate: &impl PermissionGate,
) -> Result<DeleteResponse, ApiError> {
    require_permission(gate, Permission::ManageCountries, "delete_state")?;

    load_state(store, state_province_id)?;

    let address_count: usize = store
        .count_addresses_by_state_province_id(state_province_id)
        .map_err(translate_persistence_error)?;
    if address_count > 0 {
        let blocked: DomainError = DomainError::StateProvinceInUse {
            state_province_id,
            address_count,
        };
        warn!("{blocked}");
        return Err(ApiError::IntegrityViolation {
            resource_type: String::from("State/province"),
            message: localizer.resource(keys::STATE_CANT_DELETE_WITH_ADDRESSES),
        });
    }

    store
        .delete_state_province(state_province_id)
        .map_err(translate_persistence_error)?;

    info!(state_province_id, "Deleted state/province");

    Ok(DeleteResponse {
        id: state_province_id,
        message: None,
    })
}

/// Builds the state drop-down for an address form.
///
/// Not permission-gated. `country_id` is the raw value from the form:
/// an empty string means "no country chosen", and anything else that does
/// not name an existing country (whitespace included) is treated as an
/// unknown country.
///
/// Placeholder rules, in order:
/// 1. Empty `country_id`: only the storefront "select state" placeholder.
/// 2. `add_asterisk`: a `*` placeholder, then the states.
/// 3. Unknown country: "select state" if `add_select_state_item`,
///    otherwise "other (non US)".
/// 4. Country without states: "other (non US)".
/// 5. Otherwise: "select state" if `add_select_state_item`, then the states.
///
/// States are listed hidden included, in store order, named in the
/// localizer's working language when it has one.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn states_for_country<S: ReferenceDataStore>(
    store: &mut S,
    localizer: &impl Localizer,
    country_id: &str,
    add_select_state_item: bool,
    add_asterisk: bool,
) -> Result<Vec<StateOption>, ApiError> {
    if country_id.is_empty() {
        return Ok(vec![StateOption::placeholder(
            localizer.resource(keys::SELECT_STATE),
        )]);
    }

    let country: Option<Country> = match country_id.parse::<i64>() {
        Ok(id) => store.country_by_id(id).map_err(translate_persistence_error)?,
        Err(_) => None,
    };

    let states: Vec<StateOption> = match country.as_ref().and_then(|c| c.country_id) {
        Some(id) => store
            .state_provinces_by_country_id(id, true)
            .map_err(translate_persistence_error)?
            .into_iter()
            .filter_map(|s| {
                let name: String = match localizer.language_id() {
                    Some(language_id) => s.localized_name(language_id).to_string(),
                    None => s.name,
                };
                s.state_province_id.map(|sid| StateOption {
                    id: sid.to_string(),
                    name,
                })
            })
            .collect(),
        None => Vec::new(),
    };

    let placeholder: Option<StateOption> = if add_asterisk {
        Some(StateOption::placeholder(String::from("*")))
    } else if country.is_none() {
        let key: &str = if add_select_state_item {
            keys::ADMIN_SELECT_STATE
        } else {
            keys::ADMIN_OTHER_NON_US
        };
        Some(StateOption::placeholder(localizer.resource(key)))
    } else if states.is_empty() {
        Some(StateOption::placeholder(
            localizer.resource(keys::ADMIN_OTHER_NON_US),
        ))
    } else if add_select_state_item {
        Some(StateOption::placeholder(
            localizer.resource(keys::ADMIN_SELECT_STATE),
        ))
    } else {
        None
    };

    Ok(placeholder.into_iter().chain(states).collect())
}

// ============================================================================
// Import / Export
// ============================================================================

/// Builds the download name of a state export taken at `at`.
///
/// `suffix` is reduced to four digits.
#[must_use]
pub fn export_file_name(at: OffsetDateTime, suffix: u16) -> String {
    let stamp: String = at
        .format(EXPORT_TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| at.unix_timestamp().to_string());
    format!("states_{stamp}_{:04}.txt", suffix % 10_000)
}

/// Exports every state/province of every country, hidden included.
///
/// # Errors
///
/// Returns an error if:
/// - The caller lacks `ManageCountries`
/// - The store cannot be read
pub fn export_states<S: ReferenceDataStore>(
    store: &mut S,
    gate: &impl PermissionGate,
) -> Result<ExportStatesResponse, ApiError> {
    require_permission(gate, Permission::ManageCountries, "export_states")?;

    let states: Vec<StateProvince> = store
        .all_state_provinces(true)
        .map_err(translate_persistence_error)?;
    let (content, exported_count): (String, usize) = csv_codec::export_states(store, &states)?;

    info!(exported_count, "Exported states");

    Ok(ExportStatesResponse {
        file_name: export_file_name(OffsetDateTime::now_utc(), rand::random::<u16>()),
        content_type: String::from(EXPORT_CONTENT_TYPE),
        content,
        exported_count,
    })
}

/// Imports states/provinces from uploaded CSV content.
///
/// # Errors
///
/// Returns an error if:
/// - The caller lacks `ManageCountries`
/// - The upload is empty
/// - A row is malformed (earlier rows stay applied)
/// - The store fails
pub fn import_states<S: ReferenceDataStore>(
    store: &mut S,
    localizer: &impl Localizer,
    content: &str,
    gate: &impl PermissionGate,
) -> Result<ImportStatesResponse, ApiError> {
    require_permission(gate, Permission::ManageCountries, "import_states")?;

    if content.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("file"),
            message: localizer.resource(keys::UPLOAD_FILE),
        });
    }

    let imported_count: usize = csv_codec::import_states(store, content)?;

    Ok(ImportStatesResponse {
        imported_count,
        message: format_resource(&localizer.resource(keys::IMPORT_SUCCESS), imported_count),
    })
}
