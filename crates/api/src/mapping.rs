// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level translation between records and API models.
//!
//! Model → record never touches the record's identifier, and locale
//! entries with a blank name are dropped. Record → model copies every
//! field.

use geodir_domain::{Country, LocalizedName, StateProvince, normalize_iso_code};
use std::collections::BTreeSet;

use crate::request_response::{
    CountryInfo, CountryModel, LocalizedNameModel, StateProvinceInfo, StateProvinceModel,
};

/// Converts client locale entries into record locales.
#[must_use]
pub fn to_localized_names(models: &[LocalizedNameModel]) -> Vec<LocalizedName> {
    models
        .iter()
        .filter(|m| !m.name.trim().is_empty())
        .map(|m| LocalizedName::new(m.language_id, m.name.trim()))
        .collect()
}

fn to_locale_models(locales: &[LocalizedName]) -> Vec<LocalizedNameModel> {
    locales
        .iter()
        .map(|l| LocalizedNameModel {
            language_id: l.language_id,
            name: l.name.clone(),
        })
        .collect()
}

/// Copies every model field onto `country`. The identifier is left alone.
///
/// ISO codes are normalized; locales and store mappings are replaced
/// wholesale.
pub fn apply_country_model(country: &mut Country, model: &CountryModel) {
    country.name = model.name.trim().to_string();
    country.two_letter_iso_code = normalize_iso_code(&model.two_letter_iso_code);
    country.three_letter_iso_code = normalize_iso_code(&model.three_letter_iso_code);
    country.numeric_iso_code = model.numeric_iso_code;
    country.allows_billing = model.allows_billing;
    country.allows_shipping = model.allows_shipping;
    country.subject_to_vat = model.subject_to_vat;
    country.published = model.published;
    country.display_order = model.display_order;
    country.locales = to_localized_names(&model.locales);
    country.store_ids = model.store_ids.iter().copied().collect::<BTreeSet<i64>>();
}

/// Builds a new, unpersisted country from a model.
#[must_use]
pub fn country_from_model(model: &CountryModel) -> Country {
    let mut country: Country = Country::new(
        &model.name,
        &model.two_letter_iso_code,
        &model.three_letter_iso_code,
    );
    apply_country_model(&mut country, model);
    country
}

/// Renders a persisted country.
///
/// Returns `None` for a record without an identifier.
#[must_use]
pub fn country_info(country: &Country, number_of_states: usize) -> Option<CountryInfo> {
    Some(CountryInfo {
        country_id: country.country_id?,
        name: country.name.clone(),
        two_letter_iso_code: country.two_letter_iso_code.clone(),
        three_letter_iso_code: country.three_letter_iso_code.clone(),
        numeric_iso_code: country.numeric_iso_code,
        allows_billing: country.allows_billing,
        allows_shipping: country.allows_shipping,
        subject_to_vat: country.subject_to_vat,
        published: country.published,
        display_order: country.display_order,
        limited_to_stores: country.is_limited_to_stores(),
        store_ids: country.store_ids.iter().copied().collect(),
        locales: to_locale_models(&country.locales),
        number_of_states,
    })
}

/// Copies every model field onto `state`. The identifier is left alone.
pub fn apply_state_model(state: &mut StateProvince, model: &StateProvinceModel) {
    state.country_id = model.country_id;
    state.name = model.name.trim().to_string();
    state.abbreviation = model.abbreviation.trim().to_string();
    state.published = model.published;
    state.display_order = model.display_order;
    state.locales = to_localized_names(&model.locales);
}

/// Builds a new, unpersisted state/province from a model.
#[must_use]
pub fn state_from_model(model: &StateProvinceModel) -> StateProvince {
    let mut state: StateProvince =
        StateProvince::new(model.country_id, &model.name, &model.abbreviation);
    apply_state_model(&mut state, model);
    state
}

/// Renders a persisted state/province.
///
/// Returns `None` for a record without an identifier.
#[must_use]
pub fn state_info(state: &StateProvince) -> Option<StateProvinceInfo> {
    Some(StateProvinceInfo {
        state_province_id: state.state_province_id?,
        country_id: state.country_id,
        name: state.name.clone(),
        abbreviation: state.abbreviation.clone(),
        published: state.published,
        display_order: state.display_order,
        locales: to_locale_models(&state.locales),
    })
}
