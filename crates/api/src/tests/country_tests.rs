// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use geodir_domain::{Country, LocalizedName};

use crate::{
    ApiError, CountryModel, CountryResponse, DeleteResponse, ListCountriesResponse,
    LocalizedNameModel, SetPublishedResponse, create_country, delete_country, get_country,
    list_countries, set_countries_published, update_country,
};

use super::helpers::{
    RecordingStore, create_country_model, create_test_admin, create_test_catalog, seed_address,
    seed_country, seed_state, setup_test_persistence,
};

#[test]
fn test_create_country_assigns_id_and_normalizes_codes() {
    let mut persistence = setup_test_persistence();
    let catalog = create_test_catalog();

    let mut request: CountryModel = create_country_model("  Canada ", "ca", "can");
    request.store_ids = vec![3, 1];
    request.locales = vec![
        LocalizedNameModel {
            language_id: 2,
            name: String::from("Kanada"),
        },
        LocalizedNameModel {
            language_id: 3,
            name: String::from("   "),
        },
    ];

    let response: CountryResponse =
        create_country(&mut persistence, &catalog, &request, &create_test_admin()).unwrap();

    assert_eq!(response.country.name, "Canada");
    assert_eq!(response.country.two_letter_iso_code, "CA");
    assert_eq!(response.country.three_letter_iso_code, "CAN");
    assert_eq!(response.country.store_ids, vec![1, 3]);
    assert!(response.country.limited_to_stores);
    assert_eq!(response.country.locales.len(), 1, "blank locales are dropped");
    assert_eq!(
        response.message.as_deref(),
        Some("The new country has been added successfully.")
    );

    let stored: Country = persistence
        .get_country_by_id(response.country.country_id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.locales, vec![LocalizedName::new(2, "Kanada")]);
}

#[test]
fn test_create_country_rejects_invalid_fields() {
    let mut persistence = setup_test_persistence();
    let catalog = create_test_catalog();
    let admin = create_test_admin();

    let empty_name: Result<CountryResponse, ApiError> = create_country(
        &mut persistence,
        &catalog,
        &create_country_model("  ", "CA", "CAN"),
        &admin,
    );
    assert!(matches!(
        empty_name,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "name"
    ));

    let bad_iso: Result<CountryResponse, ApiError> = create_country(
        &mut persistence,
        &catalog,
        &create_country_model("Canada", "C1", "CAN"),
        &admin,
    );
    assert!(matches!(
        bad_iso,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "two_letter_iso_code"
    ));

    let mut duplicate_locale: CountryModel = create_country_model("Canada", "CA", "CAN");
    duplicate_locale.locales = vec![
        LocalizedNameModel {
            language_id: 2,
            name: String::from("Kanada"),
        },
        LocalizedNameModel {
            language_id: 2,
            name: String::from("Kanada!"),
        },
    ];
    assert!(matches!(
        create_country(&mut persistence, &catalog, &duplicate_locale, &admin),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "locales"
    ));

    assert!(persistence.get_all_countries(true).unwrap().is_empty());
}

#[test]
fn test_list_countries_respects_include_hidden_and_counts_states() {
    let mut persistence = setup_test_persistence();
    let us: i64 = seed_country(&mut persistence, "United States", "US", "USA");
    seed_state(&mut persistence, us, "Washington", "WA");
    seed_state(&mut persistence, us, "Oregon", "OR");

    let mut hidden: Country = Country::new("Atlantis", "AX", "ATL");
    hidden.published = false;
    persistence.insert_country(&hidden).unwrap();

    let admin = create_test_admin();

    let all: ListCountriesResponse = list_countries(&mut persistence, true, &admin).unwrap();
    assert_eq!(all.total, 2);

    let visible: ListCountriesResponse = list_countries(&mut persistence, false, &admin).unwrap();
    assert_eq!(visible.total, 1);
    assert_eq!(visible.countries[0].number_of_states, 2);
}

#[test]
fn test_get_country_not_found() {
    let mut persistence = setup_test_persistence();

    let result: Result<CountryResponse, ApiError> =
        get_country(&mut persistence, 404, &create_test_admin());

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_update_country_replaces_fields_and_locales() {
    let mut persistence = setup_test_persistence();
    let catalog = create_test_catalog();
    let admin = create_test_admin();

    let mut request: CountryModel = create_country_model("Germany", "DE", "DEU");
    request.locales = vec![LocalizedNameModel {
        language_id: 2,
        name: String::from("Deutschland"),
    }];
    request.store_ids = vec![1];
    let created: CountryResponse =
        create_country(&mut persistence, &catalog, &request, &admin).unwrap();
    let id: i64 = created.country.country_id;

    let mut change: CountryModel = create_country_model("Federal Republic of Germany", "de", "deu");
    change.numeric_iso_code = 276;
    change.published = false;
    change.locales = vec![LocalizedNameModel {
        language_id: 3,
        name: String::from("Allemagne"),
    }];

    let updated: CountryResponse =
        update_country(&mut persistence, &catalog, id, &change, &admin).unwrap();

    assert_eq!(updated.country.country_id, id);
    assert_eq!(updated.country.name, "Federal Republic of Germany");
    assert_eq!(updated.country.numeric_iso_code, 276);
    assert!(!updated.country.published);
    assert!(!updated.country.limited_to_stores);
    assert_eq!(
        updated.message.as_deref(),
        Some("The country has been updated successfully.")
    );

    let stored: Country = persistence.get_country_by_id(id).unwrap().unwrap();
    assert_eq!(stored.locales.len(), 1);
    assert_eq!(stored.locales[0].language_id, 3);
}

#[test]
fn test_update_unknown_country_is_not_found() {
    let mut persistence = setup_test_persistence();

    let result: Result<CountryResponse, ApiError> = update_country(
        &mut persistence,
        &create_test_catalog(),
        99,
        &create_country_model("Nowhere", "NW", "NWH"),
        &create_test_admin(),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_delete_country_without_addresses() {
    let mut persistence = setup_test_persistence();
    let id: i64 = seed_country(&mut persistence, "Peru", "PE", "PER");

    let response: DeleteResponse = delete_country(
        &mut persistence,
        &create_test_catalog(),
        id,
        &create_test_admin(),
    )
    .unwrap();

    assert_eq!(response.id, id);
    assert!(persistence.get_country_by_id(id).unwrap().is_none());
}

#[test]
fn test_delete_country_with_addresses_is_refused_without_mutation() {
    let mut persistence = setup_test_persistence();
    let id: i64 = seed_country(&mut persistence, "Chile", "CL", "CHL");
    seed_address(&mut persistence, Some(id), None);

    let mut store: RecordingStore = RecordingStore::new(persistence);
    let result: Result<DeleteResponse, ApiError> =
        delete_country(&mut store, &create_test_catalog(), id, &create_test_admin());

    assert_eq!(
        result,
        Err(ApiError::IntegrityViolation {
            resource_type: String::from("Country"),
            message: String::from("The country can't be deleted. It has associated addresses"),
        })
    );
    assert_eq!(store.writes, 0);
    assert_eq!(store.address_checks, 1);
    assert!(store.inner.get_country_by_id(id).unwrap().is_some());
}

#[test]
fn test_delete_unknown_country_is_not_found() {
    let mut store: RecordingStore = RecordingStore::new(setup_test_persistence());

    let result: Result<DeleteResponse, ApiError> =
        delete_country(&mut store, &create_test_catalog(), 5, &create_test_admin());

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
    assert_eq!(store.address_checks, 0);
    assert_eq!(store.writes, 0);
}

#[test]
fn test_set_published_updates_resolved_ids_and_skips_unknown() {
    let mut persistence = setup_test_persistence();
    let a: i64 = seed_country(&mut persistence, "A", "AA", "AAA");
    let b: i64 = seed_country(&mut persistence, "B", "BB", "BBB");
    let c: i64 = seed_country(&mut persistence, "C", "CC", "CCC");
    let admin = create_test_admin();

    let response: SetPublishedResponse =
        set_countries_published(&mut persistence, Some(&[a, b, 9999][..]), false, &admin)
            .unwrap();

    assert_eq!(response.updated_count, 2);
    assert!(!persistence.get_country_by_id(a).unwrap().unwrap().published);
    assert!(!persistence.get_country_by_id(b).unwrap().unwrap().published);
    assert!(persistence.get_country_by_id(c).unwrap().unwrap().published);

    let response: SetPublishedResponse =
        set_countries_published(&mut persistence, Some(&[a, b, c][..]), true, &admin).unwrap();
    assert_eq!(response.updated_count, 3);
    assert!(
        persistence
            .get_all_countries(false)
            .unwrap()
            .iter()
            .all(|country| country.published)
    );
}

#[test]
fn test_set_published_without_ids_is_a_no_op() {
    let mut store: RecordingStore = RecordingStore::new(setup_test_persistence());
    let admin = create_test_admin();

    let none: SetPublishedResponse =
        set_countries_published(&mut store, None, true, &admin).unwrap();
    let empty: SetPublishedResponse =
        set_countries_published(&mut store, Some(&[][..]), true, &admin).unwrap();

    assert_eq!(none.updated_count, 0);
    assert_eq!(empty.updated_count, 0);
    assert_eq!(store.calls(), 0);
}

#[test]
fn test_set_published_keeps_locales_and_store_mappings() {
    let mut persistence = setup_test_persistence();
    let catalog = create_test_catalog();
    let admin = create_test_admin();

    let mut request: CountryModel = create_country_model("Japan", "JP", "JPN");
    request.store_ids = vec![7];
    request.locales = vec![LocalizedNameModel {
        language_id: 2,
        name: String::from("Nippon"),
    }];
    let id: i64 = create_country(&mut persistence, &catalog, &request, &admin)
        .unwrap()
        .country
        .country_id;

    set_countries_published(&mut persistence, Some(&[id][..]), false, &admin).unwrap();

    let stored: Country = persistence.get_country_by_id(id).unwrap().unwrap();
    assert!(!stored.published);
    assert_eq!(stored.locales.len(), 1);
    assert_eq!(stored.store_ids.iter().copied().collect::<Vec<i64>>(), vec![7]);
}
