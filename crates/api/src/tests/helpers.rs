// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use geodir_domain::{Address, Country, StateProvince};
use geodir_persistence::{Persistence, PersistenceError};

use crate::{
    AddressUsage, AuthenticatedActor, CountryModel, ReferenceDataStore, ResourceCatalog, Role,
    StateProvinceModel,
};

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-123"), Role::Admin)
}

pub fn create_test_guest() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("guest-456"), Role::Guest)
}

pub fn create_test_catalog() -> ResourceCatalog {
    ResourceCatalog::english()
}

pub fn create_country_model(name: &str, iso2: &str, iso3: &str) -> CountryModel {
    CountryModel {
        name: name.to_string(),
        two_letter_iso_code: iso2.to_string(),
        three_letter_iso_code: iso3.to_string(),
        numeric_iso_code: 0,
        allows_billing: true,
        allows_shipping: true,
        subject_to_vat: false,
        published: true,
        display_order: 0,
        locales: Vec::new(),
        store_ids: Vec::new(),
    }
}

pub fn create_state_model(country_id: i64, name: &str, abbreviation: &str) -> StateProvinceModel {
    StateProvinceModel {
        country_id,
        name: name.to_string(),
        abbreviation: abbreviation.to_string(),
        published: true,
        display_order: 0,
        locales: Vec::new(),
    }
}

pub fn setup_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn seed_country(persistence: &mut Persistence, name: &str, iso2: &str, iso3: &str) -> i64 {
    persistence
        .insert_country(&Country::new(name, iso2, iso3))
        .expect("insert country")
}

pub fn seed_state(persistence: &mut Persistence, country_id: i64, name: &str, abbr: &str) -> i64 {
    persistence
        .insert_state_province(&StateProvince::new(country_id, name, abbr))
        .expect("insert state")
}

pub fn seed_address(
    persistence: &mut Persistence,
    country_id: Option<i64>,
    state_province_id: Option<i64>,
) -> i64 {
    persistence
        .insert_address(&Address::new(country_id, state_province_id, "Springfield"))
        .expect("insert address")
}

/// Wraps a real store and records every call made through the traits.
///
/// Used to prove that denied or blocked operations never reach the store
/// or never mutate it.
pub struct RecordingStore {
    pub inner: Persistence,
    pub reads: usize,
    pub writes: usize,
    pub address_checks: usize,
}

impl RecordingStore {
    pub const fn new(inner: Persistence) -> Self {
        Self {
            inner,
            reads: 0,
            writes: 0,
            address_checks: 0,
        }
    }

    pub const fn calls(&self) -> usize {
        self.reads + self.writes + self.address_checks
    }
}

impl ReferenceDataStore for RecordingStore {
    fn country_by_id(&mut self, country_id: i64) -> Result<Option<Country>, PersistenceError> {
        self.reads += 1;
        self.inner.country_by_id(country_id)
    }

    fn countries_by_ids(&mut self, country_ids: &[i64]) -> Result<Vec<Country>, PersistenceError> {
        self.reads += 1;
        self.inner.countries_by_ids(country_ids)
    }

    fn all_countries(&mut self, include_hidden: bool) -> Result<Vec<Country>, PersistenceError> {
        self.reads += 1;
        self.inner.all_countries(include_hidden)
    }

    fn countries_by_two_letter_iso_code(
        &mut self,
        code: &str,
    ) -> Result<Vec<Country>, PersistenceError> {
        self.reads += 1;
        self.inner.countries_by_two_letter_iso_code(code)
    }

    fn insert_country(&mut self, country: &Country) -> Result<i64, PersistenceError> {
        self.writes += 1;
        ReferenceDataStore::insert_country(&mut self.inner, country)
    }

    fn update_country(&mut self, country: &Country) -> Result<(), PersistenceError> {
        self.writes += 1;
        ReferenceDataStore::update_country(&mut self.inner, country)
    }

    fn delete_country(&mut self, country_id: i64) -> Result<(), PersistenceError> {
        self.writes += 1;
        ReferenceDataStore::delete_country(&mut self.inner, country_id)
    }

    fn state_province_by_id(
        &mut self,
        state_province_id: i64,
    ) -> Result<Option<StateProvince>, PersistenceError> {
        self.reads += 1;
        self.inner.state_province_by_id(state_province_id)
    }

    fn state_provinces_by_country_id(
        &mut self,
        country_id: i64,
        include_hidden: bool,
    ) -> Result<Vec<StateProvince>, PersistenceError> {
        self.reads += 1;
        self.inner
            .state_provinces_by_country_id(country_id, include_hidden)
    }

    fn all_state_provinces(
        &mut self,
        include_hidden: bool,
    ) -> Result<Vec<StateProvince>, PersistenceError> {
        self.reads += 1;
        self.inner.all_state_provinces(include_hidden)
    }

    fn insert_state_province(&mut self, state: &StateProvince) -> Result<i64, PersistenceError> {
        self.writes += 1;
        ReferenceDataStore::insert_state_province(&mut self.inner, state)
    }

    fn update_state_province(&mut self, state: &StateProvince) -> Result<(), PersistenceError> {
        self.writes += 1;
        ReferenceDataStore::update_state_province(&mut self.inner, state)
    }

    fn delete_state_province(&mut self, state_province_id: i64) -> Result<(), PersistenceError> {
        self.writes += 1;
        ReferenceDataStore::delete_state_province(&mut self.inner, state_province_id)
    }
}

impl AddressUsage for RecordingStore {
    fn count_addresses_by_country_id(&mut self, country_id: i64) -> Result<usize, PersistenceError> {
        self.address_checks += 1;
        AddressUsage::count_addresses_by_country_id(&mut self.inner, country_id)
    }

    fn count_addresses_by_state_province_id(
        &mut self,
        state_province_id: i64,
    ) -> Result<usize, PersistenceError> {
        self.address_checks += 1;
        AddressUsage::count_addresses_by_state_province_id(&mut self.inner, state_province_id)
    }
}
