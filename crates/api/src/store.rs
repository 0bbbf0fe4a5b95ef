// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collaborator seams consumed by the workflow.
//!
//! Handlers are generic over these traits; [`Persistence`] implements them
//! for production use.

use geodir_domain::{Country, StateProvince};
use geodir_persistence::{Persistence, PersistenceError};

/// Persists and retrieves countries and states/provinces.
pub trait ReferenceDataStore {
    /// Looks up a country by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn country_by_id(&mut self, country_id: i64) -> Result<Option<Country>, PersistenceError>;

    /// Looks up every country in `country_ids`, skipping unknown IDs.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn countries_by_ids(&mut self, country_ids: &[i64]) -> Result<Vec<Country>, PersistenceError>;

    /// Lists all countries in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn all_countries(&mut self, include_hidden: bool) -> Result<Vec<Country>, PersistenceError>;

    /// Looks up every country with the given two-letter ISO code.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn countries_by_two_letter_iso_code(
        &mut self,
        code: &str,
    ) -> Result<Vec<Country>, PersistenceError>;

    /// Inserts a country, returning its new ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn insert_country(&mut self, country: &Country) -> Result<i64, PersistenceError>;

    /// Overwrites a persisted country.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn update_country(&mut self, country: &Country) -> Result<(), PersistenceError>;

    /// Removes a country.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete_country(&mut self, country_id: i64) -> Result<(), PersistenceError>;

    /// Looks up a state/province by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn state_province_by_id(
        &mut self,
        state_province_id: i64,
    ) -> Result<Option<StateProvince>, PersistenceError>;

    /// Lists the states/provinces of a country in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn state_provinces_by_country_id(
        &mut self,
        country_id: i64,
        include_hidden: bool,
    ) -> Result<Vec<StateProvince>, PersistenceError>;

    /// Lists every state/province.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn all_state_provinces(
        &mut self,
        include_hidden: bool,
    ) -> Result<Vec<StateProvince>, PersistenceError>;

    /// Inserts a state/province, returning its new ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn insert_state_province(&mut self, state: &StateProvince) -> Result<i64, PersistenceError>;

    /// Overwrites a persisted state/province.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn update_state_province(&mut self, state: &StateProvince) -> Result<(), PersistenceError>;

    /// Removes a state/province.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete_state_province(&mut self, state_province_id: i64) -> Result<(), PersistenceError>;
}

/// Reports how many addresses reference a country or state/province.
pub trait AddressUsage {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn count_addresses_by_country_id(&mut self, country_id: i64) -> Result<usize, PersistenceError>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn count_addresses_by_state_province_id(
        &mut self,
        state_province_id: i64,
    ) -> Result<usize, PersistenceError>;
}

impl ReferenceDataStore for Persistence {
    fn country_by_id(&mut self, country_id: i64) -> Result<Option<Country>, PersistenceError> {
        self.get_country_by_id(country_id)
    }

    fn countries_by_ids(&mut self, country_ids: &[i64]) -> Result<Vec<Country>, PersistenceError> {
        self.get_countries_by_ids(country_ids)
    }

    fn all_countries(&mut self, include_hidden: bool) -> Result<Vec<Country>, PersistenceError> {
        self.get_all_countries(include_hidden)
    }

    fn countries_by_two_letter_iso_code(
        &mut self,
        code: &str,
    ) -> Result<Vec<Country>, PersistenceError> {
        self.get_countries_by_two_letter_iso_code(code)
    }

    fn insert_country(&mut self, country: &Country) -> Result<i64, PersistenceError> {
        Self::insert_country(self, country)
    }

    fn update_country(&mut self, country: &Country) -> Result<(), PersistenceError> {
        Self::update_country(self, country)
    }

    fn delete_country(&mut self, country_id: i64) -> Result<(), PersistenceError> {
        Self::delete_country(self, country_id)
    }

    fn state_province_by_id(
        &mut self,
        state_province_id: i64,
    ) -> Result<Option<StateProvince>, PersistenceError> {
        self.get_state_province_by_id(state_province_id)
    }

    fn state_provinces_by_country_id(
        &mut self,
        country_id: i64,
        include_hidden: bool,
    ) -> Result<Vec<StateProvince>, PersistenceError> {
        self.get_state_provinces_by_country_id(country_id, include_hidden)
    }

    fn all_state_provinces(
        &mut self,
        include_hidden: bool,
    ) -> Result<Vec<StateProvince>, PersistenceError> {
        self.get_all_state_provinces(include_hidden)
    }

    fn insert_state_province(&mut self, state: &StateProvince) -> Result<i64, PersistenceError> {
        Self::insert_state_province(self, state)
    }

    fn update_state_province(&mut self, state: &StateProvince) -> Result<(), PersistenceError> {
        Self::update_state_province(self, state)
    }

    fn delete_state_province(&mut self, state_province_id: i64) -> Result<(), PersistenceError> {
        Self::delete_state_province(self, state_province_id)
    }
}

impl AddressUsage for Persistence {
    fn count_addresses_by_country_id(&mut self, country_id: i64) -> Result<usize, PersistenceError> {
        Self::count_addresses_by_country_id(self, country_id)
    }

    fn count_addresses_by_state_province_id(
        &mut self,
        state_province_id: i64,
    ) -> Result<usize, PersistenceError> {
        Self::count_addresses_by_state_province_id(self, state_province_id)
    }
}
