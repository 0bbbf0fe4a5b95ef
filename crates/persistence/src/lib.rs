// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for country and state/province reference data.
//!
//! This crate stores countries, states/provinces, their localized names,
//! country store mappings and the addresses that reference them. It is
//! built on Diesel with an `SQLite` backend.
//!
//! ## Storage Model
//!
//! - Locales and store mappings are owned by their parent row and cascade
//!   on delete.
//! - A state/province refers to its country by ID only. Deleting a country
//!   does not delete its states.
//! - Addresses refer to countries and states by nullable IDs. Whether a
//!   country or state may be deleted is decided by the caller, using the
//!   address counts exposed here.
//!
//! ## Testing
//!
//! - `Persistence::new_in_memory()` gives every caller an isolated,
//!   fully-migrated database
//! - Tests never touch the filesystem

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

use diesel::SqliteConnection;
use geodir_domain::{Address, Country, StateProvince};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Persistence adapter for reference data.
///
/// Owns a single `SQLite` connection. Callers that share an adapter across
/// tasks wrap it in a mutex.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if it does not exist and is switched to WAL mode.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Countries
    // ========================================================================

    /// Retrieves a country by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_country_by_id(&mut self, country_id: i64) -> Result<Option<Country>, PersistenceError> {
        queries::get_country_by_id(&mut self.conn, country_id)
    }

    /// Retrieves the countries matching `country_ids`. Unknown IDs are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_countries_by_ids(
        &mut self,
        country_ids: &[i64],
    ) -> Result<Vec<Country>, PersistenceError> {
        queries::get_countries_by_ids(&mut self.conn, country_ids)
    }

    /// Retrieves all countries in display order.
    ///
    /// # Arguments
    ///
    /// * `include_hidden` - Whether unpublished countries are included
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_all_countries(&mut self, include_hidden: bool) -> Result<Vec<Country>, PersistenceError> {
        queries::get_all_countries(&mut self.conn, include_hidden)
    }

    /// Retrieves every country with the given two-letter ISO code, oldest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_countries_by_two_letter_iso_code(
        &mut self,
        code: &str,
    ) -> Result<Vec<Country>, PersistenceError> {
        queries::get_countries_by_two_letter_iso_code(&mut self.conn, code)
    }

    /// Inserts a country and returns its new ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_country(&mut self, country: &Country) -> Result<i64, PersistenceError> {
        mutations::insert_country(&mut self.conn, country)
    }

    /// Overwrites a persisted country.
    ///
    /// # Errors
    ///
    /// Returns an error if the country has no ID, does not exist, or the
    /// update fails.
    pub fn update_country(&mut self, country: &Country) -> Result<(), PersistenceError> {
        mutations::update_country(&mut self.conn, country)
    }

    /// Deletes a country.
    ///
    /// # Errors
    ///
    /// Returns an error if the country does not exist or the delete fails.
    pub fn delete_country(&mut self, country_id: i64) -> Result<(), PersistenceError> {
        mutations::delete_country(&mut self.conn, country_id)
    }

    // ========================================================================
    // States / Provinces
    // ========================================================================

    /// Retrieves a state/province by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_state_province_by_id(
        &mut self,
        state_province_id: i64,
    ) -> Result<Option<StateProvince>, PersistenceError> {
        queries::get_state_province_by_id(&mut self.conn, state_province_id)
    }

    /// Retrieves the states/provinces of one country in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_state_provinces_by_country_id(
        &mut self,
        country_id: i64,
        include_hidden: bool,
    ) -> Result<Vec<StateProvince>, PersistenceError> {
        queries::get_state_provinces_by_country_id(&mut self.conn, country_id, include_hidden)
    }

    /// Retrieves every state/province.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_all_state_provinces(
        &mut self,
        include_hidden: bool,
    ) -> Result<Vec<StateProvince>, PersistenceError> {
        queries::get_all_state_provinces(&mut self.conn, include_hidden)
    }

    /// Inserts a state/province and returns its new ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_state_province(&mut self, state: &StateProvince) -> Result<i64, PersistenceError> {
        mutations::insert_state_province(&mut self.conn, state)
    }

    /// Overwrites a persisted state/province.
    ///
    /// # Errors
    ///
    /// Returns an error if the state has no ID, does not exist, or the
    /// update fails.
    pub fn update_state_province(&mut self, state: &StateProvince) -> Result<(), PersistenceError> {
        mutations::update_state_province(&mut self.conn, state)
    }

    /// Deletes a state/province.
    ///
    /// # Errors
    ///
    /// Returns an error if the state does not exist or the delete fails.
    pub fn delete_state_province(&mut self, state_province_id: i64) -> Result<(), PersistenceError> {
        mutations::delete_state_province(&mut self.conn, state_province_id)
    }

    // ========================================================================
    // Addresses
    // ========================================================================

    /// Inserts an address and returns its new ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_address(&mut self, address: &Address) -> Result<i64, PersistenceError> {
        mutations::insert_address(&mut self.conn, address)
    }

    /// Counts the addresses referencing a country.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_addresses_by_country_id(&mut self, country_id: i64) -> Result<usize, PersistenceError> {
        queries::count_addresses_by_country_id(&mut self.conn, country_id)
    }

    /// Counts the addresses referencing a state/province.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_addresses_by_state_province_id(
        &mut self,
        state_province_id: i64,
    ) -> Result<usize, PersistenceError> {
        queries::count_addresses_by_state_province_id(&mut self.conn, state_province_id)
    }
}
