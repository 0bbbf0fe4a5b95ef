// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Country queries.
//!
//! Countries are returned fully hydrated: their locales (in insertion
//! order) and store mappings are loaded alongside the country row.

use diesel::SqliteConnection;
use diesel::prelude::*;
use geodir_domain::{Country, LocalizedName};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::diesel_schema::{countries, country_locales, country_store_mappings};
use crate::error::PersistenceError;

/// Diesel Queryable struct for country rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = countries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct CountryRow {
    country_id: i64,
    name: String,
    two_letter_iso_code: String,
    three_letter_iso_code: String,
    numeric_iso_code: i32,
    allows_billing: i32,
    allows_shipping: i32,
    subject_to_vat: i32,
    published: i32,
    display_order: i32,
}

impl CountryRow {
    fn into_country(self, locales: Vec<LocalizedName>, store_ids: BTreeSet<i64>) -> Country {
        Country {
            country_id: Some(self.country_id),
            name: self.name,
            two_letter_iso_code: self.two_letter_iso_code,
            three_letter_iso_code: self.three_letter_iso_code,
            numeric_iso_code: self.numeric_iso_code,
            allows_billing: self.allows_billing != 0,
            allows_shipping: self.allows_shipping != 0,
            subject_to_vat: self.subject_to_vat != 0,
            published: self.published != 0,
            display_order: self.display_order,
            locales,
            store_ids,
        }
    }
}

/// Attaches locales and store mappings to a batch of country rows.
fn hydrate(
    conn: &mut SqliteConnection,
    rows: Vec<CountryRow>,
) -> Result<Vec<Country>, PersistenceError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = rows.iter().map(|r| r.country_id).collect();

    let locale_rows: Vec<(i64, i64, String)> = country_locales::table
        .filter(country_locales::country_id.eq_any(ids.clone()))
        .order(country_locales::country_locale_id.asc())
        .select((
            country_locales::country_id,
            country_locales::language_id,
            country_locales::name,
        ))
        .load(conn)?;

    let mut locales: HashMap<i64, Vec<LocalizedName>> = HashMap::new();
    for (country_id, language_id, name) in locale_rows {
        locales
            .entry(country_id)
            .or_default()
            .push(LocalizedName { language_id, name });
    }

    let mapping_rows: Vec<(i64, i64)> = country_store_mappings::table
        .filter(country_store_mappings::country_id.eq_any(ids.clone()))
        .select((
            country_store_mappings::country_id,
            country_store_mappings::store_id,
        ))
        .load(conn)?;

    let mut store_ids: HashMap<i64, BTreeSet<i64>> = HashMap::new();
    for (country_id, store_id) in mapping_rows {
        store_ids.entry(country_id).or_default().insert(store_id);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let id: i64 = row.country_id;
            row.into_country(
                locales.remove(&id).unwrap_or_default(),
                store_ids.remove(&id).unwrap_or_default(),
            )
        })
        .collect())
}

/// Retrieves a country by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the country is not found.
pub fn get_country_by_id(
    conn: &mut SqliteConnection,
    country_id: i64,
) -> Result<Option<Country>, PersistenceError> {
    debug!("Looking up country by ID: {}", country_id);

    let row: Option<CountryRow> = countries::table
        .filter(countries::country_id.eq(country_id))
        .select(CountryRow::as_select())
        .first(conn)
        .optional()?;

    match row {
        Some(row) => Ok(hydrate(conn, vec![row])?.pop()),
        None => Ok(None),
    }
}

/// Retrieves every country whose ID is in `country_ids`.
///
/// IDs that do not resolve are silently absent from the result.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_countries_by_ids(
    conn: &mut SqliteConnection,
    country_ids: &[i64],
) -> Result<Vec<Country>, PersistenceError> {
    if country_ids.is_empty() {
        return Ok(Vec::new());
    }

    debug!("Looking up {} countries by ID", country_ids.len());

    let rows: Vec<CountryRow> = countries::table
        .filter(countries::country_id.eq_any(country_ids.to_vec()))
        .order((
            countries::display_order.asc(),
            countries::name.asc(),
            countries::country_id.asc(),
        ))
        .select(CountryRow::as_select())
        .load(conn)?;

    hydrate(conn, rows)
}

/// Retrieves all countries, ordered by display order then name.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `include_hidden` - Whether unpublished countries are included
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_all_countries(
    conn: &mut SqliteConnection,
    include_hidden: bool,
) -> Result<Vec<Country>, PersistenceError> {
    let mut query = countries::table
        .select(CountryRow::as_select())
        .into_boxed();

    if !include_hidden {
        query = query.filter(countries::published.eq(1));
    }

    let rows: Vec<CountryRow> = query
        .order((
            countries::display_order.asc(),
            countries::name.asc(),
            countries::country_id.asc(),
        ))
        .load(conn)?;

    debug!(count = rows.len(), include_hidden, "Loaded countries");

    hydrate(conn, rows)
}

/// Retrieves every country with the given two-letter ISO code, oldest
/// first.
///
/// The code is compared after trimming and upper-casing. Codes are not
/// unique, so callers decide what several matches mean.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_countries_by_two_letter_iso_code(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<Vec<Country>, PersistenceError> {
    let normalized: String = geodir_domain::normalize_iso_code(code);

    debug!("Looking up countries by ISO code: {}", normalized);

    let rows: Vec<CountryRow> = countries::table
        .filter(countries::two_letter_iso_code.eq(&normalized))
        .order(countries::country_id.asc())
        .select(CountryRow::as_select())
        .load(conn)?;

    hydrate(conn, rows)
}
