// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State/province queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use geodir_domain::{LocalizedName, StateProvince};
use std::collections::HashMap;
use tracing::debug;

use crate::diesel_schema::{state_province_locales, state_provinces};
use crate::error::PersistenceError;

/// Diesel Queryable struct for state/province rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = state_provinces)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct StateProvinceRow {
    state_province_id: i64,
    country_id: i64,
    name: String,
    abbreviation: String,
    published: i32,
    display_order: i32,
}

fn hydrate(
    conn: &mut SqliteConnection,
    rows: Vec<StateProvinceRow>,
) -> Result<Vec<StateProvince>, PersistenceError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = rows.iter().map(|r| r.state_province_id).collect();

    let locale_rows: Vec<(i64, i64, String)> = state_province_locales::table
        .filter(state_province_locales::state_province_id.eq_any(ids))
        .order(state_province_locales::state_province_locale_id.asc())
        .select((
            state_province_locales::state_province_id,
            state_province_locales::language_id,
            state_province_locales::name,
        ))
        .load(conn)?;

    let mut locales: HashMap<i64, Vec<LocalizedName>> = HashMap::new();
    for (state_province_id, language_id, name) in locale_rows {
        locales
            .entry(state_province_id)
            .or_default()
            .push(LocalizedName { language_id, name });
    }

    Ok(rows
        .into_iter()
        .map(|row| StateProvince {
            state_province_id: Some(row.state_province_id),
            country_id: row.country_id,
            locales: locales.remove(&row.state_province_id).unwrap_or_default(),
            name: row.name,
            abbreviation: row.abbreviation,
            published: row.published != 0,
            display_order: row.display_order,
        })
        .collect())
}

/// Retrieves a state/province by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the state/province is not found.
pub fn get_state_province_by_id(
    conn: &mut SqliteConnection,
    state_province_id: i64,
) -> Result<Option<StateProvince>, PersistenceError> {
    debug!("Looking up state/province by ID: {}", state_province_id);

    let row: Option<StateProvinceRow> = state_provinces::table
        .filter(state_provinces::state_province_id.eq(state_province_id))
        .select(StateProvinceRow::as_select())
        .first(conn)
        .optional()?;

    match row {
        Some(row) => Ok(hydrate(conn, vec![row])?.pop()),
        None => Ok(None),
    }
}

/// Retrieves the states/provinces of one country.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `country_id` - The country to list states for
/// * `include_hidden` - Whether unpublished states are included
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_state_provinces_by_country_id(
    conn: &mut SqliteConnection,
    country_id: i64,
    include_hidden: bool,
) -> Result<Vec<StateProvince>, PersistenceError> {
    let mut query = state_provinces::table
        .filter(state_provinces::country_id.eq(country_id))
        .select(StateProvinceRow::as_select())
        .into_boxed();

    if !include_hidden {
        query = query.filter(state_provinces::published.eq(1));
    }

    let rows: Vec<StateProvinceRow> = query
        .order((
            state_provinces::display_order.asc(),
            state_provinces::name.asc(),
            state_provinces::state_province_id.asc(),
        ))
        .load(conn)?;

    debug!(
        country_id,
        count = rows.len(),
        include_hidden,
        "Loaded states/provinces for country"
    );

    hydrate(conn, rows)
}

/// Retrieves every state/province across all countries.
///
/// Rows are grouped by country ID, then follow the usual display order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_all_state_provinces(
    conn: &mut SqliteConnection,
    include_hidden: bool,
) -> Result<Vec<StateProvince>, PersistenceError> {
    let mut query = state_provinces::table
        .select(StateProvinceRow::as_select())
        .into_boxed();

    if !include_hidden {
        query = query.filter(state_provinces::published.eq(1));
    }

    let rows: Vec<StateProvinceRow> = query
        .order((
            state_provinces::country_id.asc(),
            state_provinces::display_order.asc(),
            state_provinces::name.asc(),
            state_provinces::state_province_id.asc(),
        ))
        .load(conn)?;

    debug!(count = rows.len(), include_hidden, "Loaded all states/provinces");

    hydrate(conn, rows)
}
