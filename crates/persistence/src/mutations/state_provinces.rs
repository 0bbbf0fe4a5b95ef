// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State/province mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use geodir_domain::StateProvince;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{state_province_locales, state_provinces};
use crate::error::PersistenceError;

fn write_locales(
    conn: &mut SqliteConnection,
    state_province_id: i64,
    state: &StateProvince,
) -> Result<(), PersistenceError> {
    diesel::delete(
        state_province_locales::table
            .filter(state_province_locales::state_province_id.eq(state_province_id)),
    )
    .execute(conn)?;

    for locale in &state.locales {
        diesel::insert_into(state_province_locales::table)
            .values((
                state_province_locales::state_province_id.eq(state_province_id),
                state_province_locales::language_id.eq(locale.language_id),
                state_province_locales::name.eq(&locale.name),
            ))
            .execute(conn)?;
    }

    debug!(
        state_province_id,
        locales = state.locales.len(),
        "Wrote state/province locales"
    );

    Ok(())
}

/// Inserts a new state/province and returns its assigned ID.
///
/// The referenced country is not checked here.
///
/// # Errors
///
/// Returns an error if any insert fails. Nothing is written in that case.
pub fn insert_state_province(
    conn: &mut SqliteConnection,
    state: &StateProvince,
) -> Result<i64, PersistenceError> {
    info!(
        "Inserting state/province: {} (country {})",
        state.name, state.country_id
    );

    let state_province_id: i64 = conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(state_provinces::table)
            .values((
                state_provinces::country_id.eq(state.country_id),
                state_provinces::name.eq(&state.name),
                state_provinces::abbreviation.eq(&state.abbreviation),
                state_provinces::published.eq(i32::from(state.published)),
                state_provinces::display_order.eq(state.display_order),
            ))
            .execute(conn)?;

        let state_province_id: i64 = get_last_insert_rowid(conn)?;
        write_locales(conn, state_province_id, state)?;
        Ok(state_province_id)
    })?;

    info!(state_province_id, "State/province inserted");

    Ok(state_province_id)
}

/// Overwrites an existing state/province, including its locales.
///
/// # Errors
///
/// Returns an error if:
/// - `state` has no ID
/// - No state/province with that ID exists
/// - The database update fails
pub fn update_state_province(
    conn: &mut SqliteConnection,
    state: &StateProvince,
) -> Result<(), PersistenceError> {
    let state_province_id: i64 = state
        .state_province_id
        .ok_or(PersistenceError::MissingId("State/province"))?;

    info!(state_province_id, "Updating state/province");

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let affected: usize = diesel::update(
            state_provinces::table.filter(state_provinces::state_province_id.eq(state_province_id)),
        )
        .set((
            state_provinces::country_id.eq(state.country_id),
            state_provinces::name.eq(&state.name),
            state_provinces::abbreviation.eq(&state.abbreviation),
            state_provinces::published.eq(i32::from(state.published)),
            state_provinces::display_order.eq(state.display_order),
        ))
        .execute(conn)?;

        if affected == 0 {
            return Err(PersistenceError::NotFound(format!(
                "State/province {state_province_id} not found"
            )));
        }

        write_locales(conn, state_province_id, state)
    })
}

/// Deletes a state/province. Its locales cascade.
///
/// # Errors
///
/// Returns an error if no state/province with that ID exists or the delete
/// fails.
pub fn delete_state_province(
    conn: &mut SqliteConnection,
    state_province_id: i64,
) -> Result<(), PersistenceError> {
    info!(state_province_id, "Deleting state/province");

    let affected: usize = diesel::delete(
        state_provinces::table.filter(state_provinces::state_province_id.eq(state_province_id)),
    )
    .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "State/province {state_province_id} not found"
        )));
    }

    Ok(())
}
