// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Address usage counts.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use tracing::debug;

use crate::diesel_schema::addresses;
use crate::error::PersistenceError;

fn to_count(raw: i64) -> Result<usize, PersistenceError> {
    raw.to_usize()
        .ok_or_else(|| PersistenceError::QueryFailed(format!("Invalid row count: {raw}")))
}

/// Counts the addresses that reference a country.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_addresses_by_country_id(
    conn: &mut SqliteConnection,
    country_id: i64,
) -> Result<usize, PersistenceError> {
    let count: i64 = addresses::table
        .filter(addresses::country_id.eq(country_id))
        .count()
        .get_result(conn)?;

    debug!(country_id, count, "Counted addresses for country");

    to_count(count)
}

/// Counts the addresses that reference a state/province.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_addresses_by_state_province_id(
    conn: &mut SqliteConnection,
    state_province_id: i64,
) -> Result<usize, PersistenceError> {
    let count: i64 = addresses::table
        .filter(addresses::state_province_id.eq(state_province_id))
        .count()
        .get_result(conn)?;

    debug!(state_province_id, count, "Counted addresses for state/province");

    to_count(count)
}
