// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use geodir_domain::Address;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::addresses;
use crate::error::PersistenceError;

/// Inserts an address and returns its assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_address(
    conn: &mut SqliteConnection,
    address: &Address,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(addresses::table)
        .values((
            addresses::country_id.eq(address.country_id),
            addresses::state_province_id.eq(address.state_province_id),
            addresses::city.eq(&address.city),
            addresses::address1.eq(&address.address1),
            addresses::zip_postal_code.eq(&address.zip_postal_code),
        ))
        .execute(conn)?;

    let address_id: i64 = get_last_insert_rowid(conn)?;

    info!(address_id, "Address inserted");

    Ok(address_id)
}
