// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Country mutations.
//!
//! A country row, its locales and its store mappings are always written
//! together inside one transaction.

use diesel::SqliteConnection;
use diesel::prelude::*;
use geodir_domain::Country;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{countries, country_locales, country_store_mappings};
use crate::error::PersistenceError;

fn flag(value: bool) -> i32 {
    i32::from(value)
}

/// Replaces the locales and store mappings of a country.
fn write_children(
    conn: &mut SqliteConnection,
    country_id: i64,
    country: &Country,
) -> Result<(), PersistenceError> {
    diesel::delete(country_locales::table.filter(country_locales::country_id.eq(country_id)))
        .execute(conn)?;
    for locale in &country.locales {
        diesel::insert_into(country_locales::table)
            .values((
                country_locales::country_id.eq(country_id),
                country_locales::language_id.eq(locale.language_id),
                country_locales::name.eq(&locale.name),
            ))
            .execute(conn)?;
    }

    diesel::delete(
        country_store_mappings::table.filter(country_store_mappings::country_id.eq(country_id)),
    )
    .execute(conn)?;
    for store_id in &country.store_ids {
        diesel::insert_into(country_store_mappings::table)
            .values((
                country_store_mappings::country_id.eq(country_id),
                country_store_mappings::store_id.eq(*store_id),
            ))
            .execute(conn)?;
    }

    debug!(
        country_id,
        locales = country.locales.len(),
        stores = country.store_ids.len(),
        "Wrote country locales and store mappings"
    );

    Ok(())
}

/// Inserts a new country and returns its assigned ID.
///
/// Any `country_id` already set on `country` is ignored.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `country` - The country to insert
///
/// # Errors
///
/// Returns an error if any insert fails. Nothing is written in that case.
pub fn insert_country(
    conn: &mut SqliteConnection,
    country: &Country,
) -> Result<i64, PersistenceError> {
    info!(
        "Inserting country: {} ({})",
        country.name, country.two_letter_iso_code
    );

    let country_id: i64 = conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(countries::table)
            .values((
                countries::name.eq(&country.name),
                countries::two_letter_iso_code.eq(&country.two_letter_iso_code),
                countries::three_letter_iso_code.eq(&country.three_letter_iso_code),
                countries::numeric_iso_code.eq(country.numeric_iso_code),
                countries::allows_billing.eq(flag(country.allows_billing)),
                countries::allows_shipping.eq(flag(country.allows_shipping)),
                countries::subject_to_vat.eq(flag(country.subject_to_vat)),
                countries::published.eq(flag(country.published)),
                countries::display_order.eq(country.display_order),
            ))
            .execute(conn)?;

        let country_id: i64 = get_last_insert_rowid(conn)?;
        write_children(conn, country_id, country)?;
        Ok(country_id)
    })?;

    info!(country_id, "Country inserted");

    Ok(country_id)
}

/// Overwrites an existing country, including its locales and store mappings.
///
/// # Errors
///
/// Returns an error if:
/// - `country` has no ID
/// - No country with that ID exists
/// - The database update fails
pub fn update_country(
    conn: &mut SqliteConnection,
    country: &Country,
) -> Result<(), PersistenceError> {
    let country_id: i64 = country
        .country_id
        .ok_or(PersistenceError::MissingId("Country"))?;

    info!(country_id, "Updating country");

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let affected: usize =
            diesel::update(countries::table.filter(countries::country_id.eq(country_id)))
                .set((
                    countries::name.eq(&country.name),
                    countries::two_letter_iso_code.eq(&country.two_letter_iso_code),
                    countries::three_letter_iso_code.eq(&country.three_letter_iso_code),
                    countries::numeric_iso_code.eq(country.numeric_iso_code),
                    countries::allows_billing.eq(flag(country.allows_billing)),
                    countries::allows_shipping.eq(flag(country.allows_shipping)),
                    countries::subject_to_vat.eq(flag(country.subject_to_vat)),
                    countries::published.eq(flag(country.published)),
                    countries::display_order.eq(country.display_order),
                ))
                .execute(conn)?;

        if affected == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Country {country_id} not found"
            )));
        }

        write_children(conn, country_id, country)
    })
}

/// Deletes a country. Locales and store mappings cascade.
///
/// States/provinces referencing the country are left untouched.
///
/// # Errors
///
/// Returns an error if no country with that ID exists or the delete fails.
pub fn delete_country(conn: &mut SqliteConnection, country_id: i64) -> Result<(), PersistenceError> {
    info!(country_id, "Deleting country");

    let affected: usize =
        diesel::delete(countries::table.filter(countries::country_id.eq(country_id)))
            .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Country {country_id} not found"
        )));
    }

    Ok(())
}
