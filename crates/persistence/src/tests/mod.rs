// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;

use crate::Persistence;
use geodir_domain::{Country, StateProvince};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_country(name: &str, iso2: &str, iso3: &str) -> Country {
    Country::new(name, iso2, iso3)
}

/// Inserts a country and returns it as stored.
pub fn seed_country(persistence: &mut Persistence, name: &str, iso2: &str, iso3: &str) -> Country {
    let id: i64 = persistence
        .insert_country(&create_test_country(name, iso2, iso3))
        .expect("insert country");
    persistence
        .get_country_by_id(id)
        .expect("query country")
        .expect("country exists")
}

/// Inserts a state/province and returns it as stored.
pub fn seed_state(
    persistence: &mut Persistence,
    country_id: i64,
    name: &str,
    abbreviation: &str,
) -> StateProvince {
    let id: i64 = persistence
        .insert_state_province(&StateProvince::new(country_id, name, abbreviation))
        .expect("insert state");
    persistence
        .get_state_province_by_id(id)
        .expect("query state")
        .expect("state exists")
}
