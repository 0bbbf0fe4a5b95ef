// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other persistence test opens its database through
//! `Persistence::new_in_memory()`, so connection setup and migrations are
//! exercised implicitly. These tests cover the guarantees callers rely on.

use super::{create_test_persistence, seed_country};
use crate::Persistence;

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, crate::error::PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = create_test_persistence();
    let mut db2: Persistence = create_test_persistence();

    seed_country(&mut db1, "Canada", "CA", "CAN");

    assert_eq!(db1.get_all_countries(true).unwrap().len(), 1);
    assert_eq!(
        db2.get_all_countries(true).unwrap().len(),
        0,
        "db2 must not see rows written to db1"
    );
}

#[test]
fn test_migrations_applied_on_initialization() {
    let mut persistence: Persistence = create_test_persistence();

    assert!(persistence.get_all_countries(true).is_ok());
    assert!(persistence.get_all_state_provinces(true).is_ok());
    assert!(persistence.count_addresses_by_country_id(1).is_ok());
}
