// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! All mutations use Diesel DSL. The only backend-specific helper is
//! `get_last_insert_rowid()` from the `backend` module.
//!
//! ## Module Organization
//!
//! - `countries` — Country inserts, updates and deletes
//! - `state_provinces` — State/province inserts, updates and deletes
//! - `addresses` — Address inserts

pub mod addresses;
pub mod countries;
pub mod state_provinces;

pub use addresses::insert_address;
pub use countries::{delete_country, insert_country, update_country};
pub use state_provinces::{delete_state_province, insert_state_province, update_state_province};
