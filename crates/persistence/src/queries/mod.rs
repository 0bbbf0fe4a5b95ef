// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for the persistence layer.
//!
//! This module contains all read-only queries.
//!
//! ## Module Organization
//!
//! - `countries` — Country lookups, hydrated with locales and store mappings
//! - `state_provinces` — State/province lookups, hydrated with locales
//! - `addresses` — Address usage counts

pub mod addresses;
pub mod countries;
pub mod state_provinces;

pub use addresses::{count_addresses_by_country_id, count_addresses_by_state_province_id};
pub use countries::{
    get_all_countries, get_countries_by_ids, get_country_by_id,
    get_countries_by_two_letter_iso_code,
};
pub use state_provinces::{
    get_all_state_provinces, get_state_province_by_id, get_state_provinces_by_country_id,
};
