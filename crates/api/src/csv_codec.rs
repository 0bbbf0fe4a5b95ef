// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export and import of states/provinces.
//!
//! ## Format
//!
//! Comma-delimited, no header row, one state per line:
//!
//! ```text
//! CountryTwoLetterIsoCode,Name,Abbreviation,Published,DisplayOrder
//! US,Washington,WA,true,0
//! ```
//!
//! `Published` is `true` or `false` (case-insensitive on import) and
//! `DisplayOrder` is a signed 32-bit integer. Fields are quoted only when
//! they need to be.
//!
//! ## Import semantics
//!
//! Rows are applied one at a time. A malformed row stops the import; rows
//! before it stay applied. Rows naming an unknown country are skipped, and
//! so are rows whose code is shared by several countries, since the target
//! cannot be told apart. A state is matched within its country by
//! case-insensitive name and updated, otherwise it is inserted.

use csv::StringRecord;
use geodir_domain::{Country, StateProvince, validate_state_province_fields};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::error::{ApiError, translate_persistence_error};
use crate::store::ReferenceDataStore;

/// Number of columns in every row.
const STATE_COLUMN_COUNT: usize = 5;

/// One parsed import row.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StateRow {
    country_code: String,
    name: String,
    abbreviation: String,
    published: bool,
    display_order: i32,
}

/// How an import row's country code resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountryMatch {
    Unique(i64),
    Unknown,
    Ambiguous(usize),
}

impl CountryMatch {
    fn from_countries(countries: &[Country]) -> Self {
        match countries {
            [] => Self::Unknown,
            [only] => only.country_id.map_or(Self::Unknown, Self::Unique),
            several => Self::Ambiguous(several.len()),
        }
    }
}

fn format_error(line: u64, reason: impl Into<String>) -> ApiError {
    ApiError::InvalidCsvFormat {
        line,
        reason: reason.into(),
    }
}

fn parse_published(value: &str, line: u64) -> Result<bool, ApiError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(format_error(
            line,
            format!("Published must be 'true' or 'false', got '{other}'"),
        )),
    }
}

fn parse_row(record: &StringRecord, line: u64) -> Result<StateRow, ApiError> {
    if record.len() != STATE_COLUMN_COUNT {
        return Err(format_error(
            line,
            format!(
                "Expected {STATE_COLUMN_COUNT} columns, found {}",
                record.len()
            ),
        ));
    }

    let field = |idx: usize| -> String { record.get(idx).unwrap_or_default().trim().to_string() };

    let display_order_raw: String = field(4);
    let display_order: i32 = display_order_raw.parse().map_err(|_| {
        format_error(
            line,
            format!("DisplayOrder must be an integer, got '{display_order_raw}'"),
        )
    })?;

    Ok(StateRow {
        country_code: field(0),
        name: field(1),
        abbreviation: field(2),
        published: parse_published(&field(3), line)?,
        display_order,
    })
}

/// Serializes states/provinces to CSV.
///
/// Each state's country is resolved to obtain its ISO code. States whose
/// country no longer exists are skipped.
///
/// # Returns
///
/// The CSV text and the number of states written.
///
/// # Errors
///
/// Returns an error if a country lookup fails or the writer fails.
pub fn export_states<S: ReferenceDataStore>(
    store: &mut S,
    states: &[StateProvince],
) -> Result<(String, usize), ApiError> {
    let mut country_codes: HashMap<i64, Option<String>> = HashMap::new();
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    let mut written: usize = 0;

    for state in states {
        if !country_codes.contains_key(&state.country_id) {
            let country: Option<Country> = store
                .country_by_id(state.country_id)
                .map_err(translate_persistence_error)?;
            country_codes.insert(state.country_id, country.map(|c| c.two_letter_iso_code));
        }

        let Some(Some(code)) = country_codes.get(&state.country_id) else {
            debug!(
                country_id = state.country_id,
                "Skipping export of state '{}' with unknown country", state.name
            );
            continue;
        };

        let display_order: String = state.display_order.to_string();
        writer
            .write_record([
                code.as_str(),
                state.name.as_str(),
                state.abbreviation.as_str(),
                if state.published { "true" } else { "false" },
                display_order.as_str(),
            ])
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to write CSV: {e}"),
            })?;
        written += 1;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|e| ApiError::Internal {
        message: format!("Failed to flush CSV: {e}"),
    })?;
    let content: String = String::from_utf8(bytes).map_err(|e| ApiError::Internal {
        message: format!("CSV output is not UTF-8: {e}"),
    })?;

    Ok((content, written))
}

/// Parses CSV content and creates or updates the states it describes.
///
/// # Returns
///
/// The number of rows that inserted or updated a state.
///
/// # Errors
///
/// Returns [`ApiError::InvalidCsvFormat`] on the first malformed row, or an
/// internal error if the store fails. Rows processed before the error are
/// not rolled back.
pub fn import_states<S: ReferenceDataStore>(store: &mut S, content: &str) -> Result<usize, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut country_ids: HashMap<String, CountryMatch> = HashMap::new();
    let mut imported: usize = 0;

    for result in reader.records() {
        let record: StringRecord = result.map_err(|e| {
            let line: u64 = e.position().map_or(0, csv::Position::line);
            format_error(line, e.to_string())
        })?;
        let line: u64 = record.position().map_or(0, csv::Position::line);

        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let row: StateRow = parse_row(&record, line)?;

        let code: String = geodir_domain::normalize_iso_code(&row.country_code);
        if !country_ids.contains_key(&code) {
            let countries: Vec<Country> = store
                .countries_by_two_letter_iso_code(&code)
                .map_err(translate_persistence_error)?;
            country_ids.insert(code.clone(), CountryMatch::from_countries(&countries));
        }
        let country_id: i64 = match country_ids.get(&code).copied() {
            Some(CountryMatch::Unique(id)) => id,
            Some(CountryMatch::Ambiguous(count)) => {
                warn!(
                    line,
                    count, "Skipping state '{}': country code '{}' is ambiguous", row.name, code
                );
                continue;
            }
            Some(CountryMatch::Unknown) | None => {
                warn!(line, "Skipping state '{}': unknown country '{}'", row.name, code);
                continue;
            }
        };

        let existing: Option<StateProvince> = store
            .state_provinces_by_country_id(country_id, true)
            .map_err(translate_persistence_error)?
            .into_iter()
            .find(|s| s.has_name(&row.name));

        let mut state: StateProvince =
            existing.unwrap_or_else(|| StateProvince::new(country_id, &row.name, ""));
        state.abbreviation = row.abbreviation;
        state.published = row.published;
        state.display_order = row.display_order;

        validate_state_province_fields(&state).map_err(|e| format_error(line, e.to_string()))?;

        if state.state_province_id.is_some() {
            store
                .update_state_province(&state)
                .map_err(translate_persistence_error)?;
            debug!(line, "Updated state '{}'", state.name);
        } else {
            store
                .insert_state_province(&state)
                .map_err(translate_persistence_error)?;
            debug!(line, "Inserted state '{}'", state.name);
        }
        imported += 1;
    }

    info!(imported, "State import finished");

    Ok(imported)
}
