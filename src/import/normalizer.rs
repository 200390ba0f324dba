// ABOUTME: Record normalizer mapping raw roster rows onto canonical coach records
// ABOUTME: Splits coach names and turns blank optional cells into None
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use recruit_core::constants::columns;
use recruit_core::models::CoachRecord;

use super::reader::RawCsvRow;

/// Split a full name into `(first_name, last_name)`
///
/// The first whitespace-delimited token is the first name; the remaining tokens,
/// joined by single spaces, are the last name. A single token leaves the last
/// name empty.
#[must_use]
pub fn split_name(full_name: &str) -> (String, String) {
    let mut tokens = full_name.split_whitespace();
    let first = tokens.next().unwrap_or_default().to_owned();
    let last = tokens.collect::<Vec<_>>().join(" ");
    (first, last)
}

/// Map one raw row onto a [`CoachRecord`]
#[must_use]
pub fn normalize_row(row: &RawCsvRow) -> CoachRecord {
    let (first_name, last_name) = split_name(row.get(columns::COACH_NAME).unwrap_or_default());

    CoachRecord {
        first_name,
        last_name,
        email: required(row, columns::EMAIL),
        school: required(row, columns::SCHOOL),
        sport: required(row, columns::SPORT),
        phone: optional(row, columns::PHONE),
        position: optional(row, columns::COACH_ROLE),
        division: optional(row, columns::DIVISION),
        conference: optional(row, columns::CONFERENCE),
        state: optional(row, columns::STATE),
        region: optional(row, columns::REGION),
    }
}

/// Normalize a parsed file, preserving order
#[must_use]
pub fn normalize_rows(rows: &[RawCsvRow]) -> Vec<CoachRecord> {
    rows.iter().map(normalize_row).collect()
}

fn required(row: &RawCsvRow, column: &str) -> String {
    row.get(column).unwrap_or_default().to_owned()
}

fn optional(row: &RawCsvRow, column: &str) -> Option<String> {
    row.get(column)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}
