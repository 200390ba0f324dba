// ABOUTME: Constants for the coach roster CSV format and import defaults
// ABOUTME: Header names, required column list, batch sizing, and default paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Header names of the coach roster CSV
pub mod columns {
    /// Sport the coach works in
    pub const SPORT: &str = "Sport";
    /// School or program name
    pub const SCHOOL: &str = "School";
    /// Athletic conference
    pub const CONFERENCE: &str = "Conference";
    /// Division (e.g. D1, D2, NAIA)
    pub const DIVISION: &str = "Division";
    /// US state of the school
    pub const STATE: &str = "State";
    /// Full coach name, split into first and last name on import
    pub const COACH_NAME: &str = "Coach Name";
    /// Coach role, stored as `position`
    pub const COACH_ROLE: &str = "Coach Role";
    /// Contact email
    pub const EMAIL: &str = "Email";
    /// Contact phone
    pub const PHONE: &str = "Phone";
    /// Recruiting region (optional column)
    pub const REGION: &str = "Region";

    /// Columns that must be present in the header row
    pub const REQUIRED: &[&str] = &[
        SPORT, SCHOOL, CONFERENCE, DIVISION, STATE, COACH_NAME, COACH_ROLE, EMAIL, PHONE,
    ];
}

/// Import defaults
pub mod defaults {
    /// Bundled roster file used when no path is given
    pub const CSV_PATH: &str = "data/coaches.csv";

    /// Records per batch transaction
    pub const BATCH_SIZE: usize = 1000;

    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/recruiting.db";
}

/// Storage limits
pub mod limits {
    /// Largest accepted batch size
    pub const MAX_BATCH_SIZE: usize = 50_000;

    /// `SQLite` bind-parameter ceiling (`SQLITE_MAX_VARIABLE_NUMBER` since 3.32)
    pub const SQLITE_MAX_BIND_PARAMS: usize = 32_766;
}
