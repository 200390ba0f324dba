// ABOUTME: Canonical coach record produced by the normalizer and stored in the coaches table
// ABOUTME: Required fields are never null; optional fields are None when the source is blank
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// A coach as it is written to storage (identity not yet assigned)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachRecord {
    /// First whitespace-delimited token of the source name
    pub first_name: String,
    /// Remaining name tokens joined by single spaces
    pub last_name: String,
    /// Contact email, copied verbatim
    pub email: String,
    /// School or program
    pub school: String,
    /// Sport
    pub sport: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Coach role (head coach, assistant, ...)
    pub position: Option<String>,
    /// Division
    pub division: Option<String>,
    /// Conference
    pub conference: Option<String>,
    /// State
    pub state: Option<String>,
    /// Recruiting region
    pub region: Option<String>,
}

impl CoachRecord {
    /// Number of bound columns per record in a multi-row insert
    pub const COLUMN_COUNT: usize = 11;
}

/// A coach row read back from storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCoach {
    /// Storage-assigned identity
    pub id: i64,
    /// Record contents
    #[serde(flatten)]
    pub record: CoachRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let record = CoachRecord {
            first_name: "John".into(),
            last_name: "Smith".into(),
            ..CoachRecord::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["firstName"], "John");
        assert!(json["region"].is_null());
    }
}
