// ABOUTME: Coach roster data models shared by the importer and its tools
// ABOUTME: Re-exports coach records and import checkpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Canonical coach record and its persisted form
pub mod coach;

/// Durable import progress marker
pub mod checkpoint;

pub use checkpoint::ImportCheckpoint;
pub use coach::{CoachRecord, StoredCoach};
