// ABOUTME: Core types and constants for the recruiting coach roster importer
// ABOUTME: Foundation crate with import errors, coach models, and CSV column constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recruit Core
//!
//! Foundation crate shared by the importer library and its binaries. It holds the
//! types that change rarely so the workspace keeps incremental compilation cheap.
//!
//! ## Modules
//!
//! - **errors**: `ImportError` taxonomy and the `ImportResult` alias
//! - **models**: `CoachRecord`, `StoredCoach`, and `ImportCheckpoint`
//! - **constants**: CSV header names and import defaults

/// Structured error types for every stage of the import pipeline
pub mod errors;

/// Coach roster data models
pub mod models;

/// CSV column names and import defaults
pub mod constants;
