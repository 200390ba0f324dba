// ABOUTME: Error types for the importer, re-exported from the core crate
// ABOUTME: Keeps crate::errors as the import path used by every module and binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use recruit_core::errors::{ImportError, ImportResult};
