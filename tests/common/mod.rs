//! Common test utilities for upsync CLI and scenario tests.
//!
//! - `TestEnv`: isolated project, home and destination directories
//! - helpers to build expected file sets

#![allow(dead_code)]

pub mod env;

pub use env::*;

use std::collections::BTreeSet;

/// Build a set of relative paths for comparisons with `remote_files()`
pub fn paths(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}
