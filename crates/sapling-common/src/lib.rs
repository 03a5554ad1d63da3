//! Common utilities for the Sapling HTML parser.
//!
//! This crate provides shared infrastructure used by the parser crates and the CLI:
//! - **Warning System** - colored, de-duplicated terminal output for parse diagnostics

pub mod warning;
