//! listpatch-util - Support utilities for the listpatch engine.
//!
//! Sorted-insertion helpers used by the diff engine's ordered index
//! lists, and a seeded fuzzer for reproducible differential tests.

pub mod fuzzer;
pub mod sort;

pub use fuzzer::Fuzzer;
pub use sort::{sorted_insert, sorted_insert_by, sorted_position_by};
