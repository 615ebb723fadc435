//! # Workflows Module
//!
//! Top-level entry points of the library. Each workflow validates its inputs, drives
//! the engine tasks in order, reports progress, and returns plain result values.
//!
//! - **Tables** ([`tables`]) - builds the pair and triple score tables from group
//!   input, or restores them from the score cache when one is available.
//! - **Search** ([`search`]) - exhaustive, partitioned search for the best and top-N
//!   five-role combinations around a fixed parent.

pub mod search;
pub mod tables;
