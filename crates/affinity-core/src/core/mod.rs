//! # Core Module
//!
//! Fundamental data structures and pure computations for group-derived compatibility
//! scoring.
//!
//! ## Overview
//!
//! - **Models** ([`models`]) - Entity identifiers, the entity universe, groups, and the
//!   five-role and seven-role assignment structures
//! - **Input** ([`io`]) - Reading group rows from CSV tables
//! - **Index** ([`index`]) - Entity to group-membership index with shared-score lookups
//! - **Tables** ([`tables`]) - Immutable pair and triple score tables keyed by unordered
//!   entity sets
//! - **Scoring** ([`scoring`]) - The fixed linear formula over a seven-role assignment
//!
//! Nothing in this module spawns threads or touches shared mutable state; the parallel
//! parts of the system live in [`crate::engine`].

pub mod index;
pub mod io;
pub mod models;
pub mod scoring;
pub mod tables;
