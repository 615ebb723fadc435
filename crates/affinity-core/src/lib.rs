//! # Affinity Core Library
//!
//! Scores compatibility among a fixed universe of named entities, derived from scored
//! group-membership records, and exhaustively searches for the best-scoring assignment
//! of entities into a five-role structure.
//!
//! ## Architectural Philosophy
//!
//! The library is split into three layers with a clear separation of concerns.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Universe`, `Group`, role
//!   assignments), the group input reader, the `GroupScoreIndex`, the immutable pair and
//!   triple score tables, and the pure `CompatibilityScorer`.
//!
//! - **[`engine`]: The Logic Core.** Configuration, error types, progress reporting, the
//!   on-disk `ScoreCache`, partitioning and worker-pool utilities, the bounded top-N state,
//!   and the parallel tasks that build tables and scan search partitions.
//!
//! - **[`workflows`]: The Public API.** `build_or_load` produces a `Tables` value (from cache
//!   when possible) and `FiveRoleSearch` runs the best/top-N/specific queries against it.

pub mod core;
pub mod engine;
pub mod workflows;
