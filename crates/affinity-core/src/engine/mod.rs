//! # Engine Module
//!
//! The stateful and parallel machinery behind the public workflows.
//!
//! ## Overview
//!
//! The engine builds score tables from a [`GroupScoreIndex`](crate::core::index::GroupScoreIndex),
//! persists and restores them through the [`cache`], and scans the five-role search space in
//! independent partitions whose local results are merged by a single coordinator.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Worker counts, cache location and rebuild policy
//! - **Error Handling** ([`error`]) - Engine-level error kinds surfaced to callers
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Persistence** ([`cache`]) - Durable storage of the universe and score tables
//! - **Search State** ([`state`]) - Ranked candidates and the bounded top-N heap
//! - **Tasks** (`tasks`) - Pair-table, triple-table and partition-search work units
//! - **Utilities** (`utils`) - Enumeration cursors, partitioning and the worker pool
//!
//! ## Concurrency
//!
//! Workers only read shared immutable input (index, tables, universe) and mutate their
//! own local state. The calling thread owns every aggregate and merges worker results
//! after they complete; no locks are involved.

pub mod cache;
pub mod config;
pub mod error;
pub mod progress;
pub mod state;
pub(crate) mod tasks;
pub(crate) mod utils;
