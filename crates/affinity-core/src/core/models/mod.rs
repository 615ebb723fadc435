//! # Core Models Module
//!
//! Data structures shared by every layer of the library.
//!
//! ## Key Components
//!
//! - [`ids`] - Compact identifiers for entities and groups
//! - [`universe`] - The sorted set of all entities, mapping names to identifiers
//! - [`group`] - A scored cluster of entity names, as read from input
//! - [`assignment`] - Five-role and seven-role assignments, and scored results

pub mod assignment;
pub mod group;
pub mod ids;
pub mod universe;
