//! Input readers for group tables.

pub mod groups;
