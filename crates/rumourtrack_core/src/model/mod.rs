//! Domain records for the rumour tracker.
//!
//! # Responsibility
//! - Define the canonical structs persisted to the three JSON data files.
//! - Keep the external camelCase field names in one place via serde renames.
//!
//! # Invariants
//! - Records are explicit structs; no loosely-typed map access anywhere.
//! - Cross-references between records are identifier strings only.

pub mod report;
pub mod rumour;
pub mod user;
