//! Dictionary domain model.
//!
//! # Responsibility
//! - Define the generic lexical-resource records (`resource`).
//! - Define the dictionary specializations layered on top of them.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned `Pk`.
//! - Specialized records embed their base record and share its `pk`.

pub mod dictionary;
pub mod meaning;
pub mod resource;
pub mod word;
