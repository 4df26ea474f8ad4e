//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/view orchestration.
//!
//! # Invariants
//! - Repository writes validate records before any SQL mutation.
//! - Specialized records are written to their base table and their own
//!   table in one transaction.
//! - Repositories refuse connections that are not fully migrated.

pub mod dictionary_repo;
pub mod error;
pub mod lexicon_repo;
pub mod resource_repo;
mod support;
