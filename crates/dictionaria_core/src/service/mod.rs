//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep view and CLI layers decoupled from storage details.

pub mod lexicon_service;
