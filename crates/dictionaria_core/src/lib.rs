//! Data model and page views for a dictionary publishing site.
//!
//! Dictionaries, meanings, words, see-also cross-references and counterparts
//! are stored as specializations of generic lexical-resource tables in SQLite.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod views;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::dictionary::Dictionary;
pub use model::meaning::{Meaning, SemanticField};
pub use model::resource::{
    Contribution, Language, ModelValidationError, Parameter, Pk, Sentence, Unit, Value,
    UNSAVED_PK,
};
pub use model::word::{Counterpart, SeeAlso, Word, WordSentence};
pub use repo::dictionary_repo::{DictionaryRepository, SqliteDictionaryRepository};
pub use repo::error::{RepoError, RepoResult};
pub use repo::lexicon_repo::{LexiconRepository, LinkedSentence, SqliteLexiconRepository};
pub use repo::resource_repo::{ResourceRepository, SqliteResourceRepository};
pub use service::lexicon_service::{CounterpartMeaning, LexiconService, WordLinks};
pub use views::{DownloadContext, HomeContext, HomeExamples, WordContext};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
