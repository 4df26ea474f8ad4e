//! Page views returning template contexts.
//!
//! # Responsibility
//! - Run the read queries behind each page and shape them into serializable
//!   contexts. Rendering is left to the caller.
//!
//! # Invariants
//! - Views never write.
//! - Every render emits one `view_render` event with duration and status.

use crate::model::dictionary::Dictionary;
use crate::model::resource::{Language, Unit};
use crate::model::word::Word;
use crate::repo::dictionary_repo::DictionaryRepository;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::lexicon_repo::{LexiconRepository, LinkedSentence};
use crate::repo::resource_repo::ResourceRepository;
use crate::service::lexicon_service::{CounterpartMeaning, LexiconService, WordLinks};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::time::Instant;

const DEFAULT_EXAMPLE_WORD: &str = "caa";
const DEFAULT_EXAMPLE_LANGUAGE: &str = "Hooca\u{328}k";
const DEFAULT_EXAMPLE_UNIT_ID: &str = "72141525536263472";

/// Context for the bulk download page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadContext {
    /// All dictionaries, non-decreasing in `number`.
    pub dictionaries: Vec<Dictionary>,
}

/// Literal lookups shown on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeExamples {
    /// Unit name searched inside `language_name`.
    pub word_name: String,
    /// Exact language name.
    pub language_name: String,
    /// Public id of the second example unit.
    pub unit_id: String,
}

impl Default for HomeExamples {
    fn default() -> Self {
        Self {
            word_name: DEFAULT_EXAMPLE_WORD.to_string(),
            language_name: DEFAULT_EXAMPLE_LANGUAGE.to_string(),
            unit_id: DEFAULT_EXAMPLE_UNIT_ID.to_string(),
        }
    }
}

/// Context for the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeContext {
    pub example1: Option<Unit>,
    pub example2: Unit,
}

/// Context for one word page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordContext {
    pub word: Word,
    pub dictionary: Dictionary,
    pub language: Language,
    pub meanings: Vec<CounterpartMeaning>,
    pub sentences: Vec<LinkedSentence>,
    #[serde(flatten)]
    pub links: WordLinks,
}

/// Lists every dictionary ordered by `number` for bulk export.
pub fn download<D: DictionaryRepository>(dictionaries: &D) -> RepoResult<DownloadContext> {
    render_logged("download", || {
        Ok(DownloadContext {
            dictionaries: dictionaries.list_dictionaries()?,
        })
    })
}

/// Runs the two example lookups of the home page.
///
/// # Errors
/// - `RepoError::NotFound` when `examples.unit_id` does not exist.
pub fn home<R: ResourceRepository>(
    resources: &R,
    examples: &HomeExamples,
) -> RepoResult<HomeContext> {
    render_logged("home", || {
        let example1 =
            resources.first_unit_in_language(&examples.word_name, &examples.language_name)?;
        let example2 = resources
            .get_unit_by_id(&examples.unit_id)?
            .ok_or_else(|| RepoError::not_found("unit", &examples.unit_id))?;
        Ok(HomeContext { example1, example2 })
    })
}

/// Assembles the page of one word: owning dictionary, meanings, example
/// sentences and both see-also directions.
pub fn word<L, D, R>(
    lexicon: &LexiconService<L>,
    dictionaries: &D,
    resources: &R,
    id: &str,
) -> RepoResult<WordContext>
where
    L: LexiconRepository,
    D: DictionaryRepository,
    R: ResourceRepository,
{
    render_logged("word", || {
        let word = lexicon.require_word(id)?;
        let dictionary = dictionaries
            .get_dictionary(word.dictionary_pk)?
            .ok_or_else(|| RepoError::not_found("dictionary", word.dictionary_pk))?;
        let language = resources
            .get_language(word.unit.language_pk)?
            .ok_or_else(|| RepoError::not_found("language", word.unit.language_pk))?;
        let meanings = lexicon.word_meanings(word.pk())?;
        let sentences = lexicon.word_sentences(word.pk())?;
        let links = lexicon.word_links(word.pk())?;

        Ok(WordContext {
            word,
            dictionary,
            language,
            meanings,
            sentences,
            links,
        })
    })
}

fn render_logged<T>(view: &'static str, render: impl FnOnce() -> RepoResult<T>) -> RepoResult<T> {
    let started_at = Instant::now();
    match render() {
        Ok(context) => {
            info!(
                "event=view_render module=views status=ok view={} duration_ms={}",
                view,
                started_at.elapsed().as_millis()
            );
            Ok(context)
        }
        Err(err) => {
            error!(
                "event=view_render module=views status=error view={} duration_ms={} error={}",
                view,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}
