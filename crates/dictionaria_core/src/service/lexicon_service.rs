//! Lexicon use-case service.
//!
//! # Responsibility
//! - Expose the derived see-also relations of a word as one read model.
//! - Pair counterparts with the meanings they express.
//!
//! # Invariants
//! - Derived relations are computed from see-also edges on every call; nothing
//!   is cached or deduplicated.
//! - Service layer remains storage-agnostic.

use crate::model::meaning::Meaning;
use crate::model::resource::Pk;
use crate::model::word::{Counterpart, Word};
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::lexicon_repo::{LexiconRepository, LinkedSentence};
use serde::Serialize;

/// Both directions of see-also links for one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordLinks {
    /// Words that declare this word as a see-also target.
    pub linked_from: Vec<Word>,
    /// Words this word declares as see-also targets.
    pub links_to: Vec<Word>,
}

impl WordLinks {
    pub fn is_empty(&self) -> bool {
        self.linked_from.is_empty() && self.links_to.is_empty()
    }
}

/// A counterpart together with the meaning it expresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterpartMeaning {
    pub counterpart: Counterpart,
    pub meaning: Meaning,
}

/// Use-case service over lexicon repository implementations.
pub struct LexiconService<R: LexiconRepository> {
    repo: R,
}

impl<R: LexiconRepository> LexiconService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Gives access to the wrapped repository for write paths.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Loads a word by public id, failing when it does not exist.
    pub fn require_word(&self, id: &str) -> RepoResult<Word> {
        self.repo
            .get_word_by_id(id)?
            .ok_or_else(|| RepoError::not_found("word", id))
    }

    /// Source words of every see-also edge pointing at `word_pk`.
    pub fn linked_from(&self, word_pk: Pk) -> RepoResult<Vec<Word>> {
        self.repo.linked_from(word_pk)
    }

    /// Target words of every see-also edge leaving `word_pk`.
    pub fn links_to(&self, word_pk: Pk) -> RepoResult<Vec<Word>> {
        self.repo.links_to(word_pk)
    }

    /// Loads both link directions for one word.
    pub fn word_links(&self, word_pk: Pk) -> RepoResult<WordLinks> {
        Ok(WordLinks {
            linked_from: self.repo.linked_from(word_pk)?,
            links_to: self.repo.links_to(word_pk)?,
        })
    }

    /// Lists the meanings a word expresses, one entry per counterpart.
    pub fn word_meanings(&self, word_pk: Pk) -> RepoResult<Vec<CounterpartMeaning>> {
        let counterparts = self.repo.word_counterparts(word_pk)?;
        let mut items = Vec::with_capacity(counterparts.len());
        for counterpart in counterparts {
            let meaning_pk = counterpart.meaning_pk();
            let meaning = self.repo.get_meaning(meaning_pk)?.ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "counterpart `{}` references missing meaning {meaning_pk}",
                    counterpart.value.id
                ))
            })?;
            items.push(CounterpartMeaning {
                counterpart,
                meaning,
            });
        }
        Ok(items)
    }

    /// Lists example sentences of a word ordered by sentence id.
    pub fn word_sentences(&self, word_pk: Pk) -> RepoResult<Vec<LinkedSentence>> {
        self.repo.word_sentences(word_pk)
    }
}
