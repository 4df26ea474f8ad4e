//! Words and the association records hanging off them.
//!
//! # Responsibility
//! - Model lexical entries (`Word`) as units of a dictionary.
//! - Model see-also edges, example-sentence links and counterparts.
//!
//! # Invariants
//! - A word belongs to exactly one dictionary.
//! - `number` disambiguates homonyms inside a dictionary and defaults to 0.
//! - See-also edges are directed and may repeat; cycles are allowed.

use super::resource::{
    validate_reference, ModelValidationError, Pk, Unit, Value, UNSAVED_PK,
};
use serde::{Deserialize, Serialize};

/// Separator used in the denormalized part-of-speech column.
pub const POS_SEPARATOR: &str = "; ";

/// A lexical entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    #[serde(flatten)]
    pub unit: Unit,
    pub phonetic: Option<String>,
    /// Concatenated part-of-speech annotations, see [`Word::parts_of_speech`].
    pub pos: Option<String>,
    pub dictionary_pk: Pk,
    pub number: i64,
}

impl Word {
    /// Creates an unsaved word with `number = 0`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        language_pk: Pk,
        dictionary_pk: Pk,
    ) -> Self {
        Self {
            unit: Unit::new(id, name, language_pk),
            phonetic: None,
            pos: None,
            dictionary_pk,
            number: 0,
        }
    }

    pub fn pk(&self) -> Pk {
        self.unit.pk
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        self.unit.validate()?;
        validate_reference("dictionary_pk", self.dictionary_pk)
    }

    /// Splits the denormalized `pos` column into single annotations.
    pub fn parts_of_speech(&self) -> Vec<&str> {
        self.pos
            .as_deref()
            .map(|value| {
                value
                    .split(';')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Stores annotations into the denormalized `pos` column.
    ///
    /// An empty list clears the column.
    pub fn set_parts_of_speech<S: AsRef<str>>(&mut self, parts: &[S]) {
        let joined = parts
            .iter()
            .map(|part| part.as_ref().trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(POS_SEPARATOR);
        self.pos = if joined.is_empty() { None } else { Some(joined) };
    }
}

/// Directed "see also" cross-reference between two words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeeAlso {
    pub pk: Pk,
    pub source_pk: Pk,
    pub target_pk: Pk,
    pub description: Option<String>,
}

impl SeeAlso {
    pub fn new(source_pk: Pk, target_pk: Pk) -> Self {
        Self {
            pk: UNSAVED_PK,
            source_pk,
            target_pk,
            description: None,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_reference("source_pk", self.source_pk)?;
        validate_reference("target_pk", self.target_pk)
    }
}

/// Link from a word to an example sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSentence {
    pub pk: Pk,
    pub word_pk: Pk,
    pub sentence_pk: Pk,
    pub description: Option<String>,
}

impl WordSentence {
    pub fn new(word_pk: Pk, sentence_pk: Pk) -> Self {
        Self {
            pk: UNSAVED_PK,
            word_pk,
            sentence_pk,
            description: None,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_reference("word_pk", self.word_pk)?;
        validate_reference("sentence_pk", self.sentence_pk)
    }
}

/// "This word expresses this meaning."
///
/// The embedded value's `parameter_pk` is the meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterpart {
    #[serde(flatten)]
    pub value: Value,
    pub word_pk: Pk,
}

impl Counterpart {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        meaning_pk: Pk,
        word_pk: Pk,
    ) -> Self {
        Self {
            value: Value::new(id, name, meaning_pk),
            word_pk,
        }
    }

    pub fn pk(&self) -> Pk {
        self.value.pk
    }

    pub fn meaning_pk(&self) -> Pk {
        self.value.parameter_pk
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        self.value.validate()?;
        validate_reference("word_pk", self.word_pk)
    }
}

#[cfg(test)]
mod tests {
    use super::Word;

    #[test]
    fn parts_of_speech_split_and_trim() {
        let mut word = Word::new("w1", "caa", 1, 1);
        word.pos = Some("noun ;verb;; adj".to_string());
        assert_eq!(word.parts_of_speech(), vec!["noun", "verb", "adj"]);
    }

    #[test]
    fn set_parts_of_speech_joins_and_clears() {
        let mut word = Word::new("w1", "caa", 1, 1);
        word.set_parts_of_speech(&["noun", " ", "verb"]);
        assert_eq!(word.pos.as_deref(), Some("noun; verb"));

        word.set_parts_of_speech::<&str>(&[]);
        assert_eq!(word.pos, None);
        assert!(word.parts_of_speech().is_empty());
    }
}
