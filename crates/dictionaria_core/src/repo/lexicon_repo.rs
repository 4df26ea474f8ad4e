//! Lexicon repository: meanings, words, see-also edges, example sentences
//! and counterparts.
//!
//! # Responsibility
//! - Persist specialized records over their base tables.
//! - Answer the relationship traversals of the word/meaning graph.
//!
//! # Invariants
//! - `links_to` / `linked_from` return one word per see-also edge, in edge
//!   insertion order. Duplicate edges yield duplicate words.
//! - Word sentences are ordered by sentence `id`.
//! - Dictionary word listing is ordered by `name ASC, number ASC, pk ASC`.

use super::error::RepoResult;
use super::resource_repo::{insert_unit, parse_sentence_row, SENTENCE_COLUMNS_SQL};
use super::support::{ensure_connection_ready, in_write_scope, TableSpec};
use crate::model::meaning::Meaning;
use crate::model::resource::{Parameter, Pk, Sentence, Unit, Value};
use crate::model::word::{Counterpart, SeeAlso, Word, WordSentence};
use rusqlite::{params, Connection, OptionalExtension, Params, Row};
use serde::Serialize;

const MEANING_SELECT_SQL: &str = "SELECT
    parameter.pk AS pk,
    parameter.id AS id,
    parameter.name AS name,
    parameter.description AS description,
    meaning.semantic_field_pk AS semantic_field_pk,
    meaning.semantic_category AS semantic_category,
    meaning.ids_code AS ids_code,
    meaning.representation AS representation
FROM meaning
INNER JOIN parameter ON parameter.pk = meaning.pk";

const WORD_COLUMNS_SQL: &str = "unit.pk AS pk,
    unit.id AS id,
    unit.name AS name,
    unit.description AS description,
    unit.language_pk AS language_pk,
    word.phonetic AS phonetic,
    word.pos AS pos,
    word.dictionary_pk AS dictionary_pk,
    word.number AS number";

const COUNTERPART_SELECT_SQL: &str = "SELECT
    value.pk AS pk,
    value.id AS id,
    value.name AS name,
    value.description AS description,
    value.parameter_pk AS parameter_pk,
    counterpart.word_pk AS word_pk
FROM counterpart
INNER JOIN value ON value.pk = counterpart.pk";

const REQUIRED_TABLES: &[TableSpec] = &[
    ("parameter", &["pk", "id", "name", "description"]),
    (
        "meaning",
        &[
            "pk",
            "semantic_field_pk",
            "semantic_category",
            "ids_code",
            "representation",
        ],
    ),
    ("unit", &["pk", "id", "name", "description", "language_pk"]),
    (
        "word",
        &["pk", "phonetic", "pos", "dictionary_pk", "number"],
    ),
    ("seealso", &["pk", "source_pk", "target_pk", "description"]),
    (
        "wordsentence",
        &["pk", "word_pk", "sentence_pk", "description"],
    ),
    ("value", &["pk", "id", "name", "description", "parameter_pk"]),
    ("counterpart", &["pk", "word_pk"]),
];

/// One example sentence reached from a word, with its link annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedSentence {
    pub association: WordSentence,
    pub sentence: Sentence,
}

/// Repository interface for the word/meaning graph.
pub trait LexiconRepository {
    fn create_meaning(&self, meaning: &Meaning) -> RepoResult<Pk>;
    fn get_meaning(&self, pk: Pk) -> RepoResult<Option<Meaning>>;
    /// Lists meanings of one semantic field ordered by `representation`, then `pk`.
    fn meanings_in_semantic_field(&self, semantic_field_pk: Pk) -> RepoResult<Vec<Meaning>>;

    fn create_word(&self, word: &Word) -> RepoResult<Pk>;
    fn get_word(&self, pk: Pk) -> RepoResult<Option<Word>>;
    fn get_word_by_id(&self, id: &str) -> RepoResult<Option<Word>>;
    fn dictionary_words(&self, dictionary_pk: Pk) -> RepoResult<Vec<Word>>;

    fn create_see_also(&self, edge: &SeeAlso) -> RepoResult<Pk>;
    /// Source words of every edge whose target is `word_pk`.
    fn linked_from(&self, word_pk: Pk) -> RepoResult<Vec<Word>>;
    /// Target words of every edge whose source is `word_pk`.
    fn links_to(&self, word_pk: Pk) -> RepoResult<Vec<Word>>;

    fn create_word_sentence(&self, link: &WordSentence) -> RepoResult<Pk>;
    fn word_sentences(&self, word_pk: Pk) -> RepoResult<Vec<LinkedSentence>>;

    fn create_counterpart(&self, counterpart: &Counterpart) -> RepoResult<Pk>;
    fn word_counterparts(&self, word_pk: Pk) -> RepoResult<Vec<Counterpart>>;
    fn meaning_counterparts(&self, meaning_pk: Pk) -> RepoResult<Vec<Counterpart>>;
}

/// SQLite-backed lexicon repository.
pub struct SqliteLexiconRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLexiconRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }

    fn query_list<T>(
        &self,
        sql: &str,
        params: impl Params,
        parse: impl Fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> RepoResult<Vec<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse(row)?);
        }
        Ok(items)
    }
}

impl LexiconRepository for SqliteLexiconRepository<'_> {
    fn create_meaning(&self, meaning: &Meaning) -> RepoResult<Pk> {
        meaning.validate()?;

        in_write_scope(self.conn, |conn| {
            let parameter = &meaning.parameter;
            conn.execute(
                "INSERT INTO parameter (id, name, description) VALUES (?1, ?2, ?3);",
                params![
                    parameter.id.as_str(),
                    parameter.name.as_str(),
                    parameter.description.as_deref(),
                ],
            )?;
            let pk = conn.last_insert_rowid();

            conn.execute(
                "INSERT INTO meaning (
                    pk,
                    semantic_field_pk,
                    semantic_category,
                    ids_code,
                    representation
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    pk,
                    meaning.semantic_field_pk,
                    meaning.semantic_category.as_deref(),
                    meaning.ids_code.as_deref(),
                    meaning.representation,
                ],
            )?;
            Ok(pk)
        })
    }

    fn get_meaning(&self, pk: Pk) -> RepoResult<Option<Meaning>> {
        let meaning = self
            .conn
            .query_row(
                &format!("{MEANING_SELECT_SQL} WHERE meaning.pk = ?1;"),
                [pk],
                parse_meaning_row,
            )
            .optional()?;
        Ok(meaning)
    }

    fn meanings_in_semantic_field(&self, semantic_field_pk: Pk) -> RepoResult<Vec<Meaning>> {
        // NULL representation sorts first in SQLite; push it to the end.
        self.query_list(
            &format!(
                "{MEANING_SELECT_SQL}
                 WHERE meaning.semantic_field_pk = ?1
                 ORDER BY meaning.representation IS NULL,
                          meaning.representation ASC,
                          parameter.pk ASC;"
            ),
            [semantic_field_pk],
            parse_meaning_row,
        )
    }

    fn create_word(&self, word: &Word) -> RepoResult<Pk> {
        word.validate()?;

        in_write_scope(self.conn, |conn| {
            let pk = insert_unit(conn, &word.unit)?;
            conn.execute(
                "INSERT INTO word (pk, phonetic, pos, dictionary_pk, number)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    pk,
                    word.phonetic.as_deref(),
                    word.pos.as_deref(),
                    word.dictionary_pk,
                    word.number,
                ],
            )?;
            Ok(pk)
        })
    }

    fn get_word(&self, pk: Pk) -> RepoResult<Option<Word>> {
        let word = self
            .conn
            .query_row(
                &format!(
                    "SELECT {WORD_COLUMNS_SQL}
                     FROM word
                     INNER JOIN unit ON unit.pk = word.pk
                     WHERE word.pk = ?1;"
                ),
                [pk],
                parse_word_row,
            )
            .optional()?;
        Ok(word)
    }

    fn get_word_by_id(&self, id: &str) -> RepoResult<Option<Word>> {
        let word = self
            .conn
            .query_row(
                &format!(
                    "SELECT {WORD_COLUMNS_SQL}
                     FROM word
                     INNER JOIN unit ON unit.pk = word.pk
                     WHERE unit.id = ?1;"
                ),
                [id],
                parse_word_row,
            )
            .optional()?;
        Ok(word)
    }

    fn dictionary_words(&self, dictionary_pk: Pk) -> RepoResult<Vec<Word>> {
        self.query_list(
            &format!(
                "SELECT {WORD_COLUMNS_SQL}
                 FROM word
                 INNER JOIN unit ON unit.pk = word.pk
                 WHERE word.dictionary_pk = ?1
                 ORDER BY unit.name ASC, word.number ASC, unit.pk ASC;"
            ),
            [dictionary_pk],
            parse_word_row,
        )
    }

    fn create_see_also(&self, edge: &SeeAlso) -> RepoResult<Pk> {
        edge.validate()?;

        self.conn.execute(
            "INSERT INTO seealso (source_pk, target_pk, description) VALUES (?1, ?2, ?3);",
            params![edge.source_pk, edge.target_pk, edge.description.as_deref()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn linked_from(&self, word_pk: Pk) -> RepoResult<Vec<Word>> {
        self.query_list(
            &format!(
                "SELECT {WORD_COLUMNS_SQL}
                 FROM seealso
                 INNER JOIN word ON word.pk = seealso.source_pk
                 INNER JOIN unit ON unit.pk = word.pk
                 WHERE seealso.target_pk = ?1
                 ORDER BY seealso.pk ASC;"
            ),
            [word_pk],
            parse_word_row,
        )
    }

    fn links_to(&self, word_pk: Pk) -> RepoResult<Vec<Word>> {
        self.query_list(
            &format!(
                "SELECT {WORD_COLUMNS_SQL}
                 FROM seealso
                 INNER JOIN word ON word.pk = seealso.target_pk
                 INNER JOIN unit ON unit.pk = word.pk
                 WHERE seealso.source_pk = ?1
                 ORDER BY seealso.pk ASC;"
            ),
            [word_pk],
            parse_word_row,
        )
    }

    fn create_word_sentence(&self, link: &WordSentence) -> RepoResult<Pk> {
        link.validate()?;

        self.conn.execute(
            "INSERT INTO wordsentence (word_pk, sentence_pk, description) VALUES (?1, ?2, ?3);",
            params![link.word_pk, link.sentence_pk, link.description.as_deref()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn word_sentences(&self, word_pk: Pk) -> RepoResult<Vec<LinkedSentence>> {
        self.query_list(
            &format!(
                "SELECT
                    wordsentence.pk AS link_pk,
                    wordsentence.word_pk AS link_word_pk,
                    wordsentence.description AS link_description,
                    {SENTENCE_COLUMNS_SQL}
                 FROM wordsentence
                 INNER JOIN sentence ON sentence.pk = wordsentence.sentence_pk
                 WHERE wordsentence.word_pk = ?1
                 ORDER BY sentence.id ASC, wordsentence.pk ASC;"
            ),
            [word_pk],
            |row| {
                let sentence = parse_sentence_row(row)?;
                Ok(LinkedSentence {
                    association: WordSentence {
                        pk: row.get("link_pk")?,
                        word_pk: row.get("link_word_pk")?,
                        sentence_pk: sentence.pk,
                        description: row.get("link_description")?,
                    },
                    sentence,
                })
            },
        )
    }

    fn create_counterpart(&self, counterpart: &Counterpart) -> RepoResult<Pk> {
        counterpart.validate()?;

        in_write_scope(self.conn, |conn| {
            let value = &counterpart.value;
            conn.execute(
                "INSERT INTO value (id, name, description, parameter_pk)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    value.id.as_str(),
                    value.name.as_str(),
                    value.description.as_deref(),
                    value.parameter_pk,
                ],
            )?;
            let pk = conn.last_insert_rowid();

            conn.execute(
                "INSERT INTO counterpart (pk, word_pk) VALUES (?1, ?2);",
                params![pk, counterpart.word_pk],
            )?;
            Ok(pk)
        })
    }

    fn word_counterparts(&self, word_pk: Pk) -> RepoResult<Vec<Counterpart>> {
        self.query_list(
            &format!(
                "{COUNTERPART_SELECT_SQL}
                 WHERE counterpart.word_pk = ?1
                 ORDER BY value.pk ASC;"
            ),
            [word_pk],
            parse_counterpart_row,
        )
    }

    fn meaning_counterparts(&self, meaning_pk: Pk) -> RepoResult<Vec<Counterpart>> {
        self.query_list(
            &format!(
                "{COUNTERPART_SELECT_SQL}
                 WHERE value.parameter_pk = ?1
                 ORDER BY value.pk ASC;"
            ),
            [meaning_pk],
            parse_counterpart_row,
        )
    }
}

fn parse_meaning_row(row: &Row<'_>) -> rusqlite::Result<Meaning> {
    Ok(Meaning {
        parameter: Parameter {
            pk: row.get("pk")?,
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
        },
        semantic_field_pk: row.get("semantic_field_pk")?,
        semantic_category: row.get("semantic_category")?,
        ids_code: row.get("ids_code")?,
        representation: row.get("representation")?,
    })
}

fn parse_word_row(row: &Row<'_>) -> rusqlite::Result<Word> {
    Ok(Word {
        unit: Unit {
            pk: row.get("pk")?,
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            language_pk: row.get("language_pk")?,
        },
        phonetic: row.get("phonetic")?,
        pos: row.get("pos")?,
        dictionary_pk: row.get("dictionary_pk")?,
        number: row.get("number")?,
    })
}

fn parse_counterpart_row(row: &Row<'_>) -> rusqlite::Result<Counterpart> {
    Ok(Counterpart {
        value: Value {
            pk: row.get("pk")?,
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            parameter_pk: row.get("parameter_pk")?,
        },
        word_pk: row.get("word_pk")?,
    })
}
