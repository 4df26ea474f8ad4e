//! Generic lexical-resource repository: languages, units, sentences and
//! semantic fields.
//!
//! # Responsibility
//! - Write and read the base records the dictionary entities refer to.
//! - Provide the unit lookups used by the home view.
//!
//! # Invariants
//! - Lookups by public `id` are exact and case-sensitive.
//! - `first_unit_in_language` is deterministic: lowest `pk` wins.

use super::error::RepoResult;
use super::support::{ensure_connection_ready, TableSpec};
use crate::model::meaning::SemanticField;
use crate::model::resource::{Language, Pk, Sentence, Unit};
use rusqlite::{params, Connection, OptionalExtension, Row};

const LANGUAGE_SELECT_SQL: &str = "SELECT
    pk,
    id,
    name,
    description,
    latitude,
    longitude
FROM language";

const UNIT_SELECT_SQL: &str = "SELECT
    unit.pk AS pk,
    unit.id AS id,
    unit.name AS name,
    unit.description AS description,
    unit.language_pk AS language_pk
FROM unit";

pub(crate) const SENTENCE_COLUMNS_SQL: &str = "sentence.pk AS pk,
    sentence.id AS id,
    sentence.name AS name,
    sentence.description AS description,
    sentence.analyzed AS analyzed,
    sentence.gloss AS gloss,
    sentence.language_pk AS language_pk";

const SEMANTIC_FIELD_SELECT_SQL: &str = "SELECT
    pk,
    id,
    name,
    description
FROM semanticfield";

const REQUIRED_TABLES: &[TableSpec] = &[
    (
        "language",
        &["pk", "id", "name", "description", "latitude", "longitude"],
    ),
    ("unit", &["pk", "id", "name", "description", "language_pk"]),
    (
        "sentence",
        &[
            "pk",
            "id",
            "name",
            "description",
            "analyzed",
            "gloss",
            "language_pk",
        ],
    ),
    ("semanticfield", &["pk", "id", "name", "description"]),
];

/// Repository interface for the generic base records.
pub trait ResourceRepository {
    fn create_language(&self, language: &Language) -> RepoResult<Pk>;
    fn get_language(&self, pk: Pk) -> RepoResult<Option<Language>>;
    fn get_language_by_name(&self, name: &str) -> RepoResult<Option<Language>>;
    /// Creates a plain unit that is not specialized as a word.
    fn create_unit(&self, unit: &Unit) -> RepoResult<Pk>;
    /// Loads one unit (of any specialization) by public id.
    fn get_unit_by_id(&self, id: &str) -> RepoResult<Option<Unit>>;
    /// Loads the first unit named `name` in the language named `language_name`.
    fn first_unit_in_language(&self, name: &str, language_name: &str)
        -> RepoResult<Option<Unit>>;
    fn create_sentence(&self, sentence: &Sentence) -> RepoResult<Pk>;
    fn get_sentence(&self, pk: Pk) -> RepoResult<Option<Sentence>>;
    fn create_semantic_field(&self, field: &SemanticField) -> RepoResult<Pk>;
    fn get_semantic_field(&self, pk: Pk) -> RepoResult<Option<SemanticField>>;
}

/// SQLite-backed repository for the base records.
pub struct SqliteResourceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteResourceRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }
}

impl ResourceRepository for SqliteResourceRepository<'_> {
    fn create_language(&self, language: &Language) -> RepoResult<Pk> {
        language.validate()?;

        self.conn.execute(
            "INSERT INTO language (id, name, description, latitude, longitude)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                language.id.as_str(),
                language.name.as_str(),
                language.description.as_deref(),
                language.latitude,
                language.longitude,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_language(&self, pk: Pk) -> RepoResult<Option<Language>> {
        let language = self
            .conn
            .query_row(
                &format!("{LANGUAGE_SELECT_SQL} WHERE pk = ?1;"),
                [pk],
                parse_language_row,
            )
            .optional()?;
        Ok(language)
    }

    fn get_language_by_name(&self, name: &str) -> RepoResult<Option<Language>> {
        let language = self
            .conn
            .query_row(
                &format!("{LANGUAGE_SELECT_SQL} WHERE name = ?1 ORDER BY pk ASC LIMIT 1;"),
                [name],
                parse_language_row,
            )
            .optional()?;
        Ok(language)
    }

    fn create_unit(&self, unit: &Unit) -> RepoResult<Pk> {
        unit.validate()?;
        insert_unit(self.conn, unit)
    }

    fn get_unit_by_id(&self, id: &str) -> RepoResult<Option<Unit>> {
        let unit = self
            .conn
            .query_row(
                &format!("{UNIT_SELECT_SQL} WHERE unit.id = ?1;"),
                [id],
                parse_unit_row,
            )
            .optional()?;
        Ok(unit)
    }

    fn first_unit_in_language(
        &self,
        name: &str,
        language_name: &str,
    ) -> RepoResult<Option<Unit>> {
        let unit = self
            .conn
            .query_row(
                &format!(
                    "{UNIT_SELECT_SQL}
                     INNER JOIN language ON language.pk = unit.language_pk
                     WHERE unit.name = ?1
                       AND language.name = ?2
                     ORDER BY unit.pk ASC
                     LIMIT 1;"
                ),
                params![name, language_name],
                parse_unit_row,
            )
            .optional()?;
        Ok(unit)
    }

    fn create_sentence(&self, sentence: &Sentence) -> RepoResult<Pk> {
        sentence.validate()?;

        self.conn.execute(
            "INSERT INTO sentence (id, name, description, analyzed, gloss, language_pk)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                sentence.id.as_str(),
                sentence.name.as_str(),
                sentence.description.as_deref(),
                sentence.analyzed.as_deref(),
                sentence.gloss.as_deref(),
                sentence.language_pk,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_sentence(&self, pk: Pk) -> RepoResult<Option<Sentence>> {
        let sentence = self
            .conn
            .query_row(
                &format!("SELECT {SENTENCE_COLUMNS_SQL} FROM sentence WHERE sentence.pk = ?1;"),
                [pk],
                parse_sentence_row,
            )
            .optional()?;
        Ok(sentence)
    }

    fn create_semantic_field(&self, field: &SemanticField) -> RepoResult<Pk> {
        field.validate()?;

        self.conn.execute(
            "INSERT INTO semanticfield (id, name, description) VALUES (?1, ?2, ?3);",
            params![
                field.id.as_str(),
                field.name.as_str(),
                field.description.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_semantic_field(&self, pk: Pk) -> RepoResult<Option<SemanticField>> {
        let field = self
            .conn
            .query_row(
                &format!("{SEMANTIC_FIELD_SELECT_SQL} WHERE pk = ?1;"),
                [pk],
                |row| {
                    Ok(SemanticField {
                        pk: row.get("pk")?,
                        id: row.get("id")?,
                        name: row.get("name")?,
                        description: row.get("description")?,
                    })
                },
            )
            .optional()?;
        Ok(field)
    }
}

/// Inserts the `unit` base row and returns its key.
pub(crate) fn insert_unit(conn: &Connection, unit: &Unit) -> RepoResult<Pk> {
    conn.execute(
        "INSERT INTO unit (id, name, description, language_pk) VALUES (?1, ?2, ?3, ?4);",
        params![
            unit.id.as_str(),
            unit.name.as_str(),
            unit.description.as_deref(),
            unit.language_pk,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn parse_language_row(row: &Row<'_>) -> rusqlite::Result<Language> {
    Ok(Language {
        pk: row.get("pk")?,
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
    })
}

pub(crate) fn parse_unit_row(row: &Row<'_>) -> rusqlite::Result<Unit> {
    Ok(Unit {
        pk: row.get("pk")?,
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        language_pk: row.get("language_pk")?,
    })
}

pub(crate) fn parse_sentence_row(row: &Row<'_>) -> rusqlite::Result<Sentence> {
    Ok(Sentence {
        pk: row.get("pk")?,
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        analyzed: row.get("analyzed")?,
        gloss: row.get("gloss")?,
        language_pk: row.get("language_pk")?,
    })
}
