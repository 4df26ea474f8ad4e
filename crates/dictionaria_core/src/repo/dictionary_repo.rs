//! Dictionary repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist dictionaries as `contribution` + `dictionary` row pairs.
//! - Provide the ordered listing used by the download view.
//!
//! # Invariants
//! - Listing order is `number ASC, pk ASC`.
//! - Each dictionary references exactly one language.

use super::error::RepoResult;
use super::support::{ensure_connection_ready, in_write_scope, TableSpec};
use crate::model::dictionary::Dictionary;
use crate::model::resource::{Contribution, Pk};
use rusqlite::{params, Connection, OptionalExtension, Row};

const DICTIONARY_SELECT_SQL: &str = "SELECT
    contribution.pk AS pk,
    contribution.id AS id,
    contribution.name AS name,
    contribution.description AS description,
    contribution.number AS number,
    dictionary.language_pk AS language_pk,
    dictionary.published AS published
FROM dictionary
INNER JOIN contribution ON contribution.pk = dictionary.pk";

const REQUIRED_TABLES: &[TableSpec] = &[
    (
        "contribution",
        &["pk", "id", "name", "description", "number"],
    ),
    ("dictionary", &["pk", "language_pk", "published"]),
];

/// Repository interface for dictionaries.
pub trait DictionaryRepository {
    fn create_dictionary(&self, dictionary: &Dictionary) -> RepoResult<Pk>;
    fn get_dictionary(&self, pk: Pk) -> RepoResult<Option<Dictionary>>;
    fn get_dictionary_by_id(&self, id: &str) -> RepoResult<Option<Dictionary>>;
    /// Lists every dictionary ordered by `number`.
    fn list_dictionaries(&self) -> RepoResult<Vec<Dictionary>>;
    /// Lists dictionaries describing one language.
    fn dictionaries_for_language(&self, language_pk: Pk) -> RepoResult<Vec<Dictionary>>;
}

/// SQLite-backed dictionary repository.
pub struct SqliteDictionaryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDictionaryRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }

    fn query_dictionaries(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<Dictionary>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut dictionaries = Vec::new();
        while let Some(row) = rows.next()? {
            dictionaries.push(parse_dictionary_row(row)?);
        }
        Ok(dictionaries)
    }
}

impl DictionaryRepository for SqliteDictionaryRepository<'_> {
    fn create_dictionary(&self, dictionary: &Dictionary) -> RepoResult<Pk> {
        dictionary.validate()?;

        in_write_scope(self.conn, |conn| {
            let contribution = &dictionary.contribution;
            conn.execute(
                "INSERT INTO contribution (id, name, description, number)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    contribution.id.as_str(),
                    contribution.name.as_str(),
                    contribution.description.as_deref(),
                    contribution.number,
                ],
            )?;
            let pk = conn.last_insert_rowid();

            conn.execute(
                "INSERT INTO dictionary (pk, language_pk, published) VALUES (?1, ?2, ?3);",
                params![pk, dictionary.language_pk, dictionary.published],
            )?;
            Ok(pk)
        })
    }

    fn get_dictionary(&self, pk: Pk) -> RepoResult<Option<Dictionary>> {
        let dictionary = self
            .conn
            .query_row(
                &format!("{DICTIONARY_SELECT_SQL} WHERE dictionary.pk = ?1;"),
                [pk],
                parse_dictionary_row,
            )
            .optional()?;
        Ok(dictionary)
    }

    fn get_dictionary_by_id(&self, id: &str) -> RepoResult<Option<Dictionary>> {
        let dictionary = self
            .conn
            .query_row(
                &format!("{DICTIONARY_SELECT_SQL} WHERE contribution.id = ?1;"),
                [id],
                parse_dictionary_row,
            )
            .optional()?;
        Ok(dictionary)
    }

    fn list_dictionaries(&self) -> RepoResult<Vec<Dictionary>> {
        self.query_dictionaries(
            &format!("{DICTIONARY_SELECT_SQL} ORDER BY contribution.number ASC, contribution.pk ASC;"),
            [],
        )
    }

    fn dictionaries_for_language(&self, language_pk: Pk) -> RepoResult<Vec<Dictionary>> {
        self.query_dictionaries(
            &format!(
                "{DICTIONARY_SELECT_SQL}
                 WHERE dictionary.language_pk = ?1
                 ORDER BY contribution.number ASC, contribution.pk ASC;"
            ),
            [language_pk],
        )
    }
}

fn parse_dictionary_row(row: &Row<'_>) -> rusqlite::Result<Dictionary> {
    Ok(Dictionary {
        contribution: Contribution {
            pk: row.get("pk")?,
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            number: row.get("number")?,
        },
        language_pk: row.get("language_pk")?,
        published: row.get("published")?,
    })
}
