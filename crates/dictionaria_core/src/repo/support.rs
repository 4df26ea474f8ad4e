//! SQL helpers shared by the SQLite repositories.

use super::error::{RepoError, RepoResult};
use crate::db::migrations::{current_user_version, latest_version};
use rusqlite::Connection;

/// Table name plus the columns a repository reads or writes.
pub(crate) type TableSpec = (&'static str, &'static [&'static str]);

/// Rejects connections that are not migrated or lack required columns.
pub(crate) fn ensure_connection_ready(conn: &Connection, tables: &[TableSpec]) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in tables {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

/// Runs `write` atomically.
///
/// Inside a caller's open transaction the write runs under a savepoint, so a
/// failure undoes only this write and the caller can still commit the rest.
pub(crate) fn in_write_scope<T>(
    conn: &Connection,
    write: impl FnOnce(&Connection) -> RepoResult<T>,
) -> RepoResult<T> {
    if !conn.is_autocommit() {
        return in_savepoint(conn, write);
    }

    let tx = conn.unchecked_transaction()?;
    let output = write(&*tx)?;
    tx.commit()?;
    Ok(output)
}

fn in_savepoint<T>(
    conn: &Connection,
    write: impl FnOnce(&Connection) -> RepoResult<T>,
) -> RepoResult<T> {
    conn.execute_batch("SAVEPOINT write_scope;")?;
    match write(conn) {
        Ok(output) => {
            conn.execute_batch("RELEASE write_scope;")?;
            Ok(output)
        }
        Err(err) => {
            conn.execute_batch("ROLLBACK TO write_scope; RELEASE write_scope;")?;
            Err(err)
        }
    }
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
