use chrono::NaiveDate;
use dictionaria_core::db::migrations::latest_version;
use dictionaria_core::db::open_db_in_memory;
use dictionaria_core::{
    Dictionary, DictionaryRepository, Language, ModelValidationError, RepoError,
    ResourceRepository, SqliteDictionaryRepository, SqliteResourceRepository,
};
use rusqlite::Connection;

fn create_language(conn: &Connection, id: &str, name: &str) -> i64 {
    let repo = SqliteResourceRepository::try_new(conn).unwrap();
    repo.create_language(&Language::new(id, name)).unwrap()
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let language_pk = create_language(&conn, "hk", "Hocank");
    let repo = SqliteDictionaryRepository::try_new(&conn).unwrap();

    let mut dictionary = Dictionary::new("hocank", "Hocank Dictionary", language_pk);
    dictionary.contribution.number = 4;
    dictionary.contribution.description = Some("A dictionary".to_string());
    dictionary.published = NaiveDate::from_ymd_opt(2016, 3, 14);
    let pk = repo.create_dictionary(&dictionary).unwrap();

    let loaded = repo.get_dictionary(pk).unwrap().unwrap();
    assert_eq!(loaded.pk(), pk);
    assert_eq!(loaded.contribution.id, "hocank");
    assert_eq!(loaded.contribution.number, 4);
    assert_eq!(loaded.language_pk, language_pk);
    assert_eq!(loaded.published, NaiveDate::from_ymd_opt(2016, 3, 14));

    let by_id = repo.get_dictionary_by_id("hocank").unwrap().unwrap();
    assert_eq!(by_id, loaded);
    assert!(repo.get_dictionary_by_id("missing").unwrap().is_none());
}

#[test]
fn list_orders_by_number_then_pk() {
    let conn = open_db_in_memory().unwrap();
    let language_pk = create_language(&conn, "hk", "Hocank");
    let repo = SqliteDictionaryRepository::try_new(&conn).unwrap();

    for (id, number) in [("c", 3), ("a", 1), ("b2", 2), ("b1", 2)] {
        let mut dictionary = Dictionary::new(id, id, language_pk);
        dictionary.contribution.number = number;
        repo.create_dictionary(&dictionary).unwrap();
    }

    let listed = repo.list_dictionaries().unwrap();
    let ids: Vec<_> = listed
        .iter()
        .map(|item| item.contribution.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "b2", "b1", "c"]);
}

#[test]
fn dictionaries_for_language_only_returns_that_language() {
    let conn = open_db_in_memory().unwrap();
    let hocank = create_language(&conn, "hk", "Hocank");
    let other = create_language(&conn, "xx", "Other");
    let repo = SqliteDictionaryRepository::try_new(&conn).unwrap();

    let first = repo
        .create_dictionary(&Dictionary::new("d1", "One", hocank))
        .unwrap();
    repo.create_dictionary(&Dictionary::new("d2", "Two", other))
        .unwrap();

    let listed = repo.dictionaries_for_language(hocank).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].pk(), first);
}

#[test]
fn failed_subclass_insert_rolls_back_contribution_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDictionaryRepository::try_new(&conn).unwrap();

    let err = repo
        .create_dictionary(&Dictionary::new("orphan", "Orphan", 999))
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM contribution;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn create_joins_an_open_transaction() {
    let conn = open_db_in_memory().unwrap();
    let language_pk = create_language(&conn, "hk", "Hocank");

    conn.execute_batch("BEGIN;").unwrap();
    {
        let repo = SqliteDictionaryRepository::try_new(&conn).unwrap();
        repo.create_dictionary(&Dictionary::new("d1", "One", language_pk))
            .unwrap();
    }
    conn.execute_batch("ROLLBACK;").unwrap();

    let repo = SqliteDictionaryRepository::try_new(&conn).unwrap();
    assert!(repo.list_dictionaries().unwrap().is_empty());
}

#[test]
fn failed_create_inside_open_transaction_rolls_back_only_itself() {
    let conn = open_db_in_memory().unwrap();
    let language_pk = create_language(&conn, "hk", "Hocank");

    conn.execute_batch("BEGIN;").unwrap();
    {
        let repo = SqliteDictionaryRepository::try_new(&conn).unwrap();
        repo.create_dictionary(&Dictionary::new("d1", "One", language_pk))
            .unwrap();
        let err = repo
            .create_dictionary(&Dictionary::new("orphan", "Orphan", 999))
            .unwrap_err();
        assert!(matches!(err, RepoError::Db(_)));
    }
    conn.execute_batch("COMMIT;").unwrap();

    let contributions: Vec<String> = conn
        .prepare("SELECT id FROM contribution ORDER BY pk;")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(contributions, vec!["d1".to_string()]);

    let repo = SqliteDictionaryRepository::try_new(&conn).unwrap();
    repo.create_dictionary(&Dictionary::new("orphan", "Orphan", language_pk))
        .expect("public id should be free after the failed create");
}

#[test]
fn validation_failure_blocks_create() {
    let conn = open_db_in_memory().unwrap();
    let language_pk = create_language(&conn, "hk", "Hocank");
    let repo = SqliteDictionaryRepository::try_new(&conn).unwrap();

    let err = repo
        .create_dictionary(&Dictionary::new("has space", "Bad", language_pk))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ModelValidationError::InvalidId(_))
    ));
}

#[test]
fn duplicate_public_id_is_rejected_by_store() {
    let conn = open_db_in_memory().unwrap();
    let language_pk = create_language(&conn, "hk", "Hocank");
    let repo = SqliteDictionaryRepository::try_new(&conn).unwrap();

    repo.create_dictionary(&Dictionary::new("d1", "One", language_pk))
        .unwrap();
    let err = repo
        .create_dictionary(&Dictionary::new("d1", "Again", language_pk))
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteDictionaryRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE contribution (
            pk INTEGER PRIMARY KEY,
            id TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteDictionaryRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "contribution",
            column: "number"
        })
    ));
}
