use dictionaria_core::db::open_db_in_memory;
use dictionaria_core::views::{download, home, word};
use dictionaria_core::{
    Counterpart, Dictionary, DictionaryRepository, HomeExamples, Language, LexiconRepository,
    LexiconService, Meaning, RepoError, ResourceRepository, SeeAlso, Sentence,
    SqliteDictionaryRepository, SqliteLexiconRepository, SqliteResourceRepository, Unit, Word,
    WordSentence,
};
use rusqlite::Connection;

fn hocank_examples() -> HomeExamples {
    HomeExamples::default()
}

/// Seeds one Hocank dictionary with a word `caa` and a plain unit carrying
/// the default second-example id.
fn seed_home_data(conn: &Connection) {
    let resources = SqliteResourceRepository::try_new(conn).unwrap();
    let hocank = resources
        .create_language(&Language::new("hk", "Hooca\u{328}k"))
        .unwrap();
    let other = resources
        .create_language(&Language::new("xx", "Other"))
        .unwrap();
    resources
        .create_unit(&Unit::new("72141525536263472", "wiiwagax", hocank))
        .unwrap();

    let dictionaries = SqliteDictionaryRepository::try_new(conn).unwrap();
    let hk_dict = dictionaries
        .create_dictionary(&Dictionary::new("hocank", "Hocank", hocank))
        .unwrap();
    let xx_dict = dictionaries
        .create_dictionary(&Dictionary::new("other", "Other", other))
        .unwrap();

    let lexicon = SqliteLexiconRepository::try_new(conn).unwrap();
    lexicon
        .create_word(&Word::new("xx-caa", "caa", other, xx_dict))
        .unwrap();
    lexicon
        .create_word(&Word::new("hk-caa", "caa", hocank, hk_dict))
        .unwrap();
}

#[test]
fn download_lists_dictionaries_in_non_decreasing_number() {
    let conn = open_db_in_memory().unwrap();
    let resources = SqliteResourceRepository::try_new(&conn).unwrap();
    let language_pk = resources
        .create_language(&Language::new("hk", "Hocank"))
        .unwrap();
    let repo = SqliteDictionaryRepository::try_new(&conn).unwrap();
    for (id, number) in [("d5", 5), ("d1", 1), ("d3", 3), ("d1b", 1), ("d0", 0)] {
        let mut dictionary = Dictionary::new(id, id, language_pk);
        dictionary.contribution.number = number;
        repo.create_dictionary(&dictionary).unwrap();
    }

    let context = download(&repo).unwrap();
    assert_eq!(context.dictionaries.len(), 5);
    assert!(context
        .dictionaries
        .windows(2)
        .all(|pair| pair[0].contribution.number <= pair[1].contribution.number));
}

#[test]
fn download_on_empty_store_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDictionaryRepository::try_new(&conn).unwrap();
    assert!(download(&repo).unwrap().dictionaries.is_empty());
}

#[test]
fn home_resolves_both_examples() {
    let conn = open_db_in_memory().unwrap();
    seed_home_data(&conn);
    let resources = SqliteResourceRepository::try_new(&conn).unwrap();

    let context = home(&resources, &hocank_examples()).unwrap();
    let example1 = context.example1.expect("caa exists in Hocank");
    assert_eq!(example1.id, "hk-caa");
    assert_eq!(context.example2.id, "72141525536263472");
    assert_eq!(context.example2.name, "wiiwagax");

    let json = serde_json::to_value(&home(&resources, &hocank_examples()).unwrap()).unwrap();
    assert_eq!(json["example1"]["name"], "caa");
    assert_eq!(json["example2"]["id"], "72141525536263472");
}

#[test]
fn home_example1_is_optional() {
    let conn = open_db_in_memory().unwrap();
    seed_home_data(&conn);
    let resources = SqliteResourceRepository::try_new(&conn).unwrap();

    let examples = HomeExamples {
        word_name: "not-a-word".to_string(),
        ..hocank_examples()
    };
    let context = home(&resources, &examples).unwrap();
    assert!(context.example1.is_none());
}

#[test]
fn home_fails_when_example2_is_missing() {
    let conn = open_db_in_memory().unwrap();
    let resources = SqliteResourceRepository::try_new(&conn).unwrap();

    let err = home(&resources, &hocank_examples()).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound { entity: "unit", ref key } if key == "72141525536263472"
    ));
}

#[test]
fn word_view_collects_entry_details() {
    let conn = open_db_in_memory().unwrap();
    seed_home_data(&conn);

    let resources = SqliteResourceRepository::try_new(&conn).unwrap();
    let dictionaries = SqliteDictionaryRepository::try_new(&conn).unwrap();
    let lexicon_repo = SqliteLexiconRepository::try_new(&conn).unwrap();

    let caa = lexicon_repo.get_word_by_id("hk-caa").unwrap().unwrap();
    let other = lexicon_repo.get_word_by_id("xx-caa").unwrap().unwrap();
    let meaning = lexicon_repo
        .create_meaning(&Meaning::new("m-hand", "hand"))
        .unwrap();
    lexicon_repo
        .create_counterpart(&Counterpart::new("cp-1", "caa", meaning, caa.pk()))
        .unwrap();
    lexicon_repo
        .create_see_also(&SeeAlso::new(caa.pk(), other.pk()))
        .unwrap();
    let sentence = resources
        .create_sentence(&Sentence::new("s-1", "caa nąąc", caa.unit.language_pk))
        .unwrap();
    lexicon_repo
        .create_word_sentence(&WordSentence::new(caa.pk(), sentence))
        .unwrap();

    let lexicon = LexiconService::new(lexicon_repo);
    let context = word(&lexicon, &dictionaries, &resources, "hk-caa").unwrap();
    assert_eq!(context.word, caa);
    assert_eq!(context.dictionary.contribution.id, "hocank");
    assert_eq!(context.language.name, "Hooca\u{328}k");
    assert_eq!(context.meanings.len(), 1);
    assert_eq!(context.meanings[0].meaning.parameter.id, "m-hand");
    assert_eq!(context.sentences.len(), 1);
    assert_eq!(context.links.links_to, vec![other]);
    assert!(context.links.linked_from.is_empty());

    let json = serde_json::to_value(&context).unwrap();
    assert!(json["links_to"].is_array());
    assert!(json["linked_from"].is_array());
}

#[test]
fn word_view_reports_missing_word() {
    let conn = open_db_in_memory().unwrap();
    let resources = SqliteResourceRepository::try_new(&conn).unwrap();
    let dictionaries = SqliteDictionaryRepository::try_new(&conn).unwrap();
    let lexicon = LexiconService::new(SqliteLexiconRepository::try_new(&conn).unwrap());

    let err = word(&lexicon, &dictionaries, &resources, "nope").unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "word", .. }));
}
