use chrono::NaiveDate;
use dictionaria_core::{
    Counterpart, Dictionary, Meaning, ModelValidationError, SeeAlso, Word, UNSAVED_PK,
};

#[test]
fn word_new_sets_defaults() {
    let word = Word::new("hk-caa", "caa", 3, 7);

    assert_eq!(word.pk(), UNSAVED_PK);
    assert_eq!(word.unit.language_pk, 3);
    assert_eq!(word.dictionary_pk, 7);
    assert_eq!(word.number, 0);
    assert_eq!(word.phonetic, None);
    assert_eq!(word.pos, None);
}

#[test]
fn word_validation_requires_saved_dictionary() {
    let word = Word::new("hk-caa", "caa", 3, UNSAVED_PK);
    assert_eq!(
        word.validate(),
        Err(ModelValidationError::UnsavedReference {
            field: "dictionary_pk"
        })
    );
}

#[test]
fn see_also_validation_requires_both_endpoints() {
    assert!(SeeAlso::new(1, 2).validate().is_ok());
    assert!(SeeAlso::new(1, 1).validate().is_ok());
    assert_eq!(
        SeeAlso::new(UNSAVED_PK, 2).validate(),
        Err(ModelValidationError::UnsavedReference { field: "source_pk" })
    );
}

#[test]
fn meaning_rejects_unsaved_semantic_field() {
    let mut meaning = Meaning::new("m-water", "water");
    assert!(meaning.validate().is_ok());

    meaning.semantic_field_pk = Some(UNSAVED_PK);
    assert!(matches!(
        meaning.validate(),
        Err(ModelValidationError::UnsavedReference { .. })
    ));
}

#[test]
fn counterpart_exposes_meaning_key() {
    let counterpart = Counterpart::new("cp-1", "caa", 11, 22);
    assert_eq!(counterpart.meaning_pk(), 11);
    assert_eq!(counterpart.word_pk, 22);
}

#[test]
fn dictionary_serialization_flattens_contribution_fields() {
    let mut dictionary = Dictionary::new("hocank", "Hocank Dictionary", 5);
    dictionary.contribution.pk = 9;
    dictionary.contribution.number = 2;
    dictionary.published = NaiveDate::from_ymd_opt(2015, 6, 1);

    let json = serde_json::to_value(&dictionary).unwrap();
    assert_eq!(json["pk"], 9);
    assert_eq!(json["id"], "hocank");
    assert_eq!(json["name"], "Hocank Dictionary");
    assert_eq!(json["number"], 2);
    assert_eq!(json["language_pk"], 5);
    assert_eq!(json["published"], "2015-06-01");

    let decoded: Dictionary = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, dictionary);
}

#[test]
fn word_serialization_flattens_unit_fields() {
    let mut word = Word::new("hk-caa", "caa", 3, 7);
    word.pos = Some("noun".to_string());

    let json = serde_json::to_value(&word).unwrap();
    assert_eq!(json["id"], "hk-caa");
    assert_eq!(json["language_pk"], 3);
    assert_eq!(json["dictionary_pk"], 7);
    assert_eq!(json["number"], 0);
    assert_eq!(json["pos"], "noun");
}
