use super::*;
use tabula_db_core::types::datatype::DataType;

#[test]
fn duplicate_column_regardless_of_constraints() {
    let mut db = test_db();
    let cases = vec![
        vec![],
        vec![pk(&["id"])],
        vec![pk(&["id"]), pk(&["id"])],
        vec![fk(&["id"], "missing", &["id"])],
    ];
    for constraints in cases {
        let err = create(
            &mut db,
            "t",
            vec![ColumnDefinition::int("id"), ColumnDefinition::char("id", 3)],
            constraints,
        )
        .unwrap_err();
        assert!(matches!(err, DbError::DuplicateColumnDef));
    }
    assert!(db.repository().table("t").is_none());
}

#[test]
fn two_primary_keys_rejected() {
    let mut db = test_db();
    let err = create(
        &mut db,
        "t",
        vec![ColumnDefinition::int("a"), ColumnDefinition::int("b")],
        vec![pk(&["a"]), pk(&["b"])],
    )
    .unwrap_err();
    assert!(matches!(err, DbError::DuplicatePrimaryKeyDef));
    assert_eq!(
        err.to_string(),
        "Create table has failed: primary key definition is duplicated"
    );
}

#[test]
fn primary_key_on_unknown_column() {
    let mut db = test_db();
    let err = create(&mut db, "t", vec![ColumnDefinition::int("a")], vec![pk(&["b"])])
        .unwrap_err();
    assert!(matches!(&err, DbError::NonExistingColumnDef(c) if c == "b"));
    assert_eq!(
        err.to_string(),
        "Create table has failed: 'b' does not exist in column definition"
    );
}

#[test]
fn foreign_key_to_primary_key_succeeds() {
    let mut db = test_db();
    seed_parent(&mut db);
    let out = create(
        &mut db,
        "b",
        vec![ColumnDefinition::int("id")],
        vec![fk(&["id"], "a", &["id"])],
    )
    .unwrap();
    assert_eq!(out, Response::Created("b".into()));
}

#[test]
fn foreign_key_to_missing_table() {
    let mut db = test_db();
    let err = create(
        &mut db,
        "b",
        vec![ColumnDefinition::int("id")],
        vec![fk(&["id"], "a", &["id"])],
    )
    .unwrap_err();
    assert!(matches!(err, DbError::ReferenceTableExistence));
}

#[test]
fn foreign_key_to_missing_column() {
    let mut db = test_db();
    seed_parent(&mut db);
    let err = create(
        &mut db,
        "b",
        vec![ColumnDefinition::int("id")],
        vec![fk(&["id"], "a", &["code"])],
    )
    .unwrap_err();
    assert!(matches!(err, DbError::ReferenceColumnExistence));
}

#[test]
fn foreign_key_to_non_primary_key_columns() {
    let mut db = test_db();
    seed_parent(&mut db);
    let err = create(
        &mut db,
        "b",
        vec![ColumnDefinition::char("n", 10)],
        vec![fk(&["n"], "a", &["name"])],
    )
    .unwrap_err();
    assert!(matches!(err, DbError::ReferenceNonPrimaryKey));
}

#[test]
fn foreign_key_must_cover_whole_composite_key() {
    let mut db = test_db();
    create(
        &mut db,
        "p",
        vec![ColumnDefinition::int("x"), ColumnDefinition::int("y")],
        vec![pk(&["x", "y"])],
    )
    .unwrap();

    let err = create(
        &mut db,
        "c",
        vec![ColumnDefinition::int("x")],
        vec![fk(&["x"], "p", &["x"])],
    )
    .unwrap_err();
    assert!(matches!(err, DbError::ReferenceNonPrimaryKey));

    // set comparison: declaration order of the referenced columns is free
    let out = create(
        &mut db,
        "c",
        vec![ColumnDefinition::int("y"), ColumnDefinition::int("x")],
        vec![fk(&["y", "x"], "p", &["y", "x"])],
    );
    assert!(out.is_ok());
}

#[test]
fn foreign_key_to_table_without_primary_key() {
    let mut db = test_db();
    create(&mut db, "p", vec![ColumnDefinition::int("x")], vec![]).unwrap();
    let err = create(
        &mut db,
        "c",
        vec![ColumnDefinition::int("x")],
        vec![fk(&["x"], "p", &["x"])],
    )
    .unwrap_err();
    assert!(matches!(err, DbError::ReferenceNonPrimaryKey));
}

#[test]
fn foreign_key_local_column_missing() {
    let mut db = test_db();
    seed_parent(&mut db);
    let err = create(
        &mut db,
        "b",
        vec![ColumnDefinition::int("id")],
        vec![fk(&["a_id"], "a", &["id"])],
    )
    .unwrap_err();
    assert!(matches!(err, DbError::NonExistingColumnDef(c) if c == "a_id"));
}

#[test]
fn foreign_key_type_mismatch() {
    let mut db = test_db();
    seed_parent(&mut db);
    for column in [
        ColumnDefinition::char("id", 10),
        ColumnDefinition::date("id"),
    ] {
        let err = create(&mut db, "b", vec![column], vec![fk(&["id"], "a", &["id"])])
            .unwrap_err();
        assert!(matches!(err, DbError::ReferenceType));
    }
}

#[test]
fn foreign_key_char_length_must_match() {
    let mut db = test_db();
    create(
        &mut db,
        "p",
        vec![ColumnDefinition::char("code", 4)],
        vec![pk(&["code"])],
    )
    .unwrap();
    let err = create(
        &mut db,
        "c",
        vec![ColumnDefinition::char("code", 5)],
        vec![fk(&["code"], "p", &["code"])],
    )
    .unwrap_err();
    assert!(matches!(err, DbError::ReferenceType));
    assert!(
        create(
            &mut db,
            "c",
            vec![ColumnDefinition::char("code", 4)],
            vec![fk(&["code"], "p", &["code"])],
        )
        .is_ok()
    );
}

#[test]
fn foreign_key_column_lists_must_pair_up() {
    let mut db = test_db();
    seed_parent(&mut db);

    // more local columns than referenced ones
    let err = create(
        &mut db,
        "b",
        vec![ColumnDefinition::int("x"), ColumnDefinition::int("y")],
        vec![fk(&["x", "y"], "a", &["id"])],
    )
    .unwrap_err();
    assert!(matches!(err, DbError::ReferenceType));

    // a repeated referenced column still matches the key as a set
    let err = create(
        &mut db,
        "b",
        vec![ColumnDefinition::int("x")],
        vec![fk(&["x"], "a", &["id", "id"])],
    )
    .unwrap_err();
    assert!(matches!(err, DbError::ReferenceType));
    assert!(db.repository().table("b").is_none());
}

#[test]
fn foreign_key_local_char_length_checked_before_type() {
    let mut db = test_db();
    create(
        &mut db,
        "p",
        vec![ColumnDefinition::char("code", 4)],
        vec![pk(&["code"])],
    )
    .unwrap();
    let err = create(
        &mut db,
        "c",
        vec![ColumnDefinition::char("code", 0)],
        vec![fk(&["code"], "p", &["code"])],
    )
    .unwrap_err();
    assert!(matches!(err, DbError::CharLength));
}

#[test]
fn nullability_does_not_affect_type_match() {
    let mut db = test_db();
    seed_parent(&mut db);
    let out = create(
        &mut db,
        "b",
        vec![ColumnDefinition::new("ref", DataType::Int, None, false)],
        vec![fk(&["ref"], "a", &["id"])],
    );
    assert!(out.is_ok());
}

#[test]
fn char_length_zero_rejected() {
    let mut db = test_db();
    let err = create(
        &mut db,
        "t",
        vec![ColumnDefinition::char("c", 0)],
        vec![pk(&["c"])],
    )
    .unwrap_err();
    assert!(matches!(err, DbError::CharLength));
    assert_eq!(err.to_string(), "Char length should be over 0");

    let err = create(&mut db, "t", vec![ColumnDefinition::char("c", 0)], vec![]).unwrap_err();
    assert!(matches!(err, DbError::CharLength));
}

#[test]
fn first_failing_constraint_is_reported() {
    let mut db = test_db();
    seed_parent(&mut db);
    // the missing-table FK is declared first, so it wins over the type error
    let err = create(
        &mut db,
        "b",
        vec![ColumnDefinition::char("id", 3)],
        vec![fk(&["id"], "zz", &["id"]), fk(&["id"], "a", &["id"])],
    )
    .unwrap_err();
    assert!(matches!(err, DbError::ReferenceTableExistence));

    let err = create(
        &mut db,
        "b",
        vec![ColumnDefinition::char("id", 3)],
        vec![fk(&["id"], "a", &["id"]), fk(&["id"], "zz", &["id"])],
    )
    .unwrap_err();
    assert!(matches!(err, DbError::ReferenceType));
}

#[test]
fn primary_key_columns_become_not_null() {
    let mut db = test_db();
    create(
        &mut db,
        "t",
        vec![ColumnDefinition::int("a"), ColumnDefinition::int("b")],
        vec![pk(&["b"])],
    )
    .unwrap();
    let schema = &db.repository().table("t").unwrap().schema;
    assert!(!schema.column("a").unwrap().not_null);
    assert!(schema.column("b").unwrap().not_null);
}

#[test]
fn failed_create_leaves_catalog_untouched() {
    let mut db = test_db();
    seed_parent(&mut db);
    let _ = create(
        &mut db,
        "b",
        vec![ColumnDefinition::int("id")],
        vec![fk(&["id"], "a", &["nope"])],
    );
    assert!(db.repository().table("b").is_none());
    assert_eq!(db.repository().table_names().collect::<Vec<_>>(), vec!["a"]);
}
