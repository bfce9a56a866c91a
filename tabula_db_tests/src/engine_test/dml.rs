use super::*;
use tabula_db_core::storage::KvStore;

#[test]
fn insert_reports_success() {
    let mut db = test_db();
    seed_parent(&mut db);
    let out = insert(&mut db, "a", vec![Value::Int(1), Value::from("x")]).unwrap();
    assert_eq!(out, Response::Inserted);
    assert_eq!(out.to_string(), "The row is inserted");
}

#[test]
fn insert_with_column_order_is_stored_canonically() {
    let mut db = test_db();
    seed_parent(&mut db);
    db.execute(Command::Insert {
        table: "a".into(),
        columns: Some(names(&["name", "id"])),
        values: vec![Value::from("a"), Value::Int(1)],
    })
    .unwrap();
    let rows = &db.repository().table("a").unwrap().rows;
    assert_eq!(rows, &vec![vec![Value::Int(1), Value::from("a")]]);
}

#[test]
fn rows_keep_insertion_order() {
    let mut db = test_db();
    seed_parent(&mut db);
    for i in [3, 1, 2] {
        insert(&mut db, "a", vec![Value::Int(i), Value::Null]).unwrap();
    }
    let ids: Vec<Value> = db
        .repository()
        .table("a")
        .unwrap()
        .rows
        .iter()
        .map(|r| r[0].clone())
        .collect();
    assert_eq!(ids, vec![Value::Int(3), Value::Int(1), Value::Int(2)]);
}

#[test]
fn insert_into_missing_table() {
    let mut db = test_db();
    let err = insert(&mut db, "ghost", vec![Value::Int(1)]).unwrap_err();
    assert!(matches!(err, DbError::NoSuchTable));
}

#[test]
fn insert_wrong_arity_changes_nothing() {
    let mut db = test_db();
    seed_parent(&mut db);
    let err = insert(&mut db, "a", vec![Value::Int(1)]).unwrap_err();
    assert!(matches!(err, DbError::InsertColumnCount { expected: 2, actual: 1 }));

    let err = db
        .execute(Command::Insert {
            table: "a".into(),
            columns: Some(names(&["id", "nickname"])),
            values: vec![Value::Int(1), Value::from("x")],
        })
        .unwrap_err();
    assert!(matches!(err, DbError::InsertColumnExistence(c) if c == "nickname"));
    assert!(db.repository().table("a").unwrap().rows.is_empty());
}

#[test]
fn insert_skips_type_and_not_null_checks() {
    let mut db = test_db();
    seed_parent(&mut db);
    // id is a NOT NULL int primary key and name is char(10)
    insert(
        &mut db,
        "a",
        vec![Value::Null, Value::from("far longer than ten characters")],
    )
    .unwrap();
    insert(&mut db, "a", vec![Value::from("text"), Value::Int(7)]).unwrap();
    assert_eq!(db.repository().table("a").unwrap().rows.len(), 2);
}

#[test]
fn insert_is_written_through() {
    let mut db = test_db();
    seed_parent(&mut db);
    insert(&mut db, "a", vec![Value::Int(1), Value::from("x")]).unwrap();

    let stored = db.repository().store().iterate().unwrap();
    assert_eq!(stored.len(), 1);
    let record: serde_json::Value = serde_json::from_slice(&stored[0].1).unwrap();
    assert_eq!(record["rows"], serde_json::json!([[1, "x"]]));
}
