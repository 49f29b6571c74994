//! Tests for SqliteDocumentStore.

use serde_json::{Value, json};

use crate::db::{
    Database, Document, DocumentStore, FieldPath, Fields, Filter, SqliteDatabase,
    SqliteDocumentStore, StoreError, TextRange, WhereOp,
};

async fn setup_store() -> SqliteDocumentStore {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db.documents()
}

fn fields(value: Value) -> Fields {
    value.as_object().cloned().expect("fields must be an object")
}

fn field(path: &str) -> FieldPath {
    FieldPath::parse(path).unwrap()
}

fn filter(path: &str, op: WhereOp, value: Value) -> Filter {
    Filter {
        field: field(path),
        op,
        value,
    }
}

fn ids(docs: &[Document]) -> Vec<&str> {
    docs.iter().map(|d| d.id.as_str()).collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn insert_and_get() {
    let store = setup_store().await;
    let data = fields(json!({"title": "A", "content": "B", "rank": 2.5, "tags": ["x"]}));

    let id = store.insert("items", &data).await.expect("Insert should succeed");
    assert_eq!(id.len(), 32);

    let doc = store.get("items", &id).await.unwrap().expect("Document should exist");
    assert_eq!(doc.id, id);
    assert_eq!(doc.fields, data);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_missing_returns_none() {
    let store = setup_store().await;
    assert!(store.get("items", "nonexist").await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn collections_are_isolated() {
    let store = setup_store().await;
    let id = store.insert("items", &fields(json!({"title": "A"}))).await.unwrap();

    assert!(store.get("other", &id).await.unwrap().is_none());
    assert!(store.list("other", None).await.unwrap().is_empty());
    assert_eq!(store.list("items", None).await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_keeps_insertion_order() {
    let store = setup_store().await;
    let c = store.insert("items", &fields(json!({"title": "C"}))).await.unwrap();
    let a = store.insert("items", &fields(json!({"title": "A"}))).await.unwrap();
    let b = store.insert("items", &fields(json!({"title": "B"}))).await.unwrap();

    let docs = store.list("items", None).await.unwrap();
    assert_eq!(ids(&docs), vec![c.as_str(), a.as_str(), b.as_str()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_ordered_by_field_skips_documents_without_it() {
    let store = setup_store().await;
    let c = store.insert("items", &fields(json!({"title": "C"}))).await.unwrap();
    store.insert("items", &fields(json!({"content": "untitled"}))).await.unwrap();
    let a = store.insert("items", &fields(json!({"title": "A"}))).await.unwrap();

    let docs = store.list("items", Some(field("title"))).await.unwrap();
    assert_eq!(ids(&docs), vec![a.as_str(), c.as_str()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_ordered_by_nested_field() {
    let store = setup_store().await;
    let z = store
        .insert("items", &fields(json!({"author": {"name": "Zoe"}})))
        .await
        .unwrap();
    let m = store
        .insert("items", &fields(json!({"author": {"name": "Marc"}})))
        .await
        .unwrap();

    let docs = store.list("items", Some(field("author.name"))).await.unwrap();
    assert_eq!(ids(&docs), vec![m.as_str(), z.as_str()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_ordered_by_field_groups_by_type_first() {
    let store = setup_store().await;
    for rank in [
        json!(2),
        json!("a"),
        json!(true),
        json!(0),
        json!({"x": 1}),
        Value::Null,
        json!(false),
        json!([1]),
    ] {
        store
            .insert("items", &fields(json!({"rank": rank})))
            .await
            .unwrap();
    }

    let docs = store.list("items", Some(field("rank"))).await.unwrap();
    let ranks: Vec<Value> = docs.iter().map(|d| d.fields["rank"].clone()).collect();
    assert_eq!(
        ranks,
        vec![
            Value::Null,
            json!(false),
            json!(true),
            json!(0),
            json!(2),
            json!("a"),
            json!([1]),
            json!({"x": 1}),
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn query_where_equality() {
    let store = setup_store().await;
    let a = store.insert("items", &fields(json!({"title": "A"}))).await.unwrap();
    store.insert("items", &fields(json!({"title": "C"}))).await.unwrap();

    let docs = store
        .query_where("items", &filter("title", WhereOp::Eq, json!("A")))
        .await
        .unwrap();
    assert_eq!(ids(&docs), vec![a.as_str()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn query_where_does_not_mix_types() {
    let store = setup_store().await;
    let number = store.insert("items", &fields(json!({"rank": 1}))).await.unwrap();
    let text = store.insert("items", &fields(json!({"rank": "1"}))).await.unwrap();
    let flag = store.insert("items", &fields(json!({"rank": true}))).await.unwrap();

    let by_number = store
        .query_where("items", &filter("rank", WhereOp::Eq, json!(1)))
        .await
        .unwrap();
    assert_eq!(ids(&by_number), vec![number.as_str()]);

    let by_text = store
        .query_where("items", &filter("rank", WhereOp::Eq, json!("1")))
        .await
        .unwrap();
    assert_eq!(ids(&by_text), vec![text.as_str()]);

    let by_flag = store
        .query_where("items", &filter("rank", WhereOp::Eq, json!(true)))
        .await
        .unwrap();
    assert_eq!(ids(&by_flag), vec![flag.as_str()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn query_where_integer_matches_equal_real() {
    let store = setup_store().await;
    let id = store.insert("items", &fields(json!({"rank": 2.0}))).await.unwrap();

    let docs = store
        .query_where("items", &filter("rank", WhereOp::Eq, json!(2)))
        .await
        .unwrap();
    assert_eq!(ids(&docs), vec![id.as_str()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn query_where_ordering_operators() {
    let store = setup_store().await;
    let one = store.insert("items", &fields(json!({"rank": 1}))).await.unwrap();
    let two = store.insert("items", &fields(json!({"rank": 2}))).await.unwrap();
    let three = store.insert("items", &fields(json!({"rank": 3}))).await.unwrap();
    store.insert("items", &fields(json!({"rank": "zzz"}))).await.unwrap();
    store.insert("items", &fields(json!({"title": "no rank"}))).await.unwrap();

    let lt = store
        .query_where("items", &filter("rank", WhereOp::Lt, json!(2)))
        .await
        .unwrap();
    assert_eq!(ids(&lt), vec![one.as_str()]);

    let le = store
        .query_where("items", &filter("rank", WhereOp::Le, json!(2)))
        .await
        .unwrap();
    assert_eq!(ids(&le), vec![one.as_str(), two.as_str()]);

    let gt = store
        .query_where("items", &filter("rank", WhereOp::Gt, json!(2)))
        .await
        .unwrap();
    assert_eq!(ids(&gt), vec![three.as_str()]);

    let ge = store
        .query_where("items", &filter("rank", WhereOp::Ge, json!(2)))
        .await
        .unwrap();
    assert_eq!(ids(&ge), vec![two.as_str(), three.as_str()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn query_where_text_ordering_ignores_numbers() {
    let store = setup_store().await;
    store.insert("items", &fields(json!({"title": 5}))).await.unwrap();
    let a = store.insert("items", &fields(json!({"title": "A"}))).await.unwrap();
    store.insert("items", &fields(json!({"title": "Z"}))).await.unwrap();

    let docs = store
        .query_where("items", &filter("title", WhereOp::Lt, json!("M")))
        .await
        .unwrap();
    assert_eq!(ids(&docs), vec![a.as_str()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn query_where_not_equal_skips_missing_and_null() {
    let store = setup_store().await;
    store.insert("items", &fields(json!({"title": "A"}))).await.unwrap();
    let c = store.insert("items", &fields(json!({"title": "C"}))).await.unwrap();
    let n = store.insert("items", &fields(json!({"title": 7}))).await.unwrap();
    store.insert("items", &fields(json!({"title": null}))).await.unwrap();
    store.insert("items", &fields(json!({"content": "x"}))).await.unwrap();

    let docs = store
        .query_where("items", &filter("title", WhereOp::Ne, json!("A")))
        .await
        .unwrap();
    assert_eq!(ids(&docs), vec![c.as_str(), n.as_str()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn query_where_null_equality() {
    let store = setup_store().await;
    let null = store.insert("items", &fields(json!({"title": null}))).await.unwrap();
    store.insert("items", &fields(json!({"content": "x"}))).await.unwrap();

    let docs = store
        .query_where("items", &filter("title", WhereOp::Eq, Value::Null))
        .await
        .unwrap();
    assert_eq!(ids(&docs), vec![null.as_str()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn query_where_in() {
    let store = setup_store().await;
    let a = store.insert("items", &fields(json!({"title": "A"}))).await.unwrap();
    store.insert("items", &fields(json!({"title": "B"}))).await.unwrap();
    let c = store.insert("items", &fields(json!({"title": "C"}))).await.unwrap();

    let docs = store
        .query_where("items", &filter("title", WhereOp::In, json!(["A", "C", 1])))
        .await
        .unwrap();
    assert_eq!(ids(&docs), vec![a.as_str(), c.as_str()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn query_where_array_contains() {
    let store = setup_store().await;
    let tagged = store
        .insert("items", &fields(json!({"tags": ["rust", "web"]})))
        .await
        .unwrap();
    store
        .insert("items", &fields(json!({"tags": ["go"]})))
        .await
        .unwrap();
    store
        .insert("items", &fields(json!({"tags": "rust"})))
        .await
        .unwrap();

    let docs = store
        .query_where("items", &filter("tags", WhereOp::ArrayContains, json!("rust")))
        .await
        .unwrap();
    assert_eq!(ids(&docs), vec![tagged.as_str()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn query_where_invalid_value_is_rejected() {
    let store = setup_store().await;

    let result = store
        .query_where("items", &filter("title", WhereOp::In, json!("A")))
        .await;
    assert!(matches!(result, Err(StoreError::InvalidQuery { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn query_range_is_half_open_and_sorted() {
    let store = setup_store().await;
    let b = store.insert("items", &fields(json!({"title": "b"}))).await.unwrap();
    let a = store.insert("items", &fields(json!({"title": "a"}))).await.unwrap();
    store.insert("items", &fields(json!({"title": "c"}))).await.unwrap();
    store.insert("items", &fields(json!({"title": 1}))).await.unwrap();

    let range = TextRange {
        lower_inclusive: "a".to_string(),
        upper_exclusive: "c".to_string(),
    };
    let docs = store
        .query_range("items", &field("title"), &range)
        .await
        .unwrap();
    assert_eq!(ids(&docs), vec![a.as_str(), b.as_str()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_document() {
    let store = setup_store().await;
    let id = store.insert("items", &fields(json!({"title": "A"}))).await.unwrap();

    store.delete("items", &id).await.expect("Delete should succeed");
    assert!(store.get("items", &id).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_missing_is_noop() {
    let store = setup_store().await;
    let id = store.insert("items", &fields(json!({"title": "A"}))).await.unwrap();

    store
        .delete("items", "nonexist")
        .await
        .expect("Deleting a missing document should succeed");
    assert_eq!(ids(&store.list("items", None).await.unwrap()), vec![id.as_str()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_merges_top_level_fields() {
    let store = setup_store().await;
    let id = store
        .insert("items", &fields(json!({"title": "A", "content": "B", "meta": {"x": 1}})))
        .await
        .unwrap();

    store
        .update("items", &id, &fields(json!({"title": "A2", "meta": {"y": 2}})))
        .await
        .expect("Update should succeed");

    let doc = store.get("items", &id).await.unwrap().unwrap();
    assert_eq!(
        Value::Object(doc.fields),
        json!({"title": "A2", "content": "B", "meta": {"y": 2}})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn update_missing_returns_not_found() {
    let store = setup_store().await;

    let result = store
        .update("items", "nonexist", &fields(json!({"title": "A"})))
        .await;
    assert!(matches!(
        result,
        Err(StoreError::NotFound { ref collection, ref id }) if collection == "items" && id == "nonexist"
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_updates_on_disk_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let db = SqliteDatabase::open(dir.path().join("items.db"))
        .await
        .expect("Failed to open database");
    db.migrate().await.expect("Migration should succeed");
    let store = db.documents();

    let mut ids = Vec::new();
    for n in 0..16 {
        ids.push(store.insert("items", &fields(json!({"n": n}))).await.unwrap());
    }

    let mut tasks = tokio::task::JoinSet::new();
    for (n, id) in ids.iter().enumerate() {
        let store = store.clone();
        let id = id.clone();
        tasks.spawn(async move {
            store
                .update("items", &id, &fields(json!({"done": n})))
                .await
        });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap().expect("Concurrent update should succeed");
    }

    for (n, id) in ids.iter().enumerate() {
        let doc = store.get("items", id).await.unwrap().unwrap();
        assert_eq!(Value::Object(doc.fields), json!({"n": n, "done": n}));
    }
}
