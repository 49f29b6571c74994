//! Integration tests for the items page.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::api::{AppState, routes};
use crate::db::{Database, DocumentStore, SqliteDatabase};
use crate::items::{ITEMS_COLLECTION, MSG_DELETED, MSG_SAVED, MSG_UPDATED};

async fn test_app() -> (axum::Router, SqliteDatabase) {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    (routes::create_router(AppState::new(db.clone())), db)
}

/// Helper to read an HTML response body
async fn text_body(response: axum::response::Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

async fn get_page(app: &axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, text_body(response).await)
}

async fn post_form(app: &axum::Router, uri: &str, form: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, text_body(response).await)
}

async fn only_item_id(db: &SqliteDatabase) -> String {
    let docs = db.documents().list(ITEMS_COLLECTION, None).await.unwrap();
    assert_eq!(docs.len(), 1);
    docs[0].id.clone()
}

#[tokio::test(flavor = "multi_thread")]
async fn index_renders_empty_page() {
    let (app, _) = test_app().await;

    let (status, html) = get_page(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("id=\"listItems\""));
    assert!(!html.contains("alert-danger"));
}

#[tokio::test(flavor = "multi_thread")]
async fn submit_adds_then_lists_item() {
    let (app, db) = test_app().await;

    let (status, html) = post_form(
        &app,
        "/items",
        "elementId=&title=Hello+page&content=Body+text",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(MSG_SAVED));
    assert!(html.contains("Hello page"));
    assert!(html.contains("Body text"));

    let id = only_item_id(&db).await;
    assert!(html.contains(&format!("/items/{}/delete", id)));

    let (_, html) = get_page(&app, "/").await;
    assert!(html.contains("Hello page"));
    assert!(!html.contains(MSG_SAVED));
}

#[tokio::test(flavor = "multi_thread")]
async fn edit_update_delete_cycle() {
    let (app, db) = test_app().await;
    post_form(&app, "/items", "title=Draft&content=First").await;
    let id = only_item_id(&db).await;

    // Edit stages the item in the form
    let (status, html) = get_page(&app, &format!("/items/{}/edit", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(&format!("value=\"{}\"", id)));
    assert!(html.contains("value=\"Draft\""));
    assert!(html.contains("Update"));

    // Submitting with the id updates in place
    let (_, html) = post_form(
        &app,
        "/items",
        &format!("elementId={}&title=Final&content=First", id),
    )
    .await;
    assert!(html.contains(MSG_UPDATED));
    assert!(html.contains("Final"));
    assert!(!html.contains("Draft"));
    assert_eq!(only_item_id(&db).await, id);

    // Delete removes the row
    let (status, html) = post_form(&app, &format!("/items/{}/delete", id), "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(MSG_DELETED));
    assert!(!html.contains("Final"));
    assert!(db.documents().list(ITEMS_COLLECTION, None).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn failures_still_answer_with_page() {
    let (app, _) = test_app().await;

    let (status, html) = get_page(&app, "/items/nonexist/edit").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("alert-danger"));

    let (status, html) = post_form(&app, "/items", "elementId=nonexist&title=A&content=B").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("alert-danger"));
    assert!(html.contains("value=\"nonexist\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn submitted_markup_is_escaped() {
    let (app, _) = test_app().await;

    let (_, html) = post_form(
        &app,
        "/items",
        "title=%3Cscript%3Ealert(1)%3C%2Fscript%3E&content=x",
    )
    .await;
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}
