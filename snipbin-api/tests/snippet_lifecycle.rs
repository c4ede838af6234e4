//! Integration tests: the snippet lifecycle end to end.
//!
//! Drives the real router with in-memory state through `oneshot`, covering
//! creation, ownership enforcement, update/delete, the rendered highlight
//! view, and the user endpoints.

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use serde_json::{json, Value};
use snipbin_api::routes::{create_router, AppState};
use snipbin_core::UserSeed;
use tower::ServiceExt;

const ALICE: &str = "alice-token";
const BOB: &str = "bob-token";

fn app() -> Router {
    let state = AppState::in_memory([
        UserSeed { username: "alice".to_owned(), token: ALICE.to_owned() },
        UserSeed { username: "bob".to_owned(), token: BOB.to_owned() },
    ]);
    create_router(state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request must build");
    app.clone().oneshot(request).await.expect("infallible service")
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("body must be readable");
    serde_json::from_slice(&bytes).expect("body must be JSON")
}

async fn create_as(app: &Router, token: &str, body: Value) -> Value {
    let response = send(app, Method::POST, "/snippets/", Some(token), Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

#[tokio::test]
async fn anonymous_create_is_rejected_and_persists_nothing() {
    let app = app();
    let response =
        send(&app, Method::POST, "/snippets/", None, Some(json!({"code": "x = 1"}))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let listing = send(&app, Method::GET, "/snippets/", None, None).await;
    assert_eq!(json_body(listing).await, json!([]), "store must stay empty");
}

#[tokio::test]
async fn authenticated_create_sets_the_owner() {
    let app = app();
    let created = create_as(&app, ALICE, json!({"code": "x = 1"})).await;
    assert_eq!(created["owner"], "alice");
    assert_eq!(created["code"], "x = 1");
    assert_eq!(created["title"], "");
    assert_eq!(created["linenos"], false);
    assert_eq!(created["style"], "friendly");
}

#[tokio::test]
async fn created_snippet_round_trips() {
    let app = app();
    let created = create_as(
        &app,
        ALICE,
        json!({"code": "print('hi')", "style": "monokai", "linenos": true, "title": "hi"}),
    )
    .await;
    let url = created["url"].as_str().expect("created repr carries a url");
    assert!(created["id"].is_string());
    assert!(created["created_at"].is_string());
    assert_eq!(created["highlight"], format!("{url}highlight/"));

    let response = send(&app, Method::GET, url, None, None).await;
    assert_eq!(response.status(), StatusCode::OK, "reads are open to anyone");
    let fetched = json_body(response).await;
    assert_eq!(fetched, created, "retrieval must return the created representation");
}

#[tokio::test]
async fn unknown_snippet_id_is_404() {
    let app = app();
    let uri = format!("/snippets/{}/", uuid::Uuid::new_v4());
    let response = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_owner_update_is_403_and_changes_nothing() {
    let app = app();
    let created = create_as(&app, ALICE, json!({"code": "original"})).await;
    let url = created["url"].as_str().expect("url");

    let response =
        send(&app, Method::PUT, url, Some(BOB), Some(json!({"code": "hijacked"}))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let fetched = json_body(send(&app, Method::GET, url, None, None).await).await;
    assert_eq!(fetched["code"], "original", "denied update must not touch the record");
    assert_eq!(fetched["owner"], "alice");
}

#[tokio::test]
async fn non_owner_delete_is_403_and_changes_nothing() {
    let app = app();
    let created = create_as(&app, ALICE, json!({"code": "keep me"})).await;
    let url = created["url"].as_str().expect("url");

    let response = send(&app, Method::DELETE, url, Some(BOB), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(&app, Method::GET, url, None, None).await;
    assert_eq!(response.status(), StatusCode::OK, "record must survive a denied delete");
}

#[tokio::test]
async fn anonymous_mutation_is_401() {
    let app = app();
    let created = create_as(&app, ALICE, json!({"code": "x"})).await;
    let url = created["url"].as_str().expect("url");

    let put = send(&app, Method::PUT, url, None, Some(json!({"code": "y"}))).await;
    assert_eq!(put.status(), StatusCode::UNAUTHORIZED);

    let delete = send(&app, Method::DELETE, url, None, None).await;
    assert_eq!(delete.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn owner_update_keeps_identity_fields() {
    let app = app();
    let created = create_as(&app, ALICE, json!({"code": "before", "title": "t"})).await;
    let url = created["url"].as_str().expect("url");

    let response = send(
        &app,
        Method::PATCH,
        url,
        Some(ALICE),
        Some(json!({"code": "after", "linenos": true})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;

    assert_eq!(updated["code"], "after");
    assert_eq!(updated["linenos"], true);
    assert_eq!(updated["title"], "t", "untouched fields survive a partial update");
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["owner"], created["owner"]);
    assert_eq!(updated["created_at"], created["created_at"]);
}

#[tokio::test]
async fn delete_is_not_idempotent() {
    let app = app();
    let created = create_as(&app, ALICE, json!({"code": "once"})).await;
    let url = created["url"].as_str().expect("url");

    let first = send(&app, Method::DELETE, url, Some(ALICE), None).await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = send(&app, Method::DELETE, url, Some(ALICE), None).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND, "second delete must be 404");

    let fetch = send(&app, Method::GET, url, None, None).await;
    assert_eq!(fetch.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn validation_failures_report_per_field_messages() {
    let app = app();
    let response = send(
        &app,
        Method::POST,
        "/snippets/",
        Some(ALICE),
        Some(json!({"code": "   ", "style": "plasma"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["errors"]["code"][0].is_string(), "code failure must be reported: {body}");
    assert!(body["errors"]["style"][0].is_string(), "style failure must be reported: {body}");

    let listing = json_body(send(&app, Method::GET, "/snippets/", None, None).await).await;
    assert_eq!(listing, json!([]), "rejected payload must not persist");
}

#[tokio::test]
async fn blank_code_update_is_rejected_without_effect() {
    let app = app();
    let created = create_as(&app, ALICE, json!({"code": "good"})).await;
    let url = created["url"].as_str().expect("url");

    let response = send(&app, Method::PUT, url, Some(ALICE), Some(json!({"code": ""}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let fetched = json_body(send(&app, Method::GET, url, None, None).await).await;
    assert_eq!(fetched["code"], "good");
}

#[tokio::test]
async fn listing_follows_insertion_order() {
    let app = app();
    create_as(&app, ALICE, json!({"code": "first"})).await;
    create_as(&app, BOB, json!({"code": "second"})).await;
    create_as(&app, ALICE, json!({"code": "third"})).await;

    let listing = json_body(send(&app, Method::GET, "/snippets/", None, None).await).await;
    let codes: Vec<&str> =
        listing.as_array().expect("listing is an array").iter().map(|s| {
            s["code"].as_str().expect("code is a string")
        }).collect();
    assert_eq!(codes, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn highlight_returns_html_markup() {
    let app = app();
    let created =
        create_as(&app, ALICE, json!({"code": "print('hi')", "linenos": true})).await;
    let uri = created["highlight"].as_str().expect("highlight url").to_owned();

    let response = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(content_type.starts_with("text/html"), "got content type {content_type}");

    let bytes = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("body must be readable");
    let markup = String::from_utf8(bytes.to_vec()).expect("markup is UTF-8");
    assert!(markup.contains("<div class=\"highlight friendly\">"));
    assert!(markup.contains("print(&#39;hi&#39;)"), "source must be escaped: {markup}");
    assert!(markup.contains("class=\"lineno\""), "line numbers were requested");
}

#[tokio::test]
async fn highlight_of_unknown_snippet_is_404() {
    let app = app();
    let uri = format!("/snippets/{}/highlight/", uuid::Uuid::new_v4());
    let response = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_detail_lists_owned_snippets() {
    let app = app();
    let first = create_as(&app, ALICE, json!({"code": "a1"})).await;
    create_as(&app, BOB, json!({"code": "b1"})).await;
    let second = create_as(&app, ALICE, json!({"code": "a2"})).await;

    let users = json_body(send(&app, Method::GET, "/users/", None, None).await).await;
    let alice = users
        .as_array()
        .expect("users is an array")
        .iter()
        .find(|u| u["username"] == "alice")
        .expect("alice is listed")
        .clone();

    let uri = format!("/users/{}/", alice["id"].as_str().expect("id"));
    let detail = json_body(send(&app, Method::GET, &uri, None, None).await).await;
    assert_eq!(detail["username"], "alice");
    assert_eq!(detail["snippets"], json!([first["url"], second["url"]]));
}
