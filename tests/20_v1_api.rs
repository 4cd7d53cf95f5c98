mod common;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;

use common::{request, TestApp};
use person_api::database::PersonStore;

#[tokio::test]
async fn list_empty_table() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app.send(request(Method::GET, "/v1", None, None)).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Get All Person Data Success", "data": [] }));
    Ok(())
}

#[tokio::test]
async fn insert_echoes_created_person() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app
        .send(request(
            Method::POST,
            "/v1/insert",
            None,
            Some(r#"{"name":"Alice","sex":"F","country":"US"}"#),
        ))
        .await?;

    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["message"], "Insert Success");
    let data = body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 1);
    assert!(data[0]["id"].as_i64().unwrap() > 0);
    assert_eq!(data[0]["name"], "Alice");
    assert_eq!(data[0]["sex"], "F");
    assert_eq!(data[0]["country"], "US");
    assert!(body.get("error").is_none());

    let id = data[0]["id"].as_i64().unwrap();
    assert_eq!(app.store.detail(id).await?.name, "Alice");
    Ok(())
}

#[tokio::test]
async fn list_returns_inserted_rows() -> Result<()> {
    let app = TestApp::new();
    app.seed("Alice", "F", "US").await;
    app.seed("Bob", "M", "CA").await;

    let (_, body) = app.send(request(Method::GET, "/v1", None, None)).await?;

    let names: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
    Ok(())
}

#[tokio::test]
async fn insert_malformed_body_is_bad_request() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app
        .send(request(Method::POST, "/v1/insert", None, Some(r#"{"name": "#)))
        .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(body.get("data").is_none());
    assert!(app.store.list().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn update_replaces_fields() -> Result<()> {
    let app = TestApp::new();
    let id = app.seed("Alice", "F", "US").await;

    let (status, body) = app
        .send(request(
            Method::PUT,
            &format!("/v1/update/{id}"),
            None,
            Some(r#"{"name":"Alicia","sex":"F","country":"MX"}"#),
        ))
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Update Success");
    assert_eq!(body["data"], json!([{ "id": id, "name": "Alicia", "sex": "F", "country": "MX" }]));
    Ok(())
}

#[tokio::test]
async fn update_missing_id_is_not_found() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app
        .send(request(
            Method::PUT,
            "/v1/update/42",
            None,
            Some(r#"{"name":"Ghost","sex":"?","country":"?"}"#),
        ))
        .await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("No Row Found"));
    assert!(app.store.list().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app
        .send(request(Method::DELETE, "/v1/delete/abc", None, None))
        .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn empty_id_is_bad_request() -> Result<()> {
    let app = TestApp::new();
    app.seed("Alice", "F", "US").await;

    let (status, body) = app
        .send(request(Method::PUT, "/v1/update/", None, Some("{}")))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "body: {body}");

    let (status, body) = app.send(request(Method::DELETE, "/v1/delete/", None, None)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "body: {body}");

    assert_eq!(app.store.list().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn insert_decodes_body_without_content_type() -> Result<()> {
    let app = TestApp::new();

    let plain = Request::builder()
        .method(Method::POST)
        .uri("/v1/insert")
        .body(Body::from(r#"{"name":"Alice","sex":"F","country":"US"}"#))?;
    let (status, body) = app.send(plain).await?;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["message"], "Insert Success");

    let labelled = Request::builder()
        .method(Method::POST)
        .uri("/v1/insert")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"name":"Bob","sex":"M","country":"CA"}"#))?;
    let (status, _) = app.send(labelled).await?;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(app.store.list().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn delete_twice_succeeds() -> Result<()> {
    let app = TestApp::new();
    let id = app.seed("Alice", "F", "US").await;

    for _ in 0..2 {
        let (status, body) = app
            .send(request(Method::DELETE, &format!("/v1/delete/{id}"), None, None))
            .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Delete Success" }));
        assert!(app.store.list().await?.is_empty());
    }
    Ok(())
}

#[tokio::test]
async fn wrong_method_is_reported_in_message() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app.send(request(Method::POST, "/v1", None, Some("{}"))).await?;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "message": "Invalid HTTP Method" }));

    let (status, _) = app.send(request(Method::GET, "/v1/insert", None, None)).await?;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app.send(request(Method::GET, "/health", None, None)).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "ok");
    Ok(())
}
