use std::time::Duration;

use serde_json::json;

use crate::support::{start_default_stack, start_stack, BrokenCatalog};

#[tokio::test]
async fn known_id_returns_the_record() {
    let stack = start_default_stack().await;

    let resp = reqwest::get(format!("{}/car/2", stack.base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-type"], "application/json");

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "result": { "id": 2, "make": "Toyota", "model": "Camry" } })
    );
}

#[tokio::test]
async fn unknown_id_has_null_result() {
    let stack = start_default_stack().await;

    for id in ["0", "99", "-4"] {
        let resp = reqwest::get(format!("{}/car/{id}", stack.base)).await.unwrap();
        assert_eq!(resp.status(), 200, "id {id}");
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body, json!({ "result": null }));
    }
}

#[tokio::test]
async fn missing_id_is_rejected() {
    let stack = start_default_stack().await;

    for path in ["/car/", "/car"] {
        let resp = reqwest::get(format!("{}{path}", stack.base)).await.unwrap();
        assert_eq!(resp.status(), 400, "path {path}");
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["message"], "id parameter not defined");
        assert_eq!(body["code"], "missing_id");
    }
}

#[tokio::test]
async fn non_integer_id_is_rejected() {
    let stack = start_default_stack().await;

    for id in ["abc", "2.5", "1e3", "99999999999999999999"] {
        let resp = reqwest::get(format!("{}/car/{id}", stack.base)).await.unwrap();
        assert_eq!(resp.status(), 400, "id {id}");
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["message"], "id parameter is not an integer");
        assert_eq!(body["code"], "invalid_id");
    }
}

#[tokio::test]
async fn backend_failure_is_reported_generically() {
    let stack = start_stack(BrokenCatalog, Duration::from_secs(4)).await;

    let resp = reqwest::get(format!("{}/car/1", stack.base)).await.unwrap();
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "error retrieving Cars information");
    assert_eq!(body["code"], "lookup_failed");
}
