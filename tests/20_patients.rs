mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

// CRUD surface for /api/v1/patients. Requires DATABASE_URL pointing at a
// migrated Postgres instance; the server binary is spawned by common.

#[tokio::test]
async fn create_then_get_round_trip() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let last_name = common::unique_marker("Roundtrip");

    let res = client
        .post(format!("{}/api/v1/patients", server.base_url))
        .json(&json!({ "first_name": "Alua", "last_name": last_name, "phone": "+7 707 111 2233" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED, "unexpected status: {}", res.status());

    let created = res.json::<serde_json::Value>().await?;
    let patient = &created["patient"];
    let id = patient["id"].as_i64().expect("missing id");
    assert!(patient["created_at"].is_string());
    assert!(patient["updated_at"].is_string());

    let res = client.get(format!("{}/api/v1/patients/{}", server.base_url, id)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched = res.json::<serde_json::Value>().await?;
    assert_eq!(fetched["first_name"], "Alua");
    assert_eq!(fetched["last_name"], last_name.as_str());
    assert_eq!(fetched["phone"], "+7 707 111 2233");

    Ok(())
}

#[tokio::test]
async fn partial_update_leaves_other_fields_unchanged() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let last_name = common::unique_marker("Patch");

    let created = client
        .post(format!("{}/api/v1/patients", server.base_url))
        .json(&json!({ "first_name": "Bekzat", "last_name": last_name, "phone": "+7 700 1" }))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    let id = created["patient"]["id"].as_i64().expect("missing id");

    // Patch only the phone
    let res = client
        .put(format!("{}/api/v1/patients/{}", server.base_url, id))
        .json(&json!({ "phone": "+7 700 2" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["phone"], "+7 700 2");
    assert_eq!(updated["first_name"], "Bekzat");
    assert_eq!(updated["last_name"], last_name.as_str());

    Ok(())
}

#[tokio::test]
async fn delete_is_idempotent_error_not_a_crash() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let created = client
        .post(format!("{}/api/v1/patients", server.base_url))
        .json(&json!({ "first_name": "Dina", "last_name": common::unique_marker("Del") }))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    let id = created["patient"]["id"].as_i64().expect("missing id");

    let res = client.delete(format!("{}/api/v1/patients/{}", server.base_url, id)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["result"], "success");

    // Second delete: 404 with the error envelope, both times a valid response
    let res = client.delete(format!("{}/api/v1/patients/{}", server.base_url, id)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["error"].is_string(), "missing error envelope: {}", body);

    Ok(())
}

#[tokio::test]
async fn malformed_id_is_a_client_error() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for bad in ["abc", "0", "-7"] {
        let res =
            client.get(format!("{}/api/v1/patients/{}", server.base_url, bad)).send().await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "id {:?}", bad);
        let body = res.json::<serde_json::Value>().await?;
        assert!(body["error"].is_string(), "missing error envelope: {}", body);
    }

    Ok(())
}

#[tokio::test]
async fn missing_id_is_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res =
        client.get(format!("{}/api/v1/patients/999999999", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
