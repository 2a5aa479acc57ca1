mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

async fn create_doctor(client: &reqwest::Client, base_url: &str) -> Result<i64> {
    let created = client
        .post(format!("{}/api/v1/doctors", base_url))
        .json(&json!({
            "first_name": "Gulnara",
            "last_name": common::unique_marker("Doc"),
            "speciality": "Cardiologist"
        }))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    Ok(created["doctor"]["id"].as_i64().expect("missing doctor id"))
}

async fn create_patient(client: &reqwest::Client, base_url: &str) -> Result<i64> {
    let created = client
        .post(format!("{}/api/v1/patients", base_url))
        .json(&json!({ "first_name": "Nursultan", "last_name": common::unique_marker("Pat") }))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    Ok(created["patient"]["id"].as_i64().expect("missing patient id"))
}

#[tokio::test]
async fn appointment_links_doctor_and_patient() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let doctor_id = create_doctor(&client, &server.base_url).await?;
    let patient_id = create_patient(&client, &server.base_url).await?;

    let res = client
        .post(format!("{}/api/v1/appointments", server.base_url))
        .json(&json!({
            "date_time": "2026-09-15T10:30:00Z",
            "doctor_id": doctor_id,
            "patient_id": patient_id
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED, "unexpected status: {}", res.status());
    let created = res.json::<serde_json::Value>().await?;
    let appointment_id = created["appointment"]["id"].as_i64().expect("missing id");
    assert_eq!(created["appointment"]["doctor_id"], doctor_id);
    assert_eq!(created["appointment"]["patient_id"], patient_id);

    // Visible through both relationship listings
    let by_doctor = client
        .get(format!("{}/api/v1/doctors/{}/appointments", server.base_url, doctor_id))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    let found = by_doctor["appointments"]
        .as_array()
        .expect("appointments array")
        .iter()
        .any(|a| a["id"].as_i64() == Some(appointment_id));
    assert!(found, "appointment not listed for doctor: {}", by_doctor);

    let by_patient = client
        .get(format!("{}/api/v1/patients/{}/appointments", server.base_url, patient_id))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    let found = by_patient["appointments"]
        .as_array()
        .expect("appointments array")
        .iter()
        .any(|a| a["id"].as_i64() == Some(appointment_id));
    assert!(found, "appointment not listed for patient: {}", by_patient);

    Ok(())
}

#[tokio::test]
async fn dangling_reference_is_a_persistence_error() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let patient_id = create_patient(&client, &server.base_url).await?;

    let res = client
        .post(format!("{}/api/v1/appointments", server.base_url))
        .json(&json!({
            "date_time": "2026-09-15T10:30:00Z",
            "doctor_id": 999999999,
            "patient_id": patient_id
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<serde_json::Value>().await?;
    let message = body["error"].as_str().expect("error envelope");
    // No SQL detail may leak
    assert!(!message.to_lowercase().contains("foreign key"), "leaked detail: {}", message);

    Ok(())
}

#[tokio::test]
async fn deleting_referenced_doctor_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let doctor_id = create_doctor(&client, &server.base_url).await?;
    let patient_id = create_patient(&client, &server.base_url).await?;

    let res = client
        .post(format!("{}/api/v1/appointments", server.base_url))
        .json(&json!({
            "date_time": "2026-11-02T11:00:00Z",
            "doctor_id": doctor_id,
            "patient_id": patient_id
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    // The appointment still references the doctor, so the delete is rejected
    let res = client
        .delete(format!("{}/api/v1/doctors/{}", server.base_url, doctor_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<serde_json::Value>().await?;
    let message = body["error"].as_str().expect("error envelope");
    let lowered = message.to_lowercase();
    assert!(!lowered.contains("foreign key"), "leaked detail: {}", message);
    assert!(!lowered.contains("constraint"), "leaked detail: {}", message);
    assert!(!lowered.contains("appointments"), "leaked detail: {}", message);

    // The doctor row survives
    let res =
        client.get(format!("{}/api/v1/doctors/{}", server.base_url, doctor_id)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn relationship_listing_for_unknown_doctor_is_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/v1/doctors/999999999/appointments", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn rescheduling_keeps_references() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let doctor_id = create_doctor(&client, &server.base_url).await?;
    let patient_id = create_patient(&client, &server.base_url).await?;

    let created = client
        .post(format!("{}/api/v1/appointments", server.base_url))
        .json(&json!({
            "date_time": "2026-10-01T09:00:00Z",
            "doctor_id": doctor_id,
            "patient_id": patient_id
        }))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    let id = created["appointment"]["id"].as_i64().expect("missing id");

    // Patch only the time
    let res = client
        .put(format!("{}/api/v1/appointments/{}", server.base_url, id))
        .json(&json!({ "date_time": "2026-10-01T14:00:00Z" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["doctor_id"], doctor_id);
    assert_eq!(updated["patient_id"], patient_id);
    assert!(updated["date_time"].as_str().unwrap_or("").starts_with("2026-10-01T14:00"));

    Ok(())
}
