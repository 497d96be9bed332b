use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use pharmacy_server::{create_app, PharmacyServer, ServerConfig};

/// Test configuration for prescription API tests
struct TestConfig {
    app: Router,
}

impl TestConfig {
    fn new() -> Self {
        let server = PharmacyServer::in_memory(ServerConfig::default());
        Self {
            app: create_app(server),
        }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_prescription(&self, pharmacy_id: &str, patient_name: &str) -> Value {
        let (status, body) = self
            .send(
                "POST",
                "/prescriptions/addprescription",
                Some(json!({
                    "pharmacyId": pharmacy_id,
                    "userId": "user-1",
                    "patientName": patient_name,
                    "contactNumber": "0711111111",
                    "prescriptionImage": "https://cdn.example.org/rx/1.jpg"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }
}

#[tokio::test]
async fn test_add_prescription_defaults_to_pending() {
    let config = TestConfig::new();
    let prescription = config.create_prescription("ph-1", "Nimal Perera").await;

    assert_eq!(prescription["_id"].as_str().unwrap().len(), 24);
    assert_eq!(prescription["status"], "Pending");
    assert_eq!(prescription["patientName"], "Nimal Perera");
    assert!(prescription["notes"].is_null());
    assert!(prescription["createdAt"].is_string());
}

#[tokio::test]
async fn test_get_prescription_by_id() {
    let config = TestConfig::new();
    let created = config.create_prescription("ph-1", "Nimal Perera").await;
    let id = created["_id"].as_str().unwrap();

    let (status, body) = config.send("GET", &format!("/prescriptions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);

    let (status, body) = config
        .send("GET", "/prescriptions/000000000000000000000000", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Prescription not found");
}

#[tokio::test]
async fn test_list_and_count_by_pharmacy() {
    let config = TestConfig::new();
    config.create_prescription("ph-1", "A").await;
    config.create_prescription("ph-2", "B").await;
    config.create_prescription("ph-1", "C").await;

    let (status, all) = config.send("GET", "/prescriptions/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (status, for_ph1) = config.send("GET", "/prescriptions/pharmacy/ph-1", None).await;
    assert_eq!(status, StatusCode::OK);
    let for_ph1 = for_ph1.as_array().unwrap();
    assert_eq!(for_ph1.len(), 2);
    assert!(for_ph1.iter().all(|p| p["pharmacyId"] == "ph-1"));

    let (status, count) = config
        .send("GET", "/prescriptions/getprescriptioncount/ph-1", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count, json!({ "count": 2 }));
}

#[tokio::test]
async fn test_update_prescription_is_whitelisted() {
    let config = TestConfig::new();
    let created = config.create_prescription("ph-1", "Nimal Perera").await;
    let id = created["_id"].as_str().unwrap();

    let (status, updated) = config
        .send(
            "PUT",
            &format!("/prescriptions/updprescription/{id}"),
            Some(json!({ "notes": "Deliver after 5pm" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["notes"], "Deliver after 5pm");
    assert_eq!(updated["status"], "Pending");

    let (status, body) = config
        .send(
            "PUT",
            &format!("/prescriptions/updprescription/{id}"),
            Some(json!({ "status": "Completed" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request body");
}

#[tokio::test]
async fn test_change_status() {
    let config = TestConfig::new();
    let created = config.create_prescription("ph-1", "Nimal Perera").await;
    let id = created["_id"].as_str().unwrap();

    let (status, body) = config
        .send(
            "PUT",
            &format!("/prescriptions/prescription/{id}"),
            Some(json!({ "status": "Accepted" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Accepted");

    let (status, body) = config
        .send(
            "PUT",
            &format!("/prescriptions/prescription/{id}"),
            Some(json!({ "status": "Shipped" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "invalid_body");
    assert!(!body.to_string().contains("Shipped"));

    let (status, body) = config
        .send(
            "PUT",
            "/prescriptions/prescription/000000000000000000000000",
            Some(json!({ "status": "Rejected" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Prescription not found");
}

#[tokio::test]
async fn test_delete_prescription() {
    let config = TestConfig::new();
    let created = config.create_prescription("ph-1", "Nimal Perera").await;
    let id = created["_id"].as_str().unwrap();

    let (status, body) = config
        .send("DELETE", &format!("/prescriptions/deleteprescription/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Prescription deleted successfully" }));

    let (status, body) = config
        .send("DELETE", &format!("/prescriptions/deleteprescription/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Prescription not found");
}

#[tokio::test]
async fn test_malformed_prescription_id_is_internal_error() {
    let config = TestConfig::new();

    let (status, body) = config.send("GET", "/prescriptions/xyz", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal Server Error");
}

#[tokio::test]
async fn test_add_prescription_with_malformed_json_is_bad_request() {
    let config = TestConfig::new();
    let request = Request::builder()
        .method("POST")
        .uri("/prescriptions/addprescription")
        .header("content-type", "application/json")
        .body(Body::from("{\"pharmacyId\": "))
        .unwrap();

    let response = config.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Invalid request body");

    let (_, all) = config.send("GET", "/prescriptions/", None).await;
    assert_eq!(all, json!([]));
}
