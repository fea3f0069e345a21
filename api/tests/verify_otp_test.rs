mod common;

use std::sync::Arc;

use actix_web::{http::StatusCode, test};
use serde_json::json;

use sphere_api::create_app;
use sphere_api::dto::ApiResponse;

use common::{default_state, test_cors, RecordingNotifier};

fn send_request(phone: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/auth/send-otp")
        .set_json(json!({ "phone": phone }))
}

fn verify_request(phone: &str, code: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/auth/verify-otp")
        .set_json(json!({ "phone": phone, "code": code }))
}

#[actix_web::test]
async fn test_code_verifies_once() {
    let notifier = Arc::new(RecordingNotifier::new());
    let app = test::init_service(create_app(default_state(notifier.clone()), test_cors())).await;

    let resp = test::call_service(&app, send_request("972501234567").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let code = notifier.last_code().unwrap();

    let resp = test::call_service(&app, verify_request("972501234567", &code).to_request()).await;
    let status = resp.status();
    let body: ApiResponse = test::read_body_json(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ApiResponse::ok());

    let resp = test::call_service(&app, verify_request("972501234567", &code).to_request()).await;
    let status = resp.status();
    let body: ApiResponse = test::read_body_json(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.success);
    assert!(body.message.unwrap().starts_with("No active code"));
}

#[actix_web::test]
async fn test_wrong_code_leaves_code_usable() {
    let notifier = Arc::new(RecordingNotifier::new());
    let app = test::init_service(create_app(default_state(notifier.clone()), test_cors())).await;

    let resp = test::call_service(&app, send_request("972501234567").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let code = notifier.last_code().unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let resp = test::call_service(&app, verify_request("972501234567", wrong).to_request()).await;
    let status = resp.status();
    let body: ApiResponse = test::read_body_json(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ApiResponse::failure("Wrong code"));

    let body: ApiResponse =
        test::call_and_read_body_json(&app, verify_request("972501234567", &code).to_request()).await;
    assert!(body.success);
}

#[actix_web::test]
async fn test_signed_and_unsigned_phone_share_a_code() {
    let notifier = Arc::new(RecordingNotifier::new());
    let app = test::init_service(create_app(default_state(notifier.clone()), test_cors())).await;

    let resp = test::call_service(&app, send_request("972501234567").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let code = notifier.last_code().unwrap();

    let body: ApiResponse =
        test::call_and_read_body_json(&app, verify_request("+972501234567", &code).to_request()).await;
    assert!(body.success);
}

#[actix_web::test]
async fn test_new_request_replaces_previous_code() {
    let notifier = Arc::new(RecordingNotifier::new());
    let app = test::init_service(create_app(default_state(notifier.clone()), test_cors())).await;

    let resp = test::call_service(&app, send_request("972501234567").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let first = notifier.last_code().unwrap();
    let resp = test::call_service(&app, send_request("+972501234567").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let second = notifier.last_code().unwrap();

    if first != second {
        let body: ApiResponse =
        test::call_and_read_body_json(&app, verify_request("972501234567", &first).to_request()).await;
        assert_eq!(body, ApiResponse::failure("Wrong code"));
    }
    let body: ApiResponse =
        test::call_and_read_body_json(&app, verify_request("972501234567", &second).to_request()).await;
    assert!(body.success);
}

#[actix_web::test]
async fn test_verify_without_request() {
    let notifier = Arc::new(RecordingNotifier::new());
    let app = test::init_service(create_app(default_state(notifier), test_cors())).await;

    let resp = test::call_service(&app, verify_request("972501234567", "123456").to_request()).await;
    let status = resp.status();
    let body: ApiResponse = test::read_body_json(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.success);
    assert!(body.message.unwrap().starts_with("No active code"));
}

#[actix_web::test]
async fn test_missing_fields_are_rejected() {
    let notifier = Arc::new(RecordingNotifier::new());
    let app = test::init_service(create_app(default_state(notifier), test_cors())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/verify-otp")
        .set_json(json!({ "phone": "972501234567" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ApiResponse = test::read_body_json(resp).await;
    assert_eq!(body, ApiResponse::failure("Verification code is required"));

    let req = test::TestRequest::post()
        .uri("/api/auth/verify-otp")
        .set_json(json!({ "code": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ApiResponse = test::read_body_json(resp).await;
    assert_eq!(body, ApiResponse::failure("Phone number is required"));
}
