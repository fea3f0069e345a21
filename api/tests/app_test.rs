mod common;

use std::sync::Arc;
use std::time::Duration;

use actix_web::{http::StatusCode, test};
use serde_json::Value;

use sphere_api::create_app;
use sphere_api::dto::ApiResponse;
use sphere_core::DeliveryFailurePolicy;

use common::{default_state, state_with, test_cors, RecordingNotifier, UnreachableStore};

#[actix_web::test]
async fn test_health_reports_store_up() {
    let app = test::init_service(create_app(
        default_state(Arc::new(RecordingNotifier::new())),
        test_cors(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "up");
    assert_eq!(body["service"], "sphere-api");
}

#[actix_web::test]
async fn test_health_reports_store_down() {
    let state = state_with(
        Arc::new(UnreachableStore),
        Arc::new(RecordingNotifier::new()),
        DeliveryFailurePolicy::Fail,
        Duration::from_secs(5),
    );
    let app = test::init_service(create_app(state, test_cors())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["store"], "down");
}

#[actix_web::test]
async fn test_unknown_route_is_json_404() {
    let app = test::init_service(create_app(
        default_state(Arc::new(RecordingNotifier::new())),
        test_cors(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/api/auth/unknown").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ApiResponse = test::read_body_json(resp).await;
    assert!(!body.success);
}
