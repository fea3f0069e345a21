use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::warn;

use crate::app::AppState;

/// Liveness plus a probe of the code store
///
/// Answers 503 while the store is unreachable so load balancers can drain
/// the instance.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let store_up = match state.otp_service.store_health().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Store health check failed: {}", e);
            false
        }
    };

    let body = json!({
        "status": if store_up { "healthy" } else { "degraded" },
        "service": "sphere-api",
        "version": env!("CARGO_PKG_VERSION"),
        "store": if store_up { "up" } else { "down" },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if store_up {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
