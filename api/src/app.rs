//! Application state and factory
//!
//! `create_app` is shared by the binary and the integration tests, so both
//! exercise the same routing, body limits and error envelopes.

use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App,
};
use tracing_actix_web::TracingLogger;

use sphere_core::OtpService;

use crate::handlers::{json_error_handler, not_found};
use crate::routes::{auth, health::health_check};

/// Largest JSON body accepted by the OTP endpoints
const MAX_JSON_BYTES: usize = 4 * 1024;

/// Shared state handed to every handler
pub struct AppState {
    pub otp_service: Arc<OtpService>,
    /// Deadline for one request's store and notifier round-trips
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(otp_service: Arc<OtpService>, request_timeout: Duration) -> Self {
        Self {
            otp_service,
            request_timeout,
        }
    }
}

/// Create the application with all routes and middleware
pub fn create_app(
    state: web::Data<AppState>,
    cors: Cors,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let json_config = web::JsonConfig::default()
        .limit(MAX_JSON_BYTES)
        .error_handler(json_error_handler);

    App::new()
        .app_data(state)
        .app_data(json_config)
        // Registered last so the request span covers CORS handling too
        .wrap(cors)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api/auth").configure(auth::configure))
        .default_service(web::route().to(not_found))
}
