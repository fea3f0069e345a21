//! CORS middleware configuration for cross-origin requests.
//!
//! Mobile and web clients call the OTP endpoints directly, so browsers need
//! preflight answers. Development is permissive; production only admits the
//! origins listed in `ALLOWED_ORIGINS` plus the local schemes used by
//! embedded web views.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use tracing::info;

use sphere_shared::config::{Environment, ServerConfig};

/// Origins served by mobile web views on the device itself
const MOBILE_APP_ORIGINS: &[&str] = &[
    "capacitor://localhost",
    "ionic://localhost",
    "http://localhost",
    "https://localhost",
];

/// Creates a CORS middleware instance for the given environment.
pub fn create_cors(config: &ServerConfig, environment: Environment) -> Cors {
    if environment.is_production() {
        create_production_cors(config)
    } else {
        create_development_cors(config.cors_max_age)
    }
}

fn create_development_cors(max_age: usize) -> Cors {
    info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::CACHE_CONTROL,
            header::HeaderName::from_static("x-requested-with"),
            header::HeaderName::from_static("x-app-version"),
            header::HeaderName::from_static("x-platform"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(max_age)
}

fn create_production_cors(config: &ServerConfig) -> Cors {
    info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-app-version"),
            header::HeaderName::from_static("x-platform"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.cors_max_age);

    for origin in &config.allowed_origins {
        info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    for origin in MOBILE_APP_ORIGINS {
        cors = cors.allowed_origin(origin);
    }

    cors
}
