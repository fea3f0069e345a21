use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sphere_api::middleware::create_cors;
use sphere_api::{create_app, AppState};
use sphere_core::{OtpService, OtpServiceConfig};
use sphere_infra::{create_notifier, create_store};
use sphere_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Sphere OTP API Server");

    let config = AppConfig::from_env().context("Invalid configuration")?;
    info!(
        environment = %config.environment,
        store = ?config.cache.backend,
        sms_provider = ?config.sms.provider,
        delivery_failure_policy = %config.otp.delivery_failure_policy,
        "Configuration loaded"
    );

    let store = create_store(&config.cache)
        .await
        .context("Failed to initialize OTP store")?;
    let notifier = create_notifier(&config.sms).context("Failed to initialize SMS provider")?;

    let otp_service = Arc::new(OtpService::new(
        store,
        notifier,
        OtpServiceConfig::from(&config.otp),
    ));
    let state = web::Data::new(AppState::new(
        otp_service,
        Duration::from_secs(config.server.request_timeout),
    ));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let server_config = config.server.clone();
    let environment = config.environment;

    HttpServer::new(move || create_app(state.clone(), create_cors(&server_config, environment)))
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server terminated with an error")?;

    Ok(())
}
