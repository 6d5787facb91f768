//! # Scribe API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use scribe_core::ports::{
    BaseRepository, JobResult, NotificationHandler, NotificationQueue, PasswordService,
    TokenService,
};
use scribe_infra::{Argon2PasswordService, JwtTokenService};

mod config;
mod handlers;
mod middleware;
mod state;

use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Scribe API Server on {}:{}",
        config.host,
        config.port
    );

    // Build application state
    let state = AppState::new(config.database.as_ref()).await;

    // Auth services shared via app data
    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    // Start the notification worker: it persists notifications off the
    // request path so a slow or failing write never delays a toggle.
    start_notification_worker(&state).await;

    // Start HTTP server
    let token_data = web::Data::new(token_service);
    let password_data = web::Data::new(password_service);
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(token_data.clone())
            .app_data(password_data.clone())
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

async fn start_notification_worker(state: &AppState) {
    let notifications = state.notifications.clone();

    let handler: NotificationHandler = Box::new(move |job| {
        let notifications = notifications.clone();
        Box::pin(async move {
            match notifications.save(job.notification.clone()).await {
                Ok(_) => JobResult::Success,
                Err(e) => JobResult::Retry(e.to_string()),
            }
        })
    });

    if let Err(e) = state.notify_queue.start_worker(handler).await {
        tracing::error!("Failed to start notification worker: {}", e);
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,api_server=debug,scribe_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
