//! Campusforge API composition root.

#![forbid(unsafe_code)]

mod auth;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::middleware::from_fn;
use axum::routing::{get, post};
use campusforge_application::{ChatService, InquiryService, ProfileService, RecruitingService};
use campusforge_core::AppError;
use campusforge_infrastructure::{
    GeminiAnswerGenerator, GeminiConfig, PostgresApplicationRepository, PostgresInquiryRepository,
    PostgresProfileRepository,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

    let database_url = required_env("DATABASE_URL")?;
    let gemini_api_key = required_env("GEMINI_API_KEY")?;
    let frontend_url =
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

    let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let api_port = env::var("API_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3001);

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let mut gemini_config = GeminiConfig::new(gemini_api_key);
    if let Some(endpoint) = env::var("GEMINI_API_URL")
        .ok()
        .filter(|value| !value.trim().is_empty())
    {
        gemini_config.endpoint = endpoint;
    }

    let profile_service = ProfileService::new(Arc::new(PostgresProfileRepository::new(
        pool.clone(),
    )));
    let inquiry_service = InquiryService::new(
        Arc::new(PostgresInquiryRepository::new(pool.clone())),
        profile_service.clone(),
    );
    let recruiting_service = RecruitingService::new(Arc::new(PostgresApplicationRepository::new(
        pool.clone(),
    )));
    let chat_service = ChatService::new(Arc::new(GeminiAnswerGenerator::new(
        reqwest::Client::new(),
        gemini_config,
    )));

    let app_state = AppState {
        profile_service,
        inquiry_service,
        recruiting_service,
        chat_service,
        pool,
    };

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(&frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let app = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/api/profile/sync",
            post(handlers::profile::sync_profile_handler),
        )
        .route(
            "/api/inquiries",
            get(handlers::inquiries::list_inquiries_handler)
                .post(handlers::inquiries::create_inquiry_handler),
        )
        .route(
            "/api/inquiries/mine",
            get(handlers::inquiries::list_own_inquiries_handler),
        )
        .route(
            "/api/inquiries/status",
            post(handlers::inquiries::update_inquiry_status_handler),
        )
        .route(
            "/api/applications/pending",
            get(handlers::recruiting::list_pending_applications_handler),
        )
        .route(
            "/api/applications/status",
            post(handlers::recruiting::update_application_status_handler),
        )
        .route(
            "/api/applications/intake",
            post(handlers::recruiting::intake_application_handler),
        )
        .route("/api/chat", post(handlers::chat::ask_chat_handler))
        .layer(from_fn(middleware::resolve_identity))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state);

    let host = IpAddr::from_str(&api_host)
        .map_err(|error| AppError::Internal(format!("invalid API_HOST '{api_host}': {error}")))?;
    let address = SocketAddr::from((host, api_port));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "campusforge-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}
