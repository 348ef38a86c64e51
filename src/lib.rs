//! StudyDrop library - subject-wise question drops over HTTP
//!
//! Exposes the shared application context and the router builder so the
//! binary and the integration tests assemble the app the same way.

pub mod core;
pub mod features;
pub mod modules;
pub mod shared;

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, Router};
use sqlx::SqlitePool;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::browse::{
    handlers as browse_handlers, routes as browse_routes, BrowseService,
};
use crate::features::sessions::{self, SessionStore};
use crate::features::uploads::{routes as uploads_routes, UploadService};
use crate::modules::storage::UploadStore;

/// Long-lived handles every feature builds on
pub struct AppContext {
    pub config: Config,
    pub pool: SqlitePool,
    pub uploads: Arc<UploadStore>,
    pub sessions: SessionStore,
}

impl AppContext {
    /// Connect the database, bootstrap the schema and upload root, and
    /// assemble the shared state.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pool = database::create_pool(&config.database).await?;
        tracing::info!("Database connection pool created");

        database::init_schema(&pool).await?;
        tracing::info!("Database schema initialized");

        let uploads = Arc::new(UploadStore::new(config.storage.root.clone()));
        uploads.ensure_root_exists().await?;

        let sessions = SessionStore::new(config.session.idle_ttl);
        tracing::info!("Session store initialized");

        Ok(Self {
            config,
            pool,
            uploads,
            sessions,
        })
    }
}

/// Build the application router from the shared context
pub fn build_router(ctx: &AppContext) -> Router {
    let upload_service = Arc::new(UploadService::new(
        ctx.pool.clone(),
        Arc::clone(&ctx.uploads),
    ));
    let browse_service = Arc::new(BrowseService::new(
        ctx.pool.clone(),
        Arc::clone(&ctx.uploads),
    ));

    // Build swagger router with dynamic info from config
    let swagger_modifier = SwaggerInfoModifier {
        title: ctx.config.swagger.title.clone(),
        version: ctx.config.swagger.version.clone(),
        description: ctx.config.swagger.description.clone(),
    };
    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);
    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    // Simple health check endpoint (no session required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // API routes run behind the session middleware so every handler can read
    // and update per-browser state
    let api_routes = Router::new()
        .merge(uploads_routes::routes(upload_service))
        .merge(browse_routes::routes(browse_service))
        .merge(sessions::routes())
        .route_layer(from_fn_with_state(
            ctx.sessions.clone(),
            sessions::session_middleware,
        ));

    // Embedded single-page UI
    let ui_routes = Router::new()
        .route(
            "/",
            axum::routing::get(browse_handlers::ui_handler::serve_index),
        )
        .route(
            "/static/app.js",
            axum::routing::get(browse_handlers::ui_handler::serve_app_js),
        );

    Router::new()
        .merge(swagger)
        .merge(api_routes)
        .merge(ui_routes)
        .merge(health_route)
        // Stored question files are served straight from the upload root
        .nest_service("/uploads", ServeDir::new(ctx.uploads.root()))
        .layer(middleware::cors_layer(
            ctx.config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
