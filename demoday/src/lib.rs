//! # demoday: Demo-day Slot Registration Service
//!
//! `demoday` is a small web service for event registration: students sign up
//! for a timed presentation slot through a form, and the service validates the
//! submission, enforces per-slot capacity, and persists the registration in
//! PostgreSQL. A read API exposes slot occupancy and the student roster for
//! display on the signup page.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and uses PostgreSQL via SQLx for persistence.
//!
//! The **API layer** ([`api`]) exposes three endpoints: `GET /api/demo-slots`
//! (slots with derived occupancy and an availability flag), `GET /api/students`
//! (registrations joined with their slot times), and `POST /api/students`
//! (multipart registration intake). Handlers are thin; they validate, call a
//! repository, and serialize.
//!
//! The **validation unit** ([`validation`]) is a pure function over the raw
//! form fields with a fixed rule order and exact client-facing messages.
//!
//! The **database layer** ([`db`]) uses the repository pattern. The one piece
//! of real business logic lives in [`db::handlers::registrations`]: the
//! capacity-enforcing registration transaction, which locks the target slot
//! row and decides between insert, update, and rejection in a single
//! transaction so racing submissions cannot oversubscribe a slot.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use demoday::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = demoday::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     demoday::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! The application requires a PostgreSQL database and automatically runs
//! migrations on startup:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::migrate::MigrateError> {
//! demoday::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod openapi;
pub mod telemetry;
pub mod validation;

#[cfg(test)]
mod test;

pub use config::Config;

use anyhow::Context;
use axum::{Router, http::HeaderValue, routing::get};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Shared application state passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the demoday database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Build the application router from shared state.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let api_routes = Router::new()
        .route("/demo-slots", get(api::handlers::slots::list_demo_slots))
        .route(
            "/students",
            get(api::handlers::students::list_students).post(api::handlers::students::register_student),
        )
        .with_state(state.clone());

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .nest("/api", api_routes)
        .merge(Scalar::with_url("/docs", openapi::ApiDoc::openapi()));

    let cors_layer = create_cors_layer(&state.config)?;

    Ok(router.layer(cors_layer).layer(TraceLayer::new_for_http()))
}

fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut cors = CorsLayer::new();

    if config.cors.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(tower_http::cors::Any);
    } else {
        let mut origins = Vec::new();
        for origin in &config.cors.allowed_origins {
            origins.push(
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("invalid CORS origin: {origin}"))?,
            );
        }
        cors = cors.allow_origin(origins);
    }

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// The assembled application: router, state, and the owned connection pool.
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_pool(config, None).await
    }

    /// Create an application over an existing pool (used by tests); connects
    /// and migrates when no pool is supplied.
    pub async fn new_with_pool(config: Config, pool: Option<PgPool>) -> anyhow::Result<Self> {
        debug!("Starting registration service with configuration: {:#?}", config);

        let pool = match pool {
            Some(pool) => pool,
            None => {
                let pool = PgPoolOptions::new()
                    .max_connections(config.database.max_connections)
                    .min_connections(config.database.min_connections)
                    .connect(&config.database.url)
                    .await
                    .context("failed to connect to PostgreSQL")?;

                migrator().run(&pool).await.context("failed to run migrations")?;
                pool
            }
        };

        let state = AppState {
            db: pool.clone(),
            config: config.clone(),
        };
        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Registration service listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}
