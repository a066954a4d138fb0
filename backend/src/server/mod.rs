//! Server wiring: adapter selection, route registration, and startup.
//!
//! `DATABASE_URL` decides the persistence adapter set at startup: present
//! means Diesel over PostgreSQL (with embedded migrations applied first),
//! absent means the in-memory store in degraded mode. Either way the same
//! domain services sit behind the same `HttpState`, so the HTTP surface is
//! identical.

pub mod config;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;

use crate::domain::{NotificationService, PartnerAccountService, ProposalService};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{accounts, notifications, proposals, users};
use crate::outbound::persistence::{
    DbPool, DieselNotificationRepository, DieselProposalRepository, DieselUserRepository,
    MemoryStore, PoolConfig,
};
use crate::outbound::security::Argon2PasswordHasher;

pub use config::ServerConfig;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failures during server bootstrap, before any request is served.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// The database could not be reached for migrations.
    #[error("database connection failed: {message}")]
    Connect { message: String },
    /// Applying embedded migrations failed.
    #[error("migrations failed: {message}")]
    Migration { message: String },
    /// The connection pool could not be built.
    #[error(transparent)]
    Pool(#[from] crate::outbound::persistence::PoolError),
}

fn run_migrations(database_url: &str) -> Result<(), BootstrapError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| BootstrapError::Connect {
        message: err.to_string(),
    })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| BootstrapError::Migration {
            message: err.to_string(),
        })?;
    info!(count = applied.len(), "migrations applied");
    Ok(())
}

/// Build the handler state for the configured persistence backend.
pub async fn build_state(config: &ServerConfig) -> Result<HttpState, BootstrapError> {
    match &config.database_url {
        Some(url) => {
            run_migrations(url)?;
            let pool = DbPool::new(PoolConfig::new(url.clone())).await?;
            let user_repo = Arc::new(DieselUserRepository::new(pool.clone()));
            let proposal_repo = Arc::new(DieselProposalRepository::new(pool.clone()));
            let notification_repo = Arc::new(DieselNotificationRepository::new(pool));

            let accounts = Arc::new(PartnerAccountService::new(
                Arc::clone(&user_repo),
                Arc::new(Argon2PasswordHasher),
            ));
            let proposals = Arc::new(ProposalService::new(proposal_repo, user_repo));
            let notifications = Arc::new(NotificationService::new(notification_repo));
            Ok(HttpState {
                accounts,
                proposal_commands: Arc::clone(&proposals) as Arc<dyn crate::domain::ports::ProposalCommand>,
                proposal_queries: proposals,
                notification_queries: Arc::clone(&notifications) as Arc<dyn crate::domain::ports::NotificationQuery>,
                notification_commands: notifications,
            })
        }
        None => {
            warn!("DATABASE_URL is not set; using the in-memory store, data will not survive a restart");
            let store = MemoryStore::new();
            let repo = Arc::new(store);
            let accounts = Arc::new(PartnerAccountService::new(
                Arc::clone(&repo),
                Arc::new(Argon2PasswordHasher),
            ));
            let proposals = Arc::new(ProposalService::new(Arc::clone(&repo), Arc::clone(&repo)));
            let notifications = Arc::new(NotificationService::new(repo));
            Ok(HttpState {
                accounts,
                proposal_commands: Arc::clone(&proposals) as Arc<dyn crate::domain::ports::ProposalCommand>,
                proposal_queries: proposals,
                notification_queries: Arc::clone(&notifications) as Arc<dyn crate::domain::ports::NotificationQuery>,
                notification_commands: notifications,
            })
        }
    }
}

/// Register every versioned API route on a scope.
pub fn api_scope() -> actix_web::Scope {
    web::scope("/api/v1")
        .service(accounts::register)
        .service(accounts::login)
        .service(proposals::create_proposal)
        .service(proposals::list_proposals)
        .service(proposals::get_proposal)
        .service(proposals::update_proposal_status)
        .service(users::owner_proposals)
        .service(users::dashboard_stats)
        .service(notifications::list_notifications)
        .service(notifications::mark_notification_read)
}

#[cfg(debug_assertions)]
async fn openapi_json() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(crate::doc::ApiDoc::openapi())
}

/// Bind and run the HTTP server until shutdown.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let state = build_state(&config)
        .await
        .map_err(std::io::Error::other)?;
    let state = web::Data::new(state);

    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        // The partner dashboard is served from arbitrary origins.
        let cors = Cors::permissive();
        let app = App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .wrap(cors)
            .service(api_scope())
            .service(ready)
            .service(live);
        #[cfg(debug_assertions)]
        let app = app.route("/api-docs/openapi.json", web::get().to(openapi_json));
        app
    })
    .bind(config.bind_addr.as_str())?;

    info!(bind_addr = %config.bind_addr, "server listening");
    health_state.mark_ready();
    server.run().await
}
