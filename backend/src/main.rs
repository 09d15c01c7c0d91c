//! Server entry-point: loads settings, prepares the database and serves the
//! elective enrollment pages.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use electives::inbound::http::health::HealthState;
use electives::inbound::http::session_config::{BuildMode, session_settings_from_env};
use electives::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use electives::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(io::Error::other)?;
    let database_url = settings.database_url().map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;

    if settings.apply_migrations {
        let applied = run_pending_migrations(database_url)
            .await
            .map_err(io::Error::other)?;
        info!(applied, "database migrations applied");
    }

    let db_pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
    )
    .await
    .map_err(io::Error::other)?;

    let config = ServerConfig::new(session, bind_addr, db_pool)
        .with_bcrypt_cost(settings.bcrypt_cost());
    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting server");
    create_server(health_state, config)?.await
}
