//! Service entry-point: loads configuration, prepares the database and the
//! mail relay, then serves the tracking endpoints.

mod server;

use std::ffi::OsString;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use open_tracker::domain::{EmailLogQueryService, OpenTrackingService, TrackedEmailService};
use open_tracker::inbound::http::health::HealthState;
use open_tracker::inbound::http::state::HttpState;
use open_tracker::outbound::mail::{MailerConfig, MailerSettings, SmtpMailTransport};
use open_tracker::outbound::persistence::{
    DbPool, DieselEmailLogRepository, PoolConfig, run_pending_migrations,
};
use server::{ServerConfig, ServerSettings, create_server};

const PROGRAM_NAME: &str = "open-tracker";
const DB_CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::other(format!("{context}: {err}"))
}

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

    let server_settings = ServerSettings::load_from_iter([OsString::from(PROGRAM_NAME)])
        .map_err(|err| startup_error("failed to load server settings", err))?;
    let mailer_settings = MailerSettings::load_from_iter([OsString::from(PROGRAM_NAME)])
        .map_err(|err| startup_error("failed to load mailer settings", err))?;

    let mailer_config = MailerConfig::try_from(mailer_settings)
        .map_err(|err| startup_error("invalid mailer configuration", err))?;
    let bind_addr = server_settings
        .bind_addr()
        .map_err(|err| startup_error("invalid server configuration", err))?;
    let database_url = server_settings
        .database_url(&DefaultEnv::new())
        .map_err(|err| startup_error("invalid server configuration", err))?;
    let max_connections = server_settings
        .db_max_connections()
        .map_err(|err| startup_error("invalid server configuration", err))?;

    let applied = run_pending_migrations(&database_url)
        .await
        .map_err(|err| startup_error("database migration failed", err))?;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(
        PoolConfig::new(database_url)
            .with_max_size(max_connections)
            .with_connection_timeout(DB_CONNECTION_TIMEOUT),
    )
    .await
    .map_err(|err| startup_error("database pool unavailable", err))?;

    let transport = SmtpMailTransport::new(&mailer_config)
        .map_err(|err| startup_error("mail relay unavailable", err))?;
    info!(
        host = mailer_config.host(),
        port = mailer_config.port(),
        sender = %mailer_config.sender(),
        "mail relay configured"
    );

    let repository = Arc::new(DieselEmailLogRepository::new(pool));
    let clock = Arc::new(DefaultClock);
    let http_state = HttpState::new(
        Arc::new(TrackedEmailService::new(
            repository.clone(),
            Arc::new(transport),
            clock.clone(),
        )),
        Arc::new(OpenTrackingService::new(repository.clone(), clock)),
        Arc::new(EmailLogQueryService::new(repository)),
    );

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr).with_http_state(http_state);
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
