//! HTTP server settings and the configuration object built from them.

use std::net::SocketAddr;

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use open_tracker::inbound::http::state::HttpState;

/// Listen address used when `TRACKER_BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Pool size used when `TRACKER_DB_MAX_CONNECTIONS` is unset.
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Raw server settings (`TRACKER_*` environment variables or config file).
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRACKER")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

/// Reasons [`ServerSettings`] cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServerSettingsError {
    #[error("TRACKER_DATABASE_URL or DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("invalid bind address '{value}': {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("TRACKER_DB_MAX_CONNECTIONS must be at least 1")]
    EmptyPool,
}

impl ServerSettings {
    /// Parsed listen address, defaulting to [`DEFAULT_BIND_ADDR`].
    pub fn bind_addr(&self) -> Result<SocketAddr, ServerSettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|err: std::net::AddrParseError| ServerSettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }

    /// Connection string, falling back to the conventional `DATABASE_URL`.
    pub fn database_url<E: Env>(&self, env: &E) -> Result<String, ServerSettingsError> {
        self.database_url
            .clone()
            .or_else(|| env.string(DATABASE_URL_ENV))
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty())
            .ok_or(ServerSettingsError::MissingDatabaseUrl)
    }

    pub fn db_max_connections(&self) -> Result<u32, ServerSettingsError> {
        match self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS) {
            0 => Err(ServerSettingsError::EmptyPool),
            size => Ok(size),
        }
    }
}

/// Everything `create_server` needs: where to listen and the handler ports.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: HttpState,
}

impl ServerConfig {
    /// Fixture-backed configuration; swap in real ports with
    /// [`Self::with_http_state`].
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            http_state: HttpState::default(),
        }
    }

    #[must_use]
    pub fn with_http_state(mut self, http_state: HttpState) -> Self {
        self.http_state = http_state;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Read by configuration tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::ffi::OsString;

    use mockable::MockEnv;
    use rstest::rstest;

    use super::*;

    fn mock_env(vars: HashMap<String, String>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    fn settings(database_url: Option<&str>) -> ServerSettings {
        ServerSettings {
            bind_addr: None,
            database_url: database_url.map(str::to_owned),
            db_max_connections: None,
        }
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let settings = settings(None);

        assert_eq!(
            settings.bind_addr().expect("default parses"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("constant parses")
        );
        assert_eq!(
            settings.db_max_connections().expect("default size"),
            DEFAULT_DB_MAX_CONNECTIONS
        );
    }

    #[rstest]
    fn invalid_bind_addr_is_reported() {
        let settings = ServerSettings {
            bind_addr: Some("localhost".to_owned()),
            ..settings(None)
        };

        let err = settings.bind_addr().expect_err("not a socket address");

        assert!(matches!(err, ServerSettingsError::InvalidBindAddr { .. }));
    }

    #[rstest]
    fn zero_sized_pool_is_rejected() {
        let settings = ServerSettings {
            db_max_connections: Some(0),
            ..settings(None)
        };

        assert_eq!(
            settings.db_max_connections(),
            Err(ServerSettingsError::EmptyPool)
        );
    }

    #[rstest]
    #[case(
        Some("postgres://own@db/tracker"),
        Some("postgres://env@db/tracker"),
        Ok("postgres://own@db/tracker")
    )]
    #[case(None, Some("postgres://env@db/tracker"), Ok("postgres://env@db/tracker"))]
    #[case(None, None, Err(ServerSettingsError::MissingDatabaseUrl))]
    #[case(Some("   "), None, Err(ServerSettingsError::MissingDatabaseUrl))]
    fn database_url_prefers_own_setting(
        #[case] own: Option<&str>,
        #[case] fallback: Option<&str>,
        #[case] expected: Result<&str, ServerSettingsError>,
    ) {
        let mut vars = HashMap::new();
        if let Some(url) = fallback {
            vars.insert(DATABASE_URL_ENV.to_owned(), url.to_owned());
        }
        let env = mock_env(vars);

        let resolved = settings(own).database_url(&env);

        assert_eq!(resolved, expected.map(str::to_owned));
    }

    #[rstest]
    fn settings_load_from_prefixed_environment() {
        let _guard = env_lock::lock_env([
            ("TRACKER_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "TRACKER_DATABASE_URL",
                Some("postgres://tracker@db/tracker".to_owned()),
            ),
            ("TRACKER_DB_MAX_CONNECTIONS", Some("4".to_owned())),
        ]);

        let settings = ServerSettings::load_from_iter([OsString::from("open-tracker")])
            .expect("settings load");

        assert_eq!(settings.bind_addr.as_deref(), Some("127.0.0.1:9000"));
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://tracker@db/tracker")
        );
        assert_eq!(settings.db_max_connections, Some(4));
    }

    #[rstest]
    fn server_config_keeps_bind_addr() {
        let addr: SocketAddr = "127.0.0.1:0".parse().expect("socket address");

        assert_eq!(ServerConfig::new(addr).bind_addr(), addr);
    }
}
