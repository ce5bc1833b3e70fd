use serde::Deserialize;

use emporium_core::config::Config;

/// Store service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3110). Env var: `STORE_PORT`.
    #[serde(default = "default_store_port")]
    pub store_port: u16,
    /// Shared secret for signing and validating access tokens.
    /// Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// Endpoint of the payment session upstream.
    /// Env var: `PAYMENT_SESSION_URL`.
    pub payment_session_url: String,
}

fn default_store_port() -> u16 {
    3110
}

impl Config for StoreConfig {}
