//! Application configuration management.
//!
//! All runtime settings come from environment variables. Sensitive fields are
//! marked and must be provided through a secret management system in
//! production rather than plain process environment files.

use envconfig::Envconfig;
use std::sync::LazyLock;

#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Database connection string (NON-SENSITIVE)
    /// Example: "sqlite:data/pet_market.db"
    #[envconfig(default = "sqlite:pet_market.db?mode=rwc")]
    pub db_host: String,

    /// SENSITIVE: password used to encrypt the SQLite data file in prod
    #[envconfig(default = "")]
    pub db_pass_encrypt: String,

    /// Host address for web server binding (NON-SENSITIVE)
    #[envconfig(default = "0.0.0.0")]
    pub web_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    /// Common values: 80 (HTTP), 443 (HTTPS), 8080 (dev)
    #[envconfig(default = "8080")]
    pub web_server_port: u16,

    /// Browser origin of the marketplace front end allowed through CORS
    #[envconfig(default = "http://localhost:3000")]
    pub frontend_origin: String,

    /// Path to SSL private key file (SENSITIVE PATH)
    #[envconfig(default = "server.key")]
    pub private_key_path: String,

    /// Path to SSL certificate file (NON-SENSITIVE)
    #[envconfig(default = "server.crt")]
    pub certificate_path: String,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }
}

/// Global application configuration instance.
///
/// Loaded and validated on first access; a missing required variable aborts
/// startup with a descriptive message.
pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(|| {
    AppConfig::init_from_env()
        .expect("Failed to load application configuration. Check environment variables.")
});
