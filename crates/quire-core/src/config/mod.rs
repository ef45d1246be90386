use anyhow::Result;
use config::{Config, ConfigBuilder, builder::DefaultState};
use serde::Deserialize;

use crate::constants::{DAV_ROUTE_PREFIX, DEFAULT_PROXY_USER_HEADER, OFFICE_USER_AGENT_MARKER};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub dav: DavConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Every request runs anonymously.
    Anonymous,
    /// Every request runs as the configured user.
    SingleUser,
    /// The upstream proxy names the user in a request header.
    Proxy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    pub proxy: Option<ProxyAuthConfig>,
    pub single_user: Option<SingleUserAuthConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProxyAuthConfig {
    pub header: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SingleUserAuthConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DavConfig {
    /// Public path every `WebDAV` resource lives under.
    pub mount_prefix: String,
    /// Case-insensitive `User-Agent` fragment identifying Microsoft Office.
    pub office_user_agent_marker: String,
}

impl DavConfig {
    /// ## Summary
    /// Returns the mount prefix without a trailing slash (the root stays `/`).
    #[must_use]
    pub fn normalized_prefix(&self) -> &str {
        let trimmed = self.mount_prefix.trim_end_matches('/');
        if trimmed.is_empty() { "/" } else { trimmed }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

fn with_defaults(builder: ConfigBuilder<DefaultState>) -> Result<ConfigBuilder<DefaultState>> {
    Ok(builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8698)?
        .set_default("dav.mount_prefix", DAV_ROUTE_PREFIX)?
        .set_default("dav.office_user_agent_marker", OFFICE_USER_AGENT_MARKER)?
        .set_default("auth.method", "anonymous")?
        .set_default("auth.proxy.header", DEFAULT_PROXY_USER_HEADER)?
        .set_default("logging.level", "debug")?)
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables (`SECTION__KEY`) and an optional
    /// `config.toml`.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(with_defaults(Config::builder())?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env overrides
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Builds settings from the built-in defaults only, ignoring the environment.
    ///
    /// ## Errors
    /// Returns an error if the default table fails to deserialize.
    pub fn defaults() -> Result<Self> {
        Ok(with_defaults(Config::builder())?
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "No .env file loaded");
    }

    Settings::load()
}
