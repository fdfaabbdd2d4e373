//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` and from `WAYFARE__`-prefixed environment
//! variables, e.g. `WAYFARE__SERVER__PORT=8080`.
//!
//! See `settings.toml` for an example.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub database: Database,
    pub bind: Option<String>,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Option<Server>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_file("settings")
    }

    fn from_file(name: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .add_source(File::with_name(name).required(false))
            .add_source(Environment::with_prefix("WAYFARE").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
