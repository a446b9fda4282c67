//! Runtime configuration.
//!
//! Settings are resolved, highest priority first, from command-line flags,
//! process environment, a `.env` file in the working directory (loaded by
//! `main` through `dotenv`), and finally built-in defaults.
//!
//! | Setting | Environment | Default |
//! |---|---|---|
//! | store location | `TASKTRACK_DB` | `tasks.db` |
//! | listen host | `HOST` | `0.0.0.0` |
//! | listen port | `PORT` (read by `serve` only) | `5000` |

use crate::db::db::DB_FILE_NAME;
use crate::libs::messages::Message;
use crate::msg_bail_anyhow;
use anyhow::Result;
use std::env;
use std::path::PathBuf;

pub const DB_ENV_VAR: &str = "TASKTRACK_DB";
pub const HOST_ENV_VAR: &str = "HOST";
pub const PORT_ENV_VAR: &str = "PORT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite file holding the task table
    pub db_path: PathBuf,
    /// Address the web server binds to
    pub host: String,
    /// Port the web server listens on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: PathBuf::from(DB_FILE_NAME),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Reads the store location and listen host from the environment on
    /// top of the defaults. `PORT` is left alone; only `serve` needs it.
    pub fn read() -> Config {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::read`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = lookup(DB_ENV_VAR).filter(|p| !p.trim().is_empty()) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(host) = lookup(HOST_ENV_VAR).filter(|h| !h.trim().is_empty()) {
            config.host = host;
        }

        config
    }

    /// Applies `PORT` from the environment. Fails when it is set to
    /// something that is not a port number.
    pub fn read_port(self) -> Result<Config> {
        self.port_from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::read_port`] with a custom variable source.
    pub fn port_from_lookup<F>(mut self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(PORT_ENV_VAR).filter(|p| !p.trim().is_empty()) {
            match port.trim().parse() {
                Ok(port) => self.port = port,
                Err(_) => msg_bail_anyhow!(Message::InvalidPort(port)),
            }
        }

        Ok(self)
    }

    /// Applies explicit command-line overrides.
    pub fn with_overrides(mut self, db_path: Option<PathBuf>, host: Option<String>, port: Option<u16>) -> Config {
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
