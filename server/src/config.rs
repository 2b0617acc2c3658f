//! Configuration management via environment variables
//!
//! All runtime configuration is resolved once at startup into a
//! [`ServerConfig`] value that is passed to the components that need it.

use std::io::{self, Error, ErrorKind};
use std::path::PathBuf;

/// Default data directory name (under the home directory)
const DEFAULT_DATA_DIR: &str = ".notes-app";
/// Default listen port
const DEFAULT_PORT: u16 = 8080;

/// Server configuration resolved from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen host (default: "0.0.0.0")
    pub host: String,
    /// Listen port (default: 8080)
    pub port: u16,
    /// Database URL (default: "sqlite:<data dir>/notes.db")
    pub database_url: String,
    /// Data directory for uploads, logs, and the JWT secret file
    pub data_dir: PathBuf,
}

impl ServerConfig {
    /// Build the configuration from environment variables
    ///
    /// # Environment Variables
    /// * `NOTES_HOST` - listen host
    /// * `NOTES_PORT` - listen port
    /// * `NOTES_DATABASE_URL` - sqlite connection string
    /// * `NOTES_DATA_DIR` - base directory for local state
    ///
    /// # Returns
    /// * `Ok(ServerConfig)` - resolved configuration
    /// * `Err(io::Error)` - home directory could not be resolved
    pub fn from_env() -> io::Result<Self> {
        let data_dir = data_dir()?;

        let host = std::env::var("NOTES_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("NOTES_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let database_url = std::env::var("NOTES_DATABASE_URL")
            .unwrap_or_else(|_| format!("sqlite:{}/notes.db", data_dir.display()));

        Ok(Self {
            host,
            port,
            database_url,
            data_dir,
        })
    }

    /// Address string suitable for `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Directory where uploaded avatar images are stored
    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }
}

/// Resolve the data directory
///
/// `NOTES_DATA_DIR` if set, otherwise `~/.notes-app`.
pub fn data_dir() -> io::Result<PathBuf> {
    if let Ok(dir) = std::env::var("NOTES_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }

    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| Error::new(ErrorKind::NotFound, "Failed to resolve home directory"))?;

    Ok(PathBuf::from(home).join(DEFAULT_DATA_DIR))
}
