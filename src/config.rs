//! Command-line and environment configuration.
//!
//! Values given on the command line win over environment variables, which
//! win over the defaults. A `.env` file in the working directory is loaded
//! into the environment at startup.

use std::path::PathBuf;

use clap::Args;

use crate::client::DEFAULT_URL;
use crate::db::Database;

pub const DEFAULT_PORT: u16 = 8002;

/// Settings for `serve`.
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Port for the HTTP API
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// SQLite file holding the notes (defaults to the platform data directory)
    #[arg(long, env = "NOTES_DATABASE")]
    pub database: Option<PathBuf>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Open and migrate the configured database.
    pub fn open_database(&self) -> anyhow::Result<Database> {
        let db = match &self.database {
            Some(path) => Database::open(path.clone())?,
            None => Database::open_default()?,
        };
        db.migrate()?;
        Ok(db)
    }
}

/// Settings for the client commands.
#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
    /// Base URL of the notes API
    #[arg(long, env = "NOTES_API_URL", default_value = DEFAULT_URL, global = true)]
    pub url: String,
}
