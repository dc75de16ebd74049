use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local use.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// CSV file holding the opportunity table (default: `opportunities.csv`).
    pub data_file: PathBuf,
    /// Prefix of generated opportunity ids (default: `OP-2026`).
    pub id_prefix: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default             |
    /// |------------------------|---------------------|
    /// | `HOST`                 | `0.0.0.0`           |
    /// | `PORT`                 | `3000`              |
    /// | `DATA_FILE`            | `opportunities.csv` |
    /// | `ID_PREFIX`            | `OP-2026`           |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let data_file = std::env::var("DATA_FILE")
            .unwrap_or_else(|_| "opportunities.csv".into())
            .into();

        let id_prefix = std::env::var("ID_PREFIX")
            .map(|p| p.trim().to_string())
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "OP-2026".into());

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            data_file,
            id_prefix,
            request_timeout_secs,
        }
    }
}
