use std::path::PathBuf;

/// Admin token used when `ADMIN_TOKEN` is not set. Good enough for
/// local development only.
const DEFAULT_ADMIN_TOKEN: &str = "ammapro";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Path of the persisted event document.
    pub data_file: PathBuf,
    /// Directory for uploaded images, served under `/uploads`.
    pub uploads_dir: PathBuf,
    /// Directory of site images, served under `/img`.
    pub img_dir: PathBuf,
    /// Bearer token guarding the `/api/admin` routes.
    pub admin_token: String,
    /// Upstream Intickets feed URL; the proxy returns 503 when unset.
    pub intickets_events_url: Option<String>,
    /// Bearer token forwarded to the Intickets feed.
    pub intickets_token: Option<String>,
    /// Upstream request timeout in seconds (default: `10`).
    pub intickets_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                   |
    /// |--------------------------|---------------------------|
    /// | `HOST`                   | `0.0.0.0`                 |
    /// | `PORT`                   | `3000`                    |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`   |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                      |
    /// | `DATA_FILE`              | `baza_afisha.json`        |
    /// | `UPLOADS_DIR`            | `uploads`                 |
    /// | `IMG_DIR`                | `img`                     |
    /// | `ADMIN_TOKEN`            | `ammapro` (with warning)  |
    /// | `INTICKETS_EVENTS_URL`   | unset                     |
    /// | `INTICKETS_TOKEN`        | unset (`INTICKETS_API_KEY` also accepted) |
    /// | `INTICKETS_TIMEOUT_SECS` | `10`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let data_file =
            PathBuf::from(std::env::var("DATA_FILE").unwrap_or_else(|_| "baza_afisha.json".into()));
        let uploads_dir =
            PathBuf::from(std::env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".into()));
        let img_dir = PathBuf::from(std::env::var("IMG_DIR").unwrap_or_else(|_| "img".into()));

        let admin_token = match std::env::var("ADMIN_TOKEN") {
            Ok(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ => {
                tracing::warn!(
                    "ADMIN_TOKEN is not set; using the default development admin token"
                );
                DEFAULT_ADMIN_TOKEN.to_string()
            }
        };

        let intickets_events_url = non_empty_var("INTICKETS_EVENTS_URL");
        let intickets_token =
            non_empty_var("INTICKETS_TOKEN").or_else(|| non_empty_var("INTICKETS_API_KEY"));

        let intickets_timeout_secs: u64 = std::env::var("INTICKETS_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("INTICKETS_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            data_file,
            uploads_dir,
            img_dir,
            admin_token,
            intickets_events_url,
            intickets_token,
            intickets_timeout_secs,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
