//! Catalog API base URL resolution
//!
//! Priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file (`api_url` key)
//! 4. Compiled default (fallback)

use std::path::PathBuf;

/// Environment variable consulted when no CLI argument is given
pub const API_URL_ENV: &str = "TUNE_TRACKER_API_URL";

/// Fallback endpoint for local development
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Resolve the catalog API base URL following the priority order above.
///
/// Never fails: with nothing configured the local default is used.
pub fn resolve_api_url(cli_arg: Option<&str>) -> String {
    let env_val = std::env::var(API_URL_ENV).ok();
    let file_val = config_file_url();

    resolve_from(cli_arg, env_val.as_deref(), file_val.as_deref())
}

fn resolve_from(cli: Option<&str>, env: Option<&str>, file: Option<&str>) -> String {
    if let Some(url) = cli {
        tracing::debug!(url = %url, "API URL from command line");
        return normalize(url);
    }

    if let Some(url) = env {
        tracing::debug!(url = %url, "API URL from environment");
        return normalize(url);
    }

    if let Some(url) = file {
        tracing::debug!(url = %url, "API URL from config file");
        return normalize(url);
    }

    tracing::debug!(url = %DEFAULT_API_URL, "API URL defaulted");
    DEFAULT_API_URL.to_string()
}

/// Strip trailing slashes so paths can be appended verbatim
fn normalize(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Read `api_url` from the platform config file, if one exists
fn config_file_url() -> Option<String> {
    let path = config_file_path()?;
    let content = std::fs::read_to_string(&path).ok()?;

    match toml::from_str::<toml::Value>(&content) {
        Ok(value) => value
            .get("api_url")
            .and_then(|v| v.as_str())
            .map(String::from),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed config file");
            None
        }
    }
}

/// Platform config file location, e.g. `~/.config/tune-tracker/config.toml`
fn config_file_path() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("tune-tracker").join("config.toml");
    path.exists().then_some(path)
}
