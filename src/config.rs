//! Configuration management for spotcon.
//!
//! Configuration values come from environment variables, optionally seeded
//! from a `.env` file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (everything except the client ID has one)

use std::{env, path::PathBuf};

use crate::{CliError, Res};

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080/callback";
const DEFAULT_SCOPE: &str = "user-read-private user-read-playback-state user-modify-playback-state user-library-read user-follow-read playlist-read-private";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Returns the directory spotcon keeps its files in.
///
/// - Linux: `~/.local/share/spotcon`
/// - macOS: `~/Library/Application Support/spotcon`
/// - Windows: `%LOCALAPPDATA%/spotcon`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotcon");
    path
}

/// Loads environment variables from `spotcon/.env` in the local data
/// directory.
///
/// Creates the directory if needed. A missing `.env` file is reported as an
/// error so the caller can warn about it, but variables exported in the
/// shell keep working without one.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Address the OAuth callback server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Client ID of the registered Spotify application
/// (`SPOTIFY_API_AUTH_CLIENT_ID`).
///
/// # Errors
///
/// Returns [`CliError::Config`] when the variable is unset or empty; there is
/// no sensible default for it.
pub fn spotify_client_id() -> Res<String> {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| CliError::Config("SPOTIFY_API_AUTH_CLIENT_ID must be set".to_string()))
}

/// Callback URL registered for the application (`SPOTIFY_API_REDIRECT_URI`).
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Space separated OAuth scopes (`SPOTIFY_API_AUTH_SCOPE`).
pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

/// Authorization endpoint (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Token exchange endpoint (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}
