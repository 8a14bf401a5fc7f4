use std::path::PathBuf;

use chrono::Utc;

use crate::{CliError, Res, config, spotify, types::Token};

/// Seconds before expiry at which a token is refreshed.
const REFRESH_MARGIN_SECS: u64 = 240;

/// Owns the OAuth token and keeps it fresh and persisted.
pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager {
            token,
            path: Self::token_path(),
        }
    }

    /// Stores the token somewhere other than the default location.
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = path;
        self
    }

    pub async fn load() -> Res<Self> {
        Self::load_from(Self::token_path()).await
    }

    pub async fn load_from(path: PathBuf) -> Res<Self> {
        let content = async_fs::read_to_string(&path).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self { token, path })
    }

    pub async fn persist(&self) -> Res<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Returns an access token that is valid for at least a few more
    /// minutes, refreshing and persisting it first when needed.
    pub async fn get_valid_token(&mut self) -> Res<String> {
        if self.is_expired_at(Utc::now().timestamp() as u64) {
            let mut new_token = spotify::auth::refresh_token(&self.token.refresh_token)
                .await
                .map_err(CliError::Auth)?;
            // Spotify only sometimes rotates the refresh token.
            if new_token.refresh_token.is_empty() {
                new_token.refresh_token = self.token.refresh_token.clone();
            }
            self.token = new_token;
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired_at(&self, now: u64) -> bool {
        let expires_at = self.token.obtained_at + self.token.expires_in;
        now >= expires_at.saturating_sub(REFRESH_MARGIN_SECS)
    }

    fn token_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/token.json");
        path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
