//! # Spotify Integration Module
//!
//! Everything spotcon asks of Spotify goes through the [`Gateway`] trait.
//! The production implementation, [`SpotifyClient`], talks to the Web API
//! over HTTPS with `reqwest` and keeps its OAuth token fresh through the
//! [`TokenManager`](crate::management::TokenManager).
//!
//! ## Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE login, code exchange and token refresh
//! - [`player`] - `/me/player/*` endpoints (playback control, devices, state)
//! - [`library`] - search and the user's saved library
//!
//! ## Error mapping
//!
//! Non-success responses are decoded from the Web API error body. A 404 with
//! reason `NO_ACTIVE_DEVICE` becomes [`CliError::NoActiveDevice`]; every
//! other failure becomes [`CliError::Gateway`] carrying the status and the
//! API's message. Nothing is retried.

pub mod auth;
mod client;
pub mod library;
pub mod player;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};

pub use client::SpotifyClient;

use crate::{
    CliError, Res,
    types::{
        ApiErrorResponse, CurrentlyPlaying, Device, Item, Kind, PlaybackReference, PlayerState,
        RepeatMode, SearchResults, User,
    },
};

/// Remote playback and catalogue operations.
///
/// Every call is a single request/response round trip; the command loop
/// issues at most one at a time.
///
/// # Errors
///
/// Unless noted otherwise every method can fail with:
///
/// - [`CliError::NoActiveDevice`] when the player has nowhere to act
/// - [`CliError::Gateway`] for any other rejected request
/// - [`CliError::Http`] when Spotify cannot be reached
#[async_trait]
pub trait Gateway: Send {
    /// The signed-in user, used for the greeting.
    ///
    /// # Errors
    ///
    /// [`CliError::Gateway`] with status 401 when the session was rejected.
    async fn current_user(&mut self) -> Res<User>;

    /// Resumes playback, or starts `reference` when given.
    ///
    /// # Arguments
    ///
    /// * `device_id` - Target device; `None` means the active one
    /// * `reference` - What to play; `None` resumes where playback stopped
    ///
    /// # Errors
    ///
    /// [`CliError::NoActiveDevice`] when no device is given and none is active.
    async fn play(
        &mut self,
        device_id: Option<&str>,
        reference: Option<&PlaybackReference>,
    ) -> Res<()>;

    /// Pausing while already paused is not an error.
    async fn pause(&mut self) -> Res<()>;

    async fn next(&mut self) -> Res<()>;

    async fn previous(&mut self) -> Res<()>;

    /// Jumps to an absolute position in the current track.
    async fn seek(&mut self, position_ms: u64) -> Res<()>;

    /// `percent` is already clamped to 0..=100 by the caller.
    async fn set_volume(&mut self, percent: u32) -> Res<()>;

    async fn set_shuffle(&mut self, state: bool) -> Res<()>;

    async fn set_repeat(&mut self, mode: RepeatMode) -> Res<()>;

    async fn devices(&mut self) -> Res<Vec<Device>>;

    /// Moves playback to `device_id`, starting it when `play` is set.
    async fn transfer_playback(&mut self, device_id: &str, play: bool) -> Res<()>;

    /// `None` when nothing is playing on any device.
    async fn player_state(&mut self) -> Res<Option<PlayerState>>;

    /// `None` when nothing is playing on any device.
    async fn currently_playing(&mut self) -> Res<Option<CurrentlyPlaying>>;

    /// Searches the catalogue.
    ///
    /// # Arguments
    ///
    /// * `query` - Free text, sent as is
    /// * `kinds` - Kinds to search; lists for other kinds come back empty
    /// * `limit` - Maximum results per kind
    ///
    /// # Errors
    ///
    /// [`CliError::Gateway`] for a rejected query, [`CliError::Http`] when
    /// Spotify cannot be reached.
    async fn search(&mut self, query: &str, kinds: &[Kind], limit: u32) -> Res<SearchResults>;

    /// The first page (50 entries) of the user's saved items of `kind`, in
    /// the order the API returns them.
    async fn saved_items(&mut self, kind: Kind) -> Res<Vec<Item>>;
}

/// Turns a non-success response into the matching [`CliError`].
pub async fn check(response: Response) -> Res<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(classify_error(status, &body))
}

pub fn classify_error(status: StatusCode, body: &str) -> CliError {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(res) if res.error.reason.as_deref() == Some("NO_ACTIVE_DEVICE") => {
            CliError::NoActiveDevice
        }
        Ok(res) => CliError::Gateway {
            status: status.as_u16(),
            message: res.error.message,
        },
        Err(_) => CliError::Gateway {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string(),
        },
    }
}
