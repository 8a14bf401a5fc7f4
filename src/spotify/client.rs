use async_trait::async_trait;
use reqwest::Client;

use crate::{
    Res,
    management::TokenManager,
    spotify::{Gateway, library, player},
    types::{
        CurrentlyPlaying, Device, Item, Kind, PlayRequest, PlaybackReference, PlayerState,
        RepeatMode, SearchResults, User,
    },
};

/// [`Gateway`] backed by the Spotify Web API.
pub struct SpotifyClient {
    http: Client,
    tokens: TokenManager,
}

impl SpotifyClient {
    pub fn new(tokens: TokenManager) -> Self {
        Self {
            http: Client::new(),
            tokens,
        }
    }

    async fn token(&mut self) -> Res<String> {
        self.tokens.get_valid_token().await
    }
}

#[async_trait]
impl Gateway for SpotifyClient {
    async fn current_user(&mut self) -> Res<User> {
        let token = self.token().await?;
        library::me(&self.http, &token).await
    }

    async fn play(
        &mut self,
        device_id: Option<&str>,
        reference: Option<&PlaybackReference>,
    ) -> Res<()> {
        let token = self.token().await?;
        let request = reference
            .map(|r| r.to_play_request())
            .unwrap_or_else(PlayRequest::default);
        player::play(&self.http, &token, device_id, &request).await
    }

    async fn pause(&mut self) -> Res<()> {
        let token = self.token().await?;
        player::pause(&self.http, &token).await
    }

    async fn next(&mut self) -> Res<()> {
        let token = self.token().await?;
        player::next(&self.http, &token).await
    }

    async fn previous(&mut self) -> Res<()> {
        let token = self.token().await?;
        player::previous(&self.http, &token).await
    }

    async fn seek(&mut self, position_ms: u64) -> Res<()> {
        let token = self.token().await?;
        player::seek(&self.http, &token, position_ms).await
    }

    async fn set_volume(&mut self, percent: u32) -> Res<()> {
        let token = self.token().await?;
        player::volume(&self.http, &token, percent).await
    }

    async fn set_shuffle(&mut self, state: bool) -> Res<()> {
        let token = self.token().await?;
        player::shuffle(&self.http, &token, state).await
    }

    async fn set_repeat(&mut self, mode: RepeatMode) -> Res<()> {
        let token = self.token().await?;
        player::repeat(&self.http, &token, mode.as_wire()).await
    }

    async fn devices(&mut self) -> Res<Vec<Device>> {
        let token = self.token().await?;
        player::devices(&self.http, &token).await
    }

    async fn transfer_playback(&mut self, device_id: &str, play: bool) -> Res<()> {
        let token = self.token().await?;
        player::transfer(&self.http, &token, device_id, play).await
    }

    async fn player_state(&mut self) -> Res<Option<PlayerState>> {
        let token = self.token().await?;
        player::state(&self.http, &token).await
    }

    async fn currently_playing(&mut self) -> Res<Option<CurrentlyPlaying>> {
        let token = self.token().await?;
        player::currently_playing(&self.http, &token).await
    }

    async fn search(&mut self, query: &str, kinds: &[Kind], limit: u32) -> Res<SearchResults> {
        let token = self.token().await?;
        library::search(&self.http, &token, query, kinds, limit).await
    }

    async fn saved_items(&mut self, kind: Kind) -> Res<Vec<Item>> {
        let token = self.token().await?;
        library::saved_items(&self.http, &token, kind).await
    }
}
