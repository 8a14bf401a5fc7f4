#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;
use spotcon::{
    CliError, Res,
    cli::Session,
    repl::Dispatcher,
    spotify::Gateway,
    types::{
        Album, AlbumRef, Artist, ArtistRef, CurrentlyPlaying, Device, Item, Kind,
        PlaybackReference, PlayerState, Playlist, PlaylistOwner, RepeatMode, SearchResults, Track,
        User,
    },
};

/// One call made against the gateway, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CurrentUser,
    Play {
        device_id: Option<String>,
        reference: Option<PlaybackReference>,
    },
    Pause,
    Next,
    Previous,
    Seek(u64),
    SetVolume(u32),
    SetShuffle(bool),
    SetRepeat(RepeatMode),
    Devices,
    Transfer(String, bool),
    PlayerState,
    CurrentlyPlaying,
    Search {
        query: String,
        kinds: Vec<Kind>,
        limit: u32,
    },
    SavedItems(Kind),
}

/// Gateway that records every call and answers from canned data.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    pub calls: Vec<Call>,
    pub devices: Vec<Device>,
    pub saved: HashMap<Kind, Vec<Item>>,
    pub catalogue: SearchResults,
    pub state: Option<PlayerState>,
    pub playing: Option<CurrentlyPlaying>,
    pub fail_with_no_device: bool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalogue(mut self, catalogue: SearchResults) -> Self {
        self.catalogue = catalogue;
        self
    }

    pub fn with_saved(mut self, kind: Kind, items: Vec<Item>) -> Self {
        self.saved.insert(kind, items);
        self
    }

    pub fn with_state(mut self, state: PlayerState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_devices(mut self, devices: Vec<Device>) -> Self {
        self.devices = devices;
        self
    }

    fn record(&mut self, call: Call) -> Res<()> {
        self.calls.push(call);
        if self.fail_with_no_device {
            return Err(CliError::NoActiveDevice);
        }
        Ok(())
    }

    pub fn count(&self, wanted: &Call) -> usize {
        self.calls.iter().filter(|c| *c == wanted).count()
    }

    pub fn searches(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Search { .. }))
            .count()
    }
}

#[async_trait]
impl Gateway for RecordingGateway {
    async fn current_user(&mut self) -> Res<User> {
        self.record(Call::CurrentUser)?;
        Ok(User {
            id: "tester".to_string(),
            display_name: Some("Test User".to_string()),
        })
    }

    async fn play(
        &mut self,
        device_id: Option<&str>,
        reference: Option<&PlaybackReference>,
    ) -> Res<()> {
        self.record(Call::Play {
            device_id: device_id.map(str::to_string),
            reference: reference.cloned(),
        })
    }

    async fn pause(&mut self) -> Res<()> {
        self.record(Call::Pause)
    }

    async fn next(&mut self) -> Res<()> {
        self.record(Call::Next)
    }

    async fn previous(&mut self) -> Res<()> {
        self.record(Call::Previous)
    }

    async fn seek(&mut self, position_ms: u64) -> Res<()> {
        self.record(Call::Seek(position_ms))
    }

    async fn set_volume(&mut self, percent: u32) -> Res<()> {
        self.record(Call::SetVolume(percent))
    }

    async fn set_shuffle(&mut self, state: bool) -> Res<()> {
        self.record(Call::SetShuffle(state))
    }

    async fn set_repeat(&mut self, mode: RepeatMode) -> Res<()> {
        self.record(Call::SetRepeat(mode))
    }

    async fn devices(&mut self) -> Res<Vec<Device>> {
        self.record(Call::Devices)?;
        Ok(self.devices.clone())
    }

    async fn transfer_playback(&mut self, device_id: &str, play: bool) -> Res<()> {
        self.record(Call::Transfer(device_id.to_string(), play))
    }

    async fn player_state(&mut self) -> Res<Option<PlayerState>> {
        self.record(Call::PlayerState)?;
        Ok(self.state.clone())
    }

    async fn currently_playing(&mut self) -> Res<Option<CurrentlyPlaying>> {
        self.record(Call::CurrentlyPlaying)?;
        Ok(self.playing.clone())
    }

    async fn search(&mut self, query: &str, kinds: &[Kind], limit: u32) -> Res<SearchResults> {
        self.record(Call::Search {
            query: query.to_string(),
            kinds: kinds.to_vec(),
            limit,
        })?;

        let limit = limit as usize;
        let mut results = SearchResults::default();
        if kinds.contains(&Kind::Track) {
            results.tracks = self.catalogue.tracks.iter().take(limit).cloned().collect();
        }
        if kinds.contains(&Kind::Artist) {
            results.artists = self.catalogue.artists.iter().take(limit).cloned().collect();
        }
        if kinds.contains(&Kind::Album) {
            results.albums = self.catalogue.albums.iter().take(limit).cloned().collect();
        }
        if kinds.contains(&Kind::Playlist) {
            results.playlists = self.catalogue.playlists.iter().take(limit).cloned().collect();
        }
        Ok(results)
    }

    async fn saved_items(&mut self, kind: Kind) -> Res<Vec<Item>> {
        self.record(Call::SavedItems(kind))?;
        Ok(self.saved.get(&kind).cloned().unwrap_or_default())
    }
}

pub fn track(name: &str, artist: &str) -> Track {
    Track {
        name: name.to_string(),
        uri: format!("spotify:track:{}", name.to_lowercase().replace(' ', "-")),
        duration_ms: 200_000,
        artists: vec![ArtistRef {
            name: artist.to_string(),
            uri: String::new(),
        }],
        album: Some(AlbumRef {
            name: format!("{} (Single)", name),
            uri: String::new(),
        }),
    }
}

pub fn album(name: &str, artist: &str) -> Album {
    Album {
        name: name.to_string(),
        uri: format!("spotify:album:{}", name.to_lowercase().replace(' ', "-")),
        artists: vec![ArtistRef {
            name: artist.to_string(),
            uri: String::new(),
        }],
    }
}

pub fn artist(name: &str) -> Artist {
    Artist {
        name: name.to_string(),
        uri: format!("spotify:artist:{}", name.to_lowercase().replace(' ', "-")),
    }
}

pub fn playlist(name: &str, owner: &str) -> Playlist {
    Playlist {
        name: name.to_string(),
        uri: format!("spotify:playlist:{}", name.to_lowercase().replace(' ', "-")),
        owner: Some(PlaylistOwner {
            display_name: Some(owner.to_string()),
        }),
    }
}

pub fn device(id: &str, name: &str, active: bool, volume: u32) -> Device {
    Device {
        id: Some(id.to_string()),
        name: name.to_string(),
        device_type: "Computer".to_string(),
        is_active: active,
        volume_percent: Some(volume),
    }
}

/// A device at `volume` playing a 200 second track, 5 seconds in.
pub fn playing_state(volume: u32) -> PlayerState {
    PlayerState {
        device: Some(device("dev-1", "Desk", true, volume)),
        shuffle_state: false,
        repeat_state: RepeatMode::Off,
        progress_ms: Some(5_000),
        is_playing: true,
        item: Some(track("Yellow", "Coldplay")),
    }
}

pub fn catalogue() -> SearchResults {
    SearchResults {
        tracks: vec![
            track("Yesterday", "The Beatles"),
            track("Yesterday Once More", "Carpenters"),
            track("Yesterdays", "Guns N' Roses"),
        ],
        artists: vec![artist("The Beatles")],
        albums: vec![album("Help!", "The Beatles")],
        playlists: vec![playlist("Beatles Best", "spotify")],
    }
}

pub fn dispatcher(gateway: RecordingGateway) -> Dispatcher<RecordingGateway> {
    Dispatcher::new(Session::new(gateway)).expect("built-in commands register")
}
