use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::CliError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub state: String,
    pub token: Option<Token>,
}

/// Response of the token endpoint for both code exchange and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
}

/// The four kinds of things a user can search for and play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Track,
    Album,
    Artist,
    Playlist,
}

impl Kind {
    /// Display order of search result categories.
    pub const ALL: [Kind; 4] = [Kind::Track, Kind::Artist, Kind::Album, Kind::Playlist];

    /// Value of the Web API `type` query parameter.
    pub fn as_api_type(&self) -> &'static str {
        match self {
            Kind::Track => "track",
            Kind::Album => "album",
            Kind::Artist => "artist",
            Kind::Playlist => "playlist",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Kind::Track => "Tracks",
            Kind::Album => "Albums",
            Kind::Artist => "Artists",
            Kind::Playlist => "Playlists",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_type())
    }
}

/// Repeat mode as the user types it. The Web API calls `Playlist` "context".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    Off,
    Track,
    #[serde(rename = "context")]
    Playlist,
}

impl RepeatMode {
    pub fn as_wire(&self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::Track => "track",
            RepeatMode::Playlist => "context",
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RepeatMode::Off => "off",
            RepeatMode::Track => "track",
            RepeatMode::Playlist => "playlist",
        };
        f.write_str(label)
    }
}

impl FromStr for RepeatMode {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" => Ok(RepeatMode::Off),
            "track" => Ok(RepeatMode::Track),
            "playlist" | "context" => Ok(RepeatMode::Playlist),
            other => Err(CliError::InvalidArgument(format!(
                "'{}' is not a repeat mode, use one of: off, track, playlist",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Device {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(default)]
    pub is_active: bool,
    pub volume_percent: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicesResponse {
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtistRef {
    pub name: String,
    #[serde(default)]
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlbumRef {
    pub name: String,
    #[serde(default)]
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    pub album: Option<AlbumRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Album {
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaylistOwner {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Playlist {
    pub name: String,
    pub uri: String,
    pub owner: Option<PlaylistOwner>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
}

impl<T> Default for Paging<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

/// `GET /search`. The API may return `null` entries in the playlist page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<Paging<Track>>,
    pub artists: Option<Paging<Artist>>,
    pub albums: Option<Paging<Album>>,
    pub playlists: Option<Paging<Option<Playlist>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTrack {
    pub track: Track,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAlbum {
    pub album: Album,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowedArtistsResponse {
    pub artists: Paging<Artist>,
}

/// `GET /me/player`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerState {
    pub device: Option<Device>,
    #[serde(default)]
    pub shuffle_state: bool,
    pub repeat_state: RepeatMode,
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub is_playing: bool,
    pub item: Option<Track>,
}

/// `GET /me/player/currently-playing`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentlyPlaying {
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub is_playing: bool,
    pub item: Option<Track>,
}

/// Body of `PUT /me/player/play`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlayRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uris: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_uri: Option<String>,
}

/// Body of `PUT /me/player`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    pub device_ids: Vec<String>,
    pub play: bool,
}

/// Error body of the Web API: `{"error": {"status": 404, "message": "...", "reason": "..."}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub message: String,
    pub reason: Option<String>,
}

/// A search result or saved library entry, tagged with its kind when the
/// response is decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Track(Track),
    Album(Album),
    Artist(Artist),
    Playlist(Playlist),
}

impl Item {
    pub fn kind(&self) -> Kind {
        match self {
            Item::Track(_) => Kind::Track,
            Item::Album(_) => Kind::Album,
            Item::Artist(_) => Kind::Artist,
            Item::Playlist(_) => Kind::Playlist,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Item::Track(t) => &t.name,
            Item::Album(a) => &a.name,
            Item::Artist(a) => &a.name,
            Item::Playlist(p) => &p.name,
        }
    }

    pub fn uri(&self) -> &str {
        match self {
            Item::Track(t) => &t.uri,
            Item::Album(a) => &a.uri,
            Item::Artist(a) => &a.uri,
            Item::Playlist(p) => &p.uri,
        }
    }

    /// Tracks play as a list of URIs, everything else as a context.
    pub fn to_reference(&self) -> PlaybackReference {
        let shape = match self {
            Item::Track(_) => Shape::Track,
            _ => Shape::Context,
        };
        PlaybackReference {
            uri: self.uri().to_string(),
            name: self.name().to_string(),
            shape,
        }
    }
}

/// The four result lists of one search, in API order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub tracks: Vec<Track>,
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
    pub playlists: Vec<Playlist>,
}

impl SearchResults {
    pub fn len(&self, kind: Kind) -> usize {
        match kind {
            Kind::Track => self.tracks.len(),
            Kind::Album => self.albums.len(),
            Kind::Artist => self.artists.len(),
            Kind::Playlist => self.playlists.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Kind::ALL.iter().all(|k| self.len(*k) == 0)
    }

    pub fn get(&self, kind: Kind, index: usize) -> Option<Item> {
        match kind {
            Kind::Track => self.tracks.get(index).cloned().map(Item::Track),
            Kind::Album => self.albums.get(index).cloned().map(Item::Album),
            Kind::Artist => self.artists.get(index).cloned().map(Item::Artist),
            Kind::Playlist => self.playlists.get(index).cloned().map(Item::Playlist),
        }
    }

    pub fn items(&self, kind: Kind) -> Vec<Item> {
        (0..self.len(kind)).filter_map(|i| self.get(kind, i)).collect()
    }
}

impl From<SearchResponse> for SearchResults {
    fn from(res: SearchResponse) -> Self {
        Self {
            tracks: res.tracks.unwrap_or_default().items,
            artists: res.artists.unwrap_or_default().items,
            albums: res.albums.unwrap_or_default().items,
            playlists: res
                .playlists
                .unwrap_or_default()
                .items
                .into_iter()
                .flatten()
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Played as `{"uris": [uri]}`.
    Track,
    /// Played as `{"context_uri": uri}`.
    Context,
}

/// A resolved playable thing.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackReference {
    pub uri: String,
    pub name: String,
    pub shape: Shape,
}

impl PlaybackReference {
    pub fn to_play_request(&self) -> PlayRequest {
        match self.shape {
            Shape::Track => PlayRequest {
                uris: Some(vec![self.uri.clone()]),
                context_uri: None,
            },
            Shape::Context => PlayRequest {
                uris: None,
                context_uri: Some(self.uri.clone()),
            },
        }
    }
}

#[derive(Tabled)]
pub struct DeviceTableRow {
    #[tabled(rename = "#")]
    pub number: usize,
    pub name: String,
    #[tabled(rename = "type")]
    pub device_type: String,
    pub volume: String,
    pub active: String,
}

#[derive(Tabled)]
pub struct ResultTableRow {
    #[tabled(rename = "#")]
    pub number: usize,
    pub name: String,
    pub by: String,
}
