//! Text rendering of Web API responses. Every function here is pure; the
//! handlers decide where the text goes.

use tabled::Table;

use crate::{
    types::{
        Device, DeviceTableRow, Item, Kind, RepeatMode, ResultTableRow, SearchResults, Track,
    },
    utils::join_names,
};

/// Number of results shown per category after a search.
pub const MAX_LISTED: usize = 5;

/// Clears the scrollback, homes the cursor and clears the screen.
pub const CLEAR_SCREEN: &str = "\x1b[3;J\x1b[H\x1b[2J";

pub fn long_track(track: &Track) -> String {
    let album = track.album.as_ref().map(|a| a.name.as_str()).unwrap_or("");
    format!(
        "Track:  {}\nArtist:\t{}\nAlbum:\t{}\n",
        track.name,
        join_names(track.artists.iter().map(|a| a.name.as_str())),
        album
    )
}

/// `"Name" by Artist, Other`; artists show just their name.
pub fn short_item(item: &Item) -> String {
    match by(item) {
        Some(by) if !by.is_empty() => format!("\"{}\" by {}", item.name(), by),
        _ => format!("\"{}\"", item.name()),
    }
}

fn by(item: &Item) -> Option<String> {
    match item {
        Item::Track(t) => Some(join_names(t.artists.iter().map(|a| a.name.as_str()))),
        Item::Album(a) => Some(join_names(a.artists.iter().map(|a| a.name.as_str()))),
        Item::Artist(_) => None,
        Item::Playlist(p) => p.owner.as_ref().and_then(|o| o.display_name.clone()),
    }
}

pub fn options(shuffle: bool, repeat: RepeatMode) -> String {
    format!(
        "Shuffle: {}\nRepeat:  {}\n",
        if shuffle { "on" } else { "off" },
        repeat
    )
}

pub fn volume(percent: u32) -> String {
    format!("Volume: {}%", percent)
}

pub fn devices(devices: &[Device]) -> String {
    if devices.is_empty() {
        return "No devices available.".to_string();
    }

    let rows: Vec<DeviceTableRow> = devices
        .iter()
        .enumerate()
        .map(|(i, d)| DeviceTableRow {
            number: i + 1,
            name: d.name.clone(),
            device_type: d.device_type.clone(),
            volume: d
                .volume_percent
                .map(|v| format!("{}%", v))
                .unwrap_or_else(|| "-".to_string()),
            active: if d.is_active { "*" } else { "" }.to_string(),
        })
        .collect();

    Table::new(rows).to_string()
}

/// One numbered table per requested kind, at most [`MAX_LISTED`] rows each.
pub fn search_results(results: &SearchResults, kinds: &[Kind]) -> String {
    let mut out = String::new();

    for kind in Kind::ALL.iter().filter(|k| kinds.contains(k)) {
        out.push_str(kind.heading());
        out.push('\n');

        let items = results.items(*kind);
        if items.is_empty() {
            out.push_str("  no results\n\n");
            continue;
        }

        let rows: Vec<ResultTableRow> = items
            .iter()
            .take(MAX_LISTED)
            .enumerate()
            .map(|(i, item)| ResultTableRow {
                number: i + 1,
                name: item.name().to_string(),
                by: by(item).unwrap_or_default(),
            })
            .collect();

        out.push_str(&Table::new(rows).to_string());
        out.push_str("\n\n");
    }

    out
}
